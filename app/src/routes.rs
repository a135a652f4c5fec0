use kit::{delete, get, group, post, put, routes};

use crate::controllers::{task_api, task_web};

routes! {
    get!("/", task_web::index).name("tasks.index"),
    post!("/add", task_web::store).name("tasks.store"),
    get!("/edit/{id}", task_web::edit).name("tasks.edit"),
    post!("/update/{id}", task_web::update).name("tasks.update"),
    post!("/toggle/{id}", task_web::toggle).name("tasks.toggle"),
    post!("/delete/{id}", task_web::destroy).name("tasks.destroy"),

    group!("/tasks", {
        get!("/", task_api::index).name("api.tasks.index"),
        post!("/", task_api::store).name("api.tasks.store"),
        get!("/{id}", task_api::show).name("api.tasks.show"),
        put!("/{id}", task_api::update).name("api.tasks.update"),
        delete!("/{id}", task_api::destroy).name("api.tasks.destroy"),
    }),
}
