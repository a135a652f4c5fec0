//! HTML templates, compiled into the binary

use kit::{FrameworkError, View};

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("templates/layout.html")),
    ("tasks.html", include_str!("templates/tasks.html")),
    ("edit_task.html", include_str!("templates/edit_task.html")),
];

pub fn compile() -> Result<View, FrameworkError> {
    View::new(TEMPLATES)
}
