//! Kit: the HTTP, persistence and view plumbing behind Taskboard.
//!
//! The application crate wires its controllers into a [`Router`], registers
//! services in the [`App`] container and hands everything to [`Application`],
//! which loads configuration, runs migrations and serves requests.

pub mod app;
pub mod config;
pub mod container;
pub mod database;
pub mod error;
pub mod http;
pub mod kernel;
pub mod logging;
pub mod middleware;
pub mod routing;
pub mod server;
pub mod session;
pub mod testing;
pub mod view;

pub use app::Application;
pub use config::{env, AppConfig, Config, Environment, ServerConfig, SessionConfig};
pub use container::App;
pub use database::{DatabaseConfig, DbConnection, DB};
pub use error::{FrameworkError, HttpError, ValidationErrors};
pub use self::http::{HttpResponse, Redirect, Request, Response};
pub use kernel::Kernel;
pub use middleware::{Middleware, MiddlewareRegistry, Next};
pub use routing::{route, Router};
pub use server::Server;
pub use session::{Flash, FlashMiddleware, FlashStore, MemoryFlashStore};
pub use view::View;

#[doc(hidden)]
pub use routing::{
    __delete_impl, __get_impl, __post_impl, __put_impl, validate_route_path, GroupDef, RouteDef,
};

pub use async_trait::async_trait;
