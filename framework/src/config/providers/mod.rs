mod app;
mod server;
mod session;

pub use app::AppConfig;
pub use server::ServerConfig;
pub use session::SessionConfig;
