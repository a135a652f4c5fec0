//! One-shot flash data carried across a redirect
//!
//! A handler attaches flash values to its redirect
//! (`Redirect::to("/").with("message", ...)`). [`FlashMiddleware`] stores them
//! under the client's session cookie and hands them to the next request
//! through [`Request::flash`](crate::Request::flash), removing them from the
//! store at the same time. Whatever that request does not display is gone.

mod flash;
mod middleware;
mod store;

pub use flash::Flash;
pub use middleware::FlashMiddleware;
pub use store::{FlashStore, MemoryFlashStore};
