//! In-process test helpers
//!
//! ```rust,ignore
//! let db = TestDatabase::fresh::<Migrator>().await?;
//! let client = TestClient::new(routes::register()).middleware(FlashMiddleware::memory());
//!
//! client
//!     .post_form("/add", &[("description", "Buy milk")])
//!     .await
//!     .assert_redirect("/");
//! client.get("/").await.assert_see("Task added successfully!");
//! ```

mod client;
mod database;

pub use crate::container::testing::{TestContainer, TestContainerGuard};
pub use client::{TestClient, TestResponse};
pub use database::TestDatabase;
