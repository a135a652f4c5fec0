use crate::container::testing::{TestContainer, TestContainerGuard};
use crate::database::{DatabaseConfig, DbConnection};
use crate::error::FrameworkError;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;

/// Migrated in-memory SQLite database for one test
///
/// The connection is registered in a fresh thread-local test container, so
/// `App::resolve::<DbConnection>()` returns it until the value drops.
pub struct TestDatabase {
    conn: DbConnection,
    _container: TestContainerGuard,
}

impl TestDatabase {
    pub async fn fresh<M: MigratorTrait>() -> Result<Self, FrameworkError> {
        let container = TestContainer::fake();

        // every pooled connection to :memory: is its own database
        let config = DatabaseConfig::builder()
            .url("sqlite::memory:")
            .max_connections(1)
            .min_connections(1)
            .build();
        let conn = DbConnection::connect(&config).await?;
        M::up(conn.inner(), None).await?;

        TestContainer::singleton(conn.clone());
        Ok(Self {
            conn,
            _container: container,
        })
    }

    pub fn conn(&self) -> &DatabaseConnection {
        self.conn.inner()
    }

    pub fn connection(&self) -> DbConnection {
        self.conn.clone()
    }
}
