//! Postgres-backed test context.
//!
//! The first test to run starts a single Postgres 16 container and applies
//! the migrations; every later test reuses both. Tests share the database
//! and isolate themselves through freshly created users, so they must not
//! assume any table is otherwise empty.

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use server_core::kernel::{ServerDeps, TestDependencies};

struct Database {
    url: String,
    // dropped at process exit, which stops the container
    _container: ContainerAsync<Postgres>,
}

static DATABASE: OnceCell<Database> = OnceCell::const_new();

async fn start_database() -> Result<Database> {
    // RUST_LOG=server_core=debug cargo test -- --nocapture
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let container = Postgres::default()
        .with_tag("16")
        .with_cmd(["-c", "max_connections=200"])
        .start()
        .await
        .context("Failed to start Postgres container")?;

    let url = format!(
        "postgresql://postgres:postgres@{}:{}/postgres",
        container.get_host().await?,
        container.get_host_port_ipv4(5432).await?
    );

    let pool = PgPool::connect(&url)
        .await
        .context("Failed to connect for migrations")?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    pool.close().await;

    Ok(Database {
        url,
        _container: container,
    })
}

async fn database() -> &'static Database {
    DATABASE
        .get_or_init(|| async {
            start_database()
                .await
                .expect("Failed to start shared test database")
        })
        .await
}

/// Per-test context holding its own pool on the shared database.
///
/// ```ignore
/// use test_context::test_context;
///
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let hr = create_user(&ctx.db_pool, Role::Hr).await.unwrap();
/// }
/// ```
pub struct TestHarness {
    pub db_pool: PgPool,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(&database().await.url)
            .await
            .context("Failed to connect to test database")?;

        Ok(Self { db_pool })
    }

    /// Server dependencies on this pool with the given mocks
    pub fn deps(&self, test_deps: TestDependencies) -> ServerDeps {
        test_deps.into_server_deps(self.db_pool.clone())
    }
}
