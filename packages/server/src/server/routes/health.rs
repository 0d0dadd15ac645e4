use std::time::Duration;

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;
use sqlx::PgPool;

use crate::server::app::AxumAppState;

const DB_PING_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    database: DatabaseHealth,
    connection_pool: PoolStats,
}

#[derive(Serialize)]
pub struct DatabaseHealth {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
pub struct PoolStats {
    size: u32,
    idle: usize,
    max: u32,
}

async fn ping(pool: &PgPool) -> DatabaseHealth {
    let outcome = tokio::time::timeout(DB_PING_TIMEOUT, sqlx::query("SELECT 1").execute(pool)).await;

    let error = match outcome {
        Ok(Ok(_)) => None,
        Ok(Err(e)) => Some(format!("query failed: {e}")),
        Err(_) => Some(format!("no answer within {}s", DB_PING_TIMEOUT.as_secs())),
    };

    DatabaseHealth {
        ok: error.is_none(),
        error,
    }
}

/// Liveness plus database reachability: 200 when the ping answers, 503 otherwise
pub async fn health_handler(
    Extension(state): Extension<AxumAppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let pool = &state.deps.db_pool;
    let database = ping(pool).await;

    let (code, status) = if database.ok {
        (StatusCode::OK, "healthy")
    } else {
        tracing::warn!(error = ?database.error, "Health check failed");
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    let connection_pool = PoolStats {
        size: pool.size(),
        idle: pool.num_idle(),
        max: pool.options().get_max_connections(),
    };

    (
        code,
        Json(HealthResponse {
            status,
            database,
            connection_pool,
        }),
    )
}
