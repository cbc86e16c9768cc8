/*
 * Responsibility
 * - 起動時の backing store 疎通確認（app::build_state からちょうど 1 回）
 * - 成否はログで通知。Advisory では失敗しても起動を継続する
 */
use std::time::Duration;

use sqlx::PgPool;
use thiserror::Error;

use crate::config::ProbeMode;
use crate::db;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("probe timed out after {0:?}")]
    Timeout(Duration),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// 1 往復の疎通クエリを timeout 付きで投げる
pub async fn ping(pool: &PgPool, timeout: Duration) -> Result<(), ProbeError> {
    match tokio::time::timeout(timeout, db::ping(pool)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(ProbeError::Db(err)),
        Err(_) => Err(ProbeError::Timeout(timeout)),
    }
}

/// startup probe 本体。pool は借用するだけで所有も close もしない。
pub async fn run(pool: &PgPool, mode: ProbeMode, timeout: Duration) -> Result<(), ProbeError> {
    match ping(pool, timeout).await {
        Ok(()) => {
            tracing::info!("Database connected successfully");
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "Database connection failed");
            match mode {
                ProbeMode::Advisory => Ok(()),
                ProbeMode::FailFast => Err(err),
            }
        }
    }
}
