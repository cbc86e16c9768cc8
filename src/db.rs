/*
 * Responsibility
 * - DbConfig → PgPool の構築（lazy。ここでは DB と往復しない）
 * - SELECT 1 の疎通クエリ
 */
use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use crate::config::{ConfigError, DbConfig};

pub fn connect(cfg: &DbConfig) -> Result<PgPool, ConfigError> {
    let port: u16 = cfg
        .port
        .parse()
        .map_err(|_| ConfigError::Invalid("DB_PORT"))?;

    let options = PgConnectOptions::new()
        .host(&cfg.host)
        .port(port)
        .username(&cfg.username)
        .password(&cfg.password)
        .database(&cfg.database);

    // 実接続は初回クエリ（= startup probe）まで遅延する
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy_with(options);

    Ok(pool)
}

/// 生きた認証済みチャネルを 1 往復で確認する
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_config(port: &str) -> DbConfig {
        DbConfig {
            host: "localhost".into(),
            port: port.into(),
            username: "postgres".into(),
            password: "postgres".into(),
            database: "hello".into(),
        }
    }

    #[tokio::test]
    async fn connect_accepts_a_numeric_port() {
        assert!(connect(&db_config("5432")).is_ok());
    }

    #[test]
    fn connect_rejects_a_malformed_port() {
        let err = connect(&db_config("not-a-port")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("DB_PORT")));
    }
}
