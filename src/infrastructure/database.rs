//! 数据库基础设施

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    Error,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::core::config::DatabaseConfig;

const CREATE_USER_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS "user" (
        user_id   INTEGER PRIMARY KEY,
        user_name TEXT NOT NULL,
        user_age  INTEGER,
        bio       TEXT
    )
"#;

/// 连接池的持有者，进程启动时打开，退出前关闭
pub struct DatabaseManager {
    pool: SqlitePool,
}

impl DatabaseManager {
    /// 打开数据库并确保表存在
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str(&config.url)?.create_if_missing(true);

        // 内存库只存在于单个连接中，连接不能被回收
        let pool_options = if is_in_memory(&config.url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.max_connections.max(1))
                .acquire_timeout(Duration::from_secs(8))
        };

        let pool = pool_options.connect_with(options).await?;
        create_tables(&pool).await?;

        info!("Database ready: {}", config.url);
        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// 关闭连接池，等待正在使用的连接归还
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

async fn create_tables(pool: &SqlitePool) -> Result<(), Error> {
    sqlx::query(CREATE_USER_TABLE).execute(pool).await?;
    Ok(())
}
