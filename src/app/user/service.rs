//! 用户存储服务

use sqlx::{sqlite::SqlitePool, QueryBuilder, Sqlite};

use super::model::{User, UserFields};

const USER_COLUMNS: &str = "user_id, user_name, user_age, bio";

/// 单条 `IN (...)` 查询绑定的 id 上限，远低于 SQLite 的参数个数限制
const MAX_IDS_PER_QUERY: usize = 500;

/// 存储层错误
#[derive(Debug, thiserror::Error)]
#[error("database error: {0}")]
pub struct StoreError(#[from] sqlx::Error);

/// 基于单表的用户存储
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 按插入顺序返回全部用户
    pub async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(&format!(
            r#"SELECT {USER_COLUMNS} FROM "user" ORDER BY user_id"#
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn insert(&self, fields: &UserFields) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"INSERT INTO "user" (user_name, user_age, bio) VALUES (?, ?, ?) RETURNING {USER_COLUMNS}"#
        ))
        .bind(&fields.user_name)
        .bind(fields.user_age)
        .bind(&fields.bio)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"SELECT {USER_COLUMNS} FROM "user" WHERE user_id = ?"#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// 批量读取，不存在的 id 直接忽略，重复的 id 只返回一次
    ///
    /// id 去重后分批查询，结果按 user_id 排序。
    pub async fn get_by_ids(&self, ids: &[i64]) -> Result<Vec<User>, StoreError> {
        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let mut users = Vec::new();
        for chunk in ids.chunks(MAX_IDS_PER_QUERY) {
            let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
                r#"SELECT {USER_COLUMNS} FROM "user" WHERE user_id IN ("#
            ));
            let mut separated = query.separated(", ");
            for id in chunk {
                separated.push_bind(*id);
            }
            separated.push_unseparated(") ORDER BY user_id");

            users.extend(query.build_query_as::<User>().fetch_all(&self.pool).await?);
        }
        Ok(users)
    }

    /// 覆盖姓名、年龄和简介，id 不变
    pub async fn update(&self, id: i64, fields: &UserFields) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"UPDATE "user" SET user_name = ?, user_age = ?, bio = ? WHERE user_id = ? RETURNING {USER_COLUMNS}"#
        ))
        .bind(&fields.user_name)
        .bind(fields.user_age)
        .bind(&fields.bio)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// 删除并返回被删除的记录
    pub async fn delete_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"DELETE FROM "user" WHERE user_id = ? RETURNING {USER_COLUMNS}"#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// 连通性检查
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
