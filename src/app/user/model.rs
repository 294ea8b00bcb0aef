//! 用户数据模型

use serde::{Deserialize, Serialize};

/// 用户记录，字段名与表列名一致
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub user_id: i64,
    pub user_name: String,
    pub user_age: Option<i64>,
    pub bio: Option<String>,
}

/// 创建和更新共用的请求体，PUT 为整条覆盖
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserFields {
    pub user_name: String,
    #[serde(default)]
    pub user_age: Option<i64>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// 写操作响应中携带的用户
#[derive(Debug, Serialize, Deserialize)]
pub struct UserBody {
    pub user: User,
}
