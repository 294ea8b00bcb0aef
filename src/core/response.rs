//! 核心响应处理模块

use serde::{Deserialize, Serialize};

/// 写操作响应结构，`data` 的字段会平铺到顶层
///
/// `ApiResponse::success(UserBody { user })` 序列化为 `{"success": true, "user": {...}}`。
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

/// 没有附加数据的确认
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Ack {}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl ApiResponse<Ack> {
    pub fn ack() -> Self {
        Self::success(Ack {})
    }
}
