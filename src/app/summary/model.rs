//! 摘要请求与响应

use serde::{Deserialize, Serialize};

/// 摘要请求，`userIds` 缺省或为 null 时视为空
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    #[serde(default)]
    pub user_ids: Option<Vec<i64>>,
    #[serde(default)]
    pub instructions: Option<String>,
}

impl SummaryRequest {
    /// 选中的用户 id，未选择时为空切片
    pub fn selected_ids(&self) -> &[i64] {
        self.user_ids.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}
