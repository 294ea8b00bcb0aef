//! 摘要业务服务

use std::sync::Arc;

use tracing::info;

use super::model::SummaryRequest;
use crate::app::user::{model::User, service::UserStore};
use crate::core::error::CoreError;
use crate::infrastructure::llm::CompletionClient;

/// 调用方没有提供说明时使用的默认指令
pub const DEFAULT_INSTRUCTIONS: &str = "Provide a concise summary of the following user information and a relevant connection between the users based on their bios, names, and ages.";

const NO_NAME: &str = "No names provided";
const NO_AGE: &str = "No ages provided";
const NO_BIO: &str = "No bio provided";

/// 拼接提示词：指令在前，随后是按字段分组的用户数据
///
/// 空字符串、缺失的字段以及为 0 的年龄都用占位文字替代。
pub fn build_prompt(users: &[User], instructions: Option<&str>) -> String {
    let names = users
        .iter()
        .map(|u| {
            if u.user_name.is_empty() {
                NO_NAME.to_string()
            } else {
                u.user_name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    let ages = users
        .iter()
        .map(|u| match u.user_age {
            Some(age) if age != 0 => age.to_string(),
            _ => NO_AGE.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n");

    let bios = users
        .iter()
        .map(|u| match u.bio.as_deref() {
            Some(bio) if !bio.is_empty() => bio.to_string(),
            _ => NO_BIO.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n");

    let instructions = instructions
        .filter(|text| !text.is_empty())
        .unwrap_or(DEFAULT_INSTRUCTIONS);

    format!(
        "{instructions}\n\nUser Data:\nBios:\n{bios}\nNames:\n{names}\nAges:\n{ages}"
    )
}

/// 读取选中的用户并请求外部模型生成摘要
#[derive(Clone)]
pub struct SummaryService {
    users: UserStore,
    completions: Arc<dyn CompletionClient>,
}

impl SummaryService {
    pub fn new(users: UserStore, completions: Arc<dyn CompletionClient>) -> Self {
        Self { users, completions }
    }

    pub async fn summarize(&self, request: &SummaryRequest) -> Result<String, CoreError> {
        let ids = request.selected_ids();
        if ids.is_empty() {
            return Err(CoreError::bad_request("No users selected"));
        }

        let users = self
            .users
            .get_by_ids(ids)
            .await
            .map_err(CoreError::storage("Failed to fetch users"))?;

        let prompt = build_prompt(&users, request.instructions.as_deref());
        info!(
            "Requesting summary for {} of {} selected users",
            users.len(),
            ids.len()
        );

        Ok(self.completions.complete(&prompt).await?)
    }
}
