//! # 用户摘要服务
//!
//! 单表用户的 CRUD 接口，外加一个把选中用户的资料转发给外部语言模型、
//! 返回文本摘要的接口。分层结构：
//! - `app`：路由、处理器与业务服务
//! - `core`：配置、错误、响应结构和中间件
//! - `infrastructure`：数据库、日志和外部 LLM 客户端

pub mod app;
pub mod core;
pub mod infrastructure;

pub use crate::app::{router, AppState};
pub use crate::core::config::Config;
