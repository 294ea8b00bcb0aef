//! 用户摘要：拼接提示词并转发给外部语言模型

pub mod handler;
pub mod model;
pub mod service;
