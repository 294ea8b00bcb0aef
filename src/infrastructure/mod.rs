//! 基础设施层

pub mod database;
pub mod llm;
pub mod logger;
