//! 核心层：配置、错误、响应和中间件

pub mod config;
pub mod error;
pub mod middleware;
pub mod response;
