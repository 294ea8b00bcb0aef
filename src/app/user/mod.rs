//! 用户资源：存储与 CRUD 接口

pub mod handler;
pub mod model;
pub mod service;
