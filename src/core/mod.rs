//! 核心框架模块
//!
//! - Service: 服务注册与按类型查找

pub mod service;

pub use service::{Service, ServiceError, ServiceRegistry};
