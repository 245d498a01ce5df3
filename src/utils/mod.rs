//! 工具模块
//!
//! 配置、日志和错误提示等辅助功能

pub mod config;
pub mod logger;
pub mod notification;
