//! 核心业务逻辑模块
//!
//! 包含对话框状态机、入场动画和关机执行

pub mod animation;
pub mod dialog;
pub mod shutdown;
pub mod types;
