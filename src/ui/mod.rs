//! 用户界面模块
//!
//! 关机确认窗口、组件和主题

pub mod components;
pub mod manager;
pub mod theme;
