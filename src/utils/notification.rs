//! 错误提示模块
//!
//! 以阻塞的原生消息框向用户展示错误

use log::info;
use rfd::{MessageButtons, MessageDialog, MessageLevel};

/// 错误提示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    /// 标题
    pub title: String,
    /// 内容
    pub message: String,
}

impl ErrorNotice {
    /// 创建标题为“错误”的提示
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            title: "错误".to_string(),
            message: message.into(),
        }
    }
}

/// 错误提示接口
pub trait Notifier {
    /// 展示错误，直到用户确认才返回
    fn show_error(&self, notice: &ErrorNotice);
}

/// 基于rfd的原生消息框
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeNotifier;

impl Notifier for NativeNotifier {
    fn show_error(&self, notice: &ErrorNotice) {
        info!("显示错误对话框: {}", notice.message);

        let result = MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title(notice.title.as_str())
            .set_description(notice.message.as_str())
            .set_buttons(MessageButtons::Ok)
            .show();

        info!("错误对话框已关闭: {:?}", result);
    }
}
