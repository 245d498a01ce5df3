//! 核心数据类型定义
//!
//! 定义对话框使用的所有核心数据结构和枚举

use std::fmt;

/// 窗口阶段
///
/// 由窗口生命周期事件驱动
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPhase {
    /// 窗口已创建，尚未收到加载事件
    Loading,
    /// 窗口已显示
    Visible,
    /// 已请求退出
    Closing,
}

/// 对话框状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    /// 初始状态，等待用户操作
    Open,
    /// 终止状态，应用即将退出
    Terminated,
}

/// 用户可触发的按钮操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    /// 标题栏关闭按钮
    Close,
    /// 取消按钮
    Cancel,
    /// 关机按钮
    Shutdown,
}

impl fmt::Display for DialogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialogAction::Close => write!(f, "关闭"),
            DialogAction::Cancel => write!(f, "取消"),
            DialogAction::Shutdown => write!(f, "关机"),
        }
    }
}

/// 处理按钮操作后交给窗口层的决定
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    /// 退出应用程序
    Exit,
    /// 显示错误对话框并保持窗口打开
    ShowError(String),
    /// 需要启动关机命令，结果稍后回报
    LaunchShutdown,
    /// 无操作（对话框已终止或关机命令正在启动）
    Ignored,
}

/// 指针按键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// 主按键（通常为左键）
    Primary,
    /// 次按键（通常为右键）
    Secondary,
    /// 中键
    Middle,
}

impl PointerButton {
    /// 是否为主按键
    pub fn is_primary(self) -> bool {
        self == PointerButton::Primary
    }
}
