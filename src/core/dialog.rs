//! 关机对话框状态机
//!
//! 与界面框架无关：按钮、加载和拖动事件进来，决定出去

use std::time::Instant;

use log::{error, info, warn};

use crate::core::animation::FadeIn;
use crate::core::shutdown::ShutdownError;
use crate::core::types::{DialogAction, DialogOutcome, DialogState, PointerButton, WindowPhase};

/// 关机失败时展示给用户的消息
pub fn launch_failure_message(err: &ShutdownError) -> String {
    format!("无法执行关机命令: {}", err)
}

/// 关机对话框
#[derive(Debug)]
pub struct ShutdownDialog {
    state: DialogState,
    phase: WindowPhase,
    fade_in: FadeIn,
    /// 关机命令正在启动
    launch_pending: bool,
}

impl ShutdownDialog {
    pub fn new(fade_in: FadeIn) -> Self {
        Self {
            state: DialogState::Open,
            phase: WindowPhase::Loading,
            fade_in,
            launch_pending: false,
        }
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    pub fn phase(&self) -> WindowPhase {
        self.phase
    }

    pub fn fade_in(&self) -> &FadeIn {
        &self.fade_in
    }

    pub fn is_launch_pending(&self) -> bool {
        self.launch_pending
    }

    /// 窗口加载完成
    ///
    /// 返回淡入动画是否在这次调用中开始
    pub fn on_load(&mut self, now: Instant) -> bool {
        if self.phase == WindowPhase::Loading {
            self.phase = WindowPhase::Visible;
        }
        self.fade_in.start(now)
    }

    /// 标题栏被按下，返回是否应开始拖动窗口
    pub fn on_title_bar_press(&self, button: PointerButton) -> bool {
        self.state == DialogState::Open && button.is_primary()
    }

    /// 处理按钮点击
    pub fn on_action(&mut self, action: DialogAction) -> DialogOutcome {
        if self.state == DialogState::Terminated {
            warn!("对话框已终止，忽略操作: {}", action);
            return DialogOutcome::Ignored;
        }

        info!("用户点击: {}", action);

        match action {
            DialogAction::Close | DialogAction::Cancel => self.terminate(),
            DialogAction::Shutdown => {
                if self.launch_pending {
                    warn!("关机命令正在启动，忽略重复点击");
                    return DialogOutcome::Ignored;
                }
                self.launch_pending = true;
                DialogOutcome::LaunchShutdown
            }
        }
    }

    /// 处理关机命令的启动结果
    pub fn on_shutdown_launched(&mut self, result: Result<(), &ShutdownError>) -> DialogOutcome {
        self.launch_pending = false;

        if self.state == DialogState::Terminated {
            return DialogOutcome::Ignored;
        }

        match result {
            Ok(()) => {
                info!("关机命令已启动，退出应用程序");
                self.terminate()
            }
            Err(e) => {
                error!("关机命令启动失败: {}", e);
                DialogOutcome::ShowError(launch_failure_message(e))
            }
        }
    }

    fn terminate(&mut self) -> DialogOutcome {
        self.state = DialogState::Terminated;
        self.phase = WindowPhase::Closing;
        DialogOutcome::Exit
    }
}

impl Default for ShutdownDialog {
    fn default() -> Self {
        Self::new(FadeIn::default())
    }
}
