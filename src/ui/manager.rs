//! UI管理器模块
//!
//! 使用iced框架实现关机确认窗口，把界面事件转交给对话框状态机

use std::sync::Arc;
use std::time::Instant;

use iced::widget::{column, container};
use iced::{
    executor, time, window, Application, Command, Element, Font, Length, Settings, Subscription,
    Theme as IcedTheme,
};
use log::{debug, info};

use crate::core::animation::{FadeIn, FRAME_INTERVAL};
use crate::core::dialog::ShutdownDialog;
use crate::core::shutdown::{ShutdownError, ShutdownExecutor};
use crate::core::types::{DialogAction, DialogOutcome, DialogState, PointerButton, WindowPhase};
use crate::ui::components;
use crate::ui::theme::{Theme, TransparentBackground};
use crate::utils::config::AppConfig;
use crate::utils::notification::{ErrorNotice, NativeNotifier, Notifier};

/// 窗口标题
pub const WINDOW_TITLE: &str = "关机";

/// 应用程序消息类型
#[derive(Debug, Clone)]
pub enum Message {
    /// 窗口加载完成
    Loaded(Instant),
    /// 动画帧
    Tick(Instant),
    /// 标题栏被按下
    TitleBarPressed(PointerButton),
    /// 按钮点击
    Action(DialogAction),
    /// 关机命令启动结果
    ShutdownLaunched(Result<(), LaunchFailure>),
}

/// 可克隆的启动失败信息，iced消息需要Clone
#[derive(Debug, Clone)]
pub struct LaunchFailure(Arc<ShutdownError>);

/// 启动参数
pub struct Flags {
    pub config: AppConfig,
    pub executor: ShutdownExecutor,
    pub notifier: Box<dyn Notifier>,
}

/// 关机确认窗口
pub struct UIManager {
    dialog: ShutdownDialog,
    executor: ShutdownExecutor,
    notifier: Box<dyn Notifier>,
    theme: Theme,
    /// 当前不透明度
    opacity: f32,
}

impl UIManager {
    fn from_flags(flags: Flags) -> Self {
        let fade_in = FadeIn::new(flags.config.animation.fade_in_duration());

        Self {
            dialog: ShutdownDialog::new(fade_in),
            executor: flags.executor,
            notifier: flags.notifier,
            theme: Theme::default(),
            opacity: 0.0,
        }
    }

    /// 淡入动画是否需要继续刷新
    ///
    /// 动画时长结束后还要补一帧，保证最终完全不透明
    fn is_animating(&self, now: Instant) -> bool {
        let fade_in = self.dialog.fade_in();
        self.dialog.phase() == WindowPhase::Visible
            && (fade_in.is_running(now) || (fade_in.has_started() && self.opacity < 1.0))
    }

    /// 关机按钮是否可点击
    fn shutdown_enabled(&self) -> bool {
        self.dialog.state() == DialogState::Open && !self.dialog.is_launch_pending()
    }

    /// 将状态机的决定转换为iced命令
    fn apply_outcome(&mut self, outcome: DialogOutcome) -> Command<Message> {
        match outcome {
            DialogOutcome::Exit => {
                info!("退出应用程序");
                window::close(window::Id::MAIN)
            }
            DialogOutcome::LaunchShutdown => {
                let executor = self.executor.clone();
                Command::perform(
                    async move {
                        executor
                            .launch()
                            .await
                            .map_err(|e| LaunchFailure(Arc::new(e)))
                    },
                    Message::ShutdownLaunched,
                )
            }
            DialogOutcome::ShowError(message) => {
                // 阻塞直到用户确认，窗口保持打开
                self.notifier.show_error(&ErrorNotice::new(message));
                Command::none()
            }
            DialogOutcome::Ignored => Command::none(),
        }
    }
}

/// 运行UI应用程序
pub fn run_with_params(config: AppConfig, executor: ShutdownExecutor) -> iced::Result {
    let size = iced::Size::new(config.window.width, config.window.height);
    let level = if config.window.always_on_top {
        window::Level::AlwaysOnTop
    } else {
        window::Level::Normal
    };

    let settings = Settings {
        id: None,
        window: window::Settings {
            size,
            position: window::Position::Centered,
            min_size: None,
            max_size: None,
            visible: true,
            resizable: false,
            decorations: false,
            transparent: true,
            level,
            icon: None,
            platform_specific: Default::default(),
            exit_on_close_request: true,
        },
        flags: Flags {
            config,
            executor,
            notifier: Box::new(NativeNotifier),
        },
        fonts: vec![],
        default_font: Font::with_name("Microsoft YaHei"),
        default_text_size: iced::Pixels(14.0),
        antialiasing: true,
    };
    UIManager::run(settings)
}

impl Application for UIManager {
    type Message = Message;
    type Theme = IcedTheme;
    type Executor = executor::Default;
    type Flags = Flags;

    fn new(flags: Self::Flags) -> (Self, Command<Self::Message>) {
        info!("创建关机确认窗口");
        let ui_manager = Self::from_flags(flags);

        // 窗口创建后立即上报一次加载事件
        (ui_manager, Command::perform(async { Instant::now() }, Message::Loaded))
    }

    fn title(&self) -> String {
        WINDOW_TITLE.to_string()
    }

    fn update(&mut self, message: Self::Message) -> Command<Self::Message> {
        match message {
            Message::Loaded(now) => {
                if self.dialog.on_load(now) {
                    self.opacity = self.dialog.fade_in().opacity(now);
                }
                Command::none()
            }
            Message::Tick(now) => {
                self.opacity = self.dialog.fade_in().opacity(now);
                debug!("淡入动画帧，不透明度: {:.2}", self.opacity);
                Command::none()
            }
            Message::TitleBarPressed(button) => {
                if self.dialog.on_title_bar_press(button) {
                    info!("开始拖动窗口");
                    window::drag(window::Id::MAIN)
                } else {
                    info!("忽略标题栏按键: {:?}", button);
                    Command::none()
                }
            }
            Message::Action(action) => {
                let outcome = self.dialog.on_action(action);
                self.apply_outcome(outcome)
            }
            Message::ShutdownLaunched(result) => {
                let result = result.as_ref().map(|_| ()).map_err(|failure| failure.0.as_ref());
                let outcome = self.dialog.on_shutdown_launched(result);
                self.apply_outcome(outcome)
            }
        }
    }

    fn subscription(&self) -> Subscription<Self::Message> {
        // 动画结束后停止计时器
        if self.is_animating(Instant::now()) {
            time::every(FRAME_INTERVAL).map(Message::Tick)
        } else {
            Subscription::none()
        }
    }

    fn view(&self) -> Element<'_, Self::Message> {
        let opacity = self.opacity;

        let body = column![
            components::prompt(&self.theme, opacity),
            components::action_buttons(&self.theme, opacity, self.shutdown_enabled()),
        ]
        .spacing(20)
        .padding(16)
        .width(Length::Fill)
        .height(Length::Fill);

        let content = column![components::title_bar(WINDOW_TITLE, &self.theme, opacity), body];

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(self.theme.window_style(opacity))
            .into()
    }

    fn theme(&self) -> Self::Theme {
        IcedTheme::Dark
    }

    fn style(&self) -> iced::theme::Application {
        iced::theme::Application::Custom(Box::new(TransparentBackground))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shutdown::ShutdownCommand;
    use crate::utils::notification::testing::RecordingNotifier;
    use std::time::Duration;

    fn manager_with(notifier: RecordingNotifier) -> UIManager {
        UIManager::from_flags(Flags {
            config: AppConfig::default(),
            executor: ShutdownExecutor::new(ShutdownCommand::new("shutdown-dialog-missing", vec![])),
            notifier: Box::new(notifier),
        })
    }

    fn launch_failure() -> LaunchFailure {
        LaunchFailure(Arc::new(ShutdownError::Launch {
            program: "shutdown".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied"),
        }))
    }

    #[test]
    fn test_load_starts_fade_in() {
        let mut ui_manager = manager_with(RecordingNotifier::default());
        let now = Instant::now();

        let _command = ui_manager.update(Message::Loaded(now));
        assert!(ui_manager.dialog.fade_in().has_started());
        assert_eq!(ui_manager.opacity, 0.0);

        let _command = ui_manager.update(Message::Tick(now + Duration::from_secs(1)));
        assert_eq!(ui_manager.opacity, 1.0);

        // 第二次加载不会重新播放
        let _command = ui_manager.update(Message::Loaded(now + Duration::from_secs(2)));
        assert_eq!(ui_manager.opacity, 1.0);
    }

    #[test]
    fn test_cancel_and_close_never_show_dialog() {
        for action in [DialogAction::Cancel, DialogAction::Close] {
            let notifier = RecordingNotifier::default();
            let mut ui_manager = manager_with(notifier.clone());

            let _command = ui_manager.update(Message::Action(action));
            assert_eq!(ui_manager.dialog.state(), DialogState::Terminated);
            assert_eq!(notifier.count(), 0);
        }
    }

    #[test]
    fn test_successful_launch_exits_without_dialog() {
        let notifier = RecordingNotifier::default();
        let mut ui_manager = manager_with(notifier.clone());

        let _command = ui_manager.update(Message::Action(DialogAction::Shutdown));
        let _command = ui_manager.update(Message::ShutdownLaunched(Ok(())));

        assert_eq!(ui_manager.dialog.state(), DialogState::Terminated);
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn test_failed_launch_shows_dialog_and_stays_open() {
        let notifier = RecordingNotifier::default();
        let mut ui_manager = manager_with(notifier.clone());

        let _command = ui_manager.update(Message::Action(DialogAction::Shutdown));
        assert!(ui_manager.dialog.is_launch_pending());

        let _command = ui_manager.update(Message::ShutdownLaunched(Err(launch_failure())));

        assert_eq!(ui_manager.dialog.state(), DialogState::Open);
        assert!(!ui_manager.dialog.is_launch_pending());
        assert_eq!(notifier.count(), 1);

        let shown = notifier.shown.lock().unwrap();
        assert_eq!(shown[0].title, "错误");
        assert_eq!(shown[0].message, "无法执行关机命令: access denied");
    }

    #[test]
    fn test_window_responsive_after_failure() {
        let notifier = RecordingNotifier::default();
        let mut ui_manager = manager_with(notifier.clone());

        let _command = ui_manager.update(Message::Action(DialogAction::Shutdown));
        let _command = ui_manager.update(Message::ShutdownLaunched(Err(launch_failure())));
        let _command = ui_manager.update(Message::Action(DialogAction::Cancel));

        assert_eq!(ui_manager.dialog.state(), DialogState::Terminated);
        assert_eq!(notifier.count(), 1);
    }

    fn action_names(command: Command<Message>) -> Vec<String> {
        command
            .actions()
            .iter()
            .map(|action| format!("{:?}", action))
            .collect()
    }

    #[test]
    fn test_new_dispatches_load_by_itself() {
        let (ui_manager, command) = UIManager::new(Flags {
            config: AppConfig::default(),
            executor: ShutdownExecutor::new(ShutdownCommand::new("shutdown-dialog-missing", vec![])),
            notifier: Box::new(RecordingNotifier::default()),
        });

        // 加载事件由启动命令产生，不需要用户操作
        assert!(!ui_manager.dialog.fade_in().has_started());
        let actions = action_names(command);
        assert_eq!(actions.len(), 1);
        assert!(actions[0].contains("Future"));
    }

    #[test]
    fn test_animation_stops_after_fade_in() {
        let mut ui_manager = manager_with(RecordingNotifier::default());
        let now = Instant::now();
        assert!(!ui_manager.is_animating(now));

        let _command = ui_manager.update(Message::Loaded(now));
        assert!(ui_manager.is_animating(now + Duration::from_millis(100)));

        // 时长已过但最后一帧尚未刷新
        assert!(ui_manager.is_animating(now + Duration::from_secs(1)));

        let _command = ui_manager.update(Message::Tick(now + Duration::from_secs(1)));
        assert!(!ui_manager.is_animating(now + Duration::from_secs(1)));
    }

    #[test]
    fn test_title_bar_drag_command() {
        let mut ui_manager = manager_with(RecordingNotifier::default());

        let actions = action_names(ui_manager.update(Message::TitleBarPressed(PointerButton::Primary)));
        assert_eq!(actions.len(), 1);
        assert!(actions[0].contains("Drag"));

        for button in [PointerButton::Secondary, PointerButton::Middle] {
            let actions = action_names(ui_manager.update(Message::TitleBarPressed(button)));
            assert!(actions.is_empty());
        }
    }

    #[test]
    fn test_close_returns_close_command() {
        let mut ui_manager = manager_with(RecordingNotifier::default());

        let actions = action_names(ui_manager.update(Message::Action(DialogAction::Cancel)));
        assert_eq!(actions.len(), 1);
        assert!(actions[0].contains("Close"));
    }

    #[test]
    fn test_shutdown_button_disabled_while_launching() {
        let notifier = RecordingNotifier::default();
        let mut ui_manager = manager_with(notifier.clone());
        assert!(ui_manager.shutdown_enabled());

        let actions = action_names(ui_manager.update(Message::Action(DialogAction::Shutdown)));
        assert_eq!(actions.len(), 1);
        assert!(actions[0].contains("Future"));
        assert!(!ui_manager.shutdown_enabled());

        let _command = ui_manager.update(Message::ShutdownLaunched(Err(launch_failure())));
        assert!(ui_manager.shutdown_enabled());
    }
}
