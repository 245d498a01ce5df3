//! UI组件模块
//!
//! 对话框的标题栏、提示文字和按钮行

use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, column, container, mouse_area, row, text, Space};
use iced::{Alignment, Element, Length};

use crate::core::types::{DialogAction, PointerButton};
use crate::ui::manager::Message;
use crate::ui::theme::{ButtonKind, Theme};

/// 标题栏高度
pub const TITLE_BAR_HEIGHT: f32 = 36.0;

/// 构建可拖动的标题栏
///
/// 左键按下开始拖动窗口，右键和中键同样上报，由管理器决定是否忽略
pub fn title_bar<'a>(title: &'a str, theme: &Theme, opacity: f32) -> Element<'a, Message> {
    let close_button = button(
        text("✕")
            .size(theme.body_size)
            .horizontal_alignment(Horizontal::Center)
            .vertical_alignment(Vertical::Center),
    )
    .on_press(Message::Action(DialogAction::Close))
    .padding([4, 10])
    .style(theme.button_style(ButtonKind::Flat, opacity));

    let label = mouse_area(
        container(text(title).size(theme.heading_size).style(theme.text_color(opacity)))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_y()
            .padding([0, 12]),
    )
    .on_press(Message::TitleBarPressed(PointerButton::Primary))
    .on_right_press(Message::TitleBarPressed(PointerButton::Secondary))
    .on_middle_press(Message::TitleBarPressed(PointerButton::Middle));

    container(
        row![label, close_button]
            .align_items(Alignment::Center)
            .padding([0, 4, 0, 0]),
    )
    .width(Length::Fill)
    .height(Length::Fixed(TITLE_BAR_HEIGHT))
    .style(theme.title_bar_style(opacity))
    .into()
}

/// 构建提示文字
pub fn prompt<'a>(theme: &Theme, opacity: f32) -> Element<'a, Message> {
    column![
        text("确定要关闭计算机吗？")
            .size(theme.heading_size)
            .style(theme.text_color(opacity)),
        text("所有正在运行的程序将被强制关闭。")
            .size(theme.body_size)
            .style(theme.text_secondary_color(opacity)),
    ]
    .spacing(8)
    .into()
}

/// 构建取消与关机按钮
///
/// # 参数
///
/// * `shutdown_enabled` - 关机命令启动期间为false
pub fn action_buttons<'a>(theme: &Theme, opacity: f32, shutdown_enabled: bool) -> Element<'a, Message> {
    let cancel_button = button(
        text("取消")
            .size(theme.body_size)
            .horizontal_alignment(Horizontal::Center),
    )
    .on_press(Message::Action(DialogAction::Cancel))
    .padding([8, 16])
    .width(Length::Fixed(96.0))
    .style(theme.button_style(ButtonKind::Secondary, opacity));

    let shutdown_button = button(
        text("关机")
            .size(theme.body_size)
            .horizontal_alignment(Horizontal::Center),
    )
    .on_press_maybe(shutdown_enabled.then_some(Message::Action(DialogAction::Shutdown)))
    .padding([8, 16])
    .width(Length::Fixed(96.0))
    .style(theme.button_style(ButtonKind::Danger, opacity));

    row![Space::with_width(Length::Fill), cancel_button, shutdown_button]
        .spacing(12)
        .align_items(Alignment::Center)
        .into()
}
