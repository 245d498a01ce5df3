//! UI主题模块
//!
//! 对话框的颜色、尺寸，以及随淡入动画变化透明度的样式

use iced::widget::{button, container};
use iced::{application, Background, Border, Color, Shadow, Theme as IcedTheme, Vector};

/// 对话框主题
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// 颜色配置
    pub colors: ThemeColors,
    /// 标题字体大小
    pub heading_size: f32,
    /// 正文字体大小
    pub body_size: f32,
    /// 窗口圆角
    pub window_radius: f32,
    /// 按钮圆角
    pub button_radius: f32,
}

/// 主题颜色配置
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    /// 窗口背景色
    pub background: [u8; 3],
    /// 标题栏背景色
    pub title_bar: [u8; 3],
    /// 主要文本色
    pub text: [u8; 3],
    /// 次要文本色
    pub text_secondary: [u8; 3],
    /// 次要按钮背景
    pub secondary: [u8; 3],
    /// 危险操作（关机）按钮背景
    pub danger: [u8; 3],
    /// 边框色
    pub border: [u8; 3],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            colors: ThemeColors {
                background: [33, 37, 41],
                title_bar: [52, 58, 64],
                text: [248, 249, 250],
                text_secondary: [173, 181, 189],
                secondary: [73, 80, 87],
                danger: [220, 53, 69],
                border: [73, 80, 87],
            },
            heading_size: 16.0,
            body_size: 14.0,
            window_radius: 8.0,
            button_radius: 4.0,
        }
    }
}

/// 按给定不透明度生成颜色
fn rgba([r, g, b]: [u8; 3], opacity: f32) -> Color {
    Color::from_rgba8(r, g, b, opacity.clamp(0.0, 1.0))
}

impl Theme {
    pub fn text_color(&self, opacity: f32) -> Color {
        rgba(self.colors.text, opacity)
    }

    pub fn text_secondary_color(&self, opacity: f32) -> Color {
        rgba(self.colors.text_secondary, opacity)
    }

    /// 窗口主体样式
    pub fn window_style(&self, opacity: f32) -> impl Fn(&IcedTheme) -> container::Appearance {
        let background = rgba(self.colors.background, opacity);
        let border = rgba(self.colors.border, opacity);
        let text = rgba(self.colors.text, opacity);
        let radius = self.window_radius;

        move |_theme: &IcedTheme| container::Appearance {
            background: Some(Background::Color(background)),
            border: Border {
                color: border,
                width: 1.0,
                radius: radius.into(),
            },
            shadow: Shadow::default(),
            text_color: Some(text),
        }
    }

    /// 标题栏样式
    pub fn title_bar_style(&self, opacity: f32) -> impl Fn(&IcedTheme) -> container::Appearance {
        let background = rgba(self.colors.title_bar, opacity);
        let radius = self.window_radius;

        move |_theme: &IcedTheme| container::Appearance {
            background: Some(Background::Color(background)),
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: [radius, radius, 0.0, 0.0].into(),
            },
            ..Default::default()
        }
    }

    /// 按钮样式
    pub fn button_style(&self, kind: ButtonKind, opacity: f32) -> iced::theme::Button {
        let background = match kind {
            ButtonKind::Danger => Some(self.colors.danger),
            ButtonKind::Secondary => Some(self.colors.secondary),
            ButtonKind::Flat => None,
        };

        iced::theme::Button::Custom(Box::new(FadingButton {
            background: background.map(|rgb| rgba(rgb, opacity)),
            text: self.text_color(opacity),
            radius: self.button_radius,
        }))
    }
}

/// 按钮类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    /// 关机按钮
    Danger,
    /// 取消按钮
    Secondary,
    /// 标题栏关闭按钮
    Flat,
}

/// 随透明度变化的按钮样式
struct FadingButton {
    background: Option<Color>,
    text: Color,
    radius: f32,
}

impl FadingButton {
    fn appearance(&self, background: Option<Color>) -> button::Appearance {
        button::Appearance {
            shadow_offset: Vector::default(),
            background: background.map(Background::Color),
            text_color: self.text,
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: self.radius.into(),
            },
            shadow: Shadow::default(),
        }
    }
}

/// 将颜色调亮，用于悬停状态
fn lighten(color: Color, amount: f32) -> Color {
    Color {
        r: (color.r + amount).min(1.0),
        g: (color.g + amount).min(1.0),
        b: (color.b + amount).min(1.0),
        a: color.a,
    }
}

impl button::StyleSheet for FadingButton {
    type Style = IcedTheme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        self.appearance(self.background)
    }

    fn hovered(&self, _style: &Self::Style) -> button::Appearance {
        let hovered = match self.background {
            Some(color) => lighten(color, 0.08),
            None => Color { a: 0.15 * self.text.a, ..self.text },
        };
        self.appearance(Some(hovered))
    }

    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        let active = self.active(style);
        button::Appearance {
            background: active.background.map(|background| match background {
                Background::Color(color) => Background::Color(Color { a: color.a * 0.5, ..color }),
                other => other,
            }),
            text_color: Color {
                a: active.text_color.a * 0.5,
                ..active.text_color
            },
            ..active
        }
    }
}

/// 透明的应用背景，配合无边框透明窗口实现淡入
pub struct TransparentBackground;

impl application::StyleSheet for TransparentBackground {
    type Style = IcedTheme;

    fn appearance(&self, style: &Self::Style) -> application::Appearance {
        application::Appearance {
            background_color: Color::TRANSPARENT,
            text_color: style.palette().text,
        }
    }
}
