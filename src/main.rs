//! ShutdownDialog - 关机确认对话框
//!
//! 打开时淡入显示，确认后立即关闭计算机，取消则直接退出。

use log::info;

mod app;
mod core;
mod ui;
mod utils;

/// 应用程序入口点
///
/// 初始化日志系统、加载配置并启动GUI
fn main() -> anyhow::Result<()> {
    let (config, _logger) = app::bootstrap();

    info!("ShutdownDialog 启动中...");

    app::App::new(config).run()
}
