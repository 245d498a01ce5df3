//! 应用程序主模块
//!
//! 初始化日志、加载配置、准备关机执行器并启动确认窗口

use anyhow::{anyhow, Result};
use log::{info, warn, LevelFilter};

use crate::core::shutdown::ShutdownExecutor;
use crate::utils::config::{self, AppConfig};
use crate::utils::logger::LoggerManager;

/// 读取配置前使用的日志级别
const BOOTSTRAP_LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// 安装日志系统后再加载配置，最后按配置调整日志
pub fn bootstrap() -> (AppConfig, LoggerManager) {
    bootstrap_with(config::load_or_default)
}

fn bootstrap_with<F>(load_config: F) -> (AppConfig, LoggerManager)
where
    F: FnOnce() -> AppConfig,
{
    let mut logger = LoggerManager::new(BOOTSTRAP_LOG_LEVEL, None);
    if let Err(e) = logger.init() {
        eprintln!("日志系统初始化失败: {}", e);
    }

    let config = load_config();

    if let Err(e) = logger.apply_settings(&config.advanced) {
        warn!("应用日志配置失败: {}, 继续使用控制台日志", e);
    }

    (config, logger)
}

/// 应用程序主结构体
pub struct App {
    /// 应用配置
    config: AppConfig,
    /// 关机执行器
    shutdown_executor: ShutdownExecutor,
}

impl App {
    /// 根据配置创建应用实例
    pub fn new(config: AppConfig) -> Self {
        info!("初始化应用组件...");

        let command = config.shutdown.resolve_command();
        let shutdown_executor = ShutdownExecutor::new(command);

        Self {
            config,
            shutdown_executor,
        }
    }

    /// 运行应用程序
    ///
    /// 阻塞直到窗口关闭
    pub fn run(self) -> Result<()> {
        if self.config.shutdown.command.is_some() {
            warn!("使用自定义关机命令: {}", self.shutdown_executor.command());
        }

        info!("启动用户界面...");

        crate::ui::manager::run_with_params(self.config, self.shutdown_executor)
            .map_err(|e| anyhow!("界面运行失败: {}", e))?;

        info!("用户界面已关闭");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shutdown::ShutdownCommand;
    use crate::utils::config::{CommandOverride, ConfigManager};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_logger_installed_before_config_is_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let (config, _logger) = bootstrap_with(|| {
            // 加载配置时产生的警告必须有日志系统接收
            let warn_metadata = log::Metadata::builder()
                .level(log::Level::Warn)
                .target("shutdown_dialog")
                .build();
            assert!(log::logger().enabled(&warn_metadata));
            assert!(log::max_level() >= LevelFilter::Warn);

            ConfigManager::with_path(&path).unwrap().into_config()
        });

        assert_eq!(config, AppConfig::default());
        assert!(dir.path().join("config.json.backup").exists());
    }

    #[test]
    fn test_app_uses_platform_command_by_default() {
        let app = App::new(AppConfig::default());
        assert_eq!(
            app.shutdown_executor.command(),
            &ShutdownCommand::platform_default(true)
        );
    }

    #[test]
    fn test_app_uses_configured_command() {
        let mut config = AppConfig::default();
        config.shutdown.command = Some(CommandOverride {
            program: "systemctl".to_string(),
            args: vec!["poweroff".to_string()],
        });

        let app = App::new(config);
        assert_eq!(app.shutdown_executor.command().program, "systemctl");
    }
}
