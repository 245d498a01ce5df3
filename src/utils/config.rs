//! 配置管理模块
//!
//! 负责应用程序配置的加载、保存和校验

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dirs::config_dir;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::core::shutdown::ShutdownCommand;

/// 配置目录名称
pub const APP_DIR_NAME: &str = "ShutdownDialog";

/// 应用程序配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 窗口设置
    pub window: WindowSettings,
    /// 动画设置
    pub animation: AnimationSettings,
    /// 关机设置
    pub shutdown: ShutdownSettings,
    /// 高级设置
    pub advanced: AdvancedSettings,
}

/// 窗口设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// 窗口宽度
    pub width: f32,
    /// 窗口高度
    pub height: f32,
    /// 总是置顶
    pub always_on_top: bool,
}

/// 入场动画设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// 淡入时长（毫秒）
    pub fade_in_ms: u64,
}

/// 关机相关设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShutdownSettings {
    /// 强制关闭正在运行的应用程序
    pub force: bool,
    /// 自定义关机命令，覆盖平台默认命令
    pub command: Option<CommandOverride>,
}

/// 自定义关机命令
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOverride {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// 高级设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedSettings {
    /// 日志级别
    pub log_level: String,
    /// 是否写入日志文件
    pub file_logging: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 360.0,
            height: 200.0,
            always_on_top: true,
        }
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self { fade_in_ms: 300 }
    }
}

impl Default for ShutdownSettings {
    fn default() -> Self {
        Self {
            force: true,
            command: None,
        }
    }
}

impl Default for AdvancedSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            file_logging: false,
        }
    }
}

impl AnimationSettings {
    pub fn fade_in_duration(&self) -> Duration {
        Duration::from_millis(self.fade_in_ms)
    }
}

impl ShutdownSettings {
    /// 解析最终使用的关机命令
    pub fn resolve_command(&self) -> ShutdownCommand {
        match &self.command {
            Some(custom) => ShutdownCommand::new(custom.program.clone(), custom.args.clone()),
            None => ShutdownCommand::platform_default(self.force),
        }
    }
}

/// 配置管理器
///
/// 负责配置文件的加载和保存
#[derive(Debug)]
pub struct ConfigManager {
    /// 配置文件路径
    config_path: PathBuf,
    /// 当前配置
    config: AppConfig,
}

impl ConfigManager {
    /// 从默认位置创建配置管理器
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = Self::get_config_file_path()?;
        Self::with_path(config_path)
    }

    /// 从指定路径创建配置管理器
    ///
    /// 文件不存在时写入默认配置
    pub fn with_path(config_path: impl Into<PathBuf>) -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = config_path.into();
        let config = Self::load_config(&config_path)?;

        Ok(Self {
            config_path,
            config,
        })
    }

    /// 获取配置文件路径
    fn get_config_file_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_dir = config_dir().ok_or("无法获取配置目录")?;

        let app_config_dir = config_dir.join(APP_DIR_NAME);

        if !app_config_dir.exists() {
            fs::create_dir_all(&app_config_dir)?;
            info!("创建配置目录: {:?}", app_config_dir);
        }

        Ok(app_config_dir.join("config.json"))
    }

    /// 加载配置文件
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径
    ///
    /// # 返回值
    ///
    /// 成功返回校验后的配置，格式错误时备份原文件并返回默认配置
    fn load_config(path: &Path) -> Result<AppConfig, Box<dyn std::error::Error>> {
        if !path.exists() {
            info!("配置文件不存在，使用默认配置: {:?}", path);
            let default_config = AppConfig::default();
            Self::save_config_to_file(&default_config, path)?;
            return Ok(default_config);
        }

        info!("加载配置文件: {:?}", path);

        let config_content = fs::read_to_string(path)?;

        match serde_json::from_str::<AppConfig>(&config_content) {
            Ok(config) => {
                info!("配置文件加载成功");
                Ok(ConfigValidator::sanitize(config))
            }
            Err(e) => {
                warn!("配置文件格式错误: {}, 使用默认配置", e);

                // 备份损坏的配置文件
                let backup_path = path.with_extension("json.backup");
                if let Err(backup_err) = fs::copy(path, &backup_path) {
                    warn!("备份损坏的配置文件失败: {}", backup_err);
                }

                let default_config = AppConfig::default();
                Self::save_config_to_file(&default_config, path)?;

                Ok(default_config)
            }
        }
    }

    /// 保存配置到文件
    fn save_config_to_file(config: &AppConfig, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let config_json = serde_json::to_string_pretty(config)?;
        fs::write(path, config_json)?;
        info!("配置文件保存成功: {:?}", path);
        Ok(())
    }

    /// 取出配置
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// 获取配置文件路径
    pub fn get_config_path(&self) -> &Path {
        &self.config_path
    }
}

/// 加载配置，失败时退回默认值
pub fn load_or_default() -> AppConfig {
    match ConfigManager::new() {
        Ok(manager) => {
            info!("使用配置文件: {:?}", manager.get_config_path());
            manager.into_config()
        }
        Err(e) => {
            warn!("加载配置失败: {}, 使用默认配置", e);
            AppConfig::default()
        }
    }
}

/// 配置验证器
pub struct ConfigValidator;

impl ConfigValidator {
    /// 验证窗口设置
    pub fn validate_window_settings(settings: &WindowSettings) -> (bool, Vec<String>) {
        let mut errors = Vec::new();

        if settings.width <= 0.0 || settings.width > 10000.0 {
            errors.push("窗口宽度无效".to_string());
        }
        if settings.height <= 0.0 || settings.height > 10000.0 {
            errors.push("窗口高度无效".to_string());
        }

        (errors.is_empty(), errors)
    }

    /// 验证动画设置
    pub fn validate_animation_settings(settings: &AnimationSettings) -> (bool, Vec<String>) {
        let mut errors = Vec::new();

        if settings.fade_in_ms > 5000 {
            errors.push("淡入时长不应超过5000毫秒".to_string());
        }

        (errors.is_empty(), errors)
    }

    /// 验证关机设置
    pub fn validate_shutdown_settings(settings: &ShutdownSettings) -> (bool, Vec<String>) {
        let mut errors = Vec::new();

        if let Some(custom) = &settings.command {
            if custom.program.trim().is_empty() {
                errors.push("自定义关机程序不能为空".to_string());
            }
        }

        (errors.is_empty(), errors)
    }

    /// 验证高级设置
    pub fn validate_advanced_settings(settings: &AdvancedSettings) -> (bool, Vec<String>) {
        let mut errors = Vec::new();

        let valid_log_levels = ["off", "error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&settings.log_level.to_lowercase().as_str()) {
            errors.push("无效的日志级别".to_string());
        }

        (errors.is_empty(), errors)
    }

    /// 将无效的配置段重置为默认值
    pub fn sanitize(mut config: AppConfig) -> AppConfig {
        let (valid, errors) = Self::validate_window_settings(&config.window);
        if !valid {
            warn!("窗口设置无效: {:?}, 使用默认值", errors);
            config.window = WindowSettings::default();
        }

        let (valid, errors) = Self::validate_animation_settings(&config.animation);
        if !valid {
            warn!("动画设置无效: {:?}, 使用默认值", errors);
            config.animation = AnimationSettings::default();
        }

        let (valid, errors) = Self::validate_shutdown_settings(&config.shutdown);
        if !valid {
            warn!("关机设置无效: {:?}, 使用默认值", errors);
            config.shutdown = ShutdownSettings::default();
        }

        let (valid, errors) = Self::validate_advanced_settings(&config.advanced);
        if !valid {
            warn!("高级设置无效: {:?}, 使用默认值", errors);
            config.advanced = AdvancedSettings::default();
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.window.width, 360.0);
        assert!(config.window.always_on_top);
        assert_eq!(config.animation.fade_in_ms, 300);
        assert!(config.shutdown.force);
        assert!(config.shutdown.command.is_none());
        assert_eq!(config.advanced.log_level, "info");
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let manager = ConfigManager::with_path(&path).unwrap();
        assert!(path.exists());
        assert_eq!(manager.get_config_path(), path.as_path());
        assert_eq!(manager.into_config(), AppConfig::default());
    }

    #[test]
    fn test_saved_config_is_reloaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AppConfig::default();
        config.animation.fade_in_ms = 800;
        config.shutdown.command = Some(CommandOverride {
            program: "systemctl".to_string(),
            args: vec!["poweroff".to_string()],
        });
        ConfigManager::save_config_to_file(&config, &path).unwrap();

        let reloaded = ConfigManager::with_path(&path).unwrap().into_config();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "animation": { "fade_in_ms": 120 } }"#).unwrap();

        let config = ConfigManager::with_path(&path).unwrap().into_config();
        assert_eq!(config.animation.fade_in_ms, 120);
        assert_eq!(config.window, WindowSettings::default());
    }

    #[test]
    fn test_malformed_file_is_backed_up() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let config = ConfigManager::with_path(&path).unwrap().into_config();
        assert_eq!(config, AppConfig::default());
        assert!(dir.path().join("config.json.backup").exists());

        let rewritten = fs::read_to_string(&path).unwrap();
        assert!(serde_json::from_str::<AppConfig>(&rewritten).is_ok());
    }

    #[test]
    fn test_invalid_sections_are_reset() {
        let mut config = AppConfig::default();
        config.window.width = -100.0;
        config.animation.fade_in_ms = 60_000;
        config.advanced.log_level = "loud".to_string();
        config.shutdown.command = Some(CommandOverride {
            program: " ".to_string(),
            args: vec![],
        });

        let sanitized = ConfigValidator::sanitize(config);
        assert_eq!(sanitized, AppConfig::default());
    }

    #[test]
    fn test_resolve_command() {
        let mut settings = ShutdownSettings::default();
        assert_eq!(
            settings.resolve_command(),
            ShutdownCommand::platform_default(true)
        );

        settings.command = Some(CommandOverride {
            program: "systemctl".to_string(),
            args: vec!["poweroff".to_string()],
        });
        let command = settings.resolve_command();
        assert_eq!(command.program, "systemctl");
        assert_eq!(command.args, vec!["poweroff"]);
    }
}
