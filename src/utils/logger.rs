//! 日志管理模块
//!
//! 负责应用程序日志系统的初始化。
//! 日志系统在读取配置之前安装，配置读取后再调整级别和日志文件，
//! 这样加载配置时产生的警告也会被记录。

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};

use chrono::Local;
use dirs::data_local_dir;
use env_logger::{Builder, Target};
use log::{info, LevelFilter};

use crate::utils::config::{AdvancedSettings, APP_DIR_NAME};

static INIT: Once = Once::new();

/// 当前附加的日志文件，由全局日志写入器共享
static LOG_FILE: Mutex<Option<File>> = Mutex::new(None);

/// 日志管理器
#[derive(Debug)]
pub struct LoggerManager {
    /// 日志文件路径
    log_file_path: Option<PathBuf>,
    /// 当前日志级别
    log_level: LevelFilter,
}

impl LoggerManager {
    /// 创建新的日志管理器
    ///
    /// # 参数
    ///
    /// * `log_level` - 日志级别
    /// * `log_file_path` - 日志文件路径，None表示仅输出到控制台
    pub fn new(log_level: LevelFilter, log_file_path: Option<PathBuf>) -> Self {
        Self {
            log_file_path,
            log_level,
        }
    }

    /// 默认的日志文件路径
    ///
    /// 位于本地数据目录下，按日期命名
    pub fn default_log_file_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let data_dir = data_local_dir().ok_or("无法获取本地数据目录")?;
        let log_dir = data_dir.join(APP_DIR_NAME).join("logs");
        Ok(log_dir.join(Self::log_file_name()))
    }

    fn log_file_name() -> String {
        format!("shutdown_dialog_{}.log", Local::now().format("%Y%m%d"))
    }

    /// 初始化日志系统
    ///
    /// 重复调用不会重新初始化
    pub fn init(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut result = Ok(());
        INIT.call_once(|| {
            result = self.init_internal();
        });
        result?;
        self.apply_level();
        self.attach_file()?;
        Ok(())
    }

    fn init_internal(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut builder = Builder::new();
        // 过滤交给 log::max_level，之后才能按配置调高或调低级别
        builder.filter_level(LevelFilter::Trace);

        if let Ok(filters) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }

        builder.format(|buf, record| {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            writeln!(
                buf,
                "[{}] [{}] [{}:{}] {}",
                timestamp,
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        });

        builder.target(Target::Pipe(Box::new(TeeWriter)));
        builder.try_init()?;
        Ok(())
    }

    /// 按配置调整日志级别和日志文件
    ///
    /// # 参数
    ///
    /// * `settings` - 配置中的高级设置
    pub fn apply_settings(&mut self, settings: &AdvancedSettings) -> Result<(), Box<dyn std::error::Error>> {
        self.log_level = LogLevelConverter::from_string(&settings.log_level);
        self.log_file_path = if settings.file_logging {
            Some(Self::default_log_file_path()?)
        } else {
            None
        };

        self.apply_level();
        self.attach_file()?;

        info!(
            "日志配置已应用 - 级别: {:?}, 日志文件: {:?}",
            self.get_log_level(),
            self.get_log_file_path()
        );
        Ok(())
    }

    /// RUST_LOG 优先于配置文件
    fn apply_level(&self) {
        if std::env::var_os("RUST_LOG").is_none() {
            log::set_max_level(self.log_level);
        }
    }

    fn attach_file(&self) -> io::Result<()> {
        let file = match &self.log_file_path {
            Some(path) => Some(Self::open_log_file(path)?),
            None => None,
        };

        if let Ok(mut slot) = LOG_FILE.lock() {
            *slot = file;
        }
        Ok(())
    }

    fn open_log_file(path: &Path) -> io::Result<File> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        fs::OpenOptions::new().create(true).append(true).open(path)
    }

    /// 获取当前日志级别
    pub fn get_log_level(&self) -> LevelFilter {
        self.log_level
    }

    /// 获取日志文件路径
    pub fn get_log_file_path(&self) -> Option<&Path> {
        self.log_file_path.as_deref()
    }
}

/// 同时写入标准输出和已附加的日志文件
struct TeeWriter;

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // 控制台写入失败不影响文件日志
        let _ = io::stdout().write_all(buf);
        if let Ok(mut slot) = LOG_FILE.lock() {
            if let Some(file) = slot.as_mut() {
                file.write_all(buf)?;
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let _ = io::stdout().flush();
        if let Ok(mut slot) = LOG_FILE.lock() {
            if let Some(file) = slot.as_mut() {
                file.flush()?;
            }
        }
        Ok(())
    }
}

/// 日志级别转换工具
pub struct LogLevelConverter;

impl LogLevelConverter {
    /// 从字符串转换为日志级别，无法识别时为info
    pub fn from_string(level_str: &str) -> LevelFilter {
        match level_str.to_lowercase().as_str() {
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info,
        }
    }
}
