//! 关机执行器模块
//!
//! 负责构造平台关机命令并启动外部进程

use std::process::Stdio;

use log::{error, info};
use thiserror::Error;
use tokio::process::Command as AsyncCommand;

#[cfg(windows)]
use winapi::um::winbase::CREATE_NO_WINDOW;

/// 关机错误
#[derive(Debug, Error)]
pub enum ShutdownError {
    /// 无法启动关机进程
    #[error("{source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// 配置的关机程序为空
    #[error("关机程序未配置")]
    EmptyCommand,
}

/// 关机命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShutdownCommand {
    /// 可执行程序
    pub program: String,
    /// 命令参数
    pub args: Vec<String>,
}

impl ShutdownCommand {
    /// 创建自定义关机命令
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// 当前平台的立即关机命令
    ///
    /// # 参数
    ///
    /// * `force` - 是否强制关闭正在运行的应用程序
    #[cfg(windows)]
    pub fn platform_default(force: bool) -> Self {
        // /s = 关机, /t 0 = 无延迟, /f = 强制关闭应用程序
        let mut args = vec!["/s".to_string()];
        if force {
            args.push("/f".to_string());
        }
        args.extend(["/t".to_string(), "0".to_string()]);
        Self::new("shutdown", args)
    }

    #[cfg(target_os = "macos")]
    pub fn platform_default(_force: bool) -> Self {
        Self::new("shutdown", vec!["-h".to_string(), "now".to_string()])
    }

    #[cfg(not(any(windows, target_os = "macos")))]
    pub fn platform_default(_force: bool) -> Self {
        Self::new("shutdown", vec!["-P".to_string(), "now".to_string()])
    }
}

impl std::fmt::Display for ShutdownCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// 关机执行器
#[derive(Debug, Clone)]
pub struct ShutdownExecutor {
    command: ShutdownCommand,
}

impl ShutdownExecutor {
    /// 使用指定命令创建关机执行器
    pub fn new(command: ShutdownCommand) -> Self {
        info!("关机执行器初始化完成，命令: {}", command);
        Self { command }
    }

    /// 获取将要执行的命令
    pub fn command(&self) -> &ShutdownCommand {
        &self.command
    }

    /// 启动关机命令
    ///
    /// 只关心进程能否启动，不等待其结束。
    /// 必须在tokio运行时中调用。
    pub async fn launch(&self) -> Result<(), ShutdownError> {
        let program = self.command.program.trim();
        if program.is_empty() {
            error!("关机程序未配置");
            return Err(ShutdownError::EmptyCommand);
        }

        info!("启动关机命令: {}", self.command);

        let mut cmd = AsyncCommand::new(program);
        cmd.args(&self.command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        #[cfg(windows)]
        cmd.creation_flags(CREATE_NO_WINDOW);

        match cmd.spawn() {
            Ok(child) => {
                info!("关机进程已启动, pid: {:?}", child.id());
                Ok(())
            }
            Err(e) => {
                error!("执行{}命令失败: {}", program, e);
                Err(ShutdownError::Launch {
                    program: program.to_string(),
                    source: e,
                })
            }
        }
    }
}
