//! 日志系统模块
//!
//! 基于 `tracing` 提供结构化的日志记录功能。
//!
//! # 特性
//!
//! - 结构化日志：支持键值对（actor_id、template 等）
//! - 灵活输出：支持控制台和文件输出
//! - 日志级别：trace, debug, info, warn, error
//!
//! # 使用示例
//!
//! ```no_run
//! use owl_quest::core::log::{self, LogLevel};
//!
//! log::init_logger(LogLevel::Info, false, None);
//! tracing::info!(actor_id = 3, "Actor spawned");
//! ```

use tracing::Level;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use std::path::{Path, PathBuf};

pub use super::config::LogLevel;

/// 未指定路径时的日志文件
pub const DEFAULT_LOG_FILE: &str = "owl_quest.log";

/// 初始化日志系统
///
/// 在程序开始时调用一次，重复调用不会覆盖已安装的订阅者。
/// `RUST_LOG` 环境变量优先于配置中的级别。
///
/// # 参数
///
/// * `level` - 日志级别
/// * `file_output` - 是否同时按天滚动写入文件
/// * `log_file_path` - 日志文件路径，默认为 [`DEFAULT_LOG_FILE`]
pub fn init_logger(level: LogLevel, file_output: bool, log_file_path: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(LevelFilter::from(Level::from(level)).into()));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    let file_layer = file_output.then(|| {
        let (directory, filename) = split_log_path(log_file_path.unwrap_or(DEFAULT_LOG_FILE));
        fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(RollingFileAppender::new(Rotation::DAILY, directory, filename))
    });

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    if installed.is_err() {
        tracing::debug!("Logger already initialized");
    }
}

/// 拆分为（目录，文件名）；没有目录部分时使用当前目录
fn split_log_path(path: &str) -> (PathBuf, String) {
    let path = Path::new(path);
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(DEFAULT_LOG_FILE)
        .to_string();
    (directory, filename)
}

/// 模拟核心日志 - Debug 级别
#[macro_export]
macro_rules! sim_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "owl_quest::sim", $($arg)*)
    };
}

/// 模拟核心日志 - Info 级别
#[macro_export]
macro_rules! sim_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "owl_quest::sim", $($arg)*)
    };
}

/// 模拟核心日志 - Warn 级别
#[macro_export]
macro_rules! sim_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "owl_quest::sim", $($arg)*)
    };
}

/// 模拟核心日志 - Error 级别
#[macro_export]
macro_rules! sim_error {
    ($($arg:tt)*) => {
        tracing::error!(target: "owl_quest::sim", $($arg)*)
    };
}

/// 应用层日志 - Info 级别
#[macro_export]
macro_rules! app_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "owl_quest::app", $($arg)*)
    };
}

/// 应用层日志 - Warn 级别
#[macro_export]
macro_rules! app_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "owl_quest::app", $($arg)*)
    };
}

/// 应用层日志 - Error 级别
#[macro_export]
macro_rules! app_error {
    ($($arg:tt)*) => {
        tracing::error!(target: "owl_quest::app", $($arg)*)
    };
}

/// 日志级别转换
impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(Level::from(LogLevel::Info), Level::INFO);
        assert_eq!(Level::from(LogLevel::Error), Level::ERROR);
    }

    #[test]
    fn test_split_log_path() {
        assert_eq!(split_log_path("logs/sim.log"), (PathBuf::from("logs"), "sim.log".to_string()));
        assert_eq!(split_log_path("sim.log"), (PathBuf::from("."), "sim.log".to_string()));
    }
}
