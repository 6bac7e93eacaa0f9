//! 错误处理模块
//!
//! 定义了模拟核心中使用的统一错误类型。
//!
//! # 设计原则
//!
//! - 手写 `Display` / `Error` 实现，不依赖派生宏
//! - 为每种错误类型提供清晰的上下文信息
//! - 支持错误链（error source）
//! - 易于模式匹配和错误处理

use std::fmt;

/// 模拟核心统一的 Result 类型
///
/// 所有可能返回错误的函数都应该使用这个类型。
pub type Result<T> = std::result::Result<T, OwlQuestError>;

/// OwlQuest 的错误类型
///
/// 包含了模拟运行过程中可能遇到的各种错误情况。
#[derive(Debug)]
pub enum OwlQuestError {
    /// 配置错误
    Config(ConfigError),

    /// 属性模板错误
    Attribute(AttributeError),

    /// 渲染协作方错误（贴图加载等）
    Render(String),

    /// IO 错误
    Io(std::io::Error),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 属性模板相关的错误
///
/// 实体构造时遇到这些错误即视为该实体构造失败，不做重试。
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeError {
    /// 模板 id 不存在
    NotFound(u32),

    /// 模板记录缺少必需字段或字段类型错误
    Malformed { id: u32, reason: String },

    /// 属性文件整体解析失败
    Parse(String),
}

impl fmt::Display for OwlQuestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwlQuestError::Config(e) => write!(f, "Configuration error: {}", e),
            OwlQuestError::Attribute(e) => write!(f, "Attribute error: {}", e),
            OwlQuestError::Render(msg) => write!(f, "Render error: {}", msg),
            OwlQuestError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for AttributeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeError::NotFound(id) => write!(f, "Attribute template {} not found", id),
            AttributeError::Malformed { id, reason } => {
                write!(f, "Attribute template {} is malformed: {}", id, reason)
            }
            AttributeError::Parse(msg) => write!(f, "Failed to parse attribute file: {}", msg),
        }
    }
}

impl std::error::Error for OwlQuestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OwlQuestError::Io(e) => Some(e),
            OwlQuestError::Config(e) => Some(e),
            OwlQuestError::Attribute(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for AttributeError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for OwlQuestError {
    fn from(err: std::io::Error) -> Self {
        OwlQuestError::Io(err)
    }
}

impl From<ConfigError> for OwlQuestError {
    fn from(err: ConfigError) -> Self {
        OwlQuestError::Config(err)
    }
}

impl From<AttributeError> for OwlQuestError {
    fn from(err: AttributeError) -> Self {
        OwlQuestError::Attribute(err)
    }
}
