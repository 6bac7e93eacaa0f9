//! 核心功能模块
//!
//! 本模块提供了模拟核心的基础功能，包括数学库、日志系统、配置管理、错误处理和输入。
//! 这些模块独立于具体的角色逻辑和渲染协作方。
//!
//! # 模块组织
//!
//! - `math`：数学库，提供四轴坐标、包围盒和常用工具函数
//! - `log`：日志系统，提供结构化的日志记录功能
//! - `config`：配置管理，支持从配置文件加载模拟设置
//! - `error`：错误处理，定义统一的错误类型
//! - `event`：离散输入事件
//! - `input`：输入状态累积与按键绑定表

pub mod math;
pub mod log;
pub mod config;
pub mod error;
pub mod event;
pub mod input;

// 重新导出常用类型，方便使用
pub use math::{Coord, Rect, Vector2};
pub use error::{AttributeError, ConfigError, OwlQuestError, Result};
pub use config::Config;
pub use event::{InputEvent, KeyCode, MouseButton};
pub use input::{Command, Direction, InputSnapshot, InputSystem, KeyBindings};
