//! 配置管理模块
//!
//! 提供模拟核心配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [window]
//! width = 800
//! height = 600
//! title = "OwlQuest: Sugoi Monogatari"
//!
//! [simulation]
//! fps = 60
//! attributes_file = "data/objects.json"
//! image_dir = "i/Actors"
//! max_frames = 600
//!
//! [[stage.actors]]
//! name = "player"
//! template = 0
//! coord = [0.0, 0.0, 0.0, 0.0]
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, Result};

/// 玩家角色的显示名称，注册表据此记录输入路由目标
pub const PLAYER_NAME: &str = "player";

/// 模拟配置
///
/// 包含了模拟核心运行所需的所有配置项。
/// 可以从配置文件加载，也可以通过代码构建。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 窗口配置（同时作为屏幕边界）
    #[serde(default)]
    pub window: WindowConfig,

    /// 模拟配置
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// 开场布置
    #[serde(default)]
    pub stage: StageConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 窗口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// 窗口宽度
    #[serde(default = "default_width")]
    pub width: u32,

    /// 窗口高度
    #[serde(default = "default_height")]
    pub height: u32,

    /// 窗口标题
    #[serde(default = "default_title")]
    pub title: String,
}

/// 模拟配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// 目标帧率，仅供外部帧率控制使用
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// 属性模板文件路径
    #[serde(default = "default_attributes_file")]
    pub attributes_file: String,

    /// 角色贴图目录
    #[serde(default = "default_image_dir")]
    pub image_dir: String,

    /// 无头运行时的最大帧数
    #[serde(default = "default_max_frames")]
    pub max_frames: u64,
}

/// 开场布置：启动时创建的角色列表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConfig {
    #[serde(default = "default_stage_actors")]
    pub actors: Vec<StageActor>,
}

/// 单个开场角色
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageActor {
    /// 显示名称，"player" 表示玩家
    pub name: String,

    /// 属性模板 id
    pub template: u32,

    /// 初始坐标 (x, y, z, r)
    #[serde(default)]
    pub coord: [f32; 4],
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_width() -> u32 { 800 }
fn default_height() -> u32 { 600 }
fn default_title() -> String { "OwlQuest: Sugoi Monogatari".to_string() }
fn default_fps() -> u32 { 60 }
fn default_attributes_file() -> String { "data/objects.json".to_string() }
fn default_image_dir() -> String { "i/Actors".to_string() }
fn default_max_frames() -> u64 { 600 }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "owl_quest.log".to_string() }

fn default_stage_actors() -> Vec<StageActor> {
    vec![
        StageActor {
            name: PLAYER_NAME.to_string(),
            template: 0,
            coord: [0.0, 0.0, 0.0, 0.0],
        },
        // 调试用敌人
        StageActor {
            name: "enemy".to_string(),
            template: 3,
            coord: [50.0, 50.0, 0.0, 0.0],
        },
    ]
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            attributes_file: default_attributes_file(),
            image_dir: default_image_dir(),
            max_frames: default_max_frames(),
        }
    }
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            actors: default_stage_actors(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径
    ///
    /// # 返回值
    ///
    /// 成功返回 `Config` 实例，失败返回错误
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// # 说明
    ///
    /// 支持的参数：
    /// - `--width <value>`: 设置屏幕宽度
    /// - `--height <value>`: 设置屏幕高度
    /// - `--frames <value>`: 设置无头运行的最大帧数
    /// - `--attributes <path>`: 设置属性模板文件
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if let Some(width) = arg_value(&args, "--width").and_then(|v| v.parse().ok()) {
            self.window.width = width;
        }

        if let Some(height) = arg_value(&args, "--height").and_then(|v| v.parse().ok()) {
            self.window.height = height;
        }

        if let Some(frames) = arg_value(&args, "--frames").and_then(|v| v.parse().ok()) {
            self.simulation.max_frames = frames;
        }

        if let Some(path) = arg_value(&args, "--attributes") {
            self.simulation.attributes_file = path.clone();
        }
    }

    /// 验证配置的有效性
    ///
    /// # 返回值
    ///
    /// 配置有效返回 `Ok(())`，否则返回错误
    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "window.width/height".to_string(),
                reason: "Window dimensions must be greater than 0".to_string(),
            }.into());
        }

        if self.simulation.fps == 0 {
            return Err(ConfigError::InvalidValue {
                field: "simulation.fps".to_string(),
                reason: "Frame rate must be greater than 0".to_string(),
            }.into());
        }

        // 输入只会路由给唯一的玩家
        let players = self.stage.actors.iter().filter(|a| a.name == PLAYER_NAME).count();
        if !self.stage.actors.is_empty() && players != 1 {
            return Err(ConfigError::InvalidValue {
                field: "stage.actors".to_string(),
                reason: format!("Stage must contain exactly one '{}', found {}", PLAYER_NAME, players),
            }.into());
        }

        Ok(())
    }
}

/// 取出 `flag` 后面紧跟的参数值
fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|idx| args.get(idx + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.simulation.attributes_file, "data/objects.json");
        assert_eq!(config.stage.actors.len(), 2);
        assert_eq!(config.stage.actors[0].name, PLAYER_NAME);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.window.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_stage_requires_single_player() {
        let mut config = Config::default();
        config.stage.actors.push(StageActor {
            name: PLAYER_NAME.to_string(),
            template: 0,
            coord: [0.0; 4],
        });
        assert!(config.validate().is_err());

        config.stage.actors.clear();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        config.apply_args(["owl_quest", "--width", "1024", "--frames", "10", "--attributes", "x.json"]);
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.simulation.max_frames, 10);
        assert_eq!(config.simulation.attributes_file, "x.json");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str("[window]\nwidth = 320\n").unwrap();
        assert_eq!(config.window.width, 320);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.simulation.fps, 60);
        assert_eq!(config.stage.actors.len(), 2);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.simulation.max_frames = 42;
        config.save_to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.simulation.max_frames, 42);
        assert_eq!(loaded.stage.actors, config.stage.actors);
    }
}
