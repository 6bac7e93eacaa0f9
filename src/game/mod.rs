//! 游戏模块
//!
//! 角色注册表：生成、销毁、输入路由与逐帧驱动。

mod registry;

pub use registry::Game;
