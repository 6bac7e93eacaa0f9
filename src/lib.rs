//! OwlQuest - 2D 俯视角街机射击游戏的模拟核心
//!
//! 本库实现了每个屏幕实体（玩家、敌人、子弹、武器附件）的逐帧物理、
//! 基于属性模板的配置、碰撞与伤害，以及生成/销毁的生命周期。
//! 窗口、贴图与帧率控制由外部协作方负责，只在接口边界上出现。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（数学、日志、配置、错误处理、输入）
//! - `attribute`: 属性模板存储
//! - `renderer`: 渲染协作方接口与无头实现
//! - `component`: 角色与附件
//! - `game`: 角色注册表
//!
//! # 使用示例
//!
//! ```no_run
//! use owl_quest::attribute::AttributeStore;
//! use owl_quest::core::{Config, InputSnapshot};
//! use owl_quest::game::Game;
//! use owl_quest::renderer::HeadlessRenderer;
//!
//! let config = Config::default();
//! let store = AttributeStore::load(&config.simulation.attributes_file);
//! let mut game = Game::new(config, store, HeadlessRenderer::default());
//! game.setup_stage().unwrap();
//!
//! while !game.should_exit() && game.frame() < 600 {
//!     game.step(&InputSnapshot::default());
//! }
//! ```

pub mod core;
pub mod attribute;
pub mod renderer;
pub mod component;
pub mod game;
