//! OwlQuest - 无头模拟运行
//!
//! 加载配置与属性模板，布置开场角色，然后按脚本输入逐帧运行，
//! 直到收到退出请求或达到最大帧数。窗口呈现与帧率控制由外部协作方负责，
//! 这里使用无头渲染器。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件
//! cargo run
//!
//! # 命令行覆盖
//! cargo run -- --frames 120 --attributes data/objects.json
//! ```

use anyhow::Context;
use owl_quest::attribute::AttributeStore;
use owl_quest::core::{log, Config, InputSystem, KeyCode, MouseButton};
use owl_quest::game::Game;
use owl_quest::renderer::HeadlessRenderer;
use owl_quest::{app_info, app_warn};

/// 脚本输入的开火间隔（帧）
const FIRE_INTERVAL: u64 = 30;

/// 应用程序入口点
///
/// # 初始化流程
///
/// 1. 加载配置文件（config.toml）
/// 2. 应用命令行参数覆盖并验证
/// 3. 初始化日志系统
/// 4. 加载属性模板
/// 5. 创建注册表并布置开场角色
/// 6. 启动主循环
///
/// # 命令行参数
///
/// - `--width <value>` / `--height <value>`: 屏幕尺寸
/// - `--frames <value>`: 最大帧数
/// - `--attributes <path>`: 属性模板文件
fn main() -> anyhow::Result<()> {
    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default("config.toml");

    // 2. 应用命令行参数
    config.apply_args(std::env::args());
    config.validate().context("Invalid configuration")?;

    // 3. 初始化日志系统
    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    log::init_logger(config.logging.level, config.logging.file_output, log_file);
    app_info!("OwlQuest starting...");
    app_info!(
        version = env!("CARGO_PKG_VERSION"),
        width = config.window.width,
        height = config.window.height,
        fps = config.simulation.fps,
        "Application initialized"
    );

    // 4. 加载属性模板
    let store = AttributeStore::load(&config.simulation.attributes_file);
    if store.is_empty() {
        app_warn!("No attribute templates loaded, stage actors cannot be created");
    }

    // 5. 创建注册表
    let max_frames = config.simulation.max_frames;
    let mut game = Game::new(config, store, HeadlessRenderer::default());
    game.setup_stage().context("Failed to set up stage")?;

    // 6. 主循环：引擎持续加速，定期开火，最后一帧请求退出
    let mut input = InputSystem::new();
    input.on_key(KeyCode::W, true);

    app_info!("Entering main loop...");
    while !game.should_exit() {
        let frame = game.frame();
        if frame % FIRE_INTERVAL == 0 {
            input.on_mouse_button(MouseButton::Left, true);
            input.on_mouse_button(MouseButton::Left, false);
        }
        if frame + 1 >= max_frames {
            input.on_close_requested();
        }

        game.step(&input.snapshot());
    }

    app_info!(
        frames = game.frame(),
        actors = game.len(),
        transforms = game.renderer().transforms,
        presents = game.renderer().presents,
        "Simulation finished"
    );
    Ok(())
}
