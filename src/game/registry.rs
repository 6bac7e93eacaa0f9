//! 角色注册表
//!
//! 持有权威的存活角色列表，负责生成与销毁、分配永久 id，
//! 并驱动每帧的更新与绘制。
//!
//! # 更新期间的修改
//!
//! 更新采用两阶段：遍历期间角色只向命令缓冲写入销毁与生成请求，
//! 碰撞检测跳过本轮已请求销毁的角色；遍历结束后再统一应用，
//! 并重新编号 `index`。本帧生成的角色从下一帧开始更新。

use std::path::PathBuf;

use crate::attribute::AttributeStore;
use crate::component::{
    Actor, ActorId, Assets, Bounds, Commands, Component, FrameCommand, FrameContext, Neighbours,
    SpawnRequest,
};
use crate::core::config::{Config, PLAYER_NAME};
use crate::core::error::Result;
use crate::core::input::{Command, InputSnapshot, KeyBindings};
use crate::core::math::Coord;
use crate::renderer::{DrawGroup, RenderBackend};
use crate::{sim_debug, sim_error, sim_info, sim_warn};

/// 角色注册表
pub struct Game<R: RenderBackend> {
    config: Config,
    bounds: Bounds,
    store: AttributeStore,
    renderer: R,
    image_dir: PathBuf,
    bindings: KeyBindings,

    /// 存活角色，顺序即更新顺序
    actors: Vec<Actor>,
    draw_group: DrawGroup,

    /// 接收输入的角色
    player: Option<ActorId>,

    next_id: u64,
    frame: u64,
    exit: bool,
}

impl<R: RenderBackend> Game<R> {
    /// 创建空的注册表
    ///
    /// # 参数
    /// - `config`: 屏幕尺寸、贴图目录与开场布置
    /// - `store`: 属性模板
    /// - `renderer`: 渲染协作方
    pub fn new(config: Config, store: AttributeStore, renderer: R) -> Self {
        let bounds = Bounds::new(config.window.width as f32, config.window.height as f32);
        let image_dir = PathBuf::from(&config.simulation.image_dir);

        Self {
            config,
            bounds,
            store,
            renderer,
            image_dir,
            bindings: KeyBindings::default(),
            actors: Vec::new(),
            draw_group: DrawGroup::new(),
            player: None,
            next_id: 0,
            frame: 0,
            exit: false,
        }
    }

    /// 按配置创建开场角色
    ///
    /// 任一角色构造失败即返回错误。
    pub fn setup_stage(&mut self) -> Result<()> {
        let stage = self.config.stage.actors.clone();
        for entry in stage {
            self.spawn(entry.template, &entry.name, Coord::from(entry.coord), Coord::ZERO)?;
        }
        sim_info!(actors = self.actors.len(), "Stage ready");
        Ok(())
    }

    /// 生成角色
    ///
    /// # 返回值
    ///
    /// 新角色的 id；模板缺失、字段不全或贴图不可用时返回错误，
    /// 注册表不变（id 仍会被消耗）。
    pub fn spawn(&mut self, template: u32, name: &str, coord: Coord, momentum: Coord) -> Result<ActorId> {
        self.spawn_request(SpawnRequest {
            template,
            name: name.to_string(),
            coord,
            momentum,
            owner: None,
        })
    }

    fn spawn_request(&mut self, request: SpawnRequest) -> Result<ActorId> {
        let id = ActorId(self.next_id);
        self.next_id += 1;

        let mut assets = Assets {
            store: &self.store,
            renderer: &mut self.renderer,
            image_dir: &self.image_dir,
        };
        let mut actor = Actor::new(id, request, &mut assets)?;

        actor.set_index(self.actors.len());
        self.draw_group.update(id, actor.rect());
        if actor.name() == PLAYER_NAME {
            self.player = Some(id);
        }

        sim_debug!("Spawned {} from template {} at {:?}", actor, actor.template_id(), actor.coord());
        self.actors.push(actor);
        Ok(id)
    }

    /// 从存活列表和绘制组中移除角色
    ///
    /// 角色不存在时只记录警告并返回 `false`。
    pub fn despawn(&mut self, id: ActorId) -> bool {
        let Some(position) = self.actors.iter().position(|a| a.id() == id) else {
            sim_warn!("Error deleting actor {}: not registered", id);
            return false;
        };

        let actor = self.actors.remove(position);
        self.draw_group.remove(id);
        if self.player == Some(id) {
            self.player = None;
        }

        for (index, actor) in self.actors.iter_mut().enumerate().skip(position) {
            actor.set_index(index);
        }

        sim_info!("Destroyed {}", actor);
        true
    }

    /// 把一帧输入转换为玩家操作
    ///
    /// 退出请求在没有玩家时也生效；其余操作在没有玩家时忽略。
    pub fn handle_input(&mut self, input: &InputSnapshot) {
        let mut commands = Commands::new();

        for command in self.bindings.resolve(input) {
            if command == Command::Quit {
                sim_info!("Exit requested");
                self.exit = true;
                continue;
            }

            let Some(player) = self.player.and_then(|id| self.actors.iter_mut().find(|a| a.id() == id)) else {
                continue;
            };

            match command {
                Command::Move(intent) => player.move_by(intent),
                Command::Thrust(direction) => player.thrust(direction, None),
                Command::Engine(direction) => player.modify_engine_speed(direction),
                Command::Fire => {
                    player.fire(&mut commands);
                }
                Command::Reset => player.reset(),
                Command::Quit => {}
            }
        }

        self.apply(commands);
    }

    /// 对所有存活角色执行一帧更新，然后应用本轮的生成与销毁
    pub fn update_actors(&mut self) {
        let mut commands = Commands::new();
        let mut ctx = FrameContext {
            bounds: self.bounds,
            renderer: &mut self.renderer,
            commands: &mut commands,
        };

        for index in 0..self.actors.len() {
            let Some((actor, mut others)) = Neighbours::split(&mut self.actors, index) else {
                break;
            };
            actor.update(&mut others, &mut ctx);
        }

        self.apply(commands);
    }

    fn apply(&mut self, mut commands: Commands) {
        for command in commands.drain() {
            match command {
                FrameCommand::Despawn(id) => {
                    self.despawn(id);
                }
                FrameCommand::Spawn(request) => {
                    let (template, name) = (request.template, request.name.clone());
                    if let Err(e) = self.spawn_request(request) {
                        sim_error!("Failed to spawn '{}' from template {}: {}", name, template, e);
                    }
                }
            }
        }
    }

    /// 只刷新发生变化的区域
    ///
    /// # 返回值
    ///
    /// 本帧刷新的区域数量
    pub fn draw_output(&mut self) -> usize {
        for actor in &self.actors {
            self.draw_group.update(actor.id(), actor.rect());
        }

        let regions = self.draw_group.changed_regions();
        if !regions.is_empty() {
            self.renderer.present_changed_regions(&regions);
        }
        regions.len()
    }

    /// 完整的一帧：输入、更新、绘制
    pub fn step(&mut self, input: &InputSnapshot) {
        self.handle_input(input);
        self.update_actors();
        self.draw_output();
        self.frame += 1;
    }

    pub fn should_exit(&self) -> bool {
        self.exit
    }

    /// 已完成的帧数
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id() == id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|a| a.id() == id)
    }

    /// 存活角色，顺序即更新顺序
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn player(&self) -> Option<&Actor> {
        self.player.and_then(|id| self.actor(id))
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
