//! Actor 组件
//!
//! 模拟中的实体：玩家、敌人、子弹。负责逐帧的物理积分、摩擦、
//! 边界与销毁检测、碰撞与伤害，并拥有自己的附件。
//!
//! # 每帧更新顺序
//!
//! 1. 碰撞检测（仅子弹）
//! 2. 销毁检测，触发后跳过本帧剩余步骤
//! 3. 摩擦
//! 4. 引擎推力
//! 5. 位置积分
//! 6. 缩放积分
//! 7. 旋转积分
//! 8. 同步包围盒
//! 9. 更新并重绘附件
//! 10. 重新计算显示用图像

use std::fmt;

use super::attachment::Attachment;
use super::component::Component;
use super::context::{Assets, Commands, FrameContext, Neighbours, SpawnRequest};
use super::kinematics::{Bounds, Kinematics};
use crate::attribute::{ActorKind, ActorTemplate};
use crate::core::error::Result;
use crate::core::input::Direction;
use crate::core::math::utils::{clamp, facing};
use crate::core::math::{Coord, Rect};
use crate::renderer::{ImageHandle, RenderBackend};
use crate::{sim_debug, sim_info};

/// 角色的永久标识
///
/// 进程内单调分配，永不复用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 战斗状态
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Combat {
    /// 生命值，对子弹来说是还能命中的次数
    pub hp: i32,

    /// 碰撞时造成的伤害
    pub damage: i32,

    /// 能否受到伤害
    pub damagable: bool,

    /// 剩余的待激活帧数，归零前不参与碰撞
    pub primer_ticks: u32,
}

/// 推进状态
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Engine {
    /// 当前引擎速度，每帧沿朝向施加
    pub speed: f32,
    pub accel: f32,
    pub deaccel: f32,
    pub min: f32,
    pub max: f32,

    /// 手动推进的默认系数
    pub thrust_speed: f32,
}

impl Engine {
    fn from_template(t: &ActorTemplate) -> Self {
        Self {
            speed: t.engine_speed,
            accel: t.engine_accel,
            deaccel: t.engine_deaccel,
            min: t.engine_min_accel,
            max: t.engine_max_accel,
            thrust_speed: t.thrust_speed,
        }
    }

    /// 按方向调整一档引擎速度，钳制在上下限内
    pub fn modify(&mut self, direction: Direction) {
        let change = match direction {
            Direction::Forward => self.accel,
            Direction::Reverse => -self.deaccel.abs(),
        };
        self.speed = clamp(self.speed + change, self.min, self.max);
    }
}

/// 角色
#[derive(Debug, Clone)]
pub struct Actor {
    id: ActorId,

    /// 在注册表存活列表中的当前位置，任何一次移除后都会重新编号
    index: usize,

    name: String,
    template_id: u32,
    kind: ActorKind,

    /// 发射这枚子弹的角色
    owner: Option<ActorId>,

    /// 运动状态
    pub kinematics: Kinematics,

    /// 战斗状态
    pub combat: Combat,

    /// 推进状态
    pub engine: Engine,

    attachments: Vec<Attachment>,

    base_image: ImageHandle,
    image: ImageHandle,
    rect: Rect,
}

impl Actor {
    /// 创建角色
    ///
    /// 读取模板的独立副本，加载贴图，并按模板中的默认挂载表创建附件。
    ///
    /// # 返回值
    ///
    /// 模板缺失、字段不全或贴图不可用时返回错误，角色不会被创建。
    pub fn new(id: ActorId, request: SpawnRequest, assets: &mut Assets<'_>) -> Result<Self> {
        let template = assets.store.actor_template(request.template)?;
        let base_image = assets.visual(&template.image_id)?;

        let attachments = template
            .loadout
            .iter()
            .map(|entry| Attachment::new(entry, assets))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            id,
            index: 0,
            name: request.name,
            template_id: request.template,
            kind: template.kind,
            owner: request.owner,
            kinematics: Kinematics::from_template(&template, request.coord, request.momentum),
            combat: Combat {
                hp: template.hp,
                damage: template.damage,
                damagable: template.damagable,
                primer_ticks: template.primer_ticks,
            },
            engine: Engine::from_template(&template),
            attachments,
            base_image,
            image: base_image,
            rect: base_image.rect_at(request.coord.x, request.coord.y),
        })
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub fn template_id(&self) -> u32 {
        self.template_id
    }

    pub fn kind(&self) -> ActorKind {
        self.kind
    }

    pub fn owner(&self) -> Option<ActorId> {
        self.owner
    }

    /// 碰撞与绘制用的包围盒
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// 当前显示用图像
    pub fn image(&self) -> ImageHandle {
        self.image
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn coord(&self) -> Coord {
        self.kinematics.coord()
    }

    pub fn momentum(&self) -> Coord {
        self.kinematics.momentum()
    }

    pub fn hp(&self) -> i32 {
        self.combat.hp
    }

    // ========== 显式操作 ==========

    /// 按四轴意图 (x, y, z, r) 各加速一次
    pub fn move_by(&mut self, intent: Coord) {
        self.kinematics.push(intent);
    }

    /// 沿当前朝向推进
    ///
    /// # 参数
    /// - `direction`: 前进或后退
    /// - `coef`: 推进系数，`None` 时使用模板的 `thrustSpeed`
    pub fn thrust(&mut self, direction: Direction, coef: Option<f32>) {
        let coef = coef.unwrap_or(self.engine.thrust_speed);
        let push = facing(self.kinematics.r.value) * (coef * direction.sign());
        self.kinematics.x.velocity += push.x;
        self.kinematics.y.velocity += push.y;
    }

    pub fn modify_engine_speed(&mut self, direction: Direction) {
        self.engine.modify(direction);
    }

    /// 受到伤害
    ///
    /// # 返回值
    ///
    /// 不可受伤时返回 `false`，生命值不变
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.combat.damagable {
            return false;
        }
        self.combat.hp -= amount;
        sim_debug!("{} taking {} damage, hp: {}", self, amount, self.combat.hp);
        true
    }

    /// 所有武器附件同时开火
    ///
    /// # 返回值
    ///
    /// 开火的武器数量
    pub fn fire(&self, commands: &mut Commands) -> usize {
        let coord = self.kinematics.coord();
        let momentum = Coord { r: 0.0, ..self.kinematics.momentum() };

        let mut fired = 0;
        for attachment in self.attachments.iter().filter(|a| a.is_gun()) {
            attachment.fire(self.id, coord, momentum, commands);
            fired += 1;
        }
        fired
    }

    /// 位置和引擎速度归零
    pub fn reset(&mut self) {
        sim_info!("Reset {}", self);
        self.kinematics.reset_position();
        self.engine.speed = 0.0;
    }

    // ========== 每帧更新 ==========

    /// 执行一帧更新
    ///
    /// # 参数
    /// - `others`: 其余存活角色，用于碰撞检测
    /// - `ctx`: 屏幕边界、渲染协作方与命令缓冲
    pub fn update(&mut self, others: &mut Neighbours<'_>, ctx: &mut FrameContext<'_>) {
        self.detect_collisions(others, ctx.commands);

        if self.should_destroy(ctx.bounds) {
            self.destruct(ctx.commands);
            return;
        }

        self.kinematics.apply_friction();
        self.run_engine();
        self.kinematics.integrate_position(Coord::ZERO, ctx.bounds);
        self.kinematics.integrate_scale();
        self.kinematics.integrate_rotation(0.0);
        self.sync_rect();
        self.update_attachments(ctx.renderer);
        self.refresh_visual(ctx.renderer);
    }

    /// 碰撞检测
    ///
    /// 只有子弹参与。待激活期间每帧减一并跳过；之后对第一个相交、
    /// 不是开火者且本轮未被销毁的其他角色造成伤害，对方受伤时自身生命值减一。
    ///
    /// # 返回值
    ///
    /// 被命中的角色
    pub fn detect_collisions(&mut self, others: &mut Neighbours<'_>, commands: &Commands) -> Option<ActorId> {
        if self.kind != ActorKind::Projectile {
            return None;
        }

        if self.combat.primer_ticks > 0 {
            self.combat.primer_ticks -= 1;
            return None;
        }

        let (id, owner, rect) = (self.id, self.owner, self.rect);
        let target = others.iter_mut().find(|other| {
            other.id != id
                && Some(other.id) != owner
                && !commands.is_removing(other.id)
                && rect.intersects(&other.rect)
        })?;

        sim_debug!("Collision: {} with {}", self, target);
        if target.take_damage(self.combat.damage) {
            self.combat.hp -= 1;
        }
        Some(target.id)
    }

    /// 销毁条件：任一轴越过销毁阈值，或生命值耗尽
    pub fn should_destroy(&self, bounds: Bounds) -> bool {
        self.combat.hp <= 0 || self.kinematics.beyond_destroy_threshold(bounds)
    }

    /// 拆除附件并请求注册表移除自己
    fn destruct(&mut self, commands: &mut Commands) {
        sim_info!("Destroying {} at {:?}", self, self.kinematics.coord());
        self.attachments.clear();
        commands.despawn(self.id);
    }

    fn run_engine(&mut self) {
        if self.engine.speed != 0.0 {
            self.thrust(Direction::Forward, Some(self.engine.speed));
        }
    }

    fn sync_rect(&mut self) {
        self.rect.move_to(self.kinematics.x.value, self.kinematics.y.value);
    }

    fn update_attachments(&mut self, renderer: &mut dyn RenderBackend) {
        if self.attachments.is_empty() {
            return;
        }

        let coord = self.kinematics.coord();
        let mut regions = Vec::with_capacity(self.attachments.len());
        for attachment in &mut self.attachments {
            attachment.refresh_visual(renderer);
            regions.push(attachment.rect(coord));
        }
        renderer.present_changed_regions(&regions);
    }
}

impl Component for Actor {
    fn name(&self) -> &str {
        &self.name
    }

    fn refresh_visual(&mut self, renderer: &mut dyn RenderBackend) {
        self.image = renderer.compose_transform(self.base_image, self.kinematics.r.value, self.kinematics.scale);
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeStore;
    use crate::component::context::FrameCommand;
    use crate::core::math::utils::approx_eq;
    use crate::renderer::HeadlessRenderer;
    use serde_json::{json, Value};
    use std::path::Path;

    /// 所有模板共用的物理参数
    fn physics(extra: Value) -> Value {
        let mut base = json!({
            "imageId": "test",
            "xa": 0.5, "ya": 0.5, "za": 0.5, "ra": 1.0,
            "xsMin": -2.0, "xsMax": 2.0, "ysMin": -2.0, "ysMax": 2.0,
            "zsMin": -2.0, "zsMax": 2.0, "rsMin": -10.0, "rsMax": 10.0,
            "xFricCoef": 0.0, "yFricCoef": 0.0, "zFricCoef": 0.0, "rFricCoef": 0.0,
            "xMin": -100.0, "xMax": 100.0, "yMin": -100.0, "yMax": 100.0,
            "zMin": -10.0, "zMax": 10.0, "rMin": -180.0, "rMax": 180.0,
            "sMin": 0.5, "sMax": 2.0,
            "xDestroyMin": -50.0, "xDestroyMax": 50.0,
            "yDestroyMin": -50.0, "yDestroyMax": 50.0,
            "zDestroyMin": -20.0, "zDestroyMax": 20.0,
            "hp": 5
        });
        if let (Value::Object(base), Value::Object(extra)) = (&mut base, extra) {
            base.extend(extra);
        }
        base
    }

    /// 0: 双枪玩家，1: 子弹，2: 枪，3: 可受伤目标，4: 不可受伤的场景物
    fn store() -> AttributeStore {
        let document = json!({
            "objects": {
                "0": physics(json!({
                    "name": "owl",
                    "thrustSpeed": 1.0,
                    "engineAccel": 0.1, "engineDeaccel": 0.1,
                    "engineMinAccel": -0.2, "engineMaxAccel": 0.3,
                    "loadout": [
                        { "template": 2, "name": "gun", "offset": [0.0, 0.0, 0.0] },
                        { "template": 2, "name": "gun", "offset": [50.0, 50.0, 0.0] }
                    ]
                })),
                "1": physics(json!({
                    "name": "bullet", "kind": "projectile",
                    "hp": 2, "damage": 1, "damagable": false, "primerTicks": 3
                })),
                "2": { "imageId": "gun" },
                "3": physics(json!({ "name": "crow" })),
                "4": physics(json!({ "name": "rock", "damagable": false }))
            }
        });
        AttributeStore::from_json_str(&document.to_string()).unwrap()
    }

    fn spawn(id: u64, template: u32, coord: Coord) -> Actor {
        let store = store();
        let mut renderer = HeadlessRenderer::new((10, 10));
        let mut assets = Assets {
            store: &store,
            renderer: &mut renderer,
            image_dir: Path::new("missing"),
        };
        let request = SpawnRequest {
            template,
            name: format!("t{}", template),
            coord,
            momentum: Coord::ZERO,
            owner: None,
        };
        Actor::new(ActorId(id), request, &mut assets).unwrap()
    }

    fn run_update(actor: &mut Actor, others: &mut [Actor], commands: &mut Commands) {
        let mut renderer = HeadlessRenderer::default();
        let mut ctx = FrameContext {
            bounds: Bounds::new(800.0, 600.0),
            renderer: &mut renderer,
            commands,
        };
        actor.update(&mut Neighbours::from_slice(others), &mut ctx);
    }

    #[test]
    fn test_template_zero_has_two_guns() {
        let player = spawn(0, 0, Coord::ZERO);
        let offsets: Vec<_> = player.attachments().iter().map(|a| a.offset()).collect();
        assert_eq!(offsets, vec![[0.0, 0.0, 0.0], [50.0, 50.0, 0.0]]);

        let mut commands = Commands::new();
        assert_eq!(player.fire(&mut commands), 2);
        assert_eq!(commands.len(), 2);
    }

    #[test]
    fn test_take_damage() {
        let mut rock = spawn(0, 4, Coord::ZERO);
        assert!(!rock.take_damage(3));
        assert_eq!(rock.hp(), 5);

        let mut crow = spawn(1, 3, Coord::ZERO);
        assert!(crow.take_damage(5));
        assert_eq!(crow.hp(), 0);

        let mut commands = Commands::new();
        run_update(&mut crow, &mut [], &mut commands);
        assert_eq!(commands.drain(), vec![FrameCommand::Despawn(ActorId(1))]);
        assert!(crow.attachments().is_empty());
    }

    #[test]
    fn test_thrust_follows_facing() {
        let mut player = spawn(0, 0, Coord::new(0.0, 0.0, 0.0, 90.0));
        player.thrust(Direction::Forward, None);
        assert!(approx_eq(player.momentum().x, -1.0));
        assert!(player.momentum().y.abs() < 1e-5);

        player.thrust(Direction::Reverse, Some(0.5));
        assert!(approx_eq(player.momentum().x, -0.5));
    }

    #[test]
    fn test_engine_speed_is_clamped() {
        let mut player = spawn(0, 0, Coord::ZERO);
        for _ in 0..10 {
            player.modify_engine_speed(Direction::Forward);
        }
        assert!(approx_eq(player.engine.speed, 0.3));

        for _ in 0..10 {
            player.modify_engine_speed(Direction::Reverse);
        }
        assert!(approx_eq(player.engine.speed, -0.2));
    }

    #[test]
    fn test_reset_zeroes_position_and_engine() {
        let mut player = spawn(0, 0, Coord::new(30.0, 40.0, 5.0, 45.0));
        player.modify_engine_speed(Direction::Forward);
        player.reset();
        assert_eq!(player.coord(), Coord::new(0.0, 0.0, 0.0, 45.0));
        assert_eq!(player.engine.speed, 0.0);
    }

    #[test]
    fn test_primer_ticks_delay_collisions() {
        let mut bullet = spawn(10, 1, Coord::new(5.0, 5.0, 0.0, 0.0));
        let mut actors = vec![spawn(11, 3, Coord::new(0.0, 0.0, 0.0, 0.0))];
        let commands = Commands::new();

        for _ in 0..3 {
            let mut others = neighbours(&mut actors);
            assert_eq!(bullet.detect_collisions(&mut others, &commands), None);
        }

        let mut others = neighbours(&mut actors);
        assert_eq!(bullet.detect_collisions(&mut others, &commands), Some(ActorId(11)));
        assert_eq!(actors[0].hp(), 4);
        assert_eq!(bullet.hp(), 1);
    }

    #[test]
    fn test_collision_skips_actors_pending_removal() {
        let mut bullet = spawn(10, 1, Coord::new(5.0, 5.0, 0.0, 0.0));
        bullet.combat.primer_ticks = 0;
        let mut actors = vec![
            spawn(11, 3, Coord::new(0.0, 0.0, 0.0, 0.0)),
            spawn(12, 3, Coord::new(8.0, 8.0, 0.0, 0.0)),
        ];

        let mut commands = Commands::new();
        commands.despawn(ActorId(11));

        let mut others = neighbours(&mut actors);
        assert_eq!(bullet.detect_collisions(&mut others, &commands), Some(ActorId(12)));
        assert_eq!(actors[0].hp(), 5);
        assert_eq!(actors[1].hp(), 4);
    }

    #[test]
    fn test_bullet_never_hits_its_owner() {
        let mut bullet = spawn(10, 1, Coord::new(5.0, 5.0, 0.0, 0.0));
        bullet.combat.primer_ticks = 0;
        bullet.owner = Some(ActorId(11));
        let mut actors = vec![spawn(11, 3, Coord::ZERO)];

        let mut others = neighbours(&mut actors);
        assert_eq!(bullet.detect_collisions(&mut others, &Commands::new()), None);
        assert_eq!(actors[0].hp(), 5);
        assert_eq!(bullet.hp(), 2);

        actors.push(spawn(12, 3, Coord::new(8.0, 8.0, 0.0, 0.0)));
        let mut others = neighbours(&mut actors);
        assert_eq!(bullet.detect_collisions(&mut others, &Commands::new()), Some(ActorId(12)));
        assert_eq!(actors[0].hp(), 5);
    }

    #[test]
    fn test_non_damagable_target_does_not_cost_hits() {
        let mut bullet = spawn(10, 1, Coord::new(5.0, 5.0, 0.0, 0.0));
        bullet.combat.primer_ticks = 0;
        let mut actors = vec![spawn(11, 4, Coord::ZERO)];

        let mut others = neighbours(&mut actors);
        bullet.detect_collisions(&mut others, &Commands::new());
        assert_eq!(bullet.hp(), 2);
        assert_eq!(actors[0].hp(), 5);
    }

    #[test]
    fn test_update_destroys_beyond_threshold() {
        let mut crow = spawn(3, 3, Coord::new(-60.0, 0.0, 0.0, 0.0));
        let mut commands = Commands::new();
        run_update(&mut crow, &mut [], &mut commands);
        assert!(commands.is_removing(ActorId(3)));
        // 销毁后本帧不再积分
        assert_eq!(crow.coord().x, -60.0);
    }

    #[test]
    fn test_update_integrates_and_syncs_rect() {
        let mut player = spawn(0, 0, Coord::new(10.0, 10.0, 0.0, 0.0));
        player.kinematics.x.velocity = 1.0;
        let mut commands = Commands::new();
        run_update(&mut player, &mut [], &mut commands);

        assert!(commands.is_empty());
        assert_eq!(player.coord().x, 11.0);
        assert_eq!(player.rect(), Rect::new(11.0, 10.0, 10.0, 10.0));
    }

    /// 以切片中全部角色作为邻居
    fn neighbours(actors: &mut [Actor]) -> Neighbours<'_> {
        Neighbours::from_slice(actors)
    }
}
