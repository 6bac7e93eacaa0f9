//! Attachment 组件
//!
//! 挂在角色身上的子实体（目前用作武器）。偏移在创建时固定，
//! 之后不随父角色的旋转重新计算；没有独立的物理状态。

use super::actor::ActorId;
use super::component::Component;
use super::context::{Assets, Commands, SpawnRequest};
use crate::attribute::LoadoutEntry;
use crate::core::error::Result;
use crate::core::math::{Coord, Rect};
use crate::renderer::{ImageHandle, RenderBackend};
use crate::sim_info;

/// 武器附件的角色标签
pub const GUN: &str = "gun";

/// 子弹的显示名称
pub const BULLET: &str = "bullet";

/// 角色附件
#[derive(Debug, Clone)]
pub struct Attachment {
    /// 角色标签，例如 "gun"
    name: String,

    /// 属性模板 id
    template_id: u32,

    /// 相对父角色的偏移 (x, y, z)
    offset: [f32; 3],

    /// 自身旋转（角度制）
    rotation: f32,

    /// 自身缩放
    scale: f32,

    /// 开火时生成的子弹模板
    projectile: u32,

    base_image: ImageHandle,
    image: ImageHandle,
}

impl Attachment {
    /// 按默认挂载表中的一项创建附件
    ///
    /// 模板缺失或字段不全时返回错误，父角色随之构造失败。
    pub fn new(entry: &LoadoutEntry, assets: &mut Assets<'_>) -> Result<Self> {
        let template = assets.store.attachment_template(entry.template)?;
        let base_image = assets.visual(&template.image_id)?;

        Ok(Self {
            name: entry.name.clone(),
            template_id: entry.template,
            offset: entry.offset,
            rotation: template.r,
            scale: template.s,
            projectile: template.projectile,
            base_image,
            image: base_image,
        })
    }

    pub fn template_id(&self) -> u32 {
        self.template_id
    }

    pub fn offset(&self) -> [f32; 3] {
        self.offset
    }

    pub fn projectile(&self) -> u32 {
        self.projectile
    }

    pub fn is_gun(&self) -> bool {
        self.name == GUN
    }

    /// 当前显示用图像
    pub fn image(&self) -> ImageHandle {
        self.image
    }

    /// 父角色位于 `parent` 时，附件的绘制区域
    pub fn rect(&self, parent: Coord) -> Rect {
        self.image.rect_at(parent.x + self.offset[0], parent.y + self.offset[1])
    }

    /// 开火
    ///
    /// 在 `coord + offset` 处生成子弹，朝向取 `coord.r`，动量继承 `momentum`。
    /// 子弹记录 `owner`，不会命中开火者。
    pub fn fire(&self, owner: ActorId, coord: Coord, momentum: Coord, commands: &mut Commands) {
        let [dx, dy, dz] = self.offset;
        let origin = coord.offset(dx, dy, dz);
        sim_info!("Firing bullet at coord: {:?} with momentum: {:?}", origin, momentum);

        commands.spawn(SpawnRequest {
            template: self.projectile,
            name: BULLET.to_string(),
            coord: origin,
            momentum,
            owner: Some(owner),
        });
    }
}

impl Component for Attachment {
    fn name(&self) -> &str {
        &self.name
    }

    fn refresh_visual(&mut self, renderer: &mut dyn RenderBackend) {
        self.image = renderer.compose_transform(self.base_image, self.rotation, self.scale);
    }
}
