//! 属性模板记录
//!
//! 存储层保存的是 JSON 对象；实体构造时把它校验成固定结构的模板：
//! [`ActorTemplate`] 或 [`AttachmentTemplate`]。缺少必需字段即构造失败。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::error::AttributeError;

/// 从存储中取出的一条模板记录（独立副本）
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateRecord {
    id: u32,
    fields: Map<String, Value>,
}

impl TemplateRecord {
    pub fn new(id: u32, fields: Map<String, Value>) -> Self {
        Self { id, fields }
    }

    /// 模板 id
    pub fn id(&self) -> u32 {
        self.id
    }

    /// 原始字段（只读）
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// 修改本副本中的字段，不影响存储
    pub fn set_field(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// 校验为角色模板
    pub fn actor(&self) -> Result<ActorTemplate, AttributeError> {
        self.parse()
    }

    /// 校验为附件模板
    pub fn attachment(&self) -> Result<AttachmentTemplate, AttributeError> {
        self.parse()
    }

    fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, AttributeError> {
        serde_json::from_value(Value::Object(self.fields.clone())).map_err(|e| {
            AttributeError::Malformed {
                id: self.id,
                reason: e.to_string(),
            }
        })
    }
}

/// 角色种类
///
/// 只有 `Projectile` 参与碰撞检测。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    /// 玩家、敌人、场景物
    #[default]
    Craft,

    /// 子弹
    Projectile,
}

/// 默认挂载的附件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadoutEntry {
    /// 附件模板 id
    pub template: u32,

    /// 角色标签，例如 "gun"
    pub name: String,

    /// 相对父角色的偏移 (x, y, z)
    #[serde(default)]
    pub offset: [f32; 3],
}

/// 角色属性模板
///
/// 字段名与 objects.json 保持一致（camelCase）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorTemplate {
    #[serde(default)]
    pub name: String,
    pub image_id: String,
    #[serde(default)]
    pub kind: ActorKind,

    // 加速度步长
    pub xa: f32,
    pub ya: f32,
    pub za: f32,
    pub ra: f32,

    // 速度上下限
    pub xs_min: f32,
    pub xs_max: f32,
    pub ys_min: f32,
    pub ys_max: f32,
    pub zs_min: f32,
    pub zs_max: f32,
    pub rs_min: f32,
    pub rs_max: f32,

    // 摩擦系数
    pub x_fric_coef: f32,
    pub y_fric_coef: f32,
    pub z_fric_coef: f32,
    pub r_fric_coef: f32,

    // 位置/旋转/缩放限制；x/y 上限相对屏幕右/下边缘
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
    pub z_min: f32,
    pub z_max: f32,
    pub r_min: f32,
    pub r_max: f32,
    pub s_min: f32,
    pub s_max: f32,
    #[serde(default = "default_scale")]
    pub s: f32,

    // 销毁阈值；x/y 上限相对屏幕右/下边缘
    pub x_destroy_min: f32,
    pub x_destroy_max: f32,
    pub y_destroy_min: f32,
    pub y_destroy_max: f32,
    pub z_destroy_min: f32,
    pub z_destroy_max: f32,

    // 战斗
    pub hp: i32,
    #[serde(default)]
    pub damage: i32,
    #[serde(default = "default_damagable")]
    pub damagable: bool,
    #[serde(default)]
    pub primer_ticks: u32,

    // 推进
    #[serde(default)]
    pub thrust_speed: f32,
    #[serde(default)]
    pub engine_speed: f32,
    #[serde(default)]
    pub engine_accel: f32,
    #[serde(default)]
    pub engine_deaccel: f32,
    #[serde(default)]
    pub engine_min_accel: f32,
    #[serde(default)]
    pub engine_max_accel: f32,

    #[serde(default)]
    pub loadout: Vec<LoadoutEntry>,
}

/// 附件属性模板
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentTemplate {
    pub image_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub r: f32,
    #[serde(default = "default_scale")]
    pub s: f32,

    /// 开火时生成的子弹模板
    #[serde(default = "default_projectile")]
    pub projectile: u32,
}

/// 目前只有一种子弹
pub const DEFAULT_PROJECTILE_TEMPLATE: u32 = 1;

fn default_scale() -> f32 { 1.0 }
fn default_damagable() -> bool { true }
fn default_projectile() -> u32 { DEFAULT_PROJECTILE_TEMPLATE }
