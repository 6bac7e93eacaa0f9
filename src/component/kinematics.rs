//! Kinematics 组件
//!
//! 管理角色四个运动轴 (x, y, z, r) 与缩放的状态和逐帧积分。
//! 每个轴的可调参数都来自属性模板，构造后保存为实例自己的副本，
//! 运行时可以单独修改。

use crate::attribute::ActorTemplate;
use crate::core::math::utils::{apply_friction, clamp};
use crate::core::math::Coord;

/// 闭区间 `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    pub min: f32,
    pub max: f32,
}

impl Limits {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// 上限相对屏幕边缘时，把屏幕尺寸 `extent` 加到上限上
    pub fn extended(&self, extent: f32) -> Limits {
        Limits::new(self.min, self.max + extent)
    }

    pub fn clamp(&self, value: f32) -> f32 {
        clamp(value, self.min, self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// 屏幕边界
///
/// x/y 的位置上限与销毁上限都相对屏幕右/下边缘。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// 单个运动轴
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    /// 当前位置（旋转轴为角度）
    pub value: f32,

    /// 当前速度
    pub velocity: f32,

    /// `push` 一次的速度步长
    pub accel: f32,

    /// 速度上下限
    pub speed: Limits,

    /// 每帧摩擦衰减量
    pub friction: f32,

    /// 位置上下限
    pub range: Limits,
}

impl Axis {
    /// 按意图方向加速一次
    ///
    /// 速度未到上限时加一个步长，然后钳制到上限；负方向同理。
    pub fn push(&mut self, intent: f32) {
        if intent > 0.0 && self.velocity < self.speed.max {
            self.velocity = (self.velocity + self.accel).min(self.speed.max);
        } else if intent < 0.0 && self.velocity > self.speed.min {
            self.velocity = (self.velocity - self.accel).max(self.speed.min);
        }
    }

    pub fn apply_friction(&mut self) {
        self.velocity = apply_friction(self.velocity, self.friction);
    }

    pub fn clamp_velocity(&mut self) {
        self.velocity = self.speed.clamp(self.velocity);
    }

    /// 位置积分：先钳制速度，再 `value += external + velocity`，最后钳制位置
    fn integrate(&mut self, external: f32, extent: f32) {
        self.clamp_velocity();
        self.value = self.range.extended(extent).clamp(self.value + external + self.velocity);
    }
}

/// 角色的完整运动状态
#[derive(Debug, Clone, PartialEq)]
pub struct Kinematics {
    pub x: Axis,
    pub y: Axis,
    pub z: Axis,

    /// 旋转轴（角度制）
    pub r: Axis,

    /// 当前缩放
    pub scale: f32,

    /// 缩放上下限
    pub scale_range: Limits,

    // 销毁阈值，与位置上下限相互独立
    pub x_destroy: Limits,
    pub y_destroy: Limits,
    pub z_destroy: Limits,
}

impl Kinematics {
    /// 从模板创建，位置取 `coord`，速度取 `momentum`
    ///
    /// 初始缩放钳制到缩放上下限，初始旋转折算进旋转上下限。
    pub fn from_template(template: &ActorTemplate, coord: Coord, momentum: Coord) -> Self {
        let t = template;
        let rotation_range = Limits::new(t.r_min, t.r_max);
        let scale_range = Limits::new(t.s_min, t.s_max);
        Self {
            x: Axis {
                value: coord.x,
                velocity: momentum.x,
                accel: t.xa,
                speed: Limits::new(t.xs_min, t.xs_max),
                friction: t.x_fric_coef,
                range: Limits::new(t.x_min, t.x_max),
            },
            y: Axis {
                value: coord.y,
                velocity: momentum.y,
                accel: t.ya,
                speed: Limits::new(t.ys_min, t.ys_max),
                friction: t.y_fric_coef,
                range: Limits::new(t.y_min, t.y_max),
            },
            z: Axis {
                value: coord.z,
                velocity: momentum.z,
                accel: t.za,
                speed: Limits::new(t.zs_min, t.zs_max),
                friction: t.z_fric_coef,
                range: Limits::new(t.z_min, t.z_max),
            },
            r: Axis {
                value: normalize_rotation(coord.r, rotation_range),
                velocity: momentum.r,
                accel: t.ra,
                speed: Limits::new(t.rs_min, t.rs_max),
                friction: t.r_fric_coef,
                range: rotation_range,
            },
            scale: scale_range.clamp(t.s),
            scale_range,
            x_destroy: Limits::new(t.x_destroy_min, t.x_destroy_max),
            y_destroy: Limits::new(t.y_destroy_min, t.y_destroy_max),
            z_destroy: Limits::new(t.z_destroy_min, t.z_destroy_max),
        }
    }

    /// 当前坐标 (x, y, z, r)
    pub fn coord(&self) -> Coord {
        Coord::new(self.x.value, self.y.value, self.z.value, self.r.value)
    }

    /// 当前动量 (xs, ys, zs, rs)
    pub fn momentum(&self) -> Coord {
        Coord::new(self.x.velocity, self.y.velocity, self.z.velocity, self.r.velocity)
    }

    /// 按四轴意图各加速一次
    pub fn push(&mut self, intent: Coord) {
        self.x.push(intent.x);
        self.y.push(intent.y);
        self.z.push(intent.z);
        self.r.push(intent.r);
    }

    /// 四个轴的速度同时向零衰减
    pub fn apply_friction(&mut self) {
        self.x.apply_friction();
        self.y.apply_friction();
        self.z.apply_friction();
        self.r.apply_friction();
    }

    /// 位置积分
    ///
    /// # 参数
    /// - `external`: 本帧额外的位移，旋转分量不使用
    /// - `bounds`: 屏幕边界
    pub fn integrate_position(&mut self, external: Coord, bounds: Bounds) {
        self.x.integrate(external.x, bounds.width);
        self.y.integrate(external.y, bounds.height);
        self.z.integrate(external.z, 0.0);
    }

    /// 缩放积分：`scale += zs / 100`，钳制在缩放上下限内
    ///
    /// 缩放已经在范围外时保持不变。
    pub fn integrate_scale(&mut self) {
        if self.scale_range.contains(self.scale) {
            self.scale = self.scale_range.clamp(self.scale + self.z.velocity / 100.0);
        }
    }

    /// 旋转积分
    ///
    /// 钳制角速度后累加，再钳制到旋转上下限；恰好到达任一上下限时归零。
    /// 旋转已经在范围外时保持不变。
    pub fn integrate_rotation(&mut self, external: f32) {
        let range = self.r.range;
        if !range.contains(self.r.value) {
            return;
        }

        self.r.clamp_velocity();
        self.r.value = zero_at_bounds(range.clamp(self.r.value + external + self.r.velocity), range);
    }

    /// 是否有任一轴越过销毁阈值
    pub fn beyond_destroy_threshold(&self, bounds: Bounds) -> bool {
        !self.x_destroy.extended(bounds.width).contains(self.x.value)
            || !self.y_destroy.extended(bounds.height).contains(self.y.value)
            || !self.z_destroy.contains(self.z.value)
    }

    /// 位置归零（旋转与速度保持不变）
    pub fn reset_position(&mut self) {
        self.x.value = 0.0;
        self.y.value = 0.0;
        self.z.value = 0.0;
    }
}

/// 恰好落在任一上下限时归零
fn zero_at_bounds(rotation: f32, range: Limits) -> f32 {
    if rotation == range.min || rotation == range.max {
        0.0
    } else {
        rotation
    }
}

/// 把任意角度放进旋转上下限
///
/// 范围覆盖整圈时按 360° 折算，否则直接钳制。
fn normalize_rotation(rotation: f32, range: Limits) -> f32 {
    let rotation = if range.max - range.min >= 360.0 {
        range.min + (rotation - range.min).rem_euclid(360.0)
    } else {
        rotation
    };
    zero_at_bounds(range.clamp(rotation), range)
}
