//! 数学库模块
//!
//! 提供模拟核心常用的数学类型和函数。
//! 基于 `nalgebra` 但提供了更贴近 2D 街机游戏的 API。
//!
//! # 模块组织
//!
//! - **基础类型**：Vector2, Coord（四轴坐标/动量）, Rect（轴对齐包围盒）
//! - **常量**：DEG_TO_RAD 等
//! - **工具函数**：clamp, apply_friction, facing

use serde::{Deserialize, Serialize};

pub use nalgebra::Vector2 as Vec2;

/// 二维向量
pub type Vector2 = Vec2<f32>;

/// 四轴坐标 (x, y, z, r)
///
/// 同一类型也用来表示动量 (xs, ys, zs, rs)。z 是深度/高度的代理量，
/// 不直接参与绘制；r 为角度制旋转。
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
}

impl Coord {
    /// 原点
    pub const ZERO: Coord = Coord { x: 0.0, y: 0.0, z: 0.0, r: 0.0 };

    pub fn new(x: f32, y: f32, z: f32, r: f32) -> Self {
        Self { x, y, z, r }
    }

    /// 从 `[x, y, z, r]` 数组创建
    pub fn from_array(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }

    /// 平移 (x, y, z)，旋转保持不变
    pub fn offset(&self, dx: f32, dy: f32, dz: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz, self.r)
    }
}

impl From<[f32; 4]> for Coord {
    fn from(v: [f32; 4]) -> Self {
        Self::from_array(v)
    }
}

/// 轴对齐包围盒（屏幕坐标，原点在左上角）
///
/// 与 pygame 的 Rect 一致，碰撞采用半开区间：刚好贴边不算相交。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// 移动左上角到指定位置，尺寸不变
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// 两个包围盒是否相交
    ///
    /// 零面积的包围盒不与任何包围盒相交。
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 || other.width <= 0.0 || other.height <= 0.0 {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// 同时覆盖两个包围盒的最小包围盒
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }
}

/// 数学常量
pub mod constants {
    /// π
    pub const PI: f32 = std::f32::consts::PI;

    /// 角度转弧度的系数
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// 浮点数比较的 epsilon
    pub const EPSILON: f32 = 1e-6;
}

/// 数学工具函数
pub mod utils {
    use super::*;

    /// 限制值在范围内
    pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }

    /// 摩擦衰减：向零靠拢 `coef`，不越过零
    pub fn apply_friction(velocity: f32, coef: f32) -> f32 {
        if velocity > 0.0 {
            (velocity - coef).max(0.0)
        } else if velocity < 0.0 {
            (velocity + coef).min(0.0)
        } else {
            0.0
        }
    }

    /// 朝向向量
    ///
    /// 角度 `degrees` 对应的屏幕空间朝前方向。屏幕 y 轴向下，
    /// 所以 0° 指向 (0, -1)。
    pub fn facing(degrees: f32) -> Vector2 {
        let rad = degrees * constants::DEG_TO_RAD;
        Vector2::new(-rad.sin(), -rad.cos())
    }

    /// 浮点数近似相等
    pub fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < constants::EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::utils::*;
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
    }

    #[test]
    fn test_friction_never_crosses_zero() {
        assert_eq!(apply_friction(0.3, 0.5), 0.0);
        assert_eq!(apply_friction(-0.3, 0.5), 0.0);
        assert!(approx_eq(apply_friction(2.0, 0.5), 1.5));
        assert!(approx_eq(apply_friction(-2.0, 0.5), -1.5));
        assert_eq!(apply_friction(0.0, 0.5), 0.0);
    }

    #[test]
    fn test_facing_screen_space() {
        let up = facing(0.0);
        assert!(approx_eq(up.x, 0.0));
        assert!(approx_eq(up.y, -1.0));

        let left = facing(90.0);
        assert!(approx_eq(left.x, -1.0));
        assert!(left.y.abs() < 1e-5);
    }

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(10.0, 0.0, 10.0, 10.0);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        // 贴边不算相交
        assert!(!a.intersects(&c));
        assert!(!a.intersects(&Rect::new(2.0, 2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_rect_union() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 5.0, 10.0, 10.0);
        assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 30.0, 15.0));
    }

    #[test]
    fn test_coord_offset_keeps_rotation() {
        let c = Coord::new(1.0, 2.0, 3.0, 45.0).offset(50.0, 50.0, 0.0);
        assert_eq!(c, Coord::new(51.0, 52.0, 3.0, 45.0));
    }
}
