//! 统一的渲染协作方接口
//!
//! 模拟核心不持有像素数据，只持有图像句柄。窗口创建、贴图解码和
//! 实际绘制都在实现此 trait 的后端中完成。
//!
//! # 设计理念
//!
//! - **抽象化**：隐藏具体图形库的实现细节
//! - **统一接口**：无头运行、测试和真实窗口使用同一套调用
//! - **最小化**：只暴露核心真正需要的三个操作

use std::path::Path;

use crate::core::error::Result;
use crate::core::math::Rect;

/// 图像句柄
///
/// 只记录尺寸和后端内部编号，不包含像素数据。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    /// 后端内部编号
    pub id: u32,

    /// 宽度（像素）
    pub width: u32,

    /// 高度（像素）
    pub height: u32,
}

impl ImageHandle {
    pub fn new(id: u32, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    /// 以 (x, y) 为左上角、与图像同尺寸的包围盒
    pub fn rect_at(&self, x: f32, y: f32) -> Rect {
        Rect::new(x, y, self.width as f32, self.height as f32)
    }
}

/// 统一的渲染后端接口
///
/// # 方法说明
///
/// - `load_visual()`: 加载贴图，返回句柄
/// - `compose_transform()`: 对基础图像做旋转 + 缩放，返回新句柄
/// - `present_changed_regions()`: 只刷新发生变化的区域
///
/// # 示例
///
/// ```ignore
/// let mut backend: Box<dyn RenderBackend> = Box::new(HeadlessRenderer::default());
/// let base = backend.load_visual(Path::new("i/Actors/owl.png"))?;
/// let rotated = backend.compose_transform(base, 45.0, 1.5);
/// backend.present_changed_regions(&[base.rect_at(0.0, 0.0)]);
/// ```
pub trait RenderBackend {
    /// 加载贴图
    ///
    /// # 返回值
    ///
    /// - `Ok(handle)`: 加载成功
    /// - `Err(...)`: 贴图不可用，调用方将其视为实体构造失败
    fn load_visual(&mut self, path: &Path) -> Result<ImageHandle>;

    /// 旋转（角度制）并缩放基础图像
    fn compose_transform(&mut self, base: ImageHandle, rotation: f32, scale: f32) -> ImageHandle;

    /// 刷新发生变化的屏幕区域
    fn present_changed_regions(&mut self, regions: &[Rect]);
}
