//! 无头渲染后端
//!
//! 不创建窗口，也不保存像素。贴图尺寸通过 `image` 读取文件头得到；
//! 文件不可用时使用默认尺寸（`strict` 模式下则返回错误）。
//! 每次调用都会被记录下来，供测试和调试检查。

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::backend_trait::{ImageHandle, RenderBackend};
use crate::core::error::{OwlQuestError, Result};
use crate::core::math::constants::DEG_TO_RAD;
use crate::core::math::Rect;

/// 找不到贴图时使用的默认尺寸
pub const DEFAULT_IMAGE_SIZE: (u32, u32) = (32, 32);

/// 无头渲染后端
#[derive(Debug)]
pub struct HeadlessRenderer {
    next_id: u32,
    default_size: (u32, u32),
    strict: bool,
    loaded: HashMap<PathBuf, ImageHandle>,

    /// 已执行的旋转缩放次数
    pub transforms: u64,

    /// 已执行的刷新次数
    pub presents: u64,

    /// 最近一次刷新的区域
    pub last_regions: Vec<Rect>,
}

impl HeadlessRenderer {
    /// 创建后端，贴图缺失时使用 `default_size`
    pub fn new(default_size: (u32, u32)) -> Self {
        Self {
            next_id: 0,
            default_size,
            strict: false,
            loaded: HashMap::new(),
            transforms: 0,
            presents: 0,
            last_regions: Vec::new(),
        }
    }

    /// 贴图缺失即报错
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::new(DEFAULT_IMAGE_SIZE)
        }
    }

    /// 已加载的不同贴图数量
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    fn allocate(&mut self, width: u32, height: u32) -> ImageHandle {
        let handle = ImageHandle::new(self.next_id, width, height);
        self.next_id = self.next_id.wrapping_add(1);
        handle
    }
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_SIZE)
    }
}

impl RenderBackend for HeadlessRenderer {
    fn load_visual(&mut self, path: &Path) -> Result<ImageHandle> {
        if let Some(handle) = self.loaded.get(path) {
            return Ok(*handle);
        }

        let (width, height) = match image::image_dimensions(path) {
            Ok(size) => size,
            Err(e) if self.strict => {
                return Err(OwlQuestError::Render(format!(
                    "Failed to load visual '{}': {}",
                    path.display(),
                    e
                )));
            }
            Err(e) => {
                debug!("Visual '{}' unavailable ({}), using default size", path.display(), e);
                self.default_size
            }
        };

        let handle = self.allocate(width, height);
        self.loaded.insert(path.to_path_buf(), handle);
        Ok(handle)
    }

    fn compose_transform(&mut self, base: ImageHandle, rotation: f32, scale: f32) -> ImageHandle {
        self.transforms += 1;

        // 旋转后的外接矩形
        let rad = rotation * DEG_TO_RAD;
        let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
        let w = base.width as f32;
        let h = base.height as f32;
        let width = ((w * cos + h * sin) * scale).round().max(0.0) as u32;
        let height = ((w * sin + h * cos) * scale).round().max(0.0) as u32;

        self.allocate(width, height)
    }

    fn present_changed_regions(&mut self, regions: &[Rect]) {
        self.presents += 1;
        self.last_regions = regions.to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_visual_uses_default_size() {
        let mut renderer = HeadlessRenderer::new((16, 8));
        let handle = renderer.load_visual(Path::new("does/not/exist.png")).unwrap();
        assert_eq!((handle.width, handle.height), (16, 8));

        // 同一路径只加载一次
        let again = renderer.load_visual(Path::new("does/not/exist.png")).unwrap();
        assert_eq!(handle, again);
        assert_eq!(renderer.loaded_count(), 1);
    }

    #[test]
    fn test_strict_mode_reports_missing_visual() {
        let mut renderer = HeadlessRenderer::strict();
        let err = renderer.load_visual(Path::new("does/not/exist.png")).unwrap_err();
        assert!(matches!(err, OwlQuestError::Render(_)));
    }

    #[test]
    fn test_compose_transform_bounds() {
        let mut renderer = HeadlessRenderer::default();
        let base = ImageHandle::new(0, 10, 20);

        let scaled = renderer.compose_transform(base, 0.0, 2.0);
        assert_eq!((scaled.width, scaled.height), (20, 40));

        let quarter = renderer.compose_transform(base, 90.0, 1.0);
        assert_eq!((quarter.width, quarter.height), (20, 10));
        assert_eq!(renderer.transforms, 2);
    }

    #[test]
    fn test_handle_ids_wrap_around() {
        let mut renderer = HeadlessRenderer::default();
        renderer.next_id = u32::MAX;
        let base = ImageHandle::new(0, 10, 10);

        assert_eq!(renderer.compose_transform(base, 0.0, 1.0).id, u32::MAX);
        assert_eq!(renderer.compose_transform(base, 0.0, 1.0).id, 0);
    }

    #[test]
    fn test_present_records_regions() {
        let mut renderer = HeadlessRenderer::default();
        renderer.present_changed_regions(&[Rect::new(0.0, 0.0, 4.0, 4.0)]);
        assert_eq!(renderer.presents, 1);
        assert_eq!(renderer.last_regions.len(), 1);
    }
}
