//! 渲染器模块
//!
//! 模拟核心与渲染协作方之间的边界。核心只持有图像句柄和包围盒，
//! 像素数据、窗口和呈现都留在后端实现中。
//!
//! # 架构设计
//!
//! - `RenderBackend`：统一的渲染协作方接口
//! - `HeadlessRenderer`：无窗口后端，供命令行运行和测试使用
//! - `DrawGroup`：角色的绘制记录，只交出发生变化的区域

mod backend_trait;
mod draw_group;
mod headless;

pub use backend_trait::{ImageHandle, RenderBackend};
pub use draw_group::DrawGroup;
pub use headless::{HeadlessRenderer, DEFAULT_IMAGE_SIZE};
