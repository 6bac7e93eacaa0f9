//! 组件基类

use crate::renderer::RenderBackend;

/// 组件 trait
///
/// 角色与附件共同的接口
pub trait Component {
    /// 获取组件名称
    fn name(&self) -> &str;

    /// 重新计算显示用图像（旋转 + 缩放），不改变模拟状态
    fn refresh_visual(&mut self, renderer: &mut dyn RenderBackend);
}
