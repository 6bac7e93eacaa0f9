//! 帧上下文
//!
//! 角色不持有全局注册表。构造时通过 [`Assets`] 取得模板和贴图，
//! 每帧更新时通过 [`FrameContext`] 取得屏幕边界、渲染协作方和命令缓冲。
//! 生成与销毁都只写入 [`Commands`]，由注册表在本轮更新结束后统一应用。

use std::collections::HashSet;
use std::path::Path;

use super::actor::{Actor, ActorId};
use super::kinematics::Bounds;
use crate::attribute::AttributeStore;
use crate::core::error::Result;
use crate::core::math::Coord;
use crate::renderer::{ImageHandle, RenderBackend};

/// 生成请求
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    pub template: u32,
    pub name: String,
    pub coord: Coord,
    pub momentum: Coord,

    /// 开火者；子弹永远不会命中自己的开火者
    pub owner: Option<ActorId>,
}

/// 延迟执行的注册表命令
#[derive(Debug, Clone, PartialEq)]
pub enum FrameCommand {
    Spawn(SpawnRequest),
    Despawn(ActorId),
}

/// 命令缓冲
///
/// 同一角色的多次销毁请求只记录一次。
#[derive(Debug, Default)]
pub struct Commands {
    queue: Vec<FrameCommand>,
    removing: HashSet<ActorId>,
}

impl Commands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, request: SpawnRequest) {
        self.queue.push(FrameCommand::Spawn(request));
    }

    pub fn despawn(&mut self, id: ActorId) {
        if self.removing.insert(id) {
            self.queue.push(FrameCommand::Despawn(id));
        }
    }

    /// 本轮是否已经请求销毁该角色
    pub fn is_removing(&self, id: ActorId) -> bool {
        self.removing.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// 按写入顺序取出全部命令
    pub fn drain(&mut self) -> Vec<FrameCommand> {
        self.removing.clear();
        std::mem::take(&mut self.queue)
    }
}

/// 实体构造时用到的服务
pub struct Assets<'a> {
    pub store: &'a AttributeStore,
    pub renderer: &'a mut dyn RenderBackend,
    pub image_dir: &'a Path,
}

impl<'a> Assets<'a> {
    /// 按 `imageId` 加载 `<image_dir>/<imageId>.png`
    pub fn visual(&mut self, image_id: &str) -> Result<ImageHandle> {
        let path = self.image_dir.join(format!("{}.png", image_id));
        self.renderer.load_visual(&path)
    }
}

/// 每帧更新时用到的服务
pub struct FrameContext<'a> {
    pub bounds: Bounds,
    pub renderer: &'a mut dyn RenderBackend,
    pub commands: &'a mut Commands,
}

/// 正在更新的角色之外的全部存活角色
pub struct Neighbours<'a> {
    before: &'a mut [Actor],
    after: &'a mut [Actor],
}

impl<'a> Neighbours<'a> {
    /// 把 `actors[index]` 与其余角色拆开
    ///
    /// # 返回值
    ///
    /// `index` 越界时返回 `None`
    pub fn split(actors: &'a mut [Actor], index: usize) -> Option<(&'a mut Actor, Neighbours<'a>)> {
        if index >= actors.len() {
            return None;
        }
        let (before, rest) = actors.split_at_mut(index);
        let (current, after) = rest.split_first_mut()?;
        Some((current, Neighbours { before, after }))
    }

    /// 以 `actors` 中的全部角色作为邻居
    pub fn from_slice(actors: &'a mut [Actor]) -> Self {
        Self {
            before: actors,
            after: &mut [],
        }
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> + '_ {
        self.before.iter_mut().chain(self.after.iter_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_despawn_is_recorded_once() {
        let mut commands = Commands::new();
        commands.despawn(ActorId(3));
        commands.despawn(ActorId(3));
        commands.spawn(SpawnRequest {
            template: 1,
            name: "bullet".to_string(),
            coord: Coord::ZERO,
            momentum: Coord::ZERO,
            owner: None,
        });

        assert!(commands.is_removing(ActorId(3)));
        assert_eq!(commands.len(), 2);

        let drained = commands.drain();
        assert_eq!(drained[0], FrameCommand::Despawn(ActorId(3)));
        assert!(matches!(drained[1], FrameCommand::Spawn(_)));
        assert!(commands.is_empty());
        assert!(!commands.is_removing(ActorId(3)));
    }
}
