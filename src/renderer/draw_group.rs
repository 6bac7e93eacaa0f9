//! 绘制组
//!
//! 记录每个角色上一次绘制的位置，每帧只交出发生变化的区域。
//! 移除的角色会在下一次刷新时清掉旧位置。

use std::collections::HashMap;

use crate::component::ActorId;
use crate::core::math::Rect;

/// 角色 id → 上一次绘制的包围盒
#[derive(Debug, Default)]
pub struct DrawGroup {
    drawn: HashMap<ActorId, Rect>,
    pending: HashMap<ActorId, Rect>,
    cleared: Vec<Rect>,
}

impl DrawGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记角色本帧的包围盒
    pub fn update(&mut self, id: ActorId, rect: Rect) {
        self.pending.insert(id, rect);
    }

    /// 从绘制组中移除角色
    ///
    /// # 返回值
    ///
    /// 角色不在组内时返回 `false`
    pub fn remove(&mut self, id: ActorId) -> bool {
        let pending = self.pending.remove(&id);
        match self.drawn.remove(&id) {
            Some(rect) => {
                self.cleared.push(rect);
                true
            }
            None => pending.is_some(),
        }
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.drawn.contains_key(&id) || self.pending.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.drawn.keys().chain(self.pending.keys().filter(|id| !self.drawn.contains_key(id))).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 取出本帧需要刷新的区域
    ///
    /// 移动过的角色交出 `旧位置 ∪ 新位置`，新角色交出新位置，
    /// 被移除的角色交出旧位置。位置没变的角色不产生区域。
    pub fn changed_regions(&mut self) -> Vec<Rect> {
        let mut regions = std::mem::take(&mut self.cleared);

        for (id, rect) in self.pending.drain() {
            match self.drawn.insert(id, rect) {
                Some(old) if old == rect => {}
                Some(old) => regions.push(old.union(&rect)),
                None => regions.push(rect),
            }
        }

        regions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_changed_regions_are_reported() {
        let mut group = DrawGroup::new();
        let a = ActorId(0);
        let b = ActorId(1);

        group.update(a, Rect::new(0.0, 0.0, 10.0, 10.0));
        group.update(b, Rect::new(50.0, 50.0, 10.0, 10.0));
        assert_eq!(group.changed_regions().len(), 2);

        // a 移动，b 不动
        group.update(a, Rect::new(5.0, 0.0, 10.0, 10.0));
        group.update(b, Rect::new(50.0, 50.0, 10.0, 10.0));
        let regions = group.changed_regions();
        assert_eq!(regions, vec![Rect::new(0.0, 0.0, 15.0, 10.0)]);
    }

    #[test]
    fn test_removed_actor_clears_old_rect() {
        let mut group = DrawGroup::new();
        let id = ActorId(7);
        group.update(id, Rect::new(1.0, 2.0, 3.0, 4.0));
        group.changed_regions();

        assert!(group.remove(id));
        assert!(!group.remove(id));
        assert!(group.is_empty());
        assert_eq!(group.changed_regions(), vec![Rect::new(1.0, 2.0, 3.0, 4.0)]);
        assert!(group.changed_regions().is_empty());
    }
}
