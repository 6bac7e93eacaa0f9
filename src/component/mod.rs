//! 组件系统模块
//!
//! 模拟中的实体：角色 [`Actor`] 与其附件 [`Attachment`]，
//! 以及它们逐帧使用的运动状态和上下文。

mod actor;
mod attachment;
mod component;
mod context;
mod kinematics;

pub use actor::{Actor, ActorId, Combat, Engine};
pub use attachment::{Attachment, BULLET, GUN};
pub use component::Component;
pub use context::{Assets, Commands, FrameCommand, FrameContext, Neighbours, SpawnRequest};
pub use kinematics::{Axis, Bounds, Kinematics, Limits};
