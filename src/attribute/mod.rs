//! 属性模板模块
//!
//! 按整数 id 索引的只读模板存储，以及实体构造时使用的强类型模板。

mod store;
mod template;

pub use store::AttributeStore;
pub use template::{
    ActorKind, ActorTemplate, AttachmentTemplate, LoadoutEntry, TemplateRecord,
    DEFAULT_PROJECTILE_TEMPLATE,
};
