//! 属性模板存储
//!
//! 启动时一次性读入 objects.json，之后只读。
//!
//! # 文件格式
//!
//! ```json
//! {
//!   "objects": {
//!     "0": { "name": "owl", "imageId": "owl", "hp": 10, ... },
//!     "1": { "name": "bullet", "kind": "projectile", ... }
//!   }
//! }
//! ```

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use super::template::{ActorTemplate, AttachmentTemplate, TemplateRecord};
use crate::core::error::AttributeError;

/// 空属性文件的内容
const PLACEHOLDER_DOCUMENT: &str = "{\n  \"objects\": {}\n}\n";

#[derive(Debug, Deserialize)]
struct AttributeDocument {
    #[serde(default)]
    objects: HashMap<String, Map<String, Value>>,
}

/// 按模板 id 索引的只读属性存储
#[derive(Debug, Clone, Default)]
pub struct AttributeStore {
    templates: HashMap<u32, Map<String, Value>>,
}

impl AttributeStore {
    /// 空存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 从文件加载
    ///
    /// 加载失败不是致命错误：存储退化为空，此后所有 `get` 都返回 `NotFound`。
    /// 文件不存在时会创建目录和一个空的占位文件。
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Error loading object attributes file '{}': {}", path.display(), e);
                if e.kind() == std::io::ErrorKind::NotFound {
                    Self::write_placeholder(path);
                }
                return Self::new();
            }
        };

        match Self::from_json_str(&contents) {
            Ok(store) => {
                info!(templates = store.len(), "Loaded object attributes from: {}", path.display());
                store
            }
            Err(e) => {
                warn!("Error parsing object attributes file '{}': {}", path.display(), e);
                Self::new()
            }
        }
    }

    fn write_placeholder(path: &Path) {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if !dir.exists() {
                info!("Creating object attributes file path: {}", dir.display());
                if let Err(e) = fs::create_dir_all(dir) {
                    warn!("Failed to create '{}': {}", dir.display(), e);
                    return;
                }
            }
        }

        info!("Touching object attributes file: {}", path.display());
        if let Err(e) = fs::write(path, PLACEHOLDER_DOCUMENT) {
            warn!("Failed to write placeholder '{}': {}", path.display(), e);
        }
    }

    /// 从 JSON 文本解析
    pub fn from_json_str(contents: &str) -> Result<Self, AttributeError> {
        let document: AttributeDocument = serde_json::from_str(contents)
            .map_err(|e| AttributeError::Parse(e.to_string()))?;

        let mut templates = HashMap::with_capacity(document.objects.len());
        for (key, fields) in document.objects {
            let id = key
                .trim()
                .parse::<u32>()
                .map_err(|_| AttributeError::Parse(format!("template key '{}' is not an integer id", key)))?;
            templates.insert(id, fields);
        }

        Ok(Self { templates })
    }

    /// 插入或替换一条模板（用于测试和工具）
    pub fn insert(&mut self, id: u32, fields: Map<String, Value>) {
        self.templates.insert(id, fields);
    }

    /// 取出模板记录的独立副本
    pub fn get(&self, id: u32) -> Result<TemplateRecord, AttributeError> {
        self.templates
            .get(&id)
            .map(|fields| TemplateRecord::new(id, fields.clone()))
            .ok_or(AttributeError::NotFound(id))
    }

    /// 取出并校验角色模板
    pub fn actor_template(&self, id: u32) -> Result<ActorTemplate, AttributeError> {
        self.get(id)?.actor()
    }

    /// 取出并校验附件模板
    pub fn attachment_template(&self, id: u32) -> Result<AttachmentTemplate, AttributeError> {
        self.get(id)?.attachment()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.templates.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE: &str = r#"{
        "objects": {
            "2": { "imageId": "gun", "name": "gun" },
            "5": { "imageId": "rock" }
        }
    }"#;

    #[test]
    fn test_parse_and_get() {
        let store = AttributeStore::from_json_str(SAMPLE).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.contains(2));
        assert_eq!(store.attachment_template(2).unwrap().image_id, "gun");
        assert_eq!(store.get(7).unwrap_err(), AttributeError::NotFound(7));
    }

    #[test]
    fn test_get_returns_independent_copy() {
        let store = AttributeStore::from_json_str(SAMPLE).unwrap();
        let mut first = store.get(2).unwrap();
        first.set_field("imageId", json!("laser"));

        let second = store.get(2).unwrap();
        assert_eq!(second.field("imageId"), Some(&json!("gun")));
    }

    #[test]
    fn test_non_integer_key_is_rejected() {
        let err = AttributeStore::from_json_str(r#"{ "objects": { "gun": {} } }"#).unwrap_err();
        assert!(matches!(err, AttributeError::Parse(_)));
    }

    #[test]
    fn test_missing_file_degrades_to_empty_and_creates_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("objects.json");

        let store = AttributeStore::load(&path);
        assert!(store.is_empty());
        assert_eq!(store.get(0).unwrap_err(), AttributeError::NotFound(0));

        // 占位文件可以被再次加载
        assert!(path.exists());
        assert!(AttributeStore::load(&path).is_empty());
    }

    #[test]
    fn test_unparsable_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("objects.json");
        fs::write(&path, "not json").unwrap();

        assert!(AttributeStore::load(&path).is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("objects.json");
        fs::write(&path, SAMPLE).unwrap();

        let store = AttributeStore::load(&path);
        assert_eq!(store.len(), 2);
    }
}
