//! Resource-scoped settings
//!
//! The policy reads its patterns through [`SettingsSource`], keyed like an
//! editor setting (`autoReadOnly.files`) and optionally scoped to the
//! document being checked. [`ScopedSettings`] layers folder values over the
//! global value: folders containing the document apply from shallowest to
//! deepest, and mappings merge key-by-key (existing keys keep their position
//! and take the narrower value, new keys append).

use crate::config::types::AppConfig;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Settings key holding the read-only pattern table
pub const FILES_SETTING: &str = "autoReadOnly.files";

/// Source of raw settings values
pub trait SettingsSource: Send + Sync {
    /// Get the value of `key`, as seen from `resource` when given
    fn get(&self, key: &str, resource: Option<&Path>) -> Option<Value>;
}

impl<S: SettingsSource + ?Sized> SettingsSource for std::sync::Arc<S> {
    fn get(&self, key: &str, resource: Option<&Path>) -> Option<Value> {
        (**self).get(key, resource)
    }
}

/// Global settings with folder-scoped overrides
#[derive(Debug, Clone, Default)]
pub struct ScopedSettings {
    global: HashMap<String, Value>,
    folders: Vec<FolderSettings>,
}

#[derive(Debug, Clone)]
struct FolderSettings {
    root: PathBuf,
    values: HashMap<String, Value>,
}

impl ScopedSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the settings view of a loaded configuration
    pub fn from_config(config: &AppConfig) -> Self {
        let mut settings = Self::new();
        if let Some(files) = &config.read_only.files {
            settings = settings.with_global(FILES_SETTING, files.clone());
        }
        for folder in &config.read_only.folders {
            if let Some(files) = &folder.files {
                let root = shellexpand::tilde(&folder.path).into_owned();
                settings = settings.with_folder(root, FILES_SETTING, files.clone());
            }
        }
        settings
    }

    /// Set a global value
    pub fn with_global(mut self, key: impl Into<String>, value: Value) -> Self {
        self.global.insert(key.into(), value);
        self
    }

    /// Set a value for documents under `root`
    pub fn with_folder(
        mut self,
        root: impl Into<PathBuf>,
        key: impl Into<String>,
        value: Value,
    ) -> Self {
        let root = root.into();
        match self.folders.iter_mut().find(|folder| folder.root == root) {
            Some(folder) => {
                folder.values.insert(key.into(), value);
            }
            None => {
                let mut values = HashMap::new();
                values.insert(key.into(), value);
                self.folders.push(FolderSettings { root, values });
            }
        }
        self
    }
}

impl SettingsSource for ScopedSettings {
    fn get(&self, key: &str, resource: Option<&Path>) -> Option<Value> {
        let mut value = self.global.get(key).cloned();
        let Some(resource) = resource else {
            return value;
        };

        let mut layers: Vec<&FolderSettings> = self
            .folders
            .iter()
            .filter(|folder| resource.starts_with(&folder.root))
            .collect();
        layers.sort_by_key(|folder| folder.root.components().count());

        for layer in layers {
            if let Some(overlay) = layer.values.get(key) {
                value = Some(match value {
                    Some(base) => overlay_value(base, overlay.clone()),
                    None => overlay.clone(),
                });
            }
        }
        value
    }
}

/// Overlay a narrower value on a broader one.
/// Two mappings merge recursively; otherwise the overlay wins.
fn overlay_value(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, overlay_val) in overlay {
                match base.get_mut(&key) {
                    Some(slot) => {
                        let base_val = slot.take();
                        *slot = overlay_value(base_val, overlay_val);
                    }
                    None => {
                        base.insert(key, overlay_val);
                    }
                }
            }
            Value::Object(base)
        }
        (_, overlay) => overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(value: &Value) -> Vec<&str> {
        value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect()
    }

    #[test]
    fn test_global_only() {
        let settings = ScopedSettings::new().with_global(FILES_SETTING, json!({"**/*.md": true}));

        assert_eq!(
            settings.get(FILES_SETTING, None),
            Some(json!({"**/*.md": true}))
        );
        assert_eq!(
            settings.get(FILES_SETTING, Some(Path::new("/any/file.rs"))),
            Some(json!({"**/*.md": true}))
        );
        assert_eq!(settings.get("other.key", None), None);
    }

    #[test]
    fn test_folder_overlay_applies_inside_folder_only() {
        let settings = ScopedSettings::new()
            .with_global(FILES_SETTING, json!({"**/*.md": true}))
            .with_folder("/work/docs", FILES_SETTING, json!({"**/*.md": false}));

        assert_eq!(
            settings.get(FILES_SETTING, Some(Path::new("/work/docs/a.md"))),
            Some(json!({"**/*.md": false}))
        );
        assert_eq!(
            settings.get(FILES_SETTING, Some(Path::new("/work/other/a.md"))),
            Some(json!({"**/*.md": true}))
        );
        // Prefix matching is per component, not per character
        assert_eq!(
            settings.get(FILES_SETTING, Some(Path::new("/work/docs2/a.md"))),
            Some(json!({"**/*.md": true}))
        );
    }

    #[test]
    fn test_overlay_keeps_positions_and_appends_new_keys() {
        let settings = ScopedSettings::new()
            .with_global(FILES_SETTING, json!({"**/src/**": false, "**/out/**": true}))
            .with_folder(
                "/work",
                FILES_SETTING,
                json!({"**/vendor/**": true, "**/src/**": true}),
            );

        let value = settings
            .get(FILES_SETTING, Some(Path::new("/work/src/main.rs")))
            .unwrap();
        assert_eq!(keys(&value), vec!["**/src/**", "**/out/**", "**/vendor/**"]);
        assert_eq!(value["**/src/**"], json!(true));
    }

    #[test]
    fn test_nested_folders_apply_shallowest_first() {
        let settings = ScopedSettings::new()
            .with_folder("/work/app/web", FILES_SETTING, json!({"**/*.js": false}))
            .with_folder("/work", FILES_SETTING, json!({"**/*.js": true}));

        assert_eq!(
            settings.get(FILES_SETTING, Some(Path::new("/work/app/web/index.js"))),
            Some(json!({"**/*.js": false}))
        );
        assert_eq!(
            settings.get(FILES_SETTING, Some(Path::new("/work/app/index.js"))),
            Some(json!({"**/*.js": true}))
        );
    }

    #[test]
    fn test_non_mapping_overlay_replaces() {
        let settings = ScopedSettings::new()
            .with_global(FILES_SETTING, json!({"**/*.md": true}))
            .with_folder("/work", FILES_SETTING, json!("oops"));

        assert_eq!(
            settings.get(FILES_SETTING, Some(Path::new("/work/a.md"))),
            Some(json!("oops"))
        );
    }

    #[test]
    fn test_resource_free_lookup_ignores_folders() {
        let settings =
            ScopedSettings::new().with_folder("/work", FILES_SETTING, json!({"**": true}));

        assert_eq!(settings.get(FILES_SETTING, None), None);
        assert_eq!(
            settings.get(FILES_SETTING, Some(Path::new("/work/a"))),
            Some(json!({"**": true}))
        );
    }

    #[test]
    fn test_from_config() {
        let mut config = AppConfig::default();
        config.read_only.files = Some(json!({"**/*.lock": true}));
        config.read_only.folders.push(crate::config::FolderConfig {
            path: "/repo".to_string(),
            files: Some(json!({"**/*.lock": false})),
        });

        let settings = ScopedSettings::from_config(&config);
        assert_eq!(
            settings.get(FILES_SETTING, Some(Path::new("/repo/Cargo.lock"))),
            Some(json!({"**/*.lock": false}))
        );
        assert_eq!(
            settings.get(FILES_SETTING, Some(Path::new("/elsewhere/Cargo.lock"))),
            Some(json!({"**/*.lock": true}))
        );
    }
}
