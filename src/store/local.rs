use std::path::{Path, PathBuf};

use crate::core::plant::Plant;

/// Durable local storage: the whole plant list as one JSON blob plus a
/// second slot remembering the selected plant across sessions.
#[derive(Debug, Clone)]
pub struct LocalStore {
    plants_path: PathBuf,
    selection_path: PathBuf,
}

impl LocalStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            plants_path: data_dir.join("plants.json"),
            selection_path: data_dir.join("selection.json"),
        }
    }

    /// Create the data directory if it doesn't exist yet.
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(dir) = self.plants_path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Missing or malformed content is "no data", never an error.
    pub fn load_plants(&self) -> Vec<Plant> {
        match std::fs::read_to_string(&self.plants_path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    pub fn save_plants(&self, plants: &[Plant]) {
        match serde_json::to_string_pretty(plants) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.plants_path, json) {
                    log::error!("Failed to save plants: {}", e);
                }
            }
            Err(e) => log::error!("Failed to serialize plants: {}", e),
        }
    }

    pub fn load_selection(&self) -> Option<String> {
        let content = std::fs::read_to_string(&self.selection_path).ok()?;
        serde_json::from_str(&content).ok()?
    }

    pub fn save_selection(&self, selected: Option<&str>) {
        match serde_json::to_string(&selected) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.selection_path, json) {
                    log::error!("Failed to save selection: {}", e);
                }
            }
            Err(e) => log::error!("Failed to serialize selection: {}", e),
        }
    }
}
