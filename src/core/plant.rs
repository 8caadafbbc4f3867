use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::date::parse_date_key;

/// A tracked plant: display name, legend color, and the set of days an
/// event (fertilization etc.) was marked.
///
/// `dates` is the persisted, ordered list matching the wire shape;
/// `date_index` is a derived set for O(1) membership and is rebuilt by
/// [`Plant::normalize`] after deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    pub id: String,
    pub name: String,
    /// Hex color string, "#RRGGBB".
    pub color: String,
    pub dates: Vec<String>,
    #[serde(skip)]
    date_index: HashSet<String>,
}

impl Plant {
    pub fn new(name: String, color: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            color,
            dates: Vec::new(),
            date_index: HashSet::new(),
        }
    }

    /// Whether an event is marked on the day identified by `key`.
    pub fn has_date(&self, key: &str) -> bool {
        self.date_index.contains(key)
    }

    /// Flip membership of `key` in the date set. Returns true if the key
    /// is present afterwards.
    pub fn toggle_date(&mut self, key: &str) -> bool {
        if self.date_index.remove(key) {
            self.dates.retain(|d| d != key);
            false
        } else {
            self.date_index.insert(key.to_string());
            self.dates.push(key.to_string());
            true
        }
    }

    /// Coerce a record loaded from disk or the wire into shape: drop keys
    /// that aren't canonical `YYYY-MM-DD`, dedup keeping first occurrence,
    /// and rebuild the membership index.
    pub fn normalize(&mut self) {
        self.date_index.clear();
        let mut kept = Vec::with_capacity(self.dates.len());
        for key in self.dates.drain(..) {
            if parse_date_key(&key).is_none() {
                log::debug!("Dropping malformed date key {:?} on plant {}", key, self.id);
                continue;
            }
            if self.date_index.insert(key.clone()) {
                kept.push(key);
            }
        }
        self.dates = kept;
    }
}
