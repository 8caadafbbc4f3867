use crate::core::plant::Plant;
use crate::core::registry::PlantRegistry;

/// Color preloaded into the add form (emerald-400).
pub const DEFAULT_COLOR: &str = "#34d399";

/// Draft for the add form. The name clears after a successful add; the
/// color draft carries over to the next plant.
#[derive(Debug, Clone)]
pub struct AddForm {
    pub name_input: String,
    pub color_input: String,
}

impl Default for AddForm {
    fn default() -> Self {
        Self {
            name_input: String::new(),
            color_input: DEFAULT_COLOR.to_string(),
        }
    }
}

/// Transient edit state for the selected plant. `dirty` gates the Update
/// action and clears once the buffer is committed.
#[derive(Debug, Clone)]
pub struct EditBuffer {
    pub plant_id: String,
    pub name: String,
    pub color: String,
    pub dirty: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PlantsBarState {
    pub add_form: AddForm,
    pub edit: Option<EditBuffer>,
}

impl PlantsBarState {
    /// Reset the edit buffer from the current selection. Called on every
    /// selection change; any uncommitted edits are discarded.
    pub fn seed_edit(&mut self, selected: Option<&Plant>) {
        self.edit = selected.map(|plant| EditBuffer {
            plant_id: plant.id.clone(),
            name: plant.name.clone(),
            color: plant.color.clone(),
            dirty: false,
        });
    }

    pub fn edit_name(&mut self, name: String) {
        if let Some(edit) = &mut self.edit {
            edit.name = name;
            edit.dirty = true;
        }
    }

    pub fn edit_color(&mut self, color: String) {
        if let Some(edit) = &mut self.edit {
            edit.color = color;
            edit.dirty = true;
        }
    }

    pub fn can_commit(&self) -> bool {
        self.edit.as_ref().is_some_and(|e| e.dirty)
    }

    /// Hand out the buffered (id, name, color) for committing and clear the
    /// dirty flag. `None` while the buffer is clean.
    pub fn take_commit(&mut self) -> Option<(String, String, String)> {
        let edit = self.edit.as_mut().filter(|e| e.dirty)?;
        edit.dirty = false;
        Some((edit.plant_id.clone(), edit.name.clone(), edit.color.clone()))
    }

    pub fn clear_add_form(&mut self) {
        self.add_form.name_input.clear();
    }
}

pub fn render(state: &PlantsBarState, registry: &PlantRegistry) -> String {
    let mut out = String::new();
    if registry.is_empty() {
        out.push_str("  (no plants yet — `add <name>` to start)\n");
        return out;
    }

    for (i, plant) in registry.plants().iter().enumerate() {
        let marker = if registry.selected_id() == Some(plant.id.as_str()) {
            '>'
        } else {
            ' '
        };
        out.push_str(&format!(
            " {}{}. {} {} ({} days)\n",
            marker,
            i + 1,
            plant.color,
            plant.name,
            plant.dates.len()
        ));
    }

    if let Some(edit) = &state.edit {
        let gate = if edit.dirty { "update ready" } else { "no changes" };
        out.push_str(&format!(
            "  editing: {} {} [{}]\n",
            edit.color, edit.name, gate
        ));
    }
    out
}
