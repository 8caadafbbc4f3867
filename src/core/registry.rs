use super::plant::Plant;

/// Ordered collection of plants plus the current selection. The sole
/// mutation surface for plant state; views re-derive their display from it
/// after every change.
#[derive(Debug, Clone, Default)]
pub struct PlantRegistry {
    plants: Vec<Plant>,
    selected: Option<String>,
}

impl PlantRegistry {
    /// Build a registry from loaded records, normalizing each and restoring
    /// a remembered selection if it still resolves.
    pub fn from_loaded(mut plants: Vec<Plant>, selected: Option<String>) -> Self {
        for plant in &mut plants {
            plant.normalize();
        }
        let selected = selected.filter(|id| plants.iter().any(|p| p.id == *id));
        Self { plants, selected }
    }

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    pub fn plant(&self, id: &str) -> Option<&Plant> {
        self.plants.iter().find(|p| p.id == id)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_plant(&self) -> Option<&Plant> {
        self.selected.as_deref().and_then(|id| self.plant(id))
    }

    /// Add a plant and select it. A trimmed-empty name is a no-op.
    pub fn add_plant(&mut self, name: &str, color: &str) -> Option<&Plant> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let plant = Plant::new(name.to_string(), color.to_string());
        self.selected = Some(plant.id.clone());
        self.plants.push(plant);
        self.plants.last()
    }

    /// Flip an event mark on the given plant. Returns the updated record
    /// for persistence, or `None` if the id doesn't resolve.
    pub fn toggle_day(&mut self, plant_id: &str, key: &str) -> Option<&Plant> {
        let plant = self.plants.iter_mut().find(|p| p.id == plant_id)?;
        plant.toggle_date(key);
        Some(plant)
    }

    pub fn rename_plant(&mut self, id: &str, name: &str) -> Option<&Plant> {
        let plant = self.plants.iter_mut().find(|p| p.id == id)?;
        plant.name = name.to_string();
        Some(plant)
    }

    pub fn recolor_plant(&mut self, id: &str, color: &str) -> Option<&Plant> {
        let plant = self.plants.iter_mut().find(|p| p.id == id)?;
        plant.color = color.to_string();
        Some(plant)
    }

    /// Remove a plant. Clears the selection if it pointed at the removed
    /// record. Returns whether anything was removed.
    pub fn delete_plant(&mut self, id: &str) -> bool {
        let before = self.plants.len();
        self.plants.retain(|p| p.id != id);
        if self.plants.len() == before {
            return false;
        }
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        true
    }

    /// Toggle selection: selecting the already-selected plant clears it.
    pub fn select_plant(&mut self, id: &str) {
        if self.plant(id).is_none() {
            return;
        }
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        } else {
            self.selected = Some(id.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_selects_new_plant() {
        let mut registry = PlantRegistry::default();
        let id = registry.add_plant("Basil", "#34d399").unwrap().id.clone();

        assert_eq!(registry.plants().len(), 1);
        let plant = registry.selected_plant().unwrap();
        assert_eq!(plant.id, id);
        assert_eq!(plant.name, "Basil");
        assert_eq!(plant.color, "#34d399");
        assert!(plant.dates.is_empty());
    }

    #[test]
    fn add_rejects_whitespace_name() {
        let mut registry = PlantRegistry::default();
        assert!(registry.add_plant("   ", "#34d399").is_none());
        assert!(registry.is_empty());
        assert!(registry.selected_id().is_none());
    }

    #[test]
    fn add_trims_name() {
        let mut registry = PlantRegistry::default();
        let plant = registry.add_plant("  Monstera  ", "#eab308").unwrap();
        assert_eq!(plant.name, "Monstera");
    }

    #[test]
    fn select_twice_clears_selection() {
        let mut registry = PlantRegistry::default();
        let id = registry.add_plant("Fern", "#10b981").unwrap().id.clone();
        // add_plant selected it; clear first so we start unselected
        registry.select_plant(&id);
        assert!(registry.selected_id().is_none());

        registry.select_plant(&id);
        assert_eq!(registry.selected_id(), Some(id.as_str()));
        registry.select_plant(&id);
        assert!(registry.selected_id().is_none());
    }

    #[test]
    fn select_unknown_id_is_noop() {
        let mut registry = PlantRegistry::default();
        let id = registry.add_plant("Fern", "#10b981").unwrap().id.clone();
        registry.select_plant("nope");
        assert_eq!(registry.selected_id(), Some(id.as_str()));
    }

    #[test]
    fn toggle_day_round_trip() {
        let mut registry = PlantRegistry::default();
        let id = registry.add_plant("Fern", "#10b981").unwrap().id.clone();

        registry.toggle_day(&id, "2024-03-15").unwrap();
        assert!(registry.plant(&id).unwrap().has_date("2024-03-15"));

        registry.toggle_day(&id, "2024-03-15").unwrap();
        assert!(!registry.plant(&id).unwrap().has_date("2024-03-15"));
        assert!(registry.plant(&id).unwrap().dates.is_empty());
    }

    #[test]
    fn toggle_day_unknown_plant_is_noop() {
        let mut registry = PlantRegistry::default();
        registry.add_plant("Fern", "#10b981");
        assert!(registry.toggle_day("nope", "2024-03-15").is_none());
    }

    #[test]
    fn delete_selected_clears_selection() {
        let mut registry = PlantRegistry::default();
        let basil = registry.add_plant("Basil", "#34d399").unwrap().id.clone();
        let fern = registry.add_plant("Fern", "#10b981").unwrap().id.clone();

        // fern is selected (most recently added)
        assert!(registry.delete_plant(&fern));
        assert!(registry.selected_id().is_none());
        assert_eq!(registry.plants().len(), 1);
        assert_eq!(registry.plants()[0].id, basil);
    }

    #[test]
    fn delete_unselected_keeps_selection() {
        let mut registry = PlantRegistry::default();
        let basil = registry.add_plant("Basil", "#34d399").unwrap().id.clone();
        let fern = registry.add_plant("Fern", "#10b981").unwrap().id.clone();

        assert!(registry.delete_plant(&basil));
        assert_eq!(registry.selected_id(), Some(fern.as_str()));
    }

    #[test]
    fn rename_and_recolor() {
        let mut registry = PlantRegistry::default();
        let id = registry.add_plant("Basil", "#34d399").unwrap().id.clone();

        registry.rename_plant(&id, "Sweet Basil").unwrap();
        registry.recolor_plant(&id, "#f97316").unwrap();

        let plant = registry.plant(&id).unwrap();
        assert_eq!(plant.name, "Sweet Basil");
        assert_eq!(plant.color, "#f97316");
    }

    #[test]
    fn from_loaded_restores_valid_selection_only() {
        let plants = vec![Plant::new("A".into(), "#111111".into())];
        let id = plants[0].id.clone();

        let registry = PlantRegistry::from_loaded(plants.clone(), Some(id.clone()));
        assert_eq!(registry.selected_id(), Some(id.as_str()));

        let registry = PlantRegistry::from_loaded(plants, Some("gone".into()));
        assert!(registry.selected_id().is_none());
    }
}
