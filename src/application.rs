use chrono::NaiveDate;

use crate::components::color_picker::{self, ColorPicker};
use crate::components::legend;
use crate::components::month_grid::{self, MonthGridState};
use crate::components::plants_bar::{self, PlantsBarState};
use crate::core::date::date_key;
use crate::core::plant::Plant;
use crate::core::registry::PlantRegistry;
use crate::message::{Message, PickerTarget};
use crate::store::PlantStore;

/// Top-level application state: the registry plus per-view state, mutated
/// only through [`Flourish::update`].
///
/// Every registry mutation is applied synchronously, then mirrored to the
/// store on a spawned task that is never awaited: failures are logged, not
/// rolled back. Rapid edits to one record can therefore complete
/// out of order on the backend; the last response to land wins there, and
/// that gap is deliberately left unresolved.
pub struct Flourish {
    pub registry: PlantRegistry,
    pub calendar: MonthGridState,
    pub plants_bar: PlantsBarState,
    pub picker: ColorPicker,
    picker_target: Option<PickerTarget>,
    store: PlantStore,
}

impl Flourish {
    pub fn new(store: PlantStore) -> Self {
        Self {
            registry: PlantRegistry::default(),
            calendar: MonthGridState::default(),
            plants_bar: PlantsBarState::default(),
            picker: ColorPicker::default(),
            picker_target: None,
            store,
        }
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::PrevMonth => self.calendar.prev_month(),
            Message::NextMonth => self.calendar.next_month(),
            Message::GoToday => {
                let today = chrono::Local::now().date_naive();
                self.calendar.go_today(today);
            }

            Message::ToggleDay(date) => {
                // Day clicks are inert without a selected plant
                let Some(id) = self.registry.selected_id().map(str::to_string) else {
                    return;
                };
                let key = date_key(date);
                if let Some(plant) = self.registry.toggle_day(&id, &key) {
                    let plant = plant.clone();
                    self.persist_update(plant);
                }
            }

            Message::AddNameChanged(name) => {
                self.plants_bar.add_form.name_input = name;
            }
            Message::AddColorChanged(color) => {
                self.plants_bar.add_form.color_input = color;
            }
            Message::AddSubmit => {
                let name = self.plants_bar.add_form.name_input.clone();
                let color = self.plants_bar.add_form.color_input.clone();
                if let Some(plant) = self.registry.add_plant(&name, &color) {
                    let plant = plant.clone();
                    self.plants_bar.clear_add_form();
                    self.reseed_edit();
                    self.persist_create(plant);
                    self.persist_selection();
                }
            }

            Message::SelectPlant(id) => {
                self.registry.select_plant(&id);
                self.reseed_edit();
                self.persist_selection();
            }
            Message::EditNameChanged(name) => self.plants_bar.edit_name(name),
            Message::EditColorChanged(color) => self.plants_bar.edit_color(color),
            Message::CommitEdit => {
                if let Some((id, name, color)) = self.plants_bar.take_commit() {
                    self.registry.rename_plant(&id, &name);
                    if let Some(plant) = self.registry.recolor_plant(&id, &color) {
                        let plant = plant.clone();
                        self.persist_update(plant);
                    }
                }
            }
            Message::DeleteSelected => {
                let Some(id) = self.registry.selected_id().map(str::to_string) else {
                    return;
                };
                if self.registry.delete_plant(&id) {
                    self.reseed_edit();
                    self.persist_delete(id);
                    self.persist_selection();
                }
            }

            Message::OpenColorPicker(target) => {
                let current = match target {
                    PickerTarget::AddForm => Some(self.plants_bar.add_form.color_input.clone()),
                    PickerTarget::EditBuffer => {
                        self.plants_bar.edit.as_ref().map(|e| e.color.clone())
                    }
                };
                if let Some(current) = current {
                    self.picker.open(&current);
                    self.picker_target = Some(target);
                }
            }
            Message::PickerInputChanged(text) => self.picker.input(&text),
            Message::PickerPreset(index) => self.picker.pick_preset(index),
            Message::PickerConfirm => {
                if let Some(color) = self.picker.confirm() {
                    match self.picker_target.take() {
                        Some(PickerTarget::AddForm) => {
                            self.plants_bar.add_form.color_input = color;
                        }
                        Some(PickerTarget::EditBuffer) => self.plants_bar.edit_color(color),
                        None => {}
                    }
                }
            }
            Message::PickerCancel => {
                self.picker.cancel();
                self.picker_target = None;
            }

            Message::PlantsLoaded(plants, selected) => {
                log::info!("Loaded {} plants", plants.len());
                self.registry = PlantRegistry::from_loaded(plants, selected);
                self.reseed_edit();
            }
        }
    }

    /// Re-derive the whole display from current state.
    pub fn render(&self, today: NaiveDate) -> String {
        let mut out = String::from("Flourish\n\n");
        out.push_str(&plants_bar::render(&self.plants_bar, &self.registry));

        let entries = legend::legend(&self.registry);
        if !entries.is_empty() {
            out.push('\n');
            out.push_str(&legend::render(&entries));
        }

        out.push('\n');
        let grid = month_grid::month_grid(&self.calendar, &self.registry, today);
        out.push_str(&month_grid::render(&grid));

        if self.picker.is_open() {
            out.push('\n');
            out.push_str(&color_picker::render(&self.picker));
        }
        out
    }

    fn reseed_edit(&mut self) {
        self.plants_bar.seed_edit(self.registry.selected_plant());
    }

    fn persist_create(&self, plant: Plant) {
        let store = self.store.clone();
        let snapshot = self.registry.plants().to_vec();
        tokio::spawn(async move {
            store.plant_created(plant, snapshot).await;
        });
    }

    fn persist_update(&self, plant: Plant) {
        let store = self.store.clone();
        let snapshot = self.registry.plants().to_vec();
        tokio::spawn(async move {
            store.plant_updated(plant, snapshot).await;
        });
    }

    fn persist_delete(&self, id: String) {
        let store = self.store.clone();
        let snapshot = self.registry.plants().to_vec();
        tokio::spawn(async move {
            store.plant_deleted(id, snapshot).await;
        });
    }

    fn persist_selection(&self) {
        self.store.selection_changed(self.registry.selected_id());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::local::LocalStore;
    use crate::store::remote::RemoteStore;

    fn local_app(dir: &std::path::Path) -> Flourish {
        let local = LocalStore::new(dir);
        local.ensure_dir().unwrap();
        Flourish::new(PlantStore::local(local))
    }

    fn add(app: &mut Flourish, name: &str, color: &str) -> String {
        app.update(Message::AddNameChanged(name.into()));
        app.update(Message::AddColorChanged(color.into()));
        app.update(Message::AddSubmit);
        app.registry.plants().last().unwrap().id.clone()
    }

    #[tokio::test]
    async fn add_basil_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = local_app(dir.path());

        add(&mut app, "Basil", "#34d399");

        assert_eq!(app.registry.plants().len(), 1);
        let plant = app.registry.selected_plant().unwrap();
        assert_eq!(plant.name, "Basil");
        assert_eq!(plant.color, "#34d399");
        assert!(plant.dates.is_empty());

        // Add form cleared, edit buffer seeded clean from the new plant
        assert!(app.plants_bar.add_form.name_input.is_empty());
        let edit = app.plants_bar.edit.as_ref().unwrap();
        assert_eq!(edit.name, "Basil");
        assert!(!edit.dirty);
    }

    #[tokio::test]
    async fn whitespace_add_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = local_app(dir.path());
        app.update(Message::AddNameChanged("   ".into()));
        app.update(Message::AddSubmit);
        assert!(app.registry.is_empty());
    }

    #[tokio::test]
    async fn toggle_requires_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = local_app(dir.path());
        let id = add(&mut app, "Fern", "#10b981");
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        // Clear selection, then toggling does nothing
        app.update(Message::SelectPlant(id.clone()));
        app.update(Message::ToggleDay(day));
        assert!(!app.registry.plant(&id).unwrap().has_date("2024-03-15"));

        // Select and toggle twice: mark appears then disappears
        app.update(Message::SelectPlant(id.clone()));
        app.update(Message::ToggleDay(day));
        assert!(app.registry.plant(&id).unwrap().has_date("2024-03-15"));
        app.update(Message::ToggleDay(day));
        assert!(!app.registry.plant(&id).unwrap().has_date("2024-03-15"));
    }

    #[tokio::test]
    async fn commit_is_gated_on_dirty() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = local_app(dir.path());
        let id = add(&mut app, "Basil", "#34d399");

        // Clean buffer: commit changes nothing
        app.update(Message::CommitEdit);
        assert_eq!(app.registry.plant(&id).unwrap().name, "Basil");

        app.update(Message::EditNameChanged("Sweet Basil".into()));
        app.update(Message::EditColorChanged("#f97316".into()));
        app.update(Message::CommitEdit);

        let plant = app.registry.plant(&id).unwrap();
        assert_eq!(plant.name, "Sweet Basil");
        assert_eq!(plant.color, "#f97316");
        assert!(!app.plants_bar.can_commit());
    }

    #[tokio::test]
    async fn delete_clears_selection_and_edit_panel() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = local_app(dir.path());
        add(&mut app, "Basil", "#34d399");

        app.update(Message::DeleteSelected);
        assert!(app.registry.is_empty());
        assert!(app.registry.selected_id().is_none());
        assert!(app.plants_bar.edit.is_none());

        // Without a selection, delete is inert
        app.update(Message::DeleteSelected);
    }

    #[tokio::test]
    async fn picker_confirm_routes_to_edit_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = local_app(dir.path());
        add(&mut app, "Basil", "#34d399");

        app.update(Message::OpenColorPicker(PickerTarget::EditBuffer));
        assert!(app.picker.is_open());
        app.update(Message::PickerInputChanged("abc".into()));
        app.update(Message::PickerConfirm);

        let edit = app.plants_bar.edit.as_ref().unwrap();
        assert_eq!(edit.color, "#aabbcc");
        assert!(edit.dirty);
        assert!(!app.picker.is_open());
    }

    #[tokio::test]
    async fn optimistic_add_survives_remote_failure() {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalStore::new(dir.path());
        local.ensure_dir().unwrap();
        // Nothing listens here: every call fails at the transport level
        let remote = RemoteStore::new("http://127.0.0.1:9").unwrap();
        let mut app = Flourish::new(PlantStore::remote(remote, local));

        add(&mut app, "Basil", "#34d399");
        assert_eq!(app.registry.plants().len(), 1);

        // Give the background create time to fail; no rollback happens
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        assert_eq!(app.registry.plants().len(), 1);
        assert_eq!(app.registry.plants()[0].name, "Basil");
    }

    #[tokio::test]
    async fn loaded_plants_restore_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = local_app(dir.path());

        let plant = Plant::new("Aloe".into(), "#22d3ee".into());
        let id = plant.id.clone();
        app.update(Message::PlantsLoaded(vec![plant], Some(id.clone())));

        assert_eq!(app.registry.selected_id(), Some(id.as_str()));
        assert_eq!(app.plants_bar.edit.as_ref().unwrap().name, "Aloe");
    }
}
