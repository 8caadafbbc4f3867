pub mod local;
pub mod remote;

use crate::core::plant::Plant;
use local::LocalStore;
use remote::RemoteStore;

/// Persistence facade with two interchangeable backends behind one
/// load/create/update/delete contract.
///
/// Mutation calls are dispatched fire-and-forget from the update loop: the
/// in-memory registry is already mutated when these run, failures are
/// logged and never rolled back. The selected-plant slot stays local under
/// both backends; the REST resource has no selection endpoint.
#[derive(Clone)]
pub struct PlantStore {
    backend: Backend,
    local: LocalStore,
}

#[derive(Clone)]
enum Backend {
    Local,
    Remote(RemoteStore),
}

impl PlantStore {
    pub fn local(local: LocalStore) -> Self {
        Self {
            backend: Backend::Local,
            local,
        }
    }

    pub fn remote(remote: RemoteStore, local: LocalStore) -> Self {
        Self {
            backend: Backend::Remote(remote),
            local,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.backend, Backend::Remote(_))
    }

    /// Load the plant list and the remembered selection. A remote load
    /// failure is logged and yields an empty list; there is no retry.
    pub async fn load(&self) -> (Vec<Plant>, Option<String>) {
        let plants = match &self.backend {
            Backend::Local => self.local.load_plants(),
            Backend::Remote(remote) => match remote.list_plants().await {
                Ok(plants) => plants,
                Err(e) => {
                    log::error!("Failed to load plants from remote: {}", e);
                    Vec::new()
                }
            },
        };
        let selection = self.local.load_selection();
        (plants, selection)
    }

    /// Persist a freshly added plant. `snapshot` is the full post-mutation
    /// list, which the local backend writes as one blob.
    pub async fn plant_created(&self, plant: Plant, snapshot: Vec<Plant>) {
        match &self.backend {
            Backend::Local => self.local.save_plants(&snapshot),
            Backend::Remote(remote) => {
                if let Err(e) = remote.create_plant(&plant).await {
                    log::error!("Failed to create plant {:?} remotely: {}", plant.name, e);
                }
            }
        }
    }

    /// Persist a changed plant (full-record replace on the remote).
    pub async fn plant_updated(&self, plant: Plant, snapshot: Vec<Plant>) {
        match &self.backend {
            Backend::Local => self.local.save_plants(&snapshot),
            Backend::Remote(remote) => {
                if let Err(e) = remote.update_plant(&plant).await {
                    log::error!("Failed to update plant {:?} remotely: {}", plant.name, e);
                }
            }
        }
    }

    pub async fn plant_deleted(&self, id: String, snapshot: Vec<Plant>) {
        match &self.backend {
            Backend::Local => self.local.save_plants(&snapshot),
            Backend::Remote(remote) => {
                if let Err(e) = remote.delete_plant(&id).await {
                    log::error!("Failed to delete plant {} remotely: {}", id, e);
                }
            }
        }
    }

    /// Selection writes are synchronous; the slot is a tiny local file.
    pub fn selection_changed(&self, selected: Option<&str>) {
        self.local.save_selection(selected);
    }
}
