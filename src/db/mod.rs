pub mod models;
pub mod repositories;

use std::sync::Arc;

use repositories::SpaceStore;

/// Store handle shared by every request; built once at startup.
pub type DbStore = Arc<dyn SpaceStore>;
