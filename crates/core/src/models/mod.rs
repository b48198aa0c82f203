pub mod item;
pub mod item_set;
pub mod progress;
pub mod settings;
pub mod snapshot;
