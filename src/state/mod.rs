mod config;
mod design;
mod persistence;

pub use config::{ConfigError, StoreConfig};
pub use design::DesignState;
pub use persistence::{
    DesignSnapshot,
    PersistenceError,
    PersistenceResult,
    SnapshotStore,
};
