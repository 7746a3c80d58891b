#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod control;
pub mod element;
pub mod error;
pub mod event;
pub mod ids;
pub mod panels;
pub mod property;
pub mod resolver;
pub mod selection;
pub mod state;
pub mod store;
pub mod timeline;
pub mod util;
pub mod widgets;

pub use app::DesignerApp;
pub use control::{KeyframeIndicator, PropertyControl};
pub use element::{ContentKind, Element, ElementContent, ElementPatch, Geometry};
pub use error::{EntityKind, PropertyError, StoreError, StoreResult};
pub use event::{StoreEvent, StoreListener, SubscriptionId};
pub use ids::{AnimationId, ElementId, KeyframeId};
pub use property::{PropertyKey, PropertyMap, PropertyValue, Rgba};
pub use resolver::{ControlMode, PropertyResolution, WriteTarget, resolve};
pub use selection::SelectionState;
pub use state::{DesignSnapshot, DesignState, SnapshotStore, StoreConfig};
pub use store::DesignStore;
pub use timeline::{Animation, AnimationDuration, Keyframe, KeyframePosition, Phase, position_at};
