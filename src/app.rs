use std::cell::Cell;
use std::rc::Rc;

use crate::element::{Element, ElementContent, Geometry, TextContent};
use crate::event::StoreEvent;
use crate::panels::{elements_panel, properties_panel, timeline_panel};
use crate::property::{PropertyKey, PropertyMap, PropertyValue, Rgba};
use crate::selection::SelectionState;
use crate::state::{DesignState, StoreConfig};
#[cfg(not(target_arch = "wasm32"))]
use crate::state::SnapshotStore;
use crate::store::DesignStore;
use crate::timeline::Phase;

const DESIGN_KEY: &str = "designer_timeline_design";
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_ENV: &str = "DESIGNER_TIMELINE_CONFIG";

/// The editor shell: a store, the UI selection, and the panels around them
pub struct DesignerApp {
    store: DesignStore,
    selection: SelectionState,
    /// Bumped by a store listener on every mutation
    revision: Rc<Cell<u64>>,
    saved_revision: u64,
    #[cfg(not(target_arch = "wasm32"))]
    snapshots: Option<SnapshotStore>,
}

impl Default for DesignerApp {
    fn default() -> Self {
        Self::with_state(DesignState::new(), DesignStore::new())
    }
}

impl DesignerApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let store = DesignStore::with_config(&load_config()).unwrap_or_else(|err| {
            log::warn!("Invalid store config, using defaults: {err}");
            DesignStore::new()
        });

        // Load the previous design, if any
        let state = cc
            .storage
            .and_then(|storage| eframe::get_value::<DesignState>(storage, DESIGN_KEY))
            .unwrap_or_default();

        Self::with_state(state, store)
    }

    fn with_state(state: DesignState, mut store: DesignStore) -> Self {
        if state.is_empty() {
            seed_demo(&mut store);
        } else {
            store.replace_state(state);
        }

        let revision = Rc::new(Cell::new(0));
        let counter = Rc::clone(&revision);
        store.subscribe(move |event: &StoreEvent, _: &DesignState| {
            log::trace!("Store changed: {event:?}");
            counter.set(counter.get() + 1);
        });

        Self {
            store,
            selection: SelectionState::new(),
            revision,
            saved_revision: 0,
            #[cfg(not(target_arch = "wasm32"))]
            snapshots: snapshot_dir().map(SnapshotStore::new),
        }
    }

    pub fn store(&self) -> &DesignStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn autosave(&mut self) {
        let revision = self.revision.get();
        if revision == self.saved_revision {
            return;
        }
        let Some(snapshots) = self.snapshots.as_mut() else {
            return;
        };
        match snapshots.try_autosave(&self.store) {
            Ok(true) => {
                log::info!("Autosaved design to {}", snapshots.dir().display());
                self.saved_revision = revision;
            }
            Ok(false) => {}
            Err(err) => log::error!("Autosave failed: {err}"),
        }
    }
}

impl eframe::App for DesignerApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, DESIGN_KEY, self.store.state());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match history_shortcut(ctx) {
            Some(HistoryStep::Undo) => {
                self.store.undo();
            }
            Some(HistoryStep::Redo) => {
                self.store.redo();
            }
            None => {}
        }
        self.selection.prune(self.store.state());

        elements_panel(ctx, &mut self.store, &mut self.selection);
        timeline_panel(ctx, &mut self.store, &mut self.selection);
        properties_panel(ctx, &mut self.store, &self.selection);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Designer");
            let state = self.store.state();
            ui.label(format!(
                "{} elements, {} animations, {} keyframes",
                state.elements().len(),
                state.animations().len(),
                state.keyframes().len(),
            ));
            ui.label(format!(
                "Phase: {}  Playhead: {} ms",
                self.selection.phase(),
                self.selection.playhead_ms()
            ));
            ui.label(format!(
                "History: {} undo, {} redo",
                self.store.history().undo_len(),
                self.store.history().redo_len()
            ));
        });

        #[cfg(not(target_arch = "wasm32"))]
        self.autosave();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryStep {
    Undo,
    Redo,
}

/// Cmd/Ctrl+Z and Cmd/Ctrl+Shift+Z. Ignored while a text field has focus, so
/// the field's own undo wins.
fn history_shortcut(ctx: &egui::Context) -> Option<HistoryStep> {
    if ctx.wants_keyboard_input() {
        return None;
    }
    ctx.input(|i| {
        if !i.modifiers.command || !i.key_pressed(egui::Key::Z) {
            None
        } else if i.modifiers.shift {
            Some(HistoryStep::Redo)
        } else {
            Some(HistoryStep::Undo)
        }
    })
}

/// Store tunables from the JSON file named by `DESIGNER_TIMELINE_CONFIG`,
/// or the defaults
#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> StoreConfig {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return StoreConfig::default();
    };
    match StoreConfig::load(&path) {
        Ok(config) => {
            log::info!("Loaded store config from {path}");
            config
        }
        Err(err) => {
            log::warn!("Could not load store config from {path}, using defaults: {err}");
            StoreConfig::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn load_config() -> StoreConfig {
    StoreConfig::default()
}

#[cfg(not(target_arch = "wasm32"))]
fn snapshot_dir() -> Option<std::path::PathBuf> {
    let dir = std::env::temp_dir().join("designer_timeline");
    match std::fs::create_dir_all(&dir) {
        Ok(()) => Some(dir),
        Err(err) => {
            log::warn!("Autosave disabled, cannot create {}: {err}", dir.display());
            None
        }
    }
}

/// A title fading in, so a fresh editor has something on the timeline
fn seed_demo(store: &mut DesignStore) {
    let title = Element::new(
        "Title",
        ElementContent::Text(TextContent {
            text: "Breaking news".to_owned(),
            ..Default::default()
        }),
    )
    .with_geometry(Geometry {
        x: 120.0,
        y: 80.0,
        ..Default::default()
    })
    .with_style(PropertyKey::Color, PropertyValue::Color(Rgba::WHITE))
    .with_style(PropertyKey::FontSize, PropertyValue::Number(48.0));
    let title_id = store.add_element(title);

    let result = store.add_animation(title_id, Phase::In).and_then(|animation_id| {
        let start = PropertyMap::from([(PropertyKey::Opacity, PropertyValue::Number(0.0))]);
        let end = PropertyMap::from([(PropertyKey::Opacity, PropertyValue::Number(1.0))]);
        store.add_keyframe(animation_id, 0, start)?;
        store.add_keyframe(animation_id, 100, end)
    });
    if let Err(err) = result {
        log::warn!("Could not seed demo animation: {err}");
    }
    // The seed is not an undoable edit
    let seeded = store.snapshot();
    store.replace_state(seeded);
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Event, Key, Modifiers, RawInput};

    fn press_command_z() -> RawInput {
        RawInput {
            modifiers: Modifiers::COMMAND,
            events: vec![Event::Key {
                key: Key::Z,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: Modifiers::COMMAND,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_undo_shortcut_yields_to_focused_text_field() {
        let ctx = egui::Context::default();
        let mut name = String::from("Title");
        let mut step = None;

        let _ = ctx.run(press_command_z(), |ctx| step = history_shortcut(ctx));
        assert_eq!(step, Some(HistoryStep::Undo));

        let _ = ctx.run(RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.text_edit_singleline(&mut name).request_focus();
            });
        });
        let _ = ctx.run(press_command_z(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.text_edit_singleline(&mut name);
            });
            step = history_shortcut(ctx);
        });
        assert_eq!(step, None);
    }
}
