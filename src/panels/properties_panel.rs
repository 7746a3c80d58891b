use egui;

use crate::control::PropertyControl;
use crate::element::ElementPatch;
use crate::ids::ElementId;
use crate::property::{PropertyKey, PropertyNamespace};
use crate::selection::SelectionState;
use crate::store::DesignStore;
use crate::widgets::property_row;

/// Right panel: every editable property of the primary selected element
pub fn properties_panel(ctx: &egui::Context, store: &mut DesignStore, selection: &SelectionState) {
    egui::SidePanel::right("properties_panel")
        .resizable(true)
        .default_width(280.0)
        .show(ctx, |ui| {
            ui.heading("Properties");

            let Some(element_id) = selection.primary_element() else {
                ui.weak("Select an element");
                return;
            };
            let Some(element) = store.element(element_id) else {
                ui.weak("Element was deleted");
                return;
            };

            let mut name = element.name.clone();
            let mut visible = element.visible;
            let mut locked = element.locked;
            let kind = element.content.kind();
            let keys: Vec<PropertyKey> = element.editable_properties().collect();

            ui.horizontal(|ui| {
                ui.label(format!("{kind}"));
                if ui.text_edit_singleline(&mut name).lost_focus() {
                    update(store, element_id, ElementPatch {
                        name: Some(name.clone()),
                        ..Default::default()
                    });
                }
            });
            ui.horizontal(|ui| {
                if ui.checkbox(&mut visible, "Visible").changed() {
                    update(store, element_id, ElementPatch {
                        visible: Some(visible),
                        ..Default::default()
                    });
                }
                if ui.checkbox(&mut locked, "Locked").changed() {
                    update(store, element_id, ElementPatch {
                        locked: Some(locked),
                        ..Default::default()
                    });
                }
            });
            if locked {
                ui.weak("Element is locked");
                return;
            }

            if let Some(keyframe) = selection.selected_keyframe().and_then(|id| store.keyframe(id)) {
                ui.label(format!("Editing keyframe at {}", keyframe.position));
            } else {
                ui.label("Editing static values");
            }
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                section(ui, "Transform", "geometry_grid", &keys, store, selection, element_id, |ns| {
                    ns == PropertyNamespace::Geometry
                });
                section(ui, "Style", "style_grid", &keys, store, selection, element_id, |ns| {
                    ns == PropertyNamespace::Style
                });
                section(ui, "Content", "content_grid", &keys, store, selection, element_id, |ns| {
                    matches!(ns, PropertyNamespace::Content(_))
                });
            });

            ui.separator();
            if ui.button("Delete element").clicked() {
                if let Err(err) = store.remove_element(element_id) {
                    log::warn!("Could not delete element {element_id}: {err}");
                }
            }
        });
}

#[allow(clippy::too_many_arguments)]
fn section(
    ui: &mut egui::Ui,
    title: &str,
    grid_id: &str,
    keys: &[PropertyKey],
    store: &mut DesignStore,
    selection: &SelectionState,
    element_id: ElementId,
    filter: impl Fn(PropertyNamespace) -> bool,
) {
    let keys: Vec<PropertyKey> = keys.iter().copied().filter(|key| filter(key.namespace())).collect();
    if keys.is_empty() {
        return;
    }
    egui::CollapsingHeader::new(title)
        .default_open(true)
        .show(ui, |ui| {
            egui::Grid::new(grid_id)
                .num_columns(3)
                .spacing([12.0, 4.0])
                .striped(true)
                .show(ui, |ui| {
                    for key in keys {
                        let mut control = PropertyControl::new(key, element_id, selection);
                        property_row(ui, &mut control, store);
                    }
                });
        });
}

fn update(store: &mut DesignStore, element_id: ElementId, patch: ElementPatch) {
    if let Err(err) = store.update_element(element_id, patch) {
        log::warn!("Could not update element {element_id}: {err}");
    }
}
