use egui;

use crate::element::{ContentKind, Element, ElementContent};
use crate::selection::SelectionState;
use crate::store::DesignStore;

/// Left panel: element list, element creation, undo/redo
pub fn elements_panel(ctx: &egui::Context, store: &mut DesignStore, selection: &mut SelectionState) {
    egui::SidePanel::left("elements_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Elements");

            ui.horizontal(|ui| {
                if ui.add_enabled(store.can_undo(), egui::Button::new("Undo")).clicked() {
                    store.undo();
                    selection.prune(store.state());
                }
                if ui.add_enabled(store.can_redo(), egui::Button::new("Redo")).clicked() {
                    store.redo();
                    selection.prune(store.state());
                }
            });

            ui.menu_button("Add element", |ui| {
                for kind in ContentKind::ALL {
                    if ui.button(kind.to_string()).clicked() {
                        let count = store.state().elements().len();
                        let element = Element::new(format!("{kind} {}", count + 1), ElementContent::default_for(kind))
                            .with_z_index(count as i32);
                        let element_id = store.add_element(element);
                        log::info!("Added {kind} element {element_id}");
                        selection.select_element(element_id);
                        ui.close_menu();
                    }
                }
            });
            ui.separator();

            // Front-most first, like a layer list
            let rows: Vec<_> = store
                .state()
                .elements_by_z()
                .into_iter()
                .rev()
                .map(|element| (element.id, element.name.clone(), element.content.kind(), element.visible))
                .collect();

            egui::ScrollArea::vertical().show(ui, |ui| {
                for (element_id, name, kind, visible) in rows {
                    let text = if visible { name } else { format!("{name} (hidden)") };
                    let response = ui
                        .selectable_label(selection.is_selected(element_id), text)
                        .on_hover_text(kind.to_string());
                    if response.clicked() {
                        if ui.input(|i| i.modifiers.shift) {
                            selection.toggle_element(element_id);
                        } else {
                            selection.select_element(element_id);
                        }
                    }
                }
            });
        });
}
