use egui;

use crate::selection::SelectionState;
use crate::store::DesignStore;
use crate::timeline::{AnimationDuration, AnimationPatch, Phase, playhead_for, position_at};

const MARKER_SIZE: f32 = 18.0;

/// Bottom panel: phase, playhead, and the keyframe track of the primary
/// selected element
pub fn timeline_panel(ctx: &egui::Context, store: &mut DesignStore, selection: &mut SelectionState) {
    egui::TopBottomPanel::bottom("timeline_panel")
        .resizable(true)
        .min_height(120.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Timeline");
                ui.separator();
                for phase in Phase::ALL {
                    if ui.selectable_label(selection.phase() == phase, phase.label()).clicked() {
                        selection.set_phase(phase);
                    }
                }
            });

            let Some(element_id) = selection.primary_element() else {
                ui.weak("Select an element to animate it");
                return;
            };

            let animation = store
                .animation_for(element_id, selection.phase())
                .map(|animation| (animation.id, animation.duration.as_millis(), animation.delay, animation.end_ms()));

            // The playhead spans the current track, or the default duration before one exists
            let end_ms = animation.map_or(store.default_duration().as_millis(), |(_, _, _, end)| end);
            let mut playhead = selection.playhead_ms().min(end_ms);
            ui.horizontal(|ui| {
                ui.label("Playhead");
                if ui
                    .add(egui::Slider::new(&mut playhead, 0..=end_ms).suffix(" ms"))
                    .changed()
                {
                    selection.set_playhead(playhead);
                }
            });

            let Some((animation_id, duration_ms, delay_ms, _)) = animation else {
                ui.weak(format!("No {} animation yet. Key a property to create one.", selection.phase()));
                return;
            };

            ui.horizontal(|ui| {
                let mut duration = duration_ms;
                let mut delay = delay_ms;
                ui.label("Duration");
                let duration_changed = ui
                    .add(egui::DragValue::new(&mut duration).range(1..=600_000).speed(10.0).suffix(" ms"))
                    .changed();
                ui.label("Delay");
                let delay_changed = ui
                    .add(egui::DragValue::new(&mut delay).range(0..=600_000).speed(10.0).suffix(" ms"))
                    .changed();

                if duration_changed || delay_changed {
                    let patch = match AnimationDuration::new(duration) {
                        Ok(duration) => AnimationPatch {
                            duration: duration_changed.then_some(duration),
                            delay: delay_changed.then_some(delay),
                        },
                        Err(err) => {
                            log::warn!("Ignoring duration edit: {err}");
                            return;
                        }
                    };
                    if let Err(err) = store.update_animation(animation_id, patch) {
                        log::warn!("Could not update animation {animation_id}: {err}");
                    }
                }
            });

            let markers: Vec<_> = store
                .keyframes_for(animation_id)
                .into_iter()
                .map(|keyframe| (keyframe.id, keyframe.position, keyframe.properties.len()))
                .collect();

            let (track_rect, _) = ui.allocate_exact_size(
                egui::vec2(ui.available_width(), MARKER_SIZE + 8.0),
                egui::Sense::hover(),
            );
            ui.painter()
                .rect_filled(track_rect, 2.0, ui.visuals().extreme_bg_color);

            let usable = (track_rect.width() - MARKER_SIZE).max(1.0);
            if let Some(animation) = store.animation(animation_id) {
                let local = position_at(selection.playhead_ms(), animation);
                let x = track_rect.left() + MARKER_SIZE / 2.0 + usable * local.fraction() as f32;
                ui.painter().line_segment(
                    [egui::pos2(x, track_rect.top()), egui::pos2(x, track_rect.bottom())],
                    egui::Stroke::new(1.0, egui::Color32::LIGHT_RED),
                );
            }

            for (keyframe_id, position, count) in &markers {
                let center = egui::pos2(
                    track_rect.left() + MARKER_SIZE / 2.0 + usable * position.fraction() as f32,
                    track_rect.center().y,
                );
                let rect = egui::Rect::from_center_size(center, egui::vec2(MARKER_SIZE, MARKER_SIZE));
                let selected = selection.selected_keyframe() == Some(*keyframe_id);
                let response = ui
                    .put(rect, egui::SelectableLabel::new(selected, "◆"))
                    .on_hover_text(format!("{position} ({count} properties)"));
                if response.clicked() {
                    if selected {
                        selection.deselect_keyframe();
                    } else {
                        selection.select_keyframe(*keyframe_id);
                        if let Some(animation) = store.animation(animation_id) {
                            selection.set_playhead(playhead_for(*position, animation));
                        }
                    }
                }
            }

            ui.horizontal(|ui| {
                let selected = selection
                    .selected_keyframe()
                    .filter(|id| markers.iter().any(|(marker, _, _)| marker == id));
                if ui
                    .add_enabled(selected.is_some(), egui::Button::new("Delete keyframe"))
                    .clicked()
                {
                    if let Some(keyframe_id) = selected {
                        match store.remove_keyframe(keyframe_id) {
                            Ok(()) => selection.deselect_keyframe(),
                            Err(err) => log::warn!("Could not delete keyframe {keyframe_id}: {err}"),
                        }
                    }
                }
                if ui
                    .add_enabled(selected.is_some(), egui::Button::new("Edit static values"))
                    .clicked()
                {
                    selection.deselect_keyframe();
                }
                if ui.button("Delete animation").clicked() {
                    if let Err(err) = store.remove_animation(animation_id) {
                        log::warn!("Could not delete animation {animation_id}: {err}");
                    }
                }
            });
        });
}
