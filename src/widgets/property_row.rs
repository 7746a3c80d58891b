use egui::{Color32, DragValue, Response, Ui};

use crate::control::PropertyControl;
use crate::property::{PropertyKey, PropertyValue, Rgba};
use crate::resolver::ControlMode;
use crate::store::DesignStore;
use super::KeyframeToggle;

/// One grid row: label, value editor and keyframe toggle.
/// Must be called inside an `egui::Grid` with three columns.
pub fn property_row(ui: &mut Ui, control: &mut PropertyControl<'_>, store: &mut DesignStore) {
    let key = control.key();
    let indicator = control.indicator(store);
    let keyed_here = control.mode(store) == ControlMode::Keyframed;

    ui.label(control.display_label());
    control.render(store, |value, on_change| value_editor(ui, key, value, on_change));

    let can_key = control.can_key(store);
    let hover = if keyed_here {
        "Keyed on the selected keyframe"
    } else if can_key {
        "Add keyframe at playhead"
    } else {
        "Nothing to key yet"
    };
    if ui
        .add(KeyframeToggle::new(indicator, keyed_here).enabled(can_key))
        .on_hover_text(hover)
        .clicked()
    {
        control.add_keyframe_at_playhead(store);
    }
    ui.end_row();
}

/// Draws the editor for a single value and forwards edits to `on_change`
pub fn value_editor(
    ui: &mut Ui,
    key: PropertyKey,
    value: Option<PropertyValue>,
    on_change: &mut dyn FnMut(PropertyValue),
) -> Response {
    match value {
        Some(PropertyValue::Number(mut number)) => {
            let mut drag = DragValue::new(&mut number);
            if let Some(range) = key.number_range() {
                drag = drag.range(range.min..=range.max).speed(range.step);
            }
            let response = ui.add(drag);
            if response.changed() {
                on_change(PropertyValue::Number(number));
            }
            response
        }
        Some(PropertyValue::Color(color)) => {
            let mut edited = Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a);
            let response = ui.color_edit_button_srgba(&mut edited);
            if response.changed() {
                let [r, g, b, a] = edited.to_srgba_unmultiplied();
                on_change(PropertyValue::Color(Rgba::new(r, g, b, a)));
            }
            response
        }
        None => ui.weak("n/a"),
    }
}
