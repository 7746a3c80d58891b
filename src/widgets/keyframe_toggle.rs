use egui::{Color32, Pos2, Response, Sense, Shape, Stroke, Ui, Widget};

use crate::control::KeyframeIndicator;

/// Diamond button that keys a property at the playhead.
///
/// Highlighted when the current track animates the property anywhere. Ringed
/// when the selected keyframe holds the property. The two are independent.
pub struct KeyframeToggle {
    indicator: KeyframeIndicator,
    keyed_at_selection: bool,
    enabled: bool,
}

impl KeyframeToggle {
    pub fn new(indicator: KeyframeIndicator, keyed_at_selection: bool) -> Self {
        Self {
            indicator,
            keyed_at_selection,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Widget for KeyframeToggle {
    fn ui(self, ui: &mut Ui) -> Response {
        let size = egui::vec2(18.0, 18.0);
        let sense = if self.enabled { Sense::click() } else { Sense::hover() };
        let (rect, response) = ui.allocate_exact_size(size, sense);

        if ui.is_rect_visible(rect) {
            let fill = match self.indicator {
                KeyframeIndicator::Animated => Color32::from_rgb(255, 183, 77), // Amber when animated
                KeyframeIndicator::Static if response.hovered() => Color32::from_gray(90),
                KeyframeIndicator::Static => Color32::from_gray(50),
            };
            let outline = if self.enabled {
                Color32::from_gray(160)
            } else {
                Color32::from_gray(80)
            };

            let center = rect.center();
            let r = rect.width() * 0.35;
            let diamond = vec![
                Pos2::new(center.x, center.y - r),
                Pos2::new(center.x + r, center.y),
                Pos2::new(center.x, center.y + r),
                Pos2::new(center.x - r, center.y),
            ];
            ui.painter()
                .add(Shape::convex_polygon(diamond, fill, Stroke::new(1.0, outline)));

            if self.keyed_at_selection {
                ui.painter()
                    .circle_stroke(center, r + 3.0, Stroke::new(1.5, Color32::WHITE));
            }
        }

        response
    }
}
