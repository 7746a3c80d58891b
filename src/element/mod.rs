use serde::{Deserialize, Serialize};

mod content;

pub use content::{
    ChartContent, ChartPoint, ChartType, ContentKind, ElementContent, IconContent, ImageContent,
    ImageFit, MapContent, MapMarker, ShapeContent, ShapeKind, SvgContent, TableContent,
    TextAlign, TextContent, TickerContent, TopicBadgeContent, VideoContent,
};

use crate::error::PropertyError;
use crate::ids::ElementId;
use crate::property::{PropertyKey, PropertyMap, PropertyNamespace, PropertyValue};

/// Position, size and transform of an element on the composition canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    /// `None` means the size follows the content
    pub width: Option<f64>,
    pub height: Option<f64>,
    /// Rotation in degrees
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Pivot for rotation and scale, in [0, 1] of the element's box
    pub anchor_x: f64,
    pub anchor_y: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: None,
            height: None,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            anchor_x: 0.5,
            anchor_y: 0.5,
        }
    }
}

impl Geometry {
    fn is_auto_sized(&self, key: PropertyKey) -> bool {
        match key {
            PropertyKey::Width => self.width.is_none(),
            PropertyKey::Height => self.height.is_none(),
            _ => false,
        }
    }

    fn property(&self, key: PropertyKey) -> Option<f64> {
        let value = match key {
            PropertyKey::X => self.x,
            PropertyKey::Y => self.y,
            // Auto-sized elements report 0 until the renderer measures them
            PropertyKey::Width => self.width.unwrap_or(0.0),
            PropertyKey::Height => self.height.unwrap_or(0.0),
            PropertyKey::Rotation => self.rotation,
            PropertyKey::ScaleX => self.scale_x,
            PropertyKey::ScaleY => self.scale_y,
            PropertyKey::AnchorX => self.anchor_x,
            PropertyKey::AnchorY => self.anchor_y,
            _ => return None,
        };
        Some(value)
    }

    fn set_property(&mut self, key: PropertyKey, value: f64) -> bool {
        match key {
            PropertyKey::X => self.x = value,
            PropertyKey::Y => self.y = value,
            PropertyKey::Width => self.width = Some(value),
            PropertyKey::Height => self.height = Some(value),
            PropertyKey::Rotation => self.rotation = value,
            PropertyKey::ScaleX => self.scale_x = value,
            PropertyKey::ScaleY => self.scale_y = value,
            PropertyKey::AnchorX => self.anchor_x = value,
            PropertyKey::AnchorY => self.anchor_y = value,
            _ => return false,
        }
        true
    }
}

/// A visual object in a design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub name: String,
    /// Sparse style values. Absent keys read as the key's default.
    pub styles: PropertyMap,
    pub content: ElementContent,
    pub geometry: Geometry,
    pub z_index: i32,
    pub visible: bool,
    pub locked: bool,
}

impl Element {
    pub fn new(name: impl Into<String>, content: ElementContent) -> Self {
        Self {
            id: ElementId::new(),
            name: name.into(),
            styles: PropertyMap::new(),
            content,
            geometry: Geometry::default(),
            z_index: 0,
            visible: true,
            locked: false,
        }
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Sets a static style value. Keys outside the style namespace are ignored.
    pub fn with_style(mut self, key: PropertyKey, value: PropertyValue) -> Self {
        if key.namespace() == PropertyNamespace::Style && key.check_kind(&value).is_ok() {
            self.styles.insert(key, value);
        } else {
            log::warn!("Ignoring {key} = {value} as a style of element {}", self.name);
        }
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Reads the static value of a property, dispatching on its namespace.
    /// Returns `None` if the key does not apply to this element's content.
    pub fn property(&self, key: PropertyKey) -> Option<PropertyValue> {
        match key.namespace() {
            PropertyNamespace::Geometry => self.geometry.property(key).map(PropertyValue::Number),
            PropertyNamespace::Style => Some(
                self.styles
                    .get(&key)
                    .copied()
                    .unwrap_or_else(|| key.default_value()),
            ),
            PropertyNamespace::Content(_) => self.content.property(key),
        }
    }

    /// Writes the static value of a property, dispatching on its namespace
    pub fn set_property(&mut self, key: PropertyKey, value: PropertyValue) -> Result<(), PropertyError> {
        let value = key.sanitize(value)?;
        match key.namespace() {
            PropertyNamespace::Geometry => {
                let applied = value
                    .as_number()
                    .is_some_and(|n| self.geometry.set_property(key, n));
                debug_assert!(applied, "geometry key {key} has no slot");
                Ok(())
            }
            PropertyNamespace::Style => {
                self.styles.insert(key, value);
                Ok(())
            }
            PropertyNamespace::Content(_) => self.content.set_property(key, value),
        }
    }

    /// True for a width or height that still follows the content. Its
    /// displayed 0 is a placeholder, so it cannot be keyed.
    pub fn is_auto_sized(&self, key: PropertyKey) -> bool {
        self.geometry.is_auto_sized(key)
    }

    /// Every property that can be edited and keyframed on this element
    pub fn editable_properties(&self) -> impl Iterator<Item = PropertyKey> + '_ {
        PropertyKey::ALL
            .iter()
            .copied()
            .filter(|key| key.applies_to(&self.content))
    }

    /// Merges the supplied fields into this element
    pub fn apply(&mut self, patch: ElementPatch) {
        let ElementPatch {
            name,
            styles,
            content,
            geometry,
            z_index,
            visible,
            locked,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        for (key, value) in styles {
            if key.namespace() == PropertyNamespace::Style && key.check_kind(&value).is_ok() {
                self.styles.insert(key, value);
            } else {
                log::warn!("Dropping {key} from style patch of element {}", self.id);
            }
        }
        if let Some(content) = content {
            self.content = content;
        }
        if let Some(geometry) = geometry {
            self.geometry = geometry;
        }
        if let Some(z_index) = z_index {
            self.z_index = z_index;
        }
        if let Some(visible) = visible {
            self.visible = visible;
        }
        if let Some(locked) = locked {
            self.locked = locked;
        }
    }
}

/// Partial update for [`Element`]. `styles` is merged key by key, every other
/// supplied field replaces the current one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementPatch {
    pub name: Option<String>,
    pub styles: PropertyMap,
    pub content: Option<ElementContent>,
    pub geometry: Option<Geometry>,
    pub z_index: Option<i32>,
    pub visible: Option<bool>,
    pub locked: Option<bool>,
}

impl ElementPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::Rgba;

    #[test]
    fn test_property_reads_dispatch_on_namespace() {
        let element = Element::new("Lower third", ElementContent::Shape(ShapeContent::default()))
            .with_style(PropertyKey::Opacity, PropertyValue::Number(0.8));

        assert_eq!(element.property(PropertyKey::Opacity), Some(PropertyValue::Number(0.8)));
        assert_eq!(element.property(PropertyKey::FontSize), Some(PropertyValue::Number(48.0)));
        assert_eq!(element.property(PropertyKey::ScaleX), Some(PropertyValue::Number(1.0)));
        assert_eq!(element.property(PropertyKey::Fill), Some(PropertyValue::Color(Rgba::WHITE)));
        assert_eq!(element.property(PropertyKey::MapZoom), None);
    }

    #[test]
    fn test_set_property_rejects_wrong_kind_and_foreign_content() {
        let mut element = Element::new("Headline", ElementContent::Text(TextContent::default()));

        let err = element
            .set_property(PropertyKey::Opacity, PropertyValue::Color(Rgba::BLACK))
            .unwrap_err();
        assert!(matches!(err, PropertyError::KindMismatch { .. }));

        let err = element
            .set_property(PropertyKey::MapZoom, PropertyValue::Number(3.0))
            .unwrap_err();
        assert_eq!(
            err,
            PropertyError::NotApplicable {
                key: PropertyKey::MapZoom,
                content: ContentKind::Text,
            }
        );
    }

    #[test]
    fn test_anchor_is_clamped() {
        let mut element = Element::new("Logo", ElementContent::Image(ImageContent::default()));
        element
            .set_property(PropertyKey::AnchorX, PropertyValue::Number(1.7))
            .unwrap();
        assert_eq!(element.geometry.anchor_x, 1.0);
    }

    #[test]
    fn test_auto_size_until_width_is_set() {
        let mut element = Element::new("Caption", ElementContent::default());
        assert!(element.is_auto_sized(PropertyKey::Width));
        assert_eq!(element.property(PropertyKey::Width), Some(PropertyValue::Number(0.0)));

        element
            .set_property(PropertyKey::Width, PropertyValue::Number(-20.0))
            .unwrap();
        assert!(!element.is_auto_sized(PropertyKey::Width));
        assert!(element.is_auto_sized(PropertyKey::Height));
        assert_eq!(element.geometry.width, Some(0.0));
        assert!(
            element
                .set_property(PropertyKey::X, PropertyValue::Number(f64::NAN))
                .is_err()
        );
    }

    #[test]
    fn test_patch_merges_styles() {
        let mut element = Element::new("Box", ElementContent::Shape(ShapeContent::default()))
            .with_style(PropertyKey::Opacity, PropertyValue::Number(0.5))
            .with_style(PropertyKey::Blur, PropertyValue::Number(2.0));

        let mut styles = PropertyMap::new();
        styles.insert(PropertyKey::Blur, PropertyValue::Number(4.0));
        element.apply(ElementPatch {
            name: Some("Panel".to_owned()),
            styles,
            ..Default::default()
        });

        assert_eq!(element.name, "Panel");
        assert_eq!(element.styles[&PropertyKey::Opacity], PropertyValue::Number(0.5));
        assert_eq!(element.styles[&PropertyKey::Blur], PropertyValue::Number(4.0));
    }

    #[test]
    fn test_content_serializes_with_type_tag() {
        let content = ElementContent::TopicBadge(TopicBadgeContent {
            topic: "election".to_owned(),
            label: "Election 2026".to_owned(),
        });
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["type"], "topic_badge");
        let back: ElementContent = serde_json::from_value(json).unwrap();
        assert_eq!(back, content);
    }
}
