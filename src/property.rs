//! Property keys and values shared by elements and keyframes.
//!
//! Keys form a closed set. Each key lives in exactly one namespace (geometry,
//! style, or the content of one content kind), which is what decides where a
//! static read or write lands on an [`Element`](crate::element::Element).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::element::{ContentKind, ElementContent};

/// Sparse mapping of property key to value, as held by keyframes and styles
pub type PropertyMap = BTreeMap<PropertyKey, PropertyValue>;

/// Merges `source` into `target`, overwriting only the keys present in `source`
pub fn merge_properties(target: &mut PropertyMap, source: PropertyMap) {
    for (key, value) in source {
        target.insert(key, value);
    }
}

/// An 8-bit sRGBA color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

/// The type of value a property holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Number,
    Color,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number => write!(f, "number"),
            Self::Color => write!(f, "color"),
        }
    }
}

/// A property value, either static on an element or authored on a keyframe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    Number(f64),
    Color(Rgba),
}

impl PropertyValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Number(_) => ValueKind::Number,
            Self::Color(_) => ValueKind::Color,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Color(_) => None,
        }
    }

    pub fn as_color(&self) -> Option<Rgba> {
        match self {
            Self::Color(c) => Some(*c),
            Self::Number(_) => None,
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Rgba> for PropertyValue {
    fn from(value: Rgba) -> Self {
        Self::Color(value)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Color(c) => write!(f, "{c}"),
        }
    }
}

/// Where a property's static value lives on an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyNamespace {
    Geometry,
    Style,
    Content(ContentKind),
}

/// Editing range for numeric properties
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl NumberRange {
    const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Every property that can be edited in the designer and authored on a keyframe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyKey {
    // Geometry
    X,
    Y,
    Width,
    Height,
    Rotation,
    ScaleX,
    ScaleY,
    AnchorX,
    AnchorY,

    // Style
    Opacity,
    Color,
    BackgroundColor,
    FontSize,
    FontWeight,
    LetterSpacing,
    LineHeight,
    BorderRadius,
    BorderWidth,
    BorderColor,
    Blur,

    // Shape content
    Fill,
    StrokeColor,
    StrokeWidth,
    CornerRadius,

    // Icon content
    IconSize,
    IconColor,

    // Ticker content
    TickerSpeed,

    // Map content
    MapZoom,
    MapLatitude,
    MapLongitude,
    MapPitch,
    MapBearing,

    // Video content
    Volume,

    // Chart content
    ChartProgress,
}

impl PropertyKey {
    pub const ALL: &'static [PropertyKey] = &[
        Self::X,
        Self::Y,
        Self::Width,
        Self::Height,
        Self::Rotation,
        Self::ScaleX,
        Self::ScaleY,
        Self::AnchorX,
        Self::AnchorY,
        Self::Opacity,
        Self::Color,
        Self::BackgroundColor,
        Self::FontSize,
        Self::FontWeight,
        Self::LetterSpacing,
        Self::LineHeight,
        Self::BorderRadius,
        Self::BorderWidth,
        Self::BorderColor,
        Self::Blur,
        Self::Fill,
        Self::StrokeColor,
        Self::StrokeWidth,
        Self::CornerRadius,
        Self::IconSize,
        Self::IconColor,
        Self::TickerSpeed,
        Self::MapZoom,
        Self::MapLatitude,
        Self::MapLongitude,
        Self::MapPitch,
        Self::MapBearing,
        Self::Volume,
        Self::ChartProgress,
    ];

    pub fn namespace(&self) -> PropertyNamespace {
        use PropertyKey::*;
        match self {
            X | Y | Width | Height | Rotation | ScaleX | ScaleY | AnchorX | AnchorY => {
                PropertyNamespace::Geometry
            }
            Opacity | Color | BackgroundColor | FontSize | FontWeight | LetterSpacing
            | LineHeight | BorderRadius | BorderWidth | BorderColor | Blur => {
                PropertyNamespace::Style
            }
            Fill | StrokeColor | StrokeWidth | CornerRadius => {
                PropertyNamespace::Content(ContentKind::Shape)
            }
            IconSize | IconColor => PropertyNamespace::Content(ContentKind::Icon),
            TickerSpeed => PropertyNamespace::Content(ContentKind::Ticker),
            MapZoom | MapLatitude | MapLongitude | MapPitch | MapBearing => {
                PropertyNamespace::Content(ContentKind::Map)
            }
            Volume => PropertyNamespace::Content(ContentKind::Video),
            ChartProgress => PropertyNamespace::Content(ContentKind::Chart),
        }
    }

    /// Whether this key can be read, written and keyframed on an element with
    /// the given content
    pub fn applies_to(&self, content: &ElementContent) -> bool {
        match self.namespace() {
            PropertyNamespace::Geometry | PropertyNamespace::Style => true,
            PropertyNamespace::Content(kind) => content.kind() == kind,
        }
    }

    pub fn value_kind(&self) -> ValueKind {
        use PropertyKey::*;
        match self {
            Color | BackgroundColor | BorderColor | Fill | StrokeColor | IconColor => {
                ValueKind::Color
            }
            _ => ValueKind::Number,
        }
    }

    /// Editing range for numeric keys, `None` for colors
    pub fn number_range(&self) -> Option<NumberRange> {
        use PropertyKey::*;
        let range = match self {
            X | Y => NumberRange::new(-10_000.0, 10_000.0, 1.0),
            Width | Height => NumberRange::new(0.0, 10_000.0, 1.0),
            Rotation => NumberRange::new(-360.0, 360.0, 1.0),
            ScaleX | ScaleY => NumberRange::new(0.0, 10.0, 0.01),
            AnchorX | AnchorY | Opacity | Volume | ChartProgress => {
                NumberRange::new(0.0, 1.0, 0.01)
            }
            FontSize => NumberRange::new(1.0, 500.0, 1.0),
            FontWeight => NumberRange::new(100.0, 900.0, 100.0),
            LetterSpacing => NumberRange::new(-20.0, 100.0, 0.5),
            LineHeight => NumberRange::new(0.5, 4.0, 0.05),
            BorderRadius | CornerRadius => NumberRange::new(0.0, 500.0, 1.0),
            BorderWidth | StrokeWidth | Blur => NumberRange::new(0.0, 100.0, 0.5),
            IconSize => NumberRange::new(1.0, 500.0, 1.0),
            TickerSpeed => NumberRange::new(0.0, 1_000.0, 1.0),
            MapZoom => NumberRange::new(0.0, 22.0, 0.1),
            MapLatitude => NumberRange::new(-90.0, 90.0, 0.0001),
            MapLongitude | MapBearing => NumberRange::new(-180.0, 180.0, 0.0001),
            MapPitch => NumberRange::new(0.0, 85.0, 1.0),
            Color | BackgroundColor | BorderColor | Fill | StrokeColor | IconColor => {
                return None;
            }
        };
        Some(range)
    }

    /// Value used when an element carries no explicit value for a style key
    pub fn default_value(&self) -> PropertyValue {
        use PropertyKey::*;
        match self {
            ScaleX | ScaleY | Opacity | Volume | ChartProgress => PropertyValue::Number(1.0),
            AnchorX | AnchorY => PropertyValue::Number(0.5),
            FontSize => PropertyValue::Number(48.0),
            FontWeight => PropertyValue::Number(400.0),
            LineHeight => PropertyValue::Number(1.2),
            IconSize => PropertyValue::Number(64.0),
            TickerSpeed => PropertyValue::Number(80.0),
            MapZoom => PropertyValue::Number(4.0),
            Color | Fill | IconColor => PropertyValue::Color(Rgba::WHITE),
            BackgroundColor => PropertyValue::Color(Rgba::TRANSPARENT),
            BorderColor | StrokeColor => PropertyValue::Color(Rgba::BLACK),
            _ => PropertyValue::Number(0.0),
        }
    }

    /// Checks that `value` has the kind this key expects
    pub fn check_kind(&self, value: &PropertyValue) -> Result<(), crate::error::PropertyError> {
        let expected = self.value_kind();
        if value.kind() == expected {
            Ok(())
        } else {
            Err(crate::error::PropertyError::KindMismatch { key: *self, expected })
        }
    }

    /// Checks the kind, rejects NaN and infinities, and clamps numbers into
    /// the key's range. Every write into stored state goes through this.
    pub fn sanitize(&self, value: PropertyValue) -> Result<PropertyValue, crate::error::PropertyError> {
        self.check_kind(&value)?;
        match value {
            PropertyValue::Number(n) if !n.is_finite() => {
                Err(crate::error::PropertyError::NotFinite { key: *self })
            }
            PropertyValue::Number(n) => Ok(PropertyValue::Number(
                self.number_range().map_or(n, |range| range.clamp(n)),
            )),
            PropertyValue::Color(_) => Ok(value),
        }
    }

    /// Human readable label for property panels
    pub fn label(&self) -> &'static str {
        use PropertyKey::*;
        match self {
            X => "X",
            Y => "Y",
            Width => "Width",
            Height => "Height",
            Rotation => "Rotation",
            ScaleX => "Scale X",
            ScaleY => "Scale Y",
            AnchorX => "Anchor X",
            AnchorY => "Anchor Y",
            Opacity => "Opacity",
            Color => "Color",
            BackgroundColor => "Background",
            FontSize => "Font size",
            FontWeight => "Font weight",
            LetterSpacing => "Letter spacing",
            LineHeight => "Line height",
            BorderRadius => "Border radius",
            BorderWidth => "Border width",
            BorderColor => "Border color",
            Blur => "Blur",
            Fill => "Fill",
            StrokeColor => "Stroke color",
            StrokeWidth => "Stroke width",
            CornerRadius => "Corner radius",
            IconSize => "Icon size",
            IconColor => "Icon color",
            TickerSpeed => "Speed",
            MapZoom => "Zoom",
            MapLatitude => "Latitude",
            MapLongitude => "Longitude",
            MapPitch => "Pitch",
            MapBearing => "Bearing",
            Volume => "Volume",
            ChartProgress => "Progress",
        }
    }

    /// Stable camelCase name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        use PropertyKey::*;
        match self {
            X => "x",
            Y => "y",
            Width => "width",
            Height => "height",
            Rotation => "rotation",
            ScaleX => "scaleX",
            ScaleY => "scaleY",
            AnchorX => "anchorX",
            AnchorY => "anchorY",
            Opacity => "opacity",
            Color => "color",
            BackgroundColor => "backgroundColor",
            FontSize => "fontSize",
            FontWeight => "fontWeight",
            LetterSpacing => "letterSpacing",
            LineHeight => "lineHeight",
            BorderRadius => "borderRadius",
            BorderWidth => "borderWidth",
            BorderColor => "borderColor",
            Blur => "blur",
            Fill => "fill",
            StrokeColor => "strokeColor",
            StrokeWidth => "strokeWidth",
            CornerRadius => "cornerRadius",
            IconSize => "iconSize",
            IconColor => "iconColor",
            TickerSpeed => "tickerSpeed",
            MapZoom => "mapZoom",
            MapLatitude => "mapLatitude",
            MapLongitude => "mapLongitude",
            MapPitch => "mapPitch",
            MapBearing => "mapBearing",
            Volume => "volume",
            ChartProgress => "chartProgress",
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
