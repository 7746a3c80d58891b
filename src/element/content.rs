use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PropertyError;
use crate::property::{PropertyKey, PropertyValue, Rgba};

/// Discriminant of [`ElementContent`], used where only the kind matters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Text,
    Image,
    Shape,
    Icon,
    Ticker,
    Map,
    Chart,
    Table,
    Svg,
    Video,
    TopicBadge,
}

impl ContentKind {
    pub const ALL: [ContentKind; 11] = [
        Self::Text,
        Self::Image,
        Self::Shape,
        Self::Icon,
        Self::Ticker,
        Self::Map,
        Self::Chart,
        Self::Table,
        Self::Svg,
        Self::Video,
        Self::TopicBadge,
    ];
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Shape => "shape",
            Self::Icon => "icon",
            Self::Ticker => "ticker",
            Self::Map => "map",
            Self::Chart => "chart",
            Self::Table => "table",
            Self::Svg => "svg",
            Self::Video => "video",
            Self::TopicBadge => "topic_badge",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub text: String,
    pub font_family: String,
    pub align: TextAlign,
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_family: "Inter".to_owned(),
            align: TextAlign::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFit {
    #[default]
    Cover,
    Contain,
    Fill,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageContent {
    pub src: String,
    pub alt: String,
    pub fit: ImageFit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Ellipse,
    Triangle,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeContent {
    pub shape: ShapeKind,
    pub fill: Rgba,
    pub stroke_color: Rgba,
    pub stroke_width: f64,
    pub corner_radius: f64,
}

impl Default for ShapeContent {
    fn default() -> Self {
        Self {
            shape: ShapeKind::Rectangle,
            fill: Rgba::WHITE,
            stroke_color: Rgba::BLACK,
            stroke_width: 0.0,
            corner_radius: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconContent {
    pub library: String,
    pub name: String,
    pub size: f64,
    pub color: Rgba,
}

impl Default for IconContent {
    fn default() -> Self {
        Self {
            library: "lucide".to_owned(),
            name: "star".to_owned(),
            size: 64.0,
            color: Rgba::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerContent {
    pub items: Vec<String>,
    pub separator: String,
    /// Scroll speed in pixels per second
    pub speed: f64,
}

impl Default for TickerContent {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            separator: " • ".to_owned(),
            speed: 80.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapContent {
    pub style: String,
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
    pub markers: Vec<MapMarker>,
}

impl Default for MapContent {
    fn default() -> Self {
        Self {
            style: "streets".to_owned(),
            latitude: 0.0,
            longitude: 0.0,
            zoom: 4.0,
            pitch: 0.0,
            bearing: 0.0,
            markers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Pie,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartContent {
    pub chart_type: ChartType,
    pub series: Vec<ChartPoint>,
    /// How much of the chart is revealed, 0 to 1
    pub progress: f64,
}

impl Default for ChartContent {
    fn default() -> Self {
        Self {
            chart_type: ChartType::Bar,
            series: Vec::new(),
            progress: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableContent {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SvgContent {
    pub markup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoContent {
    pub src: String,
    pub autoplay: bool,
    pub looping: bool,
    pub muted: bool,
    pub volume: f64,
}

impl Default for VideoContent {
    fn default() -> Self {
        Self {
            src: String::new(),
            autoplay: true,
            looping: false,
            muted: false,
            volume: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicBadgeContent {
    pub topic: String,
    pub label: String,
}

/// What an element displays. Each kind carries only its own attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementContent {
    Text(TextContent),
    Image(ImageContent),
    Shape(ShapeContent),
    Icon(IconContent),
    Ticker(TickerContent),
    Map(MapContent),
    Chart(ChartContent),
    Table(TableContent),
    Svg(SvgContent),
    Video(VideoContent),
    TopicBadge(TopicBadgeContent),
}

impl Default for ElementContent {
    fn default() -> Self {
        Self::Text(TextContent::default())
    }
}

impl ElementContent {
    /// Fresh content of the given kind with default attributes
    pub fn default_for(kind: ContentKind) -> Self {
        match kind {
            ContentKind::Text => Self::Text(TextContent::default()),
            ContentKind::Image => Self::Image(ImageContent::default()),
            ContentKind::Shape => Self::Shape(ShapeContent::default()),
            ContentKind::Icon => Self::Icon(IconContent::default()),
            ContentKind::Ticker => Self::Ticker(TickerContent::default()),
            ContentKind::Map => Self::Map(MapContent::default()),
            ContentKind::Chart => Self::Chart(ChartContent::default()),
            ContentKind::Table => Self::Table(TableContent::default()),
            ContentKind::Svg => Self::Svg(SvgContent::default()),
            ContentKind::Video => Self::Video(VideoContent::default()),
            ContentKind::TopicBadge => Self::TopicBadge(TopicBadgeContent::default()),
        }
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Text(_) => ContentKind::Text,
            Self::Image(_) => ContentKind::Image,
            Self::Shape(_) => ContentKind::Shape,
            Self::Icon(_) => ContentKind::Icon,
            Self::Ticker(_) => ContentKind::Ticker,
            Self::Map(_) => ContentKind::Map,
            Self::Chart(_) => ContentKind::Chart,
            Self::Table(_) => ContentKind::Table,
            Self::Svg(_) => ContentKind::Svg,
            Self::Video(_) => ContentKind::Video,
            Self::TopicBadge(_) => ContentKind::TopicBadge,
        }
    }

    /// Reads a content-namespace property. `None` when this content does not
    /// carry the key.
    pub fn property(&self, key: PropertyKey) -> Option<PropertyValue> {
        use PropertyKey as K;
        let value = match (self, key) {
            (Self::Shape(s), K::Fill) => PropertyValue::Color(s.fill),
            (Self::Shape(s), K::StrokeColor) => PropertyValue::Color(s.stroke_color),
            (Self::Shape(s), K::StrokeWidth) => PropertyValue::Number(s.stroke_width),
            (Self::Shape(s), K::CornerRadius) => PropertyValue::Number(s.corner_radius),
            (Self::Icon(i), K::IconSize) => PropertyValue::Number(i.size),
            (Self::Icon(i), K::IconColor) => PropertyValue::Color(i.color),
            (Self::Ticker(t), K::TickerSpeed) => PropertyValue::Number(t.speed),
            (Self::Map(m), K::MapZoom) => PropertyValue::Number(m.zoom),
            (Self::Map(m), K::MapLatitude) => PropertyValue::Number(m.latitude),
            (Self::Map(m), K::MapLongitude) => PropertyValue::Number(m.longitude),
            (Self::Map(m), K::MapPitch) => PropertyValue::Number(m.pitch),
            (Self::Map(m), K::MapBearing) => PropertyValue::Number(m.bearing),
            (Self::Video(v), K::Volume) => PropertyValue::Number(v.volume),
            (Self::Chart(c), K::ChartProgress) => PropertyValue::Number(c.progress),
            _ => return None,
        };
        Some(value)
    }

    /// Writes a content-namespace property
    pub fn set_property(&mut self, key: PropertyKey, value: PropertyValue) -> Result<(), PropertyError> {
        key.check_kind(&value)?;
        let content = self.kind();
        let not_applicable = PropertyError::NotApplicable { key, content };

        match value {
            PropertyValue::Number(n) => {
                let slot = self.number_slot(key).ok_or(not_applicable)?;
                *slot = n;
            }
            PropertyValue::Color(c) => {
                let slot = self.color_slot(key).ok_or(not_applicable)?;
                *slot = c;
            }
        }
        Ok(())
    }

    fn number_slot(&mut self, key: PropertyKey) -> Option<&mut f64> {
        use PropertyKey as K;
        match (self, key) {
            (Self::Shape(s), K::StrokeWidth) => Some(&mut s.stroke_width),
            (Self::Shape(s), K::CornerRadius) => Some(&mut s.corner_radius),
            (Self::Icon(i), K::IconSize) => Some(&mut i.size),
            (Self::Ticker(t), K::TickerSpeed) => Some(&mut t.speed),
            (Self::Map(m), K::MapZoom) => Some(&mut m.zoom),
            (Self::Map(m), K::MapLatitude) => Some(&mut m.latitude),
            (Self::Map(m), K::MapLongitude) => Some(&mut m.longitude),
            (Self::Map(m), K::MapPitch) => Some(&mut m.pitch),
            (Self::Map(m), K::MapBearing) => Some(&mut m.bearing),
            (Self::Video(v), K::Volume) => Some(&mut v.volume),
            (Self::Chart(c), K::ChartProgress) => Some(&mut c.progress),
            _ => None,
        }
    }

    fn color_slot(&mut self, key: PropertyKey) -> Option<&mut Rgba> {
        use PropertyKey as K;
        match (self, key) {
            (Self::Shape(s), K::Fill) => Some(&mut s.fill),
            (Self::Shape(s), K::StrokeColor) => Some(&mut s.stroke_color),
            (Self::Icon(i), K::IconColor) => Some(&mut i.color),
            _ => None,
        }
    }
}
