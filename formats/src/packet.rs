//! CZML wire structures.
//!
//! Only the subset of the CZML schema we actually emit is described here.  Field names follow
//! the schema (camelCase) and optional properties are left out of the output when not set.
//!
//! See <https://github.com/AnalyticalGraphicsInc/czml-writer/wiki/CZML-Guide>.
//!

use serde::Serialize;
use strum::EnumString;

/// Version of the CZML schema we generate
pub const CZML_VERSION: &str = "1.0";

/// Id of the mandatory first packet
pub const DOCUMENT_ID: &str = "document";

/// A color as `{"rgba": [r, g, b, a]}`.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Rgba {
    pub rgba: [u8; 4],
}

impl Rgba {
    pub const BLACK: Rgba = Rgba {
        rgba: [0, 0, 0, 255],
    };
}

impl From<[u8; 4]> for Rgba {
    fn from(rgba: [u8; 4]) -> Self {
        Rgba { rgba }
    }
}

/// What happens when the clock reaches the end of its interval.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, strum::Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ClockRange {
    Unbounded,
    Clamped,
    #[default]
    LoopStop,
}

/// How the clock advances.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, strum::Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ClockStep {
    TickDependent,
    #[default]
    SystemClockMultiplier,
    SystemClock,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Clock {
    pub interval: String,
    pub current_time: String,
    pub multiplier: f64,
    pub range: ClockRange,
    pub step: ClockStep,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Description {
    pub string: String,
}

impl From<&str> for Description {
    fn from(value: &str) -> Self {
        Description {
            string: value.to_string(),
        }
    }
}

/// Image-based marker.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Billboard {
    pub show: bool,
    pub image: String,
    pub scale: f64,
}

/// Procedural marker, a dot with an outline.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    pub show: bool,
    pub pixel_size: f64,
    pub color: Rgba,
    pub outline_color: Rgba,
    pub outline_width: f64,
}

/// An entity is shown either with an image or a point, never both.
///
#[derive(Clone, Debug, PartialEq)]
pub enum Marker {
    Billboard(Billboard),
    Point(Point),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HorizontalOrigin {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerticalOrigin {
    Top,
    Center,
    Bottom,
    Baseline,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PixelOffset {
    pub cartesian2: [f64; 2],
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub text: String,
    pub show: bool,
    pub fill_color: Rgba,
    pub font: String,
    pub outline_color: Rgba,
    pub outline_width: f64,
    pub horizontal_origin: HorizontalOrigin,
    pub vertical_origin: VerticalOrigin,
    pub pixel_offset: PixelOffset,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferenceFrame {
    #[default]
    Fixed,
    Inertial,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterpolationAlgorithm {
    Linear,
    #[default]
    Lagrange,
    Hermite,
}

/// Position of an entity, either fixed (`[lon, lat, alt]`) or sampled relative to `epoch`
/// (`[t0, lon0, lat0, alt0, t1, ...]`).
///
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epoch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_frame: Option<ReferenceFrame>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpolation_algorithm: Option<InterpolationAlgorithm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpolation_degree: Option<u8>,
    pub cartographic_degrees: Vec<f64>,
}

/// One element of an absolute-time path array, either a timestamp or a coordinate.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PathItem {
    Time(String),
    Degrees(f64),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathPositions {
    pub cartographic_degrees: Vec<PathItem>,
}

/// Visibility over a given interval.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShowInterval {
    pub interval: String,
    pub boolean: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SolidColor {
    pub color: Rgba,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub solid_color: SolidColor,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    pub show: Vec<ShowInterval>,
    pub width: f64,
    pub material: Material,
    pub lead_time: f64,
    pub trail_time: f64,
    pub positions: PathPositions,
}

/// One CZML packet.  The document packet only uses `id`, `version` and `clock`, entity
/// packets use everything else.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Packet {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock: Option<Clock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Description>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billboard: Option<Billboard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Packet {
    /// The mandatory first packet of every document.
    ///
    pub fn document(clock: Clock) -> Self {
        Packet {
            id: DOCUMENT_ID.to_string(),
            version: Some(CZML_VERSION.to_string()),
            clock: Some(clock),
            ..Default::default()
        }
    }

    /// Put the marker in the right slot depending on its kind.
    ///
    pub fn set_marker(&mut self, marker: Marker) {
        match marker {
            Marker::Billboard(b) => self.billboard = Some(b),
            Marker::Point(p) => self.point = Some(p),
        }
    }
}
