//! Entities we know how to put into a CZML document.
//!
//! Every entity exposes the same `Displayable` surface; each shape builder is optional and
//! an absent one simply means the corresponding packet field is left out.  Built shapes are
//! cached in the entity itself so asking twice returns the very same value.
//!

use std::sync::OnceLock;

use chrono::{DateTime, TimeDelta, Utc};
use enum_dispatch::enum_dispatch;

use crate::{
    Billboard, CzmlError, HorizontalOrigin, Interval, Label, Marker, Path, PixelOffset, Point,
    Position, Rgba, Sample, Trajectory, VerticalOrigin,
};

/// Default color for ground stations
pub const STATION_COLOR: [u8; 4] = [0, 128, 255, 255];
/// Default color for planes
pub const PLANE_COLOR: [u8; 4] = [255, 0, 0, 255];
/// Default marker scale
pub const MARKER_SCALE: f64 = 1.5;
/// Label font
pub const LABEL_FONT: &str = "11pt Lucida Console";

/// Everything the document assembler may ask an entity for.
///
#[enum_dispatch]
pub trait Displayable {
    /// Unique id inside a document
    fn id(&self) -> &str;
    /// Free text description
    fn description(&self) -> &str;
    /// When is the entity valid
    fn availability(&self) -> Interval;

    fn marker(&self) -> Option<&Marker> {
        None
    }
    fn label(&self) -> Option<&Label> {
        None
    }
    fn path(&self) -> Option<&Path> {
        None
    }
    fn position(&self) -> Option<&Position> {
        None
    }
}

impl<T: Displayable + ?Sized> Displayable for &T {
    fn id(&self) -> &str {
        (**self).id()
    }
    fn description(&self) -> &str {
        (**self).description()
    }
    fn availability(&self) -> Interval {
        (**self).availability()
    }
    fn marker(&self) -> Option<&Marker> {
        (**self).marker()
    }
    fn label(&self) -> Option<&Label> {
        (**self).label()
    }
    fn path(&self) -> Option<&Path> {
        (**self).path()
    }
    fn position(&self) -> Option<&Position> {
        (**self).position()
    }
}

/// All the concrete kinds of entities.
///
#[enum_dispatch(Displayable)]
#[derive(Clone, Debug)]
pub enum Entity {
    GroundStation,
    Plane,
}

/// Display attributes shared by all entities.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    /// Displayed name, defaults to the id
    pub name: String,
    /// Image for a billboard, a point is drawn otherwise
    pub image: Option<String>,
    pub color: Rgba,
    pub marker_scale: f64,
    pub show_label: bool,
}

impl Style {
    fn new(name: &str, color: [u8; 4]) -> Self {
        Style {
            name: name.to_string(),
            image: None,
            color: color.into(),
            marker_scale: MARKER_SCALE,
            show_label: true,
        }
    }

    /// Image configured means billboard, otherwise a point.
    ///
    pub fn marker(&self) -> Marker {
        match &self.image {
            Some(image) => Marker::Billboard(Billboard {
                show: true,
                image: image.clone(),
                scale: self.marker_scale,
            }),
            None => Marker::Point(Point {
                show: true,
                pixel_size: self.marker_scale * 10.,
                color: self.color,
                outline_color: Rgba::BLACK,
                outline_width: 2.,
            }),
        }
    }

    pub fn label(&self) -> Label {
        Label {
            text: self.name.clone(),
            show: self.show_label,
            fill_color: self.color,
            font: LABEL_FONT.to_string(),
            outline_color: Rgba::BLACK,
            outline_width: 2.,
            horizontal_origin: HorizontalOrigin::Left,
            vertical_origin: VerticalOrigin::Center,
            pixel_offset: PixelOffset {
                cartesian2: [12., 0.],
            },
        }
    }
}

/// End of a window of `secs` seconds starting at `start`.
///
fn default_end(start: DateTime<Utc>, secs: i64) -> Result<DateTime<Utc>, CzmlError> {
    start
        .checked_add_signed(TimeDelta::seconds(secs))
        .ok_or(CzmlError::BadInterval {
            start,
            end: DateTime::<Utc>::MAX_UTC,
        })
}

// ----- Ground station

/// A stationary entity.
///
#[derive(Clone, Debug)]
pub struct GroundStation {
    id: String,
    description: String,
    style: Style,
    /// `[lon, lat, alt]`
    location: [f64; 3],
    span: Interval,
    marker: OnceLock<Marker>,
    label: OnceLock<Label>,
    position: OnceLock<Position>,
}

impl GroundStation {
    /// Stations are available for a day unless told otherwise.
    ///
    pub const DEFAULT_DURATION_SECS: i64 = 86_400;

    pub fn builder(id: &str, lon: f64, lat: f64, alt: f64, start: DateTime<Utc>) -> StationBuilder {
        StationBuilder {
            id: id.to_string(),
            name: None,
            description: None,
            image: None,
            color: None,
            marker_scale: None,
            show_label: None,
            location: [lon, lat, alt],
            start,
            end: None,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.style.name
    }

    #[inline]
    pub fn location(&self) -> [f64; 3] {
        self.location
    }
}

impl Displayable for GroundStation {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn availability(&self) -> Interval {
        self.span
    }

    fn marker(&self) -> Option<&Marker> {
        Some(self.marker.get_or_init(|| self.style.marker()))
    }

    fn label(&self) -> Option<&Label> {
        Some(self.label.get_or_init(|| self.style.label()))
    }

    fn position(&self) -> Option<&Position> {
        Some(self.position.get_or_init(|| Position {
            epoch: None,
            reference_frame: None,
            interpolation_algorithm: None,
            interpolation_degree: None,
            cartographic_degrees: self.location.to_vec(),
        }))
    }
}

#[derive(Debug)]
pub struct StationBuilder {
    id: String,
    name: Option<String>,
    description: Option<String>,
    image: Option<String>,
    color: Option<[u8; 4]>,
    marker_scale: Option<f64>,
    show_label: Option<bool>,
    location: [f64; 3],
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
}

impl StationBuilder {
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn image(mut self, image: &str) -> Self {
        self.image = Some(image.to_string());
        self
    }

    pub fn color(mut self, color: [u8; 4]) -> Self {
        self.color = Some(color);
        self
    }

    pub fn marker_scale(mut self, scale: f64) -> Self {
        self.marker_scale = Some(scale);
        self
    }

    pub fn show_label(mut self, show: bool) -> Self {
        self.show_label = Some(show);
        self
    }

    pub fn end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn build(self) -> Result<GroundStation, CzmlError> {
        let end = match self.end {
            Some(end) => end,
            None => default_end(self.start, GroundStation::DEFAULT_DURATION_SECS)?,
        };
        let span = Interval::new(self.start, end)?;

        let name = self.name.unwrap_or_else(|| self.id.clone());
        let description = self
            .description
            .unwrap_or_else(|| format!("Ground Station {name}"));
        let mut style = Style::new(&name, self.color.unwrap_or(STATION_COLOR));
        style.image = self.image;
        style.marker_scale = self.marker_scale.unwrap_or(MARKER_SCALE);
        style.show_label = self.show_label.unwrap_or(true);

        Ok(GroundStation {
            id: self.id,
            description,
            style,
            location: self.location,
            span,
            marker: OnceLock::new(),
            label: OnceLock::new(),
            position: OnceLock::new(),
        })
    }
}

// ----- Plane

/// A moving entity following a trajectory.
///
#[derive(Clone, Debug)]
pub struct Plane {
    id: String,
    description: String,
    style: Style,
    show_path: bool,
    trajectory: Trajectory,
    marker: OnceLock<Marker>,
    label: OnceLock<Label>,
    path: OnceLock<Path>,
    position: OnceLock<Position>,
}

impl Plane {
    /// Flights are available for an hour unless told otherwise.
    ///
    pub const DEFAULT_DURATION_SECS: i64 = 3_600;

    pub fn builder(id: &str, samples: &[Sample], start: DateTime<Utc>) -> PlaneBuilder {
        PlaneBuilder {
            id: id.to_string(),
            name: None,
            description: None,
            image: None,
            color: None,
            marker_scale: None,
            show_label: None,
            show_path: None,
            samples: samples.to_vec(),
            start,
            end: None,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.style.name
    }

    #[inline]
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }
}

impl Displayable for Plane {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn availability(&self) -> Interval {
        self.trajectory.span()
    }

    fn marker(&self) -> Option<&Marker> {
        Some(self.marker.get_or_init(|| self.style.marker()))
    }

    fn label(&self) -> Option<&Label> {
        Some(self.label.get_or_init(|| self.style.label()))
    }

    fn path(&self) -> Option<&Path> {
        Some(
            self.path
                .get_or_init(|| self.trajectory.path(self.show_path, self.style.color)),
        )
    }

    fn position(&self) -> Option<&Position> {
        Some(self.position.get_or_init(|| self.trajectory.position()))
    }
}

#[derive(Debug)]
pub struct PlaneBuilder {
    id: String,
    name: Option<String>,
    description: Option<String>,
    image: Option<String>,
    color: Option<[u8; 4]>,
    marker_scale: Option<f64>,
    show_label: Option<bool>,
    show_path: Option<bool>,
    samples: Vec<Sample>,
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
}

impl PlaneBuilder {
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn image(mut self, image: &str) -> Self {
        self.image = Some(image.to_string());
        self
    }

    pub fn color(mut self, color: [u8; 4]) -> Self {
        self.color = Some(color);
        self
    }

    pub fn marker_scale(mut self, scale: f64) -> Self {
        self.marker_scale = Some(scale);
        self
    }

    pub fn show_label(mut self, show: bool) -> Self {
        self.show_label = Some(show);
        self
    }

    pub fn show_path(mut self, show: bool) -> Self {
        self.show_path = Some(show);
        self
    }

    pub fn end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Normalise the trajectory and freeze everything.
    ///
    pub fn build(self) -> Result<Plane, CzmlError> {
        let end = match self.end {
            Some(end) => end,
            None => default_end(self.start, Plane::DEFAULT_DURATION_SECS)?,
        };
        let span = Interval::new(self.start, end)?;
        let trajectory = Trajectory::new(&self.samples, span)?;

        let name = self.name.unwrap_or_else(|| self.id.clone());
        let description = self
            .description
            .unwrap_or_else(|| format!("Flight {name}"));
        let mut style = Style::new(&name, self.color.unwrap_or(PLANE_COLOR));
        style.image = self.image;
        style.marker_scale = self.marker_scale.unwrap_or(MARKER_SCALE);
        style.show_label = self.show_label.unwrap_or(true);

        Ok(Plane {
            id: self.id,
            description,
            style,
            show_path: self.show_path.unwrap_or(true),
            trajectory,
            marker: OnceLock::new(),
            label: OnceLock::new(),
            path: OnceLock::new(),
            position: OnceLock::new(),
        })
    }
}
