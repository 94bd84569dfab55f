//! Trajectory encoding.
//!
//! A `Trajectory` is normalised once at construction, both the relative (position) and the
//! absolute (path) encodings are derived from the same waypoints and timestamps so they can
//! not drift apart.
//!

use chrono::{DateTime, Utc};
use tracing::{trace, warn};

use crate::{
    check_monotonic, iso, normalize, CzmlError, Interval, InterpolationAlgorithm, Material, Path,
    PathItem, PathPositions, Position, ReferenceFrame, Rgba, Sample, ShowInterval, SolidColor,
    Waypoint,
};

/// Degree of the Lagrange polynomial used by the renderer between samples
pub const LAGRANGE_DEGREE: u8 = 5;

/// Width of path polylines in pixels
pub const PATH_WIDTH: f64 = 2.;

/// A validated list of waypoints over an availability window.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory {
    /// Availability, the epoch is `span.start()`
    span: Interval,
    /// Normalised samples
    waypoints: Vec<Waypoint>,
    /// Absolute time of each waypoint
    stamps: Vec<DateTime<Utc>>,
}

impl Trajectory {
    /// Normalise and check the samples.
    ///
    #[tracing::instrument(skip(samples))]
    pub fn new(samples: &[Sample], span: Interval) -> Result<Self, CzmlError> {
        if samples.is_empty() {
            return Err(CzmlError::EmptyTrajectory);
        }

        let duration = span.duration_secs();
        let waypoints = normalize(samples, duration);
        check_monotonic(&waypoints)?;

        let stamps = waypoints
            .iter()
            .map(|wp| span.at(wp.offset))
            .collect::<Result<Vec<_>, _>>()?;

        waypoints
            .iter()
            .filter(|wp| wp.offset < 0. || wp.offset > duration)
            .for_each(|wp| warn!("offset {}s is outside of {span}", wp.offset));

        trace!("{} waypoints over {duration}s", waypoints.len());
        Ok(Trajectory {
            span,
            waypoints,
            stamps,
        })
    }

    #[inline]
    pub fn span(&self) -> Interval {
        self.span
    }

    #[inline]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Relative encoding: `epoch` plus `[t0, lon0, lat0, alt0, t1, ...]`, to be interpolated.
    ///
    pub fn position(&self) -> Position {
        let carto = self
            .waypoints
            .iter()
            .flat_map(|wp| [wp.offset, wp.lon, wp.lat, wp.alt])
            .collect();

        Position {
            epoch: Some(iso(&self.span.start())),
            reference_frame: Some(ReferenceFrame::Fixed),
            interpolation_algorithm: Some(InterpolationAlgorithm::Lagrange),
            interpolation_degree: Some(LAGRANGE_DEGREE),
            cartographic_degrees: carto,
        }
    }

    /// Absolute encoding: `[iso0, lon0, lat0, alt0, iso1, ...]` as a polyline trailing over
    /// the whole availability window.
    ///
    pub fn path(&self, show: bool, color: Rgba) -> Path {
        let carto = self
            .waypoints
            .iter()
            .zip(self.stamps.iter())
            .flat_map(|(wp, ts)| {
                [
                    PathItem::Time(iso(ts)),
                    PathItem::Degrees(wp.lon),
                    PathItem::Degrees(wp.lat),
                    PathItem::Degrees(wp.alt),
                ]
            })
            .collect();

        Path {
            show: vec![ShowInterval {
                interval: self.span.to_string(),
                boolean: show,
            }],
            width: PATH_WIDTH,
            material: Material {
                solid_color: SolidColor { color },
            },
            lead_time: 0.,
            trail_time: self.span.duration_secs(),
            positions: PathPositions {
                cartographic_degrees: carto,
            },
        }
    }
}
