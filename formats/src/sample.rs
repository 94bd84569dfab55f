//! Raw trajectory samples and their normalisation into time-tagged waypoints.
//!

use crate::CzmlError;

/// One raw coordinate, with or without its own time offset.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sample {
    /// `(lon, lat, alt)`, the offset is synthesised from the trajectory duration
    Untagged { lon: f64, lat: f64, alt: f64 },
    /// `(offset, lon, lat, alt)`, offset in seconds from the epoch
    Tagged {
        offset: f64,
        lon: f64,
        lat: f64,
        alt: f64,
    },
}

impl Sample {
    /// Build a sample from a raw list of numbers, as found in scene files.
    ///
    /// `index` is only used for error reporting.
    ///
    pub fn from_values(index: usize, values: &[f64]) -> Result<Self, CzmlError> {
        match *values {
            [lon, lat, alt] => Ok(Sample::Untagged { lon, lat, alt }),
            [offset, lon, lat, alt] => Ok(Sample::Tagged {
                offset,
                lon,
                lat,
                alt,
            }),
            _ => Err(CzmlError::MalformedSample {
                index,
                len: values.len(),
            }),
        }
    }
}

impl From<(f64, f64, f64)> for Sample {
    fn from((lon, lat, alt): (f64, f64, f64)) -> Self {
        Sample::Untagged { lon, lat, alt }
    }
}

impl From<(f64, f64, f64, f64)> for Sample {
    fn from((offset, lon, lat, alt): (f64, f64, f64, f64)) -> Self {
        Sample::Tagged {
            offset,
            lon,
            lat,
            alt,
        }
    }
}

/// A sample once normalised: always carries its offset.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Waypoint {
    /// Seconds from the epoch
    pub offset: f64,
    /// Longitude in degrees
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
    /// Altitude in meters
    pub alt: f64,
}

/// Give every sample an offset.
///
/// Explicit offsets are kept as-is.  Untagged sample `i` of `n` gets `duration * i / (n - 1)`,
/// a lone untagged sample sits at offset 0.
///
pub fn normalize(samples: &[Sample], duration: f64) -> Vec<Waypoint> {
    let count = samples.len();
    samples
        .iter()
        .enumerate()
        .map(|(i, sample)| match *sample {
            Sample::Tagged {
                offset,
                lon,
                lat,
                alt,
            } => Waypoint {
                offset,
                lon,
                lat,
                alt,
            },
            Sample::Untagged { lon, lat, alt } => {
                let offset = if count > 1 {
                    duration * i as f64 / (count - 1) as f64
                } else {
                    0.
                };
                Waypoint {
                    offset,
                    lon,
                    lat,
                    alt,
                }
            }
        })
        .collect()
}

/// Refuse offsets going back in time, interpolation would be meaningless.
///
pub fn check_monotonic(waypoints: &[Waypoint]) -> Result<(), CzmlError> {
    waypoints
        .windows(2)
        .enumerate()
        .try_for_each(|(i, pair)| {
            if pair[1].offset < pair[0].offset {
                Err(CzmlError::NonMonotonic {
                    index: i + 1,
                    offset: pair[1].offset,
                    previous: pair[0].offset,
                })
            } else {
                Ok(())
            }
        })
}
