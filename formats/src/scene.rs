//! Scene files.
//!
//! A scene describes a whole document: optional clock parameters and the ordered list of
//! entities.  It can be written in HCL or JSON, the extension decides:
//!
//! ```hcl
//! version = 1
//! start = "2024-06-14T10:00:00Z"
//! clock_end = "2024-06-14T12:00:00Z"
//! multiplier = 60
//!
//! entities = [
//!   { kind = "station", id = "TLS", lon = 1.36, lat = 43.63, alt = 150 },
//!   { kind = "plane", id = "AF123", coords = [[1.36, 43.63, 150], [2.55, 49.01, 120]] },
//! ]
//! ```
//!

use std::collections::BTreeMap;
use std::fs;
use std::path::Path as FsPath;

use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, trace};

use crate::{CzmlError, Displayable, Document, Entity, GroundStation, Plane, Sample};

/// Current scene file version
pub const SCENE_VERSION: usize = 1;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Can not read scene: {0}")]
    Io(#[from] std::io::Error),
    #[error("Bad HCL scene: {0}")]
    Hcl(#[from] hcl::Error),
    #[error("Bad JSON scene: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Bad scene file version {0}, expected {SCENE_VERSION}")]
    BadFileVersion(usize),
    #[error("No start time for {0} and none for the scene")]
    MissingStart(String),
    #[error("Unknown key `{key}` for {id}")]
    UnknownKey { id: String, key: String },
    #[error("Entity {id}: {source}")]
    Entity { id: String, source: CzmlError },
}

/// Syntax of a scene file.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SceneFormat {
    #[default]
    Hcl,
    Json,
}

impl From<&FsPath> for SceneFormat {
    fn from(path: &FsPath) -> Self {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" | "js" => SceneFormat::Json,
            _ => SceneFormat::Hcl,
        }
    }
}

/// Attributes common to all entity kinds, all optional except the id.
///
#[derive(Clone, Debug, Deserialize)]
pub struct StyleDescr {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub color: Option<[u8; 4]>,
    pub marker_scale: Option<f64>,
    pub show_label: Option<bool>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StationDescr {
    #[serde(flatten)]
    pub style: StyleDescr,
    pub lon: f64,
    pub lat: f64,
    pub alt: f64,
    /// Whatever is left, must be empty
    #[serde(flatten)]
    pub unknown: BTreeMap<String, IgnoredAny>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PlaneDescr {
    #[serde(flatten)]
    pub style: StyleDescr,
    pub show_path: Option<bool>,
    /// Either `[lon, lat, alt]` or `[offset, lon, lat, alt]`
    pub coords: Vec<Vec<f64>>,
    /// Whatever is left, must be empty
    #[serde(flatten)]
    pub unknown: BTreeMap<String, IgnoredAny>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntityDescr {
    Station(StationDescr),
    Plane(PlaneDescr),
}

impl EntityDescr {
    pub fn id(&self) -> &str {
        match self {
            EntityDescr::Station(s) => &s.style.id,
            EntityDescr::Plane(p) => &p.style.id,
        }
    }

    /// First key nobody claimed, if any.
    ///
    pub fn unknown_key(&self) -> Option<&str> {
        let unknown = match self {
            EntityDescr::Station(s) => &s.unknown,
            EntityDescr::Plane(p) => &p.unknown,
        };
        unknown.keys().next().map(String::as_str)
    }
}

/// On-disk structure for a scene
///
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneFile {
    /// Version number for safety
    pub version: usize,
    /// Default start for entities without one
    pub start: Option<DateTime<Utc>>,
    /// Default end for entities without one
    pub end: Option<DateTime<Utc>>,
    /// Forced document start
    pub clock_start: Option<DateTime<Utc>>,
    /// Forced document end
    pub clock_end: Option<DateTime<Utc>>,
    /// Clock multiplier
    pub multiplier: Option<f64>,
    /// Ordered list of entities
    pub entities: Vec<EntityDescr>,
}

/// A loaded and validated scene.
///
#[derive(Clone, Debug)]
pub struct Scene {
    /// Forced document start if any
    pub start: Option<DateTime<Utc>>,
    /// Forced document end if any
    pub end: Option<DateTime<Utc>>,
    pub multiplier: Option<f64>,
    pub entities: Vec<Entity>,
}

impl Scene {
    /// Read and validate a scene file.
    ///
    #[tracing::instrument]
    pub fn load(path: &FsPath) -> Result<Self, SceneError> {
        trace!("loading {path:?}");
        let data = fs::read_to_string(path)?;
        Scene::parse(&data, SceneFormat::from(path))
    }

    /// Parse a scene in the given syntax.
    ///
    #[tracing::instrument(skip(data))]
    pub fn parse(data: &str, format: SceneFormat) -> Result<Self, SceneError> {
        let file: SceneFile = match format {
            SceneFormat::Hcl => hcl::from_str(data)?,
            SceneFormat::Json => serde_json::from_str(data)?,
        };
        debug!("{} entities in scene", file.entities.len());
        Scene::try_from(file)
    }

    /// Document over all entities, with the scene clock parameters.
    ///
    pub fn document(&self) -> Document<'_, Entity> {
        let mut doc = Document::new(&self.entities);
        if let Some(start) = self.start {
            doc = doc.start(start);
        }
        if let Some(end) = self.end {
            doc = doc.end(end);
        }
        if let Some(multiplier) = self.multiplier {
            doc = doc.multiplier(multiplier);
        }
        doc
    }
}

impl TryFrom<SceneFile> for Scene {
    type Error = SceneError;

    fn try_from(file: SceneFile) -> Result<Self, Self::Error> {
        if file.version != SCENE_VERSION {
            return Err(SceneError::BadFileVersion(file.version));
        }

        let entities = file
            .entities
            .into_iter()
            .map(|descr| build_entity(descr, file.start, file.end))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Scene {
            start: file.clock_start,
            end: file.clock_end,
            multiplier: file.multiplier,
            entities,
        })
    }
}

fn build_entity(
    descr: EntityDescr,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<Entity, SceneError> {
    let id = descr.id().to_string();
    if let Some(key) = descr.unknown_key() {
        return Err(SceneError::UnknownKey {
            id,
            key: key.to_string(),
        });
    }
    let start = descr_start(&descr)
        .or(start)
        .ok_or_else(|| SceneError::MissingStart(id.clone()))?;
    let wrap = |source: CzmlError| SceneError::Entity {
        id: id.clone(),
        source,
    };

    let entity: Entity = match descr {
        EntityDescr::Station(s) => {
            let mut b = GroundStation::builder(&s.style.id, s.lon, s.lat, s.alt, start);
            let st = s.style;
            if let Some(name) = &st.name {
                b = b.name(name);
            }
            if let Some(description) = &st.description {
                b = b.description(description);
            }
            if let Some(image) = &st.image {
                b = b.image(image);
            }
            if let Some(color) = st.color {
                b = b.color(color);
            }
            if let Some(scale) = st.marker_scale {
                b = b.marker_scale(scale);
            }
            if let Some(show) = st.show_label {
                b = b.show_label(show);
            }
            if let Some(end) = st.end.or(end) {
                b = b.end(end);
            }
            b.build().map_err(wrap)?.into()
        }
        EntityDescr::Plane(p) => {
            let samples = p
                .coords
                .iter()
                .enumerate()
                .map(|(i, v)| Sample::from_values(i, v))
                .collect::<Result<Vec<_>, _>>()
                .map_err(wrap)?;
            let mut b = Plane::builder(&p.style.id, &samples, start);
            let st = p.style;
            if let Some(name) = &st.name {
                b = b.name(name);
            }
            if let Some(description) = &st.description {
                b = b.description(description);
            }
            if let Some(image) = &st.image {
                b = b.image(image);
            }
            if let Some(color) = st.color {
                b = b.color(color);
            }
            if let Some(scale) = st.marker_scale {
                b = b.marker_scale(scale);
            }
            if let Some(show) = st.show_label {
                b = b.show_label(show);
            }
            if let Some(show) = p.show_path {
                b = b.show_path(show);
            }
            if let Some(end) = st.end.or(end) {
                b = b.end(end);
            }
            b.build().map_err(wrap)?.into()
        }
    };
    trace!("built {}", entity.id());
    Ok(entity)
}

fn descr_start(descr: &EntityDescr) -> Option<DateTime<Utc>> {
    match descr {
        EntityDescr::Station(s) => s.style.start,
        EntityDescr::Plane(p) => p.style.start,
    }
}
