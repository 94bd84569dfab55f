use eyre::Result;
use tracing::{debug, trace};

use satczml_common::parse_window;
use satczml_formats::Scene;

use crate::{Config, ConvertOpts, Status};

/// Load the scene and generate the CZML document.
///
/// Command-line options win over the scene, which wins over the configuration file.
///
#[tracing::instrument(skip(cfg))]
pub fn convert_scene(cfg: &Config, copts: &ConvertOpts) -> Result<String> {
    trace!("convert_scene");

    let scene = Scene::load(&copts.scene)?;
    let mut doc = scene.document();

    if let Some(window) = &copts.window {
        let (start, end) = parse_window(window)?;
        if let Some(start) = start {
            doc = doc.start(start);
        }
        if let Some(end) = end {
            doc = doc.end(end);
        }
    }

    let multiplier = copts.multiplier.or(scene.multiplier).or(cfg.multiplier);
    if let Some(multiplier) = multiplier {
        if !multiplier.is_finite() {
            return Err(Status::BadMultiplier(multiplier).into());
        }
        debug!("multiplier = {multiplier}");
        doc = doc.multiplier(multiplier);
    }

    Ok(doc.to_json(copts.pretty || cfg.pretty)?)
}
