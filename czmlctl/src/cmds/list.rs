use eyre::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::trace;

use satczml_formats::{iso, Displayable, Entity, Scene};

/// List all entities of a scene
///
#[tracing::instrument(skip(scene))]
pub fn list_entities(scene: &Scene) -> Result<String> {
    trace!("enter");
    let header = vec!["Id", "Kind", "Start", "End", "Samples", "Description"];

    let mut builder = Builder::default();
    builder.push_record(header);

    scene.entities.iter().for_each(|e| {
        let (kind, samples) = match e {
            Entity::GroundStation(_) => ("station", 1),
            Entity::Plane(p) => ("plane", p.trajectory().len()),
        };
        let span = e.availability();
        builder.push_record(vec![
            e.id().to_string(),
            kind.to_string(),
            iso(&span.start()),
            iso(&span.end()),
            samples.to_string(),
            e.description().to_string(),
        ]);
    });

    let all = builder.build().with(Style::modern()).to_string();
    Ok(format!("List all entities ({}):\n{all}", scene.entities.len()))
}
