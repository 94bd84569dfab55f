//! CZML document assembly.
//!
//! The first packet carries the clock, then one packet per entity in input order.  All entity
//! packets share the document window as their availability.
//!

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::{
    document_window, iso, Clock, ClockRange, ClockStep, CzmlError, Displayable, Interval, Packet,
};

/// Default playback speed, real time
pub const DEFAULT_MULTIPLIER: f64 = 1.;

/// A set of entities plus the clock parameters, ready to be turned into CZML.
///
#[derive(Debug)]
pub struct Document<'a, E: Displayable + Sync> {
    entities: &'a [E],
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    multiplier: f64,
}

impl<'a, E> Document<'a, E>
where
    E: Displayable + Sync,
{
    pub fn new(entities: &'a [E]) -> Self {
        Document {
            entities,
            start: None,
            end: None,
            multiplier: DEFAULT_MULTIPLIER,
        }
    }

    /// Force the beginning of the document window.
    ///
    pub fn start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    /// Force the end of the document window.
    ///
    pub fn end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Window spanning every entity unless overridden.
    ///
    pub fn window(&self) -> Result<Interval, CzmlError> {
        document_window(
            self.entities.iter().map(Displayable::availability),
            self.start,
            self.end,
        )
    }

    /// Every entity needs a non-empty and unique id.
    ///
    fn check_ids(&self) -> Result<(), CzmlError> {
        let mut seen = HashSet::new();
        for (i, e) in self.entities.iter().enumerate() {
            let id = e.id();
            if id.trim().is_empty() {
                return Err(CzmlError::MissingId(i));
            }
            if !seen.insert(id) {
                return Err(CzmlError::DuplicateId(id.to_string()));
            }
        }
        Ok(())
    }

    /// Generate all packets, document packet first.
    ///
    #[tracing::instrument(skip(self))]
    pub fn packets(&self) -> Result<Vec<Packet>, CzmlError> {
        if self.entities.is_empty() {
            return Err(CzmlError::NoEntities);
        }
        self.check_ids()?;

        let window = self.window()?;
        let interval = window.to_string();
        debug!("document window {interval}, {} entities", self.entities.len());

        let clock = Clock {
            interval: interval.clone(),
            current_time: iso(&window.start()),
            multiplier: self.multiplier,
            range: ClockRange::LoopStop,
            step: ClockStep::SystemClockMultiplier,
        };

        // Entities are independent, `collect()` keeps the input order.
        //
        let entities: Vec<Packet> = self
            .entities
            .par_iter()
            .map(|e| entity_packet(e, &interval))
            .collect();

        let mut packets = Vec::with_capacity(entities.len() + 1);
        packets.push(Packet::document(clock));
        packets.extend(entities);
        Ok(packets)
    }

    /// Serialize the whole document as a JSON array.
    ///
    pub fn to_json(&self, pretty: bool) -> Result<String, CzmlError> {
        let packets = self.packets()?;
        let json = if pretty {
            serde_json::to_string_pretty(&packets)?
        } else {
            serde_json::to_string(&packets)?
        };
        Ok(json)
    }
}

/// Build one entity packet, asking for every shape it may have.
///
fn entity_packet<E: Displayable>(e: &E, availability: &str) -> Packet {
    trace!("packet for {}", e.id());

    let mut packet = Packet {
        id: e.id().to_string(),
        availability: Some(availability.to_string()),
        description: Some(e.description().into()),
        label: e.label().cloned(),
        path: e.path().cloned(),
        position: e.position().cloned(),
        ..Default::default()
    };
    if let Some(marker) = e.marker() {
        packet.set_marker(marker.clone());
    }
    packet
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};
    use serde_json::{json, Value};

    use super::*;
    use crate::{Entity, GroundStation, Label, Marker, Plane, Point, Rgba, Sample, Style};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 14, 10, 0, 0).unwrap()
    }

    /// Marker and label only, no position nor path.
    ///
    struct Beacon {
        id: String,
        span: Interval,
        marker: Marker,
        label: Label,
    }

    impl Beacon {
        fn new(id: &str, span: Interval) -> Self {
            let style = Style {
                name: id.to_string(),
                image: None,
                color: Rgba::from([0, 255, 0, 255]),
                marker_scale: 1.,
                show_label: true,
            };
            Beacon {
                id: id.to_string(),
                span,
                marker: style.marker(),
                label: style.label(),
            }
        }
    }

    impl Displayable for Beacon {
        fn id(&self) -> &str {
            &self.id
        }

        fn description(&self) -> &str {
            "beacon"
        }

        fn availability(&self) -> Interval {
            self.span
        }

        fn marker(&self) -> Option<&Marker> {
            Some(&self.marker)
        }

        fn label(&self) -> Option<&Label> {
            Some(&self.label)
        }
    }

    fn plane_a() -> Plane {
        let samples: Vec<Sample> = vec![
            (0., 10., 20., 100.).into(),
            (1800., 11., 21., 110.).into(),
            (3600., 12., 22., 120.).into(),
        ];
        Plane::builder("A", &samples, t0())
            .end(t0() + TimeDelta::seconds(3600))
            .build()
            .unwrap()
    }

    #[test]
    fn test_shared_plane_caches() {
        let a = plane_a();
        let mut paths = Vec::new();
        let mut positions = Vec::new();

        // First access to every cache races between the workers
        //
        let (tx, rx) = std::sync::mpsc::channel();
        rayon::scope(|s| {
            for _ in 0..8 {
                let tx = tx.clone();
                let a = &a;
                s.spawn(move |_| {
                    let path = a.path().unwrap() as *const _ as usize;
                    let position = a.position().unwrap() as *const _ as usize;
                    tx.send((path, position)).unwrap();
                });
            }
        });
        drop(tx);
        for (path, position) in rx {
            paths.push(path);
            positions.push(position);
        }

        assert_eq!(8, paths.len());
        let path = a.path().unwrap() as *const _ as usize;
        let position = a.position().unwrap() as *const _ as usize;
        assert!(paths.iter().all(|&p| p == path));
        assert!(positions.iter().all(|&p| p == position));
        assert_eq!(
            vec![0., 10., 20., 100., 1800., 11., 21., 110., 3600., 12., 22., 120.],
            a.position().unwrap().cartographic_degrees
        );
    }

    #[test]
    fn test_document_example() {
        let a = plane_a();
        let b = Beacon::new(
            "B",
            Interval::new(t0(), t0() + TimeDelta::seconds(1800)).unwrap(),
        );
        let mixed: Vec<&(dyn Displayable + Sync)> = vec![&a, &b];

        let doc = Document::new(&mixed);
        let window = doc.window().unwrap();
        assert_eq!(t0(), window.start());
        assert_eq!(t0() + TimeDelta::seconds(3600), window.end());

        let v: Value = serde_json::from_str(&doc.to_json(false).unwrap()).unwrap();
        assert_eq!(3, v.as_array().unwrap().len());

        let pa = &v[1];
        assert_eq!(json!("A"), pa["id"]);
        assert_eq!(json!("2024-06-14T10:00:00Z"), pa["position"]["epoch"]);
        assert_eq!(
            json!([0.0, 10.0, 20.0, 100.0, 1800.0, 11.0, 21.0, 110.0, 3600.0, 12.0, 22.0, 120.0]),
            pa["position"]["cartographicDegrees"]
        );
        assert!(pa.get("path").is_some());

        let pb = v[2].as_object().unwrap();
        assert_eq!(json!("B"), pb["id"]);
        assert!(pb.contains_key("point"));
        assert!(pb.contains_key("label"));
        assert!(!pb.contains_key("path"));
        assert!(!pb.contains_key("position"));
        assert!(!pb.contains_key("billboard"));

        // Everybody shares the document availability
        //
        let all = json!("2024-06-14T10:00:00Z/2024-06-14T11:00:00Z");
        assert_eq!(all, v[0]["clock"]["interval"]);
        assert_eq!(all, pa["availability"]);
        assert_eq!(all, pb["availability"]);
    }

    #[test]
    fn test_document_packet_and_order() {
        let samples: Vec<Sample> = vec![(1., 1., 1.).into(), (2., 2., 2.).into()];
        let entities: Vec<Entity> = (0..20)
            .map(|i| {
                let start = t0() + TimeDelta::minutes(i);
                if i % 2 == 0 {
                    GroundStation::builder(&format!("E{i}"), 0., 0., 0., start)
                        .end(start + TimeDelta::hours(2))
                        .build()
                        .unwrap()
                        .into()
                } else {
                    Plane::builder(&format!("E{i}"), &samples, start)
                        .build()
                        .unwrap()
                        .into()
                }
            })
            .collect();

        let packets = Document::new(&entities).multiplier(60.).packets().unwrap();
        assert_eq!(21, packets.len());

        let clock = packets[0].clock.as_ref().unwrap();
        assert_eq!("document", packets[0].id);
        assert_eq!(Some("1.0".to_string()), packets[0].version);
        assert_eq!("2024-06-14T10:00:00Z/2024-06-14T12:18:00Z", clock.interval);
        assert_eq!("2024-06-14T10:00:00Z", clock.current_time);
        assert_eq!(60., clock.multiplier);

        for (i, p) in packets[1..].iter().enumerate() {
            assert_eq!(format!("E{i}"), p.id);
            assert_eq!(Some(clock.interval.clone()), p.availability);
            assert_eq!(i % 2 == 1, p.path.is_some());
            assert!(p.position.is_some());
            assert!(p.point.is_some());
        }
    }

    #[test]
    fn test_document_window_containment() {
        let entities: Vec<Entity> = vec![
            GroundStation::builder("G", 0., 0., 0., t0() - TimeDelta::hours(3))
                .end(t0())
                .build()
                .unwrap()
                .into(),
            plane_a().into(),
        ];
        let doc = Document::new(&entities);
        let w = doc.window().unwrap();
        for e in &entities {
            assert!(w.start() <= e.availability().start());
            assert!(w.end() >= e.availability().end());
        }
        assert_eq!(t0() - TimeDelta::hours(3), w.start());
        assert_eq!(t0() + TimeDelta::hours(1), w.end());
    }

    #[test]
    fn test_document_deterministic() {
        let entities = vec![plane_a()];
        let one = Document::new(&entities).to_json(true).unwrap();
        let two = Document::new(&entities).to_json(true).unwrap();
        assert_eq!(one, two);
    }

    #[test]
    fn test_document_errors() {
        let none: Vec<Plane> = vec![];
        assert!(matches!(
            Document::new(&none).packets(),
            Err(CzmlError::NoEntities)
        ));

        let span = Interval::new(t0(), t0() + TimeDelta::hours(1)).unwrap();
        let anon = vec![Beacon::new("ok", span), Beacon::new("", span)];
        assert!(matches!(
            Document::new(&anon).packets(),
            Err(CzmlError::MissingId(1))
        ));

        let twice = vec![Beacon::new("x", span), Beacon::new("x", span)];
        assert!(matches!(
            Document::new(&twice).packets(),
            Err(CzmlError::DuplicateId(id)) if id == "x"
        ));

        let bad = vec![Beacon::new("x", span)];
        assert!(matches!(
            Document::new(&bad).start(t0() + TimeDelta::hours(2)).packets(),
            Err(CzmlError::BadInterval { .. })
        ));
    }

    #[test]
    fn test_marker_kind() {
        let b = Beacon::new("B", Interval::new(t0(), t0() + TimeDelta::hours(1)).unwrap());
        assert!(matches!(b.marker(), Some(Marker::Point(Point { .. }))));
    }
}
