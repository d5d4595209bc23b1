//! Wire shapes for the polygon persistence endpoint.
//!
//! The POST body and the GET response element share one layout: an owner and
//! contact pair plus an ordered list of vertices. Vertices use named
//! `latitude`/`longitude` fields; earlier revisions of the original endpoint
//! flipped positional axes on redisplay, which named fields rule out.

use serde::{Deserialize, Serialize};

use crate::{CollectedPoint, MapCoordinate, Submission};

/// One polygon vertex as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WirePoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<MapCoordinate> for WirePoint {
    fn from(coordinate: MapCoordinate) -> Self {
        Self {
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        }
    }
}

impl From<WirePoint> for MapCoordinate {
    fn from(point: WirePoint) -> Self {
        Self {
            longitude: point.longitude,
            latitude: point.latitude,
        }
    }
}

/// Body of the submission POST.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionBody {
    pub owner: String,
    pub contact: String,
    /// Vertices in click order
    pub points: Vec<WirePoint>,
}

impl From<&Submission> for SubmissionBody {
    fn from(submission: &Submission) -> Self {
        Self {
            owner: submission.owner.clone(),
            contact: submission.contact.clone(),
            points: submission.points.iter().map(|p| p.coordinate.into()).collect(),
        }
    }
}

/// One previously submitted polygon, as returned by the query endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonRecord {
    pub owner: String,
    pub contact: String,
    /// Vertices in original click order
    pub points: Vec<WirePoint>,
}

impl PolygonRecord {
    /// Returns the record's vertices as map coordinates, preserving order.
    pub fn coordinates(&self) -> Vec<MapCoordinate> {
        self.points.iter().map(|&p| p.into()).collect()
    }
}

impl From<&PolygonRecord> for Vec<CollectedPoint> {
    fn from(record: &PolygonRecord) -> Self {
        record
            .points
            .iter()
            .map(|&p| CollectedPoint {
                coordinate: p.into(),
                label: Some(record.owner.clone()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_round_trips_through_wire_shapes() {
        let points = vec![
            CollectedPoint::at(MapCoordinate::new(1.0, 2.0)),
            CollectedPoint::at(MapCoordinate::new(3.0, 4.0)),
        ];
        let submission = Submission::try_new("alice", "555", points).expect("valid submission");

        let body = SubmissionBody::from(&submission);
        let json = serde_json::to_string(&body).expect("serialize body");
        let record: PolygonRecord = serde_json::from_str(&json).expect("parse as record");

        assert_eq!(record.owner, "alice");
        assert_eq!(record.contact, "555");
        let coords = record.coordinates();
        assert_eq!(coords, vec![MapCoordinate::new(1.0, 2.0), MapCoordinate::new(3.0, 4.0)]);
    }

    #[test]
    fn wire_point_axis_fields_are_named() {
        let body = SubmissionBody {
            owner: "alice".into(),
            contact: "555".into(),
            points: vec![WirePoint {
                latitude: 39.93,
                longitude: 32.89,
            }],
        };
        let json = serde_json::to_value(&body).expect("serialize body");
        assert_eq!(json["points"][0]["latitude"], 39.93);
        assert_eq!(json["points"][0]["longitude"], 32.89);
    }

    #[test]
    fn record_points_preserve_order_and_owner_label() {
        let json = r#"{
            "owner": "bob",
            "contact": "123",
            "points": [
                { "latitude": 2.0, "longitude": 1.0 },
                { "latitude": 4.0, "longitude": 3.0 }
            ]
        }"#;
        let record: PolygonRecord = serde_json::from_str(json).expect("deserialize PolygonRecord");
        let collected: Vec<CollectedPoint> = (&record).into();
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].coordinate, MapCoordinate::new(1.0, 2.0));
        assert_eq!(collected[1].coordinate, MapCoordinate::new(3.0, 4.0));
        assert!(collected.iter().all(|p| p.label.as_deref() == Some("bob")));
    }
}
