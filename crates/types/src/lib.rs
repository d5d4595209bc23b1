//! Shared data model for the plotpin point-collection toolkit.
//!
//! The core shapes are [`MapCoordinate`] (a position in map projection
//! units), [`CollectedPoint`] (one captured selection), and [`Submission`]
//! (the finalized owner/contact bundle sent to the persistence endpoint).
//! Wire-level request and response shapes live in [`wire`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod wire;

/// Maximum number of points a single capture session may collect.
pub const MAX_POINTS: usize = 5;

/// A position in map projection units.
///
/// Axis convention: `x` is longitude, `y` is latitude. Constructors take
/// `(longitude, latitude)` in that order; the wire format always uses named
/// fields so the order cannot be confused in transit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapCoordinate {
    /// East-west axis (`x`) in projection units
    pub longitude: f64,
    /// North-south axis (`y`) in projection units
    pub latitude: f64,
}

impl MapCoordinate {
    /// Creates a coordinate from `(longitude, latitude)`.
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude }
    }
}

/// A raw pointer position on the rendering surface, in screen pixels.
///
/// Screen positions are opaque to the collector; the projection collaborator
/// translates them into [`MapCoordinate`]s without interpretation here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPosition {
    pub x: f64,
    pub y: f64,
}

impl ScreenPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single captured selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectedPoint {
    /// Where the user clicked, in map projection units
    pub coordinate: MapCoordinate,
    /// Free-text annotation, attached at submission time rather than capture
    /// time (all points in one submission share the owner's name)
    #[serde(default)]
    pub label: Option<String>,
}

impl CollectedPoint {
    /// Creates an unlabeled point at `coordinate`.
    pub fn at(coordinate: MapCoordinate) -> Self {
        Self {
            coordinate,
            label: None,
        }
    }
}

/// The finalized, validated bundle sent to the persistence endpoint.
///
/// A `Submission` can only be formed through [`Submission::try_new`], so a
/// value of this type always carries a non-empty owner and contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Identifying username; never empty
    pub owner: String,
    /// Contact phone number; never empty
    pub contact: String,
    /// Captured points in click order, forming the polygon's vertex sequence
    pub points: Vec<CollectedPoint>,
}

impl Submission {
    /// Validates owner and contact and builds the submission.
    ///
    /// The owner's name is stamped into each point's label. Either all
    /// captured points are included or the whole attempt fails; there is no
    /// partial submission.
    pub fn try_new(
        owner: impl Into<String>,
        contact: impl Into<String>,
        points: Vec<CollectedPoint>,
    ) -> Result<Self, ValidationError> {
        let owner = owner.into();
        let contact = contact.into();
        if owner.is_empty() {
            return Err(ValidationError::EmptyOwner);
        }
        if contact.is_empty() {
            return Err(ValidationError::EmptyContact);
        }
        let points = points
            .into_iter()
            .map(|mut point| {
                point.label = Some(owner.clone());
                point
            })
            .collect();
        Ok(Self { owner, contact, points })
    }
}

/// Local validation failures raised when finalizing a submission.
///
/// These block the submission before any network call is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("owner must not be empty")]
    EmptyOwner,

    #[error("contact must not be empty")]
    EmptyContact,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_points() -> Vec<CollectedPoint> {
        [(1.0, 2.0), (3.0, 4.0), (5.0, 6.0)]
            .iter()
            .map(|&(lon, lat)| CollectedPoint::at(MapCoordinate::new(lon, lat)))
            .collect()
    }

    #[test]
    fn try_new_rejects_empty_owner() {
        let err = Submission::try_new("", "555", three_points()).unwrap_err();
        assert_eq!(err, ValidationError::EmptyOwner);
    }

    #[test]
    fn try_new_rejects_empty_contact() {
        let err = Submission::try_new("alice", "", three_points()).unwrap_err();
        assert_eq!(err, ValidationError::EmptyContact);
    }

    #[test]
    fn try_new_stamps_owner_into_labels() {
        let submission = Submission::try_new("alice", "555", three_points()).expect("valid submission");
        assert_eq!(submission.owner, "alice");
        assert_eq!(submission.contact, "555");
        assert_eq!(submission.points.len(), 3);
        assert!(submission.points.iter().all(|p| p.label.as_deref() == Some("alice")));
        assert_eq!(submission.points[0].coordinate, MapCoordinate::new(1.0, 2.0));
        assert_eq!(submission.points[2].coordinate, MapCoordinate::new(5.0, 6.0));
    }

    #[test]
    fn collected_point_label_defaults_to_none() {
        let json = r#"{ "coordinate": { "longitude": 32.89, "latitude": 39.93 } }"#;
        let point: CollectedPoint = serde_json::from_str(json).expect("deserialize CollectedPoint");
        assert!(point.label.is_none());
        assert_eq!(point.coordinate.longitude, 32.89);
    }
}
