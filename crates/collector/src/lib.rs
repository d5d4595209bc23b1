//! Point-collection state machine and capture session controller.
//!
//! The [`PointCollector`] owns the bounded list of user-selected coordinates
//! and enforces the five-point cap; each operation returns the [`Effect`]s
//! the surrounding UI layer must apply (add a marker, clear markers, reveal
//! the submission form). [`CaptureSession`] wires a collector to injected
//! collaborator handles: a [`MarkerRenderer`], a [`Projection`] that turns
//! screen positions into map coordinates, and a [`SubmissionSink`] that
//! persists finalized submissions.

mod collector;
mod session;
mod sink;

pub use collector::{Effect, Phase, PointCollector};
pub use session::{CaptureSession, MarkerHandle, MarkerRenderer, Projection};
pub use sink::{SubmissionSink, TransportError};
