//! Capture session controller.
//!
//! Collaborator handles are injected rather than looked up at call time: the
//! session holds a marker renderer and a projection and routes every click
//! through them, applying whatever [`Effect`]s the collector emits.

use plotpin_types::{MapCoordinate, ScreenPosition, Submission, ValidationError};
use tracing::{debug, warn};

use crate::{Effect, PointCollector, TransportError};

/// Opaque identifier for one rendered marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerHandle(pub u64);

/// Draws and removes point markers on the rendering surface.
///
/// Rendering is infallible by contract; an implementation whose surface has
/// gone missing should log and no-op rather than fail the session.
pub trait MarkerRenderer {
    fn add_marker(&mut self, coordinate: MapCoordinate) -> MarkerHandle;
    fn remove_all(&mut self);
}

/// Translates raw screen positions into map projection coordinates.
///
/// Owned by the event source; coordinates pass through the session
/// uninterpreted, so out-of-bounds values are this collaborator's concern.
pub trait Projection {
    fn to_map(&self, position: ScreenPosition) -> MapCoordinate;
}

/// Wires a [`PointCollector`] to its injected collaborators.
#[derive(Debug)]
pub struct CaptureSession<R, P> {
    collector: PointCollector,
    renderer: R,
    projection: P,
    submission_ready: bool,
}

impl<R, P> CaptureSession<R, P>
where
    R: MarkerRenderer,
    P: Projection,
{
    pub fn new(renderer: R, projection: P) -> Self {
        Self {
            collector: PointCollector::new(),
            renderer,
            projection,
            submission_ready: false,
        }
    }

    /// Read-only view of the underlying collector.
    pub fn collector(&self) -> &PointCollector {
        &self.collector
    }

    /// Whether the five-point cap was reached and the submission form should
    /// be visible.
    pub fn submission_ready(&self) -> bool {
        self.submission_ready
    }

    /// Arms click capture (the "start capture" trigger).
    pub fn start_capture(&mut self) {
        let effects = self.collector.arm();
        self.apply(effects);
    }

    /// Routes one raw click through the projection into the collector.
    pub fn handle_click(&mut self, position: ScreenPosition) {
        let coordinate = self.projection.to_map(position);
        let effects = self.collector.capture(coordinate);
        self.apply(effects);
    }

    /// Captures a coordinate that is already in map projection units.
    pub fn capture(&mut self, coordinate: MapCoordinate) {
        let effects = self.collector.capture(coordinate);
        self.apply(effects);
    }

    /// The "cancel" trigger: clears points and markers, disarms capture.
    pub fn cancel(&mut self) {
        let effects = self.collector.cancel();
        self.apply(effects);
        self.submission_ready = false;
    }

    /// Builds the validated submission from the captured points.
    pub fn finalize(&self, owner: &str, contact: &str) -> Result<Submission, ValidationError> {
        self.collector.finalize(owner, contact)
    }

    /// Feeds the sink's outcome back into the session.
    ///
    /// Success performs the full reset the browser original achieved with a
    /// page reload. Failure is logged and state is left untouched so the user
    /// can retry with the same captured points.
    pub fn apply_submit_outcome(&mut self, outcome: Result<(), TransportError>) {
        match outcome {
            Ok(()) => {
                debug!("submission accepted; resetting session");
                let effects = self.collector.reset();
                self.apply(effects);
                self.submission_ready = false;
            }
            Err(error) => {
                warn!(%error, "submission failed; keeping captured points for retry");
            }
        }
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::AddMarkerRequested(coordinate) => {
                    let handle = self.renderer.add_marker(coordinate);
                    debug!(?handle, ?coordinate, "marker added");
                }
                Effect::ClearMarkersRequested => self.renderer.remove_all(),
                Effect::SubmissionFormRequested => self.submission_ready = true,
            }
        }
    }
}
