//! The point-collection finite state machine.

use plotpin_types::{CollectedPoint, MapCoordinate, MAX_POINTS, Submission, ValidationError};
use tracing::debug;

/// Capture phase of the collector.
///
/// `Cancelled` is observably equivalent to `Idle` (no points, capture
/// disarmed) but kept distinct so callers can tell an explicit user cancel
/// apart from a fresh or reset session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Initial state; clicks are not captured
    #[default]
    Idle,
    /// Click capture is armed and fewer than five points are held
    Capturing,
    /// Five points are held; further clicks are ignored
    Full,
    /// The user cancelled; points cleared, capture disarmed
    Cancelled,
}

/// Side effects a state transition asks the UI layer to perform.
///
/// The collector never touches the rendering surface itself; it emits these
/// and the session controller applies them to the injected collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Draw a marker at the newly captured coordinate
    AddMarkerRequested(MapCoordinate),
    /// Remove every marker added during this session
    ClearMarkersRequested,
    /// The fifth point was captured; reveal the submission form
    SubmissionFormRequested,
}

/// Owns the ordered, bounded list of captured points.
#[derive(Debug, Clone, Default)]
pub struct PointCollector {
    phase: Phase,
    points: Vec<CollectedPoint>,
}

impl PointCollector {
    /// Creates a collector in [`Phase::Idle`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Current capture phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of points captured so far.
    pub fn count(&self) -> usize {
        self.points.len()
    }

    /// Captured points in click order.
    pub fn points(&self) -> &[CollectedPoint] {
        &self.points
    }

    /// Whether click events are currently being captured.
    pub fn is_armed(&self) -> bool {
        self.phase == Phase::Capturing
    }

    /// Arms click capture from `Idle` or `Cancelled`; no-op otherwise.
    pub fn arm(&mut self) -> Vec<Effect> {
        match self.phase {
            Phase::Idle | Phase::Cancelled => {
                self.points.clear();
                self.phase = Phase::Capturing;
                debug!("capture armed");
            }
            Phase::Capturing | Phase::Full => {}
        }
        Vec::new()
    }

    /// Records one click at `coordinate`.
    ///
    /// Ignored unless capture is armed. The coordinate is taken as-is;
    /// validity is the projection collaborator's concern. Appending the fifth
    /// point transitions to [`Phase::Full`] and requests the submission form
    /// exactly once; clicks arriving while full are idempotent no-ops.
    pub fn capture(&mut self, coordinate: MapCoordinate) -> Vec<Effect> {
        if self.phase != Phase::Capturing {
            return Vec::new();
        }

        self.points.push(CollectedPoint::at(coordinate));
        debug!(count = self.points.len(), ?coordinate, "point captured");

        let mut effects = vec![Effect::AddMarkerRequested(coordinate)];
        if self.points.len() == MAX_POINTS {
            self.phase = Phase::Full;
            effects.push(Effect::SubmissionFormRequested);
        }
        effects
    }

    /// Builds a validated [`Submission`] from all captured points.
    ///
    /// Validation failures leave the captured points untouched so the user
    /// can correct the inputs and retry.
    pub fn finalize(&self, owner: &str, contact: &str) -> Result<Submission, ValidationError> {
        Submission::try_new(owner, contact, self.points.clone())
    }

    /// Cancels the session: clears points, disarms capture, asks the UI to
    /// remove every marker.
    pub fn cancel(&mut self) -> Vec<Effect> {
        self.points.clear();
        self.phase = Phase::Cancelled;
        debug!("capture cancelled");
        vec![Effect::ClearMarkersRequested]
    }

    /// Returns to [`Phase::Idle`] after a successful submission.
    ///
    /// Replaces the page reload the browser original relied on.
    pub fn reset(&mut self) -> Vec<Effect> {
        self.points.clear();
        self.phase = Phase::Idle;
        vec![Effect::ClearMarkersRequested]
    }
}
