//! Intake controller
//!
//! **Responsibilities:**
//! - Own the three capture components and the submission form fields
//! - Enforce the report content invariant at the submit boundary
//! - Construct immutable reports and append them to the store
//! - Reset transient state between consecutive submissions
//!
//! Submission is deliberately not idempotent: two submits with unchanged
//! inputs create two distinct reports, each a separate observation.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::capture::{
    AudioInputProvider, AudioRecorder, GeolocationCapture, GeolocationProvider, PhotoAttachment,
};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::events::{CivicEvent, EventBus};
use crate::report::{Category, Report};
use crate::store::ReportStore;

/// Orchestrates capture components and form fields into report submissions
pub struct IntakeController {
    store: Arc<ReportStore>,
    events: Arc<EventBus>,
    /// Location capture session
    pub location: GeolocationCapture,
    /// Voice-note recorder
    pub recorder: AudioRecorder,
    /// Photo attachment slot
    pub photo: PhotoAttachment,
    description: String,
    category: Category,
    urgency: u8,
    default_urgency: u8,
}

impl IntakeController {
    /// Wire up the controller from process-start dependencies.
    ///
    /// The store, event bus, and device providers are constructed once by
    /// the host process and injected here; nothing is looked up ambiently.
    pub fn new(
        store: Arc<ReportStore>,
        events: Arc<EventBus>,
        geolocation: Arc<dyn GeolocationProvider>,
        audio: Arc<dyn AudioInputProvider>,
        config: &Config,
    ) -> Self {
        let default_urgency = config.intake.default_urgency.clamp(1, 5);
        Self {
            location: GeolocationCapture::new(
                geolocation,
                config.geolocation.clone(),
                events.clone(),
            ),
            recorder: AudioRecorder::new(audio, events.clone()),
            photo: PhotoAttachment::new(events.clone()),
            store,
            events,
            description: String::new(),
            category: Category::Sanitation,
            urgency: default_urgency,
            default_urgency,
        }
    }

    /// Current free-text description
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, text: impl Into<String>) {
        self.description = text.into();
    }

    /// Currently selected category
    pub fn category(&self) -> Category {
        self.category
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    /// Currently selected urgency
    pub fn urgency(&self) -> u8 {
        self.urgency
    }

    /// Select an urgency in [1, 5]
    pub fn set_urgency(&mut self, urgency: u8) -> Result<()> {
        if !(1..=5).contains(&urgency) {
            return Err(Error::InvalidInput(format!(
                "urgency {} out of range [1, 5]",
                urgency
            )));
        }
        self.urgency = urgency;
        Ok(())
    }

    /// Whether the current inputs satisfy the content invariant.
    ///
    /// Drives the submit affordance: the host disables the control while
    /// this is false instead of surfacing an error.
    pub fn can_submit(&self) -> bool {
        !self.description.trim().is_empty()
            || self.photo.current().is_some()
            || self.recorder.clip().is_some()
            || self.location.coords().is_some()
    }

    /// Validate and submit the current inputs as a new report.
    ///
    /// On success the report is appended to the store and the transient
    /// form state is reset: photo, description, finalized voice note, and
    /// urgency (back to the configured default). The last-known location is
    /// retained so consecutive reports from the same spot skip a second
    /// position query. A take still being recorded at submit time is left
    /// untouched.
    pub fn submit(&mut self) -> Result<Report> {
        if !self.can_submit() {
            return Err(Error::Validation(
                "a report needs a description, photo, voice note, or location".to_string(),
            ));
        }

        let report = Report {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            photo: self.photo.current().cloned(),
            audio: self.recorder.clip().cloned(),
            coords: self.location.coords(),
            category: self.category,
            urgency: self.urgency,
            description: self.description.trim().to_string(),
        };

        info!(
            report_id = %report.id,
            category = %report.category,
            urgency = report.urgency,
            "report submitted"
        );
        self.store.append(report.clone());
        self.events.emit_lossy(CivicEvent::ReportSubmitted {
            report_id: report.id,
            category: report.category,
            urgency: report.urgency,
            timestamp: report.created_at,
        });

        self.photo.clear();
        self.description.clear();
        self.urgency = self.default_urgency;
        if !self.recorder.is_recording() {
            let _ = self.recorder.reset();
        }

        Ok(report)
    }

    /// Pass along free-form resident feedback.
    ///
    /// Feedback is not a report: it is logged and broadcast, never stored.
    pub fn record_feedback(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        info!(len = text.len(), "resident feedback received");
        self.events.emit_lossy(CivicEvent::FeedbackReceived {
            text: text.to_string(),
            timestamp: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{AudioInputStream, SelectedFile};
    use crate::config::GeolocationConfig;
    use crate::report::Coordinates;
    use async_trait::async_trait;

    struct FixedPosition(Coordinates);

    #[async_trait]
    impl GeolocationProvider for FixedPosition {
        fn available(&self) -> bool {
            true
        }

        async fn current_position(&self, _options: &GeolocationConfig) -> Result<Coordinates> {
            Ok(self.0)
        }
    }

    struct OneChunkAudio;

    struct OneChunkStream;

    impl AudioInputStream for OneChunkStream {
        fn finish(self: Box<Self>) -> Vec<Vec<u8>> {
            vec![vec![0xaa, 0xbb]]
        }
    }

    #[async_trait]
    impl AudioInputProvider for OneChunkAudio {
        async fn acquire(&self) -> Result<Box<dyn AudioInputStream>> {
            Ok(Box::new(OneChunkStream))
        }
    }

    fn controller() -> (IntakeController, Arc<ReportStore>) {
        let store = Arc::new(ReportStore::new());
        let events = Arc::new(EventBus::new(16));
        let controller = IntakeController::new(
            store.clone(),
            events,
            Arc::new(FixedPosition(Coordinates::new(40.0, -73.0).unwrap())),
            Arc::new(OneChunkAudio),
            &Config::default(),
        );
        (controller, store)
    }

    #[test]
    fn test_empty_submission_is_rejected() {
        let (mut intake, store) = controller();
        assert!(!intake.can_submit());
        assert!(matches!(intake.submit(), Err(Error::Validation(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_whitespace_description_does_not_satisfy_invariant() {
        let (mut intake, store) = controller();
        intake.set_description("   \n\t ");
        assert!(!intake.can_submit());
        assert!(intake.submit().is_err());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_coords_only_submission_succeeds() {
        let (mut intake, store) = controller();
        intake.location.request_location().await;
        assert!(intake.can_submit());

        let report = intake.submit().unwrap();
        assert_eq!(store.len(), 1);
        assert!(report.photo.is_none());
        assert!(report.audio.is_none());
        assert_eq!(report.description, "");
        assert_eq!(
            report.coords,
            Some(Coordinates::new(40.0, -73.0).unwrap())
        );
    }

    #[tokio::test]
    async fn test_submit_resets_form_but_keeps_location() {
        let (mut intake, _store) = controller();
        intake.location.request_location().await;
        intake.recorder.start().await.unwrap();
        intake.recorder.stop().unwrap();
        intake
            .photo
            .attach(SelectedFile {
                name: "curb.jpg".to_string(),
                media_type: "image/jpeg".to_string(),
                data: vec![1],
            })
            .unwrap();
        intake.set_description("  broken curb  ");
        intake.set_urgency(5).unwrap();

        let report = intake.submit().unwrap();
        assert_eq!(report.description, "broken curb");
        assert_eq!(report.urgency, 5);
        assert!(report.photo.is_some());
        assert!(report.audio.is_some());

        // Transient state reset, location retained.
        assert_eq!(intake.description(), "");
        assert_eq!(intake.urgency(), 3);
        assert!(intake.photo.current().is_none());
        assert!(intake.recorder.clip().is_none());
        assert!(intake.location.coords().is_some());
        assert!(intake.can_submit());
    }

    #[test]
    fn test_double_submit_creates_distinct_reports() {
        let (mut intake, store) = controller();
        intake.set_description("overflowing bin");
        let first = intake.submit().unwrap();

        intake.set_description("overflowing bin");
        let second = intake.submit().unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.len(), 2);
        assert!(first.created_at <= second.created_at);
    }

    #[test]
    fn test_urgency_bounds() {
        let (mut intake, _store) = controller();
        assert!(intake.set_urgency(0).is_err());
        assert!(intake.set_urgency(6).is_err());
        intake.set_urgency(1).unwrap();
        assert_eq!(intake.urgency(), 1);
    }

    #[tokio::test]
    async fn test_submit_during_recording_leaves_take_alone() {
        let (mut intake, _store) = controller();
        intake.set_description("noisy generator");
        intake.recorder.start().await.unwrap();

        let report = intake.submit().unwrap();
        assert!(report.audio.is_none());
        assert!(intake.recorder.is_recording());

        let clip = intake.recorder.stop().unwrap();
        assert_eq!(clip.bytes(), &[0xaa, 0xbb]);
    }

    #[test]
    fn test_submit_emits_event() {
        let store = Arc::new(ReportStore::new());
        let events = Arc::new(EventBus::new(16));
        let mut rx = events.subscribe();
        let mut intake = IntakeController::new(
            store,
            events,
            Arc::new(FixedPosition(Coordinates::new(0.0, 0.0).unwrap())),
            Arc::new(OneChunkAudio),
            &Config::default(),
        );

        intake.set_description("streetlight out");
        let report = intake.submit().unwrap();

        match rx.try_recv().unwrap() {
            CivicEvent::ReportSubmitted { report_id, .. } => assert_eq!(report_id, report.id),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_feedback_is_broadcast_not_stored() {
        let (intake, store) = controller();
        let mut rx = intake.events.subscribe();

        intake.record_feedback("  love the app  ");
        match rx.try_recv().unwrap() {
            CivicEvent::FeedbackReceived { text, .. } => assert_eq!(text, "love the app"),
            other => panic!("unexpected event {:?}", other),
        }
        assert!(store.is_empty());

        intake.record_feedback("   ");
        assert!(rx.try_recv().is_err());
    }
}
