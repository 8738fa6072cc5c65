//! Voice-note recording lifecycle
//!
//! State machine `Idle -> Recording -> Idle`, with a playable clip attached
//! on the returning transition. The device sits behind an injected provider:
//! acquisition can fail (permission denied, no input device) and that error
//! propagates to the caller, unlike geolocation where failure is pure state.
//!
//! Exactly one input stream may be open per recorder. There is no
//! abort-and-discard path: `stop` always finalizes the take, and `reset`
//! only clears an already-finalized clip.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::events::{CivicEvent, EventBus};
use crate::report::MediaRef;

/// Media type of a finalized voice note
pub const VOICE_NOTE_MEDIA_TYPE: &str = "audio/webm";

/// Device audio-input capability.
///
/// `acquire` requests an audio-only media stream and returns a live handle,
/// or fails with a permission/availability error.
#[async_trait]
pub trait AudioInputProvider: Send + Sync {
    async fn acquire(&self) -> Result<Box<dyn AudioInputStream>>;
}

/// A live audio input stream.
///
/// The stream buffers encoded chunks as they arrive from the device.
/// `finish` stops capture, releases the device, and hands back everything
/// buffered since acquisition.
pub trait AudioInputStream: Send {
    fn finish(self: Box<Self>) -> Vec<Vec<u8>>;
}

/// Record/stop coordinator for voice notes
pub struct AudioRecorder {
    provider: Arc<dyn AudioInputProvider>,
    events: Arc<EventBus>,
    stream: Option<Box<dyn AudioInputStream>>,
    clip: Option<MediaRef>,
}

impl AudioRecorder {
    pub fn new(provider: Arc<dyn AudioInputProvider>, events: Arc<EventBus>) -> Self {
        Self {
            provider,
            events,
            stream: None,
            clip: None,
        }
    }

    /// Whether a take is currently in progress
    pub fn is_recording(&self) -> bool {
        self.stream.is_some()
    }

    /// Finalized clip from the last completed take, if any
    pub fn clip(&self) -> Option<&MediaRef> {
        self.clip.as_ref()
    }

    /// Begin a new take.
    ///
    /// Valid only from `Idle`: a second `start` while recording is rejected
    /// with the state unchanged, so a stream is never double-acquired.
    /// Acquisition errors from the provider propagate unchanged.
    pub async fn start(&mut self) -> Result<()> {
        if self.stream.is_some() {
            return Err(Error::InvalidState(
                "recording already in progress".to_string(),
            ));
        }

        let stream = self.provider.acquire().await?;
        self.stream = Some(stream);
        info!("voice note recording started");
        self.events.emit_lossy(CivicEvent::RecordingStarted {
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Finalize the in-progress take.
    ///
    /// Valid only while `Recording`. Buffered chunks are concatenated into a
    /// single playable clip (empty chunks discarded), the device is
    /// released, and the recorder returns to `Idle` with the clip attached.
    pub fn stop(&mut self) -> Result<MediaRef> {
        let stream = self
            .stream
            .take()
            .ok_or_else(|| Error::InvalidState("no recording in progress".to_string()))?;

        let data: Vec<u8> = stream
            .finish()
            .into_iter()
            .filter(|chunk| !chunk.is_empty())
            .flatten()
            .collect();

        let clip = MediaRef::new(VOICE_NOTE_MEDIA_TYPE, data);
        info!(media_id = %clip.id, byte_len = clip.len(), "voice note finalized");
        self.events.emit_lossy(CivicEvent::RecordingFinished {
            media_id: clip.id,
            byte_len: clip.len(),
            timestamp: Utc::now(),
        });

        self.clip = Some(clip.clone());
        Ok(clip)
    }

    /// Discard the finalized clip.
    ///
    /// Used after a report is submitted, or to throw away a take. Valid only
    /// from `Idle`; an in-progress recording must be stopped first.
    pub fn reset(&mut self) -> Result<()> {
        if self.stream.is_some() {
            return Err(Error::InvalidState(
                "cannot discard while recording".to_string(),
            ));
        }
        if self.clip.take().is_some() {
            debug!("voice note discarded");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider yielding streams with scripted chunks, counting acquisitions
    struct FakeProvider {
        chunks: Vec<Vec<u8>>,
        acquisitions: AtomicUsize,
        deny: bool,
    }

    impl FakeProvider {
        fn with_chunks(chunks: Vec<Vec<u8>>) -> Self {
            Self {
                chunks,
                acquisitions: AtomicUsize::new(0),
                deny: false,
            }
        }

        fn denied() -> Self {
            Self {
                chunks: Vec::new(),
                acquisitions: AtomicUsize::new(0),
                deny: true,
            }
        }
    }

    struct FakeStream {
        chunks: Vec<Vec<u8>>,
    }

    impl AudioInputStream for FakeStream {
        fn finish(self: Box<Self>) -> Vec<Vec<u8>> {
            self.chunks
        }
    }

    #[async_trait]
    impl AudioInputProvider for FakeProvider {
        async fn acquire(&self) -> Result<Box<dyn AudioInputStream>> {
            if self.deny {
                return Err(Error::CaptureDenied("Permission denied".to_string()));
            }
            self.acquisitions.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(FakeStream {
                chunks: self.chunks.clone(),
            }))
        }
    }

    fn recorder(provider: Arc<FakeProvider>) -> AudioRecorder {
        AudioRecorder::new(provider, Arc::new(EventBus::new(16)))
    }

    #[tokio::test]
    async fn test_full_lifecycle_concatenates_chunks() {
        let provider = Arc::new(FakeProvider::with_chunks(vec![
            vec![1, 2],
            vec![],
            vec![3],
        ]));
        let mut rec = recorder(provider);

        assert!(!rec.is_recording());
        rec.start().await.unwrap();
        assert!(rec.is_recording());

        let clip = rec.stop().unwrap();
        assert!(!rec.is_recording());
        assert_eq!(clip.media_type, VOICE_NOTE_MEDIA_TYPE);
        assert_eq!(clip.bytes(), &[1, 2, 3]);
        assert_eq!(rec.clip().unwrap().id, clip.id);
    }

    #[tokio::test]
    async fn test_start_while_recording_is_rejected_without_reacquire() {
        let provider = Arc::new(FakeProvider::with_chunks(vec![vec![9]]));
        let mut rec = recorder(provider.clone());

        rec.start().await.unwrap();
        let err = rec.start().await.unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
        assert!(rec.is_recording());
        assert_eq!(provider.acquisitions.load(Ordering::SeqCst), 1);

        // The original take is still intact.
        let clip = rec.stop().unwrap();
        assert_eq!(clip.bytes(), &[9]);
    }

    #[tokio::test]
    async fn test_denied_acquisition_propagates_and_stays_idle() {
        let mut rec = recorder(Arc::new(FakeProvider::denied()));
        let err = rec.start().await.unwrap_err();
        assert!(matches!(err, Error::CaptureDenied(_)));
        assert!(!rec.is_recording());
        assert!(rec.clip().is_none());
    }

    #[tokio::test]
    async fn test_stop_without_recording_is_rejected() {
        let mut rec = recorder(Arc::new(FakeProvider::with_chunks(vec![])));
        assert!(matches!(rec.stop(), Err(Error::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_reset_clears_clip_only_when_idle() {
        let provider = Arc::new(FakeProvider::with_chunks(vec![vec![7]]));
        let mut rec = recorder(provider);

        rec.start().await.unwrap();
        assert!(matches!(rec.reset(), Err(Error::InvalidState(_))));

        rec.stop().unwrap();
        assert!(rec.clip().is_some());
        rec.reset().unwrap();
        assert!(rec.clip().is_none());

        // Reset with nothing to clear is still fine.
        rec.reset().unwrap();
    }

    #[tokio::test]
    async fn test_recording_events_are_broadcast() {
        let bus = Arc::new(EventBus::new(16));
        let mut rx = bus.subscribe();
        let mut rec = AudioRecorder::new(
            Arc::new(FakeProvider::with_chunks(vec![vec![1]])),
            bus,
        );

        rec.start().await.unwrap();
        rec.stop().unwrap();

        assert_eq!(rx.try_recv().unwrap().event_type(), "RecordingStarted");
        match rx.try_recv().unwrap() {
            CivicEvent::RecordingFinished { byte_len, .. } => assert_eq!(byte_len, 1),
            other => panic!("unexpected event {:?}", other),
        }
    }
}
