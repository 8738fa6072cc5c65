//! Multi-modal capture coordinators
//!
//! One sub-module per evidence modality: a one-shot geolocation query, a
//! record/stop voice-note lifecycle, and a synchronous photo attachment.
//! Each component is a plain state struct mutated via explicit methods,
//! with the device itself behind an injected provider trait. Exactly one
//! device request may be in flight per component at a time.

pub mod audio;
pub mod geolocation;
pub mod photo;

pub use audio::{AudioInputProvider, AudioInputStream, AudioRecorder};
pub use geolocation::{GeolocationCapture, GeolocationProvider};
pub use photo::{PhotoAttachment, SelectedFile};
