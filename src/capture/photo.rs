//! Photo attachment
//!
//! The external file-picker yields a selected file; this component turns it
//! into a displayable media reference for the in-progress submission. The
//! only validation is the media-type constraint at the selection boundary.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::error::{Error, Result};
use crate::events::{CivicEvent, EventBus};
use crate::report::MediaRef;

/// A file yielded by the external file-selection surface
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub data: Vec<u8>,
}

/// Holds the photo attached to the in-progress submission, if any
pub struct PhotoAttachment {
    events: Arc<EventBus>,
    photo: Option<MediaRef>,
}

impl PhotoAttachment {
    pub fn new(events: Arc<EventBus>) -> Self {
        Self {
            events,
            photo: None,
        }
    }

    /// Currently attached photo, if any
    pub fn current(&self) -> Option<&MediaRef> {
        self.photo.as_ref()
    }

    /// Attach a selected image file, replacing any prior attachment.
    ///
    /// Rejects files whose media type is not `image/*`; everything else is
    /// the file picker's responsibility.
    pub fn attach(&mut self, file: SelectedFile) -> Result<MediaRef> {
        if !file.media_type.starts_with("image/") {
            return Err(Error::InvalidInput(format!(
                "expected an image file, got {}",
                file.media_type
            )));
        }

        let media = MediaRef::new(file.media_type, file.data);
        debug!(media_id = %media.id, name = %file.name, "photo attached");
        self.events.emit_lossy(CivicEvent::PhotoAttached {
            media_id: media.id,
            timestamp: Utc::now(),
        });
        self.photo = Some(media.clone());
        Ok(media)
    }

    /// Release the current attachment
    pub fn clear(&mut self) {
        if self.photo.take().is_some() {
            debug!("photo attachment cleared");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment() -> PhotoAttachment {
        PhotoAttachment::new(Arc::new(EventBus::new(16)))
    }

    fn image(name: &str) -> SelectedFile {
        SelectedFile {
            name: name.to_string(),
            media_type: "image/jpeg".to_string(),
            data: vec![0xff, 0xd8],
        }
    }

    #[test]
    fn test_attach_image() {
        let mut photo = attachment();
        let media = photo.attach(image("pothole.jpg")).unwrap();
        assert_eq!(media.media_type, "image/jpeg");
        assert_eq!(photo.current().unwrap().id, media.id);
    }

    #[test]
    fn test_attach_rejects_non_image() {
        let mut photo = attachment();
        let err = photo
            .attach(SelectedFile {
                name: "notes.pdf".to_string(),
                media_type: "application/pdf".to_string(),
                data: vec![1],
            })
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(photo.current().is_none());
    }

    #[test]
    fn test_attach_replaces_prior_photo() {
        let mut photo = attachment();
        let first = photo.attach(image("a.jpg")).unwrap();
        let second = photo.attach(image("b.jpg")).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(photo.current().unwrap().id, second.id);
    }

    #[test]
    fn test_clear_releases_attachment() {
        let mut photo = attachment();
        photo.attach(image("a.jpg")).unwrap();
        photo.clear();
        assert!(photo.current().is_none());
        // Clearing twice is harmless.
        photo.clear();
    }
}
