//! Shared test fixtures: scriptable device providers
#![allow(dead_code)]

use async_trait::async_trait;
use citypulse::capture::{AudioInputProvider, AudioInputStream, GeolocationProvider};
use citypulse::config::GeolocationConfig;
use citypulse::{Coordinates, Error, Result};

/// Geolocation provider with a scripted outcome
pub struct ScriptedGeolocation {
    pub available: bool,
    pub position: Option<Coordinates>,
}

impl ScriptedGeolocation {
    pub fn at(lat: f64, lng: f64) -> Self {
        Self {
            available: true,
            position: Some(Coordinates::new(lat, lng).expect("test coordinates in range")),
        }
    }

    pub fn unsupported() -> Self {
        Self {
            available: false,
            position: None,
        }
    }
}

#[async_trait]
impl GeolocationProvider for ScriptedGeolocation {
    fn available(&self) -> bool {
        self.available
    }

    async fn current_position(&self, _options: &GeolocationConfig) -> Result<Coordinates> {
        self.position
            .ok_or_else(|| Error::CaptureDenied("User denied the request".to_string()))
    }
}

/// Audio provider yielding a stream with scripted chunks
pub struct ScriptedAudio {
    pub chunks: Vec<Vec<u8>>,
}

impl ScriptedAudio {
    pub fn with_chunks(chunks: Vec<Vec<u8>>) -> Self {
        Self { chunks }
    }
}

pub struct ScriptedStream {
    chunks: Vec<Vec<u8>>,
}

impl AudioInputStream for ScriptedStream {
    fn finish(self: Box<Self>) -> Vec<Vec<u8>> {
        self.chunks
    }
}

#[async_trait]
impl AudioInputProvider for ScriptedAudio {
    async fn acquire(&self) -> Result<Box<dyn AudioInputStream>> {
        Ok(Box::new(ScriptedStream {
            chunks: self.chunks.clone(),
        }))
    }
}
