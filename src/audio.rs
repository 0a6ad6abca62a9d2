//! Word audio playback.
//!
//! No backend is wired up yet; every platform reports `NotSupported` and
//! the controller surfaces a "coming soon" notice.
//
// TODO: integrate a text-to-speech backend (server-side audio URLs or a
// local TTS engine) and replace the stub below.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AudioError {
    #[error("audio playback is not supported yet")]
    NotSupported,
}

#[derive(Debug, Clone)]
pub struct PlaybackStatus {
    pub available: bool,
    pub speaking: bool,
}

pub fn play(word: &str) -> Result<(), AudioError> {
    tracing::info!(word, "audio playback requested");
    Err(AudioError::NotSupported)
}

pub fn status() -> PlaybackStatus {
    PlaybackStatus {
        available: false,
        speaking: false,
    }
}
