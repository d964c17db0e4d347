//! Best-effort user feedback for incoming alerts.
//!
//! Sound and vibration are feature-detected conveniences: a failure is
//! logged and swallowed, never surfaced to the bridge. The primary sound
//! cue falls back to a synthesized tone when the asset cannot play.

use async_trait::async_trait;
use tracing::debug;

/// Error raised by a feedback sink. Always swallowed by the caller.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{reason}")]
pub struct FeedbackError {
    /// Why the cue could not be delivered.
    pub reason: String,
}

impl FeedbackError {
    /// Creates a feedback error.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Sink for alert feedback cues.
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    /// Returns the sink name for logging.
    fn name(&self) -> &str;

    /// Plays the primary alert sound.
    ///
    /// # Errors
    ///
    /// Returns `FeedbackError` when the asset cannot play; the caller
    /// falls back to [`FeedbackSink::fallback_tone`].
    async fn alert_sound(&self) -> Result<(), FeedbackError>;

    /// Plays a synthesized fallback tone.
    ///
    /// # Errors
    ///
    /// Returns `FeedbackError` when even the fallback cannot play.
    async fn fallback_tone(&self) -> Result<(), FeedbackError> {
        Ok(())
    }

    /// Whether this sink can vibrate.
    fn supports_vibration(&self) -> bool {
        false
    }

    /// Runs a vibration pattern (milliseconds, alternating on/off).
    ///
    /// # Errors
    ///
    /// Returns `FeedbackError` when vibration fails.
    async fn vibrate(&self, _pattern: &[u64]) -> Result<(), FeedbackError> {
        Ok(())
    }
}

/// Fires the full alert feedback sequence, never failing.
///
/// Plays the primary sound with tone fallback, then vibrates when
/// supported. Every failure is logged at debug level and dropped.
pub async fn fire_alert_feedback(sink: &dyn FeedbackSink, vibration_pattern: &[u64]) {
    if let Err(e) = sink.alert_sound().await {
        debug!(sink = %sink.name(), error = %e, "Alert sound failed, trying fallback tone");
        if let Err(e) = sink.fallback_tone().await {
            debug!(sink = %sink.name(), error = %e, "Fallback tone failed");
        }
    }

    if sink.supports_vibration() {
        if let Err(e) = sink.vibrate(vibration_pattern).await {
            debug!(sink = %sink.name(), error = %e, "Vibration failed");
        }
    }
}

/// Feedback sink that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFeedback;

#[async_trait]
impl FeedbackSink for NullFeedback {
    fn name(&self) -> &str {
        "null"
    }

    async fn alert_sound(&self) -> Result<(), FeedbackError> {
        Ok(())
    }
}

/// Recording sink for tests: captures every cue, optionally failing the
/// primary sound to exercise the fallback path.
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    /// Recorded cue names, in order.
    pub cues: parking_lot::Mutex<Vec<String>>,
    /// When true, `alert_sound` fails.
    pub fail_sound: bool,
    /// Whether this sink claims vibration support.
    pub vibration: bool,
}

impl RecordingFeedback {
    /// Creates a recording sink.
    #[must_use]
    pub fn new(fail_sound: bool, vibration: bool) -> Self {
        Self {
            cues: parking_lot::Mutex::new(Vec::new()),
            fail_sound,
            vibration,
        }
    }

    /// Returns the recorded cues.
    #[must_use]
    pub fn recorded(&self) -> Vec<String> {
        self.cues.lock().clone()
    }
}

#[async_trait]
impl FeedbackSink for RecordingFeedback {
    fn name(&self) -> &str {
        "recording"
    }

    async fn alert_sound(&self) -> Result<(), FeedbackError> {
        self.cues.lock().push("sound".to_string());
        if self.fail_sound {
            return Err(FeedbackError::new("asset unavailable"));
        }
        Ok(())
    }

    async fn fallback_tone(&self) -> Result<(), FeedbackError> {
        self.cues.lock().push("tone".to_string());
        Ok(())
    }

    fn supports_vibration(&self) -> bool {
        self.vibration
    }

    async fn vibrate(&self, pattern: &[u64]) -> Result<(), FeedbackError> {
        self.cues.lock().push(format!("vibrate:{pattern:?}"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sound_success_skips_fallback() {
        let sink = RecordingFeedback::new(false, false);
        fire_alert_feedback(&sink, &[200, 100, 200]).await;
        assert_eq!(sink.recorded(), vec!["sound"]);
    }

    #[tokio::test]
    async fn test_sound_failure_plays_fallback_tone() {
        let sink = RecordingFeedback::new(true, false);
        fire_alert_feedback(&sink, &[200, 100, 200]).await;
        assert_eq!(sink.recorded(), vec!["sound", "tone"]);
    }

    #[tokio::test]
    async fn test_vibration_when_supported() {
        let sink = RecordingFeedback::new(false, true);
        fire_alert_feedback(&sink, &[200, 100, 200]).await;
        assert_eq!(sink.recorded(), vec!["sound", "vibrate:[200, 100, 200]"]);
    }

    #[tokio::test]
    async fn test_null_feedback_is_silent() {
        fire_alert_feedback(&NullFeedback, &[100]).await;
    }
}
