use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use base64::Engine;
use tracing::{debug, warn};

use crate::codegen::Artifact;

/// How long a "Copied!" indicator stays up.
pub const COPY_FEEDBACK: Duration = Duration::from_secs(2);

/// Anything that can take text for the user to paste elsewhere.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// The desktop clipboard, with an OSC 52 fallback for terminals without one
/// (SSH sessions, headless Linux).
pub struct SystemClipboard {
    native: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let native = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                debug!("native clipboard unavailable, using OSC 52: {e}");
                None
            }
        };
        Self { native }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if let Some(clipboard) = self.native.as_mut() {
            match clipboard.set_text(text.to_owned()) {
                Ok(()) => return Ok(()),
                Err(e) => warn!("native clipboard write failed, trying OSC 52: {e}"),
            }
        }
        let mut stdout = std::io::stdout();
        stdout
            .write_all(osc52_sequence(text).as_bytes())
            .and_then(|_| stdout.flush())
            .context("Failed to write OSC 52 sequence")
    }
}

/// `ESC ] 52 ; c ; <base64> BEL` sets the terminal's clipboard.
pub fn osc52_sequence(text: &str) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(text);
    format!("\x1b]52;c;{}\x07", payload)
}

/// Which artifact was copied last, and when.
///
/// A new copy replaces the previous indicator and restarts the timer.
#[derive(Debug, Default)]
pub struct CopyFeedback {
    last: Option<(Artifact, Instant)>,
}

impl CopyFeedback {
    pub fn mark(&mut self, artifact: Artifact, now: Instant) {
        self.last = Some((artifact, now));
    }

    /// The artifact whose indicator is still showing at `now`.
    pub fn active(&self, now: Instant) -> Option<Artifact> {
        self.last
            .filter(|(_, at)| now.saturating_duration_since(*at) < COPY_FEEDBACK)
            .map(|(artifact, _)| artifact)
    }

    pub fn is_showing(&self, artifact: Artifact, now: Instant) -> bool {
        self.active(now) == Some(artifact)
    }

    /// Drop an indicator that has run its course.
    pub fn expire(&mut self, now: Instant) {
        if self.active(now).is_none() {
            self.last = None;
        }
    }
}

/// Copy `text` and, on success, start the indicator for `artifact`.
/// Failures are logged and returned for display; they never panic.
pub fn copy_with_feedback(
    sink: &mut dyn ClipboardSink,
    feedback: &mut CopyFeedback,
    artifact: Artifact,
    text: &str,
    now: Instant,
) -> Result<()> {
    sink.write_text(text)
        .inspect_err(|e| warn!("copy of {} failed: {e:#}", artifact.label()))?;
    feedback.mark(artifact, now);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        texts: Vec<String>,
        fail: bool,
    }

    impl ClipboardSink for Recorder {
        fn write_text(&mut self, text: &str) -> Result<()> {
            if self.fail {
                anyhow::bail!("permission denied");
            }
            self.texts.push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn feedback_expires_after_two_seconds() {
        let t0 = Instant::now();
        let mut feedback = CopyFeedback::default();
        feedback.mark(Artifact::Markup, t0);
        assert_eq!(feedback.active(t0), Some(Artifact::Markup));
        assert!(feedback.is_showing(Artifact::Markup, t0 + Duration::from_millis(1999)));
        assert_eq!(feedback.active(t0 + COPY_FEEDBACK), None);
    }

    #[test]
    fn later_copy_replaces_indicator() {
        let t0 = Instant::now();
        let mut feedback = CopyFeedback::default();
        feedback.mark(Artifact::Markup, t0);
        let t1 = t0 + Duration::from_millis(1500);
        feedback.mark(Artifact::Stylesheet, t1);
        assert_eq!(feedback.active(t1), Some(Artifact::Stylesheet));
        assert!(!feedback.is_showing(Artifact::Markup, t1));
        // the first copy's deadline has passed, the second is still live
        assert_eq!(
            feedback.active(t0 + Duration::from_millis(2500)),
            Some(Artifact::Stylesheet)
        );
        assert_eq!(feedback.active(t1 + COPY_FEEDBACK), None);
    }

    #[test]
    fn expire_clears_stale_state() {
        let t0 = Instant::now();
        let mut feedback = CopyFeedback::default();
        feedback.mark(Artifact::Prompt, t0);
        feedback.expire(t0 + Duration::from_millis(100));
        assert!(feedback.last.is_some());
        feedback.expire(t0 + Duration::from_secs(3));
        assert!(feedback.last.is_none());
    }

    #[test]
    fn copy_records_text_and_feedback() {
        let now = Instant::now();
        let mut sink = Recorder::default();
        let mut feedback = CopyFeedback::default();
        copy_with_feedback(&mut sink, &mut feedback, Artifact::Script, "move();", now).unwrap();
        assert_eq!(sink.texts, vec!["move();"]);
        assert_eq!(feedback.active(now), Some(Artifact::Script));
    }

    #[test]
    fn failed_copy_leaves_indicator_alone() {
        let now = Instant::now();
        let mut sink = Recorder {
            fail: true,
            ..Recorder::default()
        };
        let mut feedback = CopyFeedback::default();
        let result = copy_with_feedback(&mut sink, &mut feedback, Artifact::Prompt, "x", now);
        assert!(result.is_err());
        assert_eq!(feedback.active(now), None);
    }

    #[test]
    fn osc52_encodes_payload() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }
}
