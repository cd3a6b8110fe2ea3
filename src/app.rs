use std::path::PathBuf;
use std::time::Instant;

use tracing::{debug, info};

use crate::clipboard::{self, ClipboardSink, CopyFeedback};
use crate::codegen::{Artifact, Bundle};
use crate::editor::EditorState;
use crate::export;
use crate::follow::FollowLoop;
use crate::gradient::{ConfigUpdate, GradientConfig};
use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Studio,
    Export,
    Help,
}

pub struct App {
    pub screen: Screen,
    pub config: GradientConfig,
    /// Generated artifacts for `config`, rebuilt on every change.
    pub bundle: Bundle,
    pub editor: EditorState,
    pub panel_collapsed: bool,
    pub follow: FollowLoop,
    /// Cursor blob offset after the latest tick, in viewport pixels.
    pub pointer: Option<(i64, i64)>,
    pub started: Instant,
    pub export_cursor: usize,
    pub export_scroll: u16,
    pub copy_feedback: CopyFeedback,
    pub export_dir: PathBuf,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: GradientConfig, settings: &Settings) -> Self {
        let mut follow = FollowLoop::new();
        follow.sync(config.enable_interaction);
        Self {
            screen: Screen::Studio,
            bundle: Bundle::new(&config),
            config,
            editor: EditorState::new(),
            panel_collapsed: settings.start_collapsed,
            follow,
            pointer: None,
            started: Instant::now(),
            export_cursor: 0,
            export_scroll: 0,
            copy_feedback: CopyFeedback::default(),
            export_dir: settings.export_dir(),
            status_message: None,
            should_quit: false,
        }
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Merge `update` into the configuration and regenerate.
    pub fn apply(&mut self, update: ConfigUpdate) {
        if update == ConfigUpdate::default() {
            return;
        }
        self.replace_config(self.config.merge(&update));
    }

    /// Restore the exact default configuration.
    pub fn reset(&mut self) {
        self.editor.close_picker();
        self.replace_config(GradientConfig::default());
        self.status_message = Some("Reset to defaults".to_string());
    }

    fn replace_config(&mut self, config: GradientConfig) {
        self.config = config;
        self.bundle = Bundle::new(&self.config);
        self.follow.sync(self.config.enable_interaction);
        if !self.follow.is_running() {
            self.pointer = None;
        }
        debug!("config updated: {:?}", self.config);
    }

    pub fn toggle_panel(&mut self) {
        self.panel_collapsed = !self.panel_collapsed;
        if self.panel_collapsed {
            self.editor.close_picker();
        }
    }

    // -----------------------------------------------------------------------
    // Frame loop
    // -----------------------------------------------------------------------

    /// One frame: advance the follow loop and expire stale copy feedback.
    pub fn tick(&mut self, now: Instant) {
        self.pointer = self.follow.tick();
        self.copy_feedback.expire(now);
    }

    /// Pointer moved to `(x, y)` in viewport pixels.
    pub fn on_pointer(&mut self, x: f64, y: f64) {
        self.follow.set_target(x, y);
    }

    /// Animation clock for the preview.
    pub fn elapsed_secs(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.started).as_secs_f64()
    }

    // -----------------------------------------------------------------------
    // Export modal
    // -----------------------------------------------------------------------

    pub fn open_export(&mut self) {
        self.editor.close_picker();
        self.screen = Screen::Export;
        self.export_scroll = 0;
        self.export_cursor = self.export_cursor.min(self.artifacts().len().saturating_sub(1));
    }

    pub fn close_overlay(&mut self) {
        self.screen = Screen::Studio;
    }

    pub fn artifacts(&self) -> Vec<Artifact> {
        self.bundle.available()
    }

    pub fn selected_artifact(&self) -> Option<Artifact> {
        let artifacts = self.artifacts();
        artifacts
            .get(self.export_cursor.min(artifacts.len().saturating_sub(1)))
            .copied()
    }

    pub fn export_next(&mut self) {
        if self.export_cursor + 1 < self.artifacts().len() {
            self.export_cursor += 1;
            self.export_scroll = 0;
        }
    }

    pub fn export_prev(&mut self) {
        if self.export_cursor > 0 {
            self.export_cursor -= 1;
            self.export_scroll = 0;
        }
    }

    pub fn scroll_export(&mut self, delta: i32) {
        let lines = self
            .selected_artifact()
            .and_then(|a| self.bundle.text(a))
            .map(|t| t.lines().count())
            .unwrap_or(0);
        let max = lines.saturating_sub(1).min(u16::MAX as usize) as i32;
        self.export_scroll = (self.export_scroll as i32 + delta).clamp(0, max) as u16;
    }

    /// Copy the selected artifact and start its "Copied!" indicator.
    pub fn copy_selected(&mut self, sink: &mut dyn ClipboardSink, now: Instant) {
        let Some(artifact) = self.selected_artifact() else {
            return;
        };
        let Some(text) = self.bundle.text(artifact) else {
            return;
        };
        match clipboard::copy_with_feedback(sink, &mut self.copy_feedback, artifact, text, now) {
            Ok(()) => {
                self.status_message = Some(format!("Copied {}", artifact.label()));
            }
            Err(e) => {
                self.status_message = Some(format!("Copy failed: {e:#}"));
            }
        }
    }

    /// Write every artifact into the export directory.
    pub fn write_exports(&mut self) {
        match export::export_all(&self.config, &self.export_dir) {
            Ok(paths) => {
                self.status_message = Some(export::summary(&paths, &self.export_dir));
            }
            Err(e) => {
                self.status_message = Some(format!("Export failed: {e:#}"));
            }
        }
    }

    /// Stop the follow loop before leaving the studio.
    pub fn cleanup(&mut self) {
        self.follow.stop();
        self.pointer = None;
        info!("studio closed");
    }
}
