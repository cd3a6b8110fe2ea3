/// Fraction of the remaining distance covered per tick is `1 / DAMPING`.
pub const DAMPING: f64 = 20.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Follow {
    current: (f64, f64),
    target: (f64, f64),
}

/// The cursor blob's smoothing loop, as a start/stop handle.
///
/// Each [`tick`](FollowLoop::tick) eases the position toward the latest
/// pointer sample by `1/20` of the gap. The owner calls `tick` once per
/// frame; while stopped, ticks do nothing and pointer samples are dropped.
#[derive(Debug, Default)]
pub struct FollowLoop {
    state: Option<Follow>,
}

impl FollowLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin following from the origin. No-op if already running.
    pub fn start(&mut self) {
        if self.state.is_none() {
            self.state = Some(Follow::default());
        }
    }

    pub fn stop(&mut self) {
        self.state = None;
    }

    pub fn is_running(&self) -> bool {
        self.state.is_some()
    }

    /// Start or stop so the loop runs exactly when `enabled`.
    pub fn sync(&mut self, enabled: bool) {
        if enabled {
            self.start();
        } else {
            self.stop();
        }
    }

    /// Record the latest pointer position.
    pub fn set_target(&mut self, x: f64, y: f64) {
        if let Some(state) = self.state.as_mut() {
            state.target = (x, y);
        }
    }

    /// Advance one frame and return the rounded position, or `None` when
    /// stopped.
    pub fn tick(&mut self) -> Option<(i64, i64)> {
        let state = self.state.as_mut()?;
        state.current.0 += (state.target.0 - state.current.0) / DAMPING;
        state.current.1 += (state.target.1 - state.current.1) / DAMPING;
        Some(js_round(state.current))
    }

    /// Position after the last tick, without advancing.
    pub fn position(&self) -> Option<(i64, i64)> {
        self.state.map(|s| js_round(s.current))
    }
}

/// `Math.round` semantics: halves round toward positive infinity.
fn js_round((x, y): (f64, f64)) -> (i64, i64) {
    ((x + 0.5).floor() as i64, (y + 0.5).floor() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_loop_does_nothing() {
        let mut follow = FollowLoop::new();
        assert!(!follow.is_running());
        follow.set_target(100.0, 100.0);
        assert_eq!(follow.tick(), None);
        assert_eq!(follow.position(), None);
    }

    #[test]
    fn eases_by_one_twentieth_per_tick() {
        let mut follow = FollowLoop::new();
        follow.start();
        follow.set_target(200.0, -400.0);
        assert_eq!(follow.tick(), Some((10, -20)));
        // second tick covers 1/20 of the remaining 190 / -380
        assert_eq!(follow.tick(), Some((20, -39)));
    }

    #[test]
    fn converges_toward_target() {
        let mut follow = FollowLoop::new();
        follow.start();
        follow.set_target(640.0, 360.0);
        let mut last = (0, 0);
        for _ in 0..400 {
            last = follow.tick().unwrap();
        }
        assert_eq!(last, (640, 360));
    }

    #[test]
    fn stop_cancels_and_restart_resets() {
        let mut follow = FollowLoop::new();
        follow.start();
        follow.set_target(1000.0, 0.0);
        follow.tick();
        follow.tick();
        follow.stop();
        assert_eq!(follow.tick(), None);

        follow.start();
        assert_eq!(follow.position(), Some((0, 0)));
        // the old target is gone too
        assert_eq!(follow.tick(), Some((0, 0)));
    }

    #[test]
    fn start_while_running_keeps_state() {
        let mut follow = FollowLoop::new();
        follow.start();
        follow.set_target(100.0, 0.0);
        follow.tick();
        follow.start();
        assert_eq!(follow.position(), Some((5, 0)));
    }

    #[test]
    fn sync_matches_flag() {
        let mut follow = FollowLoop::new();
        follow.sync(true);
        assert!(follow.is_running());
        follow.sync(true);
        assert!(follow.is_running());
        follow.sync(false);
        assert!(!follow.is_running());
    }

    #[test]
    fn rounds_halves_up() {
        assert_eq!(js_round((2.5, -2.5)), (3, -2));
    }
}
