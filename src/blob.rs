//! Layout and motion of the six gradient blobs.
//!
//! The stylesheet renders these numbers as CSS and the terminal preview
//! evaluates them directly, so both always agree on where a blob sits and
//! how it moves.

/// How a blob's box is sized relative to the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlobSize {
    /// `var(--circle-size)` on each axis.
    Circle,
    /// `calc(var(--circle-size) * 2)` on each axis.
    DoubleCircle,
    /// The full container, anchored at `-50%` so its centre sits on the
    /// container origin.
    Full,
}

impl BlobSize {
    /// Fraction of the container covered on each axis.
    pub fn factor(&self, circle_size: f64) -> f64 {
        match self {
            BlobSize::Circle => circle_size / 100.0,
            BlobSize::DoubleCircle => circle_size / 50.0,
            BlobSize::Full => 1.0,
        }
    }

    pub fn css_extent(&self) -> &'static str {
        match self {
            BlobSize::Circle => "var(--circle-size)",
            BlobSize::DoubleCircle => "calc(var(--circle-size) * 2)",
            BlobSize::Full => "100%",
        }
    }

    /// CSS for `top`/`left`, centering the box then shifting by `offset_px`.
    pub fn css_position(&self, offset_px: f64) -> String {
        let base = match self {
            BlobSize::Circle => "50% - var(--circle-size) / 2",
            BlobSize::DoubleCircle => "50% - var(--circle-size)",
            BlobSize::Full => return "-50%".to_string(),
        };
        format!("calc({}{})", base, px_term(offset_px))
    }
}

/// Rotation pivot, relative to the blob box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Origin {
    /// `center center`
    Center,
    /// `calc(50% + dx)`; the vertical component stays centred.
    OffsetX(f64),
    /// `calc(50% + dx) calc(50% + dy)`
    Offset(f64, f64),
}

impl Origin {
    /// Pivot offset from the box centre, in px.
    pub fn offset(&self) -> (f64, f64) {
        match *self {
            Origin::Center => (0.0, 0.0),
            Origin::OffsetX(dx) => (dx, 0.0),
            Origin::Offset(dx, dy) => (dx, dy),
        }
    }

    pub fn css(&self) -> String {
        match *self {
            Origin::Center => "center center".to_string(),
            Origin::OffsetX(dx) => format!("calc(50%{})", px_term(dx)),
            Origin::Offset(dx, dy) => {
                format!("calc(50%{}) calc(50%{})", px_term(dx), px_term(dy))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyframes {
    MoveInCircle,
    MoveVertical,
    MoveHorizontal,
}

impl Keyframes {
    pub const ALL: [Keyframes; 3] = [
        Keyframes::MoveInCircle,
        Keyframes::MoveVertical,
        Keyframes::MoveHorizontal,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Keyframes::MoveInCircle => "moveInCircle",
            Keyframes::MoveVertical => "moveVertical",
            Keyframes::MoveHorizontal => "moveHorizontal",
        }
    }

    /// The `@keyframes` block.
    pub fn css(&self) -> &'static str {
        match self {
            Keyframes::MoveInCircle => {
                "@keyframes moveInCircle {
  0% { transform: rotate(0deg); }
  50% { transform: rotate(180deg); }
  100% { transform: rotate(360deg); }
}"
            }
            Keyframes::MoveVertical => {
                "@keyframes moveVertical {
  0% { transform: translateY(-50%); }
  50% { transform: translateY(50%); }
  100% { transform: translateY(-50%); }
}"
            }
            Keyframes::MoveHorizontal => {
                "@keyframes moveHorizontal {
  0% { transform: translateX(-50%) translateY(-10%); }
  50% { transform: translateX(50%) translateY(10%); }
  100% { transform: translateX(-50%) translateY(-10%); }
}"
            }
        }
    }

    /// Transform at animation progress `p` in 0..1. Rotations are in
    /// degrees, translations a fraction of the box size.
    pub fn sample(&self, p: f64, timing: Timing) -> Transform {
        // Keyframes sit at 0%, 50%, 100%; easing applies per segment.
        let (seg, local) = if p < 0.5 { (0, p * 2.0) } else { (1, (p - 0.5) * 2.0) };
        let k = timing.apply(local);
        match self {
            Keyframes::MoveInCircle => Transform::Rotate(180.0 * (seg as f64 + k)),
            Keyframes::MoveVertical => {
                let y = if seg == 0 { -0.5 + k } else { 0.5 - k };
                Transform::Translate(0.0, y)
            }
            Keyframes::MoveHorizontal => {
                let (x, y) = if seg == 0 {
                    (-0.5 + k, -0.1 + 0.2 * k)
                } else {
                    (0.5 - k, 0.1 - 0.2 * k)
                };
                Transform::Translate(x, y)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Rotate(f64),
    Translate(f64, f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    Ease,
    Linear,
}

impl Timing {
    pub fn css(&self) -> &'static str {
        match self {
            Timing::Ease => "ease",
            Timing::Linear => "linear",
        }
    }

    /// Approximates CSS `ease` with a smoothstep curve.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Timing::Linear => t,
            Timing::Ease => t * t * (3.0 - 2.0 * t),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub keyframes: Keyframes,
    pub duration_secs: f64,
    pub reverse: bool,
    /// `None` leaves the CSS default (`ease`) implicit.
    pub timing: Option<Timing>,
}

impl Animation {
    pub fn css(&self) -> String {
        let mut parts = vec![
            self.keyframes.name().to_string(),
            format!("{}s", crate::codegen::js_number(self.duration_secs)),
        ];
        if self.reverse {
            parts.push("reverse".to_string());
        }
        if let Some(timing) = self.timing {
            parts.push(timing.css().to_string());
        }
        parts.push("infinite".to_string());
        parts.join(" ")
    }

    pub fn sample(&self, t_secs: f64) -> Transform {
        let mut p = (t_secs / self.duration_secs).rem_euclid(1.0);
        if self.reverse {
            p = 1.0 - p;
        }
        self.keyframes
            .sample(p, self.timing.unwrap_or(Timing::Ease))
    }
}

/// Which custom property supplies a blob's color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobColor {
    /// `--color1` .. `--color5`, index 0..5
    Palette(usize),
    Interactive,
}

impl BlobColor {
    pub fn css_var(&self) -> String {
        match self {
            BlobColor::Palette(i) => format!("--color{}", i + 1),
            BlobColor::Interactive => "--color-interactive".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blob {
    pub class: &'static str,
    pub color: BlobColor,
    pub size: BlobSize,
    pub top_px: f64,
    pub left_px: f64,
    pub origin: Option<Origin>,
    pub animation: Option<Animation>,
    pub opacity: f64,
}

impl Blob {
    pub fn is_interactive(&self) -> bool {
        self.color == BlobColor::Interactive
    }
}

/// The six blobs in stacking order.
pub const BLOBS: [Blob; 6] = [
    Blob {
        class: "g1",
        color: BlobColor::Palette(0),
        size: BlobSize::Circle,
        top_px: 0.0,
        left_px: 0.0,
        origin: Some(Origin::Center),
        animation: Some(Animation {
            keyframes: Keyframes::MoveVertical,
            duration_secs: 30.0,
            reverse: false,
            timing: Some(Timing::Ease),
        }),
        opacity: 1.0,
    },
    Blob {
        class: "g2",
        color: BlobColor::Palette(1),
        size: BlobSize::Circle,
        top_px: 0.0,
        left_px: 0.0,
        origin: Some(Origin::OffsetX(-400.0)),
        animation: Some(Animation {
            keyframes: Keyframes::MoveInCircle,
            duration_secs: 20.0,
            reverse: true,
            timing: None,
        }),
        opacity: 1.0,
    },
    Blob {
        class: "g3",
        color: BlobColor::Palette(2),
        size: BlobSize::Circle,
        top_px: 200.0,
        left_px: -500.0,
        origin: Some(Origin::OffsetX(400.0)),
        animation: Some(Animation {
            keyframes: Keyframes::MoveInCircle,
            duration_secs: 40.0,
            reverse: false,
            timing: Some(Timing::Linear),
        }),
        opacity: 1.0,
    },
    Blob {
        class: "g4",
        color: BlobColor::Palette(3),
        size: BlobSize::Circle,
        top_px: 0.0,
        left_px: 0.0,
        origin: Some(Origin::OffsetX(-200.0)),
        animation: Some(Animation {
            keyframes: Keyframes::MoveHorizontal,
            duration_secs: 40.0,
            reverse: false,
            timing: Some(Timing::Ease),
        }),
        opacity: 0.7,
    },
    Blob {
        class: "g5",
        color: BlobColor::Palette(4),
        size: BlobSize::DoubleCircle,
        top_px: 0.0,
        left_px: 0.0,
        origin: Some(Origin::Offset(-800.0, 200.0)),
        animation: Some(Animation {
            keyframes: Keyframes::MoveInCircle,
            duration_secs: 20.0,
            reverse: false,
            timing: Some(Timing::Ease),
        }),
        opacity: 1.0,
    },
    Blob {
        class: "interactive",
        color: BlobColor::Interactive,
        size: BlobSize::Full,
        top_px: 0.0,
        left_px: 0.0,
        origin: None,
        animation: None,
        opacity: 0.7,
    },
];

/// ` + 200px`, ` - 500px`, or nothing for zero.
fn px_term(px: f64) -> String {
    if px == 0.0 {
        String::new()
    } else if px < 0.0 {
        format!(" - {}px", crate::codegen::js_number(-px))
    } else {
        format!(" + {}px", crate::codegen::js_number(px))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_render_like_hand_written_css() {
        assert_eq!(
            BlobSize::Circle.css_position(0.0),
            "calc(50% - var(--circle-size) / 2)"
        );
        assert_eq!(
            BlobSize::Circle.css_position(200.0),
            "calc(50% - var(--circle-size) / 2 + 200px)"
        );
        assert_eq!(
            BlobSize::Circle.css_position(-500.0),
            "calc(50% - var(--circle-size) / 2 - 500px)"
        );
        assert_eq!(BlobSize::DoubleCircle.css_position(0.0), "calc(50% - var(--circle-size))");
        assert_eq!(BlobSize::Full.css_position(0.0), "-50%");
    }

    #[test]
    fn origins_render() {
        assert_eq!(Origin::Center.css(), "center center");
        assert_eq!(Origin::OffsetX(-400.0).css(), "calc(50% - 400px)");
        assert_eq!(
            Origin::Offset(-800.0, 200.0).css(),
            "calc(50% - 800px) calc(50% + 200px)"
        );
    }

    #[test]
    fn animation_shorthand() {
        assert_eq!(
            BLOBS[0].animation.unwrap().css(),
            "moveVertical 30s ease infinite"
        );
        assert_eq!(
            BLOBS[1].animation.unwrap().css(),
            "moveInCircle 20s reverse infinite"
        );
        assert_eq!(
            BLOBS[2].animation.unwrap().css(),
            "moveInCircle 40s linear infinite"
        );
    }

    #[test]
    fn every_blob_is_distinct() {
        for (i, a) in BLOBS.iter().enumerate() {
            for b in &BLOBS[i + 1..] {
                assert_ne!(a, b);
            }
        }
        let dimmed: Vec<_> = BLOBS.iter().filter(|b| b.opacity < 1.0).map(|b| b.class).collect();
        assert_eq!(dimmed, ["g4", "interactive"]);
    }

    #[test]
    fn circle_keyframes_wrap_a_full_turn() {
        let anim = BLOBS[2].animation.unwrap();
        assert_eq!(anim.sample(0.0), Transform::Rotate(0.0));
        assert_eq!(anim.sample(20.0), Transform::Rotate(180.0));
        match anim.sample(30.0) {
            Transform::Rotate(deg) => assert!((deg - 270.0).abs() < 1e-9),
            other => panic!("expected rotation, got {other:?}"),
        }
    }

    #[test]
    fn reverse_runs_backwards() {
        let anim = BLOBS[1].animation.unwrap();
        match anim.sample(5.0) {
            // 1/4 into a reversed turn: eased position of 3/4
            Transform::Rotate(deg) => assert!(deg > 180.0 && deg < 360.0),
            other => panic!("expected rotation, got {other:?}"),
        }
    }

    #[test]
    fn vertical_oscillation_returns_home() {
        let anim = BLOBS[0].animation.unwrap();
        assert_eq!(anim.sample(0.0), Transform::Translate(0.0, -0.5));
        assert_eq!(anim.sample(15.0), Transform::Translate(0.0, 0.5));
        assert_eq!(anim.sample(30.0), anim.sample(0.0));
    }

    #[test]
    fn timing_endpoints() {
        for timing in [Timing::Ease, Timing::Linear] {
            assert_eq!(timing.apply(0.0), 0.0);
            assert_eq!(timing.apply(1.0), 1.0);
        }
        assert_eq!(Timing::Ease.apply(0.5), 0.5);
    }
}
