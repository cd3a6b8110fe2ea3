//! Software rendering of the gradient background for the terminal preview.
//!
//! Works in a nominal desktop viewport so pixel offsets from the stylesheet
//! (`+ 200px`, `calc(50% - 800px)`, ...) keep their proportions whatever the
//! terminal size. The goo filter and blur are approximated, not reproduced.

use crate::blob::{Blob, BlobColor, BlobSize, Transform, BLOBS};
use crate::color::{parse_hex, Rgb};
use crate::gradient::{BlendMode, GradientConfig};

/// Viewport the preview pretends to be, in CSS px.
pub const VIEWPORT: (f64, f64) = (1440.0, 900.0);

/// Peak alpha of each radial gradient.
const GRADIENT_ALPHA: f64 = 0.8;

/// Angle of the background `linear-gradient`, in degrees.
const BACKGROUND_ANGLE: f64 = 40.0;

type Channels = [f64; 3];

#[derive(Debug, Clone, Copy, PartialEq)]
struct PlacedBlob {
    center: (f64, f64),
    /// Distance at which alpha reaches zero.
    reach: f64,
    /// Alpha at the centre, including element opacity.
    peak: f64,
    color: Channels,
}

/// One frame of the background, ready to be sampled.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    viewport: (f64, f64),
    bg1: Channels,
    bg2: Channels,
    blobs: Vec<PlacedBlob>,
    blend: BlendMode,
    noise: f64,
}

impl Scene {
    /// Place every blob at `t_secs` into the animation. `pointer` is the
    /// follow loop's current translation of the cursor blob, if running.
    pub fn new(config: &GradientConfig, t_secs: f64, pointer: Option<(i64, i64)>) -> Self {
        let viewport = VIEWPORT;
        let blobs = BLOBS
            .iter()
            .map(|blob| place(blob, config, viewport, t_secs, pointer))
            .collect();
        Self {
            viewport,
            bg1: channels(&config.color_bg1),
            bg2: channels(&config.color_bg2),
            blobs,
            blend: config.blend_mode,
            noise: (config.noise_opacity / 100.0).clamp(0.0, 1.0),
        }
    }

    pub fn viewport(&self) -> (f64, f64) {
        self.viewport
    }

    /// Color at viewport point `(x, y)`.
    pub fn sample(&self, x: f64, y: f64) -> Rgb {
        let mut dst = self.background(x, y);

        for blob in &self.blobs {
            let d = ((x - blob.center.0).powi(2) + (y - blob.center.1).powi(2)).sqrt();
            if d >= blob.reach {
                continue;
            }
            let alpha = blob.peak * (1.0 - d / blob.reach);
            for c in 0..3 {
                let blended = blend(self.blend, dst[c], blob.color[c]);
                dst[c] = dst[c] * (1.0 - alpha) + blended * alpha;
            }
        }

        if self.noise > 0.0 {
            let n = noise_at(x, y);
            for c in dst.iter_mut() {
                let blended = blend(BlendMode::Overlay, *c, n);
                *c = *c * (1.0 - self.noise) + blended * self.noise;
            }
        }

        to_rgb(dst)
    }

    /// `linear-gradient(40deg, bg1, bg2)`
    fn background(&self, x: f64, y: f64) -> Channels {
        let (w, h) = self.viewport;
        let angle = BACKGROUND_ANGLE.to_radians();
        // 0deg points up, angles run clockwise; screen y grows downward.
        let dir = (angle.sin(), -angle.cos());
        let length = (w * dir.0).abs() + (h * dir.1).abs();
        let t = (((x - w / 2.0) * dir.0 + (y - h / 2.0) * dir.1) / length + 0.5).clamp(0.0, 1.0);
        let mut out = [0.0; 3];
        for c in 0..3 {
            out[c] = self.bg1[c] + (self.bg2[c] - self.bg1[c]) * t;
        }
        out
    }
}

fn place(
    blob: &Blob,
    config: &GradientConfig,
    (vw, vh): (f64, f64),
    t_secs: f64,
    pointer: Option<(i64, i64)>,
) -> PlacedBlob {
    let factor = blob.size.factor(config.circle_size).max(0.0);
    let (w, h) = (vw * factor, vh * factor);

    let mut center = match blob.size {
        BlobSize::Full => (0.0, 0.0),
        BlobSize::Circle | BlobSize::DoubleCircle => {
            (vw / 2.0 + blob.left_px, vh / 2.0 + blob.top_px)
        }
    };

    if let Some(animation) = blob.animation {
        match animation.sample(t_secs) {
            Transform::Rotate(deg) => {
                let (ox, oy) = blob.origin.map(|o| o.offset()).unwrap_or((0.0, 0.0));
                let pivot = (center.0 + ox, center.1 + oy);
                let (sin, cos) = deg.to_radians().sin_cos();
                let (rx, ry) = (center.0 - pivot.0, center.1 - pivot.1);
                center = (pivot.0 + rx * cos - ry * sin, pivot.1 + rx * sin + ry * cos);
            }
            Transform::Translate(fx, fy) => {
                center = (center.0 + fx * w, center.1 + fy * h);
            }
        }
    }

    if blob.is_interactive() {
        if let Some((px, py)) = pointer {
            center = (center.0 + px as f64, center.1 + py as f64);
        }
    }

    // `circle at center` sizes to the farthest corner; the color stops end at 50%.
    let radius = 0.5 * ((w / 2.0).powi(2) + (h / 2.0).powi(2)).sqrt();
    let reach = radius + config.blur_amount.max(0.0);
    let spread = if reach > 0.0 { radius / reach } else { 0.0 };

    let hex = match blob.color {
        BlobColor::Palette(i) => config.blob_colors()[i.min(4)],
        BlobColor::Interactive => config.color_interactive.as_str(),
    };

    PlacedBlob {
        center,
        reach,
        peak: GRADIENT_ALPHA * blob.opacity * spread,
        color: channels(hex),
    }
}

// ---------------------------------------------------------------------------
// Blending
// ---------------------------------------------------------------------------

/// Separable blend of one channel, `backdrop` and `source` in 0..1.
pub fn blend(mode: BlendMode, backdrop: f64, source: f64) -> f64 {
    let (b, s) = (backdrop, source);
    match mode {
        BlendMode::Multiply => b * s,
        BlendMode::Screen => b + s - b * s,
        BlendMode::HardLight => hard_light(b, s),
        BlendMode::Overlay => hard_light(s, b),
        BlendMode::ColorDodge => {
            if b == 0.0 {
                0.0
            } else if s >= 1.0 {
                1.0
            } else {
                (b / (1.0 - s)).min(1.0)
            }
        }
        BlendMode::SoftLight => {
            if s <= 0.5 {
                b - (1.0 - 2.0 * s) * b * (1.0 - b)
            } else {
                let d = if b <= 0.25 {
                    ((16.0 * b - 12.0) * b + 4.0) * b
                } else {
                    b.sqrt()
                };
                b + (2.0 * s - 1.0) * (d - b)
            }
        }
    }
}

fn hard_light(b: f64, s: f64) -> f64 {
    if s <= 0.5 {
        b * 2.0 * s
    } else {
        let s2 = 2.0 * s - 1.0;
        b + s2 - b * s2
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Static turbulence stand-in: hashed value noise with 200% contrast.
fn noise_at(x: f64, y: f64) -> f64 {
    let (xi, yi) = (x.floor() as i64 as u64, y.floor() as i64 as u64);
    let mut h = xi.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ yi.wrapping_mul(0xC2B2_AE3D_27D4_EB4F);
    h ^= h >> 33;
    h = h.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    h ^= h >> 33;
    let n = (h >> 11) as f64 / (1u64 << 53) as f64;
    ((n - 0.5) * 2.0 + 0.5).clamp(0.0, 1.0)
}

/// Malformed colors render black, mirroring the `0, 0, 0` fallback.
fn channels(hex: &str) -> Channels {
    let rgb = parse_hex(hex).unwrap_or_default();
    [
        rgb.r as f64 / 255.0,
        rgb.g as f64 / 255.0,
        rgb.b as f64 / 255.0,
    ]
}

fn to_rgb(c: Channels) -> Rgb {
    let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgb::new(q(c[0]), q(c[1]), q(c[2]))
}
