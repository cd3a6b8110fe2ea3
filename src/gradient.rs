use serde::{Deserialize, Serialize};

/// Compositing operator applied to every blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    #[default]
    HardLight,
    Overlay,
    Screen,
    Multiply,
    ColorDodge,
    SoftLight,
}

impl BlendMode {
    pub const ALL: [BlendMode; 6] = [
        BlendMode::HardLight,
        BlendMode::Overlay,
        BlendMode::Screen,
        BlendMode::Multiply,
        BlendMode::ColorDodge,
        BlendMode::SoftLight,
    ];

    /// The CSS keyword, as used in `mix-blend-mode`.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlendMode::HardLight => "hard-light",
            BlendMode::Overlay => "overlay",
            BlendMode::Screen => "screen",
            BlendMode::Multiply => "multiply",
            BlendMode::ColorDodge => "color-dodge",
            BlendMode::SoftLight => "soft-light",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BlendMode::HardLight => "Hard Light",
            BlendMode::Overlay => "Overlay",
            BlendMode::Screen => "Screen",
            BlendMode::Multiply => "Multiply",
            BlendMode::ColorDodge => "Color Dodge",
            BlendMode::SoftLight => "Soft Light",
        }
    }

    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|m| m == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let i = Self::ALL.iter().position(|m| m == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for BlendMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every visual parameter of the gradient background.
///
/// Always fully populated. Edits never mutate a shared record: they build a
/// new one with [`GradientConfig::merge`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientConfig {
    pub color_bg1: String,
    pub color_bg2: String,
    pub color1: String,
    pub color2: String,
    pub color3: String,
    pub color4: String,
    pub color5: String,
    pub color_interactive: String,
    pub circle_size: f64,
    pub blur_amount: f64,
    pub noise_opacity: f64,
    pub blend_mode: BlendMode,
    pub enable_interaction: bool,
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self {
            color_bg1: "#111111".into(),
            color_bg2: "#111111".into(),
            color1: "#ff0028".into(),
            color2: "#ce0f2d".into(),
            color3: "#f48022".into(),
            color4: "#f48022".into(),
            color5: "#f48022".into(),
            color_interactive: "#f48022".into(),
            circle_size: 80.0,
            blur_amount: 40.0,
            noise_opacity: 0.0,
            blend_mode: BlendMode::HardLight,
            enable_interaction: true,
        }
    }
}

impl GradientConfig {
    /// Shallow override: fields set in `update` replace ours, the rest are kept.
    pub fn merge(&self, update: &ConfigUpdate) -> Self {
        let pick = |new: &Option<String>, old: &String| new.clone().unwrap_or_else(|| old.clone());
        Self {
            color_bg1: pick(&update.color_bg1, &self.color_bg1),
            color_bg2: pick(&update.color_bg2, &self.color_bg2),
            color1: pick(&update.color1, &self.color1),
            color2: pick(&update.color2, &self.color2),
            color3: pick(&update.color3, &self.color3),
            color4: pick(&update.color4, &self.color4),
            color5: pick(&update.color5, &self.color5),
            color_interactive: pick(&update.color_interactive, &self.color_interactive),
            circle_size: update.circle_size.unwrap_or(self.circle_size),
            blur_amount: update.blur_amount.unwrap_or(self.blur_amount),
            noise_opacity: update.noise_opacity.unwrap_or(self.noise_opacity),
            blend_mode: update.blend_mode.unwrap_or(self.blend_mode),
            enable_interaction: update.enable_interaction.unwrap_or(self.enable_interaction),
        }
    }

    pub fn has_noise(&self) -> bool {
        self.noise_opacity > 0.0
    }

    /// The five blob colors in element order.
    pub fn blob_colors(&self) -> [&str; 5] {
        [
            self.color1.as_str(),
            self.color2.as_str(),
            self.color3.as_str(),
            self.color4.as_str(),
            self.color5.as_str(),
        ]
    }

    pub fn value(&self, field: ConfigField) -> FieldValue<'_> {
        match field {
            ConfigField::Color(slot) => FieldValue::Color(self.color(slot)),
            ConfigField::CircleSize => FieldValue::Number(self.circle_size),
            ConfigField::BlurAmount => FieldValue::Number(self.blur_amount),
            ConfigField::NoiseOpacity => FieldValue::Number(self.noise_opacity),
            ConfigField::BlendMode => FieldValue::Blend(self.blend_mode),
            ConfigField::Interaction => FieldValue::Toggle(self.enable_interaction),
        }
    }

    pub fn color(&self, slot: ColorSlot) -> &str {
        match slot {
            ColorSlot::Background1 => &self.color_bg1,
            ColorSlot::Background2 => &self.color_bg2,
            ColorSlot::Blob(0) => &self.color1,
            ColorSlot::Blob(1) => &self.color2,
            ColorSlot::Blob(2) => &self.color3,
            ColorSlot::Blob(3) => &self.color4,
            ColorSlot::Blob(_) => &self.color5,
            ColorSlot::Interactive => &self.color_interactive,
        }
    }
}

/// A partial [`GradientConfig`]: the keys an edit changes.
///
/// Deserializes from a partial camelCase JSON object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigUpdate {
    pub color_bg1: Option<String>,
    pub color_bg2: Option<String>,
    pub color1: Option<String>,
    pub color2: Option<String>,
    pub color3: Option<String>,
    pub color4: Option<String>,
    pub color5: Option<String>,
    pub color_interactive: Option<String>,
    pub circle_size: Option<f64>,
    pub blur_amount: Option<f64>,
    pub noise_opacity: Option<f64>,
    pub blend_mode: Option<BlendMode>,
    pub enable_interaction: Option<bool>,
}

impl ConfigUpdate {
    pub fn color(slot: ColorSlot, hex: impl Into<String>) -> Self {
        let hex = Some(hex.into());
        let mut update = Self::default();
        match slot {
            ColorSlot::Background1 => update.color_bg1 = hex,
            ColorSlot::Background2 => update.color_bg2 = hex,
            ColorSlot::Blob(0) => update.color1 = hex,
            ColorSlot::Blob(1) => update.color2 = hex,
            ColorSlot::Blob(2) => update.color3 = hex,
            ColorSlot::Blob(3) => update.color4 = hex,
            ColorSlot::Blob(_) => update.color5 = hex,
            ColorSlot::Interactive => update.color_interactive = hex,
        }
        update
    }

    pub fn circle_size(value: f64) -> Self {
        Self {
            circle_size: Some(value),
            ..Self::default()
        }
    }

    pub fn blur_amount(value: f64) -> Self {
        Self {
            blur_amount: Some(value),
            ..Self::default()
        }
    }

    pub fn noise_opacity(value: f64) -> Self {
        Self {
            noise_opacity: Some(value),
            ..Self::default()
        }
    }

    pub fn blend_mode(mode: BlendMode) -> Self {
        Self {
            blend_mode: Some(mode),
            ..Self::default()
        }
    }

    pub fn enable_interaction(enabled: bool) -> Self {
        Self {
            enable_interaction: Some(enabled),
            ..Self::default()
        }
    }

    /// Combine two updates; keys set in `later` win.
    pub fn then(self, later: ConfigUpdate) -> Self {
        Self {
            color_bg1: later.color_bg1.or(self.color_bg1),
            color_bg2: later.color_bg2.or(self.color_bg2),
            color1: later.color1.or(self.color1),
            color2: later.color2.or(self.color2),
            color3: later.color3.or(self.color3),
            color4: later.color4.or(self.color4),
            color5: later.color5.or(self.color5),
            color_interactive: later.color_interactive.or(self.color_interactive),
            circle_size: later.circle_size.or(self.circle_size),
            blur_amount: later.blur_amount.or(self.blur_amount),
            noise_opacity: later.noise_opacity.or(self.noise_opacity),
            blend_mode: later.blend_mode.or(self.blend_mode),
            enable_interaction: later.enable_interaction.or(self.enable_interaction),
        }
    }
}

// ---------------------------------------------------------------------------
// Editable fields
// ---------------------------------------------------------------------------

/// One of the eight color slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    Background1,
    Background2,
    /// Blob index 0..5
    Blob(usize),
    Interactive,
}

impl ColorSlot {
    pub fn label(&self) -> String {
        match self {
            ColorSlot::Background1 => "Background Primary".to_string(),
            ColorSlot::Background2 => "Background Secondary".to_string(),
            ColorSlot::Blob(i) => format!("Blob {}", i + 1),
            ColorSlot::Interactive => "Cursor Blob".to_string(),
        }
    }
}

/// Numeric slider bounds for a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
    pub unit: &'static str,
}

/// A field of the control panel, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    Color(ColorSlot),
    CircleSize,
    BlurAmount,
    NoiseOpacity,
    BlendMode,
    Interaction,
}

pub enum FieldValue<'a> {
    Color(&'a str),
    Number(f64),
    Blend(BlendMode),
    Toggle(bool),
}

impl ConfigField {
    /// All 13 fields: background, blob colors, cursor color, effects.
    pub fn all() -> Vec<ConfigField> {
        let mut fields = vec![
            ConfigField::Color(ColorSlot::Background1),
            ConfigField::Color(ColorSlot::Background2),
        ];
        for i in 0..5 {
            fields.push(ConfigField::Color(ColorSlot::Blob(i)));
        }
        fields.extend([
            ConfigField::Color(ColorSlot::Interactive),
            ConfigField::CircleSize,
            ConfigField::BlurAmount,
            ConfigField::NoiseOpacity,
            ConfigField::BlendMode,
            ConfigField::Interaction,
        ]);
        fields
    }

    pub fn label(&self) -> String {
        match self {
            ConfigField::Color(slot) => slot.label(),
            ConfigField::CircleSize => "Circle Size".to_string(),
            ConfigField::BlurAmount => "Blur Intensity".to_string(),
            ConfigField::NoiseOpacity => "Noise Texture".to_string(),
            ConfigField::BlendMode => "Blend Mode".to_string(),
            ConfigField::Interaction => "Mouse Interaction".to_string(),
        }
    }

    pub fn range(&self) -> Option<Range> {
        match self {
            ConfigField::CircleSize => Some(Range {
                min: 50.0,
                max: 150.0,
                unit: "%",
            }),
            ConfigField::BlurAmount => Some(Range {
                min: 0.0,
                max: 100.0,
                unit: "px",
            }),
            ConfigField::NoiseOpacity => Some(Range {
                min: 0.0,
                max: 100.0,
                unit: "%",
            }),
            _ => None,
        }
    }

    /// Build the update that sets this numeric field, clamped to its range.
    /// Non-numeric fields yield an empty update.
    pub fn set_number(&self, value: f64) -> ConfigUpdate {
        let Some(range) = self.range() else {
            return ConfigUpdate::default();
        };
        let value = value.clamp(range.min, range.max);
        match self {
            ConfigField::CircleSize => ConfigUpdate::circle_size(value),
            ConfigField::BlurAmount => ConfigUpdate::blur_amount(value),
            ConfigField::NoiseOpacity => ConfigUpdate::noise_opacity(value),
            _ => ConfigUpdate::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn custom() -> GradientConfig {
        GradientConfig {
            color_bg1: "#000000".into(),
            color_bg2: "#222222".into(),
            color1: "#123456".into(),
            color2: "#abcdef".into(),
            color3: "#00ff00".into(),
            color4: "#0000ff".into(),
            color5: "#ff00ff".into(),
            color_interactive: "#ffffff".into(),
            circle_size: 95.0,
            blur_amount: 12.0,
            noise_opacity: 20.0,
            blend_mode: BlendMode::Screen,
            enable_interaction: false,
        }
    }

    #[test]
    fn defaults_match_documented_values() {
        let c = GradientConfig::default();
        assert_eq!(c.color_bg1, "#111111");
        assert_eq!(c.color_bg2, "#111111");
        assert_eq!(c.color1, "#ff0028");
        assert_eq!(c.color2, "#ce0f2d");
        assert_eq!(c.color3, "#f48022");
        assert_eq!(c.color4, "#f48022");
        assert_eq!(c.color5, "#f48022");
        assert_eq!(c.color_interactive, "#f48022");
        assert_eq!(c.circle_size, 80.0);
        assert_eq!(c.blur_amount, 40.0);
        assert_eq!(c.noise_opacity, 0.0);
        assert_eq!(c.blend_mode, BlendMode::HardLight);
        assert!(c.enable_interaction);
    }

    #[test]
    fn merge_circle_size_changes_only_that_field() {
        for base in [GradientConfig::default(), custom()] {
            let merged = base.merge(&ConfigUpdate::circle_size(120.0));
            assert_eq!(merged.circle_size, 120.0);
            let expected = GradientConfig {
                circle_size: 120.0,
                ..base.clone()
            };
            assert_eq!(merged, expected);
            // The base is untouched.
            assert_ne!(base.circle_size, 120.0);
        }
    }

    #[test]
    fn merge_empty_update_is_identity() {
        let base = custom();
        assert_eq!(base.merge(&ConfigUpdate::default()), base);
    }

    #[test]
    fn merge_color_slots() {
        let base = GradientConfig::default();
        let merged = base.merge(&ConfigUpdate::color(ColorSlot::Blob(3), "#010203"));
        assert_eq!(merged.color4, "#010203");
        assert_eq!(merged.color5, base.color5);
        let merged = base.merge(&ConfigUpdate::color(ColorSlot::Interactive, "#000000"));
        assert_eq!(merged.color_interactive, "#000000");
        assert_eq!(merged.color1, base.color1);
    }

    #[test]
    fn update_then_later_wins() {
        let combined = ConfigUpdate::circle_size(60.0)
            .then(ConfigUpdate::blur_amount(5.0))
            .then(ConfigUpdate::circle_size(70.0));
        assert_eq!(combined.circle_size, Some(70.0));
        assert_eq!(combined.blur_amount, Some(5.0));
        assert_eq!(combined.noise_opacity, None);
    }

    #[test]
    fn partial_json_update() {
        let update: ConfigUpdate =
            serde_json::from_str(r##"{"circleSize": 120, "blendMode": "color-dodge"}"##).unwrap();
        let merged = GradientConfig::default().merge(&update);
        assert_eq!(merged.circle_size, 120.0);
        assert_eq!(merged.blend_mode, BlendMode::ColorDodge);
        assert_eq!(merged.color1, "#ff0028");
    }

    #[test]
    fn config_json_uses_camel_case() {
        let json = serde_json::to_value(GradientConfig::default()).unwrap();
        assert_eq!(json["colorBg1"], "#111111");
        assert_eq!(json["colorInteractive"], "#f48022");
        assert_eq!(json["blendMode"], "hard-light");
        assert_eq!(json["enableInteraction"], true);
    }

    #[test]
    fn blend_mode_cycles() {
        let mut mode = BlendMode::HardLight;
        for _ in 0..BlendMode::ALL.len() {
            mode = mode.next();
        }
        assert_eq!(mode, BlendMode::HardLight);
        assert_eq!(BlendMode::HardLight.prev(), BlendMode::SoftLight);
        assert_eq!(BlendMode::ColorDodge.as_str(), "color-dodge");
        assert_eq!(BlendMode::SoftLight.label(), "Soft Light");
    }

    #[test]
    fn field_list_covers_every_key() {
        let fields = ConfigField::all();
        assert_eq!(fields.len(), 13);
        assert_eq!(fields[2], ConfigField::Color(ColorSlot::Blob(0)));
        assert_eq!(fields[7], ConfigField::Color(ColorSlot::Interactive));
    }

    #[test]
    fn set_number_clamps_to_slider_range() {
        assert_eq!(ConfigField::CircleSize.set_number(10.0).circle_size, Some(50.0));
        assert_eq!(ConfigField::BlurAmount.set_number(500.0).blur_amount, Some(100.0));
        assert_eq!(ConfigField::NoiseOpacity.set_number(37.0).noise_opacity, Some(37.0));
        assert_eq!(ConfigField::BlendMode.set_number(1.0), ConfigUpdate::default());
    }
}
