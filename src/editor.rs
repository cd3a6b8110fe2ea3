use crate::color::{parse_hex, HslColor};
use crate::gradient::{ColorSlot, ConfigField, ConfigUpdate, FieldValue, GradientConfig};

// ---------------------------------------------------------------------------
// SliderFocus / PickerMode
// ---------------------------------------------------------------------------

/// Which HSL slider component is focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderFocus {
    Hue,
    Saturation,
    Lightness,
}

impl SliderFocus {
    pub fn next(self) -> Self {
        match self {
            SliderFocus::Hue => SliderFocus::Saturation,
            SliderFocus::Saturation => SliderFocus::Lightness,
            SliderFocus::Lightness => SliderFocus::Hue,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            SliderFocus::Hue => SliderFocus::Lightness,
            SliderFocus::Saturation => SliderFocus::Hue,
            SliderFocus::Lightness => SliderFocus::Saturation,
        }
    }
}

/// The current editing mode for the color picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMode {
    Slider,
    HexInput,
}

// ---------------------------------------------------------------------------
// EditorState
// ---------------------------------------------------------------------------

/// Control panel state. Every edit is returned as a [`ConfigUpdate`] for the
/// owner to merge; the editor never holds the configuration itself.
#[derive(Debug, Clone)]
pub struct EditorState {
    /// Index into `ConfigField::all()`.
    pub field_index: usize,
    /// Whether the color picker is open on the current field.
    pub editing: bool,
    pub picker_mode: PickerMode,
    pub slider_focus: SliderFocus,
    /// Buffer for hex color text input.
    pub hex_input: String,
    /// Working color of the open picker.
    pub picker: HslColor,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            field_index: 0,
            editing: false,
            picker_mode: PickerMode::Slider,
            slider_focus: SliderFocus::Hue,
            hex_input: String::new(),
            picker: HslColor::new(0.0, 0.0, 0.0),
        }
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_field(&self) -> ConfigField {
        let all = ConfigField::all();
        all[self.field_index.min(all.len() - 1)]
    }

    fn current_slot(&self) -> Option<ColorSlot> {
        match self.current_field() {
            ConfigField::Color(slot) => Some(slot),
            _ => None,
        }
    }

    pub fn select_next(&mut self) {
        if self.field_index + 1 < ConfigField::all().len() {
            self.field_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.field_index = self.field_index.saturating_sub(1);
    }

    pub fn select(&mut self, index: usize) {
        self.field_index = index.min(ConfigField::all().len() - 1);
        self.editing = false;
    }

    /// Nudge the current field by `delta` steps: units for sliders, degrees
    /// of hue for colors, one position for the blend mode. Toggles flip
    /// regardless of the sign.
    pub fn adjust(&self, config: &GradientConfig, delta: f64) -> ConfigUpdate {
        let field = self.current_field();
        match config.value(field) {
            FieldValue::Number(v) => field.set_number(v + delta),
            FieldValue::Blend(mode) if delta < 0.0 => ConfigUpdate::blend_mode(mode.prev()),
            FieldValue::Blend(mode) => ConfigUpdate::blend_mode(mode.next()),
            FieldValue::Toggle(on) => ConfigUpdate::enable_interaction(!on),
            FieldValue::Color(hex) => match self.current_slot() {
                Some(slot) => {
                    let mut color = picker_color(hex);
                    color.h = (color.h + delta).rem_euclid(360.0);
                    ConfigUpdate::color(slot, color.to_hex())
                }
                None => ConfigUpdate::default(),
            },
        }
    }

    /// Enter on the current field: open the picker on colors, cycle the
    /// blend mode, flip the toggle. Sliders have nothing to activate.
    pub fn activate(&mut self, config: &GradientConfig) -> ConfigUpdate {
        let field = self.current_field();
        match config.value(field) {
            FieldValue::Color(hex) => {
                self.editing = true;
                self.picker_mode = PickerMode::Slider;
                self.slider_focus = SliderFocus::Hue;
                self.picker = picker_color(hex);
                self.hex_input = hex.to_string();
                ConfigUpdate::default()
            }
            FieldValue::Blend(mode) => ConfigUpdate::blend_mode(mode.next()),
            FieldValue::Toggle(on) => ConfigUpdate::enable_interaction(!on),
            FieldValue::Number(_) => ConfigUpdate::default(),
        }
    }

    pub fn close_picker(&mut self) {
        self.editing = false;
        self.picker_mode = PickerMode::Slider;
    }

    pub fn toggle_picker_mode(&mut self) {
        self.picker_mode = match self.picker_mode {
            PickerMode::Slider => PickerMode::HexInput,
            PickerMode::HexInput => PickerMode::Slider,
        };
        if self.picker_mode == PickerMode::HexInput {
            self.sync_hex_from_color();
        }
    }

    // -----------------------------------------------------------------------
    // Slider / hex editing
    // -----------------------------------------------------------------------

    /// Adjust the focused HSL component by `delta` and emit the new color.
    pub fn adjust_slider(&mut self, delta: f64) -> ConfigUpdate {
        let Some(slot) = self.current_slot() else {
            return ConfigUpdate::default();
        };
        let color = &mut self.picker;
        match self.slider_focus {
            SliderFocus::Hue => color.h = (color.h + delta).rem_euclid(360.0),
            SliderFocus::Saturation => color.s = (color.s + delta).clamp(0.0, 100.0),
            SliderFocus::Lightness => color.l = (color.l + delta).clamp(0.0, 100.0),
        }
        self.sync_hex_from_color();
        ConfigUpdate::color(slot, self.picker.to_hex())
    }

    pub fn push_hex_char(&mut self, c: char) {
        let leading_hash = c == '#' && self.hex_input.is_empty();
        if self.hex_input.len() < 7 && (c.is_ascii_hexdigit() || leading_hash) {
            self.hex_input.push(c);
        }
    }

    pub fn pop_hex_char(&mut self) {
        self.hex_input.pop();
    }

    /// Apply `hex_input` if it is a valid color. Invalid input changes
    /// nothing and yields `None`.
    pub fn commit_hex_input(&mut self) -> Option<ConfigUpdate> {
        let slot = self.current_slot()?;
        let rgb = parse_hex(&self.hex_input)?;
        self.picker = HslColor::from_rgb(rgb);
        let hex = rgb.to_hex();
        self.hex_input = hex.clone();
        Some(ConfigUpdate::color(slot, hex))
    }

    pub fn sync_hex_from_color(&mut self) {
        self.hex_input = self.picker.to_hex();
    }
}

/// Picker starting color for a stored hex; malformed input starts at black.
fn picker_color(hex: &str) -> HslColor {
    HslColor::from_hex(hex).unwrap_or(HslColor::new(0.0, 0.0, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::BlendMode;

    fn at(field: ConfigField) -> EditorState {
        let index = ConfigField::all()
            .iter()
            .position(|f| *f == field)
            .unwrap();
        EditorState {
            field_index: index,
            ..EditorState::default()
        }
    }

    #[test]
    fn selection_stays_in_bounds() {
        let mut editor = EditorState::new();
        editor.select_prev();
        assert_eq!(editor.field_index, 0);
        for _ in 0..50 {
            editor.select_next();
        }
        assert_eq!(editor.current_field(), ConfigField::Interaction);
        editor.select(99);
        assert_eq!(editor.field_index, 12);
    }

    #[test]
    fn adjust_slider_field_clamps() {
        let config = GradientConfig::default();
        let editor = at(ConfigField::CircleSize);
        let next = config.merge(&editor.adjust(&config, 10.0));
        assert_eq!(next.circle_size, 90.0);
        let maxed = config.merge(&editor.adjust(&config, 500.0));
        assert_eq!(maxed.circle_size, 150.0);

        let blur = at(ConfigField::BlurAmount);
        let zeroed = config.merge(&blur.adjust(&config, -100.0));
        assert_eq!(zeroed.blur_amount, 0.0);
    }

    #[test]
    fn adjust_cycles_blend_both_ways() {
        let config = GradientConfig::default();
        let editor = at(ConfigField::BlendMode);
        let forward = config.merge(&editor.adjust(&config, 1.0));
        assert_eq!(forward.blend_mode, BlendMode::HardLight.next());
        let back = config.merge(&editor.adjust(&config, -1.0));
        assert_eq!(back.blend_mode, BlendMode::HardLight.prev());
    }

    #[test]
    fn activate_toggle_flips_interaction() {
        let config = GradientConfig::default();
        let mut editor = at(ConfigField::Interaction);
        let next = config.merge(&editor.activate(&config));
        assert!(!next.enable_interaction);
        assert!(!editor.editing);
    }

    #[test]
    fn activate_color_opens_picker() {
        let config = GradientConfig::default();
        let mut editor = at(ConfigField::Color(ColorSlot::Blob(0)));
        let update = editor.activate(&config);
        assert_eq!(update, ConfigUpdate::default());
        assert!(editor.editing);
        assert_eq!(editor.hex_input, "#ff0028");
        assert_eq!(editor.picker.to_hex(), "#ff0028");
    }

    #[test]
    fn adjust_color_rotates_hue() {
        let config = GradientConfig {
            color1: "#ff0000".into(),
            ..GradientConfig::default()
        };
        let editor = at(ConfigField::Color(ColorSlot::Blob(0)));
        let next = config.merge(&editor.adjust(&config, 120.0));
        assert_eq!(next.color1, "#00ff00");
    }

    #[test]
    fn adjust_slider_hue_wraps() {
        let config = GradientConfig::default();
        let mut editor = at(ConfigField::Color(ColorSlot::Background1));
        editor.activate(&config);
        editor.picker = HslColor::new(350.0, 50.0, 50.0);
        editor.slider_focus = SliderFocus::Hue;
        let update = editor.adjust_slider(20.0);
        assert!((editor.picker.h - 10.0).abs() < 0.01);
        assert_eq!(update.color_bg1.as_deref(), Some(editor.hex_input.as_str()));
    }

    #[test]
    fn adjust_slider_saturation_clamps() {
        let mut editor = at(ConfigField::Color(ColorSlot::Interactive));
        editor.picker = HslColor::new(180.0, 95.0, 50.0);
        editor.slider_focus = SliderFocus::Saturation;
        editor.adjust_slider(10.0);
        assert!((editor.picker.s - 100.0).abs() < 0.01);
    }

    #[test]
    fn adjust_slider_ignores_non_color_fields() {
        let mut editor = at(ConfigField::NoiseOpacity);
        assert_eq!(editor.adjust_slider(10.0), ConfigUpdate::default());
    }

    #[test]
    fn commit_hex_input_valid() {
        let mut editor = at(ConfigField::Color(ColorSlot::Blob(2)));
        editor.hex_input = "#FF0000".to_string();
        let update = editor.commit_hex_input().unwrap();
        assert_eq!(update.color3.as_deref(), Some("#ff0000"));
        assert_eq!(editor.picker.to_rgb(), crate::color::Rgb::new(255, 0, 0));
    }

    #[test]
    fn commit_hex_input_invalid_no_change() {
        let mut editor = at(ConfigField::Color(ColorSlot::Blob(2)));
        let before = editor.picker;
        editor.hex_input = "nope".to_string();
        assert!(editor.commit_hex_input().is_none());
        assert_eq!(editor.picker, before);
    }

    #[test]
    fn hex_buffer_accepts_only_hex() {
        let mut editor = EditorState::new();
        for c in "#12zz3456789".chars() {
            editor.push_hex_char(c);
        }
        assert_eq!(editor.hex_input, "#123456");
        editor.pop_hex_char();
        assert_eq!(editor.hex_input, "#12345");
    }

    #[test]
    fn slider_focus_cycles() {
        assert_eq!(SliderFocus::Lightness.next(), SliderFocus::Hue);
        assert_eq!(SliderFocus::Hue.prev(), SliderFocus::Lightness);
    }
}
