use std::fmt::Write;

use crate::blob::{Blob, Keyframes, BLOBS};
use crate::color::hex_to_rgb;
use crate::gradient::GradientConfig;

/// Shown in the prompt in place of the script when interaction is off.
pub const NO_SCRIPT_NOTICE: &str = "No JavaScript needed - pure CSS animations only.";

const MARKUP_HEADER: &str = "<!-- Animated Gradient Background -->
<!-- Place this anywhere in your HTML - it will stay in the background -->";

const SVG_FILTERS: &str = r#"  <svg xmlns="http://www.w3.org/2000/svg">
    <defs>
      <filter id="goo">
        <feGaussianBlur in="SourceGraphic" stdDeviation="10" result="blur" />
        <feColorMatrix in="blur" mode="matrix" values="1 0 0 0 0  0 1 0 0 0  0 0 1 0 0  0 0 0 18 -8" result="goo" />
        <feBlend in="SourceGraphic" in2="goo" />
      </filter>
      <filter id="noise">
        <feTurbulence type="fractalNoise" baseFrequency="0.8" numOctaves="4" stitchTiles="stitch" />
      </filter>
    </defs>
  </svg>"#;

const CONTENT_PLACEHOLDER: &str = r#"<!-- Your content goes here - it will appear on top of the gradient -->
<div style="position: relative; z-index: 1;">
  <!-- Add your content here -->
</div>"#;

const CONTAINER_RULES: &str = ".gradient-bg {
  position: fixed;
  top: 0;
  left: 0;
  width: 100vw;
  height: 100vh;
  overflow: hidden;
  background: linear-gradient(40deg, var(--color-bg1), var(--color-bg2));
  z-index: -1;
  pointer-events: none;
}

.gradient-bg svg {
  display: none;
}";

const FOLLOW_SCRIPT: &str = r#"const interBubble = document.querySelector('.interactive');
let curX = 0;
let curY = 0;
let tgX = 0;
let tgY = 0;

function move() {
  curX += (tgX - curX) / 20;
  curY += (tgY - curY) / 20;
  interBubble.style.transform = `translate(${Math.round(curX)}px, ${Math.round(curY)}px)`;
  requestAnimationFrame(move);
}

window.addEventListener('mousemove', (event) => {
  tgX = event.clientX;
  tgY = event.clientY;
});

move();"#;

/// The three code artifacts for one configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    pub markup: String,
    pub stylesheet: String,
    /// Present only when mouse interaction is enabled.
    pub script: Option<String>,
}

/// Generate markup, stylesheet and (if interactive) script.
///
/// Pure and deterministic: equal configs give byte-identical output.
pub fn generate(config: &GradientConfig) -> GeneratedCode {
    GeneratedCode {
        markup: markup(config),
        stylesheet: stylesheet(config),
        script: config.enable_interaction.then(|| FOLLOW_SCRIPT.to_string()),
    }
}

/// Format a number the way a JavaScript template literal would.
pub fn js_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if value == 0.0 {
        // also folds -0
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

fn markup(config: &GradientConfig) -> String {
    let mut out = String::new();
    out.push_str(MARKUP_HEADER);
    out.push_str("\n<div class=\"gradient-bg\">\n");
    out.push_str(SVG_FILTERS);
    if config.has_noise() {
        out.push_str("\n  <div class=\"noise-overlay\"></div>");
    }
    out.push_str("\n  <div class=\"gradients-container\">\n");
    for blob in &BLOBS {
        let _ = writeln!(out, "    <div class=\"{}\"></div>", blob.class);
    }
    out.push_str("  </div>\n</div>\n\n");
    out.push_str(CONTENT_PLACEHOLDER);
    out
}

fn stylesheet(config: &GradientConfig) -> String {
    let mut blocks: Vec<String> = Vec::new();

    let mut root = String::from(":root {\n");
    let _ = writeln!(root, "  --color-bg1: {};", config.color_bg1);
    let _ = writeln!(root, "  --color-bg2: {};", config.color_bg2);
    for (i, hex) in config.blob_colors().iter().enumerate() {
        let _ = writeln!(root, "  --color{}: {};", i + 1, hex_to_rgb(hex));
    }
    let _ = writeln!(
        root,
        "  --color-interactive: {};",
        hex_to_rgb(&config.color_interactive)
    );
    let _ = writeln!(root, "  --circle-size: {}%;", js_number(config.circle_size));
    let _ = writeln!(root, "  --blending: {};", config.blend_mode);
    root.push('}');
    blocks.push(root);

    for keyframes in Keyframes::ALL {
        blocks.push(keyframes.css().to_string());
    }

    blocks.push(CONTAINER_RULES.to_string());

    if config.has_noise() {
        blocks.push(format!(
            ".gradient-bg .noise-overlay {{
  position: absolute;
  inset: 0;
  opacity: {};
  mix-blend-mode: overlay;
  background: white;
  filter: url(#noise) contrast(200%) brightness(100%);
  pointer-events: none;
  z-index: 10;
}}",
            js_number(config.noise_opacity / 100.0)
        ));
    }

    blocks.push(format!(
        ".gradient-bg .gradients-container {{
  filter: url(#goo) blur({}px);
  width: 100%;
  height: 100%;
}}",
        js_number(config.blur_amount)
    ));

    blocks.extend(BLOBS.iter().map(blob_rule));

    blocks.join("\n\n")
}

fn blob_rule(blob: &Blob) -> String {
    let var = blob.color.css_var();
    let mut rule = format!(".gradient-bg .{} {{\n", blob.class);
    rule.push_str("  position: absolute;\n");
    let _ = writeln!(
        rule,
        "  background: radial-gradient(circle at center, rgba(var({var}), 0.8) 0, rgba(var({var}), 0) 50%) no-repeat;"
    );
    rule.push_str("  mix-blend-mode: var(--blending);\n");
    let _ = writeln!(rule, "  width: {};", blob.size.css_extent());
    let _ = writeln!(rule, "  height: {};", blob.size.css_extent());
    let _ = writeln!(rule, "  top: {};", blob.size.css_position(blob.top_px));
    let _ = writeln!(rule, "  left: {};", blob.size.css_position(blob.left_px));
    if let Some(origin) = blob.origin {
        let _ = writeln!(rule, "  transform-origin: {};", origin.css());
    }
    if let Some(animation) = blob.animation {
        let _ = writeln!(rule, "  animation: {};", animation.css());
    }
    let _ = writeln!(rule, "  opacity: {};", js_number(blob.opacity));
    rule.push('}');
    rule
}

// ---------------------------------------------------------------------------
// Prompt
// ---------------------------------------------------------------------------

/// Build the AI assistant prompt for `config`.
pub fn prompt(config: &GradientConfig) -> String {
    prompt_for(config, &generate(config))
}

/// Build the prompt from already generated code.
pub fn prompt_for(config: &GradientConfig, code: &GeneratedCode) -> String {
    let script_section = match &code.script {
        Some(script) => format!("JavaScript (Mouse Interaction):\n{}", script),
        None => NO_SCRIPT_NOTICE.to_string(),
    };

    let mut out = String::new();
    out.push_str(
        "Create an animated gradient background for my website with the following specifications:\n\n",
    );
    let _ = write!(out, "HTML Structure:\n{}\n\n", code.markup);
    let _ = write!(out, "CSS Styling:\n{}\n\n", code.stylesheet);
    let _ = write!(out, "{}\n\n", script_section);

    out.push_str("Requirements:\n");
    out.push_str("- The gradient should be a fixed background layer (z-index: -1) that doesn't interfere with page content\n");
    out.push_str("- All content should appear on top of the gradient\n");
    let _ = writeln!(
        out,
        "- The gradient uses SVG filters for the \"goo\" effect{}",
        if config.has_noise() { " and noise texture" } else { "" }
    );
    let _ = writeln!(
        out,
        "- Background colors: {} and {}",
        config.color_bg1, config.color_bg2
    );
    let _ = writeln!(out, "- Gradient colors: {}", config.blob_colors().join(", "));
    let _ = writeln!(out, "- Interactive color: {}", config.color_interactive);
    let _ = writeln!(out, "- Circle size: {}%", js_number(config.circle_size));
    let _ = writeln!(out, "- Blur amount: {}px", js_number(config.blur_amount));
    if config.has_noise() {
        let _ = writeln!(
            out,
            "- Noise texture opacity: {}%",
            js_number(config.noise_opacity)
        );
    }
    let _ = writeln!(out, "- Blend mode: {}", config.blend_mode);
    let _ = writeln!(
        out,
        "- Mouse interaction: {}",
        if config.enable_interaction { "Enabled" } else { "Disabled" }
    );
    out.push_str("\nPlease implement this exactly as specified above.");
    out
}

// ---------------------------------------------------------------------------
// Artifacts
// ---------------------------------------------------------------------------

/// Everything the export surfaces offer for one configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    pub code: GeneratedCode,
    pub prompt: String,
    pub page: String,
}

impl Bundle {
    pub fn new(config: &GradientConfig) -> Self {
        let code = generate(config);
        let prompt = prompt_for(config, &code);
        let page = standalone_page(&code);
        Self { code, prompt, page }
    }

    pub fn text(&self, artifact: Artifact) -> Option<&str> {
        match artifact {
            Artifact::Prompt => Some(self.prompt.as_str()),
            Artifact::Markup => Some(self.code.markup.as_str()),
            Artifact::Stylesheet => Some(self.code.stylesheet.as_str()),
            Artifact::Script => self.code.script.as_deref(),
            Artifact::Page => Some(self.page.as_str()),
        }
    }

    /// Artifacts with content, in display order.
    pub fn available(&self) -> Vec<Artifact> {
        Artifact::ALL
            .into_iter()
            .filter(|a| self.text(*a).is_some())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Artifact {
    Prompt,
    Markup,
    Stylesheet,
    Script,
    Page,
}

impl Artifact {
    pub const ALL: [Artifact; 5] = [
        Artifact::Prompt,
        Artifact::Markup,
        Artifact::Stylesheet,
        Artifact::Script,
        Artifact::Page,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Artifact::Prompt => "AI Assistant Prompt",
            Artifact::Markup => "HTML",
            Artifact::Stylesheet => "CSS",
            Artifact::Script => "JavaScript (Optional - for interactive effect)",
            Artifact::Page => "Standalone Page",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Artifact::Prompt => "prompt.md",
            Artifact::Markup => "gradient.html",
            Artifact::Stylesheet => "gradient.css",
            Artifact::Script => "gradient.js",
            Artifact::Page => "index.html",
        }
    }
}

/// A self-contained HTML document with the stylesheet and script inlined.
pub fn standalone_page(code: &GeneratedCode) -> String {
    let mut out = String::from(
        "<!DOCTYPE html>
<html lang=\"en\">
<head>
  <meta charset=\"utf-8\" />
  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />
  <title>Animated Gradient Background</title>
  <style>
",
    );
    let _ = write!(out, "{}\n  </style>\n</head>\n<body>\n{}\n", code.stylesheet, code.markup);
    if let Some(script) = &code.script {
        let _ = write!(out, "<script>\n{}\n</script>\n", script);
    }
    out.push_str("</body>\n</html>\n");
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
