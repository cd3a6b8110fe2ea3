use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::codegen::Artifact;
use crate::gradient::{BlendMode, ConfigUpdate, GradientConfig};

#[derive(Parser)]
#[command(
    name = "gradient-studio",
    about = "Design animated gradient backgrounds and export the HTML, CSS and JavaScript"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one generated artifact to stdout
    Generate {
        /// Which artifact to print
        #[arg(value_enum, default_value = "page")]
        part: Artifact,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Write every artifact into a directory
    Export {
        /// Destination directory (default: settings, then ~/.config/gradient-studio/exports)
        #[arg(long)]
        dir: Option<PathBuf>,
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print the default configuration as JSON
    Defaults,
}

/// Configuration sources shared by `generate` and `export`: a partial JSON
/// file merged over the defaults, then individual flags.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Partial JSON configuration (camelCase keys)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    #[arg(long, value_name = "HEX")]
    pub color_bg1: Option<String>,
    #[arg(long, value_name = "HEX")]
    pub color_bg2: Option<String>,
    #[arg(long, value_name = "HEX")]
    pub color1: Option<String>,
    #[arg(long, value_name = "HEX")]
    pub color2: Option<String>,
    #[arg(long, value_name = "HEX")]
    pub color3: Option<String>,
    #[arg(long, value_name = "HEX")]
    pub color4: Option<String>,
    #[arg(long, value_name = "HEX")]
    pub color5: Option<String>,
    #[arg(long, value_name = "HEX")]
    pub color_interactive: Option<String>,
    /// Blob size, percent of the viewport
    #[arg(long)]
    pub circle_size: Option<f64>,
    /// Blur radius in px
    #[arg(long)]
    pub blur_amount: Option<f64>,
    /// Noise overlay opacity, percent
    #[arg(long)]
    pub noise_opacity: Option<f64>,
    #[arg(long, value_enum)]
    pub blend_mode: Option<BlendMode>,
    /// Drop the cursor-following blob script
    #[arg(long)]
    pub no_interaction: bool,
}

impl ConfigArgs {
    /// The update described by the flags alone.
    pub fn overrides(&self) -> ConfigUpdate {
        ConfigUpdate {
            color_bg1: self.color_bg1.clone(),
            color_bg2: self.color_bg2.clone(),
            color1: self.color1.clone(),
            color2: self.color2.clone(),
            color3: self.color3.clone(),
            color4: self.color4.clone(),
            color5: self.color5.clone(),
            color_interactive: self.color_interactive.clone(),
            circle_size: self.circle_size,
            blur_amount: self.blur_amount,
            noise_opacity: self.noise_opacity,
            blend_mode: self.blend_mode,
            enable_interaction: self.no_interaction.then_some(false),
        }
    }

    /// Defaults, then the config file, then the flags.
    pub fn resolve(&self) -> Result<GradientConfig> {
        let mut update = ConfigUpdate::default();
        if let Some(path) = &self.config {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            update = serde_json::from_str(&raw)
                .with_context(|| format!("Invalid config {}", path.display()))?;
        }
        Ok(GradientConfig::default().merge(&update.then(self.overrides())))
    }
}
