mod export;
mod help;
pub(crate) mod panel;
pub(crate) mod preview;

use std::time::Instant;

use ratatui::style::Color;
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

use crate::app::{App, Screen};
use crate::preview::Scene;

pub use export::render_export;
pub use help::render_help;
pub use panel::{get_layout_rects, render_panel};

const ACCENT: Color = Color::Rgb(187, 154, 247);
const DIM: Color = Color::Rgb(100, 100, 120);
const BORDER: Color = Color::Rgb(60, 60, 80);

/// Draw one frame: the live background, the control panel, then any overlay.
pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    let layout = get_layout_rects(area, app.panel_collapsed, app.editor.editing);

    let scene = Scene::new(&app.config, app.elapsed_secs(Instant::now()), app.pointer);
    f.render_widget(preview::GradientPreview { scene: &scene }, layout.preview);
    render_panel(f, app);
    panel::render_bottom_bar(f, app, layout.bottom_bar);

    match app.screen {
        Screen::Studio => {}
        Screen::Export => render_export(f, app),
        Screen::Help => render_help(f),
    }
}

/// Clip `s` to at most `max` terminal columns.
fn clip(s: &str, max: usize) -> String {
    let mut width = 0;
    s.chars()
        .take_while(|c| {
            width += c.width().unwrap_or(0);
            width <= max
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_counts_columns() {
        assert_eq!(clip("Standalone Page", 10), "Standalone");
        assert_eq!(clip("short", 10), "short");
        // wide glyphs take two columns each
        assert_eq!(clip("\u{754c}\u{754c}\u{754c}", 5), "\u{754c}\u{754c}");
    }
}
