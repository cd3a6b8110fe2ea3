use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::color::{parse_hex, HslColor};
use crate::editor::{EditorState, PickerMode, SliderFocus};
use crate::gradient::{ConfigField, FieldValue, GradientConfig};

use super::{clip, ACCENT, BORDER, DIM};

const PANEL_WIDTH: u16 = 46;
/// Rows above the picker: two headers, 13 fields, a spacer.
const FIELD_ROWS: u16 = 16;
const PICKER_ROWS: u16 = 11;

/// Layout rectangles for mouse hit testing.
pub struct StudioLayout {
    pub preview: Rect,
    /// Panel interior, `None` while collapsed.
    pub panel_inner: Option<Rect>,
    pub bottom_bar: Rect,
}

/// Compute the studio layout: the preview fills the screen, the panel floats
/// at the top right, the hint bar takes the last row.
pub fn get_layout_rects(area: Rect, collapsed: bool, editing: bool) -> StudioLayout {
    let bottom_bar = Rect::new(
        area.x,
        area.y + area.height.saturating_sub(1),
        area.width,
        area.height.min(1),
    );
    let panel_inner = (!collapsed).then(|| {
        let width = PANEL_WIDTH.min(area.width.saturating_sub(2));
        let wanted = FIELD_ROWS + if editing { PICKER_ROWS } else { 0 } + 2;
        let height = wanted.min(area.height.saturating_sub(2));
        let outer = Rect::new(
            area.x + area.width.saturating_sub(width + 1),
            area.y + area.height.min(1),
            width,
            height,
        );
        panel_block().inner(outer)
    });
    StudioLayout {
        preview: area,
        panel_inner,
        bottom_bar,
    }
}

/// Panel row of field `index`, counted from the top of the interior.
pub fn field_row(index: usize) -> u16 {
    if index < 8 {
        1 + index as u16
    } else {
        3 + index as u16
    }
}

/// Field shown on panel row `row`, if any.
pub fn field_at_row(row: u16) -> Option<usize> {
    match row {
        1..=8 => Some(row as usize - 1),
        11..=15 => Some(row as usize - 3),
        _ => None,
    }
}

fn panel_block() -> Block<'static> {
    Block::default()
        .title(Span::styled(" Gradient Controls ", Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BORDER))
}

pub fn render_panel(f: &mut Frame, app: &App) {
    let area = f.area();
    if app.panel_collapsed {
        render_collapsed_tab(f, area);
        return;
    }
    let layout = get_layout_rects(area, false, app.editor.editing);
    let Some(inner) = layout.panel_inner else {
        return;
    };
    let outer = Rect::new(
        inner.x.saturating_sub(1),
        inner.y.saturating_sub(1),
        inner.width + 2,
        inner.height + 2,
    );
    f.render_widget(Clear, outer);
    f.render_widget(panel_block(), outer);

    let list_area = Rect::new(inner.x, inner.y, inner.width, inner.height.min(FIELD_ROWS));
    f.render_widget(Paragraph::new(field_lines(&app.config, &app.editor, inner.width)), list_area);

    if app.editor.editing && inner.height > FIELD_ROWS {
        let picker_area = Rect::new(
            inner.x,
            inner.y + FIELD_ROWS,
            inner.width,
            inner.height - FIELD_ROWS,
        );
        render_hsl_picker(f, &app.editor, picker_area);
    }
}

fn render_collapsed_tab(f: &mut Frame, area: Rect) {
    let label = " \u{25c0} Tab: controls ";
    let width = (label.width() as u16).min(area.width);
    let tab = Rect::new(
        area.x + area.width.saturating_sub(width + 1),
        area.y + area.height.min(1),
        width,
        1,
    );
    f.render_widget(Clear, tab);
    f.render_widget(
        Paragraph::new(Span::styled(label, Style::default().fg(ACCENT).bg(Color::Rgb(20, 20, 30)))),
        tab,
    );
}

fn section_header(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {}", title),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))
}

fn field_lines(config: &GradientConfig, editor: &EditorState, width: u16) -> Vec<Line<'static>> {
    let mut lines = vec![section_header("Colors")];
    for (i, field) in ConfigField::all().into_iter().enumerate() {
        if i == 8 {
            lines.push(Line::from(""));
            lines.push(section_header("Effects"));
        }
        lines.push(field_line(config, field, i == editor.field_index, width));
    }
    lines
}

fn field_line(
    config: &GradientConfig,
    field: ConfigField,
    selected: bool,
    width: u16,
) -> Line<'static> {
    let indicator_style = if selected {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DIM)
    };
    let label_style = if selected {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let indicator = if selected { ">" } else { " " };
    let mut spans = vec![Span::styled(format!("{} ", indicator), indicator_style)];

    match config.value(field) {
        FieldValue::Color(hex) => {
            let swatch = parse_hex(hex).unwrap_or_default().to_ratatui_color();
            spans.push(Span::styled("  ", Style::default().bg(swatch)));
            spans.push(Span::styled(format!(" {:<20}", field.label()), label_style));
            // stored values are verbatim and may be arbitrarily long
            spans.push(Span::styled(clip(hex, 9), Style::default().fg(DIM)));
        }
        FieldValue::Number(value) => {
            spans.push(Span::styled(format!("{:<14}", field.label()), label_style));
            if let Some(range) = field.range() {
                // "> " + label + " 100px"
                let bar_width = (width as usize).saturating_sub(2 + 14 + 7).max(4);
                let normalized = ((value - range.min) / (range.max - range.min)).clamp(0.0, 1.0);
                let filled = (normalized * bar_width as f64).round() as usize;
                spans.push(Span::styled("\u{2588}".repeat(filled), Style::default().fg(ACCENT)));
                spans.push(Span::styled(
                    "\u{2591}".repeat(bar_width - filled.min(bar_width)),
                    Style::default().fg(DIM),
                ));
                spans.push(Span::styled(
                    format!(" {:.0}{}", value, range.unit),
                    Style::default().fg(Color::White),
                ));
            }
        }
        FieldValue::Blend(mode) => {
            spans.push(Span::styled(format!("{:<14}", field.label()), label_style));
            spans.push(Span::styled("\u{2039} ", Style::default().fg(DIM)));
            spans.push(Span::styled(mode.label(), Style::default().fg(Color::White)));
            spans.push(Span::styled(" \u{203a}", Style::default().fg(DIM)));
        }
        FieldValue::Toggle(on) => {
            spans.push(Span::styled(format!("{:<14}", field.label()), label_style));
            let (text, color) = if on {
                ("[on]", Color::Rgb(120, 220, 140))
            } else {
                ("[off]", DIM)
            };
            spans.push(Span::styled(text, Style::default().fg(color)));
        }
    }
    Line::from(spans)
}

fn render_hsl_picker(f: &mut Frame, editor: &EditorState, area: Rect) {
    let color = editor.picker;
    let mut y = area.y;
    let bottom = area.y + area.height;

    if y < bottom {
        let title = Line::from(vec![
            Span::styled(" HSL Picker: ", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
            Span::styled(editor.current_field().label(), Style::default().fg(Color::White)),
        ]);
        f.render_widget(Paragraph::new(title), Rect::new(area.x, y, area.width, 1));
        y += 2;
    }

    match editor.picker_mode {
        PickerMode::Slider => {
            let rows: [(&str, SliderFocus, f64, f64); 3] = [
                ("H", SliderFocus::Hue, color.h, 360.0),
                ("S", SliderFocus::Saturation, color.s, 100.0),
                ("L", SliderFocus::Lightness, color.l, 100.0),
            ];
            for (label, focus, value, max) in rows {
                if y >= bottom {
                    break;
                }
                let focused = editor.slider_focus == focus;
                // keep hue and saturation bars readable at extreme lightness
                let l = color.l.clamp(20.0, 80.0);
                render_slider_row(f, area.x, y, area.width, label, value, max, focused, |pos| {
                    let at = match focus {
                        SliderFocus::Hue => HslColor::new(pos, color.s, l),
                        SliderFocus::Saturation => HslColor::new(color.h, pos, l),
                        SliderFocus::Lightness => HslColor::new(color.h, color.s, pos),
                    };
                    at.to_ratatui_color()
                });
                y += 2;
            }
        }
        PickerMode::HexInput => {
            if y < bottom {
                let input_line = Line::from(vec![
                    Span::styled("  Hex: ", Style::default().fg(DIM)),
                    Span::styled(
                        editor.hex_input.clone(),
                        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled("_", Style::default().fg(ACCENT)),
                ]);
                f.render_widget(Paragraph::new(input_line), Rect::new(area.x, y, area.width, 1));
                y += 2;
            }
            if y < bottom {
                let hint = if parse_hex(&editor.hex_input).is_some() {
                    Span::styled("  Enter to apply", Style::default().fg(DIM))
                } else {
                    Span::styled("  #rrggbb", Style::default().fg(DIM))
                };
                let hint_area = Rect::new(area.x, y, area.width, 1);
                f.render_widget(Paragraph::new(Line::from(hint)), hint_area);
                y += 4;
            }
        }
    }

    if y < bottom {
        let swatch_width = area.width.saturating_sub(4).min(20);
        let line = Line::from(vec![
            Span::raw("  "),
            Span::styled(
                " ".repeat(swatch_width as usize),
                Style::default().bg(color.to_ratatui_color()),
            ),
            Span::styled(format!(" {}", color.to_hex()), Style::default().fg(Color::White)),
        ]);
        f.render_widget(Paragraph::new(line), Rect::new(area.x, y, area.width, 1));
    }
}

/// Render a single HSL slider row.
///
/// Format: `  H: ████████░░ 240°`
/// Each block is colored by `color_fn` at its position; `░` marks the value.
#[allow(clippy::too_many_arguments)]
fn render_slider_row<F>(
    f: &mut Frame,
    x: u16,
    y: u16,
    width: u16,
    label: &str,
    value: f64,
    max: f64,
    focused: bool,
    color_fn: F,
) where
    F: Fn(f64) -> Color,
{
    let prefix_len: u16 = 5;
    let suffix_len: u16 = 6;
    let bar_width = width.saturating_sub(prefix_len + suffix_len) as usize;
    if bar_width == 0 {
        return;
    }

    let label_style = if focused {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DIM)
    };

    let normalized = (value / max).clamp(0.0, 1.0);
    let marker_pos =
        ((normalized * (bar_width as f64 - 1.0)).round() as usize).min(bar_width.saturating_sub(1));

    let mut spans = vec![Span::styled(format!("  {}: ", label), label_style)];
    for i in 0..bar_width {
        let pos_value = (i as f64 / (bar_width as f64 - 1.0).max(1.0)) * max;
        let fg_color = color_fn(pos_value);
        if i == marker_pos {
            spans.push(Span::styled("\u{2591}", Style::default().fg(Color::White).bg(fg_color)));
        } else {
            spans.push(Span::styled("\u{2588}", Style::default().fg(fg_color)));
        }
    }

    let suffix = if max > 200.0 {
        format!(" {:.0}\u{00b0}", value)
    } else {
        format!(" {:.0}%", value)
    };
    spans.push(Span::styled(suffix, Style::default().fg(Color::White)));

    f.render_widget(Paragraph::new(Line::from(spans)), Rect::new(x, y, width, 1));
}

pub fn render_bottom_bar(f: &mut Frame, app: &App, area: Rect) {
    if let Some(ref msg) = app.status_message {
        let bar = Paragraph::new(Line::from(Span::styled(
            format!(" {}", msg),
            Style::default().fg(Color::Yellow),
        )))
        .style(Style::default().bg(Color::Rgb(20, 20, 30)));
        f.render_widget(bar, area);
        return;
    }

    let hints: &[(&str, &str)] = if app.editor.editing {
        &[
            ("\u{2190}/\u{2192}", "adjust"),
            ("Shift+\u{2190}/\u{2192}", "\u{00d7}10"),
            ("\u{2191}/\u{2193}", "slider"),
            ("Tab", "hex/slider"),
            ("Enter", "apply hex"),
            ("Esc", "done"),
        ]
    } else {
        &[
            ("j/k", "nav"),
            ("h/l", "adjust"),
            ("Enter", "edit"),
            ("Tab", "panel"),
            ("e", "export"),
            ("r", "reset"),
            ("?", "help"),
            ("q", "quit"),
        ]
    };
    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(format!(" {}", key), Style::default().fg(ACCENT)));
        spans.push(Span::styled(format!(":{}", action), Style::default().fg(DIM)));
    }
    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Rgb(20, 20, 30)));
    f.render_widget(bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_and_fields_agree() {
        for i in 0..ConfigField::all().len() {
            assert_eq!(field_at_row(field_row(i)), Some(i));
        }
        assert_eq!(field_at_row(0), None);
        assert_eq!(field_at_row(9), None);
        assert_eq!(field_at_row(10), None);
        assert!(field_row(12) < FIELD_ROWS);
    }

    #[test]
    fn collapsed_layout_has_no_panel() {
        let layout = get_layout_rects(Rect::new(0, 0, 120, 40), true, false);
        assert!(layout.panel_inner.is_none());
        assert_eq!(layout.preview, Rect::new(0, 0, 120, 40));
        assert_eq!(layout.bottom_bar, Rect::new(0, 39, 120, 1));
    }

    #[test]
    fn panel_sits_top_right() {
        let layout = get_layout_rects(Rect::new(0, 0, 120, 40), false, false);
        let inner = layout.panel_inner.unwrap();
        assert_eq!(inner.width, PANEL_WIDTH - 2);
        assert_eq!(inner.height, FIELD_ROWS);
        assert_eq!(inner.x + inner.width + 2, 120);

        let editing = get_layout_rects(Rect::new(0, 0, 120, 40), false, true);
        assert_eq!(editing.panel_inner.unwrap().height, FIELD_ROWS + PICKER_ROWS);
    }

    #[test]
    fn field_lines_cover_every_field() {
        let lines = field_lines(&GradientConfig::default(), &EditorState::new(), 44);
        assert_eq!(lines.len(), FIELD_ROWS as usize);
    }
}
