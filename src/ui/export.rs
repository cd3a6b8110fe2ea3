use std::time::Instant;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::App;

use super::{clip, ACCENT, BORDER, DIM};

/// Centered popup covering most of the screen.
pub fn modal_rect(area: Rect) -> Rect {
    let width = (area.width as u32 * 9 / 10) as u16;
    let height = (area.height as u32 * 17 / 20) as u16;
    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    )
}

pub fn render_export(f: &mut Frame, app: &App) {
    let popup = modal_rect(f.area());
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(
            " Export Code ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(10)])
        .split(rows[0]);

    render_artifact_list(f, app, columns[0]);
    render_code_view(f, app, columns[1]);
    render_hints(f, app, rows[1]);
}

fn render_artifact_list(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(BORDER));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let now = Instant::now();
    let selected = app.selected_artifact();
    let mut lines = Vec::new();
    for artifact in app.artifacts() {
        let is_selected = selected == Some(artifact);
        let (indicator, style) = if is_selected {
            (
                "> ",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )
        } else {
            ("  ", Style::default().fg(Color::Gray))
        };
        let label = artifact.label().split(" (").next().unwrap_or_default();
        let mut spans = vec![
            Span::styled(indicator, Style::default().fg(ACCENT)),
            Span::styled(clip(label, (inner.width as usize).saturating_sub(10)), style),
        ];
        if app.copy_feedback.is_showing(artifact, now) {
            spans.push(Span::styled(
                " Copied!",
                Style::default().fg(Color::Rgb(120, 220, 140)),
            ));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(Span::styled(
            format!("  {}", artifact.file_name()),
            Style::default().fg(DIM),
        )));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn render_code_view(f: &mut Frame, app: &App, area: Rect) {
    let Some(artifact) = app.selected_artifact() else {
        return;
    };
    let text = app.bundle.text(artifact).unwrap_or_default();
    let total = text.lines().count();

    let title = Line::from(vec![
        Span::styled(format!(" {} ", artifact.label()), Style::default().fg(ACCENT)),
        Span::styled(
            format!("{}/{} ", (app.export_scroll as usize + 1).min(total), total),
            Style::default().fg(DIM),
        ),
    ]);
    let block = Block::default().title(title).borders(Borders::NONE);
    let code_style = Style::default().fg(Color::Rgb(200, 200, 210));
    let lines: Vec<Line> = text
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), code_style)))
        .collect();
    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((app.export_scroll, 0));
    let code_area = Rect::new(area.x + 1, area.y, area.width.saturating_sub(1), area.height);
    f.render_widget(paragraph, code_area);
}

fn render_hints(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    for (key, action) in [
        ("j/k", "select"),
        ("Enter/y", "copy"),
        ("w", "write files"),
        ("PgUp/PgDn", "scroll"),
        ("Esc", "close"),
    ] {
        spans.push(Span::styled(format!(" {}", key), Style::default().fg(ACCENT)));
        spans.push(Span::styled(format!(":{}", action), Style::default().fg(DIM)));
    }
    spans.push(Span::styled(
        format!("  \u{2192} {}", app.export_dir.display()),
        Style::default().fg(DIM),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modal_is_centered() {
        let popup = modal_rect(Rect::new(0, 0, 100, 40));
        assert_eq!(popup, Rect::new(5, 3, 90, 34));
    }

    #[test]
    fn modal_fits_tiny_terminals() {
        let area = Rect::new(0, 0, 3, 2);
        let popup = modal_rect(area);
        assert!(popup.width <= area.width && popup.height <= area.height);
    }
}
