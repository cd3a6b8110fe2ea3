use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::{ACCENT, DIM};

pub fn render_help(f: &mut Frame) {
    let area = f.area();
    let width = area.width.saturating_sub(6).clamp(40, 80).min(area.width);
    let height = area.height.saturating_sub(4).clamp(12, 26).min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    let popup = Rect::new(x, y, width, height);

    f.render_widget(Clear, popup);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "Commands",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Global", Style::default().fg(ACCENT))),
        Line::from("  ?: toggle help  |  Ctrl+C: quit"),
        Line::from(""),
        Line::from(Span::styled("Controls", Style::default().fg(ACCENT))),
        Line::from("  j/k or Up/Down: fields  |  h/l or Left/Right: adjust (Shift x10)"),
        Line::from("  Enter: edit color / cycle blend / toggle mouse"),
        Line::from("  Tab: collapse panel  |  e: export  |  r: reset  |  q/Esc: quit"),
        Line::from("  mouse: click a field, move over the preview to steer the cursor blob"),
        Line::from(""),
        Line::from(Span::styled("Color Picker", Style::default().fg(ACCENT))),
        Line::from("  Left/Right: adjust  |  Up/Down: H/S/L  |  Tab: hex input"),
        Line::from("  Enter: apply hex  |  Esc: done"),
        Line::from(""),
        Line::from(Span::styled("Export", Style::default().fg(ACCENT))),
        Line::from("  j/k: select  |  Enter/y: copy  |  w: write files"),
        Line::from("  PgUp/PgDn: scroll  |  Esc: close"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(DIM),
        )),
    ];

    let max_body_lines = height.saturating_sub(2) as usize;
    if lines.len() > max_body_lines {
        lines.truncate(max_body_lines);
    }

    let block = Block::default()
        .title(Span::styled(" Help ", Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(paragraph, popup);
}
