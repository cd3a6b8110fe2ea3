use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::preview::Scene;

const UPPER_HALF: &str = "\u{2580}";

/// Rasterizes a [`Scene`] into the area, two samples per cell: the upper
/// half block takes the top sample as foreground and the bottom as
/// background.
pub struct GradientPreview<'a> {
    pub scene: &'a Scene,
}

impl<'a> Widget for GradientPreview<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let (vw, vh) = self.scene.viewport();
        let rows = area.height as f64 * 2.0;
        for row in 0..area.height {
            let top_y = (row as f64 * 2.0 + 0.5) / rows * vh;
            let bottom_y = (row as f64 * 2.0 + 1.5) / rows * vh;
            for col in 0..area.width {
                let x = (col as f64 + 0.5) / area.width as f64 * vw;
                let top = self.scene.sample(x, top_y).to_ratatui_color();
                let bottom = self.scene.sample(x, bottom_y).to_ratatui_color();
                buf[(area.x + col, area.y + row)]
                    .set_symbol(UPPER_HALF)
                    .set_style(Style::default().fg(top).bg(bottom));
            }
        }
    }
}

/// Map a terminal cell to the viewport pixel at its centre, or `None` when
/// the cell lies outside `area`.
pub fn cell_to_viewport(
    col: u16,
    row: u16,
    area: Rect,
    viewport: (f64, f64),
) -> Option<(f64, f64)> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    if col < area.x || row < area.y || col >= area.x + area.width || row >= area.y + area.height {
        return None;
    }
    let x = ((col - area.x) as f64 + 0.5) / area.width as f64 * viewport.0;
    let y = ((row - area.y) as f64 + 0.5) / area.height as f64 * viewport.1;
    Some((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::GradientConfig;
    use crate::preview::VIEWPORT;
    use ratatui::style::Color;

    #[test]
    fn fills_every_cell_with_half_blocks() {
        let scene = Scene::new(&GradientConfig::default(), 0.0, None);
        let area = Rect::new(0, 0, 12, 4);
        let mut buf = Buffer::empty(area);
        GradientPreview { scene: &scene }.render(area, &mut buf);
        for y in 0..4 {
            for x in 0..12 {
                assert_eq!(buf[(x, y)].symbol(), UPPER_HALF);
            }
        }
    }

    #[test]
    fn flat_scene_paints_background() {
        let config = GradientConfig {
            color_bg1: "#202020".into(),
            color_bg2: "#202020".into(),
            circle_size: 50.0,
            blur_amount: 0.0,
            ..GradientConfig::default()
        };
        let scene = Scene::new(&config, 0.0, None);
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        GradientPreview { scene: &scene }.render(area, &mut buf);
        // bottom right corner is clear of every blob
        let cell = &buf[(39, 9)];
        assert_eq!(cell.fg, Color::Rgb(32, 32, 32));
        assert_eq!(cell.bg, Color::Rgb(32, 32, 32));
    }

    #[test]
    fn empty_area_is_a_no_op() {
        let scene = Scene::new(&GradientConfig::default(), 0.0, None);
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 4));
        GradientPreview { scene: &scene }.render(Rect::new(0, 0, 0, 0), &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }

    #[test]
    fn maps_cells_to_viewport() {
        let area = Rect::new(10, 5, 144, 90);
        assert_eq!(cell_to_viewport(10, 5, area, VIEWPORT), Some((5.0, 5.0)));
        assert_eq!(cell_to_viewport(153, 94, area, VIEWPORT), Some((1435.0, 895.0)));
        assert_eq!(cell_to_viewport(9, 5, area, VIEWPORT), None);
        assert_eq!(cell_to_viewport(154, 5, area, VIEWPORT), None);
    }
}
