//! The cityscape: sky, stars, sun, skyline and the lit building.

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::constants::windows::{COLUMNS, PER_COLUMN};
use crate::coordinator::Scene;
use crate::crossfade::{Rgb, SceneLook};

use super::colors;

/// Width of the screen the sun path is laid out on.
const LAYOUT_WIDTH: f64 = 360.0;
/// Height of the city panel the sun path is laid out on.
const LAYOUT_HEIGHT: f64 = 512.0;
/// Sun position at noon, relative to the panel's top-left corner.
const SUN_ORIGIN: (f64, f64) = (32.0, 86.0);

/// Far skyline heights, repeated across the panel.
const FAR_SKYLINE: [u16; 12] = [4, 4, 6, 6, 6, 3, 5, 5, 8, 8, 4, 4];
/// Near skyline heights, repeated across the panel.
const NEAR_SKYLINE: [u16; 9] = [2, 3, 3, 5, 5, 2, 4, 4, 3];

/// Renders one frame of the city.
pub struct CityView<'a> {
    scene: &'a Scene,
    look: SceneLook,
}

impl<'a> CityView<'a> {
    pub fn new(scene: &'a Scene, look: SceneLook) -> Self {
        Self { scene, look }
    }

    fn paint(buf: &mut Buffer, x: u16, y: u16, symbol: &str, fg: Color, bg: Color) {
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_symbol(symbol).set_fg(fg).set_bg(bg);
        }
    }

    fn draw_sky(&self, area: Rect, buf: &mut Buffer) {
        let sky: Color = self.look.palette.into();
        let star: Color = self.look.palette.lerp(colors::STAR, self.look.stars).into();
        let star_rows = area.height * 3 / 5;

        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let lit = self.look.stars > 0.0
                    && y - area.top() < star_rows
                    && is_star(x - area.left(), y - area.top());
                let symbol = if lit { "·" } else { " " };
                Self::paint(buf, x, y, symbol, star, sky);
            }
        }
    }

    fn draw_sun(&self, area: Rect, buf: &mut Buffer) {
        let (dx, dy) = self.look.sun;
        let col = ((SUN_ORIGIN.0 + dx) / LAYOUT_WIDTH * area.width as f64) as u16;
        let row = ((SUN_ORIGIN.1 + dy) / LAYOUT_HEIGHT * area.height as f64) as u16;
        let sun: Color = colors::SUN.into();
        let sky: Color = self.look.palette.into();

        for (offset, symbol) in [(0, "▄██▄"), (1, "▀██▀")] {
            let y = area.top().saturating_add(row).saturating_add(offset);
            if y >= area.bottom() {
                continue;
            }
            for (i, ch) in symbol.chars().enumerate() {
                let x = area.left().saturating_add(col).saturating_add(i as u16);
                if x < area.right() {
                    Self::paint(buf, x, y, &ch.to_string(), sun, sky);
                }
            }
        }
    }

    fn draw_skyline(&self, area: Rect, buf: &mut Buffer, heights: &[u16], tint: Rgb, weight: f64) {
        let color: Color = self.look.palette.lerp(tint, weight).into();
        for x in area.left()..area.right() {
            let height = heights[(x - area.left()) as usize % heights.len()].min(area.height);
            for y in area.bottom() - height..area.bottom() {
                Self::paint(buf, x, y, " ", color, color);
            }
        }
    }

    fn draw_building(&self, area: Rect, buf: &mut Buffer) {
        // Each window is two cells wide with a one cell gap, framed by a
        // two cell wall on either side; one wall row above and below.
        let width = (COLUMNS * 3 + 3) as u16;
        let height = (PER_COLUMN + 2) as u16;
        let wall: Color = colors::BUILDING.into();

        let left = area.left() + area.width.saturating_sub(width) / 2;
        let top = area.bottom().saturating_sub(height).max(area.top());

        for y in top..area.bottom() {
            for x in left..(left + width).min(area.right()) {
                Self::paint(buf, x, y, " ", wall, wall);
            }
        }

        // Signed so that rows above a short panel can be skipped.
        let first_row = area.bottom() as i32 - height as i32 + 1;

        for light in self.scene.windows.lights() {
            let column = (light.index / PER_COLUMN) as u16;
            let y = first_row + (light.index % PER_COLUMN) as i32;
            if y < area.top() as i32 {
                continue;
            }
            let y = y as u16;
            let color = colors::window(light.color);
            let x = left + 2 + column * 3;
            for dx in 0..2 {
                if x + dx < area.right() {
                    Self::paint(buf, x + dx, y, "█", color, wall);
                }
            }
        }
    }
}

impl Widget for CityView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        self.draw_sky(area, buf);
        self.draw_sun(area, buf);
        self.draw_skyline(area, buf, &FAR_SKYLINE, colors::SKYLINE_FAR, 0.45);
        self.draw_skyline(area, buf, &NEAR_SKYLINE, colors::SKYLINE_NEAR, 0.7);
        self.draw_building(area, buf);
    }
}

/// Fixed star pattern: a sparse, stable scatter over the sky.
fn is_star(x: u16, y: u16) -> bool {
    let h = (x as u32).wrapping_mul(73_856_093) ^ (y as u32).wrapping_mul(19_349_663);
    h % 23 == 0
}
