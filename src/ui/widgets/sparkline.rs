//! Mini sparkline widget for inline card previews
#![allow(dead_code)]

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A compact inline sparkline (single line)
pub struct MiniSparkline<'a> {
    data: &'a [f64],
    max: Option<f64>,
    style: Style,
    bar_chars: [char; 8],
}

impl<'a> MiniSparkline<'a> {
    pub fn new(data: &'a [f64]) -> Self {
        Self {
            data,
            max: None,
            style: Style::default().fg(Color::Cyan),
            bar_chars: ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'],
        }
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl<'a> Widget for MiniSparkline<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 || self.data.is_empty() {
            return;
        }

        let min = self.data.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = self
            .max
            .unwrap_or_else(|| self.data.iter().cloned().fold(f64::NEG_INFINITY, f64::max));
        let span = (max - min).max(f64::EPSILON);

        // Take the last N values that fit in the area
        let data_len = self.data.len().min(area.width as usize);
        let data_start = self.data.len().saturating_sub(data_len);

        for (i, &value) in self.data[data_start..].iter().enumerate() {
            let x = area.x + i as u16;
            if x >= area.x + area.width {
                break;
            }

            // Scale value to 0-7 range
            let scaled = (((value - min) / span) * 7.0).round() as usize;
            let scaled = scaled.min(7);

            let ch = self.bar_chars[scaled];
            buf.get_mut(x, area.y).set_char(ch).set_style(self.style);
        }
    }
}

/// Format sparkline data as inline text (for card cells and summaries)
pub fn sparkline_text(data: &[f64], width: usize) -> String {
    if data.is_empty() {
        return String::new();
    }

    let bar_chars = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    let min = data.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = (max - min).max(f64::EPSILON);

    let data_len = data.len().min(width);
    let data_start = data.len().saturating_sub(data_len);

    data[data_start..]
        .iter()
        .map(|&value| {
            let scaled = (((value - min) / span) * 7.0).round() as usize;
            bar_chars[scaled.min(7)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparkline_text() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let text = sparkline_text(&data, 8);
        assert_eq!(text.chars().count(), 8);
        assert!(text.starts_with('▁'));
        assert!(text.ends_with('█'));
    }

    #[test]
    fn test_sparkline_text_empty() {
        let data: [f64; 0] = [];
        let text = sparkline_text(&data, 8);
        assert!(text.is_empty());
    }

    #[test]
    fn test_sparkline_text_flat_series() {
        let data = [42.0, 42.0, 42.0];
        let text = sparkline_text(&data, 8);
        assert_eq!(text, "▁▁▁");
    }
}
