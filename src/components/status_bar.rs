use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

pub const KEY_HINTS: &str = " j/k:move  h:back  l:open  enter:select  .:hidden  q:quit ";

/// One-line bar showing the cursor position and key hints, or a transient
/// status message.
pub struct StatusBarWidget<'a> {
    position: &'a str,
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
    is_error: bool,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(position: &'a str, theme: &'a ThemeColors) -> Self {
        Self {
            position,
            theme,
            status_message: None,
            is_error: false,
        }
    }

    pub fn status_message(mut self, msg: &'a str, is_error: bool) -> Self {
        self.status_message = Some(msg);
        self.is_error = is_error;
        self
    }
}

/// Pad or cut `text` to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat(' ').take(width - len));
    out
}

impl<'a> Widget for StatusBarWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let width = area.width as usize;

        if let Some(msg) = self.status_message {
            let style = if self.is_error {
                Style::default()
                    .bg(self.theme.error_fg)
                    .fg(self.theme.status_bg)
            } else {
                Style::default().fg(self.theme.success_fg)
            };
            let line = Line::from(Span::styled(fit(msg, width), style));
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        let hints_len = KEY_HINTS.chars().count();
        let position_len = self.position.chars().count();

        let position_style = Style::default()
            .fg(self.theme.status_fg)
            .add_modifier(Modifier::BOLD);
        let hints_style = Style::default()
            .fg(self.theme.dim_fg)
            .add_modifier(Modifier::DIM);

        // Hints are dropped before the position when space runs out.
        let spans = if position_len + 1 + hints_len <= width {
            vec![
                Span::styled(format!(" {}", self.position), position_style),
                Span::raw(" ".repeat(width - position_len - 1 - hints_len)),
                Span::styled(KEY_HINTS, hints_style),
            ]
        } else {
            vec![Span::styled(fit(self.position, width), position_style)]
        };

        let line = Line::from(spans).style(Style::default().bg(self.theme.status_bg));
        buf.set_style(area, Style::default().bg(self.theme.status_bg));
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
