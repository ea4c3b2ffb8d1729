use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::browser::machine::EntryView;
use crate::browser::{EffectiveType, Snapshot};
use crate::theme::ThemeColors;

/// Shown when a directory lists no entries.
pub const EMPTY_TEXT: &str = "Bummer. No Files Found.";
pub const LOADING_TEXT: &str = "Loading…";

/// Width reserved for the right-aligned size column.
const SIZE_WIDTH: usize = 9;

/// Entry list of the current directory window.
pub struct PickerWidget<'a> {
    snapshot: &'a Snapshot,
    theme: &'a ThemeColors,
    cursor: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> PickerWidget<'a> {
    pub fn new(snapshot: &'a Snapshot, theme: &'a ThemeColors, cursor: &'a str) -> Self {
        Self {
            snapshot,
            theme,
            cursor,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn name_style(&self, row: &EntryView) -> Style {
        if row.is_disabled {
            return Style::default()
                .fg(self.theme.disabled_fg)
                .add_modifier(Modifier::DIM);
        }
        match (row.effective, row.is_symlink) {
            (EffectiveType::Directory, _) => Style::default()
                .fg(self.theme.dir_fg)
                .add_modifier(Modifier::BOLD),
            (EffectiveType::File, true) => Style::default().fg(self.theme.symlink_fg),
            (EffectiveType::File, false) => Style::default().fg(self.theme.file_fg),
        }
    }

    fn row_line(&self, row: &EntryView) -> Line<'static> {
        let marker_width = self.cursor.chars().count();
        let marker = if row.is_cursor {
            self.cursor.to_string()
        } else {
            " ".repeat(marker_width)
        };

        let mut spans = vec![
            Span::styled(
                marker,
                Style::default()
                    .fg(self.theme.cursor_fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                row.permissions.clone(),
                Style::default().fg(self.theme.permission_fg),
            ),
            Span::styled(
                format!("{:>width$}", row.size, width = SIZE_WIDTH),
                Style::default().fg(self.theme.size_fg),
            ),
            Span::raw(" "),
            Span::styled(row.name.clone(), self.name_style(row)),
        ];

        if let Some(target) = &row.symlink_target {
            spans.push(Span::styled(
                format!(" → {}", target.display()),
                Style::default().fg(self.theme.dim_fg),
            ));
        }

        let mut line = Line::from(spans);
        if row.is_cursor {
            line = line.style(Style::default().bg(self.theme.selected_bg));
        }
        line
    }

    fn placeholder(&self) -> Line<'static> {
        let (text, color) = if self.snapshot.loading {
            (LOADING_TEXT.to_string(), self.theme.dim_fg)
        } else if let Some(err) = &self.snapshot.error {
            (err.clone(), self.theme.error_fg)
        } else {
            (EMPTY_TEXT.to_string(), self.theme.warning_fg)
        };
        Line::from(Span::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::ITALIC),
        ))
    }
}

impl<'a> Widget for PickerWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(block) = &self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.snapshot.rows.is_empty() {
            buf.set_line(inner.x, inner.y, &self.placeholder(), inner.width);
            return;
        }

        for (i, row) in self.snapshot.rows.iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.y + inner.height {
                break;
            }
            let line = self.row_line(row);
            if row.is_cursor {
                buf.set_style(
                    Rect::new(inner.x, y, inner.width, 1),
                    Style::default().bg(self.theme.selected_bg),
                );
            }
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::theme;

    fn row(index: usize, name: &str, effective: EffectiveType) -> EntryView {
        EntryView {
            index,
            name: name.to_string(),
            is_cursor: false,
            is_selectable: true,
            is_disabled: false,
            effective,
            is_symlink: false,
            symlink_target: None,
            permissions: "-rw-r--r--".to_string(),
            size: "1.0 KB".to_string(),
        }
    }

    fn snapshot(rows: Vec<EntryView>, loading: bool) -> Snapshot {
        Snapshot {
            current_directory: PathBuf::from("/work"),
            display_path: PathBuf::from("/work"),
            loading,
            error: None,
            total: rows.len(),
            cursor: rows.iter().find(|r| r.is_cursor).map(|r| r.index),
            rows,
        }
    }

    fn render(snapshot: &Snapshot, width: u16, height: u16) -> Buffer {
        let tc = theme::dark_theme();
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        PickerWidget::new(snapshot, &tc, ">>").render(area, &mut buf);
        buf
    }

    fn line_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn test_cursor_row_has_marker() {
        let mut first = row(0, "docs", EffectiveType::Directory);
        first.is_cursor = true;
        let snap = snapshot(vec![first, row(1, "notes.md", EffectiveType::File)], false);
        let buf = render(&snap, 60, 2);

        let top = line_text(&buf, 0);
        let second = line_text(&buf, 1);
        assert!(top.starts_with(">> -rw-r--r--"));
        assert!(top.contains("docs"));
        assert!(second.starts_with("   -rw-r--r--"));
        assert!(second.contains("notes.md"));
    }

    #[test]
    fn test_size_is_right_aligned() {
        let snap = snapshot(vec![row(0, "a.md", EffectiveType::File)], false);
        let buf = render(&snap, 60, 1);
        assert!(line_text(&buf, 0).contains("-rw-r--r--   1.0 KB a.md"));
    }

    #[test]
    fn test_cursor_row_background() {
        let tc = theme::dark_theme();
        let mut first = row(0, "docs", EffectiveType::Directory);
        first.is_cursor = true;
        let snap = snapshot(vec![first, row(1, "b.md", EffectiveType::File)], false);
        let buf = render(&snap, 40, 2);
        assert_eq!(buf.cell((39, 0)).unwrap().bg, tc.selected_bg);
        assert_ne!(buf.cell((39, 1)).unwrap().bg, tc.selected_bg);
    }

    #[test]
    fn test_disabled_row_is_dimmed() {
        let tc = theme::dark_theme();
        let mut disabled = row(0, "x.txt", EffectiveType::File);
        disabled.is_disabled = true;
        disabled.is_selectable = false;
        let snap = snapshot(vec![disabled], false);
        let buf = render(&snap, 60, 1);

        let text = line_text(&buf, 0);
        let col = text.find("x.txt").unwrap() as u16;
        let cell = buf.cell((col, 0)).unwrap();
        assert_eq!(cell.fg, tc.disabled_fg);
        assert!(cell.modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_symlink_target_shown() {
        let mut link = row(0, "link", EffectiveType::Directory);
        link.is_symlink = true;
        link.symlink_target = Some(PathBuf::from("/real"));
        let snap = snapshot(vec![link], false);
        let buf = render(&snap, 60, 1);
        assert!(line_text(&buf, 0).contains("link → /real"));
    }

    #[test]
    fn test_empty_and_loading_placeholders() {
        let buf = render(&snapshot(Vec::new(), false), 40, 3);
        assert!(line_text(&buf, 0).contains(EMPTY_TEXT));

        let buf = render(&snapshot(Vec::new(), true), 40, 3);
        assert!(line_text(&buf, 0).contains(LOADING_TEXT));
    }

    #[test]
    fn test_listing_error_replaces_empty_text() {
        let mut snap = snapshot(Vec::new(), false);
        snap.error = Some("permission denied: /root".to_string());
        let buf = render(&snap, 40, 1);
        let text = line_text(&buf, 0);
        assert!(text.contains("permission denied: /root"));
        assert!(!text.contains(EMPTY_TEXT));
    }

    #[test]
    fn test_rows_beyond_area_are_clipped() {
        let rows = (0..5)
            .map(|i| row(i, &format!("f{}.md", i), EffectiveType::File))
            .collect();
        let buf = render(&snapshot(rows, false), 40, 2);
        assert!(line_text(&buf, 1).contains("f1.md"));
    }

    #[test]
    fn test_zero_area_does_not_panic() {
        let snap = snapshot(vec![row(0, "a", EffectiveType::File)], false);
        render(&snap, 0, 0);
    }
}
