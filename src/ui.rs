use ratatui::{
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::browser::Snapshot;
use crate::components::picker::PickerWidget;
use crate::components::status_bar::StatusBarWidget;

pub const HEADER_ROWS: u16 = 3;
pub const LIST_BORDER_ROWS: u16 = 2;
pub const STATUS_ROWS: u16 = 1;
/// Rows taken by everything but the entry list.
pub const CHROME_ROWS: u16 = HEADER_ROWS + LIST_BORDER_ROWS + STATUS_ROWS;

/// Render the application UI.
pub fn render(app: &App, frame: &mut Frame) {
    let snapshot = app.browser.snapshot();
    let [header_area, list_area, status_area] = Layout::vertical([
        Constraint::Length(HEADER_ROWS),
        Constraint::Min(1),
        Constraint::Length(STATUS_ROWS),
    ])
    .areas(frame.area());

    let theme = &app.theme;
    let border_style = Style::default().fg(theme.border_fg);

    let header = Paragraph::new(Line::from(Span::styled(
        snapshot.display_path.display().to_string(),
        Style::default()
            .fg(theme.file_fg)
            .add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .title(" dirpick ")
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(header, header_area);

    let list_block = Block::default()
        .title(format!(" {} ", directory_title(&snapshot)))
        .borders(Borders::ALL)
        .border_style(border_style);
    frame.render_widget(
        PickerWidget::new(&snapshot, theme, &app.cursor).block(list_block),
        list_area,
    );

    let position = position_text(&snapshot);
    let mut status = StatusBarWidget::new(&position, theme);
    if let Some(msg) = &app.status_message {
        status = status.status_message(&msg.text, msg.is_error);
    }
    frame.render_widget(status, status_area);
}

fn directory_title(snapshot: &Snapshot) -> String {
    snapshot
        .current_directory
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| snapshot.current_directory.display().to_string())
}

/// `"<cursor>/<total>"`, or a loading/empty marker.
fn position_text(snapshot: &Snapshot) -> String {
    if snapshot.loading {
        return "loading".to_string();
    }
    match snapshot.cursor {
        Some(cursor) => format!("{}/{}", cursor + 1, snapshot.total),
        None => "0/0".to_string(),
    }
}
