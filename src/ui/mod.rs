pub mod header;
pub mod help;
pub mod process_table;
pub mod statusbar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let table_area = chunks[1];
    let visible_rows = table_area.height.saturating_sub(3) as usize;
    app.clamp_selection(visible_rows);

    let rows = app.visible_rows();
    process_table::render(
        frame,
        table_area,
        &rows,
        app.selected_index,
        app.scroll_offset,
        app.show_full_command,
        &app.theme,
    );

    header::render(
        frame,
        chunks[0],
        &app.snapshot,
        &app.os_name,
        &app.kernel,
        app.sort_mode.label(),
        &app.theme,
        &app.cpu_history,
    );

    statusbar::render(
        frame,
        chunks[2],
        &app.keybinds,
        app.sample_error.as_deref(),
        app.paused,
        &app.theme,
    );

    // Help overlay is rendered last to appear on top
    if app.show_help {
        help::render(
            frame,
            frame.area(),
            &app.help_entries(),
            app.sort_mode.label(),
            app.paused,
            &app.theme,
        );
    }
}
