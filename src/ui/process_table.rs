use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Row, Table};

use crate::format::{elapsed_time, format_bytes, truncate_unicode};
use crate::system::snapshot::ProcessRow;
use crate::ui::theme::Theme;

const COMMAND_WIDTH: usize = 120;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    rows: &[&ProcessRow],
    selected_index: usize,
    scroll_offset: usize,
    show_full_command: bool,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));

    let header = Row::new(vec![
        Cell::from("PID"),
        Cell::from("USER"),
        Cell::from("CPU%"),
        Cell::from("MEM"),
        Cell::from("TIME+"),
        Cell::from("COMMAND"),
    ])
    .style(
        Style::default()
            .fg(theme.table_header_fg)
            .add_modifier(Modifier::BOLD),
    );

    let visible_height = area.height.saturating_sub(3) as usize; // borders + header
    let table_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_height)
        .map(|(i, p)| {
            let style = if i == selected_index {
                Style::default()
                    .fg(theme.row_selected_fg)
                    .bg(theme.row_selected_bg)
            } else {
                Style::default().fg(theme.text_primary)
            };
            let command = if show_full_command {
                p.command.as_str()
            } else {
                p.command.split_whitespace().next().unwrap_or_default()
            };
            Row::new(vec![
                Cell::from(p.pid.to_string()),
                Cell::from(truncate_unicode(&p.user, 12)),
                Cell::from(format!("{:5.1}", p.cpu_utilization * 100.0)),
                Cell::from(format_bytes(p.memory_mb * 1024 * 1024)),
                Cell::from(elapsed_time(p.uptime_seconds)),
                Cell::from(truncate_unicode(command, COMMAND_WIDTH)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(7),
        Constraint::Length(12),
        Constraint::Length(6),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Min(10),
    ];

    let table = Table::new(table_rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}
