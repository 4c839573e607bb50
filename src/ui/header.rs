use std::collections::VecDeque;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph, Sparkline};

use crate::format::elapsed_time;
use crate::system::snapshot::SystemSnapshot;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    snapshot: &SystemSnapshot,
    os_name: &str,
    kernel: &str,
    sort_label: &str,
    theme: &Theme,
    cpu_history: &VecDeque<u64>,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(area);

    render_branding(frame, chunks[0], snapshot, os_name, kernel, sort_label, theme);
    render_cpu(frame, chunks[1], snapshot, theme, cpu_history);
    render_memory(frame, chunks[2], snapshot, theme);
}

fn render_branding(
    frame: &mut Frame,
    area: Rect,
    snapshot: &SystemSnapshot,
    os_name: &str,
    kernel: &str,
    sort_label: &str,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let title = Line::from(vec![
        Span::styled(
            " ticktop ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(os_name.to_string(), Style::default().fg(theme.text_primary)),
        Span::raw("  "),
        Span::styled(kernel.to_string(), Style::default().fg(theme.text_secondary)),
    ]);

    let stats = Line::from(vec![
        Span::styled(
            format!("up {}", elapsed_time(snapshot.uptime_seconds)),
            Style::default().fg(theme.text_secondary),
        ),
        Span::raw("  "),
        Span::styled(
            format!(
                "procs {} ({} running)",
                snapshot.total_processes, snapshot.running_processes
            ),
            Style::default().fg(theme.text_secondary),
        ),
        Span::raw("  "),
        Span::styled(
            format!("sort: {sort_label}"),
            Style::default().fg(theme.text_secondary),
        ),
    ]);

    frame.render_widget(Paragraph::new(vec![title, stats]), inner);
}

fn render_cpu(
    frame: &mut Frame,
    area: Rect,
    snapshot: &SystemSnapshot,
    theme: &Theme,
    cpu_history: &VecDeque<u64>,
) {
    let cpu_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            format!(" CPU {:.1}% ", snapshot.cpu_utilization * 100.0),
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let cpu_data: Vec<u64> = cpu_history.iter().copied().collect();
    let sparkline = Sparkline::default()
        .block(cpu_block)
        .data(&cpu_data)
        .max(100)
        .style(Style::default().fg(theme.sparkline_color));

    frame.render_widget(sparkline, area);
}

fn render_memory(frame: &mut Frame, area: Rect, snapshot: &SystemSnapshot, theme: &Theme) {
    let ratio = snapshot.memory_utilization.clamp(0.0, 1.0);

    let mem_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " MEM ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let gauge = Gauge::default()
        .block(mem_block)
        .gauge_style(
            Style::default()
                .fg(theme.gauge_filled)
                .bg(theme.gauge_unfilled),
        )
        .ratio(ratio)
        .label(format!("{:.1}%", ratio * 100.0));

    frame.render_widget(gauge, area);
}
