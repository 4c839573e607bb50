use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::ui::theme::Theme;

/// Centered keybind overlay. The key column is sized from the widest resolved
/// label so remapped binds like `Space` never truncate, and the footer mirrors
/// the current sort and sampling state.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    entries: &[(String, &'static str)],
    sort_label: &str,
    paused: bool,
    theme: &Theme,
) {
    let key_width = entries.iter().map(|(key, _)| key.width()).max().unwrap_or(1);
    let desc_width = entries.iter().map(|(_, desc)| desc.width()).max().unwrap_or(1);

    let footer = format!(
        "sort: {sort_label}  sampling {}",
        if paused { "paused" } else { "live" }
    );
    let content_width = (key_width + desc_width + 5).max(footer.width() + 2);
    let width = (content_width as u16 + 2).min(area.width.saturating_sub(2));
    // entries + blank spacer + footer + borders
    let height = (entries.len() as u16 + 4).min(area.height.saturating_sub(2));
    let overlay = centered(area, width, height);

    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Keys ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(overlay);

    let mut lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(
                    format!(" {key:>key_width$} "),
                    Style::default()
                        .fg(theme.pill_key_fg)
                        .bg(theme.pill_key_bg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {desc}"), Style::default().fg(theme.pill_desc_fg)),
            ])
        })
        .collect();
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        format!(" {footer}"),
        Style::default()
            .fg(theme.text_secondary)
            .add_modifier(Modifier::ITALIC),
    )));

    frame.render_widget(block, overlay);
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme.surface_bg)),
        inner,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
