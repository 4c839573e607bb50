use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{ResolvedKeybinds, key_label};
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    keybinds: &ResolvedKeybinds,
    sample_error: Option<&str>,
    paused: bool,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.statusbar_bg);

    // A sampling error state takes priority over the keybind pills.
    if let Some(msg) = sample_error {
        let line = Line::from(Span::styled(
            format!(" {msg}"),
            Style::default()
                .fg(theme.status_err)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line).style(bg_style), area);
        return;
    }

    let mut spans = Vec::new();
    spans.extend(pill_spans(&key_label(keybinds.quit), "Quit", theme));
    spans.extend(pill_spans(&key_label(keybinds.cycle_sort), "Sort", theme));
    spans.extend(pill_spans(
        &key_label(keybinds.pause),
        if paused { "Resume" } else { "Pause" },
        theme,
    ));
    spans.extend(pill_spans(&key_label(keybinds.refresh), "Refresh", theme));
    spans.extend(pill_spans(&key_label(keybinds.cycle_theme), "Theme", theme));
    spans.extend(pill_spans(&key_label(keybinds.help), "Help", theme));
    spans.extend(pill_spans("\u{2193}\u{2191}", "Nav", theme));
    if paused {
        spans.push(Span::styled(
            "  PAUSED",
            Style::default()
                .fg(theme.status_err)
                .add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}

fn pill_spans<'a>(key: &str, desc: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.pill_desc_fg).bg(theme.surface_bg),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeybindsConfig;
    use crossterm::event::KeyCode;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_string(keybinds: &ResolvedKeybinds, error: Option<&str>, paused: bool) -> String {
        let backend = TestBackend::new(100, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, area, keybinds, error, paused, &Theme::default());
            })
            .unwrap();
        let buf = terminal.backend().buffer();
        (0..buf.area.width)
            .map(|x| buf.cell((x, 0)).unwrap().symbol())
            .collect()
    }

    #[test]
    fn pills_show_the_configured_keys() {
        let keybinds = ResolvedKeybinds {
            quit: KeyCode::Char('x'),
            pause: KeyCode::Char(' '),
            ..ResolvedKeybinds::from_config(&KeybindsConfig::default())
        };
        let output = render_to_string(&keybinds, None, false);
        assert!(output.contains(" x  Quit"));
        assert!(output.contains(" Space  Pause"));
        assert!(output.contains(" t  Theme"));
    }

    #[test]
    fn error_replaces_the_pills() {
        let keybinds = ResolvedKeybinds::from_config(&KeybindsConfig::default());
        let output = render_to_string(&keybinds, Some("cannot enumerate processes"), false);
        assert!(output.contains("cannot enumerate processes"));
        assert!(!output.contains("Quit"));
    }
}
