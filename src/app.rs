use std::cmp::Ordering;
use std::collections::VecDeque;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::{Action, Direction};
use crate::config::{Config, parse_key};
use crate::system::procfs::ProcSource;
use crate::system::sampler::Sampler;
use crate::system::snapshot::{ProcessRow, SystemSnapshot};
use crate::ui::theme::Theme;

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub help: KeyCode,
    pub cycle_sort: KeyCode,
    pub refresh: KeyCode,
    pub pause: KeyCode,
    pub cycle_theme: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &crate::config::KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
            cycle_sort: parse_key(&kb.cycle_sort).unwrap_or(KeyCode::Char('s')),
            refresh: parse_key(&kb.refresh).unwrap_or(KeyCode::Char('r')),
            pause: parse_key(&kb.pause).unwrap_or(KeyCode::Char('p')),
            cycle_theme: parse_key(&kb.cycle_theme).unwrap_or(KeyCode::Char('t')),
        }
    }

    /// Returns (key_label, description) pairs for the help overlay.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        let mut entries = vec![
            (key_label(self.quit), "Quit"),
            (key_label(self.cycle_sort), "Cycle sort mode"),
            (key_label(self.pause), "Pause/resume sampling"),
            (key_label(self.refresh), "Refresh now"),
            (key_label(self.cycle_theme), "Cycle theme"),
            (key_label(self.help), "Toggle help"),
        ];
        entries.push(("↑↓".to_string(), "Navigate"));
        entries.push(("Ctrl+C".to_string(), "Quit (always)"));
        entries
    }
}

pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        _ => "?".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Cpu,
    Memory,
    Pid,
}

impl SortMode {
    pub fn next(self) -> Self {
        match self {
            SortMode::Cpu => SortMode::Memory,
            SortMode::Memory => SortMode::Pid,
            SortMode::Pid => SortMode::Cpu,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Cpu => "CPU",
            SortMode::Memory => "Memory",
            SortMode::Pid => "PID",
        }
    }

    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "memory" => SortMode::Memory,
            "pid" => SortMode::Pid,
            _ => SortMode::Cpu,
        }
    }

    /// Row ordering policy as an explicit comparator; ties always fall back
    /// to ascending pid so views are deterministic.
    pub fn comparator(self) -> fn(&ProcessRow, &ProcessRow) -> Ordering {
        match self {
            SortMode::Cpu => |a, b| {
                b.cpu_utilization
                    .total_cmp(&a.cpu_utilization)
                    .then(a.pid.cmp(&b.pid))
            },
            SortMode::Memory => |a, b| b.memory_mb.cmp(&a.memory_mb).then(a.pid.cmp(&b.pid)),
            SortMode::Pid => |a, b| a.pid.cmp(&b.pid),
        }
    }
}

pub struct App {
    pub running: bool,
    pub paused: bool,
    sampler: Sampler<ProcSource>,
    pub snapshot: SystemSnapshot,
    pub cpu_history: VecDeque<u64>,
    cpu_history_capacity: usize,
    pub selected_index: usize,
    pub scroll_offset: usize,
    pub sort_mode: SortMode,
    pub show_help: bool,
    pub sample_error: Option<String>,
    pub os_name: String,
    pub kernel: String,
    pub theme: Theme,
    pub keybinds: ResolvedKeybinds,
    pub show_full_command: bool,
    max_rows: usize,
}

impl App {
    pub fn new(config: Config) -> Self {
        let source = ProcSource::new();
        let os_name = source
            .operating_system()
            .unwrap_or_else(|| "Linux".to_string());
        let kernel = source.kernel_version().unwrap_or_default();
        let sampler = Sampler::new(
            source,
            Duration::from_millis(config.general.sample_delay_ms),
        );

        let sparkline_length = config.general.sparkline_length;

        App {
            running: true,
            paused: false,
            sampler,
            snapshot: SystemSnapshot::default(),
            cpu_history: VecDeque::with_capacity(sparkline_length),
            cpu_history_capacity: sparkline_length,
            selected_index: 0,
            scroll_offset: 0,
            sort_mode: SortMode::from_str_config(&config.general.default_sort),
            show_help: false,
            sample_error: None,
            os_name,
            kernel,
            theme: Theme::from_config(&config.colors.theme),
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
            show_full_command: config.table.show_full_command,
            max_rows: config.table.max_rows,
        }
    }

    /// Runs one sampling cycle. On the one fatal condition (pid enumeration
    /// failure) the previous snapshot stays on screen and the status bar
    /// shows the error.
    pub async fn refresh_data(&mut self) {
        match self.sampler.advance_cycle().await {
            Ok(snapshot) => {
                let cpu_val = (snapshot.cpu_utilization * 100.0).round() as u64;
                if self.cpu_history.len() == self.cpu_history_capacity {
                    self.cpu_history.pop_front();
                }
                self.cpu_history.push_back(cpu_val);
                self.snapshot = snapshot;
                self.sample_error = None;
            }
            Err(err) => {
                self.sample_error = Some(err.to_string());
            }
        }
    }

    /// Rows for the renderer, ordered by the active sort mode.
    pub fn visible_rows(&self) -> Vec<&ProcessRow> {
        let mut rows: Vec<&ProcessRow> = self.snapshot.processes.iter().collect();
        let compare = self.sort_mode.comparator();
        rows.sort_by(|a, b| compare(a, b));
        if self.max_rows > 0 && rows.len() > self.max_rows {
            rows.truncate(self.max_rows);
        }
        rows
    }

    /// Keeps the selection inside the row set and the scroll window around it.
    pub fn clamp_selection(&mut self, visible_height: usize) {
        let len = self.visible_rows().len();
        if len == 0 {
            self.selected_index = 0;
            self.scroll_offset = 0;
            return;
        }
        self.selected_index = self.selected_index.min(len - 1);
        if visible_height == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected_index + 1 - visible_height;
        }
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        self.keybinds.help_entries()
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        if self.show_help {
            // In help mode only the help key and Esc dismiss, everything else
            // is ignored
            if key.code == self.keybinds.help || key.code == KeyCode::Esc {
                return Action::ToggleHelp;
            }
            return Action::None;
        }

        // Arrow keys are hardwired (not configurable)
        match key.code {
            KeyCode::Up => return Action::Navigate(Direction::Up),
            KeyCode::Down => return Action::Navigate(Direction::Down),
            _ => {}
        }

        let kb = &self.keybinds;
        if key.code == kb.quit {
            return Action::Quit;
        }
        if key.code == kb.help {
            return Action::ToggleHelp;
        }
        if key.code == kb.cycle_sort {
            return Action::CycleSortMode;
        }
        if key.code == kb.pause {
            return Action::TogglePause;
        }
        if key.code == kb.refresh {
            return Action::Refresh;
        }
        if key.code == kb.cycle_theme {
            return Action::CycleTheme;
        }

        Action::None
    }

    /// Applies an action. [`Action::Refresh`] is handled by the caller since
    /// sampling is async.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Navigate(direction) => self.navigate(direction),
            Action::CycleSortMode => {
                self.sort_mode = self.sort_mode.next();
                self.selected_index = 0;
                self.scroll_offset = 0;
            }
            Action::CycleTheme => self.theme = self.theme.next(),
            Action::TogglePause => self.paused = !self.paused,
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Refresh | Action::None => {}
        }
    }

    fn navigate(&mut self, direction: Direction) {
        let len = self.visible_rows().len();
        if len == 0 {
            return;
        }
        self.selected_index = match direction {
            Direction::Up => self.selected_index.saturating_sub(1),
            Direction::Down => (self.selected_index + 1).min(len - 1),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pid: u32, cpu: f64, memory_mb: u64) -> ProcessRow {
        ProcessRow {
            pid,
            user: "tester".to_string(),
            cpu_utilization: cpu,
            memory_mb,
            uptime_seconds: 10,
            command: format!("proc_{pid}"),
        }
    }

    fn app_with_rows(rows: Vec<ProcessRow>) -> App {
        let mut app = App::new(Config::default());
        app.snapshot.processes = rows;
        app
    }

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn key_mapping_uses_configured_binds() {
        let app = App::new(Config::default());
        assert_eq!(app.map_key(press('q')), Action::Quit);
        assert_eq!(app.map_key(press('s')), Action::CycleSortMode);
        assert_eq!(app.map_key(press('p')), Action::TogglePause);
        assert_eq!(app.map_key(press('r')), Action::Refresh);
        assert_eq!(app.map_key(press('t')), Action::CycleTheme);
        assert_eq!(app.map_key(press('z')), Action::None);
        assert_eq!(
            app.map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
    }

    #[test]
    fn help_mode_swallows_other_keys() {
        let mut app = App::new(Config::default());
        app.dispatch(Action::ToggleHelp);
        assert!(app.show_help);
        assert_eq!(app.map_key(press('q')), Action::None);
        assert_eq!(app.map_key(press('?')), Action::ToggleHelp);
    }

    #[test]
    fn sort_modes_cycle_and_order_rows() {
        let mut app = app_with_rows(vec![
            row(1, 0.10, 500),
            row(2, 0.90, 100),
            row(3, 0.50, 900),
        ]);

        let cpu_order: Vec<u32> = app.visible_rows().iter().map(|r| r.pid).collect();
        assert_eq!(cpu_order, vec![2, 3, 1]);

        app.dispatch(Action::CycleSortMode);
        assert_eq!(app.sort_mode, SortMode::Memory);
        let memory_order: Vec<u32> = app.visible_rows().iter().map(|r| r.pid).collect();
        assert_eq!(memory_order, vec![3, 1, 2]);

        app.dispatch(Action::CycleSortMode);
        assert_eq!(app.sort_mode, SortMode::Pid);
        let pid_order: Vec<u32> = app.visible_rows().iter().map(|r| r.pid).collect();
        assert_eq!(pid_order, vec![1, 2, 3]);
    }

    #[test]
    fn cpu_sort_ties_break_by_ascending_pid() {
        let app = app_with_rows(vec![row(9, 0.25, 0), row(4, 0.25, 0), row(7, 0.25, 0)]);
        let order: Vec<u32> = app.visible_rows().iter().map(|r| r.pid).collect();
        assert_eq!(order, vec![4, 7, 9]);
    }

    #[test]
    fn navigation_clamps_to_row_bounds() {
        let mut app = app_with_rows(vec![row(1, 0.3, 0), row(2, 0.2, 0), row(3, 0.1, 0)]);
        app.dispatch(Action::Navigate(Direction::Up));
        assert_eq!(app.selected_index, 0);
        for _ in 0..10 {
            app.dispatch(Action::Navigate(Direction::Down));
        }
        assert_eq!(app.selected_index, 2);
    }

    #[test]
    fn selection_scrolls_into_view() {
        let rows: Vec<ProcessRow> = (1..=20).map(|pid| row(pid, 0.0, 0)).collect();
        let mut app = app_with_rows(rows);
        for _ in 0..14 {
            app.dispatch(Action::Navigate(Direction::Down));
        }
        app.clamp_selection(10);
        assert_eq!(app.selected_index, 14);
        assert_eq!(app.scroll_offset, 5);

        for _ in 0..14 {
            app.dispatch(Action::Navigate(Direction::Up));
        }
        app.clamp_selection(10);
        assert_eq!(app.scroll_offset, 0);
    }

    #[test]
    fn theme_cycles_via_keybind() {
        let mut app = App::new(Config::default());
        assert_eq!(app.theme.name, "dark");
        app.dispatch(app.map_key(press('t')));
        assert_eq!(app.theme.name, "light");
        app.dispatch(Action::CycleTheme);
        assert_eq!(app.theme.name, "dark");
    }

    #[test]
    fn pause_toggles() {
        let mut app = App::new(Config::default());
        app.dispatch(Action::TogglePause);
        assert!(app.paused);
        app.dispatch(Action::TogglePause);
        assert!(!app.paused);
    }
}
