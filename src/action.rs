#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    Navigate(Direction),
    CycleSortMode,
    CycleTheme,
    TogglePause,
    ToggleHelp,
    Refresh,
    None,
}
