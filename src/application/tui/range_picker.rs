use super::theme::Theme;
use crate::domain::{
    BookingRange, CalendarDate, CellClass, ClickOutcome, MonthCursor, MonthGrid,
    RangeSelectionEngine, SelectionState,
};
use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, poll};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::tty::IsTty;
use log::debug;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use std::io::{self, Stdout, stdout};

const HELP_TEXT: &str = concat!(
    "←→/hl=Day • ↑↓/jk=Week • PgUp/PgDn=Month • ",
    "Space=Pick • c=Confirm • x=Clear • t=Today • q=Quit",
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerResult {
    /// User confirmed a full check-in/check-out range
    Committed(BookingRange),
    /// User left without confirming; carries whatever was selected
    Cancelled(SelectionState),
}

/// Everything the picker knows apart from the terminal itself.
#[derive(Debug, Clone)]
pub struct PickerState {
    engine: RangeSelectionEngine,
    cursor: MonthCursor,
    /// Day under the keyboard focus
    focused: CalendarDate,
    visible_months: usize,
    should_exit: bool,
    committed: Option<BookingRange>,
    show_help: bool,
    /// One-line feedback shown under the calendar
    status: Option<String>,
}

impl PickerState {
    pub fn new(engine: RangeSelectionEngine, visible_months: usize) -> Self {
        let focused = match engine.current_selection() {
            SelectionState::StartOnly { start } | SelectionState::Range { start, .. } => start,
            SelectionState::Empty => engine.today(),
        };

        Self {
            engine,
            cursor: MonthCursor::new(focused),
            focused,
            visible_months: visible_months.clamp(1, 2),
            should_exit: false,
            committed: None,
            show_help: false,
            status: None,
        }
    }

    pub fn engine(&self) -> &RangeSelectionEngine {
        &self.engine
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn focused(&self) -> CalendarDate {
        self.focused
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn result(&self) -> PickerResult {
        match self.committed {
            Some(range) => PickerResult::Committed(range),
            None => PickerResult::Cancelled(self.engine.current_selection()),
        }
    }

    /// Grids for every visible pane, left to right
    pub fn visible_grids(&self) -> Vec<MonthGrid> {
        if self.visible_months > 1 {
            vec![self.cursor.grid(), self.cursor.following_grid()]
        } else {
            vec![self.cursor.grid()]
        }
    }

    /// Handle keyboard input
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            // Ctrl+C and Ctrl+D
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
                self.should_exit = true;
            }

            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => {
                self.should_exit = true;
            }

            (KeyCode::Left, _) | (KeyCode::Char('h'), _) => self.move_focus(-1),
            (KeyCode::Right, _) | (KeyCode::Char('l'), _) => self.move_focus(1),
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) => self.move_focus(-7),
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) => self.move_focus(7),

            (KeyCode::PageUp, _) => self.page(false),
            (KeyCode::PageDown, _) => self.page(true),

            (KeyCode::Char('t'), _) => {
                self.focused = self.engine.today();
                self.cursor.jump_to(self.focused);
            }

            (KeyCode::Char(' '), _) | (KeyCode::Enter, _) => self.click_focused(),

            (KeyCode::Char('c'), _) => self.commit(),

            (KeyCode::Char('x'), _) => {
                self.engine.clear();
                self.status = Some("Selection cleared".to_string());
            }

            (KeyCode::Char('?'), _) => {
                self.show_help = !self.show_help;
            }

            _ => {}
        }
    }

    fn move_focus(&mut self, days: i64) {
        let next = self.focused.add_days(days);
        if !next.is_supported() {
            self.status = Some("No dates beyond this point".to_string());
            return;
        }
        self.focused = next;
        self.keep_focus_visible();
    }

    fn keep_focus_visible(&mut self) {
        if self.cursor.shows(self.focused, self.visible_months) {
            return;
        }

        let moving_back = self.focused < self.cursor.current();
        self.cursor.jump_to(self.focused);
        if !moving_back && self.visible_months > 1 {
            // keep the new month in the right-hand pane
            self.cursor.previous();
        }
    }

    /// Flip a whole month, keeping the focused day-of-month where possible.
    fn page(&mut self, forward: bool) {
        if forward {
            self.cursor.next();
        } else {
            self.cursor.previous();
        }

        let month = self.cursor.current();
        let day = self.focused.day().min(month.days_in_month());
        self.focused = CalendarDate::from_ymd(month.year(), month.month(), day).unwrap_or(month);
    }

    fn click_focused(&mut self) {
        match self.engine.on_day_clicked(self.focused) {
            ClickOutcome::Updated(state) => {
                self.status = None;
                debug!("picker selection is now {:?}", state);
            }
            ClickOutcome::Ignored if self.focused < self.engine.today() => {
                self.status = Some("Past days can't be booked".to_string());
            }
            ClickOutcome::Ignored => {
                self.status = Some("Pick a later day for check-out".to_string());
            }
        }
    }

    fn commit(&mut self) {
        match self.engine.committed_range() {
            Some(range) => {
                self.committed = Some(range);
                self.should_exit = true;
            }
            None => {
                self.status = Some("Select a check-out date first".to_string());
            }
        }
    }

    fn selection_summary(&self) -> String {
        match self.engine.current_selection() {
            SelectionState::Empty => "Check-in: --   Check-out: --".to_string(),
            SelectionState::StartOnly { start } => {
                format!("Check-in: {}   Check-out: --", start)
            }
            SelectionState::Range { start, end } => format!(
                "Check-in: {}   Check-out: {}   ({} nights)",
                start,
                end,
                start.days_until(end)
            ),
        }
    }
}

pub struct RangePicker {
    state: PickerState,
    /// Terminal instance
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Theme for styling
    theme: Theme,
}

impl RangePicker {
    pub fn new(state: PickerState, theme: Theme) -> io::Result<Self> {
        // First check if we're in a proper terminal
        if !IsTty::is_tty(&std::io::stdout()) {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "Not running in a TTY, cannot initialize terminal interface",
            ));
        }

        enable_raw_mode()
            .map_err(|e| io::Error::other(format!("Failed to enable raw mode: {}", e)))?;

        stdout().execute(EnterAlternateScreen).map_err(|e| {
            let _ = disable_raw_mode(); // Clean up on failure
            io::Error::other(format!("Failed to enter alternate screen: {}", e))
        })?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend).map_err(|e| {
            let _ = disable_raw_mode();
            let _ = stdout().execute(LeaveAlternateScreen);
            io::Error::other(format!("Failed to create terminal: {}", e))
        })?;

        Ok(Self {
            state,
            terminal,
            theme,
        })
    }

    /// Calculate centered area with both horizontal and vertical centering
    fn calculate_centered_area(available: Rect, needed_width: u16, needed_height: u16) -> Rect {
        let width = std::cmp::min(available.width, needed_width);
        let height = std::cmp::min(available.height, needed_height);

        Rect {
            x: available.x + available.width.saturating_sub(width) / 2,
            y: available.y + available.height.saturating_sub(height) / 2,
            width,
            height,
        }
    }

    fn cell_style(
        date: CalendarDate,
        class: CellClass,
        in_month: bool,
        focused: CalendarDate,
        today: CalendarDate,
        theme: &Theme,
    ) -> Style {
        let mut style = if !in_month {
            theme.colors.other_month.to_ratatui()
        } else if class == CellClass::Plain && date.weekday_from_sunday() % 6 == 0 {
            theme.colors.weekend.to_ratatui()
        } else {
            theme.for_class(class).to_ratatui()
        };

        if date == today && class == CellClass::Plain {
            style = theme.colors.today.to_ratatui_with_modifier(Modifier::BOLD);
        }
        if date == focused && in_month {
            // selection colours stay visible under the focus
            if matches!(class, CellClass::Plain | CellClass::Disabled) {
                style = style.patch(theme.colors.focus.to_ratatui());
            }
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }

    /// Create one month table (static version for drawing)
    fn create_month_table_static(
        grid: &MonthGrid,
        engine: &RangeSelectionEngine,
        focused: CalendarDate,
        theme: &Theme,
    ) -> Table<'static> {
        let today = engine.today();

        let header = Row::new(
            ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
                .into_iter()
                .enumerate()
                .map(|(i, name)| {
                    let color = if i == 0 || i == 6 {
                        &theme.colors.weekend
                    } else {
                        &theme.colors.header
                    };
                    Cell::from(name).style(color.to_ratatui())
                }),
        )
        .height(1);

        let rows: Vec<Row> = grid
            .rows()
            .map(|week| {
                let cells: Vec<Cell> = week
                    .iter()
                    .map(|cell| {
                        let class = engine.classify(cell.date, today);
                        let style = Self::cell_style(
                            cell.date,
                            class,
                            cell.belongs_to_visible_month,
                            focused,
                            today,
                            theme,
                        );
                        Cell::from(format!("{:>3}", cell.date.day())).style(style)
                    })
                    .collect();
                Row::new(cells)
            })
            .collect();

        Table::new(rows, [Constraint::Length(4); 7])
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::NONE)
                    .title(grid.reference_month().as_naive().format("%B %Y").to_string())
                    .title_style(theme.colors.header.to_ratatui())
                    .title_alignment(Alignment::Center),
            )
            .column_spacing(1)
    }

    /// Create status and help text (static version)
    fn create_status_static(state: &PickerState, theme: &Theme) -> Paragraph<'static> {
        let mut lines = vec![Line::from(vec![Span::styled(
            state.selection_summary(),
            theme.colors.status_text.to_ratatui(),
        )])];

        if let Some(status) = state.status() {
            lines.push(Line::from(vec![Span::styled(
                status.to_string(),
                theme.colors.error_text.to_ratatui(),
            )]));
        }

        if state.show_help {
            lines.push(Line::from(vec![Span::styled(
                HELP_TEXT,
                theme.colors.help_text.to_ratatui(),
            )]));
        }

        Paragraph::new(lines)
            .block(Block::default().borders(Borders::NONE))
            .alignment(Alignment::Center)
    }

    /// Run the picker loop
    pub fn run(&mut self) -> io::Result<PickerResult> {
        const CALENDAR_HEIGHT: u16 = 9; // title + header + 6 weeks + gap
        const STATUS_HEIGHT: u16 = 3;
        const MONTH_WIDTH: u16 = 36;

        loop {
            if self.state.should_exit() {
                break;
            }

            let grids = self.state.visible_grids();
            let state = &self.state;
            let theme = &self.theme;

            self.terminal.draw(|frame| {
                let size = frame.area();
                let needed_width = MONTH_WIDTH * grids.len() as u16 + 2;
                let centered_area = Self::calculate_centered_area(
                    size,
                    needed_width,
                    CALENDAR_HEIGHT + STATUS_HEIGHT,
                );

                let main_chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(CALENDAR_HEIGHT),
                        Constraint::Length(STATUS_HEIGHT),
                    ])
                    .split(centered_area);

                let panes = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints(vec![Constraint::Ratio(1, grids.len() as u32); grids.len()])
                    .split(main_chunks[0]);

                for (grid, pane) in grids.iter().zip(panes.iter()) {
                    let table = Self::create_month_table_static(
                        grid,
                        state.engine(),
                        state.focused(),
                        theme,
                    );
                    frame.render_widget(table, *pane);
                }

                frame.render_widget(Self::create_status_static(state, theme), main_chunks[1]);
            })?;

            // Handle events with timeout to prevent blocking indefinitely
            if poll(std::time::Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    self.state.handle_key_event(key);
                }
            }
        }

        self.cleanup()?;
        Ok(self.state.result())
    }

    /// Explicit cleanup method
    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        Ok(())
    }
}

impl Drop for RangePicker {
    fn drop(&mut self) {
        // Fallback cleanup if explicit cleanup wasn't called
        let _ = self.cleanup();
    }
}
