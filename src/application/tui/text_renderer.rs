use super::theme::Theme;
use crate::domain::{CalendarDate, CellClass, DayCell, MonthGrid, RangeSelectionEngine};

const WEEKDAY_HEADER: &str = " Su   Mo   Tu   We   Th   Fr   Sa ";

pub const LEGEND: &str = "[dd> check-in  <dd] check-out  =dd= in range  (dd) past  .. other month";

/// Plain-text month grid, one marker per cell class.
pub struct TextRenderer<'a> {
    theme: Option<&'a Theme>,
}

impl<'a> TextRenderer<'a> {
    pub fn new() -> Self {
        Self { theme: None }
    }

    /// Colour the cells with the theme's terminal colours.
    pub fn with_theme(theme: &'a Theme) -> Self {
        Self { theme: Some(theme) }
    }

    pub fn render_month(
        &self,
        grid: &MonthGrid,
        engine: &RangeSelectionEngine,
        today: CalendarDate,
    ) -> String {
        let mut out = String::new();

        let title = grid.reference_month().as_naive().format("%B %Y").to_string();
        out.push_str(&format!("{:^width$}\n", title, width = WEEKDAY_HEADER.len()));
        out.push_str(WEEKDAY_HEADER);
        out.push('\n');

        for row in grid.rows() {
            let line: Vec<String> = row
                .iter()
                .map(|cell| self.render_cell(cell, engine, today))
                .collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }

        out
    }

    fn render_cell(
        &self,
        cell: &DayCell,
        engine: &RangeSelectionEngine,
        today: CalendarDate,
    ) -> String {
        if !cell.belongs_to_visible_month {
            let text = " .. ";
            return match self.theme {
                Some(theme) => theme.colors.other_month.colorize(text),
                None => text.to_string(),
            };
        }

        let class = engine.classify(cell.date, today);
        let text = Self::cell_text(cell.date.day(), class);

        match self.theme {
            Some(theme) => theme.for_class(class).colorize(&text),
            None => text,
        }
    }

    fn cell_text(day: u32, class: CellClass) -> String {
        match class {
            CellClass::SelectedStart => format!("[{:02}>", day),
            CellClass::SelectedEnd => format!("<{:02}]", day),
            CellClass::InRange => format!("={:02}=", day),
            CellClass::Disabled => format!("({:02})", day),
            CellClass::Plain => format!(" {:02} ", day),
        }
    }
}

impl Default for TextRenderer<'_> {
    fn default() -> Self {
        Self::new()
    }
}
