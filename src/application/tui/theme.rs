use crate::domain::CellClass;
use crossterm::style::{Color as CrosstermColor, Stylize};
use ratatui::style::{Color as RatatuiColor, Modifier, Style as RatatuiStyle};

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Selection
    pub selected_endpoint: ColorPair,
    pub in_range: ColorPair,
    pub disabled: ColorPair,
    pub plain: ColorPair,

    // Grid
    pub other_month: ColorPair,
    pub today: ColorPair,
    pub focus: ColorPair,
    pub header: ColorPair,
    pub weekend: ColorPair,

    // Text
    pub help_text: ColorPair,
    pub status_text: ColorPair,
    pub error_text: ColorPair,
}

#[derive(Debug, Clone)]
pub struct ColorPair {
    pub fg: CrosstermColor,
    pub bg: Option<CrosstermColor>,
}

impl ColorPair {
    pub fn new(fg: CrosstermColor) -> Self {
        Self { fg, bg: None }
    }

    pub fn with_bg(fg: CrosstermColor, bg: CrosstermColor) -> Self {
        Self { fg, bg: Some(bg) }
    }

    /// Convert to ratatui style
    pub fn to_ratatui(&self) -> RatatuiStyle {
        let mut style = RatatuiStyle::default().fg(Self::crossterm_to_ratatui(self.fg));
        if let Some(bg) = self.bg {
            style = style.bg(Self::crossterm_to_ratatui(bg));
        }
        style
    }

    /// Convert crossterm color to ratatui color
    pub fn crossterm_to_ratatui(color: CrosstermColor) -> RatatuiColor {
        match color {
            CrosstermColor::Black => RatatuiColor::Black,
            CrosstermColor::DarkRed => RatatuiColor::Red,
            CrosstermColor::DarkGreen => RatatuiColor::Green,
            CrosstermColor::DarkYellow => RatatuiColor::Yellow,
            CrosstermColor::DarkBlue => RatatuiColor::Blue,
            CrosstermColor::DarkMagenta => RatatuiColor::Magenta,
            CrosstermColor::DarkCyan => RatatuiColor::Cyan,
            CrosstermColor::Grey => RatatuiColor::Gray,
            CrosstermColor::DarkGrey => RatatuiColor::DarkGray,
            CrosstermColor::Red => RatatuiColor::LightRed,
            CrosstermColor::Green => RatatuiColor::LightGreen,
            CrosstermColor::Yellow => RatatuiColor::LightYellow,
            CrosstermColor::Blue => RatatuiColor::LightBlue,
            CrosstermColor::Magenta => RatatuiColor::LightMagenta,
            CrosstermColor::Cyan => RatatuiColor::LightCyan,
            CrosstermColor::White => RatatuiColor::White,
            CrosstermColor::Rgb { r, g, b } => RatatuiColor::Rgb(r, g, b),
            CrosstermColor::AnsiValue(v) => RatatuiColor::Indexed(v),
            _ => RatatuiColor::White,
        }
    }

    /// Convert to ratatui style with modifier
    pub fn to_ratatui_with_modifier(&self, modifier: Modifier) -> RatatuiStyle {
        self.to_ratatui().add_modifier(modifier)
    }

    /// Apply color to text for plain terminal output
    pub fn colorize(&self, text: &str) -> String {
        let mut styled = text.with(self.fg);
        if let Some(bg) = self.bg {
            styled = styled.on(bg);
        }
        format!("{}", styled)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            colors: ThemeColors {
                selected_endpoint: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::Cyan),
                in_range: ColorPair::with_bg(
                    CrosstermColor::White,
                    CrosstermColor::Rgb { r: 0, g: 64, b: 80 },
                ),
                disabled: ColorPair::new(CrosstermColor::Rgb { r: 90, g: 90, b: 90 }),
                plain: ColorPair::new(CrosstermColor::White),

                other_month: ColorPair::new(CrosstermColor::DarkGrey),
                today: ColorPair::new(CrosstermColor::Yellow),
                focus: ColorPair::with_bg(
                    CrosstermColor::White,
                    CrosstermColor::Rgb { r: 40, g: 40, b: 40 },
                ),
                header: ColorPair::new(CrosstermColor::DarkCyan),
                weekend: ColorPair::new(CrosstermColor::Rgb { r: 150, g: 150, b: 150 }),

                help_text: ColorPair::new(CrosstermColor::DarkCyan),
                status_text: ColorPair::new(CrosstermColor::White),
                error_text: ColorPair::new(CrosstermColor::Red),
            },
        }
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            colors: ThemeColors {
                selected_endpoint: ColorPair::with_bg(
                    CrosstermColor::White,
                    CrosstermColor::DarkBlue,
                ),
                in_range: ColorPair::with_bg(
                    CrosstermColor::Black,
                    CrosstermColor::Rgb { r: 200, g: 220, b: 245 },
                ),
                disabled: ColorPair::new(CrosstermColor::Grey),
                plain: ColorPair::new(CrosstermColor::Black),

                other_month: ColorPair::new(CrosstermColor::Grey),
                today: ColorPair::new(CrosstermColor::DarkYellow),
                focus: ColorPair::with_bg(
                    CrosstermColor::Black,
                    CrosstermColor::Rgb { r: 230, g: 230, b: 230 },
                ),
                header: ColorPair::new(CrosstermColor::DarkBlue),
                weekend: ColorPair::new(CrosstermColor::DarkGrey),

                help_text: ColorPair::new(CrosstermColor::DarkBlue),
                status_text: ColorPair::new(CrosstermColor::Black),
                error_text: ColorPair::new(CrosstermColor::DarkRed),
            },
        }
    }

    pub fn minimal() -> Self {
        Self {
            name: "Minimal".to_string(),
            colors: ThemeColors {
                selected_endpoint: ColorPair::with_bg(CrosstermColor::Black, CrosstermColor::White),
                in_range: ColorPair::with_bg(CrosstermColor::White, CrosstermColor::DarkGrey),
                disabled: ColorPair::new(CrosstermColor::DarkGrey),
                plain: ColorPair::new(CrosstermColor::White),

                other_month: ColorPair::new(CrosstermColor::DarkGrey),
                today: ColorPair::new(CrosstermColor::White),
                focus: ColorPair::with_bg(
                    CrosstermColor::White,
                    CrosstermColor::Rgb { r: 28, g: 28, b: 28 },
                ),
                header: ColorPair::new(CrosstermColor::White),
                weekend: ColorPair::new(CrosstermColor::Grey),

                help_text: ColorPair::new(CrosstermColor::Grey),
                status_text: ColorPair::new(CrosstermColor::White),
                error_text: ColorPair::new(CrosstermColor::White),
            },
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            "minimal" => Some(Self::minimal()),
            _ => None,
        }
    }

    pub fn available_themes() -> Vec<String> {
        vec!["dark".to_string(), "light".to_string(), "minimal".to_string()]
    }

    pub fn for_class(&self, class: CellClass) -> &ColorPair {
        match class {
            CellClass::SelectedStart | CellClass::SelectedEnd => &self.colors.selected_endpoint,
            CellClass::InRange => &self.colors.in_range,
            CellClass::Disabled => &self.colors.disabled,
            CellClass::Plain => &self.colors.plain,
        }
    }
}
