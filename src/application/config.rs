use crate::application::tui::Theme;
use crate::domain::CalendarDate;
use log::warn;

pub const DEFAULT_THEME: &str = "dark";

pub struct Config {
    /// Pinned "today"; the local clock is used when unset
    pub today: Option<CalendarDate>,
    pub theme: Theme,
    /// Months shown side by side in the picker (1 or 2)
    pub visible_months: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from any variable lookup. Bad values are logged and replaced by
    /// the defaults.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let today = var("STAYRANGE_TODAY").and_then(|raw| match raw.parse::<CalendarDate>() {
            Ok(date) => Some(date),
            Err(e) => {
                warn!("Ignoring STAYRANGE_TODAY: {}", e);
                None
            }
        });

        let theme = var("STAYRANGE_THEME")
            .and_then(|name| {
                let theme = Theme::by_name(&name);
                if theme.is_none() {
                    warn!(
                        "Unknown theme '{}', expected one of {:?}",
                        name,
                        Theme::available_themes()
                    );
                }
                theme
            })
            .unwrap_or_default();

        let visible_months = match var("STAYRANGE_MONTHS").as_deref().map(str::trim) {
            None => 1,
            Some("1") => 1,
            Some("2") => 2,
            Some(other) => {
                warn!("Ignoring STAYRANGE_MONTHS={}, expected 1 or 2", other);
                1
            }
        };

        Self {
            today,
            theme,
            visible_months,
        }
    }

    pub fn today(&self) -> CalendarDate {
        self.today.unwrap_or_else(CalendarDate::today)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}
