use crate::application::Config;
use crate::application::tui::{PickerResult, PickerState, RangePicker, TextRenderer};
use crate::domain::{BookingRange, CalendarDate, RangeSelectionEngine, build_grid};
use crate::infrastructure::{CommitContext, HookRegistry, LogCommitHook};
use anyhow::{Context, Result};
use log::{debug, warn};

pub struct StayRangeApp {
    config: Config,
    hook_registry: HookRegistry,
}

impl StayRangeApp {
    pub fn new() -> Self {
        Self::with_default_plugins(Config::from_env())
    }

    pub fn with_default_plugins(config: Config) -> Self {
        let mut hook_registry = HookRegistry::new();
        hook_registry.register(LogCommitHook);

        Self {
            config,
            hook_registry,
        }
    }

    pub fn without_plugins(config: Config) -> Self {
        Self {
            config,
            hook_registry: HookRegistry::new(),
        }
    }

    pub fn hooks_mut(&mut self) -> &mut HookRegistry {
        &mut self.hook_registry
    }

    /// Pin "today", e.g. from a command-line flag
    pub fn set_today(&mut self, today: CalendarDate) {
        self.config.today = Some(today);
    }

    pub fn today(&self) -> CalendarDate {
        self.config.today()
    }

    /// A fresh engine for one widget, optionally seeded from a stored stay
    pub fn new_engine(
        &self,
        seed: Option<(CalendarDate, CalendarDate)>,
    ) -> Result<RangeSelectionEngine> {
        let today = self.today();
        match seed {
            Some((check_in, check_out)) => {
                RangeSelectionEngine::seeded(check_in, check_out, today)
                    .context("Cannot seed calendar from the given booking dates")
            }
            None => Ok(RangeSelectionEngine::new(today)),
        }
    }

    /// Feed clicks into `engine` in order; returns how many moved the selection
    pub fn replay_clicks(
        &self,
        engine: &mut RangeSelectionEngine,
        clicks: &[CalendarDate],
    ) -> usize {
        clicks
            .iter()
            .filter(|&&date| engine.on_day_clicked(date).is_updated())
            .count()
    }

    pub fn render_month(
        &self,
        month: CalendarDate,
        engine: &RangeSelectionEngine,
        color: bool,
    ) -> String {
        let grid = build_grid(month);
        let renderer = if color {
            TextRenderer::with_theme(&self.config.theme)
        } else {
            TextRenderer::new()
        };
        renderer.render_month(&grid, engine, self.today())
    }

    pub fn run_picker(&self, engine: RangeSelectionEngine) -> Result<PickerResult> {
        let seeded = engine.is_committed();
        let state = PickerState::new(engine, self.config.visible_months);

        let result = {
            let mut picker = RangePicker::new(state, self.config.theme.clone())
                .context("Failed to start the date picker")?;
            picker.run().context("Date picker failed")?
        }; // picker is dropped here, restoring the terminal

        debug!("picker finished with {:?}", result);

        if let PickerResult::Committed(range) = &result {
            let failures = self.commit("picker", range, seeded);
            if failures > 0 {
                warn!("{} commit hook(s) failed for the picked range", failures);
            }
        }

        Ok(result)
    }

    /// Notify commit hooks; returns how many of them failed
    pub fn commit(&self, source: &str, range: &BookingRange, seeded: bool) -> usize {
        let context = CommitContext {
            source: source.to_string(),
            today: self.today(),
            seeded,
        };
        self.hook_registry.execute_commit_hooks(&context, range)
    }
}

impl Default for StayRangeApp {
    fn default() -> Self {
        Self::new()
    }
}
