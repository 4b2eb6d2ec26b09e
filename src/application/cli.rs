use crate::application::tui::{LEGEND, PickerResult};
use crate::application::StayRangeApp;
use crate::domain::CalendarDate;
use crate::infrastructure::{selection_json, to_payload_json};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "stayrange")]
#[command(about = "Check-in/check-out date range calendar")]
#[command(version)]
pub struct Cli {
    /// Treat this day as today (YYYY-MM-DD, defaults to STAYRANGE_TODAY or the clock)
    #[arg(long, global = true)]
    pub today: Option<CalendarDate>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Dates of an existing booking to start from
#[derive(Args, Debug, Clone, Default)]
pub struct SeedArgs {
    /// Persisted check-in (YYYY-MM-DD)
    #[arg(long, requires = "check_out")]
    pub check_in: Option<CalendarDate>,

    /// Persisted check-out (YYYY-MM-DD)
    #[arg(long, requires = "check_in")]
    pub check_out: Option<CalendarDate>,
}

impl SeedArgs {
    fn pair(&self) -> Option<(CalendarDate, CalendarDate)> {
        self.check_in.zip(self.check_out)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a month grid with the selection marked
    Grid {
        /// Month to show (YYYY-MM, defaults to the check-in month or today)
        #[arg(short, long, value_parser = parse_month)]
        month: Option<CalendarDate>,

        /// Colour the output with the configured theme
        #[arg(long)]
        color: bool,

        #[command(flatten)]
        seed: SeedArgs,
    },
    /// Replay day clicks and print the resulting selection as JSON
    Select {
        /// Clicked days in order (YYYY-MM-DD)
        #[arg(required = true)]
        dates: Vec<CalendarDate>,

        #[command(flatten)]
        seed: SeedArgs,
    },
    /// Pick a range interactively (default)
    Pick {
        #[command(flatten)]
        seed: SeedArgs,
    },
}

/// Parse `YYYY-MM` into the first day of that month.
pub fn parse_month(input: &str) -> Result<CalendarDate, String> {
    format!("{}-01", input.trim())
        .parse::<CalendarDate>()
        .map_err(|_| format!("invalid month '{}', expected YYYY-MM", input))
}

impl Cli {
    pub fn run() -> Result<()> {
        let cli = Self::parse();
        let mut app = StayRangeApp::new();
        cli.execute(&mut app)
    }

    pub fn execute(self, app: &mut StayRangeApp) -> Result<()> {
        if let Some(today) = self.today {
            app.set_today(today);
        }

        match self.command {
            Some(Commands::Grid { month, color, seed }) => {
                let engine = app.new_engine(seed.pair())?;
                let month = month
                    .or(seed.check_in)
                    .unwrap_or_else(|| app.today());

                print!("{}", app.render_month(month, &engine, color));
                println!("{}", LEGEND);
            }
            Some(Commands::Select { dates, seed }) => {
                let seeded = seed.pair().is_some();
                let mut engine = app.new_engine(seed.pair())?;
                app.replay_clicks(&mut engine, &dates);

                println!("{}", selection_json(&engine.current_selection())?);
                if let Some(range) = engine.committed_range() {
                    let failures = app.commit("select", &range, seeded);
                    if failures > 0 {
                        eprintln!("{} commit hook(s) failed", failures);
                    }
                }
            }
            Some(Commands::Pick { seed }) => {
                Self::pick(app, seed)?;
            }
            None => {
                Self::pick(app, SeedArgs::default())?;
            }
        }

        Ok(())
    }

    fn pick(app: &StayRangeApp, seed: SeedArgs) -> Result<()> {
        let engine = app.new_engine(seed.pair())?;

        match app.run_picker(engine)? {
            PickerResult::Committed(range) => {
                println!("{}", to_payload_json(&range)?);
            }
            PickerResult::Cancelled(state) => {
                eprintln!("No range confirmed");
                log::debug!("cancelled with {}", selection_json(&state)?);
            }
        }

        Ok(())
    }
}
