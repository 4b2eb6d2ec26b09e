use crate::domain::BookingRange;
use crate::infrastructure::{CommitContext, CommitHook};
use anyhow::Result;
use log::info;

/// Plugin that logs every committed range
pub struct LogCommitHook;

impl CommitHook for LogCommitHook {
    fn on_range_committed(&self, context: &CommitContext, range: &BookingRange) -> Result<()> {
        info!(
            "[{}] Range committed: {} -> {} ({} nights, seeded: {}, today: {})",
            context.source,
            range.check_in(),
            range.check_out(),
            range.nights(),
            context.seeded,
            context.today
        );

        Ok(())
    }

    fn name(&self) -> &str {
        "Commit Logger"
    }
}
