pub mod log_commit;

pub use log_commit::*;
