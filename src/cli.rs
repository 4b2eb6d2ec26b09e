use stayrange::Cli;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with JSON output or the picker
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    Cli::run()
}
