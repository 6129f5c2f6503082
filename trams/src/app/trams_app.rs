use super::TramsOperation;
use clap::Parser;

/// command line tool for generating schedules and running TraMS games
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct TramsApp {
    #[command(subcommand)]
    pub op: TramsOperation,
}
