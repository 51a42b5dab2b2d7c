use clap::Parser;

/// Interactive expense tracker. Expenses are recorded in memory for the
/// lifetime of the process; nothing is written to disk.
#[derive(Parser, Debug)]
#[clap(version)]
pub struct Args {
    /// Disable colored output
    #[clap(long)]
    pub no_color: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
