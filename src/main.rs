use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();
    let args = expense_tracker::args::parse();
    expense_tracker::cli::main(args)
}
