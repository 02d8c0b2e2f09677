mod config;
mod generate;
mod models;
mod query;
mod run;
mod store;
mod ui;

use anyhow::Result;
use env_logger::Env;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = config::Settings::from_args(&args)?;
    log::debug!("expense file: {}", settings.expense_file.display());

    if settings.command.is_empty() {
        run::as_menu(&settings)
    } else {
        run::as_cli(&settings)
    }
}
