use clap::Parser;
use snafu::ErrorCompat;

mod args;
mod dashboard;

use crate::args::Args;

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = dashboard::run_dashboard(&args) {
        eprintln!("An error occurred: {}", e);
        for cause in ErrorCompat::iter_chain(&e).skip(1) {
            eprintln!("caused by: {}", cause);
        }
        std::process::exit(1);
    }
}
