use std::process;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use minesweeper_alpha::config::Config;

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let code = match Config::from_env().and_then(minesweeper_alpha::run) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("\n{}", err);
            err.exit_code()
        }
    };
    process::exit(code);
}
