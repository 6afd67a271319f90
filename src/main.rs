use std::env;
use std::io;
use std::process;

use tracing_subscriber::EnvFilter;

use mathhammer::cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    process::exit(cli::run_with_args(&args));
}
