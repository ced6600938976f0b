//! Spoonsmith command-line renderer
//!
//! Renders one spoon outline per invocation and writes it to an explicit path.

mod cli;

use clap::Parser;
use cli::Args;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::debug!("{args:?}");

    match cli::run(&args) {
        Ok(rendered) => println!("{} ({} bytes)", rendered.path.display(), rendered.bytes.len()),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}
