use clap::Parser;
use tickbot::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
