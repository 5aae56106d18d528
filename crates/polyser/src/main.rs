//! The executable that round-trips serializable variants through the token
//! stream.

use std::process::ExitCode;

use clap::Parser;
use polyser_driver::Arguments;

fn main() -> ExitCode {
    env_logger::init();

    polyser_driver::run(Arguments::parse())
}
