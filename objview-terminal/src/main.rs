//! objview - load an OBJ mesh and apply transforms from the command line
//!
//! Usage:
//!   objview model.obj --center --rotate x=1.5708 --fit 1 --dump
//!
//! Set `RUST_LOG=debug` to trace the parser and transform passes.

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use objview_terminal::{Cli, TerminalApp};

fn main() -> Result<ExitCode> {
    env_logger::init();

    let cli = Cli::parse();
    let mut app = TerminalApp::new(cli);

    let ok = app.run(&mut io::stdout().lock(), &mut io::stderr().lock())?;
    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
