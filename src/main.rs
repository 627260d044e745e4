#![allow(nonstandard_style)]

mod computing;
mod configuring;
mod error_handling;
mod evaluating;
mod parsing;
mod persisting;
mod scanning;
mod storing;

use clap::Parser;
use configuring::Options;
use evaluating::*;
use parsing::Command;

use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

fn emit(out: &mut impl Write, reply: Reply) -> io::Result<bool> {
    match reply {
        Reply::quit => Ok(false),
        Reply::lines(lines) => {
            for line in lines {
                writeln!(out, "{line}")?;
            }
            Ok(true)
        },
    }
}

/// Strips the line ending; undecodable bytes become U+FFFD and fail to parse like any other junk.
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

fn prompt(out: &mut impl Write, options: &Options) -> io::Result<()> {
    if !options.quiet {
        write!(out, ">> ")?;
    }
    out.flush()
}

fn run(options: &Options) -> io::Result<()> {
    let mut out = io::stdout().lock();
    let mut session = Session::new(options.capacity);

    if !options.quiet {
        emit(&mut out, Reply::lines(help_text(options.capacity)))?;
    }
    if let Some(path) = &options.load {
        emit(&mut out, session.run_command(Command::load(path.clone())))?;
    }

    let mut input = io::stdin().lock();
    let mut buffer = Vec::new();
    prompt(&mut out, options)?;
    loop {
        buffer.clear();
        if input.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        if !emit(&mut out, session.run_line(&decode_line(&buffer)))? {
            return Ok(());
        }
        prompt(&mut out, options)?;
    }

    // end of input ends the session like `quit`
    tracing::debug!(vectors = session.table().len(), "input closed");
    if !options.quiet {
        writeln!(out)?;
    }
    Ok(())
}

fn main() {
    let options = Options::parse();

    let filter = EnvFilter::try_new(&options.log).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    tracing::debug!(capacity = options.capacity, "starting session");
    if let Err(error) = run(&options) {
        tracing::error!(%error, "terminal i/o failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(session: &mut Session, raw: &[u8]) -> Vec<String> {
        match session.run_line(&decode_line(raw)) {
            Reply::lines(lines) => lines,
            Reply::quit => vec!["<quit>".into()],
        }
    }

    #[test]
    fn line_endings_are_stripped() {
        assert_eq!(decode_line(b"a = 1 2 3\n"), "a = 1 2 3");
        assert_eq!(decode_line(b"list\r\n"), "list");
        assert_eq!(decode_line(b"quit"), "quit");
    }

    #[test]
    fn invalid_utf8_is_just_a_bad_command() {
        let mut session = Session::new(10);
        assert_eq!(output(&mut session, b"a = 1 2 3\n"), ["a = 1.00 2.00 3.00"]);
        assert_eq!(output(&mut session, b"\xff\n"), ["Error: Invalid command format."]);
        assert_eq!(output(&mut session, b"a\n"), ["a = 1.00 2.00 3.00"]);
        assert_eq!(output(&mut session, b"quit\n"), ["<quit>"]);
    }
}
