use clap::Parser;
use std::path::PathBuf;

use crate::storing::DEFAULT_CAPACITY;

fn parse_capacity(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("capacity must be at least 1".into()),
        Ok(capacity) => Ok(capacity),
        Err(error) => Err(error.to_string()),
    }
}

#[derive(Parser, Debug)]
#[command(name = "vcalc", version, about = "Interactive calculator for named 3-D vectors")]
pub struct Options {
    /// Maximum number of vectors held at once
    #[arg(long, env = "VCALC_CAPACITY", default_value_t = DEFAULT_CAPACITY, value_parser = parse_capacity)]
    pub capacity: usize,

    /// Vector file to load before the first prompt
    #[arg(long, value_name = "PATH")]
    pub load: Option<PathBuf>,

    /// Skip the banner and prompt, for piped input
    #[arg(short, long)]
    pub quiet: bool,

    /// Tracing filter for diagnostics on stderr, e.g. `vcalc_rs=debug`
    #[arg(long, env = "VCALC_LOG", default_value = "warn")]
    pub log: String,
}
