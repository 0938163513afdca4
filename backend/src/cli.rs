//! Minimal CLI parsing for start-up overrides.

use std::env;

use anyhow::{Context, Result, bail};

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    /// Print the GraphQL SDL and exit
    pub print_schema: bool,
    /// Overrides `PORT`
    pub port_override: Option<u16>,
}

impl CliOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse(env::args().skip(1))
    }

    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut options = CliOptions::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--print-schema" => options.print_schema = true,
                "--port" => {
                    let value = args.next().context("--port requires a value")?;
                    options.port_override = Some(parse_port(&value)?);
                }
                _ if arg.starts_with("--port=") => {
                    if let Some(value) = arg.split_once('=').map(|(_, v)| v) {
                        options.port_override = Some(parse_port(value)?);
                    }
                }
                other => bail!("Unknown argument: {}", other),
            }
        }
        Ok(options)
    }
}

fn parse_port(value: &str) -> Result<u16> {
    value
        .parse()
        .with_context(|| format!("Invalid port: {}", value))
}
