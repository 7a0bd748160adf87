//! Command-line argument parsing.

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

#[derive(Debug, Default)]
pub struct CliOptions {
    pub data: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub preset: Option<String>,
    pub substation: Option<String>,
    pub feeder: Option<String>,
    pub query: Option<String>,
    pub min_kva: Option<f64>,
    /// `Some` when `--blocks` or `--no-blocks` was given.
    pub blocks: Option<bool>,
    pub csv_out: Option<PathBuf>,
    pub help: bool,
    #[cfg(feature = "api")]
    pub serve: bool,
    #[cfg(feature = "api")]
    pub port: Option<u16>,
}

pub fn parse_args() -> Result<CliOptions> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(&args)
}

fn usage(message: impl Into<String>) -> Error {
    Error::Usage(message.into())
}

fn set_once<T>(slot: &mut Option<T>, value: T, flag: &str) -> Result<()> {
    if slot.replace(value).is_some() {
        return Err(usage(format!("{flag} provided more than once")));
    }
    Ok(())
}

pub fn parse_args_from(args: &[String]) -> Result<CliOptions> {
    let mut opts = CliOptions::default();
    let mut i = 0usize;

    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--data" | "--config" | "--csv-out" => {
                i += 1;
                let path = PathBuf::from(args.next_or_err(i, flag, "a file path")?);
                let slot = match flag {
                    "--data" => &mut opts.data,
                    "--config" => &mut opts.config,
                    _ => &mut opts.csv_out,
                };
                set_once(slot, path, flag)?;
            }
            "--preset" | "--substation" | "--feeder" | "--query" => {
                i += 1;
                let value = args.next_or_err(i, flag, "a value")?.to_string();
                let slot = match flag {
                    "--preset" => &mut opts.preset,
                    "--substation" => &mut opts.substation,
                    "--feeder" => &mut opts.feeder,
                    _ => &mut opts.query,
                };
                set_once(slot, value, flag)?;
            }
            "--min-kva" => {
                i += 1;
                let raw = args.next_or_err(i, flag, "a kVA number")?;
                let kva = raw
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| usage(format!("--min-kva value \"{raw}\" is not a number")))?;
                set_once(&mut opts.min_kva, kva, flag)?;
            }
            "--blocks" | "--no-blocks" => {
                set_once(&mut opts.blocks, flag == "--blocks", "--blocks/--no-blocks")?;
            }
            #[cfg(feature = "api")]
            "--serve" => opts.serve = true,
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                let raw = args.next_or_err(i, flag, "a u16 port")?;
                let port = raw
                    .parse::<u16>()
                    .map_err(|_| usage(format!("--port value \"{raw}\" is not a valid u16")))?;
                set_once(&mut opts.port, port, flag)?;
            }
            "--help" | "-h" => opts.help = true,
            other => return Err(usage(format!("unknown argument: {other}"))),
        }
        i += 1;
    }

    if opts.config.is_some() && opts.preset.is_some() {
        return Err(usage(
            "arguments `--config` and `--preset` are mutually exclusive; choose one source",
        ));
    }

    Ok(opts)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, flag: &str, expected: &str) -> Result<&str>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, flag: &str, expected: &str) -> Result<&str> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| usage(format!("missing value for {flag} (expected {expected})")))
    }
}

pub fn print_usage() {
    eprintln!("feeder-analysis: feeder load report from a transformer dataset");
    eprintln!();
    eprintln!("Usage: feeder-analysis [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --data <path>           Dataset JSON (overrides report.dataset)");
    eprintln!("  --config <path>         Load configuration from a TOML file");
    eprintln!("  --preset <name>         Built-in configuration (analysis, foreman)");
    eprintln!("  --substation <key|ALL>  Restrict to one substation (key or display name)");
    eprintln!("  --feeder <n|ALL>        Restrict displayed rows to one feeder");
    eprintln!("  --query <text>          Search feeder labels");
    eprintln!("  --min-kva <kva>         Hide transformers below this total kVA");
    eprintln!("  --blocks | --no-blocks  Show or hide block subtotals");
    eprintln!("  --csv-out <path>        Also write the report as CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                 Start the JSON API after printing the report");
        eprintln!("  --port <u16>            API server port (default: 3000)");
    }
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("If neither --config nor --preset is given, the foreman preset is used.");
}
