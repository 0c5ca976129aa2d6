//! Converts date/time strings into tinydns-data timestamps.

use clap::Parser;
use std::process::exit;
use tinydns_tai64::function::to_tinydns_tai64_with;
use tinydns_tai64::logging::init_logging;
use tinydns_tai64::{MissingOffset, ParseConfig, Value};

/// Prints the TAI64 label for a date/time, e.g. '2014-03-20 01:14:56 NZDT'.
#[derive(Debug, Parser)]
#[command(name = "to-tinydns-tai64", version)]
struct Args {
    /// What to do with a date/time without an offset: 'reject', a zone
    /// name, or an offset such as '+13:00'.
    #[arg(
        long,
        env = "TINYDNS_TAI64_MISSING_OFFSET",
        default_value_t = MissingOffset::default()
    )]
    missing_offset: MissingOffset,

    /// Take the function arguments as a JSON array instead.
    #[arg(long, value_name = "ARGS", conflicts_with = "datetime")]
    json: Option<String>,

    /// The date/time to convert.
    datetime: Vec<String>,
}

fn main() {
    init_logging();
    let args = Args::parse();

    let call_args = match args.json {
        Some(ref json) => match serde_json::from_str::<Vec<Value>>(json) {
            Ok(call_args) => call_args,
            Err(err) => {
                eprintln!("Invalid --json arguments: {}", err);
                exit(2)
            }
        },
        None => args.datetime.into_iter().map(Value::from).collect(),
    };

    let config =
        ParseConfig::default().with_missing_offset(args.missing_offset);
    match to_tinydns_tai64_with(&call_args, &config) {
        Ok(label) => println!("{}", label),
        Err(err) => {
            eprintln!("{}", err);
            exit(1)
        }
    }
}
