use std::ffi::OsString;

use clap::{Arg, Command};

/// Loader command line with a single flag named after the configured key.
pub fn command(key: &str) -> Command {
    Command::new("loader")
        .about("Scrape the reference table and store or print it")
        .arg(
            Arg::new(key.to_string())
                .long(key.to_string())
                .value_name("BOOL")
                .num_args(0..=1)
                .default_missing_value("true")
                .value_parser(clap::value_parser!(String))
                .help("print the scraped table instead of writing it to the database"),
        )
}

/// Whether console mode was requested: `--<key>` alone or `--<key> true`,
/// case-insensitive. Any other value selects persist mode.
pub fn console_requested<I, T>(key: &str, args: I) -> Result<bool, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command(key).try_get_matches_from(args)?;
    Ok(matches
        .get_one::<String>(key)
        .map(|value| value.eq_ignore_ascii_case("true"))
        .unwrap_or(false))
}
