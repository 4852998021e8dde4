use std::fs::File;
use std::io::{stdin, stdout, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{App, Arg, ArgMatches, SubCommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use apcase::{highlight_diff, highlight_diff_with, to_ap_title_case, Config, Dictionary, SharedDictionary};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter())
        .init();

    let config_arg = Arg::with_name("config")
        .short("c")
        .long("config")
        .value_name("FILE")
        .help("TOML configuration file")
        .takes_value(true);
    let dictionary_arg = Arg::with_name("dictionary")
        .short("d")
        .long("dictionary")
        .value_name("FILE")
        .help("User phrasal verb dictionary. Overrides the one derived from the configuration.")
        .takes_value(true);

    let matches = App::new("apcase")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Aleksei Voronov <despawn@gmail.com>")
        .about("Convert song titles to AP-style title case.")
        .subcommand(
            SubCommand::with_name("case")
                .about("Title-case titles, one per line")
                .arg(config_arg.clone())
                .arg(dictionary_arg.clone())
                .arg(
                    Arg::with_name("input")
                        .short("i")
                        .long("input")
                        .value_name("FILE")
                        .help("File containing titles, one per line. stdin by default.")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .value_name("FILE")
                        .help("File into which cased titles will be written")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("diff")
                        .long("diff")
                        .help("Print the original title with changed words highlighted"),
                )
                .arg(
                    Arg::with_name("json")
                        .long("json")
                        .help("Print one JSON object per title")
                        .conflicts_with("diff"),
                ),
        )
        .subcommand(
            SubCommand::with_name("diff")
                .about("Highlight the words of MODIFIED that differ from ORIGINAL")
                .arg(Arg::with_name("original").required(true).index(1))
                .arg(Arg::with_name("modified").required(true).index(2)),
        )
        .subcommand(
            SubCommand::with_name("merge")
                .about("Merge the baseline phrasal verbs into the user dictionary")
                .arg(config_arg)
                .arg(dictionary_arg),
        )
        .get_matches();

    match matches.subcommand() {
        ("case", Some(matches)) => do_case(matches),
        ("diff", Some(matches)) => {
            // both are required
            let original = matches.value_of("original").unwrap_or_default();
            let modified = matches.value_of("modified").unwrap_or_default();
            println!("{}", highlight_diff(original, modified));
            Ok(())
        }
        ("merge", Some(matches)) => do_merge(matches),
        _ => {
            eprintln!("{}", matches.usage());
            Ok(())
        }
    }
}

/// `RUST_LOG` when set, warnings and errors otherwise.
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

fn load_config(matches: &ArgMatches) -> Result<(Config, PathBuf)> {
    let config = match matches.value_of("config") {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("cannot load configuration from {}", path))?,
        None => Config::default(),
    };
    let user_path = match matches.value_of("dictionary") {
        Some(path) => PathBuf::from(path),
        None => config.user_dictionary_path(),
    };
    Ok((config, user_path))
}

fn do_case(matches: &ArgMatches) -> Result<()> {
    let (config, user_path) = load_config(matches)?;
    let dictionary = SharedDictionary::open_or_empty(config.baseline(), user_path);
    let dictionary = dictionary.snapshot();

    let input: Box<dyn BufRead> = match matches.value_of("input") {
        Some(filename) => Box::new(BufReader::new(
            File::open(filename).with_context(|| format!("cannot open {}", filename))?,
        )),
        None => Box::new(BufReader::new(stdin())),
    };

    let mut output: Box<dyn Write> = match matches.value_of("output") {
        Some(filename) => Box::new(
            File::create(filename).with_context(|| format!("cannot create {}", filename))?,
        ),
        None => Box::new(stdout()),
    };

    for title in input.lines() {
        let title = title?;
        let cased = to_ap_title_case(&title, &dictionary);

        let line = if matches.is_present("json") {
            let diff = highlight_diff_with(&title, &cased, config.markup());
            json!({ "original": title, "cased": cased, "diff": diff }).to_string()
        } else if matches.is_present("diff") {
            highlight_diff_with(&title, &cased, config.markup())
        } else {
            cased
        };

        output.write_all(line.as_bytes())?;
        output.write_all(b"\n")?;
    }

    Ok(())
}

fn do_merge(matches: &ArgMatches) -> Result<()> {
    let (config, user_path) = load_config(matches)?;
    let dictionary = Dictionary::load_and_merge(&config.baseline(), &user_path)
        .with_context(|| format!("cannot merge phrasal verbs into {}", user_path.display()))?;

    println!(
        "{}: {} phrasal verbs",
        user_path.display(),
        dictionary.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_log_filter_follows_rust_log() {
        std::env::remove_var("RUST_LOG");
        assert_eq!(log_filter().max_level_hint(), Some(LevelFilter::WARN));

        std::env::set_var("RUST_LOG", "debug");
        assert_eq!(log_filter().max_level_hint(), Some(LevelFilter::DEBUG));
        std::env::remove_var("RUST_LOG");
    }
}
