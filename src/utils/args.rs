use clap::{App, Arg, ArgGroup, ArgMatches};
use std::ffi::OsString;
use std::path::PathBuf;
use texta_primitives::schemas::model_descriptor::DEFAULT_MODEL_ID;

use super::environment::DEFAULT_CLIENT_API_URL;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Serve,
    Health,
    Models,
    Analyze {
        text: Option<String>,
        file: Option<PathBuf>,
        model: String,
        offline: bool,
    },
    Batch {
        file: PathBuf,
        model: String,
        export: Option<PathBuf>,
    },
    Compare {
        text: String,
    },
    Heuristic {
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub api_url: String,
    pub command: Command,
}

fn model_arg() -> Arg<'static> {
    Arg::new("model")
        .short('m')
        .long("model")
        .takes_value(true)
        .default_value(DEFAULT_MODEL_ID)
        .help("Model id from the catalogue")
}

fn text_arg() -> Arg<'static> {
    Arg::new("text").short('t').long("text").takes_value(true)
}

fn build_app() -> App<'static> {
    App::new("Texta Sentiment Relay")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("api_url")
                .long("api-url")
                .takes_value(true)
                .global(true)
                .env("TEXTA_API_URL")
                .default_value(DEFAULT_CLIENT_API_URL)
                .help("Base URL of a running relay"),
        )
        .subcommand(App::new("serve").about("Run the relay HTTP API"))
        .subcommand(App::new("health").about("Check that a relay is up"))
        .subcommand(App::new("models").about("List the models a relay supports"))
        .subcommand(
            App::new("analyze")
                .about("Analyze a text or a document")
                .arg(text_arg())
                .arg(Arg::new("file").short('f').long("file").takes_value(true))
                .group(ArgGroup::new("input").args(&["text", "file"]).required(true))
                .arg(model_arg())
                .arg(
                    Arg::new("offline")
                        .long("offline")
                        .takes_value(false)
                        .help("Use the local keyword heuristic instead of the relay"),
                ),
        )
        .subcommand(
            App::new("batch")
                .about("Analyze every row of a CSV file")
                .arg(Arg::new("file").short('f').long("file").takes_value(true).required(true))
                .arg(model_arg())
                .arg(Arg::new("export").short('e').long("export").takes_value(true)),
        )
        .subcommand(
            App::new("compare")
                .about("Analyze one text with every model")
                .arg(text_arg().required(true)),
        )
        .subcommand(
            App::new("heuristic")
                .about("Classify a text with the local keyword heuristic")
                .arg(text_arg().required(true)),
        )
}

fn required_value(matches: &ArgMatches, name: &str) -> String {
    matches.value_of(name).map(String::from).unwrap_or_default()
}

fn command_from(name: &str, matches: &ArgMatches) -> Command {
    match name {
        "health" => Command::Health,
        "models" => Command::Models,
        "analyze" => Command::Analyze {
            text: matches.value_of("text").map(String::from),
            file: matches.value_of("file").map(PathBuf::from),
            model: required_value(matches, "model"),
            offline: matches.is_present("offline"),
        },
        "batch" => Command::Batch {
            file: PathBuf::from(required_value(matches, "file")),
            model: required_value(matches, "model"),
            export: matches.value_of("export").map(PathBuf::from),
        },
        "compare" => Command::Compare {
            text: required_value(matches, "text"),
        },
        "heuristic" => Command::Heuristic {
            text: required_value(matches, "text"),
        },
        _ => Command::Serve,
    }
}

pub fn parse_args_from<I, T>(iter: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = build_app().try_get_matches_from(iter)?;
    let (name, sub_matches) = matches
        .subcommand()
        .ok_or_else(|| clap::Error::raw(clap::ErrorKind::MissingSubcommand, "a subcommand is required"))?;

    Ok(Args {
        api_url: sub_matches
            .value_of("api_url")
            .or_else(|| matches.value_of("api_url"))
            .unwrap_or(DEFAULT_CLIENT_API_URL)
            .trim_end_matches('/')
            .to_string(),
        command: command_from(name, sub_matches),
    })
}

/// Parses the process arguments, exiting with clap's usage message on error.
pub fn parse_args() -> Args {
    match parse_args_from(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => e.exit(),
    }
}
