mod debug_report;

use chrono::NaiveDateTime;
use phrasefinder::{BasicLexicon, Context, Options, PhraseMode, parse_with_lexicon};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_REFERENCE: &str = "2013-02-12T04:30:00";
const LOG_ENV: &str = "PHRASEFINDER_LOG";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_logging(config.options.trace);

    let lexicon = match &config.lexicon {
        Some(path) => match BasicLexicon::from_path(path) {
            Ok(lexicon) => lexicon,
            Err(err) => {
                eprintln!("error: cannot load lexicon '{}': {err}", path.display());
                std::process::exit(1);
            }
        },
        None => BasicLexicon::english(),
    };

    let ctx = Context { reference_time: config.reference_time };
    let res = parse_with_lexicon(&config.input, &lexicon, &ctx, &config.options);
    if let Err(err) = debug_report::print_run(&config.input, &res, &lexicon, config.color) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Logs go to stderr. `PHRASEFINDER_LOG` wins; otherwise `--trace` turns on
/// transition traces and everything else stays at `warn`.
fn init_logging(trace: bool) {
    let fallback = if trace { "phrasefinder=trace" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}

struct CliConfig {
    input: String,
    reference_time: NaiveDateTime,
    options: Options,
    lexicon: Option<PathBuf>,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut reference_time = parse_reference(DEFAULT_REFERENCE)?;
    let mut options = Options::default();
    let mut lexicon: Option<PathBuf> = None;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("phrasefinder {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--names-only" => options.mode = PhraseMode::NamesOnly,
            "--tags" => options.tag_parts_of_speech = true,
            "--no-agreement" => options.check_agreement = false,
            "--case-insensitive" => options.case_sensitive = false,
            "--trace" => options.trace = true,
            "--reference" => {
                let value = args.next().ok_or_else(|| "error: --reference expects a value".to_string())?;
                reference_time = parse_reference(&value)?;
            }
            "--threshold" => {
                let value = args.next().ok_or_else(|| "error: --threshold expects a value".to_string())?;
                options.threshold = parse_threshold(&value)?;
            }
            "--lexicon" => {
                let value = args.next().ok_or_else(|| "error: --lexicon expects a file".to_string())?;
                lexicon = Some(PathBuf::from(value));
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                set_input(&mut input, value)?;
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    set_input(&mut input, rest)?;
                }
                break;
            }
            _ if arg.starts_with("--reference=") => {
                reference_time = parse_reference(arg.trim_start_matches("--reference="))?;
            }
            _ if arg.starts_with("--threshold=") => {
                options.threshold = parse_threshold(arg.trim_start_matches("--threshold="))?;
            }
            _ if arg.starts_with("--lexicon=") => {
                lexicon = Some(PathBuf::from(arg.trim_start_matches("--lexicon=")));
            }
            _ if arg.starts_with("--input=") => {
                set_input(&mut input, arg.trim_start_matches("--input=").to_string())?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                set_input(&mut input, rest)?;
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, reference_time, options, lexicon, color })
}

fn set_input(slot: &mut Option<String>, value: String) -> Result<(), String> {
    if slot.is_some() {
        return Err("error: input provided multiple times".to_string());
    }
    *slot = Some(value);
    Ok(())
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn parse_reference(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .map_err(|_| format!("error: invalid --reference '{value}' (expected YYYY-MM-DDTHH:MM:SS)"))
}

fn parse_threshold(value: &str) -> Result<i32, String> {
    value.parse::<i32>().map_err(|_| format!("error: invalid --threshold '{value}' (expected an integer)"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "phrasefinder {version}

Incremental phrase finder: dates, times, names, places, numbers and noun/verb phrases.

Usage:
  phrasefinder [OPTIONS] [--] <input...>
  phrasefinder [OPTIONS] --input <text>

Options:
  -i, --input <text>         Input text. If omitted, reads remaining args
                             or stdin when no args are provided.
  --reference <timestamp>    Reference time in YYYY-MM-DDTHH:MM:SS, used to judge years.
                             Default: {default_reference}
  --threshold <n>            Emit phrases with confidence above n. Default: {threshold}
  --names-only               Look for personal names only.
  --tags                     Print a part-of-speech tag for every word.
  --no-agreement             Do not penalize determiner/noun number disagreement.
  --case-insensitive         Ignore capitalization as evidence.
  --lexicon <file>           Extra lexicon entries (word | categories | features | value | pattern).
  --trace                    Log every grammar transition to stderr.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {log_env}           tracing filter for stderr logs (default: warn).

Exit codes:
  0  Success.
  1  Internal error (lexicon file, pretty-printer).
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        default_reference = DEFAULT_REFERENCE,
        threshold = Options::default().threshold,
        log_env = LOG_ENV,
    )
}
