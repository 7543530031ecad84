use std::fmt;

use doomsday_core::model::{AdvancePolicy, CalendarDate, ConfigError, DateRange, QuizSettings};
use services::{AppServices, Clock};

mod logging;
mod terminal;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidDate { flag: &'static str, raw: String },
    InvalidLimit { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidDate { flag, raw } => {
                write!(f, "invalid {flag} value: {raw} (expected YYYY-MM-DD)")
            }
            ArgsError::InvalidLimit { raw } => write!(f, "invalid --limit value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

const USAGE: &str = "\
Usage:
  doomsday [play]  [--db <sqlite_url>] [--from <date>] [--to <date>] [--auto-advance] [-v]
  doomsday stats   [--db <sqlite_url>]
  doomsday history [--db <sqlite_url>] [--limit <n>]

Defaults:
  --db sqlite://doomsday.sqlite3 (relative paths resolve against the working directory)
  --from 1700-01-01 --to 2400-12-31
  --limit 20

Environment:
  DOOMSDAY_DB_URL, RUST_LOG";

fn print_usage() {
    eprintln!("{USAGE}");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Stats,
    History,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "stats" => Some(Self::Stats),
            "history" => Some(Self::History),
            _ => None,
        }
    }
}

struct Args {
    db_url: String,
    from: Option<CalendarDate>,
    to: Option<CalendarDate>,
    advance: AdvancePolicy,
    limit: usize,
    verbosity: u8,
}

fn is_verbosity_flag(arg: &str) -> bool {
    arg.strip_prefix('-')
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(|c| c == 'v'))
}

fn parse_date(flag: &'static str, raw: String) -> Result<CalendarDate, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidDate { flag, raw })
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            db_url: normalize_sqlite_url(
                std::env::var("DOOMSDAY_DB_URL").unwrap_or_else(|_| "doomsday.sqlite3".into()),
            ),
            from: None,
            to: None,
            advance: AdvancePolicy::ExplicitReset,
            limit: 20,
            verbosity: 0,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    parsed.db_url = normalize_sqlite_url(value);
                }
                "--from" => {
                    let value = require_value(args, "--from")?;
                    parsed.from = Some(parse_date("--from", value)?);
                }
                "--to" => {
                    let value = require_value(args, "--to")?;
                    parsed.to = Some(parse_date("--to", value)?);
                }
                "--auto-advance" => parsed.advance = AdvancePolicy::AutoAdvance,
                "--limit" => {
                    let value = require_value(args, "--limit")?;
                    parsed.limit = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidLimit { raw: value.clone() })?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                flag if is_verbosity_flag(flag) => {
                    let count = u8::try_from(flag.len() - 1).unwrap_or(u8::MAX);
                    parsed.verbosity = parsed.verbosity.saturating_add(count);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    /// Quiz settings from the parsed flags; bounds not given fall back to the default range.
    fn settings(&self) -> Result<QuizSettings, ConfigError> {
        let start = self.from.unwrap_or(DateRange::DEFAULT.start());
        let end = self.to.unwrap_or(DateRange::DEFAULT.end());
        Ok(QuizSettings::new(DateRange::new(start, end)?, self.advance))
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Playing is the default when no subcommand is given.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with('-') => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with('-') {
        argv.remove(0);
    }

    let parsed = Args::parse(&mut argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    logging::init(parsed.verbosity);
    tracing::info!(?cmd, db_url = %parsed.db_url, "starting");

    let settings = parsed.settings().map_err(|err| {
        eprintln!("invalid date range: {err}");
        err
    })?;

    prepare_sqlite_file(&parsed.db_url)?;
    let services = AppServices::new_sqlite(&parsed.db_url, Clock::system(), settings).await?;
    let quiz = services.quiz_loop();

    match cmd {
        Command::Play => {
            let session = quiz.open_session().await;
            terminal::play(&quiz, session).await?;
        }
        Command::Stats => terminal::print_stats(&quiz.load_history().await),
        Command::History => terminal::print_history(&quiz.load_history().await, parsed.limit),
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
