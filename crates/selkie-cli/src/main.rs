use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use selkie::{
    BrowserOptions, BrowserValidator, ChromeDriver, NO_ERRORS, detect_mermaid_diagram_type,
    parse_mermaid,
};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Parse,
    Detect,
    Check,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    json: bool,
    load_timeout_ms: Option<u64>,
    settle_ms: Option<u64>,
    marker: Option<String>,
    temp_dir: Option<PathBuf>,
}

const USAGE: &str = "\
Usage: selkie-cli <command> [<file>|-] [options]

Commands:
  detect    print the detected diagram type (empty when unrecognized)
  parse     validate without a browser (fast, known-unreliable)
  check     validate in a headless browser (authoritative; needs Chrome)

Options:
  --json                 detect: print JSON instead of the bare token
  --load-timeout-ms <n>  check: bounded wait for the page body (default 5000)
  --settle-ms <n>        check: settle window for late errors (default 5000)
  --marker <text>        check: DOM text marking a syntax error
  --temp-dir <path>      check: directory for host-page temp files

Reads from stdin when <file> is `-` or omitted. Exits 0 when the verdict is
the success sentinel, 1 otherwise, 2 on usage errors.";

fn parse_args() -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut positionals: Vec<String> = Vec::new();
    let mut argv = std::env::args().skip(1);

    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--json" => args.json = true,
            "--load-timeout-ms" => {
                let value = argv
                    .next()
                    .ok_or(CliError::Usage("--load-timeout-ms requires a value"))?;
                args.load_timeout_ms = Some(
                    value
                        .parse()
                        .map_err(|_| CliError::Usage("--load-timeout-ms expects milliseconds"))?,
                );
            }
            "--settle-ms" => {
                let value = argv
                    .next()
                    .ok_or(CliError::Usage("--settle-ms requires a value"))?;
                args.settle_ms = Some(
                    value
                        .parse()
                        .map_err(|_| CliError::Usage("--settle-ms expects milliseconds"))?,
                );
            }
            "--marker" => {
                args.marker = Some(
                    argv.next()
                        .ok_or(CliError::Usage("--marker requires a value"))?,
                );
            }
            "--temp-dir" => {
                args.temp_dir = Some(PathBuf::from(
                    argv.next()
                        .ok_or(CliError::Usage("--temp-dir requires a value"))?,
                ));
            }
            "--help" | "-h" => return Err(CliError::Usage(USAGE)),
            other if other.starts_with("--") => {
                return Err(CliError::Usage("unknown option"));
            }
            _ => positionals.push(arg),
        }
    }

    let mut positionals = positionals.into_iter();
    args.command = match positionals.next().as_deref() {
        Some("detect") => Command::Detect,
        Some("parse") => Command::Parse,
        Some("check") => Command::Check,
        Some(_) => return Err(CliError::Usage("unknown command")),
        None => return Err(CliError::Usage(USAGE)),
    };
    args.input = positionals.next();
    if positionals.next().is_some() {
        return Err(CliError::Usage("too many arguments"));
    }

    Ok(args)
}

fn read_input(path: Option<&str>) -> Result<String, CliError> {
    match path {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

#[derive(Serialize)]
struct DetectOut<'a> {
    diagram_type: &'a str,
}

fn browser_options(args: &Args) -> BrowserOptions {
    let mut options = BrowserOptions::default();
    if let Some(ms) = args.load_timeout_ms {
        options.load_timeout = Duration::from_millis(ms);
    }
    if let Some(ms) = args.settle_ms {
        options.settle_delay = Duration::from_millis(ms);
    }
    if let Some(marker) = &args.marker {
        options.error_marker = marker.clone();
    }
    options.temp_dir = args.temp_dir.clone();
    options
}

async fn run() -> Result<i32, CliError> {
    let args = parse_args()?;
    let text = read_input(args.input.as_deref())?;

    let code = match args.command {
        Command::Detect => {
            let token = detect_mermaid_diagram_type(&text).await;
            if args.json {
                println!(
                    "{}",
                    serde_json::to_string(&DetectOut {
                        diagram_type: &token
                    })?
                );
            } else {
                println!("{token}");
            }
            i32::from(token.is_empty())
        }
        Command::Parse => {
            let verdict = parse_mermaid(&text).await;
            println!("{verdict}");
            i32::from(verdict != NO_ERRORS)
        }
        Command::Check => {
            let validator =
                BrowserValidator::with_driver(ChromeDriver::new(), browser_options(&args));
            let verdict = validator.validate(&text).await.to_string();
            println!("{verdict}");
            i32::from(verdict != NO_ERRORS)
        }
    };

    Ok(code)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{err}");
            let printed_usage = matches!(&err, CliError::Usage(msg) if *msg == USAGE);
            if !printed_usage {
                eprintln!("\n{USAGE}");
            }
            std::process::exit(2);
        }
    }
}
