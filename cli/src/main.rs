use std::fs;
use std::io::{self, Read};

use clap::{Args, Parser, Subcommand};
use ladder::{Point, Rung};
use serde::Deserialize;
use serde_json::{Map, Value, json};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {message}")]
    ServerError { status: u16, message: String },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error("start {start} is not a column of a {n}-line ladder")]
    StartOutOfRange { start: usize, n: usize },
}

#[derive(Parser, Debug)]
#[command(name = "amida", about = "Ladder lottery generator and tracer CLI")]
struct Cli {
    #[arg(long, env = "AMIDA_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the server is up.
    Ping,
    /// Generate a ladder and print it.
    Generate {
        #[command(flatten)]
        ladder: LadderArgs,
        /// Draw the ladder instead of printing JSON.
        #[arg(long, default_value_t = false)]
        render: bool,
    },
    /// Trace one column through a ladder read from a file or stdin.
    Trace {
        #[arg(long, default_value = "-", help = "Ladder JSON file path, or - for stdin")]
        input: String,
        #[arg(long)]
        start: usize,
    },
    /// Generate a ladder and reveal where every column lands.
    Play {
        #[command(flatten)]
        ladder: LadderArgs,
    },
}

#[derive(Args, Debug)]
struct LadderArgs {
    #[arg(long, default_value_t = 5)]
    n: i64,
    #[arg(long)]
    levels: Option<i64>,
    #[arg(long)]
    density: Option<f64>,
    #[arg(long)]
    seed: Option<i64>,
    /// Comma-separated bottom labels; missing ones become "miss".
    #[arg(long, value_delimiter = ',')]
    bottom: Vec<String>,
}

/// A ladder as returned by `/api/generate`, with or without the wrapper.
#[derive(Debug, Clone, Deserialize)]
struct LadderView {
    n: usize,
    levels: usize,
    rungs: Vec<Rung>,
    #[serde(default, alias = "bottomLabels")]
    bottom: Vec<String>,
    #[serde(default)]
    seed: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LadderDocument {
    Wrapped { ladder: LadderView },
    Bare(LadderView),
}

impl LadderDocument {
    fn into_view(self) -> LadderView {
        match self {
            Self::Wrapped { ladder } | Self::Bare(ladder) => ladder,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TraceView {
    end_index: usize,
    path: Vec<Point>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PermutationView {
    end_indices: Vec<usize>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let base_url = cli.base_url.trim_end_matches('/').to_owned();

    match cli.command {
        Command::Ping => run_ping(&base_url).await,
        Command::Generate { ladder, render } => run_generate(&base_url, &ladder, render).await,
        Command::Trace { input, start } => run_trace(&base_url, &input, start).await,
        Command::Play { ladder } => run_play(&base_url, &ladder).await,
    }
}

async fn run_ping(base_url: &str) -> Result<(), CliError> {
    let response = reqwest::get(format!("{base_url}/healthz")).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::ServerError {
            status: status.as_u16(),
            message: "health check failed".to_owned(),
        });
    }
    println!("ok");
    Ok(())
}

async fn run_generate(base_url: &str, args: &LadderArgs, render: bool) -> Result<(), CliError> {
    let json = api_post(base_url, "/api/generate", generate_body(args)).await?;
    if !render {
        return print_json(&json);
    }
    let view = serde_json::from_value::<LadderDocument>(json)?.into_view();
    println!("{}", draw(&view, None));
    if let Some(seed) = view.seed {
        println!("seed {seed}");
    }
    Ok(())
}

async fn run_trace(base_url: &str, input: &str, start: usize) -> Result<(), CliError> {
    let view = read_ladder(input)?;
    if start >= view.n {
        return Err(CliError::StartOutOfRange { start, n: view.n });
    }
    let body = json!({ "n": view.n, "levels": view.levels, "rungs": view.rungs, "start": start });
    let traced: TraceView = serde_json::from_value(api_post(base_url, "/api/trace", body).await?)?;

    println!("{}", draw(&view, Some(&traced.path)));
    println!("{}", outcome_line(start, traced.end_index, &view.bottom));
    Ok(())
}

async fn run_play(base_url: &str, args: &LadderArgs) -> Result<(), CliError> {
    let json = api_post(base_url, "/api/generate", generate_body(args)).await?;
    let view = serde_json::from_value::<LadderDocument>(json)?.into_view();

    let body = json!({ "n": view.n, "levels": view.levels, "rungs": view.rungs });
    let ends: PermutationView = serde_json::from_value(api_post(base_url, "/api/trace/all", body).await?)?;

    println!("{}", draw(&view, None));
    for (start, end) in ends.end_indices.iter().enumerate() {
        println!("{}", outcome_line(start, *end, &view.bottom));
    }
    if let Some(seed) = view.seed {
        println!("seed {seed}");
    }
    Ok(())
}

fn generate_body(args: &LadderArgs) -> Value {
    let mut body = Map::new();
    body.insert("n".to_owned(), json!(args.n));
    if let Some(levels) = args.levels {
        body.insert("levels".to_owned(), json!(levels));
    }
    if let Some(density) = args.density {
        body.insert("rungDensity".to_owned(), json!(density));
    }
    if let Some(seed) = args.seed {
        body.insert("seed".to_owned(), json!(seed));
    }
    if !args.bottom.is_empty() {
        body.insert("bottom".to_owned(), json!(args.bottom));
    }
    Value::Object(body)
}

fn read_ladder(input: &str) -> Result<LadderView, CliError> {
    let raw = if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(input)?
    };
    parse_ladder(&raw)
}

fn parse_ladder(raw: &str) -> Result<LadderView, CliError> {
    Ok(serde_json::from_str::<LadderDocument>(raw)?.into_view())
}

fn draw(view: &LadderView, highlight: Option<&[Point]>) -> String {
    ladder::render(view.n, view.levels, &view.rungs, highlight)
}

fn outcome_line(start: usize, end: usize, bottom: &[String]) -> String {
    match bottom.get(end).filter(|label| !label.is_empty()) {
        Some(label) => format!("{start} -> {end} ({label})"),
        None => format!("{start} -> {end}"),
    }
}

async fn api_post(base_url: &str, path: &str, body: Value) -> Result<Value, CliError> {
    let client = reqwest::Client::new();
    let response = client.post(format!("{base_url}{path}")).json(&body).send().await?;
    let status = response.status();
    let value = response.json::<Value>().await.unwrap_or(Value::Null);

    if !status.is_success() {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| value.to_string(), str::to_owned);
        return Err(CliError::ServerError { status: status.as_u16(), message });
    }
    Ok(value)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
