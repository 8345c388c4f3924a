// algoviz: step-by-step algorithm traces with a terminal step player

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use algoviz::config::Limits;
use algoviz::input::{parse_values, GraphPreset, Request};
use algoviz::player::Playback;
use algoviz::ui::App;
use algoviz::{generate, Algorithm, Trace};

#[derive(Parser, Debug)]
#[command(name = "algoviz", version, about)]
struct Cli {
    /// JSON file overriding size limits and container capacities.
    #[arg(long, global = true)]
    limits: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the step trace for a JSON request (`-` reads stdin).
    Steps {
        request: PathBuf,

        /// Indent the JSON output.
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Step through a JSON request in the terminal player.
    Play {
        request: PathBuf,

        /// Milliseconds between steps while autoplaying.
        #[arg(long, default_value_t = 1000)]
        interval: u64,
    },
    /// Run an algorithm on its sample input.
    Demo(DemoArgs),
    /// List supported algorithms.
    List,
}

#[derive(Parser, Debug)]
struct DemoArgs {
    algorithm: Algorithm,

    /// Comma-separated values replacing the sample array.
    #[arg(long)]
    values: Option<String>,

    /// Search target, BST search value or Fibonacci n.
    #[arg(long, allow_hyphen_values = true)]
    target: Option<i64>,

    /// Graph shape for bfs, dfs and dijkstra.
    #[arg(long, value_enum)]
    preset: Option<GraphPreset>,

    /// Print the trace as JSON instead of opening the player.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let limits = match &cli.limits {
        Some(path) => load_limits(path)?,
        None => Limits::default(),
    };

    match cli.cmd {
        Command::Steps { request, pretty } => {
            let trace = generate(&read_request(&request)?, &limits)?;
            let json = if pretty {
                trace.to_json_pretty()?
            } else {
                trace.to_json()?
            };
            println!("{}", json);
            Ok(())
        }
        Command::Play { request, interval } => {
            let trace = generate(&read_request(&request)?, &limits)?;
            play(trace, interval)
        }
        Command::Demo(args) => cmd_demo(args, &limits),
        Command::List => {
            for algorithm in Algorithm::ALL {
                let id = clap::ValueEnum::to_possible_value(&algorithm)
                    .map(|v| v.get_name().to_string())
                    .unwrap_or_default();
                println!("{:<16} {}", id, algorithm.name());
            }
            Ok(())
        }
    }
}

fn load_limits(path: &Path) -> anyhow::Result<Limits> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read limits '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse limits '{}'", path.display()))
}

fn read_request(path: &Path) -> anyhow::Result<Request> {
    let text = if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("read request from stdin")?;
        text
    } else {
        fs::read_to_string(path).with_context(|| format!("read request '{}'", path.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("parse request '{}'", path.display()))
}

fn cmd_demo(args: DemoArgs, limits: &Limits) -> anyhow::Result<()> {
    let mut request = Request::sample(args.algorithm);

    if let Some(text) = &args.values {
        let parsed = parse_values(text)?;
        match &mut request {
            Request::Bst { values, .. } => *values = parsed,
            other => {
                if let Some(sorted) = Request::sort(args.algorithm, parsed.clone()) {
                    *other = sorted;
                } else if let Request::LinearSearch { values, .. }
                | Request::BinarySearch { values, .. } = other
                {
                    *values = parsed;
                } else {
                    anyhow::bail!("--values does not apply to {}", args.algorithm);
                }
            }
        }
    }

    if let Some(value) = args.target {
        match &mut request {
            Request::LinearSearch { target, .. } | Request::BinarySearch { target, .. } => {
                *target = value
            }
            Request::Bst { operation, .. } => {
                *operation = algoviz::input::TreeOperation::Search { value }
            }
            Request::Fibonacci { n } => *n = value,
            _ => anyhow::bail!("--target does not apply to {}", args.algorithm),
        }
    }

    if let Some(preset) = args.preset {
        match &mut request {
            Request::Bfs { graph, .. } | Request::Dfs { graph, .. } | Request::Dijkstra { graph, .. } => {
                *graph = preset.spec()
            }
            _ => anyhow::bail!("--preset only applies to graph algorithms"),
        }
    }

    let trace = generate(&request, limits)?;
    if args.json {
        println!("{}", trace.to_json_pretty()?);
        return Ok(());
    }
    play(trace, 1000)
}

fn play(trace: Trace, interval_ms: u64) -> anyhow::Result<()> {
    let playback = Playback::new(trace)?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(playback)
        .with_play_interval(std::time::Duration::from_millis(interval_ms.max(50)));
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal player")
}
