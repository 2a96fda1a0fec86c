use std::{
    fs::File,
    io::{self, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "scrollreveal", version)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scenario headless and print a JSON trace of frame snapshots.
    Simulate(SimulateArgs),
    /// Print the default motion config (every preset resolved) as JSON.
    Presets,
    /// Validate a motion config file.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input scenario JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Motion config JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output trace path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Keep every N-th frame snapshot.
    #[arg(long, default_value_t = 1)]
    every: usize,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Motion config JSON.
    #[arg(long)]
    config: PathBuf,
}

#[derive(serde::Serialize)]
struct PresetsDoc {
    config: scrollreveal::MotionConfig,
    resolved: scrollreveal::PresetTable,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Presets => cmd_presets(),
        Command::Check(args) => cmd_check(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<scrollreveal::MotionConfig> {
    let Some(path) = path else {
        return Ok(scrollreveal::MotionConfig::default());
    };
    let cfg = scrollreveal::MotionConfig::from_path(path)
        .with_context(|| format!("load motion config '{}'", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

fn write_json(out: Option<&Path>, value: &impl serde::Serialize) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            let f = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            let mut w = BufWriter::new(f);
            serde_json::to_writer_pretty(&mut w, value).with_context(|| "write JSON output")?;
            w.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut w = stdout.lock();
            serde_json::to_writer_pretty(&mut w, value).with_context(|| "write JSON output")?;
            writeln!(w)?;
        }
    }
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let scenario = scrollreveal::Scenario::from_path(&args.in_path)
        .with_context(|| format!("load scenario '{}'", args.in_path.display()))?;
    let trace = scenario.run(&config, args.every)?;

    write_json(args.out.as_deref(), &trace)?;
    if let Some(out) = &args.out {
        eprintln!(
            "wrote {} frame(s), {} reveal(s) to {}",
            trace.frames.len(),
            trace.events.reveals.len(),
            out.display()
        );
    }
    Ok(())
}

fn cmd_presets() -> anyhow::Result<()> {
    let config = scrollreveal::MotionConfig::default();
    let resolved = config.preset_table();
    write_json(None, &PresetsDoc { config, resolved })
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let cfg = load_config(Some(&args.config))?;
    println!(
        "ok: {} preset override(s), {} section(s)",
        cfg.presets.len(),
        cfg.tracker.sections.len()
    );
    Ok(())
}
