use anyhow::{Context, Result};
use ganttgen::{chart::ChartSpec, ingest::Source, process};
use std::{
    fs,
    io::Read,
    panic::{self, AssertUnwindSafe},
    path::{Path, PathBuf},
};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Output file for the pasted block, which has no input path of its own.
const PASTED_OUTPUT: &str = "pasted-data.chart.json";

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) gather sources ───────────────────────────────────────────
    // each argument is a CSV file path; "-" reads the pasted block from stdin
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        println!("Upload a CSV file or paste data to generate the Gantt chart.");
        return Ok(());
    }

    // ─── 3) process each source independently ────────────────────────
    let mut charts = 0usize;
    let mut failures = 0usize;

    for arg in &args {
        let source = match load_source(arg) {
            Ok(s) => s,
            Err(err) => {
                error!("{}: {:#}", arg, err);
                failures += 1;
                continue;
            }
        };

        // a panic while processing one source must not take down the run
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| process::process_source(&source)));

        match outcome {
            Ok(Ok(spec)) => {
                let out = output_path(arg);
                match write_spec(&spec, &out) {
                    Ok(()) => {
                        info!(source = %source.name, bars = spec.bars.len(), out = %out.display(), "chart spec written");
                        charts += 1;
                    }
                    Err(err) => {
                        error!("{}: {:#}", source.name, err);
                        failures += 1;
                    }
                }
            }
            Ok(Err(err)) => {
                error!("{}: {}", source.name, err);
                failures += 1;
            }
            Err(_) => {
                error!("{}: unexpected error while processing", source.name);
                failures += 1;
            }
        }
    }

    info!(charts, failures, "done");
    Ok(())
}

fn load_source(arg: &str) -> Result<Source> {
    if arg == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading pasted data from stdin")?;
        Ok(Source::pasted(text))
    } else {
        Source::from_path(arg)
    }
}

/// `<stem>.chart.json` next to the input file; fixed name for pasted data.
fn output_path(arg: &str) -> PathBuf {
    if arg == "-" {
        return PathBuf::from(PASTED_OUTPUT);
    }
    let path = Path::new(arg);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "chart".to_string());
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            parent.join(format!("{stem}.chart.json"))
        }
        _ => PathBuf::from(format!("{stem}.chart.json")),
    }
}

fn write_spec(spec: &ChartSpec, out: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(spec).context("serializing chart spec")?;
    fs::write(out, json).with_context(|| format!("writing {}", out.display()))?;
    Ok(())
}
