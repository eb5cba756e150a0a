use anyhow::Context;
use breathcore::analysis::BreathSummary;
use breathcore::chart::write_svg;
use clap::Parser;
use display::display_available;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use workflow::config::{PatternOverrides, WorkflowConfig, WorkflowOverrides};
use workflow::runner::Runner;

mod display;
mod workflow;

const DEFAULT_ARTIFACT: &str = "breathing_pattern.svg";

#[derive(Parser)]
#[command(author, version, about = "Renders a target controlled-breathing flow pattern")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Exercise length in seconds
    #[arg(long)]
    total_time: Option<f64>,
    /// Breaths over the whole exercise
    #[arg(long)]
    breaths: Option<u32>,
    /// Inhale duration in seconds
    #[arg(long)]
    inhale: Option<f64>,
    /// Exhale duration in seconds
    #[arg(long)]
    exhale: Option<f64>,
    /// Peak inhale flow in L/min
    #[arg(long, allow_hyphen_values = true)]
    peak_inhale: Option<f64>,
    /// Peak exhale flow in L/min (negative)
    #[arg(long, allow_hyphen_values = true)]
    peak_exhale: Option<f64>,
    /// Samples per second
    #[arg(long)]
    sampling_rate: Option<f64>,
    /// Never open a window, write the chart as SVG instead
    #[arg(long, default_value_t = false)]
    headless: bool,
    /// SVG artifact path (implies --headless)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Overlay a measured flow trace from JSON
    #[arg(long)]
    measured: Option<PathBuf>,
    /// Overlay a simulated measured trace with this much jitter (L/min)
    #[arg(long)]
    noise: Option<f64>,
    #[arg(long)]
    seed: Option<u64>,
    /// Write the breath summary as JSON
    #[arg(long)]
    summary: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> PatternOverrides {
        PatternOverrides {
            total_time: self.total_time,
            num_breaths: self.breaths,
            inhale_duration: self.inhale,
            exhale_duration: self.exhale,
            peak_inhale_flow: self.peak_inhale,
            peak_exhale_flow: self.peak_exhale,
            sampling_rate: self.sampling_rate,
        }
    }

    fn into_config(self) -> anyhow::Result<WorkflowConfig> {
        let overrides = WorkflowOverrides {
            pattern: self.overrides(),
            output: self.output,
            measured: self.measured,
            noise: self.noise,
            seed: self.seed,
            summary: self.summary,
        };
        WorkflowConfig::resolve(self.workflow.as_deref(), overrides)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let headless = args.headless;
    let config = args.into_config()?;

    let runner = Runner::new(config.clone());
    let result = runner.execute()?;

    println!(
        "Target pattern -> samples {}, breaths {}, avg inhaled volume {:.3} L",
        result.waveform.len(),
        result.summary.total_breaths,
        result.summary.avg_inhaled_volume
    );

    if let Some(path) = &config.summary {
        write_summary(path, &result.summary)?;
        info!("breath summary written to {}", path.display());
    }

    let chart = result.chart();
    let artifact = match (&config.output, headless) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(PathBuf::from(DEFAULT_ARTIFACT)),
        (None, false) if !display_available() => {
            warn!("no display server found, rendering headless");
            Some(PathBuf::from(DEFAULT_ARTIFACT))
        }
        (None, false) => None,
    };

    match artifact {
        Some(path) => {
            write_svg(&chart, &path)
                .with_context(|| format!("writing chart {}", path.display()))?;
            println!("Chart written to {}", path.display());
        }
        None => display::window::show(chart)?,
    }

    Ok(())
}

fn write_summary(path: &Path, summary: &BreathSummary) -> anyhow::Result<()> {
    let report = serde_json::to_string_pretty(summary).context("serializing breath summary")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating summary directory {}", parent.display()))?;
    }
    fs::write(path, report).with_context(|| format!("writing breath summary {}", path.display()))
}
