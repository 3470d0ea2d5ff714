//! fingerprint CLI: singular point detection and pattern classification.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fingerprint::detect;
use fingerprint::singular::SingularPointParams;
use log::info;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "fingerprint")]
#[command(about = "Locate cores and deltas in a fingerprint image and classify its pattern")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect singular points in an image.
    Detect(DetectArgs),

    /// Print the default parameter tree as JSON.
    DefaultConfig,
}

#[derive(Debug, Clone, Args)]
struct DetectArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// JSON parameter file; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to write the JSON report (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Candidate grid stride in pixels.
    #[arg(long)]
    step: Option<usize>,

    /// Half-width of the Poincaré loop in pixels.
    #[arg(long)]
    window_size: Option<usize>,

    /// Tolerance around -180/+180/+360 degrees.
    #[arg(long)]
    tolerance_deg: Option<f32>,

    /// Duplicate merge distance in pixels.
    #[arg(long)]
    merge_distance: Option<f32>,

    /// Include orientation samples every N pixels in the report.
    #[arg(long)]
    orientations_step: Option<usize>,

    /// Log per-stage statistics to stderr.
    #[arg(long, short)]
    verbose: bool,
}

impl DetectArgs {
    fn params(&self) -> CliResult<SingularPointParams> {
        let mut params = match &self.config {
            Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
            None => SingularPointParams::default(),
        };
        if let Some(step) = self.step {
            params.poincare.step = step;
        }
        if let Some(ws) = self.window_size {
            params.poincare.window_size = ws;
        }
        if let Some(tol) = self.tolerance_deg {
            params.poincare.tolerance_degrees = tol;
        }
        if let Some(dist) = self.merge_distance {
            params.merge.distance_threshold = dist;
        }
        Ok(params)
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    #[cfg(feature = "tracing")]
    {
        let _ = tracing_log::LogTracer::init();
        fingerprint::core::init_tracing(false, level);
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = fingerprint::core::init_with_level(level);
    }
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Detect(args) => run_detect(&args),
        Commands::DefaultConfig => run_default_config(),
    }
}

fn run_detect(args: &DetectArgs) -> CliResult<()> {
    init_logging(args.verbose);

    let params = args.params()?;
    let img = detect::load_gray(&args.image)?;
    info!(
        "loaded {} ({}x{})",
        args.image.display(),
        img.width(),
        img.height()
    );

    let analysis = detect::analyze_singular_points(&img, params)?;
    let mut report = serde_json::to_value(&analysis.result)?;
    if let Some(obj) = report.as_object_mut() {
        obj.insert(
            "label".to_string(),
            serde_json::Value::from(analysis.result.class.label()),
        );
        if let Some(step) = args.orientations_step {
            let samples = analysis.field.sample_grid(step, 0);
            obj.insert("orientations".to_string(), serde_json::to_value(samples)?);
        }
    }

    let json = serde_json::to_string_pretty(&report)?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, &json)?;
            info!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }

    eprintln!(
        "{} ({} singular point(s))",
        analysis.result.class.label(),
        analysis.result.points.len()
    );
    Ok(())
}

fn run_default_config() -> CliResult<()> {
    let json = serde_json::to_string_pretty(&SingularPointParams::default())?;
    println!("{json}");
    Ok(())
}
