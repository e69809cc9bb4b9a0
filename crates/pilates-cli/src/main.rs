//! CLI binary for the mock PILATES pipeline.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use pilates_pipeline::{
    expand_env, manifest_paths, simulator_for, MarkerSet, NoDelay, PipelineRunner, RunConfig,
    TokioDelay, DEFAULT_SETTINGS_FILE,
};
use pilates_types::{PilatesError, Stage, StageScope};

#[derive(Parser)]
#[command(
    name = "pilates",
    version,
    about = "Mock PILATES runner: imitates the ActivitySim, UrbanSim, BEAM and postprocessing output layout"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the mock pipeline described by a settings file
    Run {
        /// Path to the YAML settings file
        #[arg(short, long, default_value = DEFAULT_SETTINGS_FILE)]
        settings: PathBuf,

        /// Skip the per-step delay regardless of step_delay_seconds
        #[arg(long)]
        no_delay: bool,

        /// Exit with status 0 even when the run fails (legacy behavior)
        #[arg(long)]
        exit_zero_on_error: bool,
    },

    /// Check a settings file without running anything
    Validate {
        /// Path to the YAML settings file
        #[arg(short, long, default_value = DEFAULT_SETTINGS_FILE)]
        settings: PathBuf,
    },

    /// Print the marker files a stage writes, relative to the output root
    Manifest {
        /// Stage name: activitysim, urbansim, beam or postprocessing
        #[arg(long, value_parser = parse_stage)]
        stage: Stage,

        /// Simulation year(s)
        #[arg(long, required = true, num_args = 1..)]
        year: Vec<i32>,

        /// Region used in the BEAM output path
        #[arg(long, default_value = "sf-bay")]
        region: String,

        /// Print the marker sets as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_stage(name: &str) -> Result<Stage, String> {
    Stage::from_name(name).ok_or_else(|| {
        format!("unknown stage '{name}' (expected activitysim, urbansim, beam or postprocessing)")
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (result, exit_zero_on_error) = match cli.command {
        Commands::Run {
            settings,
            no_delay,
            exit_zero_on_error,
        } => (cmd_run(&settings, no_delay).await, exit_zero_on_error),
        Commands::Validate { settings } => (cmd_validate(&settings), false),
        Commands::Manifest {
            stage,
            year,
            region,
            json,
        } => (cmd_manifest(stage, &year, &region, json), false),
    };

    ExitCode::from(exit_status(&result, exit_zero_on_error))
}

/// Log a failed command and map it to the process exit status.
fn exit_status(result: &anyhow::Result<()>, exit_zero_on_error: bool) -> u8 {
    let Err(err) = result else {
        return 0;
    };

    tracing::error!("{:?}", err);
    if let Some(pilates) = err.downcast_ref::<PilatesError>() {
        if pilates.is_config_error() {
            tracing::error!("Settings rejected; no stage was run");
        }
        if let Some(path) = pilates.path() {
            tracing::error!(path = %path.display(), "Output tree is not writable");
        }
    }
    tracing::error!("Exception during execution: {:#}", err);

    if exit_zero_on_error {
        0
    } else {
        1
    }
}

fn load_settings(path: &Path) -> anyhow::Result<RunConfig> {
    RunConfig::load(path)
        .with_context(|| format!("failed to load settings from '{}'", path.display()))
}

async fn cmd_run(settings_path: &Path, no_delay: bool) -> anyhow::Result<()> {
    let config = load_settings(settings_path)?;

    tracing::info!(
        "Using following settings from '{}':",
        settings_path.display()
    );
    for (key, value) in config.settings() {
        tracing::info!("->>  '{}': '{}'", key, value);
    }

    let runner = if no_delay {
        PipelineRunner::with_delay(Arc::new(NoDelay))
    } else {
        PipelineRunner::with_delay(Arc::new(TokioDelay))
    };
    let report = runner.run(&config).await?;

    tracing::debug!(
        stages = report.invocations.len(),
        markers = report.markers_written(),
        output = %report.base_output.display(),
        "Run summary"
    );
    Ok(())
}

fn cmd_validate(settings_path: &Path) -> anyhow::Result<()> {
    let config = load_settings(settings_path)?;

    println!("Settings are valid");
    println!("Region: {}", config.region);
    println!("Years: {:?}", config.sim_years());
    println!("Step delay: {}s", config.step_delay_seconds());
    println!(
        "Output root: {}/{}-{}-<timestamp>",
        expand_env(&config.output_directory),
        config.region,
        config.output_run_name
    );
    Ok(())
}

/// Marker sets `stage` writes for `years`, each listed once. Per-year stages
/// are expanded one year at a time, so directories shared between years
/// (e.g. `pilates/activitysim`) appear only at their first occurrence.
fn manifest_sets(stage: Stage, years: &[i32], region: &str) -> Vec<MarkerSet> {
    // Stage manifests only read the region; the year range is not consulted.
    let config = RunConfig::new(region, 0, 0);
    let simulator = simulator_for(stage);

    let scopes = match stage {
        Stage::Postprocessing => vec![StageScope::Years(years.to_vec())],
        _ => years.iter().map(|&year| StageScope::Year(year)).collect(),
    };

    let mut sets: Vec<MarkerSet> = Vec::new();
    for scope in &scopes {
        for set in simulator.manifest(scope, &config) {
            if !sets.contains(&set) {
                sets.push(set);
            }
        }
    }
    sets
}

fn cmd_manifest(stage: Stage, years: &[i32], region: &str, json: bool) -> anyhow::Result<()> {
    let sets = manifest_sets(stage, years, region);

    if json {
        println!("{}", serde_json::to_string_pretty(&sets)?);
    } else {
        for path in manifest_paths(&sets) {
            println!("{}", path);
        }
    }
    Ok(())
}
