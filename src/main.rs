use clap::{Parser, Subcommand};
use photoprep::config::ProcessConfig;
use photoprep::{config, effects, pipeline};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photoprep")]
#[command(about = "Single-shot photo pipeline for the album backend")]
#[command(long_about = "\
Single-shot photo pipeline for the album backend

The backend spawns one invocation per uploaded image. Results travel over
the standard streams: stdout carries exactly one JSON record on success,
stderr carries diagnostics, and the exit code distinguishes an unreadable
source (2) from a failure after decoding succeeded (1).

  photoprep process --input u/x.jpg --result-id abc123 --style sketch
    -> {\"style\":\"sketch\",\"filepath\":\"results/images/abc123-...jpg\", ...}

  photoprep effects --metadata '{\"filepath\":\"x.jpg\",\"analysis\":{...}}'
    -> {\"filepath\":..., \"analysis\":..., \"effects\":{\"sound\":...,\"stamp\":...}}

Metadata is best-effort: a photo without EXIF still processes, its
date_time and location keys simply absent. Unrecognized style labels fall
back to vivid. Run 'photoprep gen-config' for a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Configuration file (optional, defaults apply when absent)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Process one image: extract metadata, rotate upright, filter, save
    Process(ProcessArgs),
    /// Map a scenery/emotion verdict to sound and stamp asset paths
    Effects(EffectsArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct ProcessArgs {
    /// Source image (JPEG or PNG)
    #[arg(long)]
    input: PathBuf,

    /// Directory the processed image is written into
    #[arg(long, default_value = "public/results/images")]
    output_dir: PathBuf,

    /// Caller-supplied result identifier; must be unique per upload
    #[arg(long)]
    result_id: String,

    /// Style label from the classifier (vivid | sad | sketch)
    #[arg(long)]
    style: Option<String>,

    /// Upload filename as the user named it (for extension derivation);
    /// defaults to the input path's file name
    #[arg(long)]
    original_name: Option<String>,

    /// Filter intensity override (0.0-1.0), replacing the configured value
    #[arg(long)]
    mood: Option<f32>,
}

#[derive(clap::Args)]
struct EffectsArgs {
    /// Photo record as JSON: {"filepath": "...", "analysis": {"scenery": "...", "emotion": "..."}}
    #[arg(long)]
    metadata: String,
}

/// Wire shape of the `effects` input, as the backend sends it.
#[derive(Deserialize)]
struct EffectsInput {
    filepath: String,
    #[serde(default)]
    analysis: effects::Analysis,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    std::process::exit(run(cli));
}

fn run(cli: Cli) -> i32 {
    match cli.command {
        Command::Process(args) => {
            let mut config = match ProcessConfig::load(&cli.config) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("photoprep: {e}");
                    return 1;
                }
            };
            if let Some(mood) = args.mood {
                config.filter.mood = mood.clamp(0.0, 1.0);
            }

            let request = pipeline::ProcessRequest {
                input: &args.input,
                output_dir: &args.output_dir,
                result_id: &args.result_id,
                style_label: args.style.as_deref(),
                original_name: args.original_name.as_deref(),
            };
            match pipeline::process(&request, &config) {
                Ok(record) => emit_json(&record),
                Err(e) => {
                    eprintln!("photoprep: {e}");
                    e.exit_code()
                }
            }
        }
        Command::Effects(args) => {
            let input: EffectsInput = match serde_json::from_str(&args.metadata) {
                Ok(input) => input,
                Err(e) => {
                    eprintln!("photoprep: invalid metadata JSON: {e}");
                    return 1;
                }
            };
            let record = effects::decide(&input.filepath, input.analysis);
            emit_json(&record)
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            0
        }
    }
}

/// Print one JSON line on the success channel.
fn emit_json(value: &impl serde::Serialize) -> i32 {
    match serde_json::to_string(value) {
        Ok(json) => {
            println!("{json}");
            0
        }
        Err(e) => {
            eprintln!("photoprep: cannot serialize result: {e}");
            1
        }
    }
}
