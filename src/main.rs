use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use cogscore::inputs::{DietType, ExerciseFrequency, Gender, InputOverrides, InputRecord};
use cogscore::sample::SampleDataset;
use cogscore::{buffered_eprintln, verbose_eprintln};

const EXIT_SUCCESS: i32 = 0;
const EXIT_IO: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Input flags shared by `predict` and `form`; unset flags fall back to config defaults.
#[derive(clap::Args, Debug, Default)]
struct InputArgs {
    /// Age in years (18-59)
    #[arg(long)]
    age: Option<u32>,

    #[arg(long, value_enum)]
    gender: Option<Gender>,

    /// Sleep duration in hours (4.0-10.0)
    #[arg(long = "sleep")]
    sleep_duration: Option<f64>,

    /// Stress level (1-10)
    #[arg(long = "stress")]
    stress_level: Option<u32>,

    #[arg(long = "diet", value_enum)]
    diet_type: Option<DietType>,

    /// Daily screen time in hours (1.0-12.0)
    #[arg(long = "screen-time")]
    daily_screen_time: Option<f64>,

    #[arg(long = "exercise", value_enum)]
    exercise_frequency: Option<ExerciseFrequency>,

    /// Caffeine intake in mg per day (0-500)
    #[arg(long = "caffeine")]
    caffeine_intake: Option<u32>,

    /// Reaction time in ms (200-600)
    #[arg(long)]
    reaction_time: Option<f64>,

    /// Memory test score (40-100)
    #[arg(long = "memory")]
    memory_test_score: Option<u32>,
}

impl InputArgs {
    fn overrides(&self) -> InputOverrides {
        InputOverrides {
            age: self.age,
            gender: self.gender,
            sleep_duration: self.sleep_duration,
            stress_level: self.stress_level,
            diet_type: self.diet_type,
            daily_screen_time: self.daily_screen_time,
            exercise_frequency: self.exercise_frequency,
            caffeine_intake: self.caffeine_intake,
            reaction_time: self.reaction_time,
            memory_test_score: self.memory_test_score,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the cognitive score and print it (default if no subcommand)
    Predict {
        #[command(flatten)]
        inputs: InputArgs,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Show inputs and per-factor contributions
        #[arg(short, long)]
        breakdown: bool,
    },
    /// Open the interactive form
    Form {
        #[command(flatten)]
        inputs: InputArgs,
    },
    /// Show the score distribution of the sample dataset
    Sample {
        /// CSV file to use instead of the configured one
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// Create a config file interactively
    Init {
        /// Overwrite an existing config without asking
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "cogscore")]
#[command(about = "Estimate a cognitive score from lifestyle and performance inputs", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/cogscore/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Layer CLI flags over config defaults and validate the result.
fn collect_inputs(
    config: &cogscore::config::Config,
    args: &InputArgs,
) -> Result<InputRecord, Vec<String>> {
    let mut record = config.starting_inputs();
    args.overrides().apply_to(&mut record);
    cogscore::inputs::validate_inputs(&record)?;
    Ok(record)
}

/// `collect_inputs`, exiting with the config/input code on bad values.
fn collect_inputs_or_exit(config: &cogscore::config::Config, args: &InputArgs) -> InputRecord {
    match collect_inputs(config, args) {
        Ok(record) => record,
        Err(errors) => {
            eprintln!("Input errors:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            std::process::exit(EXIT_CONFIG);
        }
    }
}

fn load_sample(path: Option<&std::path::Path>) -> SampleDataset {
    let dataset = SampleDataset::load_or_placeholder(path);
    if dataset.loaded {
        verbose_eprintln!("Loaded {} sample records", dataset.records.len());
    } else if let Some(ref reason) = dataset.fallback_reason {
        // Only worth a warning when the user asked for a file
        if path.is_some() {
            buffered_eprintln!("Sample data unavailable, using placeholder: {}", reason);
        } else {
            verbose_eprintln!("Sample data unavailable: {}", reason);
        }
    }
    dataset
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    cogscore::stderr_buffer::set_verbose(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Predict {
        inputs: InputArgs::default(),
        format: OutputFormat::Text,
        breakdown: false,
    });

    // Init runs before loading so a broken config can be replaced
    let config_path = cli.config.map(PathBuf::from);
    if let Commands::Init { force } = command {
        if let Err(e) = cogscore::config::init::run_init_wizard(config_path, force) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_IO);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match cogscore::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if cli.verbose {
        eprintln!(
            "Config: defaults {}, sample data {}, theme {:?}",
            if config.defaults.is_some() { "set" } else { "built-in" },
            config
                .sample_data
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string()),
            config.theme
        );
    }

    let use_colors = cogscore::output::should_use_colors(cli.no_color);

    match command {
        Commands::Predict {
            inputs,
            format,
            breakdown,
        } => {
            let record = collect_inputs_or_exit(&config, &inputs);
            let prediction = cogscore::scoring::compute(&record);

            if cli.verbose {
                eprintln!("Inputs: {:?}", record);
                eprintln!("Raw score: {}", prediction.score);
            }

            match format {
                OutputFormat::Text => {
                    let term_width = cogscore::output::get_terminal_width();
                    println!(
                        "{}",
                        cogscore::output::format_report(
                            &record,
                            &prediction,
                            term_width,
                            breakdown,
                            use_colors
                        )
                    );
                }
                OutputFormat::Json => match cogscore::output::format_json(&record, &prediction) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("{:#}", e);
                        std::process::exit(EXIT_IO);
                    }
                },
            }
        }
        Commands::Form { inputs } => {
            let record = collect_inputs_or_exit(&config, &inputs);
            // Hold sample warnings until the form closes
            cogscore::stderr_buffer::activate();
            let sample = load_sample(config.sample_data.as_deref());
            let theme = cogscore::tui::resolve_theme(config.theme);
            let app = cogscore::tui::App::new(record, sample, theme);

            if let Err(e) = cogscore::tui::run_form(app).await {
                eprintln!("Terminal error: {:#}", e);
                std::process::exit(EXIT_IO);
            }
        }
        Commands::Sample { data } => {
            let path = data
                .map(|p| cogscore::config::expand_home(&p))
                .or(config.sample_data);
            let sample = load_sample(path.as_deref());

            match sample.histogram() {
                Some(histogram) => {
                    println!("Sample Distribution ({} scores)", histogram.total());
                    println!(
                        "{}",
                        cogscore::output::format_histogram(
                            &histogram,
                            cogscore::output::get_terminal_width(),
                            use_colors
                        )
                    );
                }
                None if sample.loaded => {
                    println!("Sample data has no Cognitive_Score column; no distribution to show.");
                }
                None => {
                    println!("No sample data available; distribution display is disabled.");
                }
            }
        }
        Commands::Init { .. } => {}
    }

    std::process::exit(EXIT_SUCCESS);
}
