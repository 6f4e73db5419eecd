/// Replays a recorded input trace against the viewer and prints each step.
#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    cli::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::Parser;
    use valbum::config::{LogLevel, ViewerConfig};
    use valbum::replay::{Replay, Trace};

    #[derive(Parser, Debug)]
    #[command(name = "valbum-replay", version, about = "Replay album viewer input traces")]
    struct Cli {
        /// Trace file (JSON) to replay
        #[arg(required_unless_present = "print_config")]
        trace: Option<PathBuf>,

        /// Configuration file; defaults to the per-user config path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Log level, overrides the configuration
        #[arg(short, long)]
        log_level: Option<LogLevel>,

        /// Print the effective configuration as JSON and exit
        #[arg(long)]
        print_config: bool,
    }

    pub fn run() -> ExitCode {
        let cli = Cli::parse();

        // The filter is narrowed through log::set_max_level once the config is known.
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Trace)
            .init();
        log::set_max_level(cli.log_level.unwrap_or_default().to_level_filter());

        let config = match &cli.config {
            Some(path) => match ViewerConfig::load_from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error: {e}");
                    return ExitCode::FAILURE;
                }
            },
            None => ViewerConfig::load_from_default_path().unwrap_or_default(),
        };
        log::set_max_level(cli.log_level.unwrap_or(config.log_level).to_level_filter());

        if cli.print_config {
            return match config.to_json() {
                Ok(json) => {
                    println!("{json}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    ExitCode::FAILURE
                }
            };
        }

        let Some(path) = cli.trace else {
            return ExitCode::FAILURE;
        };
        let trace = match Trace::load(&path) {
            Ok(trace) => trace,
            Err(e) => {
                eprintln!("Error: {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        };

        log::info!("Replaying {} events from {}", trace.events.len(), path.display());
        for (index, (event, report)) in Replay::run(trace, &config).into_iter().enumerate() {
            println!("{:>4}  {:<32} {report}", index + 1, event.to_string());
        }

        ExitCode::SUCCESS
    }
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
