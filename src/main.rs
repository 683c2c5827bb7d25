use std::process::ExitCode;

use qvuew::bootstrap::{self, config::config_path};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match bootstrap::load_or_default(config_path()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load config: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    let config = match bootstrap::resolve_config(config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to resolve config: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = bootstrap::tracing::init_tracing_subscriber(&config.log_dir) {
        eprintln!("Failed to initialize tracing: {err:#}");
    }

    match bootstrap::run_app(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "qvuew exited with error");
            ExitCode::FAILURE
        }
    }
}
