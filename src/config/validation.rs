use crate::config::types::{BenchmarkConfig, Config, FetcherConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_benchmark_config(&config.benchmark)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the workload parameters
fn validate_benchmark_config(config: &BenchmarkConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.seed_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", config.seed_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Seed URL '{}' must use an HTTP(S) scheme",
            config.seed_url
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.workers < 1 || config.workers > 1000 {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and 1000, got {}",
            config.workers
        )));
    }

    if config.repeats < 1 {
        return Err(ConfigError::Validation(format!(
            "repeats must be >= 1, got {}",
            config.repeats
        )));
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.results_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "results_dir cannot be empty".to_string(),
        ));
    }

    for (name, value) in [
        ("raw_file", &config.raw_file),
        ("chart_file", &config.chart_file),
    ] {
        if value.is_empty() || value.contains('/') || value.contains('\\') {
            return Err(ConfigError::Validation(format!(
                "{} must be a plain file name, got '{}'",
                name, value
            )));
        }
    }

    if config.raw_file == config.chart_file {
        return Err(ConfigError::Validation(
            "raw_file and chart_file must differ".to_string(),
        ));
    }

    Ok(())
}
