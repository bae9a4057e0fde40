use std::str::FromStr;

use valuedesk_core::constants::DEFAULT_REFINEMENT_ITERATIONS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    #[default]
    Pretty,
    Compact,
}

impl FromStr for OutputStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(OutputStyle::Pretty),
            "compact" => Ok(OutputStyle::Compact),
            other => Err(format!("unknown output style '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// "text" or "json"
    pub log_format: String,
    pub refine_iterations: usize,
    pub output: OutputStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
            refine_iterations: DEFAULT_REFINEMENT_ITERATIONS,
            output: OutputStyle::Pretty,
        }
    }
}

impl Config {
    /// Reads `VD_*` variables, loading a `.env` file first when present.
    /// Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let log_format = std::env::var("VD_LOG_FORMAT").unwrap_or(defaults.log_format);
        let refine_iterations = std::env::var("VD_REFINE_ITERATIONS")
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.refine_iterations);
        let output = std::env::var("VD_OUTPUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.output);

        Self {
            log_format,
            refine_iterations,
            output,
        }
    }
}
