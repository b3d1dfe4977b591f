use eyre::Result;
use frax_config::Config;
use frax_math::{Engine, Limits};
use tracing_subscriber::{EnvFilter, prelude::*};

/// Initializes a tracing subscriber that writes to stderr, filtered by `RUST_LOG`.
pub fn subscriber() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();
}

/// Loads the [`Config`] of the current directory.
pub trait LoadConfig {
    /// Load the config, applying the overrides of `self`.
    fn load_config(&self) -> Result<Config>;

    /// Load the config and build an [`Engine`] from it.
    fn load_engine(&self) -> Result<(Config, Engine)> {
        let config = self.load_config()?;
        let engine = Engine::new(config.limits());
        Ok((config, engine))
    }
}

/// A CLI override of the engine limits.
pub fn apply_limits(config: &mut Config, max_iterations: Option<u32>) -> Result<Limits> {
    if let Some(max_iterations) = max_iterations {
        eyre::ensure!(max_iterations > 0, "`--max-iterations` must be greater than zero");
        config.max_iterations = max_iterations;
    }
    Ok(config.limits())
}
