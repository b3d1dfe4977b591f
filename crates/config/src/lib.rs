//! # frax-config
//!
//! Frax configuration.
//!
//! Values are layered, later layers winning:
//!
//! 1. built-in defaults
//! 2. the `[profile.default]` table of `frax.toml`, then the table of the selected profile
//! 3. `FRAX_` prefixed environment variables
//!
//! The profile is selected with `FRAX_PROFILE`.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

use figment::{
    Figment, Metadata, Profile, Provider,
    providers::{Env, Serialized},
    value::{Dict, Map},
};
use frax_math::Limits;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod error;
pub use error::ExtractConfigError;

mod providers;
use providers::{ProfileTableProvider, TomlFileProvider};

/// Frax configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// The selected profile, set from the extracting figment.
    #[serde(skip)]
    pub profile: Profile,
    /// The hard bound on Newton rounds of a single root.
    pub max_iterations: u32,
    /// The bound on unit adjustments after the Newton rounds.
    pub max_corrections: u32,
    /// Configuration for `frax report`.
    pub report: ReportConfig,
}

/// Configuration for the step-cost report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Random inputs sampled per exponent, on top of the boundary inputs.
    pub runs: u32,
    /// Seed of the sampling RNG. A fresh seed is drawn when unset.
    pub seed: Option<u64>,
    /// Random inputs are drawn from `0..max_input`.
    pub max_input: u64,
    /// Numerators `1..=max_numerator` are reported.
    pub max_numerator: u32,
    /// Denominators `2..=max_denominator` are reported.
    pub max_denominator: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { runs: 32, seed: None, max_input: 1_000_000_000, max_numerator: 9, max_denominator: 9 }
    }
}

impl Config {
    /// The default profile: "default"
    pub const DEFAULT_PROFILE: Profile = Profile::Default;

    /// File name of config toml file
    pub const FILE_NAME: &'static str = "frax.toml";

    /// Sections that map to nested tables when set through the environment.
    ///
    /// `FRAX_REPORT_RUNS` is read as `report.runs`.
    pub const STANDALONE_SECTIONS: &'static [&'static str] = &["report"];

    /// Loads the config for the current working directory.
    ///
    /// See [`figment_with_root`](Self::figment_with_root) for the layers.
    pub fn load() -> Result<Self, ExtractConfigError> {
        Self::load_with_root(".")
    }

    /// Loads the config, reading `frax.toml` from `root`.
    pub fn load_with_root(root: impl AsRef<Path>) -> Result<Self, ExtractConfigError> {
        Self::try_from(Self::figment_with_root(root))
    }

    /// Attempts to extract a `Config` from `provider`.
    ///
    /// # Example
    ///
    /// ```
    /// use figment::providers::{Format, Toml};
    /// use frax_config::Config;
    ///
    /// let figment = Config::figment().merge(Toml::string("max_iterations = 32"));
    /// let config = Config::try_from(figment)?;
    /// assert_eq!(config.max_iterations, 32);
    /// # Ok::<(), frax_config::ExtractConfigError>(())
    /// ```
    pub fn try_from<T: Provider>(provider: T) -> Result<Self, ExtractConfigError> {
        let figment = Figment::from(provider);
        trace!("load config with provider: {:?}", figment.metadata().collect::<Vec<_>>());
        let mut config = figment.extract::<Self>()?;
        config.profile = figment.profile().clone();
        config.validate()?;
        Ok(config)
    }

    /// Returns the default figment for the current working directory.
    pub fn figment() -> Figment {
        Self::figment_with_root(".")
    }

    /// Returns the default figment: defaults, `<root>/frax.toml` (or the file named by
    /// `FRAX_CONFIG`) and the `FRAX_` environment, with the selected profile applied.
    pub fn figment_with_root(root: impl AsRef<Path>) -> Figment {
        let profile = Self::selected_profile();
        let toml = TomlFileProvider::new(Some("FRAX_CONFIG"), root.as_ref().join(Self::FILE_NAME));
        debug!(%profile, "resolving config");

        Figment::from(Self::default())
            .merge(ProfileTableProvider::new(toml))
            .merge(
                Env::prefixed("FRAX_")
                    .ignore(&["PROFILE", "CONFIG", "DEBUG"])
                    .map(|key| {
                        let key = key.as_str();
                        if Self::STANDALONE_SECTIONS.iter().any(|section| {
                            key.starts_with(&format!("{}_", section.to_ascii_uppercase()))
                        }) {
                            key.replacen('_', ".", 1).into()
                        } else {
                            key.into()
                        }
                    })
                    .global(),
            )
            .select(profile)
    }

    /// Returns the selected profile.
    ///
    /// If the `FRAX_PROFILE` env variable is not set, this returns the `DEFAULT_PROFILE`.
    pub fn selected_profile() -> Profile {
        Profile::from_env_or("FRAX_PROFILE", Self::DEFAULT_PROFILE)
    }

    /// The engine limits described by this config.
    pub fn limits(&self) -> Limits {
        Limits { max_iterations: self.max_iterations, max_corrections: self.max_corrections }
    }

    fn validate(&self) -> Result<(), figment::Error> {
        use serde::de::Error as _;
        if self.max_iterations == 0 {
            return Err(figment::Error::custom("`max_iterations` must be greater than zero"));
        }
        if self.report.max_input == 0 {
            return Err(figment::Error::custom("`report.max_input` must be greater than zero"));
        }
        Ok(())
    }
}

impl Provider for Config {
    fn metadata(&self) -> Metadata {
        Metadata::named("Frax Config")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }

    fn profile(&self) -> Option<Profile> {
        Some(self.profile.clone())
    }
}

impl Default for Config {
    fn default() -> Self {
        let limits = Limits::default();
        Self {
            profile: Self::DEFAULT_PROFILE,
            max_iterations: limits.max_iterations,
            max_corrections: limits.max_corrections,
            report: ReportConfig::default(),
        }
    }
}
