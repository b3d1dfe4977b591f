//! Figment providers for `frax.toml`.

use figment::{
    Error, Metadata, Profile, Provider,
    providers::{Env, Format, Toml},
    value::{Dict, Map, Value},
};
use std::path::{Path, PathBuf};

/// A convenience provider to retrieve a toml file.
///
/// This will return an error if the env var is set but the file does not exist.
pub(crate) struct TomlFileProvider {
    pub env_var: Option<&'static str>,
    pub default: PathBuf,
}

impl TomlFileProvider {
    pub(crate) fn new(env_var: Option<&'static str>, default: impl Into<PathBuf>) -> Self {
        Self { env_var, default: default.into() }
    }

    fn env_val(&self) -> Option<String> {
        self.env_var.and_then(Env::var)
    }

    fn file(&self) -> PathBuf {
        self.env_val().map(PathBuf::from).unwrap_or_else(|| self.default.clone())
    }
}

impl Provider for TomlFileProvider {
    fn metadata(&self) -> Metadata {
        Toml::file(self.file()).nested().metadata()
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        use serde::de::Error as _;
        if let Some((var, file)) = self.env_var.zip(self.env_val()) {
            if !Path::new(&file).exists() {
                return Err(Error::custom(format!(
                    "Config file `{file}` set in env var `{var}` does not exist"
                )));
            }
        }
        Toml::file(self.file()).nested().data()
    }
}

/// Lifts every `[profile.<name>]` table of the wrapped provider into the figment profile
/// `<name>`.
///
/// For example given:
///
/// ```toml
/// [profile.default]
/// max_iterations = 64
///
/// [profile.ci]
/// max_iterations = 32
/// ```
///
/// the provider emits the profiles `default` and `ci`. Top-level tables other than `profile`
/// are ignored.
pub(crate) struct ProfileTableProvider<P> {
    provider: P,
}

impl<P> ProfileTableProvider<P> {
    pub const PROFILE_KEY: Profile = Profile::const_new("profile");

    pub(crate) fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P: Provider> Provider for ProfileTableProvider<P> {
    fn metadata(&self) -> Metadata {
        self.provider.metadata()
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut data = self.provider.data()?;
        for key in data.keys().filter(|key| **key != Self::PROFILE_KEY) {
            warn!("ignoring unknown section `[{key}]` in frax.toml");
        }

        let mut profiles = Map::new();
        let Some(tables) = data.remove(&Self::PROFILE_KEY) else { return Ok(profiles) };
        for (name, value) in tables {
            let profile = Profile::new(&name);
            match value {
                Value::Dict(_, dict) => {
                    profiles.insert(profile, dict);
                }
                bad_val => {
                    let mut err = Error::from(figment::error::Kind::InvalidType(
                        bad_val.to_actual(),
                        "dict".into(),
                    ));
                    err.metadata = Some(self.provider.metadata());
                    err.profile = Some(profile);
                    return Err(err);
                }
            }
        }
        Ok(profiles)
    }
}
