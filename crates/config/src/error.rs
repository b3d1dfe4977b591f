//! Config extraction errors.

use figment::{Profile, Source};
use std::{error::Error, fmt};

/// The message shown before the individual errors of a failed extraction.
pub const FAILED_TO_EXTRACT_CONFIG_MSG: &str = "failed to extract frax config:";

/// Represents a failed attempt to extract `Config` from a `Figment`.
///
/// Every underlying error is printed on its own line, prefixed with where the offending value
/// came from: the config file name, `env` for `FRAX_` variables, or `frax config` otherwise.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractConfigError {
    pub(crate) error: figment::Error,
}

impl ExtractConfigError {
    /// Wraps the figment error
    pub fn new(error: figment::Error) -> Self {
        Self { error }
    }
}

impl fmt::Display for ExtractConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{FAILED_TO_EXTRACT_CONFIG_MSG}")?;
        let mut seen = Vec::with_capacity(self.error.count());
        for line in self.error.clone().into_iter().map(|err| describe(&err)) {
            if !seen.contains(&line) {
                writeln!(f, "{line}")?;
                seen.push(line);
            }
        }
        Ok(())
    }
}

impl Error for ExtractConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Error::source(&self.error)
    }
}

impl From<figment::Error> for ExtractConfigError {
    fn from(error: figment::Error) -> Self {
        Self::new(error)
    }
}

/// `<origin>: <kind> for setting `<path>` in profile `<name>``, the last two parts only when
/// known.
fn describe(err: &figment::Error) -> String {
    let origin = match err.metadata.as_ref() {
        Some(meta) => match &meta.source {
            Some(Source::File(path)) => match path.file_name() {
                Some(name) => name.to_string_lossy().into_owned(),
                None => path.display().to_string(),
            },
            _ if meta.name.contains("environment") => "env".to_string(),
            _ => "frax config".to_string(),
        },
        None => "frax config".to_string(),
    };

    let mut line = format!("{origin}: {}", err.kind);
    if !err.path.is_empty() {
        line.push_str(&format!(" for setting `{}`", err.path.join(".")));
    }
    if let Some(profile) = err.profile.as_ref().filter(|profile| **profile != Profile::Default) {
        line.push_str(&format!(" in profile `{profile}`"));
    }
    line
}
