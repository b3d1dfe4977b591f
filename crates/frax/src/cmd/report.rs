use crate::report::StepReport;
use clap::Parser;
use eyre::Result;
use frax_config::{Config, ReportConfig};
use frax_math::Engine;

/// CLI arguments for `frax report`.
///
/// Unset options fall back to the `[report]` section of the config.
#[derive(Clone, Debug, Default, Parser)]
pub struct ReportArgs {
    /// Random inputs sampled per exponent.
    #[arg(long, value_name = "RUNS")]
    pub runs: Option<u32>,

    /// Seed of the sampling RNG, for reproducible reports.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Random inputs are drawn below this bound.
    #[arg(long, value_name = "MAX")]
    pub max_input: Option<u64>,

    /// Report numerators up to this one.
    #[arg(long, value_name = "A")]
    pub max_numerator: Option<u32>,

    /// Report denominators up to this one, starting at 2.
    #[arg(long, value_name = "B")]
    pub max_denominator: Option<u32>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

impl ReportArgs {
    pub fn run(self, engine: &Engine, config: &Config) -> Result<()> {
        let report = self.report(engine, config)?;
        if self.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!("{report}");
        }
        Ok(())
    }

    /// Collects the report without printing it.
    pub fn report(&self, engine: &Engine, config: &Config) -> Result<StepReport> {
        let config = self.report_config(config);
        let seed = config.seed.unwrap_or_else(rand::random);
        trace!(?config, seed, "collecting step report");
        let report = StepReport::collect(engine, &config, seed)?;
        eyre::ensure!(
            !report.is_empty(),
            "no exponents to report, `max_numerator` must be at least 1 and `max_denominator` \
             at least 2"
        );
        Ok(report)
    }

    fn report_config(&self, config: &Config) -> ReportConfig {
        let mut report = config.report;
        if let Some(runs) = self.runs {
            report.runs = runs;
        }
        if let Some(seed) = self.seed {
            report.seed = Some(seed);
        }
        if let Some(max_input) = self.max_input {
            report.max_input = max_input;
        }
        if let Some(max_numerator) = self.max_numerator {
            report.max_numerator = max_numerator;
        }
        if let Some(max_denominator) = self.max_denominator {
            report.max_denominator = max_denominator;
        }
        report
    }
}
