//! Step-cost reports.

use comfy_table::{presets::ASCII_MARKDOWN, *};
use eyre::{Result, WrapErr};
use frax_config::ReportConfig;
use frax_math::{Engine, FraxError, StepCounter, U256, checked_pow, is_floor_root, reduce};
use itertools::Itertools;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Serialize, Serializer};
use std::{collections::BTreeMap, fmt};

/// A rational exponent `a/b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Exponent {
    pub numerator: u32,
    pub denominator: u32,
}

impl fmt::Display for Exponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x^({}/{})", self.numerator, self.denominator)
    }
}

/// Aggregated cost of the samples of one exponent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CostInfo {
    /// Cost of every successful call, sorted once finalized.
    #[serde(skip)]
    pub calls: Vec<u64>,
    pub min: u64,
    pub mean: u64,
    pub median: u64,
    pub max: u64,
    pub samples: usize,
    /// Inputs whose power did not fit in a word.
    pub overflows: u64,
    /// The largest number of Newton rounds seen.
    pub max_rounds: u32,
}

/// Represents the step-cost report for a range of exponents.
#[derive(Clone, Debug, Default, Serialize)]
pub struct StepReport {
    /// Seed the random inputs were drawn with.
    pub seed: u64,
    #[serde(serialize_with = "serialize_rows")]
    exponents: BTreeMap<Exponent, CostInfo>,
}

impl StepReport {
    /// Samples every exponent of `config` and records the cost of each call.
    ///
    /// Every result is checked against the floor invariant, a violation aborts the report.
    pub fn collect(engine: &Engine, config: &ReportConfig, seed: u64) -> Result<Self> {
        eyre::ensure!(config.max_input > 0, "`max_input` must be greater than zero");
        let mut rng = StdRng::seed_from_u64(seed);
        let mut report = Self { seed, ..Default::default() };
        for denominator in 2..=config.max_denominator {
            for numerator in 1..=config.max_numerator {
                let exponent = Exponent { numerator, denominator };
                let random = (0..config.runs)
                    .map(|_| U256::from(rng.random_range(0..config.max_input)))
                    .collect::<Vec<_>>();
                for x in boundary_inputs(denominator).chain(random) {
                    report.record(engine, exponent, x)?;
                }
            }
        }
        debug!(seed, exponents = report.exponents.len(), "collected step report");
        Ok(report.finalize())
    }

    /// Runs `x^exponent` once and records its cost.
    pub fn record(&mut self, engine: &Engine, exponent: Exponent, x: U256) -> Result<()> {
        let Exponent { numerator, denominator } = exponent;
        let mut counter = StepCounter::new();
        let info = self.exponents.entry(exponent).or_default();
        match engine.frax_exp(x, numerator, denominator, &mut counter) {
            Ok(result) => {
                let (num, den) = reduce(numerator, denominator);
                let power = checked_pow(x, num)?;
                eyre::ensure!(
                    is_floor_root(power, den, result),
                    "{exponent} at x = {x}: {result} is not the floor root"
                );
                trace!(%exponent, %x, %counter, "sample");
                info.calls.push(counter.gas());
                info.max_rounds = info.max_rounds.max(counter.iterations());
            }
            Err(FraxError::Overflow) => info.overflows += 1,
            Err(err) => return Err(err).wrap_err_with(|| format!("{exponent} failed at x = {x}")),
        }
        Ok(())
    }

    /// Finalizes the report by calculating the min, max, mean, and median of each exponent.
    #[must_use]
    pub fn finalize(mut self) -> Self {
        self.exponents.values_mut().for_each(|info| {
            info.calls.sort_unstable();
            info.min = info.calls.first().copied().unwrap_or_default();
            info.max = info.calls.last().copied().unwrap_or_default();
            info.mean = mean(&info.calls);
            info.median = median_sorted(&info.calls);
            info.samples = info.calls.len();
        });
        self
    }

    /// Returns the aggregated cost of `exponent`, if it was sampled.
    pub fn get(&self, exponent: Exponent) -> Option<&CostInfo> {
        self.exponents.get(&exponent)
    }

    /// Number of sampled exponents.
    pub fn len(&self) -> usize {
        self.exponents.len()
    }

    /// Whether the exponent range was empty.
    pub fn is_empty(&self) -> bool {
        self.exponents.is_empty()
    }
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = Table::new();
        table.load_preset(ASCII_MARKDOWN);
        table.set_header([
            Cell::new("Exponent").add_attribute(Attribute::Bold).fg(Color::Magenta),
            Cell::new("min").add_attribute(Attribute::Bold).fg(Color::Green),
            Cell::new("avg").add_attribute(Attribute::Bold).fg(Color::Yellow),
            Cell::new("median").add_attribute(Attribute::Bold).fg(Color::Yellow),
            Cell::new("max").add_attribute(Attribute::Bold).fg(Color::Red),
            Cell::new("# samples").add_attribute(Attribute::Bold),
            Cell::new("# overflows").add_attribute(Attribute::Bold),
            Cell::new("max rounds").add_attribute(Attribute::Bold),
        ]);
        for (exponent, info) in &self.exponents {
            table.add_row([
                Cell::new(exponent.to_string()).add_attribute(Attribute::Bold),
                Cell::new(info.min.to_string()).fg(Color::Green),
                Cell::new(info.mean.to_string()).fg(Color::Yellow),
                Cell::new(info.median.to_string()).fg(Color::Yellow),
                Cell::new(info.max.to_string()).fg(Color::Red),
                Cell::new(info.samples.to_string()),
                Cell::new(info.overflows.to_string()),
                Cell::new(info.max_rounds.to_string()),
            ]);
        }
        writeln!(f, "{table}")?;
        write!(f, "seed: {}", self.seed)
    }
}

#[derive(Serialize)]
struct Row<'a> {
    #[serde(flatten)]
    exponent: &'a Exponent,
    #[serde(flatten)]
    info: &'a CostInfo,
}

fn serialize_rows<S: Serializer>(
    exponents: &BTreeMap<Exponent, CostInfo>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(exponents.iter().map(|(exponent, info)| Row { exponent, info }))
}

/// `0`, `1`, `2` and the perfect powers `i^b` for `i` in `1..10` that fit in a word.
fn boundary_inputs(b: u32) -> impl Iterator<Item = U256> {
    [0u64, 1, 2]
        .into_iter()
        .map(U256::from)
        .chain((1u64..10).filter_map(move |i| checked_pow(U256::from(i), b).ok()))
        .unique()
}

fn mean(values: &[u64]) -> u64 {
    if values.is_empty() {
        return 0;
    }

    (values.iter().map(|x| *x as u128).sum::<u128>() / values.len() as u128) as u64
}

/// Median of a _sorted_ slice.
fn median_sorted(values: &[u64]) -> u64 {
    if values.is_empty() {
        return 0;
    }

    let len = values.len();
    let mid = len / 2;
    if len % 2 == 0 { (values[mid - 1] + values[mid]) / 2 } else { values[mid] }
}
