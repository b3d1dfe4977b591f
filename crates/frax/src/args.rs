use crate::{
    cmd::report::ReportArgs,
    handler,
    utils::{self, LoadConfig},
};
use clap::{Args, Parser, Subcommand};
use eyre::{Result, WrapErr};
use frax_config::Config;
use frax_math::{Engine, StepCounter, U256};

/// Floor-rounded rational powers of 256-bit words.
#[derive(Parser)]
#[command(name = "frax", version, next_display_order = None)]
pub struct Frax {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub cmd: FraxSubcommand,
}

/// Options shared by every subcommand.
#[derive(Clone, Debug, Default, Args)]
pub struct GlobalArgs {
    /// The maximum number of Newton rounds of a root.
    ///
    /// Overrides `max_iterations` of the config.
    #[arg(long, global = true, value_name = "ROUNDS")]
    pub max_iterations: Option<u32>,
}

impl LoadConfig for GlobalArgs {
    fn load_config(&self) -> Result<Config> {
        let mut config = Config::load()?;
        utils::apply_limits(&mut config, self.max_iterations)?;
        Ok(config)
    }
}

#[derive(Subcommand)]
pub enum FraxSubcommand {
    #[command(flatten)]
    Calc(CalcSubcommand),

    /// Samples a range of exponents and reports the cost of each.
    #[command(visible_alias = "rep")]
    Report(ReportArgs),
}

/// The single-call arithmetic commands.
#[derive(Subcommand)]
pub enum CalcSubcommand {
    /// Computes floor(x^(a/b)).
    #[command(visible_aliases = &["e", "frax-exp"])]
    Exp {
        /// The base, decimal or 0x-prefixed hex.
        x: U256,

        /// The exponent numerator.
        a: u32,

        /// The exponent denominator.
        b: u32,

        /// Also print the cost of the call.
        #[arg(long)]
        steps: bool,
    },

    /// Computes x^a, failing if it does not fit in 256 bits.
    #[command(visible_alias = "p")]
    Pow {
        /// The base, decimal or 0x-prefixed hex.
        x: U256,

        /// The exponent.
        a: u32,

        /// Also print the cost of the call.
        #[arg(long)]
        steps: bool,
    },

    /// Computes floor(y^(1/b)).
    #[command(visible_alias = "r")]
    Root {
        /// The radicand, decimal or 0x-prefixed hex.
        y: U256,

        /// The degree of the root.
        b: u32,

        /// Also print the cost of the call.
        #[arg(long)]
        steps: bool,
    },
}

/// Run the `frax` command-line interface.
pub fn run() -> Result<()> {
    setup();

    let args = Frax::parse();
    run_command(args)
}

/// Setup the global error handler and logger.
pub fn setup() {
    handler::install();
    utils::subscriber();
}

/// Run the subcommand.
pub fn run_command(args: Frax) -> Result<()> {
    let (config, engine) = args.global.load_engine()?;
    match args.cmd {
        FraxSubcommand::Report(cmd) => cmd.run(&engine, &config),
        FraxSubcommand::Calc(cmd) => {
            for line in evaluate(&engine, cmd)? {
                println!("{line}");
            }
            Ok(())
        }
    }
}

/// Evaluates an arithmetic command, returning the lines to print.
fn evaluate(engine: &Engine, cmd: CalcSubcommand) -> Result<Vec<String>> {
    let mut counter = StepCounter::new();
    let (result, steps) = match cmd {
        CalcSubcommand::Exp { x, a, b, steps } => (
            engine
                .frax_exp(x, a, b, &mut counter)
                .wrap_err_with(|| format!("failed to compute {x}^({a}/{b})"))?,
            steps,
        ),
        CalcSubcommand::Pow { x, a, steps } => (
            engine.pow(x, a, &mut counter).wrap_err_with(|| format!("failed to compute {x}^{a}"))?,
            steps,
        ),
        CalcSubcommand::Root { y, b, steps } => (
            engine
                .root(y, b, &mut counter)
                .wrap_err_with(|| format!("failed to compute the {b}-th root of {y}"))?,
            steps,
        ),
    };

    let mut lines = vec![result.to_string()];
    if steps {
        lines.push(counter.to_string());
    }
    Ok(lines)
}
