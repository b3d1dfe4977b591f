use eyre::EyreHandler;
use frax_math::FraxError;
use itertools::Itertools;
use std::{error::Error, fmt};

/// Error reporting for the `frax` command line.
///
/// Prints the cause chain once, with repeated messages folded, and a hint naming the setting to
/// change when the root cause is a [`FraxError`].
pub struct Handler {
    debug_handler: Option<Box<dyn EyreHandler>>,
}

impl Handler {
    /// Creates a handler, deferring `Debug` output to `debug_handler` when set.
    pub fn new(debug_handler: Option<Box<dyn EyreHandler>>) -> Self {
        Self { debug_handler }
    }
}

impl EyreHandler for Handler {
    fn display(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Display;
        causes(error).into_iter().format("; ").fmt(f)
    }

    fn debug(&self, error: &(dyn Error + 'static), f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(debug_handler) = &self.debug_handler {
            return debug_handler.debug(error, f);
        }

        if f.alternate() {
            return fmt::Debug::fmt(error, f);
        }

        let causes = causes(error);
        let Some((message, context)) = causes.split_first() else { return Ok(()) };
        write!(f, "{message}")?;
        match context {
            [] => {}
            [cause] => write!(f, "\n\nContext:\n- {cause}")?,
            _ => {
                write!(f, "\n\nContext:")?;
                for (n, cause) in context.iter().enumerate() {
                    write!(f, "\n- Error #{n}: {cause}")?;
                }
            }
        }
        if let Some(hint) = engine_error(error).map(hint) {
            write!(f, "\n\nHint: {hint}")?;
        }
        Ok(())
    }

    fn track_caller(&mut self, location: &'static std::panic::Location<'static>) {
        if let Some(debug_handler) = &mut self.debug_handler {
            debug_handler.track_caller(location);
        }
    }
}

/// Installs the frax [`eyre`] and [`panic`](mod@std::panic) hooks as the global ones.
///
/// `FRAX_DEBUG` switches errors to the verbose `color-eyre` handler. Panics always use it.
pub fn install() {
    if std::env::var_os("RUST_BACKTRACE").is_none() {
        unsafe {
            std::env::set_var("RUST_BACKTRACE", "1");
        }
    }

    let panic_section = "This is a bug. An engine call must never panic, please report it.";
    let (panic_hook, debug_hook) =
        color_eyre::config::HookBuilder::default().panic_section(panic_section).into_hooks();
    panic_hook.install();
    let debug_hook = debug_hook.into_eyre_hook();
    let debug = std::env::var_os("FRAX_DEBUG").is_some();
    if let Err(e) = eyre::set_hook(Box::new(move |e| {
        Box::new(Handler::new(debug.then(|| debug_hook(e))))
    })) {
        debug!("failed to install eyre error hook: {e}");
    }
}

/// The messages of the cause chain, a cause already quoted by its parent dropped.
fn causes(error: &(dyn Error + 'static)) -> Vec<String> {
    let mut causes =
        eyre::Chain::new(error).map(|cause| cause.to_string().trim().to_string()).collect_vec();
    // `failed: overflow; overflow` -> `failed: overflow`
    causes.dedup_by(|cause, parent| parent.contains(cause.as_str()));
    causes
}

/// The engine error at the root of the chain, if any.
fn engine_error<'a>(error: &'a (dyn Error + 'static)) -> Option<&'a FraxError> {
    eyre::Chain::new(error).find_map(|cause| cause.downcast_ref::<FraxError>())
}

fn hint(error: &FraxError) -> &'static str {
    match error {
        FraxError::Overflow => {
            "x^a is taken after reducing a/b to lowest terms and must fit in 256 bits, \
             use a smaller base or numerator"
        }
        FraxError::NonConvergence { .. } => {
            "raise `--max-iterations`, or `max_iterations` / `max_corrections` in frax.toml"
        }
        FraxError::InvalidExponent => "the denominator `b` must be at least 1",
    }
}
