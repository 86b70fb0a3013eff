//! Positional command-line arguments carrying sweep expressions

use tracing::debug;

use crate::error::Result;
use crate::grammar::{parse_sweep_expression, split_unescaped};
use crate::sweep::Sweep;

/// Sweeps collected from command-line arguments.
///
/// Arguments of the form `<names>=<values>` become sweeps; switches (leading
/// `-`) and anything without an unescaped `=` are handed back untouched for the
/// caller's own flag handling.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepArgs {
    /// Parsed sweeps, in argument order
    pub sweeps: Vec<Sweep>,

    /// Arguments that are not sweep expressions
    pub passthrough: Vec<String>,
}

impl SweepArgs {
    /// Classify and parse `args`.
    ///
    /// The first malformed sweep expression aborts parsing.
    ///
    /// # Examples
    ///
    /// ```
    /// use sweepcase_rs::grammar::SweepArgs;
    ///
    /// let args = SweepArgs::parse(["--verbose", "alpha=1,2", "beta=0:1:3", "model.bin"]).unwrap();
    /// assert_eq!(args.sweeps.len(), 2);
    /// assert_eq!(args.passthrough, vec!["--verbose", "model.bin"]);
    /// ```
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = SweepArgs::default();
        for arg in args {
            let arg = arg.as_ref();
            if is_sweep_expression(arg) {
                parsed.sweeps.push(parse_sweep_expression(arg)?);
            } else {
                parsed.passthrough.push(arg.to_string());
            }
        }
        debug!(
            sweeps = parsed.sweeps.len(),
            passthrough = parsed.passthrough.len(),
            "classified command-line arguments"
        );
        Ok(parsed)
    }

    pub fn is_empty(&self) -> bool {
        self.sweeps.is_empty()
    }

    /// Combine every parsed sweep multiplicatively.
    pub fn into_root(self) -> Sweep {
        Sweep::multiplicative(self.sweeps)
    }
}

fn is_sweep_expression(arg: &str) -> bool {
    !arg.starts_with('-') && split_unescaped(arg, arg, '=').map_or(false, |sides| sides.len() > 1)
}
