//! # Sweep System
//!
//! A [`Sweep`] describes the values one or more parameters should take and
//! generates the ordered list of concrete [`Assignment`]s a batch runner executes.
//!
//! ## Variants
//!
//! - **Leaves** own one parameter name: [`Sweep::SingleValue`], [`Sweep::List`],
//!   [`Sweep::Range`] and [`Sweep::UniformRandom`].
//! - **Combinations** own child sweeps: [`Sweep::Multiplicative`] takes the
//!   cartesian product of its children (last child varies fastest) and
//!   [`Sweep::Parallel`] zips children of equal length position by position.
//!
//! Combining two subtrees that assign the same parameter is always an error,
//! regardless of strategy.
//!
//! ## Example Usage
//!
//! ```rust
//! use sweepcase_rs::sweep::{ExactDecimal, Sweep};
//! use rand::SeedableRng;
//!
//! let sweep = Sweep::multiplicative(vec![
//!     Sweep::list("solver", vec!["cg".into(), "gmres".into()]),
//!     Sweep::range(
//!         "tol",
//!         ExactDecimal::parse("0.1").unwrap(),
//!         ExactDecimal::parse("0.3").unwrap(),
//!         ExactDecimal::parse("0.1").unwrap(),
//!     ),
//! ]);
//!
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
//! let assignments = sweep.generate(&mut rng).unwrap();
//! assert_eq!(assignments.len(), 6);
//! ```

mod combine;
pub mod decimal;
pub mod leaf;
pub mod node;
pub mod value;


pub use decimal::ExactDecimal;
pub use node::SweepNode;
pub use value::{Assignment, ParamValue};

use rand::Rng;
use tracing::trace;

use crate::error::Result;

/// How the root of an experiment treats single-value children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationMode {
    /// Every child is a sweep dimension
    #[default]
    Strict,

    /// Single-value children of a multiplicative root are overridable defaults
    OverrideDefaults,
}

/// A parameter sweep.
#[derive(Debug, Clone, PartialEq)]
pub enum Sweep {
    /// One parameter, one value
    SingleValue { name: String, value: ParamValue },

    /// One parameter, an ordered list of values
    List {
        name: String,
        values: Vec<ParamValue>,
    },

    /// One parameter, an arithmetic progression of exact decimals
    Range {
        name: String,
        start: ExactDecimal,
        end: ExactDecimal,
        increment: ExactDecimal,
    },

    /// One parameter, `count` uniform draws over `[low, high)`
    UniformRandom {
        name: String,
        low: f64,
        high: f64,
        count: i64,
    },

    /// Cartesian product of the children
    Multiplicative(Vec<Sweep>),

    /// Positional zip of the children
    Parallel(Vec<Sweep>),
}

impl Sweep {
    pub fn single(name: &str, value: impl Into<ParamValue>) -> Self {
        Sweep::SingleValue {
            name: name.to_string(),
            value: value.into(),
        }
    }

    pub fn list(name: &str, values: Vec<ParamValue>) -> Self {
        Sweep::List {
            name: name.to_string(),
            values,
        }
    }

    /// Range sweep; the sign of `increment` is ignored.
    pub fn range(
        name: &str,
        start: ExactDecimal,
        end: ExactDecimal,
        increment: ExactDecimal,
    ) -> Self {
        Sweep::Range {
            name: name.to_string(),
            start,
            end,
            increment,
        }
    }

    pub fn uniform(name: &str, low: f64, high: f64, count: i64) -> Self {
        Sweep::UniformRandom {
            name: name.to_string(),
            low,
            high,
            count,
        }
    }

    pub fn multiplicative(children: Vec<Sweep>) -> Self {
        Sweep::Multiplicative(children)
    }

    pub fn parallel(children: Vec<Sweep>) -> Self {
        Sweep::Parallel(children)
    }

    /// Parameter name of a leaf sweep, `None` for combinations.
    pub fn name(&self) -> Option<&str> {
        match self {
            Sweep::SingleValue { name, .. }
            | Sweep::List { name, .. }
            | Sweep::Range { name, .. }
            | Sweep::UniformRandom { name, .. } => Some(name),
            Sweep::Multiplicative(_) | Sweep::Parallel(_) => None,
        }
    }

    /// Children of a combination sweep; empty for leaves.
    pub fn children(&self) -> &[Sweep] {
        match self {
            Sweep::Multiplicative(children) | Sweep::Parallel(children) => children,
            _ => &[],
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.name().is_some()
    }

    /// Every parameter name the tree assigns, in tree order.
    ///
    /// Duplicates are reported as they occur; generation is what rejects them.
    pub fn parameter_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names(&self, names: &mut Vec<String>) {
        match self.name() {
            Some(name) => names.push(name.to_string()),
            None => {
                for child in self.children() {
                    child.collect_names(names);
                }
            }
        }
    }

    /// Number of assignments `generate` would produce, when known without generating.
    ///
    /// `None` for an invalid uniform count, a range whose length does not fit, or a
    /// parallel node whose children disagree.
    pub fn len_hint(&self) -> Option<usize> {
        match self {
            Sweep::SingleValue { .. } => Some(1),
            Sweep::List { values, .. } => Some(values.len()),
            Sweep::Range {
                start,
                end,
                increment,
                ..
            } => leaf::range_len(*start, *end, *increment),
            Sweep::UniformRandom { count, .. } => usize::try_from(*count).ok(),
            Sweep::Multiplicative(children) => {
                if children.is_empty() {
                    return Some(0);
                }
                children
                    .iter()
                    .try_fold(1usize, |acc, child| acc.checked_mul(child.len_hint()?))
            }
            Sweep::Parallel(children) => {
                let mut lens = children.iter().map(Sweep::len_hint);
                let first = match lens.next() {
                    Some(first) => first?,
                    None => return Some(0),
                };
                for len in lens {
                    if len? != first {
                        return None;
                    }
                }
                Some(first)
            }
        }
    }

    /// Generate the ordered assignments of this sweep.
    ///
    /// `rng` is only drawn from by uniform random leaves, in left-to-right tree order.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Assignment>> {
        self.generate_with_mode(rng, GenerationMode::Strict)
    }

    /// Generate with an explicit root mode.
    ///
    /// [`GenerationMode::OverrideDefaults`] only affects a multiplicative root;
    /// nested nodes are always generated strictly.
    pub fn generate_with_mode<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        mode: GenerationMode,
    ) -> Result<Vec<Assignment>> {
        match self {
            Sweep::SingleValue { name, value } => {
                trace!(param = %name, "single value");
                Ok(vec![Assignment::single(name, value.clone())])
            }
            Sweep::List { name, values } => Ok(leaf::list(name, values)),
            Sweep::Range {
                name,
                start,
                end,
                increment,
            } => leaf::range(name, *start, *end, *increment),
            Sweep::UniformRandom {
                name,
                low,
                high,
                count,
            } => leaf::uniform(name, *low, *high, *count, rng),
            Sweep::Multiplicative(children) => match mode {
                GenerationMode::Strict => {
                    let refs: Vec<&Sweep> = children.iter().collect();
                    combine::multiplicative(&refs, rng)
                }
                GenerationMode::OverrideDefaults => combine::with_defaults(children, rng),
            },
            Sweep::Parallel(children) => combine::parallel(children, rng),
        }
    }
}
