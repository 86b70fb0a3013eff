//! Combination strategies for sweep trees
//!
//! Both strategies merge child assignments with [`Assignment::merge`], so a
//! parameter assigned by two siblings is rejected the same way everywhere.

use rand::Rng;
use tracing::debug;

use crate::error::{Result, SweepError};
use crate::sweep::value::Assignment;
use crate::sweep::Sweep;

/// Cartesian product of `children`, last child varying fastest.
///
/// Zero children, or any child generating nothing, yields no assignments.
pub(crate) fn multiplicative<R: Rng + ?Sized>(
    children: &[&Sweep],
    rng: &mut R,
) -> Result<Vec<Assignment>> {
    let result = product(children, rng)?;
    debug!(
        children = children.len(),
        assignments = result.len(),
        "multiplicative combination"
    );
    Ok(result)
}

fn product<R: Rng + ?Sized>(children: &[&Sweep], rng: &mut R) -> Result<Vec<Assignment>> {
    let (first, rest) = match children.split_first() {
        Some(split) => split,
        None => return Ok(Vec::new()),
    };

    let head = first.generate(rng)?;
    if rest.is_empty() {
        return Ok(head);
    }

    let tail = product(rest, rng)?;
    let mut result = Vec::with_capacity(head.len() * tail.len());
    for a in &head {
        for b in &tail {
            result.push(a.merge(b)?);
        }
    }
    Ok(result)
}

/// Positional zip of `children`.
///
/// All children are generated before any merging; differing lengths fail with
/// [`SweepError::LengthMismatch`].
pub(crate) fn parallel<R: Rng + ?Sized>(
    children: &[Sweep],
    rng: &mut R,
) -> Result<Vec<Assignment>> {
    let generated = children
        .iter()
        .map(|child| child.generate(rng))
        .collect::<Result<Vec<_>>>()?;

    let expected = match generated.first() {
        Some(first) => first.len(),
        None => return Ok(Vec::new()),
    };
    for (child, assignments) in generated.iter().enumerate() {
        if assignments.len() != expected {
            return Err(SweepError::LengthMismatch {
                expected,
                found: assignments.len(),
                child,
            });
        }
    }

    let mut result = Vec::with_capacity(expected);
    for i in 0..expected {
        let mut combined = Assignment::new();
        for assignments in &generated {
            combined = combined.merge(&assignments[i])?;
        }
        result.push(combined);
    }

    debug!(
        children = children.len(),
        assignments = result.len(),
        "parallel combination"
    );
    Ok(result)
}

/// Multiplicative generation where single-value children act as defaults.
///
/// The product runs over the remaining children; each default then fills its
/// parameter in every assignment that does not already carry it.
pub(crate) fn with_defaults<R: Rng + ?Sized>(
    children: &[Sweep],
    rng: &mut R,
) -> Result<Vec<Assignment>> {
    if children.is_empty() {
        return Ok(Vec::new());
    }

    let mut defaults = Assignment::new();
    let mut dimensions = Vec::new();
    for child in children {
        match child {
            Sweep::SingleValue { name, value } => defaults.insert(name, value.clone())?,
            other => dimensions.push(other),
        }
    }

    let mut result = if dimensions.is_empty() {
        vec![Assignment::new()]
    } else {
        product(&dimensions, rng)?
    };
    for assignment in &mut result {
        for (name, value) in &defaults {
            assignment.fill_default(name, value);
        }
    }

    debug!(
        defaults = defaults.len(),
        dimensions = dimensions.len(),
        assignments = result.len(),
        "multiplicative combination with defaults"
    );
    Ok(result)
}
