//! Generation for single-parameter sweeps

use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use tracing::trace;

use crate::error::{Result, SweepError};
use crate::sweep::decimal::ExactDecimal;
use crate::sweep::value::{Assignment, ParamValue};

/// One assignment per value, in list order.
pub(crate) fn list(name: &str, values: &[ParamValue]) -> Vec<Assignment> {
    trace!(param = %name, count = values.len(), "list sweep");
    values
        .iter()
        .map(|value| Assignment::single(name, value.clone()))
        .collect()
}

pub(crate) fn range(
    name: &str,
    start: ExactDecimal,
    end: ExactDecimal,
    increment: ExactDecimal,
) -> Result<Vec<Assignment>> {
    let values = range_values(start, end, increment).map_err(|e| match e {
        SweepError::InvalidArgument(reason) => {
            SweepError::InvalidArgument(format!("range sweep '{}': {}", name, reason))
        }
        other => other,
    })?;
    trace!(param = %name, count = values.len(), "range sweep");
    Ok(values
        .into_iter()
        .map(|value| Assignment::single(name, ParamValue::Decimal(value)))
        .collect())
}

/// Largest number of values a single range sweep may produce.
pub const MAX_RANGE_VALUES: usize = 10_000_000;

/// Number of values in the progression, `floor(|end - start| / |increment|) + 1`.
///
/// A zero increment counts `start` and, when it differs, `end`. `None` when the
/// span or the count does not fit.
pub fn range_len(start: ExactDecimal, end: ExactDecimal, increment: ExactDecimal) -> Option<usize> {
    let step = increment.abs();
    if step.is_zero() {
        return Some(if start == end { 1 } else { 2 });
    }

    let span = end.inner().checked_sub(start.inner())?.abs();
    span.checked_div(step.inner())?
        .floor()
        .to_usize()?
        .checked_add(1)
}

/// Values of an inclusive arithmetic progression from `start` towards `end`.
///
/// The increment is taken by absolute value and applied in the direction of
/// `end`. A zero increment yields `start`, followed by `end` when it differs.
/// Progressions longer than [`MAX_RANGE_VALUES`] are rejected before any
/// value is built.
///
/// # Examples
///
/// ```
/// use sweepcase_rs::sweep::ExactDecimal;
/// use sweepcase_rs::sweep::leaf::range_values;
///
/// let d = |s: &str| ExactDecimal::parse(s).unwrap();
/// let values = range_values(d("1"), d("0"), d("-0.25")).unwrap();
/// assert_eq!(values, vec![d("1"), d("0.75"), d("0.5"), d("0.25"), d("0")]);
///
/// assert!(range_values(d("0"), d("1"), d("1e-20")).is_err());
/// ```
pub fn range_values(
    start: ExactDecimal,
    end: ExactDecimal,
    increment: ExactDecimal,
) -> Result<Vec<ExactDecimal>> {
    let count = range_len(start, end, increment)
        .filter(|count| *count <= MAX_RANGE_VALUES)
        .ok_or_else(|| {
            SweepError::InvalidArgument(format!(
                "{}:{}:{} produces more than {} values",
                start, increment, end, MAX_RANGE_VALUES
            ))
        })?;

    let step = increment.abs();
    if step.is_zero() {
        return Ok(if start == end {
            vec![start]
        } else {
            vec![start, end]
        });
    }

    let ascending = start <= end;
    let mut values = Vec::with_capacity(count);
    let mut current = start;
    while values.len() < count {
        let inside = if ascending { current <= end } else { current >= end };
        if !inside {
            break;
        }
        values.push(current);
        let next = if ascending {
            current.checked_add(step)
        } else {
            current.checked_sub(step)
        };
        match next {
            Some(next) => current = next,
            None => break,
        }
    }
    Ok(values)
}

/// `count` draws uniform over `[low, high)`, one `gen::<f64>()` call per draw.
pub(crate) fn uniform<R: Rng + ?Sized>(
    name: &str,
    low: f64,
    high: f64,
    count: i64,
    rng: &mut R,
) -> Result<Vec<Assignment>> {
    let count = usize::try_from(count).map_err(|_| {
        SweepError::InvalidArgument(format!(
            "uniform sweep '{}' has negative sample count {}",
            name, count
        ))
    })?;
    trace!(param = %name, count, low, high, "uniform random sweep");

    let width = high - low;
    Ok((0..count)
        .map(|_| {
            let u: f64 = rng.gen();
            Assignment::single(name, ParamValue::Float(low + u * width))
        })
        .collect())
}
