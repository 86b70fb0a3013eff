//! Command-line sweep expressions
//!
//! A sweep expression has the form `<names> = <values>`:
//!
//! | Expression | Sweep |
//! |------------|-------|
//! | `alpha=0.5` | single value |
//! | `alpha=0.1,0.2,0.3` | list |
//! | `alpha=0:0.5:2` | range, `start:increment:end` |
//! | `a b = 1 x, 2 y, 3 z` | parallel lists, one column per name |
//! | `a b = 1, 2, 3 x, y, z` | parallel lists, boundary values shared between names |
//! | `a b = 0:1:3 10:5:25` | parallel ranges, end and next start share a piece |
//!
//! A backslash escapes the next character, so `note=a\,b` is the single value `a,b`
//! and `a\ b=1` names one parameter `a b`. A value that does not split into
//! exactly three `:` pieces is taken as text, so `time=12:30` is a single value.
//! Anything that does not match one of these forms is rejected with
//! [`SweepError::InvalidSweepExpression`]; nothing is coerced.

pub mod args;

pub use args::SweepArgs;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{anychar, char},
    combinator::{all_consuming, recognize},
    multi::{fold_many0, many0, many1, separated_list0, separated_list1},
    number::complete::recognize_float,
    sequence::{delimited, preceded},
    IResult, Parser,
};
use tracing::trace;

use crate::error::{Result, SweepError};
use crate::sweep::{ExactDecimal, ParamValue, Sweep};

/// Parse a sweep expression into a sweep tree.
///
/// # Examples
///
/// ```
/// use sweepcase_rs::grammar::parse_sweep_expression;
/// use sweepcase_rs::sweep::Sweep;
///
/// let sweep = parse_sweep_expression("alpha=0.1,0.2,0.3").unwrap();
/// assert_eq!(
///     sweep,
///     Sweep::list("alpha", vec!["0.1".into(), "0.2".into(), "0.3".into()])
/// );
///
/// assert!(parse_sweep_expression("alpha").is_err());
/// assert!(parse_sweep_expression("a=1=2").is_err());
/// ```
pub fn parse_sweep_expression(arg: &str) -> Result<Sweep> {
    let sides = split_unescaped(arg, arg, '=')?;
    if sides.len() != 2 {
        return Err(SweepError::invalid_expression(
            arg,
            format!("expected exactly one '=', found {}", sides.len() - 1),
        ));
    }

    let right = sides[1].trim();
    if right.is_empty() {
        return Err(SweepError::invalid_expression(arg, "missing value"));
    }

    let names = split_words(arg, sides[0])?
        .into_iter()
        .map(|word| unescape(arg, word))
        .collect::<Result<Vec<_>>>()?;
    let sweep = match names.as_slice() {
        [] => return Err(SweepError::invalid_expression(arg, "missing parameter name")),
        [name] => single_parameter(arg, name, right)?,
        _ => multi_parameter(arg, &names, right)?,
    };
    trace!(expression = %arg, names = ?names, "parsed sweep expression");
    Ok(sweep)
}

fn single_parameter(arg: &str, name: &str, right: &str) -> Result<Sweep> {
    if let [start, increment, end] = split_unescaped(arg, right, ':')?.as_slice() {
        let start = number(arg, start)?;
        let increment = number(arg, increment)?;
        let end = number(arg, end)?;
        return Ok(Sweep::range(name, start, end, increment));
    }

    let mut values = split_unescaped(arg, right, ',')?
        .into_iter()
        .map(|piece| text_value(arg, piece))
        .collect::<Result<Vec<_>>>()?;
    if values.len() == 1 {
        Ok(Sweep::single(name, values.remove(0)))
    } else {
        Ok(Sweep::list(name, values))
    }
}

fn multi_parameter(arg: &str, names: &[String], right: &str) -> Result<Sweep> {
    let pieces = split_unescaped(arg, right, ':')?;
    if pieces.len() > 1 {
        parallel_ranges(arg, names, &pieces)
    } else {
        parallel_lists(arg, names, right)
    }
}

/// `a b = s1:i1:e1 s2:i2:e2` splits on `:` into `s1`, `i1`, `e1 s2`, `i2`, `e2`.
fn parallel_ranges(arg: &str, names: &[String], pieces: &[&str]) -> Result<Sweep> {
    let expected = 2 * names.len() + 1;
    if pieces.len() != expected {
        return Err(SweepError::invalid_expression(
            arg,
            format!(
                "{} parallel ranges need {} ':'-separated pieces, found {}",
                names.len(),
                expected,
                pieces.len()
            ),
        ));
    }

    let mut ranges = Vec::with_capacity(names.len());
    let mut start = number(arg, pieces[0])?;
    for (k, name) in names.iter().enumerate() {
        let increment = number(arg, pieces[2 * k + 1])?;
        let boundary = split_words(arg, pieces[2 * k + 2])?;
        let last = k + 1 == names.len();

        let end = match (boundary.as_slice(), last) {
            ([end], true) => number(arg, end)?,
            ([end, next_start], false) => {
                let end = number(arg, end)?;
                let next = number(arg, next_start)?;
                ranges.push(Sweep::range(name, start, end, increment));
                start = next;
                continue;
            }
            _ => {
                return Err(SweepError::invalid_expression(
                    arg,
                    format!("malformed range boundary '{}'", pieces[2 * k + 2].trim()),
                ))
            }
        };
        ranges.push(Sweep::range(name, start, end, increment));
    }
    Ok(Sweep::parallel(ranges))
}

fn parallel_lists(arg: &str, names: &[String], right: &str) -> Result<Sweep> {
    let groups = split_unescaped(arg, right, ',')?
        .into_iter()
        .map(|group| {
            let tokens = split_words(arg, group)?
                .into_iter()
                .map(|word| unescape(arg, word))
                .collect::<Result<Vec<_>>>()?;
            if tokens.is_empty() {
                Err(SweepError::invalid_expression(arg, "empty value"))
            } else {
                Ok(tokens)
            }
        })
        .collect::<Result<Vec<_>>>()?;

    let columns = if groups.iter().all(|tokens| tokens.len() == names.len()) {
        column_major(names.len(), groups)
    } else {
        shared_boundaries(arg, names.len(), groups)?
    };

    Ok(Sweep::parallel(
        names
            .iter()
            .zip(columns)
            .map(|(name, values)| {
                Sweep::list(name, values.into_iter().map(ParamValue::Text).collect())
            })
            .collect(),
    ))
}

/// `a b = a1 b1, a2 b2`: each group holds one value per name.
fn column_major(width: usize, groups: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let mut columns = vec![Vec::with_capacity(groups.len()); width];
    for group in groups {
        for (column, token) in columns.iter_mut().zip(group) {
            column.push(token);
        }
    }
    columns
}

/// `a b = a1, a2, a3 b1, b2, b3`: each name's list follows the previous one,
/// with the last value of one and the first of the next sharing a group.
fn shared_boundaries(arg: &str, width: usize, groups: Vec<Vec<String>>) -> Result<Vec<Vec<String>>> {
    let count = groups.len();
    if (count - 1) % width != 0 {
        return Err(SweepError::invalid_expression(
            arg,
            format!(
                "{} comma-separated groups cannot split evenly across {} parameters",
                count, width
            ),
        ));
    }
    let num_values = (count - 1) / width + 1;

    let mut columns: Vec<Vec<String>> = vec![Vec::with_capacity(num_values); width];
    let mut current = 0;
    for group in groups {
        let mut tokens = group.into_iter();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(value), None, None) => columns[current].push(value),
            (Some(tail), Some(head), None) if current + 1 < width => {
                columns[current].push(tail);
                current += 1;
                columns[current].push(head);
            }
            _ => {
                return Err(SweepError::invalid_expression(
                    arg,
                    "value groups match neither one value per parameter nor shared boundaries",
                ))
            }
        }
    }

    if current + 1 != width || columns.iter().any(|column| column.len() != num_values) {
        return Err(SweepError::invalid_expression(
            arg,
            format!(
                "expected {} values for each of {} parameters",
                num_values, width
            ),
        ));
    }
    Ok(columns)
}

/// Parse a numeric token exactly.
fn number(arg: &str, token: &str) -> Result<ExactDecimal> {
    let token = token.trim();
    if token.is_empty() {
        return Err(SweepError::invalid_expression(arg, "empty number"));
    }

    match recognize_float::<&str, nom::error::Error<&str>>(token) {
        Ok(("", lexeme)) => ExactDecimal::parse(lexeme)
            .map_err(|e| SweepError::invalid_expression(arg, e.to_string())),
        _ => Err(SweepError::invalid_expression(
            arg,
            format!("'{}' is not a number", token),
        )),
    }
}

fn text_value(arg: &str, piece: &str) -> Result<ParamValue> {
    let piece = piece.trim();
    if piece.is_empty() {
        return Err(SweepError::invalid_expression(arg, "empty value"));
    }
    Ok(ParamValue::Text(unescape(arg, piece)?))
}

/// `\` and the character after it.
fn escape(input: &str) -> IResult<&str, &str> {
    recognize(preceded(char('\\'), anychar)).parse(input)
}

/// Pieces between unescaped `sep`s, escapes left in place. Never fails.
fn pieces(input: &str, sep: char) -> IResult<&str, Vec<&str>> {
    let piece = recognize(many0(alt((
        escape,
        take_while1(move |c: char| c != sep && c != '\\'),
        tag("\\"),
    ))));
    separated_list1(char(sep), piece).parse(input)
}

/// Whitespace-separated words; an escaped space stays inside its word.
fn words(input: &str) -> IResult<&str, Vec<&str>> {
    let word = recognize(many1(alt((
        escape,
        take_while1(|c: char| !c.is_whitespace() && c != '\\'),
        tag("\\"),
    ))));
    delimited(
        take_while(|c: char| c.is_whitespace()),
        separated_list0(take_while1(|c: char| c.is_whitespace()), word),
        take_while(|c: char| c.is_whitespace()),
    )
    .parse(input)
}

fn unescaped(input: &str) -> IResult<&str, String> {
    fold_many0(
        alt((
            preceded(char('\\'), recognize(anychar)),
            take_while1(|c: char| c != '\\'),
            tag("\\"),
        )),
        String::new,
        |mut out, chunk: &str| {
            out.push_str(chunk);
            out
        },
    )
    .parse(input)
}

/// Run `parser` over the whole of `input`, reporting failure against `arg`.
fn tokenize<'a, O, P>(arg: &str, input: &'a str, parser: P) -> Result<O>
where
    P: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    all_consuming(parser)
        .parse(input)
        .map(|(_, out)| out)
        .map_err(|e| SweepError::invalid_expression(arg, e.to_string()))
}

/// Split `input` on every `sep` not preceded by a backslash.
///
/// Escapes are left in the pieces; [`unescape`] removes them.
pub(crate) fn split_unescaped<'a>(arg: &str, input: &'a str, sep: char) -> Result<Vec<&'a str>> {
    tokenize(arg, input, |i: &'a str| pieces(i, sep))
}

fn split_words<'a>(arg: &str, input: &'a str) -> Result<Vec<&'a str>> {
    tokenize(arg, input, words)
}

pub(crate) fn unescape(arg: &str, input: &str) -> Result<String> {
    tokenize(arg, input, unescaped)
}
