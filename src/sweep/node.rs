//! Structural export of sweep trees
//!
//! [`SweepNode`] mirrors [`Sweep`] one tag per variant, with the attribute
//! names external persistence formats use (`param`, `value`, `values`,
//! `start`/`end`/`increment`, `low`/`high`/`count`). A writer can walk it to
//! emit any format; a reader rebuilds the tree with [`Sweep::from_node`].

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{Result, SweepError};
use crate::sweep::decimal::ExactDecimal;
use crate::sweep::value::ParamValue;
use crate::sweep::Sweep;

/// A persisted sweep tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "lowercase")]
pub enum SweepNode {
    Single {
        param: String,
        value: ParamValue,
    },
    List {
        param: String,
        values: Vec<ParamValue>,
    },
    Range {
        param: String,
        start: ExactDecimal,
        end: ExactDecimal,
        increment: ExactDecimal,
    },
    Uniform {
        param: String,
        low: f64,
        high: f64,
        count: i64,
    },
    Multiplicative {
        children: Vec<SweepNode>,
    },
    Parallel {
        children: Vec<SweepNode>,
    },
}

impl SweepNode {
    /// The tag naming this node's variant.
    pub fn tag(&self) -> &'static str {
        match self {
            SweepNode::Single { .. } => "single",
            SweepNode::List { .. } => "list",
            SweepNode::Range { .. } => "range",
            SweepNode::Uniform { .. } => "uniform",
            SweepNode::Multiplicative { .. } => "multiplicative",
            SweepNode::Parallel { .. } => "parallel",
        }
    }

    /// Parameter name of a leaf node.
    pub fn param(&self) -> Option<&str> {
        match self {
            SweepNode::Single { param, .. }
            | SweepNode::List { param, .. }
            | SweepNode::Range { param, .. }
            | SweepNode::Uniform { param, .. } => Some(param),
            SweepNode::Multiplicative { .. } | SweepNode::Parallel { .. } => None,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save the tree to a JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json()?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Load a tree from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Self::from_json(&contents)
    }
}

impl Sweep {
    /// Export the tree structure.
    pub fn to_node(&self) -> SweepNode {
        match self {
            Sweep::SingleValue { name, value } => SweepNode::Single {
                param: name.clone(),
                value: value.clone(),
            },
            Sweep::List { name, values } => SweepNode::List {
                param: name.clone(),
                values: values.clone(),
            },
            Sweep::Range {
                name,
                start,
                end,
                increment,
            } => SweepNode::Range {
                param: name.clone(),
                start: *start,
                end: *end,
                increment: *increment,
            },
            Sweep::UniformRandom {
                name,
                low,
                high,
                count,
            } => SweepNode::Uniform {
                param: name.clone(),
                low: *low,
                high: *high,
                count: *count,
            },
            Sweep::Multiplicative(children) => SweepNode::Multiplicative {
                children: children.iter().map(Sweep::to_node).collect(),
            },
            Sweep::Parallel(children) => SweepNode::Parallel {
                children: children.iter().map(Sweep::to_node).collect(),
            },
        }
    }

    /// Rebuild a tree from its structural export.
    ///
    /// Fails with [`SweepError::InvalidNode`] when a leaf has a blank parameter name.
    pub fn from_node(node: &SweepNode) -> Result<Sweep> {
        if let Some(param) = node.param() {
            if param.trim().is_empty() {
                return Err(SweepError::InvalidNode(format!(
                    "'{}' node without a parameter name",
                    node.tag()
                )));
            }
        }

        Ok(match node {
            SweepNode::Single { param, value } => Sweep::single(param, value.clone()),
            SweepNode::List { param, values } => Sweep::list(param, values.clone()),
            SweepNode::Range {
                param,
                start,
                end,
                increment,
            } => Sweep::range(param, *start, *end, *increment),
            SweepNode::Uniform {
                param,
                low,
                high,
                count,
            } => Sweep::uniform(param, *low, *high, *count),
            SweepNode::Multiplicative { children } => Sweep::multiplicative(
                children
                    .iter()
                    .map(Sweep::from_node)
                    .collect::<Result<Vec<_>>>()?,
            ),
            SweepNode::Parallel { children } => Sweep::parallel(
                children
                    .iter()
                    .map(Sweep::from_node)
                    .collect::<Result<Vec<_>>>()?,
            ),
        })
    }
}
