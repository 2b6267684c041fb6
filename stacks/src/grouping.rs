use crate::types::StackSummary;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Which end of a stack name carries the environment identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    Prefix,
    #[serde(rename = "sufix", alias = "suffix")]
    Suffix,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Prefix => f.write_str("prefix"),
            Position::Suffix => f.write_str("sufix"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Delimiter {
    #[serde(rename = "_")]
    Underscore,
    #[default]
    #[serde(rename = "-")]
    Hyphen,
}

impl Delimiter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Delimiter::Underscore => "_",
            Delimiter::Hyphen => "-",
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extracts the environment identifier from a single stack name.
pub fn environment_of<'a>(name: &'a str, position: Position, delimiter: &str) -> Option<&'a str> {
    let mut parts = name.split(delimiter);
    match position {
        Position::Prefix => parts.next(),
        Position::Suffix => parts.last(),
    }
}

/// Collects the distinct environment identifiers of `stacks` in the order
/// they are first seen, skipping any listed in `excluded`.
pub fn group_by_environment(
    stacks: &[StackSummary],
    position: Position,
    delimiter: &str,
    excluded: &HashSet<String>,
) -> Vec<String> {
    let mut environments = Vec::new();
    let mut seen = HashSet::new();

    for stack in stacks {
        let Some(environment) = environment_of(&stack.stack_name, position, delimiter) else {
            continue;
        };

        if excluded.contains(environment) {
            continue;
        }

        if seen.insert(environment) {
            environments.push(environment.to_string());
        }
    }

    environments
}
