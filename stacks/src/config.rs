use crate::grouping::{Delimiter, Position};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_REGION: &str = "eu-west-1";
pub const DEFAULT_EXPIRY_DAYS: i64 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudFormationConfig {
    pub region: String,
    pub profile: Option<String>,
}

impl Default for CloudFormationConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            profile: None,
        }
    }
}

impl CloudFormationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.region.is_empty() {
            return Err("Region cannot be empty".to_string());
        }

        if !self
            .region
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(format!(
                "Region '{}' may only contain lowercase letters, digits and dashes",
                self.region
            ));
        }

        if self.region.starts_with('-') || self.region.ends_with('-') {
            return Err(format!(
                "Region '{}' cannot start or end with a dash",
                self.region
            ));
        }

        if let Some(profile) = &self.profile {
            if profile.trim().is_empty() {
                return Err("Profile name cannot be empty".to_string());
            }
        }

        Ok(())
    }
}

/// How expired stacks are selected and grouped into environments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinderSettings {
    pub expiry_days: i64,
    pub position: Position,
    pub delimiter: Delimiter,
    pub excluded: HashSet<String>,
}

impl Default for FinderSettings {
    fn default() -> Self {
        Self {
            expiry_days: DEFAULT_EXPIRY_DAYS,
            position: Position::Prefix,
            delimiter: Delimiter::Hyphen,
            excluded: HashSet::new(),
        }
    }
}

impl FinderSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expiry_days(mut self, expiry_days: i64) -> Self {
        self.expiry_days = expiry_days;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_excluded<I, S>(mut self, excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(excluded.into_iter().map(Into::into));
        self
    }
}
