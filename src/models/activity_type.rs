// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Canonical activity types and alias-merge configuration.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// Canonical activity type used as an aggregation key.
///
/// Well-known Strava types get their own variant; anything else is kept
/// verbatim in `Other` and forms its own bucket.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActivityType {
    Run,
    Ride,
    VirtualRide,
    Swim,
    Walk,
    Hike,
    Other(String),
}

impl ActivityType {
    /// Map a label to its type. Unknown labels become `Other`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Run" => Self::Run,
            "Ride" => Self::Ride,
            "VirtualRide" => Self::VirtualRide,
            "Swim" => Self::Swim,
            "Walk" => Self::Walk,
            "Hike" => Self::Hike,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Run => "Run",
            Self::Ride => "Ride",
            Self::VirtualRide => "VirtualRide",
            Self::Swim => "Swim",
            Self::Walk => "Walk",
            Self::Hike => "Hike",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ActivityType {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl Serialize for ActivityType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActivityType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

/// Folds a set of raw labels into one canonical type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRule {
    pub canonical: ActivityType,
    pub absorbs: BTreeSet<String>,
}

impl AliasRule {
    pub fn new<I, S>(canonical: ActivityType, absorbs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            canonical,
            absorbs: absorbs.into_iter().map(Into::into).collect(),
        }
    }
}

/// Alias-merge policy supplied by the caller on every aggregation.
///
/// Rules are ordered; if two rules absorb the same raw label the first one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAliasConfig {
    #[serde(default)]
    rules: Vec<AliasRule>,
}

impl TypeAliasConfig {
    /// Empty configuration: every raw label is its own bucket.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, rule: AliasRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Merge VirtualRide into Ride.
    pub fn combine_rides(self) -> Self {
        self.with_rule(AliasRule::new(ActivityType::Ride, ["Ride", "VirtualRide"]))
    }

    /// Merge Walk into Run.
    pub fn combine_runs(self) -> Self {
        self.with_rule(AliasRule::new(ActivityType::Run, ["Run", "Walk"]))
    }

    /// Build from the two dashboard toggles.
    pub fn from_flags(combine_rides: bool, combine_runs: bool) -> Self {
        let mut config = Self::new();
        if combine_rides {
            config = config.combine_rides();
        }
        if combine_runs {
            config = config.combine_runs();
        }
        config
    }

    pub fn rules(&self) -> &[AliasRule] {
        &self.rules
    }
}
