// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity type normalization under an alias-merge policy.
//!
//! Aggregation and goal lookup must share one normalizer; otherwise a goal
//! silently matches nothing.

use std::collections::HashMap;

use crate::models::{ActivityType, TypeAliasConfig};

/// Maps raw activity labels to canonical types.
#[derive(Debug, Clone, Default)]
pub struct TypeNormalizer {
    config: TypeAliasConfig,
    aliases: HashMap<String, ActivityType>,
}

impl TypeNormalizer {
    pub fn new(config: TypeAliasConfig) -> Self {
        let mut aliases = HashMap::new();
        for rule in config.rules() {
            for raw in &rule.absorbs {
                aliases
                    .entry(raw.clone())
                    .or_insert_with(|| rule.canonical.clone());
            }
        }
        Self { config, aliases }
    }

    /// Canonical type for a raw label. Unmapped labels pass through.
    pub fn normalize(&self, raw: &str) -> ActivityType {
        self.aliases
            .get(raw)
            .cloned()
            .unwrap_or_else(|| ActivityType::from_label(raw))
    }

    /// Canonical type for an already-typed label (e.g. a goal's type).
    pub fn normalize_type(&self, activity_type: &ActivityType) -> ActivityType {
        self.normalize(activity_type.as_str())
    }

    pub fn config(&self) -> &TypeAliasConfig {
        &self.config
    }
}
