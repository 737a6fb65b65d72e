// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Rename result returned to callers

use serde::{Deserialize, Serialize};

use crate::exec::RunStats;
use crate::schema::SchemaImpact;

/// Run statistics plus the schema definitions left referencing the old name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameResult {
    #[serde(flatten)]
    pub stats: RunStats,
    pub constraints: Vec<String>,
    pub indexes: Vec<String>,
}

impl RenameResult {
    pub fn new(stats: RunStats, impact: SchemaImpact) -> Self {
        Self {
            stats,
            constraints: impact.constraints,
            indexes: impact.indexes,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flattened_serialization() {
        let mut stats = RunStats::default();
        stats.total = 3;
        stats.committed_operations = 3;
        let result = RenameResult::new(
            stats,
            SchemaImpact {
                constraints: vec!["Constraint( name='c' )".into()],
                indexes: Vec::new(),
            },
        );

        let json = result.to_json();
        assert_eq!(json["total"], 3);
        assert_eq!(json["committedOperations"], 3);
        assert_eq!(json["constraints"][0], "Constraint( name='c' )");
        assert!(json["indexes"].as_array().unwrap().is_empty());

        let back: RenameResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }
}
