// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Identifier sanitization
//!
//! Strips backticks, the only character that can escape identifier
//! quoting. Everything else, surrounding whitespace included, is part of
//! the name. Sanitizing an already sanitized name returns it unchanged.

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::RenameError;

static BACKTICKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`+").expect("identifier pattern is valid"));

/// Remove backticks
pub fn sanitize_identifier(raw: &str) -> String {
    BACKTICKS.replace_all(raw, "").into_owned()
}

/// Sanitize a name, rejecting it if only whitespace remains
pub fn sanitize_name(role: &'static str, raw: &str) -> Result<String, RenameError> {
    let sanitized = sanitize_identifier(raw);
    if sanitized.trim().is_empty() {
        return Err(RenameError::InvalidName {
            role,
            name: raw.to_string(),
            reason: "empty after sanitization".to_string(),
        });
    }
    Ok(sanitized)
}
