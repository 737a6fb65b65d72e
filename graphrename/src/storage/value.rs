// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Value type system for graph properties
//!
//! Property values are moved between keys verbatim during a rename, so the
//! variants here are kept distinct (an integer never collapses into a float).

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value types for graph node and edge properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    String(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    DateTimeWithFixedOffset(DateTime<FixedOffset>),
    List(Vec<Value>),
    Vector(Vec<f32>),
    Null,
}

impl Value {
    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "String",
            Value::Integer(_) => "Integer",
            Value::Number(_) => "Number",
            Value::Boolean(_) => "Boolean",
            Value::DateTime(_) => "DateTime",
            Value::DateTimeWithFixedOffset(_) => "DateTimeWithOffset",
            Value::List(_) => "List",
            Value::Vector(_) => "Vector",
            Value::Null => "Null",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Number(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S UTC")),
            Value::DateTimeWithFixedOffset(dt) => {
                write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S %:z"))
            }
            Value::List(list) => {
                write!(f, "[")?;
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Vector(vec) => {
                write!(f, "VECTOR[")?;
                for (i, item) in vec.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_and_number_stay_distinct() {
        assert_ne!(Value::Integer(1), Value::Number(1.0));
        assert_eq!(Value::from(1i64).type_name(), "Integer");
        assert_eq!(Value::from(1.0).type_name(), "Number");
    }

    #[test]
    fn test_display_list() {
        let v = Value::List(vec![Value::from("a"), Value::Integer(2), Value::Null]);
        assert_eq!(v.to_string(), "[\"a\", 2, null]");
    }
}
