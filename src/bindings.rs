use std::collections::HashMap;
use std::str::FromStr;

use log::debug;
use serde::Deserialize;

use crate::arithmetic::format_number;
use crate::error::{ExpressionError, Result};
use crate::stack::Token;

/// One `{"key": "age", "value": 18}` entry of a binding list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Binding {
    pub key: String,
    pub value: f64,
}

/// Variable values keyed by name. A later entry for the same name wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: HashMap<String, f64>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a JSON array of [`Binding`] records.
    pub fn from_json(list: &str) -> Result<Self> {
        let entries: Vec<Binding> = serde_json::from_str(list)?;
        debug!("Decoded {} binding(s)", entries.len());
        Ok(entries.into_iter().collect())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replaces each bound identifier with a number token holding its value.
    /// Unbound identifiers pass through untouched.
    pub fn resolve(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .map(|token| match token {
                Token::Identifier(name) => match self.get(&name) {
                    Some(value) => {
                        debug!("Resolved {} = {}", name, value);
                        Token::Number(format_number(value))
                    }
                    None => Token::Identifier(name),
                },
                other => other,
            })
            .collect()
    }
}

impl FromIterator<Binding> for Bindings {
    fn from_iter<I: IntoIterator<Item = Binding>>(iter: I) -> Self {
        let mut bindings = Bindings::new();
        for Binding { key, value } in iter {
            bindings.insert(key, value);
        }
        bindings
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut bindings = Bindings::new();
        for (key, value) in iter {
            bindings.insert(key, value);
        }
        bindings
    }
}

impl From<HashMap<String, f64>> for Bindings {
    fn from(values: HashMap<String, f64>) -> Self {
        Self { values }
    }
}

impl FromStr for Bindings {
    type Err = ExpressionError;

    fn from_str(list: &str) -> Result<Self> {
        Bindings::from_json(list)
    }
}
