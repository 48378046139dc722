//! Null markers in text sources

use serde::{Deserialize, Serialize};

/// Which raw cell texts load as null
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NullConfig {
    /// Cell texts treated as null
    pub patterns: Vec<String>,

    /// Trim surrounding whitespace before matching
    pub trim_whitespace: bool,

    /// Match patterns case-sensitively
    pub case_sensitive: bool,
}

impl Default for NullConfig {
    fn default() -> Self {
        Self {
            patterns: ["", "-", "N/A", "NA", "null", "None", "NaN"]
                .iter()
                .map(|pattern| pattern.to_string())
                .collect(),
            trim_whitespace: true,
            case_sensitive: false,
        }
    }
}

impl NullConfig {
    /// Configuration where only the listed texts are null
    pub fn with_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Check if a cell text should load as null
    pub fn is_null(&self, value: &str) -> bool {
        let value = if self.trim_whitespace { value.trim() } else { value };

        self.patterns.iter().any(|pattern| {
            if self.case_sensitive {
                value == pattern
            } else {
                value.eq_ignore_ascii_case(pattern)
            }
        })
    }

    /// The cell text to load, or `None` when it is a null marker
    pub fn clean<'a>(&self, value: &'a str) -> Option<&'a str> {
        if self.is_null(value) {
            return None;
        }
        Some(if self.trim_whitespace { value.trim() } else { value })
    }

    pub fn add_pattern(&mut self, pattern: impl Into<String>) {
        let pattern = pattern.into();
        if !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
    }

    pub fn remove_pattern(&mut self, pattern: &str) {
        self.patterns.retain(|p| p != pattern);
    }

    pub fn clear_patterns(&mut self) {
        self.patterns.clear();
    }
}
