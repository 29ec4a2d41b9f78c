use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One selectable option of a choice-based element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Choice {
    /// Optgroup label; empty for ungrouped options.
    pub group: String,
    /// `[value, text]`.
    pub option: Vec<String>,
    pub checked: bool,
}

impl Choice {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            group: String::new(),
            option: vec![value.into(), text.into()],
            checked: false,
        }
    }

    pub fn grouped(
        group: impl Into<String>,
        value: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            ..Self::new(value, text)
        }
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn value(&self) -> &str {
        self.option.first().map(String::as_str).unwrap_or_default()
    }

    /// Display text, falling back to the value when no text was given.
    pub fn text(&self) -> &str {
        self.option
            .get(1)
            .map(String::as_str)
            .unwrap_or_else(|| self.value())
    }
}
