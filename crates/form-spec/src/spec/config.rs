use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SpecError;
use crate::spec::element::Element;
use crate::spec::language::Language;

/// Root of a declarative form definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub id: String,
    pub theme: String,
    pub template: String,
    pub method: String,
    pub action: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Vec<String>>,
    pub with_buttons: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<String>,
    pub btns_template: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<Element>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<Language>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
    /// Prefix stripped from element names when the form is built.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub trim_name_prefix: String,
}

impl Config {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn add_element(&mut self, element: Element) -> &mut Self {
        self.elements.push(element);
        self
    }

    pub fn add_language(&mut self, language: Language) -> &mut Self {
        self.languages.push(language);
        self
    }

    pub fn add_button(&mut self, button: impl Into<String>) -> &mut Self {
        self.buttons.push(button.into());
        self
    }

    pub fn add_attribute<I, S>(&mut self, parts: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes
            .push(parts.into_iter().map(Into::into).collect());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// First structural problem of the definition, if any.
    pub fn validate(&self) -> Result<(), SpecError> {
        match self.problems().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Every duplicate leaf name (per nesting level) and malformed name format.
    pub fn problems(&self) -> Vec<SpecError> {
        let mut problems = Vec::new();
        check_languages(&self.languages, &mut problems);
        check_elements(&self.elements, &mut problems);
        problems
    }
}

fn check_languages(languages: &[Language], problems: &mut Vec<SpecError>) {
    for language in languages {
        if let Err(err) = language.name_format.validate(&language.id) {
            problems.push(err);
        }
    }
}

fn check_elements(elements: &[Element], problems: &mut Vec<SpecError>) {
    let mut seen = BTreeSet::new();
    for element in elements {
        check_languages(&element.languages, problems);
        if element.is_set() {
            check_elements(&element.elements, problems);
            continue;
        }
        if !element.name.is_empty() && !seen.insert(element.name.as_str()) {
            problems.push(SpecError::DuplicateName {
                name: element.name.clone(),
            });
        }
    }
}
