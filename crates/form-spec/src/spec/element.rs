use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::layout::{LayoutItem, get_cols};
use crate::spec::choice::Choice;
use crate::spec::is_zero;
use crate::spec::language::Language;

pub const FIELDSET: &str = "fieldset";
pub const LANGSET: &str = "langset";
pub const STATIC: &str = "static";
pub const DISABLED: &str = "disabled";
pub const READONLY: &str = "readonly";

/// Structural classification of an element `type` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Field,
    FieldSet,
    LangSet,
}

impl ElementKind {
    pub fn from_type(kind: &str) -> Self {
        match kind {
            FIELDSET => ElementKind::FieldSet,
            LANGSET => ElementKind::LangSet,
            _ => ElementKind::Field,
        }
    }

    /// Fieldsets and langsets are sets; everything else is a leaf field.
    pub fn is_set(self) -> bool {
        !matches!(self, ElementKind::Field)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Field => "field",
            ElementKind::FieldSet => FIELDSET,
            ElementKind::LangSet => LANGSET,
        }
    }
}

/// A node of the declarative form tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Element {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub label: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub label_cols: u32,
    #[serde(skip_serializing_if = "is_zero")]
    pub field_cols: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub label_classes: Vec<String>,
    pub value: String,
    /// Values bound per language id when the element sits under languages.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub lang_values: BTreeMap<String, String>,
    pub help_text: String,
    pub template: String,
    pub valid: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<Element>,
    pub format: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<Language>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
}

impl Element {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn fieldset(name: impl Into<String>) -> Self {
        Self::new(FIELDSET, name)
    }

    pub fn langset(name: impl Into<String>) -> Self {
        Self::new(LANGSET, name)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_cols(mut self, label_cols: u32, field_cols: u32) -> Self {
        self.label_cols = label_cols;
        self.field_cols = field_cols;
        self
    }

    pub fn element_kind(&self) -> ElementKind {
        ElementKind::from_type(&self.kind)
    }

    pub fn is_set(&self) -> bool {
        self.element_kind().is_set()
    }

    pub fn cols(&self) -> u32 {
        get_cols(self.label_cols, self.field_cols)
    }

    /// Case-insensitive check for any of `keys` among the attribute keys.
    pub fn has_attr(&self, keys: &[&str]) -> bool {
        self.attributes.iter().any(|attr| {
            attr.first()
                .filter(|key| !key.is_empty())
                .is_some_and(|key| keys.iter().any(|wanted| key.eq_ignore_ascii_case(wanted)))
        })
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.first().is_some_and(|k| k.eq_ignore_ascii_case(key)))
            .and_then(|attr| attr.get(1))
            .map(String::as_str)
    }

    /// Value bound for `lang_id`, falling back to the unscoped value.
    pub fn value_for(&self, lang_id: &str) -> &str {
        self.lang_values
            .get(lang_id)
            .map(String::as_str)
            .unwrap_or(self.value.as_str())
    }

    pub fn add_element(&mut self, element: Element) -> &mut Self {
        self.elements.push(element);
        self
    }

    pub fn add_language(&mut self, language: Language) -> &mut Self {
        self.languages.push(language);
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

    pub fn add_choice(&mut self, choice: Choice) -> &mut Self {
        self.choices.push(choice);
        self
    }

    pub fn add_label_class(&mut self, class: impl Into<String>) -> &mut Self {
        self.label_classes.push(class.into());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

impl LayoutItem for Element {
    fn cols(&self) -> u32 {
        Element::cols(self)
    }

    fn element_kind(&self) -> ElementKind {
        Element::element_kind(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_classifies_structural_markers() {
        assert_eq!(ElementKind::from_type("fieldset"), ElementKind::FieldSet);
        assert_eq!(ElementKind::from_type("langset"), ElementKind::LangSet);
        assert_eq!(ElementKind::from_type("text"), ElementKind::Field);
        assert!(!ElementKind::Field.is_set());
    }

    #[test]
    fn has_attr_ignores_case_and_blank_keys() {
        let mut element = Element::new("text", "title");
        element.add_attribute(Vec::<String>::new());
        element.add_attribute(["ReadOnly"]);
        assert!(element.has_attr(&[DISABLED, READONLY]));
        assert!(!element.has_attr(&["required"]));
    }

    #[test]
    fn cols_defaults_apply_per_call() {
        let element = Element::new("text", "a").with_cols(0, 4);
        assert_eq!(element.cols(), 6);
        assert_eq!(element.label_cols, 0);
    }

    #[test]
    fn value_for_falls_back_to_unscoped_value() {
        let mut element = Element::new("text", "title");
        element.value = "plain".into();
        element.lang_values.insert("en".into(), "english".into());
        assert_eq!(element.value_for("en"), "english");
        assert_eq!(element.value_for("fr"), "plain");
    }
}
