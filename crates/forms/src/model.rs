//! Declarative field tables for deriving forms from data types.
//!
//! A type describes its fields once through [`FormModel`]; the table decides
//! widgets, labels, fieldset membership and ordering, and the instance
//! supplies the current values.

use std::collections::BTreeMap;

use form_spec::{Config, Element};
use serde::{Deserialize, Serialize};

use crate::builder::{Form, FormBuilder};

/// Data type of a described field, used to pick a default widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    #[default]
    Text,
    Bool,
    DateTime,
    Int,
    Float,
}

impl FieldKind {
    pub fn default_widget(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Bool => "checkbox",
            FieldKind::DateTime => "datetime",
            FieldKind::Int | FieldKind::Float => "number",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    /// Explicit widget type; the kind's default widget otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fieldset: Option<String>,
    /// Position hint: an index, a negative offset from the end, or `last`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<String>,
    pub skip: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn widget(mut self, widget: impl Into<String>) -> Self {
        self.widget = Some(widget.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn fieldset(mut self, fieldset: impl Into<String>) -> Self {
        self.fieldset = Some(fieldset.into());
        self
    }

    pub fn sort(mut self, position: impl Into<String>) -> Self {
        self.sort = Some(position.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn valid(mut self, rules: impl Into<String>) -> Self {
        self.valid = Some(rules.into());
        self
    }

    pub fn skip(mut self) -> Self {
        self.skip = true;
        self
    }

    fn widget_type(&self) -> &str {
        self.widget
            .as_deref()
            .unwrap_or_else(|| self.kind.default_widget())
    }

    fn display_label(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => title_case(self.name.rsplit('.').next().unwrap_or(&self.name)),
        }
    }

    fn to_element(&self, value: Option<String>) -> Element {
        let mut element =
            Element::new(self.widget_type(), self.name.as_str()).with_label(self.display_label());
        for (key, param) in &self.params {
            element.add_attribute([key.as_str(), param.as_str()]);
        }
        if let Some(valid) = &self.valid {
            element.valid = valid.clone();
        }
        if let Some(value) = value {
            element.value = value;
        }
        element
    }
}

/// A data type that can describe itself as a form.
pub trait FormModel {
    fn fields() -> Vec<FieldDescriptor>;

    /// Current value of the named field, if any.
    fn value(&self, name: &str) -> Option<String>;
}

pub fn config_from_model<M: FormModel>(model: &M) -> Config {
    config_from_descriptors(&M::fields(), |name| model.value(name))
}

/// Builds a configuration from a descriptor table.
///
/// Fieldset members are collected into `fieldset` elements that follow the
/// ungrouped fields, in order of first appearance. Submit and reset buttons
/// are always appended.
pub fn config_from_descriptors<F>(descriptors: &[FieldDescriptor], mut value: F) -> Config
where
    F: FnMut(&str) -> Option<String>,
{
    let mut config = Config::default();
    let mut fieldsets: Vec<Element> = Vec::new();
    for descriptor in descriptors.iter().filter(|d| !d.skip) {
        let element = descriptor.to_element(value(&descriptor.name));
        match &descriptor.fieldset {
            Some(name) => match fieldsets.iter_mut().find(|set| &set.name == name) {
                Some(set) => {
                    set.add_element(element);
                }
                None => {
                    let mut set = Element::fieldset(name.as_str()).with_label(name.as_str());
                    set.add_element(element);
                    fieldsets.push(set);
                }
            },
            None => {
                config.add_element(element);
            }
        }
    }
    for set in fieldsets {
        config.add_element(set);
    }
    config.with_buttons = true;
    config.add_button("submit").add_button("reset");
    config
}

/// Builds the form for `model` and applies the descriptors' sort hints.
pub fn form_from_model<M: FormModel>(model: &M, builder: &FormBuilder) -> Form {
    let descriptors = M::fields();
    let config = config_from_model(model);
    let mut form = builder.build(&config);

    let mut top_level = Vec::new();
    let mut per_fieldset: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for descriptor in descriptors.iter().filter(|d| !d.skip) {
        let Some(position) = &descriptor.sort else {
            continue;
        };
        let entry = format!("{}:{}", descriptor.name, position);
        match &descriptor.fieldset {
            Some(set) => per_fieldset.entry(set.as_str()).or_default().push(entry),
            None => top_level.push(entry),
        }
    }
    for (set, entries) in per_fieldset {
        if let Some(fieldset) = form.fieldset_mut(set) {
            fieldset.sort(&entries.join(","));
        }
    }
    if !top_level.is_empty() {
        form.sort(&top_level.join(","));
    }
    form
}

fn title_case(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
