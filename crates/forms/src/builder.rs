//! Turns a declarative [`Config`] into a renderable [`Form`].

use form_spec::{
    Config, Element, ElementKind, Field, FieldSet, FormElement, Groups, LangSet, Language,
};
use serde_json::{Map, Value};
use tracing::debug;

/// A built form: converted elements plus the document-level settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub id: String,
    pub theme: String,
    pub template: String,
    pub method: String,
    pub action: String,
    pub attributes: Vec<Vec<String>>,
    pub with_buttons: bool,
    pub buttons: Vec<String>,
    pub btns_template: String,
    /// Document-level languages, each indexing its qualified copy of every
    /// top-level element.
    pub languages: Vec<Language>,
    pub data: Map<String, Value>,
    root: FieldSet,
}

impl Form {
    pub fn elements(&self) -> &[FormElement] {
        self.root.elements()
    }

    pub fn element(&self, name: &str) -> Option<&FormElement> {
        self.root.element(name)
    }

    /// Leaf field by (trimmed) original name, anywhere in the tree.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.root.field(name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.root.field_mut(name)
    }

    pub fn groups(&self) -> Groups<'_, FormElement> {
        self.root.groups()
    }

    pub fn language(&self, id: &str) -> Option<&Language> {
        self.languages.iter().find(|lang| lang.id == id)
    }

    /// Attaches a validation error to a field; `false` when there is no such field.
    pub fn add_error(&mut self, name: &str, error: impl Into<String>) -> bool {
        match self.field_mut(name) {
            Some(field) => {
                field.add_error(error);
                true
            }
            None => false,
        }
    }

    pub fn sort(&mut self, spec: &str) -> &mut Self {
        self.root.sort(spec);
        self
    }

    pub fn sort_all(&mut self, names: &[&str]) -> &mut Self {
        self.root.sort_all(names);
        self
    }

    pub fn sort_to_last(&mut self, names: &[&str]) -> &mut Self {
        self.root.sort_to_last(names);
        self
    }

    pub(crate) fn fieldset_mut(&mut self, name: &str) -> Option<&mut FieldSet> {
        match self.root.element_mut(name) {
            Some(FormElement::FieldSet(set)) => Some(set),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormBuilder {
    theme: Option<String>,
}

impl FormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the theme named by the configuration.
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn build(&self, config: &Config) -> Form {
        let prefix = config.trim_name_prefix.as_str();
        let mut languages = config.languages.clone();
        let mut root = FieldSet::new("", "");
        root.template = config.template.clone();

        for element in &config.elements {
            let built = convert(element, prefix);
            for language in &mut languages {
                let copy = built.localized(language);
                language.add_field(copy);
            }
            root.add_element(built);
        }
        debug!(
            form = %config.id,
            elements = root.elements().len(),
            languages = languages.len(),
            "built form"
        );

        Form {
            id: config.id.clone(),
            theme: self.theme.clone().unwrap_or_else(|| config.theme.clone()),
            template: config.template.clone(),
            method: config.method.clone(),
            action: config.action.clone(),
            attributes: config.attributes.clone(),
            with_buttons: config.with_buttons,
            buttons: config.buttons.clone(),
            btns_template: config.btns_template.clone(),
            languages,
            data: config.data.clone(),
            root,
        }
    }
}

fn trim_name<'a>(name: &'a str, prefix: &str) -> &'a str {
    if prefix.is_empty() {
        return name;
    }
    name.strip_prefix(prefix).unwrap_or(name)
}

fn convert(element: &Element, prefix: &str) -> FormElement {
    let name = trim_name(&element.name, prefix);
    match element.element_kind() {
        ElementKind::Field => FormElement::Field(build_field(element, name)),
        ElementKind::FieldSet => {
            let mut set = FieldSet::new(name, element.label.as_str());
            set.label_cols = element.label_cols;
            set.field_cols = element.field_cols;
            set.help_text = element.help_text.clone();
            set.data = element.data.clone();
            if !element.template.is_empty() {
                set.template = element.template.clone();
            }
            for child in &element.elements {
                set.add_element(convert(child, prefix));
            }
            FormElement::FieldSet(set)
        }
        ElementKind::LangSet => {
            let mut set = LangSet::new(name, element.label.as_str());
            set.label_cols = element.label_cols;
            set.field_cols = element.field_cols;
            set.data = element.data.clone();
            if !element.template.is_empty() {
                set.template = element.template.clone();
            }
            for language in &element.languages {
                set.add_language(language.clone());
            }
            for child in &element.elements {
                set.add_element(convert(child, prefix));
            }
            FormElement::LangSet(set)
        }
    }
}

fn build_field(element: &Element, name: &str) -> Field {
    let mut field = Field::new(element.kind.as_str(), name)
        .with_label(element.label.as_str())
        .with_cols(element.label_cols, element.field_cols);
    field.id = element.id.clone();
    field.label_classes = element.label_classes.clone();
    field.help_text = element.help_text.clone();
    field.template = element.template.clone();
    field.choices = element.choices.clone();
    field.data = element.data.clone();
    field.set_value(element.value.as_str());
    if !element.value.is_empty() {
        field.set_text(element.value.as_str());
    }
    field.lang_values = element.lang_values.clone();
    for attr in &element.attributes {
        match attr.as_slice() {
            [] => {}
            [key] => {
                field.add_tag(key.to_ascii_lowercase());
            }
            [key, value, ..] if value.is_empty() => {
                field.add_tag(key.to_ascii_lowercase());
            }
            [key, value, ..] => {
                field.set_param(key.as_str(), value.as_str());
            }
        }
    }
    if !element.valid.is_empty() {
        field.set("valid", element.valid.as_str());
    }
    field
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_split_into_tags_and_params() {
        let mut element = Element::new("text", "title");
        element
            .add_attribute(["Required"])
            .add_attribute(["readonly", ""])
            .add_attribute(["placeholder", "Title"]);
        let field = build_field(&element, "title");
        assert!(field.tags.contains("required"));
        assert!(field.tags.contains("readonly"));
        assert_eq!(field.params.get("placeholder").map(String::as_str), Some("Title"));
    }

    #[test]
    fn trim_prefix_only_strips_leading_match() {
        assert_eq!(trim_name("User.name", "User."), "name");
        assert_eq!(trim_name("name", "User."), "name");
        assert_eq!(trim_name("User.name", ""), "User.name");
    }

    #[test]
    fn static_value_becomes_text() {
        let mut element = Element::new("static", "notice");
        element.value = "Hello".into();
        let field = build_field(&element, "notice");
        assert_eq!(field.text.as_deref(), Some("Hello"));
    }
}
