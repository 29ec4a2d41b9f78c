use std::collections::BTreeSet;
use std::fmt;

use form_spec::{FieldSet, FormElement, Group, LangSet, Language};
use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::builder::Form;
use crate::error::FormsError;

/// Renderer-facing view of a built form: settings plus the grouped layout.
pub fn render_payload(form: &Form) -> Value {
    let languages = form
        .languages
        .iter()
        .map(|language| language_value(language, "form"))
        .collect::<Vec<_>>();

    json!({
        "id": form.id,
        "theme": form.theme,
        "template": form.template,
        "method": form.method,
        "action": form.action,
        "attributes": form.attributes,
        "withButtons": form.with_buttons,
        "buttons": form.buttons,
        "btnsTemplate": form.btns_template,
        "languages": languages,
        "groups": groups_value(&form.groups(), "form"),
        "data": form.data,
    })
}

fn groups_value(groups: &[Group<'_, FormElement>], container: &str) -> Value {
    groups
        .iter()
        .map(|group| {
            json!({
                "cols": group.cols(),
                "hasError": group.has_error,
                "elements": group
                    .elements
                    .iter()
                    .map(|element| element_value(element, container))
                    .collect::<Vec<_>>(),
            })
        })
        .collect()
}

fn element_value(element: &FormElement, container: &str) -> Value {
    let mut map = match element {
        FormElement::Field(field) => match serde_json::to_value(field) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        },
        FormElement::FieldSet(set) => fieldset_value(set),
        FormElement::LangSet(set) => langset_value(set),
    };
    map.insert("container".into(), Value::String(container.to_string()));
    map.insert("cols".into(), json!(element.cols()));
    Value::Object(map)
}

fn fieldset_value(set: &FieldSet) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("type".into(), Value::String("fieldset".into()));
    map.insert("name".into(), Value::String(set.name.clone()));
    map.insert("label".into(), Value::String(set.label.clone()));
    map.insert("labelCols".into(), json!(set.label_cols));
    map.insert("fieldCols".into(), json!(set.field_cols));
    map.insert("classes".into(), json!(set.classes));
    map.insert("tags".into(), json!(set.tags));
    map.insert("helpText".into(), Value::String(set.help_text.clone()));
    map.insert("template".into(), Value::String(set.template.clone()));
    map.insert("groups".into(), groups_value(&set.groups(), "fieldset"));
    for (key, value) in &set.data {
        map.insert(key.clone(), value.clone());
    }
    map
}

fn langset_value(set: &LangSet) -> Map<String, Value> {
    let languages = set
        .languages()
        .iter()
        .map(|language| language_value(language, "langset"))
        .collect::<Vec<_>>();
    let mut map = Map::new();
    map.insert("type".into(), Value::String("langset".into()));
    map.insert("name".into(), Value::String(set.name.clone()));
    map.insert("label".into(), Value::String(set.label.clone()));
    map.insert("template".into(), Value::String(set.template.clone()));
    map.insert("languages".into(), Value::Array(languages));
    for (key, value) in &set.data {
        map.insert(key.clone(), value.clone());
    }
    map
}

/// A language with the layout of its qualified copies.
fn language_value(language: &Language, container: &str) -> Value {
    json!({
        "id": language.id,
        "label": language.label,
        "groups": groups_value(&language.groups(), container),
    })
}

/// Identifies one compiled template.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TemplateKey {
    pub style: String,
    pub input_type: String,
    pub template: String,
}

impl TemplateKey {
    pub fn new(
        style: impl Into<String>,
        input_type: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            style: style.into(),
            input_type: input_type.into(),
            template: template.into(),
        }
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.style, self.input_type, self.template)
    }
}

/// Compiled handlebars templates, owned by whoever renders.
pub struct TemplateCache {
    handlebars: Handlebars<'static>,
    keys: BTreeSet<TemplateKey>,
}

impl Default for TemplateCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateCache {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        Self {
            handlebars,
            keys: BTreeSet::new(),
        }
    }

    /// Compiles `source` under `key`, replacing any previous template.
    pub fn register(&mut self, key: TemplateKey, source: &str) -> Result<(), FormsError> {
        let name = key.to_string();
        self.handlebars
            .register_template_string(&name, source)
            .map_err(|err| FormsError::Template {
                key: name.clone(),
                message: err.to_string(),
            })?;
        self.keys.insert(key);
        Ok(())
    }

    /// Registers the template produced by `load` unless `key` is cached already.
    pub fn get_or_register<F>(&mut self, key: &TemplateKey, load: F) -> Result<(), FormsError>
    where
        F: FnOnce() -> Result<String, FormsError>,
    {
        if self.contains(key) {
            return Ok(());
        }
        debug!(template = %key, "template cache miss");
        let source = load()?;
        self.register(key.clone(), &source)
    }

    pub fn contains(&self, key: &TemplateKey) -> bool {
        self.keys.contains(key)
    }

    pub fn render<T: Serialize>(&self, key: &TemplateKey, data: &T) -> Result<String, FormsError> {
        if !self.contains(key) {
            return Err(FormsError::MissingTemplate {
                key: key.to_string(),
            });
        }
        let name = key.to_string();
        self.handlebars
            .render(&name, data)
            .map_err(|err| FormsError::Template {
                key: name,
                message: err.to_string(),
            })
    }

    pub fn remove(&mut self, key: &TemplateKey) -> bool {
        if self.keys.remove(key) {
            self.handlebars.unregister_template(&key.to_string());
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.handlebars.clear_templates();
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
