use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::SpecError;
use crate::field::FormElement;
use crate::layout::{Groups, split_group};

const INDEXED_SHORTHAND: &str = "~";

static FORMAT_VERB: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)%(.?)").expect("format verb pattern compiles"));

/// How a language turns a raw field name into its qualified name.
///
/// Serialized as a plain string: `""` is [`NameFormat::Identity`], `"~"` is
/// [`NameFormat::Indexed`] and anything else is a `%s` pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NameFormat {
    #[default]
    Identity,
    /// `Language[<id>][<name>]`.
    Indexed,
    Pattern(String),
}

impl NameFormat {
    pub fn apply(&self, lang_id: &str, name: &str) -> String {
        match self {
            NameFormat::Identity => name.to_string(),
            NameFormat::Indexed => format!("Language[{lang_id}][{name}]"),
            NameFormat::Pattern(pattern) => substitute(pattern, name),
        }
    }

    /// Checks that a pattern holds exactly one `%s` and no other verbs.
    pub fn validate(&self, lang_id: &str) -> Result<(), SpecError> {
        let NameFormat::Pattern(pattern) = self else {
            return Ok(());
        };
        let invalid = |reason: String| SpecError::InvalidNameFormat {
            language: lang_id.to_string(),
            format: pattern.clone(),
            reason,
        };
        let mut placeholders = 0;
        for captures in FORMAT_VERB.captures_iter(pattern) {
            match captures.get(1).map(|verb| verb.as_str()).unwrap_or_default() {
                "%" => {}
                "s" => placeholders += 1,
                "" => return Err(invalid("dangling '%' at end of format".into())),
                other => return Err(invalid(format!("unsupported verb '%{other}'"))),
            }
        }
        if placeholders != 1 {
            return Err(invalid(format!(
                "expected exactly one %s placeholder, found {placeholders}"
            )));
        }
        Ok(())
    }
}

impl From<String> for NameFormat {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "" => NameFormat::Identity,
            INDEXED_SHORTHAND => NameFormat::Indexed,
            _ => NameFormat::Pattern(raw),
        }
    }
}

impl From<&str> for NameFormat {
    fn from(raw: &str) -> Self {
        NameFormat::from(raw.to_string())
    }
}

impl From<NameFormat> for String {
    fn from(format: NameFormat) -> Self {
        match format {
            NameFormat::Identity => String::new(),
            NameFormat::Indexed => INDEXED_SHORTHAND.to_string(),
            NameFormat::Pattern(pattern) => pattern,
        }
    }
}

fn substitute(pattern: &str, name: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + name.len());
    let mut substituted = false;
    let mut chars = pattern.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        match chars.peek() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some('s') if !substituted => {
                chars.next();
                out.push_str(name);
                substituted = true;
            }
            _ => out.push('%'),
        }
    }
    if !substituted {
        warn!(pattern, name, "name format has no %s placeholder");
    }
    out
}

/// One localization variant of a form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Language {
    pub id: String,
    pub label: String,
    #[schemars(with = "String")]
    pub name_format: NameFormat,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
    #[serde(skip)]
    fields: Vec<FormElement>,
    #[serde(skip)]
    field_map: BTreeMap<String, usize>,
}

impl Language {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        name_format: impl Into<NameFormat>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            name_format: name_format.into(),
            ..Self::default()
        }
    }

    /// Qualified name of `raw` under this language.
    pub fn name(&self, raw: &str) -> String {
        self.name_format.apply(&self.id, raw)
    }

    /// Whether a field was indexed under the qualified `name`.
    pub fn has_name(&self, name: &str) -> bool {
        self.field_map.contains_key(name)
    }

    /// Indexes `element` under its qualified name; the first entry for a name wins.
    pub fn add_field(&mut self, element: FormElement) -> bool {
        let name = self.name(element.original_name());
        if self.field_map.contains_key(&name) {
            debug!(language = %self.id, %name, "field already indexed, skipping");
            return false;
        }
        self.field_map.insert(name, self.fields.len());
        self.fields.push(element);
        true
    }

    pub fn add_fields(&mut self, elements: impl IntoIterator<Item = FormElement>) -> &mut Self {
        for element in elements {
            self.add_field(element);
        }
        self
    }

    /// Element for the raw (unqualified) `name`, looking inside indexed sets
    /// when it is not indexed directly.
    pub fn field(&self, name: &str) -> Option<&FormElement> {
        if let Some(idx) = self.field_map.get(&self.name(name)) {
            return self.fields.get(*idx);
        }
        self.fields.iter().find_map(|element| element.child(name))
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormElement> {
        if let Some(idx) = self.field_map.get(&self.name(name)).copied() {
            return self.fields.get_mut(idx);
        }
        self.fields.iter_mut().find_map(|element| element.child_mut(name))
    }

    pub fn fields(&self) -> &[FormElement] {
        &self.fields
    }

    pub fn groups(&self) -> Groups<'_, FormElement> {
        split_group(&self.fields)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.data.insert(key.into(), value.into());
        self
    }
}
