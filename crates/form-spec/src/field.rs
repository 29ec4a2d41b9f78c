//! Built form elements: leaf fields, fieldsets and language sets.
//!
//! These are what a [`Language`] indexes and what the layout groups; the
//! declarative [`Element`](crate::Element) tree is converted into them by a
//! builder.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::layout::{Groups, LayoutItem, get_cols, split_group};
use crate::spec::{Choice, DISABLED, ElementKind, Language, STATIC};

/// Field types whose content is carried as text rather than a value attribute.
pub const TEXT_TYPES: &[&str] = &["button", "submit", "reset", STATIC, "textarea"];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    #[serde(rename = "type")]
    pub kind: String,
    pub original_name: String,
    pub name: String,
    pub id: String,
    pub label: String,
    pub label_cols: u32,
    pub field_cols: u32,
    pub label_classes: Vec<String>,
    pub classes: Vec<String>,
    pub params: BTreeMap<String, String>,
    pub tags: BTreeSet<String>,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub help_text: String,
    pub errors: Vec<String>,
    pub choices: Vec<Choice>,
    pub template: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub language: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
    /// Values bound per language id, applied when a localized copy is made.
    #[serde(skip)]
    pub lang_values: BTreeMap<String, String>,
}

impl Field {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind: kind.into(),
            original_name: name.clone(),
            name,
            ..Self::default()
        }
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

    pub fn cols(&self) -> u32 {
        get_cols(self.label_cols, self.field_cols)
    }

    /// Template to render with; the field type when none was set.
    pub fn template_name(&self) -> &str {
        if self.template.is_empty() {
            &self.kind
        } else {
            &self.template
        }
    }

    pub fn carries_text(&self) -> bool {
        TEXT_TYPES.contains(&self.kind.as_str())
    }

    pub fn set_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.value = value.into();
        self
    }

    /// Stores content text; ignored for types that do not carry text.
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        if self.carries_text() {
            self.text = Some(text.into());
        }
        self
    }

    pub fn set_help_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.help_text = text.into();
        self
    }

    pub fn add_error(&mut self, error: impl Into<String>) -> &mut Self {
        self.errors.push(error.into());
        self
    }

    pub fn add_class(&mut self, class: impl Into<String>) -> &mut Self {
        self.classes.push(class.into());
        self
    }

    pub fn remove_class(&mut self, class: &str) -> &mut Self {
        if let Some(pos) = self.classes.iter().position(|c| c == class) {
            self.classes.remove(pos);
        }
        self
    }

    pub fn add_label_class(&mut self, class: impl Into<String>) -> &mut Self {
        self.label_classes.push(class.into());
        self
    }

    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn delete_param(&mut self, key: &str) -> &mut Self {
        self.params.remove(key);
        self
    }

    /// Adds a value-less attribute such as `checked` or `disabled`.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn remove_tag(&mut self, tag: &str) -> &mut Self {
        self.tags.remove(tag);
        self
    }

    pub fn disabled(&mut self) -> &mut Self {
        self.add_tag(DISABLED)
    }

    pub fn enabled(&mut self) -> &mut Self {
        self.remove_tag(DISABLED)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

/// A named group of elements sharing the ambient languages.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSet {
    pub original_name: String,
    pub name: String,
    pub label: String,
    pub label_cols: u32,
    pub field_cols: u32,
    pub classes: Vec<String>,
    pub tags: BTreeSet<String>,
    pub help_text: String,
    pub template: String,
    pub language: String,
    pub data: Map<String, Value>,
    elements: Vec<FormElement>,
    index: BTreeMap<String, usize>,
}

impl FieldSet {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            original_name: name.clone(),
            name,
            label: label.into(),
            label_cols: 0,
            field_cols: 0,
            classes: Vec::new(),
            tags: BTreeSet::new(),
            help_text: String::new(),
            template: "fieldset".to_string(),
            language: String::new(),
            data: Map::new(),
            elements: Vec::new(),
            index: BTreeMap::new(),
        }
    }

    pub fn cols(&self) -> u32 {
        get_cols(self.label_cols, self.field_cols)
    }

    pub fn add_element(&mut self, element: FormElement) -> &mut Self {
        self.index
            .insert(element.original_name().to_string(), self.elements.len());
        self.elements.push(element);
        self
    }

    pub fn elements(&self) -> &[FormElement] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut [FormElement] {
        &mut self.elements
    }

    pub fn groups(&self) -> Groups<'_, FormElement> {
        split_group(&self.elements)
    }

    /// Element named `name` (original name), searching nested sets.
    pub fn element(&self, name: &str) -> Option<&FormElement> {
        if let Some(idx) = self.index.get(name) {
            return self.elements.get(*idx);
        }
        self.elements.iter().find_map(|child| child.child(name))
    }

    pub fn element_mut(&mut self, name: &str) -> Option<&mut FormElement> {
        if let Some(idx) = self.index.get(name).copied() {
            return self.elements.get_mut(idx);
        }
        self.elements.iter_mut().find_map(|child| child.child_mut(name))
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.element(name).and_then(FormElement::as_field)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.element_mut(name).and_then(FormElement::as_field_mut)
    }

    /// Moves elements to explicit positions: `"a:0,b:last,c:-1,d"`.
    ///
    /// An entry without a position takes the slot after the previous entry;
    /// negative positions count back from the last slot.
    pub fn sort(&mut self, spec: &str) -> &mut Self {
        let size = self.elements.len() as i64;
        let end = size - 1;
        let mut index: i64 = 0;
        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, position) = match entry.split_once(':') {
                Some((name, position)) => (name, Some(position.trim())),
                None => (entry, None),
            };
            match position {
                Some("last") => index = end,
                Some(raw) => match raw.parse::<i64>() {
                    Ok(idx) if idx >= 0 => index = idx,
                    Ok(idx) => index = end + idx,
                    Err(_) => {
                        debug!(fieldset = %self.name, entry, "ignoring unparsable sort position");
                        continue;
                    }
                },
                None => {}
            }
            if let Some(old) = self.index.get(name).copied()
                && index >= 0
                && index < size
                && old as i64 != index
            {
                self.move_element(old, index as usize);
            }
            index += 1;
        }
        self
    }

    /// Puts the named elements first, in the given order; the rest keep their order.
    pub fn sort_all(&mut self, names: &[&str]) -> &mut Self {
        let mut remaining: Vec<Option<FormElement>> =
            self.elements.drain(..).map(Some).collect();
        let mut sorted = Vec::with_capacity(remaining.len());
        for name in names {
            if let Some(idx) = self.index.get(*name).copied()
                && let Some(element) = remaining.get_mut(idx).and_then(Option::take)
            {
                sorted.push(element);
            }
        }
        sorted.extend(remaining.into_iter().flatten());
        self.elements = sorted;
        self.reindex();
        self
    }

    /// Moves the named elements to the end, keeping their given order.
    pub fn sort_to_last(&mut self, names: &[&str]) -> &mut Self {
        let mut index = self.elements.len() as i64 - 1;
        for name in names.iter().rev() {
            if let Some(old) = self.index.get(*name).copied()
                && index >= 0
                && old as i64 != index
            {
                self.move_element(old, index as usize);
            }
            index -= 1;
        }
        self
    }

    pub fn add_class(&mut self, class: impl Into<String>) -> &mut Self {
        self.classes.push(class.into());
        self
    }

    pub fn add_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn disable(&mut self) -> &mut Self {
        self.add_tag(DISABLED)
    }

    pub fn enable(&mut self) -> &mut Self {
        self.tags.remove(DISABLED);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.data.insert(key.into(), value.into());
        self
    }

    fn move_element(&mut self, from: usize, to: usize) {
        let element = self.elements.remove(from);
        self.elements.insert(to, element);
        self.reindex();
    }

    fn reindex(&mut self) {
        self.index = self
            .elements
            .iter()
            .enumerate()
            .map(|(idx, element)| (element.original_name().to_string(), idx))
            .collect();
    }
}

/// Repeats its children once per language, each copy carrying the
/// language-qualified name.
#[derive(Debug, Clone, PartialEq)]
pub struct LangSet {
    pub original_name: String,
    pub name: String,
    pub label: String,
    pub label_cols: u32,
    pub field_cols: u32,
    pub template: String,
    pub language: String,
    pub data: Map<String, Value>,
    languages: Vec<Language>,
    elements: Vec<FormElement>,
}

impl LangSet {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            original_name: name.clone(),
            name,
            label: label.into(),
            label_cols: 0,
            field_cols: 0,
            template: "langset".to_string(),
            language: String::new(),
            data: Map::new(),
            languages: Vec::new(),
            elements: Vec::new(),
        }
    }

    pub fn cols(&self) -> u32 {
        get_cols(self.label_cols, self.field_cols)
    }

    /// Adds a language and gives it copies of the children added so far.
    pub fn add_language(&mut self, mut language: Language) -> &mut Self {
        for element in &self.elements {
            language.add_field(element.localized(&language));
        }
        self.languages.push(language);
        self
    }

    pub fn add_element(&mut self, element: FormElement) -> &mut Self {
        for language in &mut self.languages {
            let copy = element.localized(language);
            language.add_field(copy);
        }
        self.elements.push(element);
        self
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn languages_mut(&mut self) -> &mut [Language] {
        &mut self.languages
    }

    pub fn language(&self, id: &str) -> Option<&Language> {
        self.languages.iter().find(|lang| lang.id == id)
    }

    /// Unqualified children as they were added.
    pub fn elements(&self) -> &[FormElement] {
        &self.elements
    }

    pub fn groups(&self, lang_id: &str) -> Option<Groups<'_, FormElement>> {
        self.language(lang_id).map(Language::groups)
    }

    /// Copy of `name` held by the first language that has one.
    pub fn element(&self, name: &str) -> Option<&FormElement> {
        self.languages.iter().find_map(|lang| lang.field(name))
    }

    pub fn element_mut(&mut self, name: &str) -> Option<&mut FormElement> {
        self.languages
            .iter_mut()
            .find_map(|lang| lang.field_mut(name))
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.element(name).and_then(FormElement::as_field)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormElement {
    Field(Field),
    FieldSet(FieldSet),
    LangSet(LangSet),
}

impl FormElement {
    pub fn original_name(&self) -> &str {
        match self {
            FormElement::Field(field) => &field.original_name,
            FormElement::FieldSet(set) => &set.original_name,
            FormElement::LangSet(set) => &set.original_name,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FormElement::Field(field) => &field.name,
            FormElement::FieldSet(set) => &set.name,
            FormElement::LangSet(set) => &set.name,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        match self {
            FormElement::Field(field) => field.name = name,
            FormElement::FieldSet(set) => set.name = name,
            FormElement::LangSet(set) => set.name = name,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FormElement::Field(field) => &field.label,
            FormElement::FieldSet(set) => &set.label,
            FormElement::LangSet(set) => &set.label,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            FormElement::Field(_) => ElementKind::Field,
            FormElement::FieldSet(_) => ElementKind::FieldSet,
            FormElement::LangSet(_) => ElementKind::LangSet,
        }
    }

    pub fn cols(&self) -> u32 {
        match self {
            FormElement::Field(field) => field.cols(),
            FormElement::FieldSet(set) => set.cols(),
            FormElement::LangSet(set) => set.cols(),
        }
    }

    pub fn has_error(&self) -> bool {
        match self {
            FormElement::Field(field) => !field.errors.is_empty(),
            FormElement::FieldSet(_) | FormElement::LangSet(_) => false,
        }
    }

    pub fn language(&self) -> &str {
        match self {
            FormElement::Field(field) => &field.language,
            FormElement::FieldSet(set) => &set.language,
            FormElement::LangSet(set) => &set.language,
        }
    }

    pub fn set_lang(&mut self, lang: impl Into<String>) {
        let lang = lang.into();
        match self {
            FormElement::Field(field) => field.language = lang,
            FormElement::FieldSet(set) => set.language = lang,
            FormElement::LangSet(set) => set.language = lang,
        }
    }

    pub fn as_field(&self) -> Option<&Field> {
        match self {
            FormElement::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn as_field_mut(&mut self) -> Option<&mut Field> {
        match self {
            FormElement::Field(field) => Some(field),
            _ => None,
        }
    }

    /// Copy qualified for `language`; fieldset children are qualified too.
    pub fn localized(&self, language: &Language) -> FormElement {
        let mut copy = self.clone();
        copy.localize(language);
        copy
    }

    fn localize(&mut self, language: &Language) {
        let qualified = language.name(self.original_name());
        self.set_name(qualified);
        self.set_lang(language.id.clone());
        match self {
            FormElement::Field(field) => {
                if let Some(value) = field.lang_values.get(&language.id).cloned() {
                    field.set_value(value.as_str()).set_text(value);
                }
            }
            FormElement::FieldSet(set) => {
                for child in set.elements_mut() {
                    child.localize(language);
                }
            }
            FormElement::LangSet(_) => {}
        }
    }

    /// Nested element named `name` inside this set.
    pub(crate) fn child(&self, name: &str) -> Option<&FormElement> {
        match self {
            FormElement::Field(_) => None,
            FormElement::FieldSet(set) => set.element(name),
            FormElement::LangSet(set) => set.element(name),
        }
    }

    pub(crate) fn child_mut(&mut self, name: &str) -> Option<&mut FormElement> {
        match self {
            FormElement::Field(_) => None,
            FormElement::FieldSet(set) => set.element_mut(name),
            FormElement::LangSet(set) => set.element_mut(name),
        }
    }
}

impl From<Field> for FormElement {
    fn from(field: Field) -> Self {
        FormElement::Field(field)
    }
}

impl From<FieldSet> for FormElement {
    fn from(set: FieldSet) -> Self {
        FormElement::FieldSet(set)
    }
}

impl From<LangSet> for FormElement {
    fn from(set: LangSet) -> Self {
        FormElement::LangSet(set)
    }
}

impl LayoutItem for FormElement {
    fn cols(&self) -> u32 {
        FormElement::cols(self)
    }

    fn element_kind(&self) -> ElementKind {
        self.kind()
    }

    fn has_error(&self) -> bool {
        FormElement::has_error(self)
    }
}
