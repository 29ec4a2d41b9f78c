//! Layering of form definitions.
//!
//! The receiver is the overriding layer: its non-empty scalars are kept and
//! only gaps are filled from the source. Keyed collections are unioned, with
//! matched elements and choices merged recursively.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::spec::{Choice, Config, Element, Language};

impl Config {
    pub fn merge(&mut self, source: &Config) -> &mut Self {
        merge_str(&mut self.id, &source.id);
        merge_str(&mut self.theme, &source.theme);
        merge_str(&mut self.template, &source.template);
        merge_str(&mut self.method, &source.method);
        merge_str(&mut self.action, &source.action);
        merge_attributes(&mut self.attributes, &source.attributes);
        merge_values(&mut self.buttons, &source.buttons);
        if self.with_buttons != source.with_buttons {
            self.with_buttons = source.with_buttons;
        }
        merge_str(&mut self.btns_template, &source.btns_template);
        merge_elements(&mut self.elements, &source.elements);
        merge_languages(&mut self.languages, &source.languages);
        merge_data(&mut self.data, &source.data);
        merge_str(&mut self.trim_name_prefix, &source.trim_name_prefix);
        self
    }
}

impl Element {
    pub fn merge(&mut self, source: &Element) -> &mut Self {
        merge_str(&mut self.id, &source.id);
        merge_str(&mut self.kind, &source.kind);
        merge_str(&mut self.template, &source.template);
        merge_str(&mut self.label, &source.label);
        merge_str(&mut self.name, &source.name);
        merge_cols(&mut self.label_cols, source.label_cols);
        merge_cols(&mut self.field_cols, source.field_cols);
        merge_str(&mut self.value, &source.value);
        merge_lang_values(&mut self.lang_values, &source.lang_values);
        merge_str(&mut self.help_text, &source.help_text);
        merge_str(&mut self.valid, &source.valid);
        merge_str(&mut self.format, &source.format);
        merge_attributes(&mut self.attributes, &source.attributes);
        merge_values(&mut self.label_classes, &source.label_classes);
        merge_keyed(
            &mut self.choices,
            &source.choices,
            |choice| Some(choice.group.as_str()),
            |target, source| {
                target.merge(source);
            },
        );
        merge_elements(&mut self.elements, &source.elements);
        merge_languages(&mut self.languages, &source.languages);
        merge_data(&mut self.data, &source.data);
        self
    }
}

impl Choice {
    /// Unions the source's option entries into this choice's.
    pub fn merge(&mut self, source: &Choice) -> &mut Self {
        for entry in source.option.iter().filter(|entry| !entry.is_empty()) {
            if !self.option.contains(entry) {
                self.option.push(entry.clone());
            }
        }
        self
    }
}

fn merge_str(target: &mut String, source: &str) {
    if target.is_empty() && !source.is_empty() {
        *target = source.to_string();
    }
}

fn merge_cols(target: &mut u32, source: u32) {
    if *target == 0 && source > 0 {
        *target = source;
    }
}

/// Attributes match on their key; empty attribute lists never take part.
fn merge_attributes(target: &mut Vec<Vec<String>>, source: &[Vec<String>]) {
    for attr in source {
        let Some(key) = attr.first() else {
            continue;
        };
        let exists = target
            .iter()
            .any(|existing| existing.first() == Some(key));
        if !exists {
            target.push(attr.clone());
        }
    }
}

fn merge_values(target: &mut Vec<String>, source: &[String]) {
    for value in source {
        if !target.contains(value) {
            target.push(value.clone());
        }
    }
}

fn merge_elements(target: &mut Vec<Element>, source: &[Element]) {
    merge_keyed(
        target,
        source,
        |element| (!element.name.is_empty()).then_some(element.name.as_str()),
        |target, source| {
            target.merge(source);
        },
    );
}

fn merge_languages(target: &mut Vec<Language>, source: &[Language]) {
    merge_keyed(
        target,
        source,
        |language| (!language.id.is_empty()).then_some(language.id.as_str()),
        |_, _| {},
    );
}

fn merge_lang_values(target: &mut BTreeMap<String, String>, source: &BTreeMap<String, String>) {
    for (lang, value) in source {
        let slot = target.entry(lang.clone()).or_default();
        merge_str(slot, value);
    }
}

fn merge_data(target: &mut Map<String, Value>, source: &Map<String, Value>) {
    for (key, value) in source {
        target.insert(key.clone(), value.clone());
    }
}

/// Merges `source` into `target` by key; items without a key are always appended.
fn merge_keyed<T, F, M>(target: &mut Vec<T>, source: &[T], key: F, mut on_match: M)
where
    T: Clone,
    F: Fn(&T) -> Option<&str>,
    M: FnMut(&mut T, &T),
{
    for item in source {
        let matched = key(item).and_then(|wanted| {
            target
                .iter_mut()
                .find(|existing| key(existing).is_some_and(|k| k == wanted))
        });
        match matched {
            Some(existing) => on_match(existing, item),
            None => {
                debug!(
                    item = std::any::type_name::<T>(),
                    "appending unmatched item during merge"
                );
                target.push(item.clone());
            }
        }
    }
}
