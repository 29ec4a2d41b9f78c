//! Collection of user-facing strings that need translating.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::spec::{Config, Element, Language};

const TRANSLATABLE_ATTRS: &[&str] = &["title", "placeholder"];

static NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+(\.\d+)?$").expect("numeric pattern compiles"));

impl Config {
    /// Labels, help texts, titles, placeholders, choice texts and language
    /// labels found anywhere in the definition.
    pub fn multilingual_text(&self) -> BTreeSet<String> {
        let mut texts = BTreeSet::new();
        collect(&self.elements, &self.languages, &mut texts);
        texts
    }
}

impl Element {
    /// Translatable strings carried by this element alone.
    pub fn multilingual_text(&self, texts: &mut BTreeSet<String>) {
        insert_text(texts, &self.label);
        insert_text(texts, &self.help_text);
        for attr in &self.attributes {
            if let [key, value] = attr.as_slice()
                && TRANSLATABLE_ATTRS.contains(&key.as_str())
            {
                insert_text(texts, value);
            }
        }
        for choice in &self.choices {
            if !is_numeric(&choice.group) {
                insert_text(texts, &choice.group);
            }
            if let [_, text] = choice.option.as_slice()
                && !is_numeric(text)
            {
                insert_text(texts, text);
            }
        }
    }
}

fn collect(elements: &[Element], languages: &[Language], texts: &mut BTreeSet<String>) {
    for element in elements {
        element.multilingual_text(texts);
        if element.is_set() {
            collect(&element.elements, &element.languages, texts);
        }
    }
    for language in languages {
        insert_text(texts, &language.label);
    }
}

fn insert_text(texts: &mut BTreeSet<String>, text: &str) {
    if !text.is_empty() && !texts.contains(text) {
        texts.insert(text.to_string());
    }
}

fn is_numeric(text: &str) -> bool {
    NUMERIC.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::Choice;

    #[test]
    fn numeric_detection() {
        assert!(is_numeric("42"));
        assert!(is_numeric("-3.5"));
        assert!(!is_numeric("4a"));
        assert!(!is_numeric(""));
    }

    #[test]
    fn collects_only_translatable_attributes() {
        let mut element = Element::new("text", "q").with_label("Query");
        element
            .add_attribute(["placeholder", "Search..."])
            .add_attribute(["class", "wide"])
            .add_attribute(["title"]);
        element.add_choice(Choice::grouped("10", "1", "2"));
        element.add_choice(Choice::grouped("Sizes", "s", "Small"));
        let mut texts = BTreeSet::new();
        element.multilingual_text(&mut texts);
        let texts: Vec<&str> = texts.iter().map(String::as_str).collect();
        assert_eq!(texts, vec!["Query", "Search...", "Sizes", "Small"]);
    }
}
