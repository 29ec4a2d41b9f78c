//! Binding form definitions to data by qualified field name.
//!
//! Every traversal shares one recursion rule: a `fieldset` passes the
//! ambient languages down, a `langset` replaces them with its own. A leaf
//! with no applicable language is addressed by its raw name, otherwise once
//! per language under that language's qualified name.

use std::ops::ControlFlow;

use crate::field::FormElement;
use crate::spec::{Config, DISABLED, Element, ElementKind, Language, READONLY, STATIC};

impl Config {
    /// Qualified names of every submittable field, in document order.
    pub fn get_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        let _ = walk(&self.elements, &self.languages, &mut |element, languages| {
            if is_submittable(element) {
                push_names(element, languages, &mut names);
            }
            ControlFlow::<()>::Continue(())
        });
        names
    }

    /// Fills fields that have no value yet from `resolver`.
    pub fn set_default_value<F>(&mut self, mut resolver: F)
    where
        F: FnMut(&str) -> String,
    {
        walk_mut(&mut self.elements, &mut self.languages, &mut |element, languages| {
            if element.value.is_empty() {
                bind(element, languages, &mut resolver, true);
            }
        });
    }

    /// Assigns every named field the value `resolver` gives for its qualified name.
    pub fn set_value<F>(&mut self, mut resolver: F)
    where
        F: FnMut(&str) -> String,
    {
        walk_mut(&mut self.elements, &mut self.languages, &mut |element, languages| {
            bind(element, languages, &mut resolver, false);
        });
    }

    /// Hands `(qualified_name, value)` for every named field to `resolver`,
    /// stopping at the first error.
    pub fn get_value<E, F>(&self, mut resolver: F) -> Result<(), E>
    where
        F: FnMut(&str, &str) -> Result<(), E>,
    {
        let flow = walk(&self.elements, &self.languages, &mut |element, languages| {
            if element.name.is_empty() {
                return ControlFlow::Continue(());
            }
            if languages.is_empty() {
                return to_flow(resolver(&element.name, &element.value));
            }
            for language in languages {
                to_flow(resolver(
                    &language.name(&element.name),
                    element.value_for(&language.id),
                ))?;
            }
            ControlFlow::Continue(())
        });
        match flow {
            ControlFlow::Break(err) => Err(err),
            ControlFlow::Continue(()) => Ok(()),
        }
    }

    /// Whether `name` addresses a field, raw or language-qualified.
    pub fn has_name(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        walk(&self.elements, &self.languages, &mut |element, languages| {
            let found = element.name == name
                || languages.iter().any(|language| {
                    language.has_name(name) || language.name(&element.name) == name
                });
            if found {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .is_break()
    }
}

fn is_submittable(element: &Element) -> bool {
    !element.name.is_empty() && element.kind != STATIC && !element.has_attr(&[DISABLED, READONLY])
}

fn push_names(element: &Element, languages: &[Language], names: &mut Vec<String>) {
    if languages.is_empty() {
        names.push(element.name.clone());
    } else {
        names.extend(languages.iter().map(|language| language.name(&element.name)));
    }
}

fn bind<F>(element: &mut Element, languages: &mut [Language], resolver: &mut F, only_empty: bool)
where
    F: FnMut(&str) -> String,
{
    if element.name.is_empty() {
        return;
    }
    if languages.is_empty() {
        element.value = resolver(&element.name);
        return;
    }
    for language in languages.iter_mut() {
        let filled = element
            .lang_values
            .get(&language.id)
            .is_some_and(|value| !value.is_empty());
        if only_empty && filled {
            continue;
        }
        let value = resolver(&language.name(&element.name));
        if let Some(field) = language
            .field_mut(&element.name)
            .and_then(FormElement::as_field_mut)
        {
            field.set_value(value.as_str()).set_text(value.as_str());
        }
        element.lang_values.insert(language.id.clone(), value);
    }
}

fn to_flow<E>(result: Result<(), E>) -> ControlFlow<E> {
    match result {
        Ok(()) => ControlFlow::Continue(()),
        Err(err) => ControlFlow::Break(err),
    }
}

/// Visits every leaf element together with the languages that apply to it.
pub(crate) fn walk<B, V>(elements: &[Element], languages: &[Language], visit: &mut V) -> ControlFlow<B>
where
    V: FnMut(&Element, &[Language]) -> ControlFlow<B>,
{
    for element in elements {
        match element.element_kind() {
            ElementKind::LangSet => walk(&element.elements, &element.languages, visit)?,
            ElementKind::FieldSet => walk(&element.elements, languages, visit)?,
            ElementKind::Field => visit(element, languages)?,
        }
    }
    ControlFlow::Continue(())
}

fn walk_mut<V>(elements: &mut [Element], languages: &mut [Language], visit: &mut V)
where
    V: FnMut(&mut Element, &mut [Language]),
{
    for element in elements {
        match element.element_kind() {
            ElementKind::LangSet => {
                let Element {
                    elements: children,
                    languages: own,
                    ..
                } = element;
                walk_mut(children, own, visit);
            }
            ElementKind::FieldSet => walk_mut(&mut element.elements, languages, visit),
            ElementKind::Field => visit(element, languages),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;

    #[test]
    fn walk_passes_ambient_languages_through_fieldsets() {
        let mut config = Config::new("walk");
        config.add_language(Language::new("en", "English", "~"));
        let mut set = Element::fieldset("group");
        set.add_element(Element::new("text", "inner"));
        config.add_element(set);
        assert_eq!(config.get_names(), vec!["Language[en][inner]"]);
    }

    #[test]
    fn set_value_pushes_into_indexed_field() {
        let mut lang = Language::new("en", "English", "~");
        lang.add_field(FormElement::Field(Field::new("textarea", "body")));
        let mut config = Config::new("push");
        config
            .add_language(lang)
            .add_element(Element::new("textarea", "body"));

        config.set_value(|name| format!("v:{name}"));

        let field = config.languages[0]
            .field("body")
            .and_then(FormElement::as_field)
            .expect("indexed field");
        assert_eq!(field.value, "v:Language[en][body]");
        assert_eq!(field.text.as_deref(), Some("v:Language[en][body]"));
        assert_eq!(config.elements[0].value, "");
    }
}
