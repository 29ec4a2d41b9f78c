pub mod choice;
pub mod config;
pub mod element;
pub mod language;

pub use choice::Choice;
pub use config::Config;
pub use element::{DISABLED, Element, ElementKind, FIELDSET, LANGSET, READONLY, STATIC};
pub use language::{Language, NameFormat};

pub(crate) fn is_zero(value: &u32) -> bool {
    *value == 0
}
