#![allow(missing_docs)]

pub mod binding;
pub mod error;
pub mod field;
pub mod i18n;
pub mod layout;
pub mod merge;
pub mod spec;

pub use error::SpecError;
pub use field::{Field, FieldSet, FormElement, LangSet};
pub use layout::{
    DEFAULT_FIELD_COLS, DEFAULT_LABEL_COLS, GRID_COLUMNS, Group, Groups, LayoutItem, get_cols,
    get_field_cols, get_label_cols, split_group,
};
pub use spec::{Choice, Config, Element, ElementKind, Language, NameFormat};
