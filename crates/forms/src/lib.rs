#![allow(missing_docs)]

pub mod builder;
pub mod cli;
pub mod cmd;
pub mod error;
pub mod model;
pub mod render;

pub use builder::{Form, FormBuilder};
pub use error::FormsError;
pub use model::{
    FieldDescriptor, FieldKind, FormModel, config_from_descriptors, config_from_model,
    form_from_model,
};
pub use render::{TemplateCache, TemplateKey, render_payload};
