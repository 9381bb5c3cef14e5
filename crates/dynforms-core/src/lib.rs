//! DynForms: server-side dynamic forms
//!
//! Compose a [`Form`] from typed [`Field`]s at runtime, render it to markup
//! through placeholder templates, bind the posted request data back onto
//! the same fields and validate each response.
//!
//! # Round trip
//!
//! ```text
//! ┌──────────┐   render_html   ┌──────────┐   POST    ┌──────────┐
//! │   Form   │ ──────────────▶ │  Markup  │ ────────▶ │PostedData│
//! │ (fields) │                 │(+snapshot)│           └────┬─────┘
//! └────▲─────┘                 └──────────┘                │
//!      │            validate / responses                   │ binder::bind
//!      └───────────────────────────────────────────────────┘
//! ```
//!
//! A form either survives between requests inside the markup (a base64
//! snapshot in a hidden input), in a store owned by the host, or is rebuilt
//! with stable keys on every request.
//!
//! ```
//! use dynforms_core::{binder, Field, Form, PostedData};
//!
//! let mut form = Form::new();
//! form.add_fields([Field::text_box().with_key("name").with_required(true)])?;
//! let html = form.render_html(false)?;
//! assert!(html.contains("DynField_name"));
//!
//! let posted = PostedData::new().with_value("DynField_name", "Alice");
//! let mut form = binder::bind(Some(form), &posted)?;
//! assert!(form.validate(true));
//! assert_eq!(form.responses(true)[0].value, "Alice");
//! # Ok::<(), dynforms_core::FormError>(())
//! ```

pub mod binder;
pub mod config;
pub mod definition;
pub mod error;
pub mod events;
pub mod field;
pub mod field_list;
pub mod form;
pub mod html;
pub mod patterns;
pub mod placeholder;
pub mod serialization;
pub mod value_objects;

pub use binder::{bind, PostedData};
pub use config::FormConfig;
pub use definition::{Choices, FieldDefinition, FormDefinition};
pub use error::{FormError, Result};
pub use events::{FieldEvent, Hook};
pub use field::{Field, FieldKind, FieldType, InputField};
pub use field_list::{FieldList, FieldMut};
pub use form::Form;
pub use placeholder::PlaceHolder;
pub use serialization::{client_data_json, deserialize_form, serialize_form};
pub use value_objects::{DataItem, ListItem, Orientation, PostedFile, Response};
