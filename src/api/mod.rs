//! Azure Data Explorer connection resolution
//!
//! Turns a stored connection record into a validated, immutable
//! [`ConnectionDescriptor`] that selects an authentication method and carries
//! exactly the fields that method needs. Nothing here performs I/O.

pub mod auth;
pub mod connection_string;
pub mod constants;
pub mod error;
pub mod fields;
pub mod models;

pub use auth::{AuthResolver, resolve};
pub use error::{ConfigurationError, ConfigurationResult};
pub use fields::{FieldBehaviour, FormWidget, Placeholder, connection_form_widgets, ui_field_behaviour};
pub use models::{AuthMethod, AuthParams, ConnectionDescriptor, ConnectionOptions, ConnectionRecord, Secret};
