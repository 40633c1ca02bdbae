//! Data model: identifiers, entities and dynamic cell values

mod column_config;
mod entity;
mod id;
mod value;

pub use column_config::*;
pub use entity::*;
pub use id::*;
pub use value::*;
