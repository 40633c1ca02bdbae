//! Editable table core
//!
//! Column type registry, table configuration, cell edit state machine,
//! column width allocation and an in-memory table store with optional
//! key-value persistence. Host UIs consume these through the renderer
//! contract in [`render`].

pub mod config;
pub mod edit;
pub mod error;
pub mod model;
pub mod render;
pub mod sizing;
pub mod storage;
pub mod store;
pub mod types;
pub mod view;

pub use error::Error;
pub use error::Result;
