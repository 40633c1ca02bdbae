//! Cell editing
//!
//! Every cell owns an independent [`CellEditor`]. Nothing prevents two cells
//! from editing at once; hosts that want a single active editor keep one
//! `CellEditor` and re-target it.

mod buffer;
mod machine;

pub use buffer::EditBuffer;
pub use machine::*;
