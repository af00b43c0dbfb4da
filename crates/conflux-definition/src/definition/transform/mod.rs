//! Message transformation definitions.
//!
//! This module contains the leaf nodes that change a message or call out
//! to user code. None of them own outputs.

mod format;
mod invoke;
mod message;

pub use format::{DataFormat, MarshalDef, UnmarshalDef};
pub use invoke::{BeanDef, ProcessDef, ScriptDef};
pub use message::{
    ConvertBodyDef, LogDef, LogLevel, RemoveHeaderDef, SetBodyDef, SetHeaderDef, SortDef,
    TransformDef, ValidateDef,
};
