#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod definition;
mod error;
pub mod registry;
pub mod selector;
pub mod template;
pub mod validate;
pub mod workflow;

#[doc(hidden)]
pub mod prelude;

pub use error::{WorkflowError, WorkflowResult};
