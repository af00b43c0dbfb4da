//! Workflow node definitions.
//!
//! This module contains the serializable node records a workflow tree is
//! built from. These types are designed for:
//! - Construction by code-first builders and document front-ends
//! - Deep copying during template instantiation
//! - Consumption by the execution compiler, which lowers them into stages
//!
//! Nodes do not own their outputs. The tree shape lives in
//! [`crate::workflow::Workflow`], which addresses nodes by [`NodeIndex`].

mod copy;
mod endpoint;
mod expression;
mod handling;
mod index;
mod kind;
mod node;
mod route;
mod strings;
mod transform;

pub use copy::CopyDefinition;
pub use endpoint::{
    EnrichDef, ExchangePattern, InputDefinition, ToDef, ToDynamicDef, WireTapDef,
};
pub use expression::Expression;
pub use handling::{
    DoCatchDef, DoFinallyDef, DoTryDef, InterceptDef, InterceptSendToEndpointDef,
    OnCompletionDef, OnExceptionDef, PolicyDef, RollbackDef, ThrowExceptionDef,
};
pub use index::{NodeIndex, Parent};
pub use kind::NodeKind;
pub use node::{Node, NodeBuilder, NodeBuilderError};
pub use route::{
    ChoiceDef, DelayDef, FilterDef, LoadBalanceDef, LoadBalancer, LoopDef, MulticastDef,
    OtherwiseDef, PipelineDef, SplitDef, StopDef, ThrottleDef, WhenDef,
};
pub(crate) use strings::StringFields;
pub use transform::{
    BeanDef, ConvertBodyDef, DataFormat, LogDef, LogLevel, MarshalDef, ProcessDef,
    RemoveHeaderDef, ScriptDef, SetBodyDef, SetHeaderDef, SortDef, TransformDef, UnmarshalDef,
    ValidateDef,
};
