//! Routing definitions for conditional and fan-out message flow.
//!
//! This module provides the container nodes that shape a workflow:
//! - [`ChoiceDef`], [`WhenDef`], [`OtherwiseDef`]: content-based routing
//! - [`FilterDef`], [`SplitDef`], [`LoopDef`], [`MulticastDef`], [`PipelineDef`]
//! - [`LoadBalanceDef`]: distribution over outputs by a [`LoadBalancer`]
//!
//! plus the flow-control leaves [`ThrottleDef`], [`DelayDef`] and [`StopDef`].

mod balance;
mod choice;
mod flow;

pub use balance::{LoadBalanceDef, LoadBalancer};
pub use choice::{ChoiceDef, OtherwiseDef, WhenDef};
pub use flow::{
    DelayDef, FilterDef, LoopDef, MulticastDef, PipelineDef, SplitDef, StopDef, ThrottleDef,
};
