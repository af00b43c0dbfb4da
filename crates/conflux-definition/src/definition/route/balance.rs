//! Load balancer definitions.

use serde::{Deserialize, Serialize};

use crate::definition::Expression;

/// Distributes messages over its outputs using a [`LoadBalancer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalanceDef {
    /// The balancing policy.
    pub balancer: LoadBalancer,
}

impl LoadBalanceDef {
    /// Creates a new load balance definition.
    pub fn new(balancer: LoadBalancer) -> Self {
        Self { balancer }
    }
}

/// Load balancing policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum LoadBalancer {
    /// Cycles through outputs in order.
    #[default]
    RoundRobin,
    /// Picks an output at random.
    Random,
    /// Moves on to the next output when one fails.
    Failover {
        /// Exception types that trigger failover; empty means any.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        exceptions: Vec<String>,
        /// Attempts before giving up; `None` tries every output once.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        maximum_failover_attempts: Option<i32>,
        /// Starts each message at the next output instead of the first.
        #[serde(default)]
        round_robin: bool,
    },
    /// Picks outputs by a weight distribution.
    Weighted {
        /// Comma separated weights, one per output.
        distribution_ratio: String,
        /// Cycles by weight instead of drawing at random.
        #[serde(default)]
        round_robin: bool,
    },
    /// Pins messages with the same correlation value to the same output.
    Sticky {
        /// Expression producing the correlation value.
        correlation: Expression,
    },
    /// A user supplied balancer looked up in the registry.
    Custom {
        /// Registry name of the balancer.
        reference: String,
    },
}

impl LoadBalancer {
    /// Returns the policy name used in labels.
    pub const fn name(&self) -> &'static str {
        match self {
            LoadBalancer::RoundRobin => "roundRobin",
            LoadBalancer::Random => "random",
            LoadBalancer::Failover { .. } => "failover",
            LoadBalancer::Weighted { .. } => "weighted",
            LoadBalancer::Sticky { .. } => "sticky",
            LoadBalancer::Custom { .. } => "custom",
        }
    }
}
