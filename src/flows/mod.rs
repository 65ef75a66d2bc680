//! Flow definitions module
//!
//! Static flow content, the step map builder and the keyword registry.

pub mod content;
pub mod registry;
pub mod step_map;

pub use registry::{Flow, FlowDefinition, FlowRegistry, SummaryBuilder};
pub use step_map::{
    Node, StepMap, StepSpec, TailLabels, Validation, CONFIRM_KEY, END_KEY, START_KEY,
    SUMMARY_KEY,
};
