//! Common plugin contracts for augment-harness
//!
//! Plugins implement one capability trait from [`traits`] and publish an
//! immutable [`PluginDescriptor`] describing their class name, task types,
//! locales and heaviness. The harness never inspects plugin internals beyond
//! these contracts.

pub mod context;
pub mod descriptor;
pub mod task;
pub mod traits;

pub use context::PluginContext;
pub use descriptor::{Capability, PluginDescriptor};
pub use task::{ParseTaskTypeError, TaskType};
pub use traits::*;
