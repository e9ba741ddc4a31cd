//! The conversion engine: object graphs to node trees and back.
//!
//! Serialization classifies input [`Value`]s, guards against reference
//! cycles, and runs registered processors; deserialization materializes
//! node trees as untyped values or as registered bean classes. Both
//! directions are driven by a [`JsonConfig`] passed per call.

mod coerce;
mod config;
mod cycle;
mod de;
mod events;
pub mod naming;
pub mod processors;
mod ser;
mod value;

pub use config::{ArrayMode, CycleStrategy, JsonConfig, DEFAULT_EXCLUDES};
pub use cycle::CycleGuard;
pub use de::{to_bean, to_value};
pub use events::JsonEventListener;
pub use ser::{from_object, to_json};
pub use value::{classify, Value, ValueKind};
