//! The built-in type-value engine and restriction algebra (spec.md §4.4,
//! §4.5).
//!
//! Depends only on `yang2-base`; it has no knowledge of the parsed-tree or
//! compiled-schema representations above it (mirrors the isolation of the
//! kernel layer this workspace's type system was grounded on — see
//! DESIGN.md).

pub mod builtin;
pub mod custom;
pub mod engine;
pub mod enumbits;
pub mod interval;
pub mod pattern;
pub mod range;
pub mod value;

pub use builtin::BuiltinType;
pub use custom::CustomTypeCallbacks;
pub use enumbits::{BitMember, BitSet, EnumMember, EnumSet};
pub use interval::{Interval, RestrictionSet};
pub use pattern::{CompiledPattern, PatternSet};
pub use value::{Comparison, Value};
