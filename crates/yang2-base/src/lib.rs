#![cfg_attr(docsrs, feature(doc_cfg))]

//! # yang2-base
//!
//! Pure structural atoms shared by every yang2 crate: arena allocation,
//! string interning, source spans, and the error/diagnostic types.
//!
//! This crate has **no knowledge of YANG syntax or semantics**. It provides
//! only generic, reusable infrastructure that the lexicon, parser, type, and
//! compiler crates build upon.

pub mod arena;
pub mod error;
pub mod intern;
pub mod span;

pub use arena::Arena;
pub use error::{ErrorKind, Result, SchemaPath, YangError};
pub use intern::{Interner, Symbol, SymbolEq};
pub use span::{LineTracker, Position, Span};
