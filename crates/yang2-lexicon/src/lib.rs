#![cfg_attr(docsrs, feature(doc_cfg))]

//! # yang2-lexicon
//!
//! The fixed YANG keyword enumeration, argument-kind alphabets, and
//! per-keyword sub-statement rule tables (C2/C3's static data). Nothing in
//! this crate reads any input; it only describes what the language looks
//! like so that `yang2-parse`'s readers and tree builder have something to
//! dispatch against.

pub mod argument;
pub mod keyword;
pub mod table;

pub use argument::{is_valid_identifier, is_valid_prefixed_identifier, is_valid_string, validate_argument, ArgumentKind};
pub use keyword::{match_keyword, keyword_from_str, Keyword, KeywordOrCustom, PseudoKeyword};
pub use table::{argument_kind, substatements, SubStmtRule};
