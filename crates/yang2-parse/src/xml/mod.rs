//! YIN (XML) surface syntax reader (spec.md §4.1).

mod dom;
mod entities;
mod reader;

pub use reader::parse_raw_xml;
