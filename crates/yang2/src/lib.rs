//! yang2: a YANG (RFC 7950) schema compiler.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     yang2-parse (C1/C2/C3)                  │
//! │  compact + XML (YIN) readers → shared RawStatement tree     │
//! │  → ParsedModule / ParsedSubmodule                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    yang2-compile (C5)                       │
//! │  Context: imports, includes, identities, features,          │
//! │  typedefs, data tree, augments, deviations                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!               ┌──────────────┴──────────────┐
//!               ▼                             ▼
//! ┌───────────────────────┐     ┌───────────────────────────────┐
//! │   yang2-types (C4/C6)  │     │      yang2-lexicon (C2)        │
//! │  store/print/duplicate │     │  keyword dispatch tables       │
//! │  /compare, restrictions│     │                                 │
//! └───────────────────────┘     └───────────────────────────────┘
//! ```
//!
//! A [`Context`] registers parsed modules and compiles them against each
//! other. The compiled tree's leaves carry a [`CompiledType`] whose
//! `store`/`print`/`duplicate`/`compare` operations live in `yang2_types`.
//!
//! # Example
//!
//! ```
//! use yang2::Context;
//!
//! let source = r#"
//!     module acme-box {
//!       namespace "urn:acme:box";
//!       prefix box;
//!       leaf port {
//!         type int8 { range "0 .. 50 | 127"; }
//!         default "20";
//!       }
//!     }
//! "#;
//! let module = yang2::parse_module(source).unwrap();
//! let mut ctx = Context::new();
//! ctx.add_module(module);
//! let compiled = ctx.compile("acme-box").unwrap();
//! assert!(compiled.child("port").is_some());
//! ```

pub use yang2_base::{ErrorKind, Result, SchemaPath, YangError};
pub use yang2_compile::{CompiledIdentity, CompiledModule, CompiledNode, Context, ContextOptions, IdentityDag, IdentityKey};
pub use yang2_compile::schema::{
    CompiledAny, CompiledCase, CompiledChoice, CompiledCommon, CompiledContainer, CompiledLeaf, CompiledLeafList, CompiledList, CompiledNotification, CompiledRpc,
};
pub use yang2_compile::typedef::{store_value, CompiledType};
pub use yang2_parse::ast::{ParsedModule, ParsedSubmodule};
pub use yang2_parse::{parse_module, parse_module_xml, parse_submodule, parse_submodule_xml};
pub use yang2_types::{BuiltinType, Comparison, CustomTypeCallbacks, Value};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_to_end_scenario_1_range_with_a_default() {
        let source = r#"
            module acme-box {
              namespace "urn:acme:box";
              prefix box;
              leaf port {
                type int8 { range "0 .. 50 | 127"; }
                default "20";
              }
            }
        "#;
        let module = parse_module(source).unwrap();
        let mut ctx = Context::new();
        ctx.add_module(module);
        let compiled = ctx.compile("acme-box").unwrap();
        let CompiledNode::Leaf(leaf) = compiled.child("port").unwrap() else { panic!("expected a leaf") };
        assert!(leaf.type_.range.as_ref().unwrap().contains(0));
        assert!(leaf.type_.range.as_ref().unwrap().contains(127));
        let value = store_value(&leaf.type_, "20").unwrap();
        assert_eq!(value, Value::Integer(20));
    }

    #[test]
    fn end_to_end_scenario_1_rejects_an_out_of_range_default() {
        let source = r#"
            module acme-box {
              namespace "urn:acme:box";
              prefix box;
              leaf port {
                type int8 { range "0 .. 50 | 127"; }
                default "60";
              }
            }
        "#;
        let module = parse_module(source).unwrap();
        let mut ctx = Context::new();
        ctx.add_module(module);
        let err = ctx.compile("acme-box").unwrap_err();
        assert!(err.message.contains("does not satisfy the range constraint"));
    }

    #[test]
    fn end_to_end_scenario_2_typedef_chain_narrowing() {
        let source = r#"
            module acme-box {
              namespace "urn:acme:box";
              prefix box;
              typedef my {
                type int8 { range "-128 .. -60 | -1 .. 1 | 60 .. 127"; }
              }
              leaf l {
                type my { range "-80 .. 80"; }
              }
            }
        "#;
        let module = parse_module(source).unwrap();
        let mut ctx = Context::new();
        ctx.add_module(module);
        let err = ctx.compile("acme-box").unwrap_err();
        assert!(err.message.contains("derived restriction (-80 .. 80) is not equally or more limiting"));
    }

    #[test]
    fn end_to_end_scenario_3_decimal64_canonicalization() {
        let t = yang2_parse::ast::ParsedType { name: "decimal64".to_string(), fraction_digits: Some(2), ..Default::default() };
        let compiled = yang2_compile::typedef::compile_type(&t, &|_| None, &mut Default::default()).unwrap();
        let value = store_value(&compiled, "3.1").unwrap();
        assert_eq!(yang2_types::engine::print_decimal64(&value, 2).unwrap(), "3.10");
        assert!(store_value(&compiled, "3.145").is_err());
        let zero = store_value(&compiled, "-0.00").unwrap();
        assert_eq!(yang2_types::engine::print_decimal64(&zero, 2).unwrap(), "0.00");
    }

    #[test]
    fn end_to_end_scenario_4_identity_dag() {
        let source = r#"
            module acme-identities {
              namespace "urn:acme:identities";
              prefix ids;
              identity A;
              identity B { base A; }
              identity C { base B; }
            }
        "#;
        let module = parse_module(source).unwrap();
        let mut ctx = Context::new();
        ctx.add_module(module);
        ctx.compile("acme-identities").unwrap();
        let dag = ctx.identities();
        let a = IdentityKey::new("acme-identities", "A");
        let c = IdentityKey::new("acme-identities", "C");
        assert!(dag.is_derived_from(&c, &a));
        assert!(!dag.is_derived_from(&a, &c));
    }

    #[test]
    fn end_to_end_scenario_5_xml_reader_adjacent_intervals() {
        let source = r#"<module xmlns="urn:ietf:params:xml:ns:yang:yin:1" name="acme-box">
            <namespace uri="urn:acme:box"/>
            <prefix value="box"/>
            <leaf name="port">
              <type name="int8">
                <range value="min .. 10 | 11 .. 12 | 30"/>
              </type>
            </leaf>
        </module>"#;
        let module = parse_module_xml(source).unwrap();
        let mut ctx = Context::new();
        ctx.add_module(module);
        let compiled = ctx.compile("acme-box").unwrap();
        let CompiledNode::Leaf(leaf) = compiled.child("port").unwrap() else { panic!("expected a leaf") };
        let range = leaf.type_.range.as_ref().unwrap();
        assert!(range.contains(-128));
        assert!(range.contains(10));
        assert!(range.contains(11));
        assert!(range.contains(12));
        assert!(range.contains(30));
        assert!(!range.contains(20));
    }

    #[test]
    fn end_to_end_scenario_6_value_equality_and_mutation() {
        let t = yang2_parse::ast::ParsedType { name: "int8".to_string(), ..Default::default() };
        let compiled = yang2_compile::typedef::compile_type(&t, &|_| None, &mut Default::default()).unwrap();
        let a = store_value(&compiled, "5").unwrap();
        let b = store_value(&compiled, "5").unwrap();
        assert_eq!(a.compare(&b), Comparison::Equal);
        let c = store_value(&compiled, "10").unwrap();
        assert_eq!(a.compare(&c), Comparison::NotEqual);
    }
}
