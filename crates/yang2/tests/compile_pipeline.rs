//! Integration coverage for the full parse → compile pipeline across
//! imports, groupings, augments, and deviations.

use yang2::{Context, CompiledNode};

#[test]
fn uses_refine_and_top_level_augment_compose() {
    let source = r#"
        module acme-system {
          namespace "urn:acme:system";
          prefix sys;

          grouping endpoint {
            leaf address {
              type string;
            }
            leaf port {
              type uint16;
              default "80";
            }
          }

          container server {
            uses endpoint {
              refine "port" {
                default "8080";
              }
            }
          }

          augment "/server" {
            leaf enabled {
              type boolean;
              default "true";
            }
          }
        }
    "#;

    let module = yang2::parse_module(source).unwrap();
    let mut ctx = Context::new();
    ctx.add_module(module);
    let compiled = ctx.compile("acme-system").unwrap();

    let CompiledNode::Container(server) = compiled.child("server").unwrap() else { panic!("expected a container") };
    let CompiledNode::Leaf(port) = server.children.iter().find(|n| n.name() == "port").unwrap() else { panic!("expected a leaf") };
    assert_eq!(port.default.as_deref(), Some("8080"));
    assert!(server.children.iter().any(|n| n.name() == "address"));
    assert!(server.children.iter().any(|n| n.name() == "enabled"));
}

#[test]
fn deviation_not_supported_removes_the_node() {
    let source = r#"
        module acme-system {
          namespace "urn:acme:system";
          prefix sys;

          container server {
            leaf legacy-mode {
              type boolean;
              default "false";
            }
          }

          deviation "/server/legacy-mode" {
            deviate not-supported;
          }
        }
    "#;

    let module = yang2::parse_module(source).unwrap();
    let mut ctx = Context::new();
    ctx.add_module(module);
    let compiled = ctx.compile("acme-system").unwrap();

    let CompiledNode::Container(server) = compiled.child("server").unwrap() else { panic!("expected a container") };
    assert!(server.children.iter().all(|n| n.name() != "legacy-mode"));
}

#[test]
fn import_across_modules_is_required_before_compiling() {
    let dependent = r#"
        module acme-types {
          namespace "urn:acme:types";
          prefix t;

          typedef percentage {
            type uint8 { range "0 .. 100"; }
          }
        }
    "#;
    let consumer = r#"
        module acme-box {
          namespace "urn:acme:box";
          prefix box;
          import acme-types { prefix t; }

          leaf fill-level {
            type uint8 { range "0 .. 100"; }
          }
        }
    "#;

    let mut ctx = Context::new();
    ctx.add_module(yang2::parse_module(consumer).unwrap());
    let unresolved = ctx.compile("acme-box").unwrap_err();
    assert_eq!(unresolved.kind, yang2::ErrorKind::Unresolved);

    ctx.add_module(yang2::parse_module(dependent).unwrap());
    assert!(ctx.compile("acme-box").is_ok());
}

#[test]
fn if_feature_prunes_disabled_nodes() {
    let source = r#"
        module acme-box {
          namespace "urn:acme:box";
          prefix box;

          feature turbo;

          leaf speed {
            type uint8;
            if-feature turbo;
          }

          leaf base-speed {
            type uint8;
          }
        }
    "#;

    let mut ctx = Context::new();
    ctx.add_module(yang2::parse_module(source).unwrap());
    let compiled = ctx.compile("acme-box").unwrap();
    assert!(compiled.child("speed").is_none());
    assert!(compiled.child("base-speed").is_some());
}
