use federation_merge::CompositionOptions;
use federation_merge::HintCode;
use pretty_assertions::assert_eq;

use super::ServiceDefinition;
use super::merge_with_options;
use super::object;
use super::supergraph;

const INTERFACE_AND_IMPLEMENTATION: [ServiceDefinition<'static>; 2] = [
    ServiceDefinition {
        name: "Subgraph1",
        type_defs: r#"
        type Query {
          f: I
        }

        interface I {
          a: Int
        }

        type A implements I {
          a: Int
        }
        "#,
    },
    ServiceDefinition {
        name: "Subgraph2",
        type_defs: r#"
        type Query {
          f: A
        }

        type A {
          a: Int
        }
        "#,
    },
];

#[test]
fn implementation_subtyping_is_rejected_by_default() {
    let result = merge_with_options(&INTERFACE_AND_IMPLEMENTATION, CompositionOptions::default());

    assert!(result.supergraph.is_none());
    let codes: Vec<&str> = result.errors.iter().map(|error| error.code()).collect();
    assert_eq!(codes, vec!["FIELD_TYPE_MISMATCH"]);
}

#[test]
fn implementation_subtyping_uses_the_abstract_type() {
    let options = CompositionOptions {
        allow_implementation_subtyping: true,
    };
    let result = merge_with_options(&INTERFACE_AND_IMPLEMENTATION, options);

    assert_eq!(result.hints.len(), 1);
    assert_eq!(result.hints[0].code, HintCode::InconsistentFieldType);
    insta::assert_snapshot!(
        &result.hints[0].message,
        @r#"Type of field "Query.f" is inconsistent but compatible across subgraphs: will use type "I" (from subgraph "Subgraph1") in supergraph but "Query.f" has subtype "A" in subgraph "Subgraph2"."#
    );
    let schema = supergraph(&result);
    assert_eq!(object(schema, "Query").fields["f"].ty.to_string(), "I");
}

#[test]
fn options_deserialize_with_defaults() {
    let options: CompositionOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(options, CompositionOptions::default());

    let options: CompositionOptions =
        serde_json::from_str(r#"{"allow_implementation_subtyping": true}"#).unwrap();
    assert!(options.allow_implementation_subtyping);
}
