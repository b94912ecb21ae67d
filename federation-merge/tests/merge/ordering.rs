use federation_merge::merge_subgraphs;
use pretty_assertions::assert_eq;
use rstest::rstest;

use super::ServiceDefinition;
use super::error_messages;
use super::hint_messages;
use super::merge;
use super::subgraphs;

fn services<'a>(
    order: &[&'a str],
    definitions: &[(&'a str, &'a str)],
) -> Vec<ServiceDefinition<'a>> {
    order
        .iter()
        .filter_map(|name| {
            definitions
                .iter()
                .find(|(candidate, _)| candidate == name)
                .map(|&(name, type_defs)| ServiceDefinition { name, type_defs })
        })
        .collect()
}

#[rstest]
#[case::registration_order(&["A", "B", "C"], r#""Query.f(a:)" has supertype "Int" in subgraphs "A" and "C""#)]
#[case::reversed(&["C", "B", "A"], r#""Query.f(a:)" has supertype "Int" in subgraphs "C" and "A""#)]
fn subgraphs_are_listed_in_registration_order(#[case] order: &[&str], #[case] expected: &str) {
    let definitions = [
        ("A", "type Query { f(a: Int): String }"),
        ("B", "type Query { f(a: Int!): String }"),
        ("C", "type Query { f(a: Int): String }"),
    ];
    let result = merge(&services(order, &definitions));

    let messages = hint_messages(&result);
    assert_eq!(messages.len(), 1);
    assert!(
        messages[0].ends_with(&format!("{expected}.")),
        "unexpected hint: {}",
        messages[0]
    );
    assert!(messages[0].contains(r#"will use type "Int!" (from subgraph "B") in supergraph"#));
}

#[rstest]
#[case::nullable_first(&["A", "B"], r#"will use type "String" (from subgraph "A") in supergraph but "Query.f" has subtype "String!" in subgraph "B"."#)]
#[case::non_null_first(&["B", "A"], r#"will use type "String" (from subgraph "A") in supergraph but "Query.f" has subtype "String!" in subgraph "B"."#)]
#[case::shared_winner(&["C", "B", "A"], r#"will use type "String" (from subgraphs "C" and "A") in supergraph but "Query.f" has subtype "String!" in subgraph "B"."#)]
fn field_type_winner_does_not_depend_on_registration_order(
    #[case] order: &[&str],
    #[case] expected: &str,
) {
    let definitions = [
        ("A", "type Query { f: String }"),
        ("B", "type Query { f: String! }"),
        ("C", "type Query { f: String }"),
    ];
    let result = merge(&services(order, &definitions));

    let messages = hint_messages(&result);
    assert_eq!(messages.len(), 1);
    assert!(
        messages[0].ends_with(expected),
        "unexpected hint: {}",
        messages[0]
    );
    let schema = super::supergraph(&result);
    assert_eq!(super::object(schema, "Query").fields["f"].ty.to_string(), "String");
}

#[rstest]
#[case::first_keyed(&["N", "K1", "K2"], "K1")]
#[case::other_keyed_first(&["N", "K2", "K1"], "K2")]
#[case::keyless_last(&["K2", "K1", "N"], "K2")]
fn entity_hint_names_the_first_registered_keyed_subgraph(
    #[case] order: &[&str],
    #[case] keyed: &str,
) {
    let definitions = [
        ("N", "type Query { t: T } type T { id: ID }"),
        ("K1", r#"type T @key(fields: "id") { id: ID }"#),
        ("K2", r#"type T @key(fields: "id") { id: ID }"#),
    ];
    let result = merge(&services(order, &definitions));

    assert_eq!(
        hint_messages(&result),
        vec![format!(
            r#"Type "T" is declared as an entity (has a @key applied) in some but not all defining subgraphs: it has no @key in subgraph "N" but has some @key in subgraph "{keyed}"."#
        )]
    );
}

#[test]
fn elements_follow_first_seen_order() {
    let result = merge(&[
        ServiceDefinition {
            name: "Subgraph1",
            type_defs: r#"
            type Query {
              b: Kind
            }

            enum Kind {
              Y
            }
            "#,
        },
        ServiceDefinition {
            name: "Subgraph2",
            type_defs: r#"
            type Query {
              a: Int
              b: Kind
            }

            enum Kind {
              X
              Y
            }
            "#,
        },
    ]);
    let schema = super::supergraph(&result);

    let fields: Vec<&str> = super::object(schema, "Query")
        .fields
        .keys()
        .map(|name| name.as_str())
        .collect();
    assert_eq!(fields, vec!["b", "a"]);
    let Some(apollo_compiler::schema::ExtendedType::Enum(kind)) = schema.types.get("Kind") else {
        panic!("missing Kind enum");
    };
    let values: Vec<&str> = kind.values.keys().map(|name| name.as_str()).collect();
    assert_eq!(values, vec!["Y", "X"]);
}

#[test]
fn hints_and_errors_follow_discovery_order() {
    let result = merge(&[
        ServiceDefinition {
            name: "Subgraph1",
            type_defs: r#"
            type Query {
              z: Int
              t: T
              e: E
            }

            type T {
              a: Int
              b: Int
            }

            enum E {
              A
              B
            }
            "#,
        },
        ServiceDefinition {
            name: "Subgraph2",
            type_defs: r#"
            type Query {
              z: String
            }

            enum E {
              A
            }

            type T {
              a: Int
            }
            "#,
        },
    ]);

    let coordinates: Vec<&str> = result
        .hints
        .iter()
        .map(|hint| hint.coordinate.as_str())
        .collect();
    assert_eq!(coordinates, vec!["T.b", "E.B"]);
    assert_eq!(error_messages(&result).len(), 1);
}

#[test]
fn merging_is_deterministic() {
    let definitions = [
        ServiceDefinition {
            name: "Subgraph1",
            type_defs: r#"
            type Query {
              t: T
              u: U
            }

            type T @key(fields: "id") {
              id: ID!
              f(a: Int = 1): String
            }

            union U = T | V

            type V {
              v: Int
            }
            "#,
        },
        ServiceDefinition {
            name: "Subgraph2",
            type_defs: r#"
            type T @key(fields: "id") {
              id: ID!
              f(a: Int!): String!
            }

            union U = V

            type V {
              v: Int
              w: Int
            }
            "#,
        },
    ];
    let registered = subgraphs(&definitions);

    let first = merge_subgraphs(&registered);
    let second = merge_subgraphs(&registered);

    assert!(first.is_success(), "{:?}", first.errors);
    assert_eq!(first.hints, second.hints);
    assert_eq!(
        first.supergraph.as_ref().map(|schema| schema.to_string()),
        second.supergraph.as_ref().map(|schema| schema.to_string())
    );
}
