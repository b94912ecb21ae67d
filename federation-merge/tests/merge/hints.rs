use federation_merge::HintCode;
use federation_merge::HintLevel;
use pretty_assertions::assert_eq;

use super::ServiceDefinition;
use super::hint_messages;
use super::merge;
use super::object;
use super::supergraph;

#[test]
fn field_with_non_null_and_nullable_types_uses_the_nullable_one() {
    let result = merge(&[
        ServiceDefinition {
            name: "Subgraph1",
            type_defs: r#"
            type Query {
              t: T
            }

            type T @key(fields: "k") {
              k: ID
              f: String
            }
            "#,
        },
        ServiceDefinition {
            name: "Subgraph2",
            type_defs: r#"
            type T @key(fields: "k") {
              k: ID
              f: String!
            }
            "#,
        },
    ]);

    assert_eq!(result.hints.len(), 1);
    let hint = &result.hints[0];
    assert_eq!(hint.code, HintCode::InconsistentFieldType);
    assert_eq!(hint.level(), HintLevel::Info);
    assert_eq!(hint.coordinate, "T.f");
    insta::assert_snapshot!(
        &hint.message,
        @r#"Type of field "T.f" is inconsistent but compatible across subgraphs: will use type "String" (from subgraph "Subgraph1") in supergraph but "T.f" has subtype "String!" in subgraph "Subgraph2"."#
    );

    let schema = supergraph(&result);
    assert_eq!(object(schema, "T").fields["f"].ty.to_string(), "String");
}

#[test]
fn argument_with_non_null_and_nullable_types_uses_the_non_null_one() {
    let result = merge(&[
        ServiceDefinition {
            name: "Subgraph1",
            type_defs: r#"
            type Query {
              f(a: Int): String
            }
            "#,
        },
        ServiceDefinition {
            name: "Subgraph2",
            type_defs: r#"
            type Query {
              f(a: Int!): String
            }
            "#,
        },
    ]);

    assert_eq!(result.hints.len(), 1);
    assert_eq!(result.hints[0].code, HintCode::InconsistentArgumentType);
    assert_eq!(result.hints[0].coordinate, "Query.f(a:)");
    insta::assert_snapshot!(
        &result.hints[0].message,
        @r#"Type of argument "Query.f(a:)" is inconsistent but compatible across subgraphs: will use type "Int!" (from subgraph "Subgraph2") in supergraph but "Query.f(a:)" has supertype "Int" in subgraph "Subgraph1"."#
    );

    let schema = supergraph(&result);
    let field = &object(schema, "Query").fields["f"];
    assert_eq!(field.arguments.len(), 1);
    assert_eq!(field.arguments[0].ty.to_string(), "Int!");
}

#[test]
fn input_field_with_non_null_and_nullable_types_uses_the_non_null_one() {
    let result = merge(&[
        ServiceDefinition {
            name: "Subgraph1",
            type_defs: r#"
            type Query {
              f(i: I): Int
            }

            input I {
              a: Int
            }
            "#,
        },
        ServiceDefinition {
            name: "Subgraph2",
            type_defs: r#"
            input I {
              a: Int!
            }
            "#,
        },
    ]);

    assert_eq!(result.hints.len(), 1);
    assert_eq!(result.hints[0].code, HintCode::InconsistentFieldType);
    insta::assert_snapshot!(
        &result.hints[0].message,
        @r#"Type of field "I.a" is inconsistent but compatible across subgraphs: will use type "Int!" (from subgraph "Subgraph2") in supergraph but "I.a" has supertype "Int" in subgraph "Subgraph1"."#
    );
}

#[test]
fn default_value_defined_in_some_subgraphs() {
    let result = merge(&[
        ServiceDefinition {
            name: "Subgraph1",
            type_defs: r#"
            type Query {
              f(a: Int = 1): String
            }
            "#,
        },
        ServiceDefinition {
            name: "Subgraph2",
            type_defs: r#"
            type Query {
              f(a: Int): String
            }
            "#,
        },
    ]);

    assert_eq!(result.hints.len(), 1);
    assert_eq!(result.hints[0].code, HintCode::InconsistentDefaultValue);
    assert_eq!(result.hints[0].level(), HintLevel::Warn);
    insta::assert_snapshot!(
        &result.hints[0].message,
        @r#"Argument "Query.f(a:)" has a default value in only some subgraphs: will use default value 1 (from subgraph "Subgraph1") in supergraph but "Query.f(a:)" has no default value in subgraph "Subgraph2"."#
    );

    let schema = supergraph(&result);
    let argument = &object(schema, "Query").fields["f"].arguments[0];
    assert_eq!(
        argument.default_value.as_ref().map(|value| value.to_string()),
        Some("1".to_string())
    );
}

#[test]
fn entity_with_key_in_some_subgraphs() {
    let result = merge(&[
        ServiceDefinition {
            name: "Subgraph1",
            type_defs: r#"
            type Query {
              t: T
            }

            type T @key(fields: "id") {
              id: ID
            }
            "#,
        },
        ServiceDefinition {
            name: "Subgraph2",
            type_defs: r#"
            type T {
              id: ID
            }
            "#,
        },
    ]);

    assert_eq!(result.hints.len(), 1);
    assert_eq!(result.hints[0].code, HintCode::InconsistentEntity);
    assert_eq!(result.hints[0].coordinate, "T");
    insta::assert_snapshot!(
        &result.hints[0].message,
        @r#"Type "T" is declared as an entity (has a @key applied) in some but not all defining subgraphs: it has no @key in subgraph "Subgraph2" but has some @key in subgraph "Subgraph1"."#
    );
}

#[test]
fn entity_hint_is_reported_for_each_subgraph_without_key() {
    let result = merge(&[
        ServiceDefinition {
            name: "Subgraph1",
            type_defs: r#"
            type Query {
              t: T
            }

            type T {
              id: ID
            }
            "#,
        },
        ServiceDefinition {
            name: "Subgraph2",
            type_defs: r#"
            type T @key(fields: "id") {
              id: ID
            }
            "#,
        },
        ServiceDefinition {
            name: "Subgraph3",
            type_defs: r#"
            type T {
              id: ID
            }
            "#,
        },
    ]);

    assert_eq!(
        hint_messages(&result),
        vec![
            r#"Type "T" is declared as an entity (has a @key applied) in some but not all defining subgraphs: it has no @key in subgraph "Subgraph1" but has some @key in subgraph "Subgraph2"."#,
            r#"Type "T" is declared as an entity (has a @key applied) in some but not all defining subgraphs: it has no @key in subgraph "Subgraph3" but has some @key in subgraph "Subgraph2"."#,
        ]
    );
}

#[test]
fn value_type_field_defined_in_some_subgraphs() {
    let result = merge(&[
        ServiceDefinition {
            name: "Subgraph1",
            type_defs: r#"
            type Query {
              t: T
              i: I
            }

            type T {
              a: Int
              b: Int
            }

            interface I {
              a: Int
              b: Int
            }
            "#,
        },
        ServiceDefinition {
            name: "Subgraph2",
            type_defs: r#"
            type T {
              a: Int
            }

            interface I {
              a: Int
            }
            "#,
        },
    ]);

    let codes: Vec<HintCode> = result.hints.iter().map(|hint| hint.code).collect();
    assert_eq!(
        codes,
        vec![
            HintCode::InconsistentObjectValueTypeField,
            HintCode::InconsistentInterfaceValueTypeField,
        ]
    );
    assert_eq!(
        hint_messages(&result),
        vec![
            r#"Field "T.b" of non-entity object type "T" is defined in some but not all subgraphs that define "T": "T.b" is defined in subgraph "Subgraph1" but not in subgraph "Subgraph2"."#,
            r#"Field "I.b" of non-entity interface type "I" is defined in some but not all subgraphs that define "I": "I.b" is defined in subgraph "Subgraph1" but not in subgraph "Subgraph2"."#,
        ]
    );
}

#[test]
fn fields_of_entities_and_root_types_need_not_be_everywhere() {
    let result = merge(&[
        ServiceDefinition {
            name: "Subgraph1",
            type_defs: r#"
            type Query {
              a: Int
            }

            type T @key(fields: "id") {
              id: ID
              name: String
            }
            "#,
        },
        ServiceDefinition {
            name: "Subgraph2",
            type_defs: r#"
            type Query {
              b: Int
            }

            type T @key(fields: "id") {
              id: ID
              price: Int
            }
            "#,
        },
    ]);

    assert!(result.hints.is_empty(), "{:?}", result.hints);
    let schema = supergraph(&result);
    let fields: Vec<&str> = object(schema, "T").fields.keys().map(|name| name.as_str()).collect();
    assert_eq!(fields, vec!["id", "name", "price"]);
}

#[test]
fn input_object_field_defined_in_some_subgraphs() {
    let result = merge(&[
        ServiceDefinition {
            name: "Subgraph1",
            type_defs: r#"
            type Query {
              f(i: I): Int
            }

            input I {
              a: Int
              b: Int
            }
            "#,
        },
        ServiceDefinition {
            name: "Subgraph2",
            type_defs: r#"
            input I {
              a: Int
            }
            "#,
        },
    ]);

    assert_eq!(result.hints.len(), 1);
    assert_eq!(result.hints[0].code, HintCode::InconsistentInputObjectField);
    assert_eq!(result.hints[0].coordinate, "I.b");
    insta::assert_snapshot!(
        &result.hints[0].message,
        @r#"Input object field "I.b" is defined in some but not all subgraphs that define "I": "I.b" is defined in subgraph "Subgraph1" but not in subgraph "Subgraph2"."#
    );
}

#[test]
fn union_member_defined_in_some_subgraphs() {
    let result = merge(&[
        ServiceDefinition {
            name: "Subgraph1",
            type_defs: r#"
            type Query {
              u: U
            }

            union U = A | B

            type A {
              a: Int
            }

            type B {
              b: Int
            }
            "#,
        },
        ServiceDefinition {
            name: "Subgraph2",
            type_defs: r#"
            union U = A

            type A {
              a: Int
            }
            "#,
        },
    ]);

    assert_eq!(result.hints.len(), 1);
    assert_eq!(result.hints[0].code, HintCode::InconsistentUnionMember);
    assert_eq!(result.hints[0].coordinate, "U.B");
    insta::assert_snapshot!(
        &result.hints[0].message,
        @r#"Union type "U" includes member type "B" in some but not all defining subgraphs: "B" is defined in subgraph "Subgraph1" but not in subgraph "Subgraph2"."#
    );
}

#[test]
fn enum_value_defined_in_some_subgraphs() {
    let result = merge(&[
        ServiceDefinition {
            name: "Subgraph1",
            type_defs: r#"
            type Query {
              e: E
            }

            enum E {
              V1
              V2
            }
            "#,
        },
        ServiceDefinition {
            name: "Subgraph2",
            type_defs: r#"
            enum E {
              V1
            }
            "#,
        },
        ServiceDefinition {
            name: "Subgraph3",
            type_defs: r#"
            enum E {
              V1
            }
            "#,
        },
    ]);

    assert_eq!(result.hints.len(), 1);
    assert_eq!(result.hints[0].code, HintCode::InconsistentEnumValue);
    assert_eq!(result.hints[0].level(), HintLevel::Debug);
    insta::assert_snapshot!(
        &result.hints[0].message,
        @r#"Value "V2" of enum type "E" has been added to the supergraph but is only defined in a subset of the subgraphs declaring "E": "V2" is defined in subgraph "Subgraph1" but not in subgraphs "Subgraph2" and "Subgraph3"."#
    );
}

#[test]
fn enum_value_missing_from_the_other_subgraph() {
    let result = merge(&[
        ServiceDefinition {
            name: "Subgraph1",
            type_defs: r#"
            enum T {
              V1
              V2
            }
            "#,
        },
        ServiceDefinition {
            name: "Subgraph2",
            type_defs: r#"
            enum T {
              V1
            }
            "#,
        },
    ]);

    assert!(result.is_success(), "{:?}", result.errors);
    assert_eq!(result.hints.len(), 1);
    assert_eq!(result.hints[0].code, HintCode::InconsistentEnumValue);
    assert_eq!(result.hints[0].coordinate, "T.V2");
    insta::assert_snapshot!(
        &result.hints[0].message,
        @r#"Value "V2" of enum type "T" has been added to the supergraph but is only defined in a subset of the subgraphs declaring "T": "V2" is defined in subgraph "Subgraph1" but not in subgraph "Subgraph2"."#
    );
}

#[test]
fn identical_subgraphs_produce_no_hints() {
    let type_defs = r#"
    type Query {
      t(first: Int = 10): [T!]!
    }

    type T {
      id: ID!
      kind: Kind
    }

    enum Kind {
      A
      B
    }
    "#;
    let result = merge(&[
        ServiceDefinition {
            name: "Subgraph1",
            type_defs,
        },
        ServiceDefinition {
            name: "Subgraph2",
            type_defs,
        },
    ]);

    assert!(result.is_success());
    assert!(result.hints.is_empty(), "{:?}", result.hints);
}
