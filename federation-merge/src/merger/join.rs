//! The link and join spec definitions a supergraph carries, and the applications of the join
//! directives that record which subgraph contributed what.

use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::Schema;
use apollo_compiler::ast::Argument;
use apollo_compiler::ast::Directive;
use apollo_compiler::ast::DirectiveDefinition;
use apollo_compiler::ast::DirectiveLocation;
use apollo_compiler::ast::Type;
use apollo_compiler::ast::Value;
use apollo_compiler::name;
use apollo_compiler::schema::Component;
use apollo_compiler::schema::EnumType;
use apollo_compiler::schema::EnumValueDefinition;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::schema::InputValueDefinition;
use apollo_compiler::schema::ScalarType;
use apollo_compiler::ty;
use indexmap::IndexSet;

use crate::error::MergeError;
use crate::schema::directive_bool_arg_value;
use crate::schema::directive_string_arg_value;
use crate::subgraph::Subgraph;

pub(crate) const LINK_SPEC_URL: &str = "https://specs.apollo.dev/link/v1.0";
pub(crate) const JOIN_SPEC_URL: &str = "https://specs.apollo.dev/join/v0.3";

pub(crate) const JOIN_GRAPH_ENUM_NAME: Name = name!("join__Graph");
pub(crate) const JOIN_TYPE_DIRECTIVE_NAME: Name = name!("join__type");
pub(crate) const JOIN_FIELD_DIRECTIVE_NAME: Name = name!("join__field");
pub(crate) const JOIN_IMPLEMENTS_DIRECTIVE_NAME: Name = name!("join__implements");
pub(crate) const JOIN_UNION_MEMBER_DIRECTIVE_NAME: Name = name!("join__unionMember");
pub(crate) const JOIN_ENUM_VALUE_DIRECTIVE_NAME: Name = name!("join__enumValue");

/// Computes the `join__Graph` value of each subgraph, in registry order.
///
/// Names are upper-cased and every character that cannot appear in a GraphQL name becomes `_`.
/// A leading digit gets a `_` prefix, and names colliding after that get a `_<n>` suffix.
pub(crate) fn graph_enum_values<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<Name>, MergeError> {
    let mut taken: IndexSet<String> = IndexSet::new();
    names
        .into_iter()
        .map(|name| {
            let mut sanitized: String = name
                .chars()
                .map(|c| {
                    let c = c.to_ascii_uppercase();
                    if c.is_ascii_alphanumeric() || c == '_' {
                        c
                    } else {
                        '_'
                    }
                })
                .collect();
            if sanitized.starts_with(|c: char| c.is_ascii_digit()) {
                sanitized.insert(0, '_');
            }
            let mut candidate = sanitized.clone();
            let mut suffix = 1;
            while taken.contains(&candidate) {
                candidate = format!("{sanitized}_{suffix}");
                suffix += 1;
            }
            let value = Name::new(&candidate).map_err(|_| MergeError::InvalidSubgraphName {
                name: name.to_string(),
            })?;
            taken.insert(candidate);
            Ok(value)
        })
        .collect()
}

/// Adds `@link` for the link and join specs to the schema definition, along with every type and
/// directive definition those specs need.
pub(crate) fn add_core_features(supergraph: &mut Schema, subgraphs: &[(&Subgraph, Name)]) {
    let schema_definition = supergraph.schema_definition.make_mut();
    schema_definition
        .directives
        .push(Component::new(link_applied_directive(LINK_SPEC_URL, None)));
    schema_definition.directives.push(Component::new(link_applied_directive(
        JOIN_SPEC_URL,
        Some(name!("EXECUTION")),
    )));

    let link_purpose = link_purpose_enum_type();
    supergraph
        .types
        .insert(link_purpose.name.clone(), ExtendedType::Enum(Node::new(link_purpose)));
    for scalar_name in [name!("link__Import"), name!("join__FieldSet")] {
        supergraph.types.insert(
            scalar_name.clone(),
            ExtendedType::Scalar(Node::new(ScalarType {
                description: None,
                name: scalar_name,
                directives: Default::default(),
            })),
        );
    }
    let join_graph = join_graph_enum_type(subgraphs);
    supergraph
        .types
        .insert(join_graph.name.clone(), ExtendedType::Enum(Node::new(join_graph)));

    for definition in [
        link_directive_definition(),
        join_enum_value_directive_definition(),
        join_field_directive_definition(),
        join_graph_directive_definition(),
        join_implements_directive_definition(),
        join_type_directive_definition(),
        join_union_member_directive_definition(),
    ] {
        supergraph
            .directive_definitions
            .insert(definition.name.clone(), Node::new(definition));
    }
}

fn argument(name: Name, value: Value) -> Node<Argument> {
    Node::new(Argument {
        name,
        value: Node::new(value),
    })
}

fn argument_definition(name: Name, ty: Type, default_value: Option<Value>) -> Node<InputValueDefinition> {
    Node::new(InputValueDefinition {
        description: None,
        name,
        ty: Node::new(ty),
        default_value: default_value.map(Node::new),
        directives: Default::default(),
    })
}

fn link_applied_directive(url: &str, purpose: Option<Name>) -> Directive {
    let mut arguments = vec![argument(name!("url"), Value::String(url.to_string()))];
    if let Some(purpose) = purpose {
        arguments.push(argument(name!("for"), Value::Enum(purpose)));
    }
    Directive {
        name: name!("link"),
        arguments,
    }
}

/// directive @link(url: String, as: String, for: link__Purpose, import: [link__Import]) repeatable on SCHEMA
fn link_directive_definition() -> DirectiveDefinition {
    DirectiveDefinition {
        description: None,
        name: name!("link"),
        arguments: vec![
            argument_definition(name!("url"), ty!(String), None),
            argument_definition(name!("as"), ty!(String), None),
            argument_definition(name!("for"), ty!(link__Purpose), None),
            argument_definition(name!("import"), ty!([link__Import]), None),
        ],
        repeatable: true,
        locations: vec![DirectiveLocation::Schema],
    }
}

/// enum link__Purpose { SECURITY EXECUTION }
fn link_purpose_enum_type() -> EnumType {
    let mut link_purpose = EnumType {
        description: None,
        name: name!("link__Purpose"),
        directives: Default::default(),
        values: Default::default(),
    };
    for (value, description) in [
        (
            name!("SECURITY"),
            "`SECURITY` features provide metadata necessary to securely resolve fields.",
        ),
        (
            name!("EXECUTION"),
            "`EXECUTION` features provide metadata necessary for operation execution.",
        ),
    ] {
        link_purpose.values.insert(
            value.clone(),
            Component::new(EnumValueDefinition {
                description: Some(description.into()),
                value,
                directives: Default::default(),
            }),
        );
    }
    link_purpose
}

/// enum join__Graph, one value per subgraph carrying `@join__graph(name:, url:)`
fn join_graph_enum_type(subgraphs: &[(&Subgraph, Name)]) -> EnumType {
    let mut join_graph = EnumType {
        description: None,
        name: JOIN_GRAPH_ENUM_NAME,
        directives: Default::default(),
        values: Default::default(),
    };
    for (subgraph, graph) in subgraphs {
        let join_graph_directive = Directive {
            name: name!("join__graph"),
            arguments: vec![
                argument(name!("name"), Value::String(subgraph.name.clone())),
                argument(name!("url"), Value::String(subgraph.url.clone())),
            ],
        };
        let mut value = EnumValueDefinition {
            description: None,
            value: graph.clone(),
            directives: Default::default(),
        };
        value.directives.push(Node::new(join_graph_directive));
        join_graph.values.insert(graph.clone(), Component::new(value));
    }
    join_graph
}

/// directive @join__enumValue(graph: join__Graph!) repeatable on ENUM_VALUE
fn join_enum_value_directive_definition() -> DirectiveDefinition {
    DirectiveDefinition {
        description: None,
        name: JOIN_ENUM_VALUE_DIRECTIVE_NAME,
        arguments: vec![argument_definition(name!("graph"), ty!(join__Graph!), None)],
        repeatable: true,
        locations: vec![DirectiveLocation::EnumValue],
    }
}

/// directive @join__field(
///   graph: join__Graph,
///   requires: join__FieldSet,
///   provides: join__FieldSet,
///   type: String,
///   external: Boolean,
///   override: String,
///   usedOverridden: Boolean
/// ) repeatable on FIELD_DEFINITION | INPUT_FIELD_DEFINITION
fn join_field_directive_definition() -> DirectiveDefinition {
    DirectiveDefinition {
        description: None,
        name: JOIN_FIELD_DIRECTIVE_NAME,
        arguments: vec![
            argument_definition(name!("graph"), ty!(join__Graph), None),
            argument_definition(name!("requires"), ty!(join__FieldSet), None),
            argument_definition(name!("provides"), ty!(join__FieldSet), None),
            argument_definition(name!("type"), ty!(String), None),
            argument_definition(name!("external"), ty!(Boolean), None),
            argument_definition(name!("override"), ty!(String), None),
            argument_definition(name!("usedOverridden"), ty!(Boolean), None),
        ],
        repeatable: true,
        locations: vec![
            DirectiveLocation::FieldDefinition,
            DirectiveLocation::InputFieldDefinition,
        ],
    }
}

/// directive @join__graph(name: String!, url: String!) on ENUM_VALUE
fn join_graph_directive_definition() -> DirectiveDefinition {
    DirectiveDefinition {
        description: None,
        name: name!("join__graph"),
        arguments: vec![
            argument_definition(name!("name"), ty!(String!), None),
            argument_definition(name!("url"), ty!(String!), None),
        ],
        repeatable: false,
        locations: vec![DirectiveLocation::EnumValue],
    }
}

/// directive @join__implements(graph: join__Graph!, interface: String!) repeatable on OBJECT | INTERFACE
fn join_implements_directive_definition() -> DirectiveDefinition {
    DirectiveDefinition {
        description: None,
        name: JOIN_IMPLEMENTS_DIRECTIVE_NAME,
        arguments: vec![
            argument_definition(name!("graph"), ty!(join__Graph!), None),
            argument_definition(name!("interface"), ty!(String!), None),
        ],
        repeatable: true,
        locations: vec![DirectiveLocation::Interface, DirectiveLocation::Object],
    }
}

/// directive @join__type(
///   graph: join__Graph!,
///   key: join__FieldSet,
///   extension: Boolean! = false,
///   resolvable: Boolean! = true,
///   isInterfaceObject: Boolean! = false
/// ) repeatable on OBJECT | INTERFACE | UNION | ENUM | INPUT_OBJECT | SCALAR
fn join_type_directive_definition() -> DirectiveDefinition {
    DirectiveDefinition {
        description: None,
        name: JOIN_TYPE_DIRECTIVE_NAME,
        arguments: vec![
            argument_definition(name!("graph"), ty!(join__Graph!), None),
            argument_definition(name!("key"), ty!(join__FieldSet), None),
            argument_definition(name!("extension"), ty!(Boolean!), Some(Value::Boolean(false))),
            argument_definition(name!("resolvable"), ty!(Boolean!), Some(Value::Boolean(true))),
            argument_definition(
                name!("isInterfaceObject"),
                ty!(Boolean!),
                Some(Value::Boolean(false)),
            ),
        ],
        repeatable: true,
        locations: vec![
            DirectiveLocation::Enum,
            DirectiveLocation::InputObject,
            DirectiveLocation::Interface,
            DirectiveLocation::Object,
            DirectiveLocation::Scalar,
            DirectiveLocation::Union,
        ],
    }
}

/// directive @join__unionMember(graph: join__Graph!, member: String!) repeatable on UNION
fn join_union_member_directive_definition() -> DirectiveDefinition {
    DirectiveDefinition {
        description: None,
        name: JOIN_UNION_MEMBER_DIRECTIVE_NAME,
        arguments: vec![
            argument_definition(name!("graph"), ty!(join__Graph!), None),
            argument_definition(name!("member"), ty!(String!), None),
        ],
        repeatable: true,
        locations: vec![DirectiveLocation::Union],
    }
}

/// `@join__type(graph:)` applications for one subgraph defining a type: one per `@key`, or a
/// single keyless one.
pub(crate) fn join_type_applied_directives(
    graph: &Name,
    key_directives: &[&Node<Directive>],
) -> Vec<Component<Directive>> {
    let join_type = Directive {
        name: JOIN_TYPE_DIRECTIVE_NAME,
        arguments: vec![argument(name!("graph"), Value::Enum(graph.clone()))],
    };
    let mut result: Vec<Directive> = key_directives
        .iter()
        .filter_map(|key| {
            let fields = directive_string_arg_value(key, "fields")?;
            let mut with_key = join_type.clone();
            with_key
                .arguments
                .push(argument(name!("key"), Value::String(fields.to_string())));
            if directive_bool_arg_value(key, "resolvable") == Some(false) {
                with_key
                    .arguments
                    .push(argument(name!("resolvable"), Value::Boolean(false)));
            }
            Some(with_key)
        })
        .collect();
    if result.is_empty() {
        result.push(join_type);
    }
    result.into_iter().map(Component::new).collect()
}

/// What one subgraph says about a field, as recorded by `@join__field`.
#[derive(Debug, Default)]
pub(crate) struct JoinFieldArguments<'a> {
    /// The subgraph's own type for the field, when it differs from the supergraph's.
    pub(crate) ty: Option<&'a Type>,
    pub(crate) external: bool,
    pub(crate) requires: Option<&'a str>,
    pub(crate) provides: Option<&'a str>,
}

impl JoinFieldArguments<'_> {
    pub(crate) fn is_empty(&self) -> bool {
        self.ty.is_none() && !self.external && self.requires.is_none() && self.provides.is_none()
    }
}

pub(crate) fn join_field_applied_directive(graph: &Name, args: &JoinFieldArguments) -> Node<Directive> {
    let mut join_field = Directive {
        name: JOIN_FIELD_DIRECTIVE_NAME,
        arguments: vec![argument(name!("graph"), Value::Enum(graph.clone()))],
    };
    if let Some(requires) = args.requires {
        join_field
            .arguments
            .push(argument(name!("requires"), Value::String(requires.to_string())));
    }
    if let Some(provides) = args.provides {
        join_field
            .arguments
            .push(argument(name!("provides"), Value::String(provides.to_string())));
    }
    if let Some(ty) = args.ty {
        join_field
            .arguments
            .push(argument(name!("type"), Value::String(ty.to_string())));
    }
    if args.external {
        join_field
            .arguments
            .push(argument(name!("external"), Value::Boolean(true)));
    }
    Node::new(join_field)
}

pub(crate) fn join_implements_applied_directive(graph: &Name, interface: &Name) -> Component<Directive> {
    Component::new(Directive {
        name: JOIN_IMPLEMENTS_DIRECTIVE_NAME,
        arguments: vec![
            argument(name!("graph"), Value::Enum(graph.clone())),
            argument(name!("interface"), Value::String(interface.to_string())),
        ],
    })
}

pub(crate) fn join_union_member_applied_directive(graph: &Name, member: &Name) -> Component<Directive> {
    Component::new(Directive {
        name: JOIN_UNION_MEMBER_DIRECTIVE_NAME,
        arguments: vec![
            argument(name!("graph"), Value::Enum(graph.clone())),
            argument(name!("member"), Value::String(member.to_string())),
        ],
    })
}

pub(crate) fn join_enum_value_applied_directive(graph: &Name) -> Node<Directive> {
    Node::new(Directive {
        name: JOIN_ENUM_VALUE_DIRECTIVE_NAME,
        arguments: vec![argument(name!("graph"), Value::Enum(graph.clone()))],
    })
}
