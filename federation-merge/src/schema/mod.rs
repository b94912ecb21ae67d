//! Helpers over the `apollo-compiler` schema model shared by the merger.

use apollo_compiler::Name;
use apollo_compiler::ast::Directive;
use apollo_compiler::ast::Value;
use apollo_compiler::schema::ExtendedType;

pub(crate) const KEY_DIRECTIVE_NAME: &str = "key";
pub(crate) const FEDERATION_KEY_DIRECTIVE_NAME: &str = "federation__key";
pub(crate) const EXTERNAL_DIRECTIVE_NAME: &str = "external";
pub(crate) const REQUIRES_DIRECTIVE_NAME: &str = "requires";
pub(crate) const PROVIDES_DIRECTIVE_NAME: &str = "provides";
pub(crate) const DEPRECATED_DIRECTIVE_NAME: &str = "deprecated";

pub(crate) const SERVICE_SDL_QUERY: &str = "_service";
pub(crate) const ENTITIES_QUERY: &str = "_entities";

/// Types added to subgraphs by federation itself; they are never part of a supergraph.
const FEDERATION_TYPES: [&str; 5] = ["_Any", "_Entity", "_Service", "FieldSet", "_FieldSet"];

/// The kind of a named GraphQL type.
///
/// The display form is the one used in merge error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TypeKind {
    #[display(fmt = "Scalar Type")]
    Scalar,
    #[display(fmt = "Object Type")]
    Object,
    #[display(fmt = "Interface Type")]
    Interface,
    #[display(fmt = "Union Type")]
    Union,
    #[display(fmt = "Enum Type")]
    Enum,
    #[display(fmt = "Input Object Type")]
    InputObject,
}

impl From<&ExtendedType> for TypeKind {
    fn from(value: &ExtendedType) -> Self {
        match value {
            ExtendedType::Scalar(_) => TypeKind::Scalar,
            ExtendedType::Object(_) => TypeKind::Object,
            ExtendedType::Interface(_) => TypeKind::Interface,
            ExtendedType::Union(_) => TypeKind::Union,
            ExtendedType::Enum(_) => TypeKind::Enum,
            ExtendedType::InputObject(_) => TypeKind::InputObject,
        }
    }
}

/// Whether a type declared by a subgraph takes part in the merge.
///
/// Built-in scalars and introspection types are filtered out separately with
/// [`ExtendedType::is_built_in`].
pub(crate) fn is_mergeable_type(type_name: &str) -> bool {
    if type_name.starts_with("federation__")
        || type_name.starts_with("link__")
        || type_name.starts_with("join__")
    {
        return false;
    }
    !FEDERATION_TYPES.contains(&type_name)
}

pub(crate) fn is_key_directive(directive: &Directive) -> bool {
    directive.name.as_str() == KEY_DIRECTIVE_NAME
        || directive.name.as_str() == FEDERATION_KEY_DIRECTIVE_NAME
}

pub(crate) fn directive_arg_value<'a>(directive: &'a Directive, arg_name: &str) -> Option<&'a Value> {
    directive
        .arguments
        .iter()
        .find(|arg| arg.name.as_str() == arg_name)
        .map(|arg| arg.value.as_ref())
}

pub(crate) fn directive_string_arg_value<'a>(
    directive: &'a Directive,
    arg_name: &str,
) -> Option<&'a str> {
    match directive_arg_value(directive, arg_name) {
        Some(Value::String(value)) => Some(value.as_str()),
        _ => None,
    }
}

pub(crate) fn directive_bool_arg_value(directive: &Directive, arg_name: &str) -> Option<bool> {
    match directive_arg_value(directive, arg_name) {
        Some(Value::Boolean(value)) => Some(*value),
        _ => None,
    }
}

/// Whether `name` is one of the fields federation adds to the root query type.
pub(crate) fn is_federation_root_field(name: &Name) -> bool {
    name.as_str() == SERVICE_SDL_QUERY || name.as_str() == ENTITIES_QUERY
}
