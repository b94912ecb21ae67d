use apollo_compiler::Name;
use apollo_compiler::ast::Type;

use crate::subgraph::Subgraph;

/// Where a type reference appears, which decides the subtyping rules applying to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypePosition {
    /// Field return types.
    Output,
    /// Argument and input field types.
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TypeComparison {
    Equal,
    FirstIsSubtype,
    SecondIsSubtype,
    Incompatible,
}

/// Decides how the type references used by different subgraphs for the same element relate.
///
/// A type is a subtype of another if it is a non-null version of it (`String!` of `String`),
/// recursively through lists of the same depth. In output position, and only when
/// `allow_implementation_subtyping` is set, an object or interface is also a subtype of an
/// interface it implements, and a member of a union is a subtype of that union, as long as one
/// subgraph declares that relation.
pub(crate) struct TypeCompatibility<'a> {
    subgraphs: &'a [&'a Subgraph],
    allow_implementation_subtyping: bool,
}

impl<'a> TypeCompatibility<'a> {
    pub(crate) fn new(subgraphs: &'a [&'a Subgraph], allow_implementation_subtyping: bool) -> Self {
        Self {
            subgraphs,
            allow_implementation_subtyping,
        }
    }

    pub(crate) fn compare(&self, position: TypePosition, first: &Type, second: &Type) -> TypeComparison {
        if first == second {
            TypeComparison::Equal
        } else if self.is_strict_subtype(position, first, second) {
            TypeComparison::FirstIsSubtype
        } else if self.is_strict_subtype(position, second, first) {
            TypeComparison::SecondIsSubtype
        } else {
            TypeComparison::Incompatible
        }
    }

    pub(crate) fn is_subtype(&self, position: TypePosition, subtype: &Type, supertype: &Type) -> bool {
        subtype == supertype || self.is_strict_subtype(position, subtype, supertype)
    }

    pub(crate) fn is_strict_subtype(
        &self,
        position: TypePosition,
        subtype: &Type,
        supertype: &Type,
    ) -> bool {
        match (subtype, supertype) {
            (Type::NonNullNamed(sub), Type::Named(sup)) => {
                sub == sup || self.is_named_subtype(position, sub, sup)
            }
            (Type::NonNullNamed(sub), Type::NonNullNamed(sup))
            | (Type::Named(sub), Type::Named(sup)) => {
                sub != sup && self.is_named_subtype(position, sub, sup)
            }
            (Type::NonNullList(sub), Type::List(sup)) => self.is_subtype(position, sub, sup),
            (Type::NonNullList(sub), Type::NonNullList(sup))
            | (Type::List(sub), Type::List(sup)) => self.is_strict_subtype(position, sub, sup),
            // nullable is never a subtype of non-null, and list depths must match
            _ => false,
        }
    }

    fn is_named_subtype(&self, position: TypePosition, subtype: &Name, supertype: &Name) -> bool {
        position == TypePosition::Output
            && self.allow_implementation_subtyping
            && self
                .subgraphs
                .iter()
                .any(|subgraph| subgraph.is_possible_type(supertype, subtype))
    }
}
