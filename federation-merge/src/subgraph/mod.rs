use std::fmt::Debug;
use std::fmt::Formatter;

use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::Schema;
use apollo_compiler::ast::Directive;
use apollo_compiler::ast::FieldDefinition;
use apollo_compiler::ast::OperationType;
use apollo_compiler::ast::Type;
use apollo_compiler::name;
use apollo_compiler::schema::Component;
use apollo_compiler::schema::ComponentName;
use apollo_compiler::schema::DirectiveList;
use apollo_compiler::schema::ExtendedType;
use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::error::SubgraphError;
use crate::schema::is_key_directive;

/// One independently authored schema taking part in a merge.
pub struct Subgraph {
    pub name: String,
    pub url: String,
    pub schema: Schema,
}

impl Subgraph {
    pub fn new(name: &str, url: &str, schema: Schema) -> Self {
        Self {
            name: name.to_owned(),
            url: url.to_owned(),
            schema,
        }
    }

    /// Parses `schema_str` into a subgraph.
    ///
    /// Only syntax and schema-building errors are reported: federation directives such as
    /// `@key` do not need to be defined in the document.
    pub fn parse(name: &str, url: &str, schema_str: &str) -> Result<Self, SubgraphError> {
        let schema = Schema::builder()
            .adopt_orphan_extensions()
            .parse(schema_str, name)
            .build()
            .map_err(|with_errors| SubgraphError::InvalidGraphQL {
                name: name.to_owned(),
                message: with_errors.errors.to_string(),
            })?;
        Ok(Self::new(name, url, schema))
    }

    /// Whether `type_name` is one of this subgraph's root operation types.
    ///
    /// Without an explicit root, the default `Query`, `Mutation` and `Subscription` names apply.
    pub fn is_root_type(&self, type_name: &str) -> bool {
        let definition = &self.schema.schema_definition;
        [
            (&definition.query, "Query"),
            (&definition.mutation, "Mutation"),
            (&definition.subscription, "Subscription"),
        ]
        .into_iter()
        .any(|(root, default_name)| match root {
            Some(root) => root.name.as_str() == type_name,
            None => default_name == type_name && self.schema.types.contains_key(type_name),
        })
    }

    /// The `@key` applications of `type_name`, empty if the type is not an entity in this
    /// subgraph (or is not defined by it).
    pub fn key_directives(&self, type_name: &str) -> Vec<&Node<Directive>> {
        let directives: Option<&DirectiveList> = match self.schema.types.get(type_name) {
            Some(ExtendedType::Object(object)) => Some(&object.directives),
            Some(ExtendedType::Interface(interface)) => Some(&interface.directives),
            _ => None,
        };
        directives
            .into_iter()
            .flat_map(|directives| directives.iter())
            .filter(|directive| is_key_directive(directive))
            .map(|directive| &directive.node)
            .collect()
    }

    pub fn is_entity(&self, type_name: &str) -> bool {
        !self.key_directives(type_name).is_empty()
    }

    /// Renames root operation types declared under another name, as in
    /// `schema { query: RootQuery }`, to `Query`, `Mutation` and `Subscription`.
    ///
    /// Roots then merge by name across subgraphs. Fails if the default name is already taken by
    /// another type.
    fn normalize_root_types(&mut self) -> Result<(), SubgraphError> {
        let renames: Vec<(OperationType, Name, Name)> = self
            .schema
            .schema_definition
            .iter_root_operations()
            .filter_map(|(operation, root)| {
                let default_name = default_root_type_name(operation);
                (root.name != default_name).then(|| (operation, root.name.clone(), default_name))
            })
            .collect();
        if let Some((operation, root, _)) = renames
            .iter()
            .find(|(_, _, default_name)| self.schema.types.contains_key(default_name))
        {
            let name = self.name.clone();
            let root = root.to_string();
            return Err(match operation {
                OperationType::Query => SubgraphError::RootQueryUsed { name, root },
                OperationType::Mutation => SubgraphError::RootMutationUsed { name, root },
                OperationType::Subscription => {
                    SubgraphError::RootSubscriptionUsed { name, root }
                }
            });
        }
        for (_, from, to) in &renames {
            rename_object_type(&mut self.schema, from, to);
        }
        Ok(())
    }

    /// The implementations of an interface or the members of a union, as declared by this
    /// subgraph.
    pub(crate) fn is_possible_type(&self, abstract_type: &Name, candidate: &Name) -> bool {
        match self.schema.types.get(abstract_type) {
            Some(ExtendedType::Interface(_)) => match self.schema.types.get(candidate) {
                Some(ExtendedType::Object(object)) => object
                    .implements_interfaces
                    .iter()
                    .any(|itf| itf.name == *abstract_type),
                Some(ExtendedType::Interface(interface)) => interface
                    .implements_interfaces
                    .iter()
                    .any(|itf| itf.name == *abstract_type),
                _ => false,
            },
            Some(ExtendedType::Union(union_type)) => union_type
                .members
                .iter()
                .any(|member| member.name == *candidate),
            _ => false,
        }
    }
}

fn default_root_type_name(operation: OperationType) -> Name {
    match operation {
        OperationType::Query => name!("Query"),
        OperationType::Mutation => name!("Mutation"),
        OperationType::Subscription => name!("Subscription"),
    }
}

/// Renames the object type `from` to `to`, along with every reference to it: root operations,
/// field types and union members. Type order is preserved.
fn rename_object_type(schema: &mut Schema, from: &Name, to: &Name) {
    let definition = schema.schema_definition.make_mut();
    for root in [
        &mut definition.query,
        &mut definition.mutation,
        &mut definition.subscription,
    ]
    .into_iter()
    .flatten()
    {
        if root.name == *from {
            root.name = to.clone();
        }
    }

    schema.types = std::mem::take(&mut schema.types)
        .into_iter()
        .map(|(name, mut ty)| {
            match &mut ty {
                ExtendedType::Object(object) => {
                    let object = object.make_mut();
                    if object.name == *from {
                        object.name = to.clone();
                    }
                    rename_field_types(&mut object.fields, from, to);
                }
                ExtendedType::Interface(interface) => {
                    rename_field_types(&mut interface.make_mut().fields, from, to);
                }
                ExtendedType::Union(union_type) => {
                    let union_type = union_type.make_mut();
                    union_type.members = union_type
                        .members
                        .iter()
                        .map(|member| {
                            if member.name == *from {
                                ComponentName {
                                    origin: member.origin.clone(),
                                    name: to.clone(),
                                }
                            } else {
                                member.clone()
                            }
                        })
                        .collect();
                }
                _ => {}
            }
            let name = if name == *from { to.clone() } else { name };
            (name, ty)
        })
        .collect();
}

fn rename_field_types(
    fields: &mut apollo_compiler::collections::IndexMap<Name, Component<FieldDefinition>>,
    from: &Name,
    to: &Name,
) {
    for field in fields.values_mut() {
        if field.ty.inner_named_type() == from {
            let field = field.make_mut();
            field.ty = renamed_type(&field.ty, to);
        }
    }
}

/// `ty` with its innermost named type replaced by `to`.
fn renamed_type(ty: &Type, to: &Name) -> Type {
    match ty {
        Type::Named(_) => Type::Named(to.clone()),
        Type::NonNullNamed(_) => Type::NonNullNamed(to.clone()),
        Type::List(inner) => Type::List(Box::new(renamed_type(inner, to))),
        Type::NonNullList(inner) => Type::NonNullList(Box::new(renamed_type(inner, to))),
    }
}

impl Debug for Subgraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, r#"name: {}, url: {}"#, self.name, self.url)
    }
}

/// The ordered set of subgraphs to merge.
///
/// Registration order is significant: whenever subgraphs disagree and a single one of them has
/// to be credited, the first registered wins.
#[derive(Debug, Default)]
pub struct Subgraphs {
    subgraphs: IndexMap<String, Subgraph>,
}

impl Subgraphs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `subgraph`, renaming its root operation types to their default names.
    pub fn add(&mut self, mut subgraph: Subgraph) -> Result<(), SubgraphError> {
        match self.subgraphs.entry(subgraph.name.clone()) {
            Entry::Occupied(_) => Err(SubgraphError::DuplicateName {
                name: subgraph.name,
            }),
            Entry::Vacant(entry) => {
                subgraph.normalize_root_types()?;
                entry.insert(subgraph);
                Ok(())
            }
        }
    }

    /// Subgraph names, in precedence order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.subgraphs.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&Subgraph> {
        self.subgraphs.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Subgraph> {
        self.subgraphs.values()
    }

    pub fn len(&self) -> usize {
        self.subgraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subgraphs.is_empty()
    }
}

impl<'a> IntoIterator for &'a Subgraphs {
    type Item = &'a Subgraph;
    type IntoIter = indexmap::map::Values<'a, String, Subgraph>;

    fn into_iter(self) -> Self::IntoIter {
        self.subgraphs.values()
    }
}
