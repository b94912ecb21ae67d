//! Merging of subgraph schemas into a supergraph.

mod compatibility;
mod entity;
pub(crate) mod error_reporter;
pub mod hints;
mod join;
mod merge_argument;
mod merge_enum;
mod merge_input_object;
mod merge_object;
mod merge_scalar;
mod merge_type_reference;
mod merge_union;
mod post_merge;

use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::Schema;
use apollo_compiler::ast;
use apollo_compiler::ast::Directive;
use apollo_compiler::ast::DirectiveDefinition;
use apollo_compiler::ast::DirectiveLocation;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::validation::Valid;
use indexmap::IndexMap;
use indexmap::IndexSet;
use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::instrument;
use tracing::trace;

use crate::error::MergeError;
use crate::merger::compatibility::TypeCompatibility;
use crate::merger::error_reporter::ErrorReporter;
use crate::merger::hints::CompositionHint;
use crate::schema::DEPRECATED_DIRECTIVE_NAME;
use crate::schema::TypeKind;
use crate::schema::is_mergeable_type;
use crate::subgraph::Subgraph;
use crate::subgraph::Subgraphs;
use crate::utils::logging::snapshot;

/// The definitions of one element across subgraphs, keyed by the subgraph's registry index.
///
/// `None` records a subgraph that defines the element's parent but not the element itself.
pub(crate) type Sources<T> = IndexMap<usize, Option<T>>;

/// Tunes how strictly subgraphs must agree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositionOptions {
    /// Lets a field return an implementation (or union member) of the type another subgraph
    /// returns for it. The supergraph then uses the more general type.
    pub allow_implementation_subtyping: bool,
}

#[derive(Debug)]
pub struct MergeResult {
    /// The merged schema, only produced when there are no errors.
    pub supergraph: Option<Valid<Schema>>,
    pub hints: Vec<CompositionHint>,
    pub errors: Vec<MergeError>,
}

impl MergeResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

const EXECUTABLE_DIRECTIVE_LOCATIONS: [DirectiveLocation; 8] = [
    DirectiveLocation::Query,
    DirectiveLocation::Mutation,
    DirectiveLocation::Subscription,
    DirectiveLocation::Field,
    DirectiveLocation::FragmentDefinition,
    DirectiveLocation::FragmentSpread,
    DirectiveLocation::InlineFragment,
    DirectiveLocation::VariableDefinition,
];

fn is_executable_directive(directive: &DirectiveDefinition) -> bool {
    directive
        .locations
        .iter()
        .any(|loc| EXECUTABLE_DIRECTIVE_LOCATIONS.contains(loc))
}

pub(crate) struct Merger<'a> {
    pub(in crate::merger) subgraphs: Vec<&'a Subgraph>,
    pub(in crate::merger) options: CompositionOptions,
    pub(in crate::merger) error_reporter: ErrorReporter,
    pub(in crate::merger) merged: Schema,
    /// The `join__Graph` value of each subgraph, by registry index.
    pub(in crate::merger) graph_names: Vec<Name>,
}

impl<'a> Merger<'a> {
    pub(crate) fn new(subgraphs: &'a Subgraphs, options: CompositionOptions) -> Self {
        let names = subgraphs.names().map(str::to_string).collect();
        Self {
            subgraphs: subgraphs.iter().collect(),
            options,
            error_reporter: ErrorReporter::new(names),
            merged: Schema::new(),
            graph_names: Vec::new(),
        }
    }

    pub(crate) fn merge(mut self) -> MergeResult {
        if self.subgraphs.is_empty() {
            self.error_reporter.add_error(MergeError::NoSubgraphs);
            return self.into_result();
        }
        match join::graph_enum_values(self.subgraphs.iter().map(|s| s.name.as_str())) {
            Ok(graph_names) => self.graph_names = graph_names,
            Err(error) => {
                self.error_reporter.add_error(error);
                return self.into_result();
            }
        }

        let subgraphs_and_graph_names = self
            .subgraphs
            .iter()
            .copied()
            .zip(self.graph_names.iter().cloned())
            .collect_vec();
        join::add_core_features(&mut self.merged, &subgraphs_and_graph_names);
        self.merge_schema_definition();
        self.add_executable_directive_definitions();

        for type_name in self.type_names() {
            self.merge_type(&type_name);
        }
        if !self.error_reporter.has_errors() {
            self.validate_merged_schema();
        }

        self.into_result()
    }

    fn into_result(self) -> MergeResult {
        let has_errors = self.error_reporter.has_errors();
        let (errors, hints) = self.error_reporter.into_parts();
        snapshot!(hints, "merge hints");
        // Type-system rules each subgraph already satisfies hold after merging, apart from the
        // interface implementations checked by `validate_merged_schema`.
        let supergraph = (!has_errors).then(|| Valid::assume_valid(self.merged));
        snapshot!(
            "Supergraph",
            supergraph
                .as_ref()
                .map(|schema| schema.to_string())
                .unwrap_or_default(),
            "merged supergraph"
        );
        MergeResult {
            supergraph,
            hints,
            errors,
        }
    }

    pub(in crate::merger) fn compatibility(&self) -> TypeCompatibility<'_> {
        TypeCompatibility::new(&self.subgraphs, self.options.allow_implementation_subtyping)
    }

    pub(in crate::merger) fn subgraph_name(&self, idx: usize) -> &str {
        self.subgraphs
            .get(idx)
            .map_or("unknown", |subgraph| subgraph.name.as_str())
    }

    /// Every mergeable type name, in first-seen order.
    fn type_names(&self) -> IndexSet<Name> {
        self.subgraphs
            .iter()
            .flat_map(|subgraph| subgraph.schema.types.iter())
            .filter(|(name, ty)| !ty.is_built_in() && is_mergeable_type(name))
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn merge_type(&mut self, type_name: &Name) {
        trace!("Merging type \"{type_name}\"");
        let sources: Sources<&'a ExtendedType> = self
            .subgraphs
            .iter()
            .copied()
            .enumerate()
            .filter_map(|(idx, subgraph)| {
                subgraph
                    .schema
                    .types
                    .get(type_name)
                    .map(|ty| (idx, Some(ty)))
            })
            .collect();
        let kinds: IndexSet<TypeKind> = sources
            .values()
            .flatten()
            .map(|ty| TypeKind::from(*ty))
            .collect();
        let Some(&kind) = kinds.first() else {
            return;
        };
        if kinds.len() > 1 {
            self.error_reporter.report_mismatch_error(
                |message| MergeError::TypeKindMismatch { message },
                &format!("Type \"{type_name}\" has mismatched kind: it is defined as "),
                &sources,
                |ty| Some(TypeKind::from(*ty).to_string()),
            );
            return;
        }

        let merged = match kind {
            TypeKind::Scalar => self.merge_scalar(type_name, &typed_sources(&sources, scalar)),
            TypeKind::Object => self.merge_object(type_name, &typed_sources(&sources, object)),
            TypeKind::Interface => {
                self.merge_interface(type_name, &typed_sources(&sources, interface))
            }
            TypeKind::Union => self.merge_union(type_name, &typed_sources(&sources, union_type)),
            TypeKind::Enum => self.merge_enum(type_name, &typed_sources(&sources, enum_type)),
            TypeKind::InputObject => {
                self.merge_input_object(type_name, &typed_sources(&sources, input_object))
            }
        };
        self.merged.types.insert(type_name.clone(), merged);
    }

    /// Root operation types, taken from the first subgraph declaring each of them.
    fn merge_schema_definition(&mut self) {
        let supergraph_definition = self.merged.schema_definition.make_mut();
        for subgraph in &self.subgraphs {
            let definition = &subgraph.schema.schema_definition;
            if supergraph_definition.description.is_none() {
                supergraph_definition
                    .description
                    .clone_from(&definition.description);
            }
            for (supergraph_root, root, default_name) in [
                (&mut supergraph_definition.query, &definition.query, "Query"),
                (
                    &mut supergraph_definition.mutation,
                    &definition.mutation,
                    "Mutation",
                ),
                (
                    &mut supergraph_definition.subscription,
                    &definition.subscription,
                    "Subscription",
                ),
            ] {
                if supergraph_root.is_some() {
                    continue;
                }
                if root.is_some() {
                    supergraph_root.clone_from(root);
                } else if let Some((name, _)) = subgraph.schema.types.get_key_value(default_name) {
                    *supergraph_root = Some(name.clone().into());
                }
            }
        }
    }

    fn add_executable_directive_definitions(&mut self) {
        for subgraph in &self.subgraphs {
            for (name, definition) in &subgraph.schema.directive_definitions {
                if is_executable_directive(definition)
                    && !self.merged.directive_definitions.contains_key(name)
                {
                    self.merged
                        .directive_definitions
                        .insert(name.clone(), definition.clone());
                }
            }
        }
    }
}

/// The first non-blank description, in registry order.
pub(in crate::merger) fn merge_description<'d>(
    coordinate: &str,
    descriptions: impl IntoIterator<Item = Option<&'d Node<str>>>,
) -> Option<Node<str>> {
    let mut descriptions = descriptions
        .into_iter()
        .flatten()
        .filter(|description| !description.trim().is_empty());
    let first = descriptions.next()?;
    if descriptions.any(|other| **other != **first) {
        debug!("Descriptions of \"{coordinate}\" differ across subgraphs, using the first one");
    }
    Some(first.clone())
}

/// The first `@deprecated` application found, in registry order.
pub(in crate::merger) fn deprecated_directive<'d>(
    directive_lists: impl IntoIterator<Item = &'d ast::DirectiveList>,
) -> Option<Node<Directive>> {
    directive_lists
        .into_iter()
        .find_map(|directives| directives.get(DEPRECATED_DIRECTIVE_NAME))
        .cloned()
}

fn typed_sources<'s, T>(
    sources: &Sources<&'s ExtendedType>,
    extract: fn(&'s ExtendedType) -> Option<&'s Node<T>>,
) -> Sources<&'s Node<T>> {
    sources
        .iter()
        .map(|(idx, ty)| (*idx, ty.and_then(extract)))
        .collect()
}

fn scalar(ty: &ExtendedType) -> Option<&Node<apollo_compiler::schema::ScalarType>> {
    match ty {
        ExtendedType::Scalar(scalar) => Some(scalar),
        _ => None,
    }
}

fn object(ty: &ExtendedType) -> Option<&Node<apollo_compiler::schema::ObjectType>> {
    match ty {
        ExtendedType::Object(object) => Some(object),
        _ => None,
    }
}

fn interface(ty: &ExtendedType) -> Option<&Node<apollo_compiler::schema::InterfaceType>> {
    match ty {
        ExtendedType::Interface(interface) => Some(interface),
        _ => None,
    }
}

fn union_type(ty: &ExtendedType) -> Option<&Node<apollo_compiler::schema::UnionType>> {
    match ty {
        ExtendedType::Union(union_type) => Some(union_type),
        _ => None,
    }
}

fn enum_type(ty: &ExtendedType) -> Option<&Node<apollo_compiler::schema::EnumType>> {
    match ty {
        ExtendedType::Enum(enum_type) => Some(enum_type),
        _ => None,
    }
}

fn input_object(ty: &ExtendedType) -> Option<&Node<apollo_compiler::schema::InputObjectType>> {
    match ty {
        ExtendedType::InputObject(input_object) => Some(input_object),
        _ => None,
    }
}

/// Merges `subgraphs` into a supergraph with the default [`CompositionOptions`].
pub fn merge_subgraphs(subgraphs: &Subgraphs) -> MergeResult {
    merge_subgraphs_with_options(subgraphs, CompositionOptions::default())
}

/// Merges `subgraphs` into a supergraph.
///
/// Merging does not stop at the first error, so that a single run reports as many of them as
/// possible. The supergraph is only produced if there are none.
#[instrument(skip_all, fields(subgraphs = subgraphs.len()))]
pub fn merge_subgraphs_with_options(
    subgraphs: &Subgraphs,
    options: CompositionOptions,
) -> MergeResult {
    Merger::new(subgraphs, options).merge()
}
