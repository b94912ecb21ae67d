use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::ast;
use apollo_compiler::ast::FieldDefinition;
use apollo_compiler::ast::Type;
use apollo_compiler::collections::IndexMap;
use apollo_compiler::collections::IndexSet;
use apollo_compiler::schema::Component;
use apollo_compiler::schema::ComponentName;
use apollo_compiler::schema::DirectiveList;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::schema::InterfaceType;
use apollo_compiler::schema::ObjectType;

use crate::merger::Merger;
use crate::merger::Sources;
use crate::merger::deprecated_directive;
use crate::merger::hints::HintCode;
use crate::merger::join::JoinFieldArguments;
use crate::merger::join::join_field_applied_directive;
use crate::merger::join::join_implements_applied_directive;
use crate::merger::join::join_type_applied_directives;
use crate::merger::merge_description;
use crate::merger::merge_type_reference::ElementKind;
use crate::schema::EXTERNAL_DIRECTIVE_NAME;
use crate::schema::PROVIDES_DIRECTIVE_NAME;
use crate::schema::REQUIRES_DIRECTIVE_NAME;
use crate::schema::directive_string_arg_value;
use crate::schema::is_federation_root_field;

/// Object and interface types, which merge the same way.
pub(crate) trait HasFields {
    /// How the type is named in hint messages.
    const KIND: &'static str;
    const VALUE_TYPE_FIELD_HINT: HintCode;

    fn description(&self) -> Option<&Node<str>>;
    fn implements_interfaces(&self) -> &IndexSet<ComponentName>;
    fn fields(&self) -> &IndexMap<Name, Component<FieldDefinition>>;
}

impl HasFields for ObjectType {
    const KIND: &'static str = "object";
    const VALUE_TYPE_FIELD_HINT: HintCode = HintCode::InconsistentObjectValueTypeField;

    fn description(&self) -> Option<&Node<str>> {
        self.description.as_ref()
    }

    fn implements_interfaces(&self) -> &IndexSet<ComponentName> {
        &self.implements_interfaces
    }

    fn fields(&self) -> &IndexMap<Name, Component<FieldDefinition>> {
        &self.fields
    }
}

impl HasFields for InterfaceType {
    const KIND: &'static str = "interface";
    const VALUE_TYPE_FIELD_HINT: HintCode = HintCode::InconsistentInterfaceValueTypeField;

    fn description(&self) -> Option<&Node<str>> {
        self.description.as_ref()
    }

    fn implements_interfaces(&self) -> &IndexSet<ComponentName> {
        &self.implements_interfaces
    }

    fn fields(&self) -> &IndexMap<Name, Component<FieldDefinition>> {
        &self.fields
    }
}

/// The `fields` argument of the field's `@requires` or `@provides`.
fn field_set<'f>(field: &'f FieldDefinition, directive_name: &str) -> Option<&'f str> {
    field
        .directives
        .get(directive_name)
        .and_then(|directive| directive_string_arg_value(directive, "fields"))
}

struct MergedComposite {
    description: Option<Node<str>>,
    implements_interfaces: IndexSet<ComponentName>,
    directives: DirectiveList,
    fields: IndexMap<Name, Component<FieldDefinition>>,
}

impl Merger<'_> {
    pub(in crate::merger) fn merge_object(
        &mut self,
        type_name: &Name,
        sources: &Sources<&Node<ObjectType>>,
    ) -> ExtendedType {
        let merged = self.merge_composite(type_name, sources);
        ExtendedType::Object(Node::new(ObjectType {
            description: merged.description,
            name: type_name.clone(),
            implements_interfaces: merged.implements_interfaces,
            directives: merged.directives,
            fields: merged.fields,
        }))
    }

    pub(in crate::merger) fn merge_interface(
        &mut self,
        type_name: &Name,
        sources: &Sources<&Node<InterfaceType>>,
    ) -> ExtendedType {
        let merged = self.merge_composite(type_name, sources);
        ExtendedType::Interface(Node::new(InterfaceType {
            description: merged.description,
            name: type_name.clone(),
            implements_interfaces: merged.implements_interfaces,
            directives: merged.directives,
            fields: merged.fields,
        }))
    }

    fn merge_composite<T: HasFields>(
        &mut self,
        type_name: &Name,
        sources: &Sources<&Node<T>>,
    ) -> MergedComposite {
        let description = merge_description(
            type_name,
            sources.values().flatten().map(|ty| ty.description()),
        );

        let mut directives = DirectiveList::default();
        let mut interfaces: IndexSet<Name> = IndexSet::default();
        for (idx, ty) in sources {
            let Some(ty) = ty else {
                continue;
            };
            let graph = &self.graph_names[*idx];
            let keys = self.subgraphs[*idx].key_directives(type_name);
            directives.extend(join_type_applied_directives(graph, &keys));
            for interface in ty.implements_interfaces() {
                directives.push(join_implements_applied_directive(graph, &interface.name));
                interfaces.insert(interface.name.clone());
            }
        }

        let is_entity = self.check_entity_consistency(type_name, sources.keys().copied());
        let is_root = sources
            .keys()
            .any(|idx| self.subgraphs[*idx].is_root_type(type_name));

        let field_names: IndexSet<&Name> = sources
            .values()
            .flatten()
            .flat_map(|ty| ty.fields().keys())
            .filter(|name| !is_federation_root_field(name))
            .collect();
        let mut fields = IndexMap::default();
        for field_name in field_names {
            let coordinate = format!("{type_name}.{field_name}");
            let field_sources: Sources<&FieldDefinition> = sources
                .iter()
                .map(|(idx, ty)| {
                    let field = ty.and_then(|ty| ty.fields().get(field_name));
                    (*idx, field.map(|field| &***field))
                })
                .collect();

            if !is_entity && !is_root {
                self.error_reporter.report_mismatch_hint(
                    T::VALUE_TYPE_FIELD_HINT,
                    &coordinate,
                    &format!(
                        "Field \"{coordinate}\" of non-entity {} type \"{type_name}\" is defined in some but not all subgraphs that define \"{type_name}\": ",
                        T::KIND
                    ),
                    "yes",
                    &field_sources,
                    |field| Some(if field.is_some() { "yes" } else { "no" }.to_string()),
                    |_, subgraphs| {
                        format!(
                            "\"{coordinate}\" is defined in {}",
                            subgraphs.unwrap_or_default()
                        )
                    },
                    |_, subgraphs| format!(" but not in {subgraphs}"),
                );
            }

            if let Some(field) = self.merge_field(&coordinate, field_name, &field_sources) {
                fields.insert(field_name.clone(), Component::new(field));
            }
        }

        MergedComposite {
            description,
            implements_interfaces: interfaces.into_iter().map(ComponentName::from).collect(),
            directives,
            fields,
        }
    }

    /// Merges one field of an object or interface type. Returns `None` if its return types are
    /// incompatible.
    fn merge_field(
        &mut self,
        coordinate: &str,
        field_name: &Name,
        sources: &Sources<&FieldDefinition>,
    ) -> Option<FieldDefinition> {
        let type_sources: Sources<&Type> = sources
            .iter()
            .map(|(idx, field)| (*idx, field.map(|field| &field.ty)))
            .collect();
        let ty = self.merge_type_reference(ElementKind::Field, coordinate, &type_sources)?;
        let arguments = self.merge_arguments(coordinate, sources);

        let all_types_equal = type_sources.values().flatten().all(|source_ty| **source_ty == ty);
        let join_fields: Vec<(usize, JoinFieldArguments)> = sources
            .iter()
            .filter_map(|(idx, field)| {
                let field = (*field)?;
                Some((
                    *idx,
                    JoinFieldArguments {
                        ty: (!all_types_equal).then_some(&field.ty),
                        external: field.directives.has(EXTERNAL_DIRECTIVE_NAME),
                        requires: field_set(field, REQUIRES_DIRECTIVE_NAME),
                        provides: field_set(field, PROVIDES_DIRECTIVE_NAME),
                    },
                ))
            })
            .collect();
        let needs_join_field = sources.values().any(Option::is_none)
            || join_fields.iter().any(|(_, args)| !args.is_empty());

        let mut directives = ast::DirectiveList(
            deprecated_directive(sources.values().flatten().map(|field| &field.directives))
                .into_iter()
                .collect(),
        );
        if needs_join_field {
            for (idx, args) in &join_fields {
                directives.push(join_field_applied_directive(&self.graph_names[*idx], args));
            }
        }

        Some(FieldDefinition {
            description: merge_description(
                coordinate,
                sources.values().flatten().map(|field| field.description.as_ref()),
            ),
            name: field_name.clone(),
            arguments,
            ty,
            directives,
        })
    }
}
