use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::ast;
use apollo_compiler::collections::IndexSet;
use apollo_compiler::schema::Component;
use apollo_compiler::schema::DirectiveList;
use apollo_compiler::schema::EnumType;
use apollo_compiler::schema::EnumValueDefinition;
use apollo_compiler::schema::ExtendedType;

use crate::merger::Merger;
use crate::merger::Sources;
use crate::merger::deprecated_directive;
use crate::merger::hints::HintCode;
use crate::merger::join::join_enum_value_applied_directive;
use crate::merger::join::join_type_applied_directives;
use crate::merger::merge_description;

impl Merger<'_> {
    /// An enum's values are the union of the values subgraphs declare.
    pub(in crate::merger) fn merge_enum(
        &mut self,
        type_name: &Name,
        sources: &Sources<&Node<EnumType>>,
    ) -> ExtendedType {
        let mut directives = DirectiveList::default();
        for (idx, enum_type) in sources {
            if enum_type.is_some() {
                directives.extend(join_type_applied_directives(&self.graph_names[*idx], &[]));
            }
        }

        let value_names: IndexSet<&Name> = sources
            .values()
            .flatten()
            .flat_map(|enum_type| enum_type.values.keys())
            .collect();
        let mut values = apollo_compiler::collections::IndexMap::default();
        for value_name in value_names {
            let coordinate = format!("{type_name}.{value_name}");
            let value_sources: Sources<&EnumValueDefinition> = sources
                .iter()
                .map(|(idx, enum_type)| {
                    let value = enum_type.and_then(|enum_type| enum_type.values.get(value_name));
                    (*idx, value.map(|value| &***value))
                })
                .collect();

            self.error_reporter.report_mismatch_hint(
                HintCode::InconsistentEnumValue,
                &coordinate,
                &format!(
                    "Value \"{value_name}\" of enum type \"{type_name}\" has been added to the supergraph but is only defined in a subset of the subgraphs declaring \"{type_name}\": "
                ),
                "yes",
                &value_sources,
                |value| Some(if value.is_some() { "yes" } else { "no" }.to_string()),
                |_, subgraphs| {
                    format!("\"{value_name}\" is defined in {}", subgraphs.unwrap_or_default())
                },
                |_, subgraphs| format!(" but not in {subgraphs}"),
            );

            let mut value_directives = ast::DirectiveList(
                deprecated_directive(value_sources.values().flatten().map(|value| &value.directives))
                    .into_iter()
                    .collect(),
            );
            for (idx, value) in &value_sources {
                if value.is_some() {
                    value_directives.push(join_enum_value_applied_directive(&self.graph_names[*idx]));
                }
            }
            values.insert(
                value_name.clone(),
                Component::new(EnumValueDefinition {
                    description: merge_description(
                        &coordinate,
                        value_sources
                            .values()
                            .flatten()
                            .map(|value| value.description.as_ref()),
                    ),
                    value: value_name.clone(),
                    directives: value_directives,
                }),
            );
        }

        ExtendedType::Enum(Node::new(EnumType {
            description: merge_description(
                type_name,
                sources
                    .values()
                    .flatten()
                    .map(|enum_type| enum_type.description.as_ref()),
            ),
            name: type_name.clone(),
            directives,
            values,
        }))
    }
}
