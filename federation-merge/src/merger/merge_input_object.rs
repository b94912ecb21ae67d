use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::ast::InputValueDefinition;
use apollo_compiler::collections::IndexMap;
use apollo_compiler::collections::IndexSet;
use apollo_compiler::schema::Component;
use apollo_compiler::schema::DirectiveList;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::schema::InputObjectType;

use crate::error::MergeError;
use crate::merger::Merger;
use crate::merger::Sources;
use crate::merger::hints::HintCode;
use crate::merger::join::JoinFieldArguments;
use crate::merger::join::join_field_applied_directive;
use crate::merger::join::join_type_applied_directives;
use crate::merger::merge_description;
use crate::merger::merge_type_reference::ElementKind;

impl Merger<'_> {
    pub(in crate::merger) fn merge_input_object(
        &mut self,
        type_name: &Name,
        sources: &Sources<&Node<InputObjectType>>,
    ) -> ExtendedType {
        let mut directives = DirectiveList::default();
        for (idx, input_object) in sources {
            if input_object.is_some() {
                directives.extend(join_type_applied_directives(&self.graph_names[*idx], &[]));
            }
        }

        let field_names: IndexSet<&Name> = sources
            .values()
            .flatten()
            .flat_map(|input_object| input_object.fields.keys())
            .collect();
        let mut fields = IndexMap::default();
        for field_name in field_names {
            let coordinate = format!("{type_name}.{field_name}");
            let field_sources: Sources<&InputValueDefinition> = sources
                .iter()
                .map(|(idx, input_object)| {
                    let field = input_object.and_then(|input_object| input_object.fields.get(field_name));
                    (*idx, field.map(|field| &***field))
                })
                .collect();

            if let Some((required_in, missing_from)) = self.missing_input_field_is_fatal(&field_sources) {
                self.error_reporter
                    .add_error(MergeError::RequiredInputFieldMissingInSomeSubgraph {
                        message: format!(
                            "Input object field \"{coordinate}\" is required in some subgraphs but does not appear in all subgraphs: it is required in {required_in} but does not appear in {missing_from}"
                        ),
                    });
                continue;
            }
            self.error_reporter.report_mismatch_hint(
                HintCode::InconsistentInputObjectField,
                &coordinate,
                &format!(
                    "Input object field \"{coordinate}\" is defined in some but not all subgraphs that define \"{type_name}\": "
                ),
                "yes",
                &field_sources,
                |field| Some(if field.is_some() { "yes" } else { "no" }.to_string()),
                |_, subgraphs| format!("\"{coordinate}\" is defined in {}", subgraphs.unwrap_or_default()),
                |_, subgraphs| format!(" but not in {subgraphs}"),
            );

            let Some(mut field) =
                self.merge_input_value(ElementKind::InputField, &coordinate, &field_sources)
            else {
                continue;
            };
            let all_types_equal = field_sources
                .values()
                .flatten()
                .all(|source| *source.ty == *field.ty);
            if !all_types_equal || field_sources.values().any(Option::is_none) {
                for (idx, source) in &field_sources {
                    let Some(source) = source else {
                        continue;
                    };
                    let args = JoinFieldArguments {
                        ty: (!all_types_equal).then_some(&*source.ty),
                        ..Default::default()
                    };
                    field
                        .directives
                        .push(join_field_applied_directive(&self.graph_names[*idx], &args));
                }
            }
            fields.insert(field_name.clone(), Component::new(field));
        }

        ExtendedType::InputObject(Node::new(InputObjectType {
            description: merge_description(
                type_name,
                sources
                    .values()
                    .flatten()
                    .map(|input_object| input_object.description.as_ref()),
            ),
            name: type_name.clone(),
            directives,
            fields,
        }))
    }

    /// Whether an input field missing from some subgraphs makes the merge fail.
    ///
    /// It does when a subgraph requires callers to provide the field: a supergraph query could
    /// not both satisfy that subgraph and be accepted by the ones lacking the field. Returns the
    /// subgraphs requiring the field and the ones lacking it in that case.
    pub(in crate::merger) fn missing_input_field_is_fatal(
        &self,
        sources: &Sources<&InputValueDefinition>,
    ) -> Option<(String, String)> {
        self.required_but_missing(sources)
    }
}
