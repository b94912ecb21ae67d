use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::ast::DirectiveList;
use apollo_compiler::ast::FieldDefinition;
use apollo_compiler::ast::InputValueDefinition;
use apollo_compiler::ast::Type;
use apollo_compiler::ast::Value;
use indexmap::IndexSet;
use itertools::Itertools;

use crate::error::MergeError;
use crate::merger::Merger;
use crate::merger::Sources;
use crate::merger::deprecated_directive;
use crate::merger::hints::HintCode;
use crate::merger::merge_description;
use crate::merger::merge_type_reference::ElementKind;
use crate::utils::human_readable::human_readable_subgraph_names;

/// Whether every caller must provide a value for the argument or input field.
pub(crate) fn is_required(value: &InputValueDefinition) -> bool {
    value.ty.is_non_null() && value.default_value.is_none()
}

fn print_value(value: &Value) -> String {
    value.serialize().no_indent().to_string()
}

/// Prints a default value with object fields sorted by name at every depth, so that defaults
/// only differing in field order compare equal.
fn print_default_value(value: &Value) -> String {
    print_value(&sorted_value(value))
}

fn sorted_value(value: &Value) -> Value {
    match value {
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), Node::new(sorted_value(value))))
                .sorted_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()))
                .collect(),
        ),
        Value::List(items) => Value::List(
            items
                .iter()
                .map(|item| Node::new(sorted_value(item)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn default_value_label(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::Argument => "Argument",
        ElementKind::Field | ElementKind::InputField => "Input field",
    }
}

impl Merger<'_> {
    /// Merges the arguments of the field at `field_coordinate`, from the subgraphs defining that
    /// field.
    ///
    /// Arguments are the union of the subgraphs' arguments. An optional argument missing from
    /// some subgraphs is kept; a required one is an error.
    pub(in crate::merger) fn merge_arguments(
        &mut self,
        field_coordinate: &str,
        sources: &Sources<&FieldDefinition>,
    ) -> Vec<Node<InputValueDefinition>> {
        let names: IndexSet<&Name> = sources
            .values()
            .flatten()
            .flat_map(|field| field.arguments.iter().map(|arg| &arg.name))
            .collect();

        let mut merged = Vec::new();
        for name in names {
            let coordinate = format!("{field_coordinate}({name}:)");
            let arg_sources: Sources<&InputValueDefinition> = sources
                .iter()
                .filter_map(|(idx, field)| {
                    let field = (*field)?;
                    let arg = field.arguments.iter().find(|arg| arg.name == *name);
                    Some((*idx, arg.map(|arg| &**arg)))
                })
                .collect();

            if let Some((required_in, missing_from)) = self.required_but_missing(&arg_sources) {
                self.error_reporter
                    .add_error(MergeError::RequiredArgumentMissingInSomeSubgraph {
                        message: format!(
                            "Argument \"{coordinate}\" is required in some subgraphs but does not appear in all subgraphs: it is required in {required_in} but does not appear in {missing_from}"
                        ),
                    });
                continue;
            }
            if let Some(arg) =
                self.merge_input_value(ElementKind::Argument, &coordinate, &arg_sources)
            {
                merged.push(Node::new(arg));
            }
        }
        merged
    }

    /// The subgraphs requiring a value for an element and the subgraphs lacking the element, if
    /// there are both.
    pub(in crate::merger) fn required_but_missing(
        &self,
        sources: &Sources<&InputValueDefinition>,
    ) -> Option<(String, String)> {
        let required_in: Vec<&str> = sources
            .iter()
            .filter(|(_, value)| value.is_some_and(is_required))
            .map(|(idx, _)| self.subgraph_name(*idx))
            .collect();
        let missing_from: Vec<&str> = sources
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(idx, _)| self.subgraph_name(*idx))
            .collect();
        if required_in.is_empty() || missing_from.is_empty() {
            return None;
        }
        Some((
            human_readable_subgraph_names(required_in),
            human_readable_subgraph_names(missing_from),
        ))
    }

    /// Merges an argument or an input field: its type, default value, description and
    /// deprecation.
    ///
    /// Returns `None` if the types are incompatible.
    pub(in crate::merger) fn merge_input_value(
        &mut self,
        kind: ElementKind,
        coordinate: &str,
        sources: &Sources<&InputValueDefinition>,
    ) -> Option<InputValueDefinition> {
        let name = sources.values().flatten().next()?.name.clone();
        let type_sources: Sources<&Type> = sources
            .iter()
            .map(|(idx, value)| (*idx, value.map(|value| &*value.ty)))
            .collect();
        let ty = self.merge_type_reference(kind, coordinate, &type_sources)?;
        let default_value = self.merge_default_value(kind, coordinate, sources);
        let description = merge_description(
            coordinate,
            sources.values().flatten().map(|value| value.description.as_ref()),
        );
        let directives = DirectiveList(
            deprecated_directive(sources.values().flatten().map(|value| &value.directives))
                .into_iter()
                .collect(),
        );
        Some(InputValueDefinition {
            description,
            name,
            ty: Node::new(ty),
            default_value,
            directives,
        })
    }

    /// The default value of the first subgraph defining one.
    ///
    /// A default defined in only some subgraphs is a hint, different defaults are an error.
    fn merge_default_value(
        &mut self,
        kind: ElementKind,
        coordinate: &str,
        sources: &Sources<&InputValueDefinition>,
    ) -> Option<Node<Value>> {
        let label = default_value_label(kind);
        let defaults: IndexSet<String> = sources
            .values()
            .flatten()
            .filter_map(|value| value.default_value.as_deref().map(print_default_value))
            .collect();

        if defaults.len() > 1 {
            self.error_reporter.report_mismatch_error(
                |message| match kind {
                    ElementKind::Argument => MergeError::ArgumentDefaultMismatch { message },
                    ElementKind::Field | ElementKind::InputField => {
                        MergeError::InputFieldDefaultMismatch { message }
                    }
                },
                &format!(
                    "{label} \"{coordinate}\" has incompatible default values across subgraphs: it has "
                ),
                sources,
                |value| {
                    value
                        .default_value
                        .as_deref()
                        .map(|default| format!("default value {}", print_default_value(default)))
                },
            );
        } else if let Some(default) = defaults.first() {
            self.error_reporter.report_mismatch_hint(
                HintCode::InconsistentDefaultValue,
                coordinate,
                &format!("{label} \"{coordinate}\" has a default value in only some subgraphs: "),
                &format!("default value {default}"),
                sources,
                |value| {
                    value.map(|value| match value.default_value.as_deref() {
                        Some(default) => format!("default value {}", print_default_value(default)),
                        None => "no default value".to_string(),
                    })
                },
                |elt, subgraphs| {
                    format!(
                        "will use {elt} (from {}) in supergraph but \"{coordinate}\" has ",
                        subgraphs.unwrap_or_default()
                    )
                },
                |elt, subgraphs| format!("{elt} in {subgraphs}"),
            );
        }

        sources
            .values()
            .flatten()
            .find_map(|value| value.default_value.clone())
    }
}
