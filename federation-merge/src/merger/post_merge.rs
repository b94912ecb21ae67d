use apollo_compiler::Name;
use apollo_compiler::schema::ExtendedType;

use crate::error::MergeError;
use crate::merger::Merger;
use crate::subgraph::Subgraph;
use crate::utils::human_readable::human_readable_subgraph_names;

impl Merger<'_> {
    /// Checks the merged types that only hold together across subgraphs.
    ///
    /// Subgraphs that are each valid can still merge into an object missing a field that some
    /// other subgraph declares on one of its interfaces.
    pub(in crate::merger) fn validate_merged_schema(&mut self) {
        let mut errors = Vec::new();
        for (type_name, ty) in &self.merged.types {
            let (implements_interfaces, fields) = match ty {
                ExtendedType::Object(object) => (&object.implements_interfaces, &object.fields),
                ExtendedType::Interface(interface) => {
                    (&interface.implements_interfaces, &interface.fields)
                }
                _ => continue,
            };
            for interface_name in implements_interfaces {
                let interface_name = &interface_name.name;
                let Some(ExtendedType::Interface(interface)) = self.merged.types.get(interface_name)
                else {
                    continue;
                };
                for field_name in interface.fields.keys() {
                    if fields.contains_key(field_name) {
                        continue;
                    }
                    let with_field = self
                        .subgraphs
                        .iter()
                        .filter(|subgraph| declares_field(subgraph, interface_name, field_name))
                        .map(|subgraph| subgraph.name.as_str());
                    let implementing = self
                        .subgraphs
                        .iter()
                        .filter(|subgraph| subgraph.is_possible_type(interface_name, type_name))
                        .map(|subgraph| subgraph.name.as_str());
                    errors.push(MergeError::InterfaceFieldNoImplem {
                        message: format!(
                            "Interface field \"{interface_name}.{field_name}\" is declared in {} but type \"{type_name}\", which implements \"{interface_name}\" only in {} does not have field \"{field_name}\".",
                            human_readable_subgraph_names(with_field),
                            human_readable_subgraph_names(implementing),
                        ),
                    });
                }
            }
        }
        for error in errors {
            self.error_reporter.add_error(error);
        }
    }
}

fn declares_field(subgraph: &Subgraph, interface_name: &Name, field_name: &Name) -> bool {
    matches!(
        subgraph.schema.types.get(interface_name),
        Some(ExtendedType::Interface(interface)) if interface.fields.contains_key(field_name)
    )
}
