use apollo_compiler::Name;
use apollo_compiler::Node;
use apollo_compiler::schema::DirectiveList;
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::schema::ScalarType;

use crate::merger::Merger;
use crate::merger::Sources;
use crate::merger::join::join_type_applied_directives;
use crate::merger::merge_description;

const SPECIFIED_BY_DIRECTIVE_NAME: &str = "specifiedBy";

impl Merger<'_> {
    /// Scalars merge by name alone. `@specifiedBy` is kept from the first subgraph applying it.
    pub(in crate::merger) fn merge_scalar(
        &mut self,
        type_name: &Name,
        sources: &Sources<&Node<ScalarType>>,
    ) -> ExtendedType {
        let mut directives = DirectiveList::default();
        for (idx, scalar) in sources {
            if scalar.is_some() {
                directives.extend(join_type_applied_directives(&self.graph_names[*idx], &[]));
            }
        }
        if let Some(specified_by) = sources
            .values()
            .flatten()
            .find_map(|scalar| scalar.directives.get(SPECIFIED_BY_DIRECTIVE_NAME))
        {
            directives.push(specified_by.clone());
        }

        ExtendedType::Scalar(Node::new(ScalarType {
            description: merge_description(
                type_name,
                sources.values().flatten().map(|scalar| scalar.description.as_ref()),
            ),
            name: type_name.clone(),
            directives,
        }))
    }
}
