use apollo_compiler::Name;
use itertools::Itertools;

use crate::merger::Merger;
use crate::merger::Sources;
use crate::merger::hints::HintCode;

impl Merger<'_> {
    /// Whether `type_name` is an entity, i.e. has a `@key` in at least one of the subgraphs
    /// defining it (given by registry index).
    ///
    /// Each defining subgraph without a `@key` gets its own `INCONSISTENT_ENTITY` hint, naming the
    /// first subgraph that has one.
    pub(in crate::merger) fn check_entity_consistency(
        &mut self,
        type_name: &Name,
        defining_subgraphs: impl IntoIterator<Item = usize>,
    ) -> bool {
        let (keyed, keyless): (Vec<usize>, Vec<usize>) = defining_subgraphs
            .into_iter()
            .partition(|idx| self.subgraphs[*idx].is_entity(type_name));
        let Some(&first_keyed) = keyed.first() else {
            return false;
        };

        let message = format!(
            "Type \"{type_name}\" is declared as an entity (has a @key applied) in some but not all defining subgraphs: "
        );
        for idx in keyless {
            let sources: Sources<bool> = [(idx, Some(false)), (first_keyed, Some(true))]
                .into_iter()
                .sorted_by_key(|(idx, _)| *idx)
                .collect();
            self.error_reporter.report_mismatch_hint(
                HintCode::InconsistentEntity,
                type_name,
                &message,
                "no",
                &sources,
                |keyed| keyed.map(|keyed| if *keyed { "yes" } else { "no" }.to_string()),
                |_, subgraphs| format!("it has no @key in {}", subgraphs.unwrap_or_default()),
                |_, subgraphs| format!(" but has some @key in {subgraphs}"),
            );
        }
        true
    }
}
