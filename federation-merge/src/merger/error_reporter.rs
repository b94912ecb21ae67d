use indexmap::IndexMap;
use tracing::debug;

use crate::error::MergeError;
use crate::merger::Sources;
use crate::merger::hints::CompositionHint;
use crate::merger::hints::HintCode;
use crate::utils::human_readable::human_readable_subgraph_names;
use crate::utils::human_readable::join_strings;

/// Accumulates the errors and hints of one merge, in discovery order.
pub(crate) struct ErrorReporter {
    names: Vec<String>,
    errors: Vec<MergeError>,
    hints: Vec<CompositionHint>,
}

impl ErrorReporter {
    /// `names` are the subgraph names indexed like the [`Sources`] given to the reporter.
    pub(crate) fn new(names: Vec<String>) -> Self {
        Self {
            names,
            errors: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub(crate) fn add_error(&mut self, error: MergeError) {
        debug!(code = error.code(), "{error}");
        self.errors.push(error);
    }

    pub(crate) fn add_hint(&mut self, hint: CompositionHint) {
        debug!(code = hint.code.code(), coordinate = hint.coordinate, "{}", hint.message);
        self.hints.push(hint);
    }

    pub(crate) fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<MergeError>, Vec<CompositionHint>) {
        (self.errors, self.hints)
    }

    /// Reports the different values the subgraphs have for an element as a fatal error.
    ///
    /// Values are listed in registry order. Sources for which `element_to_string` returns `None`
    /// are left out.
    pub(crate) fn report_mismatch_error<T>(
        &mut self,
        error: impl FnOnce(String) -> MergeError,
        message: &str,
        sources: &Sources<T>,
        element_to_string: impl Fn(&T) -> Option<String>,
    ) {
        let values = self.source_values(sources, |source| {
            source.and_then(&element_to_string)
        });
        let Some(distribution) = MismatchDistribution::new(None, values) else {
            return;
        };
        let printed = distribution.print(
            |elt, subgraphs| match subgraphs {
                Some(subgraphs) => format!("{elt} in {subgraphs}"),
                None => elt.to_string(),
            },
            |elt, subgraphs| format!("{elt} in {subgraphs}"),
        );
        self.add_error(error(format_mismatch(
            message,
            &printed,
            MismatchSeverity::Error,
        )));
    }

    /// Reports the different values the subgraphs have for an element as a hint.
    ///
    /// The value adopted by the supergraph is always printed first, by `supergraph_printer`,
    /// which also receives the subgraphs sharing it. Every other value follows in registry order.
    /// `element_to_string` is called with `None` for sources that define the parent but not the
    /// element itself; returning `None` leaves a source out.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn report_mismatch_hint<T>(
        &mut self,
        code: HintCode,
        coordinate: &str,
        message: &str,
        supergraph_value: &str,
        sources: &Sources<T>,
        element_to_string: impl Fn(Option<&T>) -> Option<String>,
        supergraph_printer: impl Fn(&str, Option<&str>) -> String,
        other_printer: impl Fn(&str, &str) -> String,
    ) {
        let values = self.source_values(sources, element_to_string);
        let Some(distribution) =
            MismatchDistribution::new(Some(supergraph_value.to_string()), values)
        else {
            return;
        };
        let printed = distribution.print(supergraph_printer, other_printer);
        self.add_hint(CompositionHint {
            code,
            message: format_mismatch(message, &printed, MismatchSeverity::Hint),
            coordinate: coordinate.to_string(),
        });
    }

    fn source_values<T>(
        &self,
        sources: &Sources<T>,
        element_to_string: impl Fn(Option<&T>) -> Option<String>,
    ) -> Vec<(String, String)> {
        sources
            .iter()
            .filter_map(|(idx, source)| {
                let value = element_to_string(source.as_ref())?;
                let name = self.names.get(*idx)?;
                Some((value, name.clone()))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MismatchSeverity {
    Hint,
    Error,
}

/// The values taken by one element across subgraphs, grouped with the subgraphs having them.
#[derive(Debug, PartialEq)]
pub(crate) struct MismatchDistribution {
    /// The supergraph value (the first seen one for errors) and the subgraphs sharing it.
    supergraph: (String, Vec<String>),
    others: Vec<(String, Vec<String>)>,
}

impl MismatchDistribution {
    /// Groups `(value, subgraph)` pairs by value, in first-seen order.
    ///
    /// Returns `None` when there is nothing to report: every subgraph agrees with the supergraph.
    pub(crate) fn new(
        supergraph_value: Option<String>,
        values: impl IntoIterator<Item = (String, String)>,
    ) -> Option<Self> {
        let mut groups: IndexMap<String, Vec<String>> = IndexMap::new();
        for (value, subgraph) in values {
            groups.entry(value).or_default().push(subgraph);
        }
        let supergraph_value = match supergraph_value {
            Some(value) => value,
            None => groups.keys().next()?.clone(),
        };
        let supergraph_subgraphs = groups.shift_remove(&supergraph_value).unwrap_or_default();
        if groups.is_empty() {
            return None;
        }
        Some(Self {
            supergraph: (supergraph_value, supergraph_subgraphs),
            others: groups.into_iter().collect(),
        })
    }

    /// Renders each value with its subgraphs, supergraph value first.
    pub(crate) fn print(
        &self,
        supergraph_printer: impl Fn(&str, Option<&str>) -> String,
        other_printer: impl Fn(&str, &str) -> String,
    ) -> Vec<String> {
        let (value, subgraphs) = &self.supergraph;
        let supergraph_subgraphs = (!subgraphs.is_empty())
            .then(|| human_readable_subgraph_names(subgraphs.iter().map(String::as_str)));
        std::iter::once(supergraph_printer(value, supergraph_subgraphs.as_deref()))
            .chain(self.others.iter().map(|(value, subgraphs)| {
                other_printer(
                    value,
                    &human_readable_subgraph_names(subgraphs.iter().map(String::as_str)),
                )
            }))
            .collect()
    }
}

/// Assembles a mismatch message from its prefix and printed distribution.
///
/// Hints concatenate the supergraph part with the others joined by ` and `, and end with a
/// period. Errors read `<first> but <second> and <third>`, without a period.
pub(crate) fn format_mismatch(
    message: &str,
    distribution: &[String],
    severity: MismatchSeverity,
) -> String {
    match severity {
        MismatchSeverity::Hint => {
            let Some((first, rest)) = distribution.split_first() else {
                return format!("{message}.");
            };
            format!("{message}{first}{}.", join_strings(rest, " and ", None, " and "))
        }
        MismatchSeverity::Error => format!(
            "{message}{}",
            join_strings(distribution, " and ", Some(" but "), " and ")
        ),
    }
}
