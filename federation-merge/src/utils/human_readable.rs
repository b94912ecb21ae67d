//! Rendering of lists in hint and error messages.

/// Lists longer than this many characters are cut short with `...`.
const OUTPUT_LENGTH_LIMIT: usize = 100;

/// Joins `items` as in `a, b and c`.
///
/// `first_separator` replaces the separator after the first item, which error messages use
/// to produce `a but b and c`.
pub(crate) fn join_strings(
    items: &[String],
    separator: &str,
    first_separator: Option<&str>,
    last_separator: &str,
) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [first, last] => format!(
            "{first}{}{last}",
            first_separator.unwrap_or(last_separator)
        ),
        [first, middle @ .., last] => format!(
            "{first}{}{}{last_separator}{last}",
            first_separator.unwrap_or(separator),
            middle.join(separator),
        ),
    }
}

/// Renders `items` prefixed with `prefix` (one item) or `prefix_plural` (several items).
pub(crate) fn human_readable_list(items: &[String], prefix: &str, prefix_plural: &str) -> String {
    match items {
        [] => String::new(),
        [only] => format!("{prefix} {only}"),
        _ => {
            let mut length = 0;
            let fitting = items
                .iter()
                .take_while(|item| {
                    length += item.len();
                    length <= OUTPUT_LENGTH_LIMIT
                })
                .count()
                // a very long first item is still shown
                .max(1);
            if fitting >= items.len() {
                format!(
                    "{prefix_plural} {}",
                    join_strings(items, ", ", None, " and ")
                )
            } else {
                format!("{prefix_plural} {}, ...", items[..fitting].join(", "))
            }
        }
    }
}

/// Renders subgraph names as `subgraph "A"` or `subgraphs "A", "B" and "C"`.
pub(crate) fn human_readable_subgraph_names<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let quoted: Vec<String> = names.into_iter().map(|name| format!("\"{name}\"")).collect();
    human_readable_list(&quoted, "subgraph", "subgraphs")
}
