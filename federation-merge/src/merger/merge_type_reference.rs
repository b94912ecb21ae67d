use apollo_compiler::ast::Type;

use crate::error::MergeError;
use crate::merger::Merger;
use crate::merger::Sources;
use crate::merger::compatibility::TypeComparison;
use crate::merger::compatibility::TypePosition;
use crate::merger::hints::HintCode;

/// The kind of element whose type reference is merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ElementKind {
    Field,
    Argument,
    InputField,
}

impl ElementKind {
    pub(crate) fn position(self) -> TypePosition {
        match self {
            ElementKind::Field => TypePosition::Output,
            ElementKind::Argument | ElementKind::InputField => TypePosition::Input,
        }
    }

    fn word(self) -> &'static str {
        match self {
            ElementKind::Field | ElementKind::InputField => "field",
            ElementKind::Argument => "argument",
        }
    }

    fn hint_code(self) -> HintCode {
        match self {
            ElementKind::Field | ElementKind::InputField => HintCode::InconsistentFieldType,
            ElementKind::Argument => HintCode::InconsistentArgumentType,
        }
    }

    fn mismatch_error(self, message: String) -> MergeError {
        match self {
            ElementKind::Field | ElementKind::InputField => {
                MergeError::FieldTypeMismatch { message }
            }
            ElementKind::Argument => MergeError::ArgumentTypeMismatch { message },
        }
    }
}

impl Merger<'_> {
    /// Picks the supergraph type of an element from the types subgraphs give it.
    ///
    /// Output positions take the most general type, so that every subgraph's values fit in it.
    /// Input positions take the most restrictive one, so that every subgraph accepts what
    /// clients send. Returns `None`, after recording an error, if the types are incompatible.
    pub(in crate::merger) fn merge_type_reference(
        &mut self,
        kind: ElementKind,
        coordinate: &str,
        sources: &Sources<&Type>,
    ) -> Option<Type> {
        let position = kind.position();
        let compatibility = self.compatibility();

        let mut merged: Option<&Type> = None;
        for ty in sources.values().flatten().copied() {
            merged = Some(match merged {
                None => ty,
                Some(current) => match (compatibility.compare(position, current, ty), position) {
                    (TypeComparison::FirstIsSubtype, TypePosition::Output)
                    | (TypeComparison::SecondIsSubtype, TypePosition::Input) => ty,
                    _ => current,
                },
            });
        }
        let merged = merged?;

        let compatible = sources.values().flatten().all(|ty| match position {
            TypePosition::Output => compatibility.is_subtype(position, ty, merged),
            TypePosition::Input => compatibility.is_subtype(position, merged, ty),
        });
        if !compatible {
            self.error_reporter.report_mismatch_error(
                |message| kind.mismatch_error(message),
                &format!(
                    "Type of {} \"{coordinate}\" is incompatible across subgraphs: it has ",
                    kind.word()
                ),
                sources,
                |ty| Some(format!("type \"{ty}\"")),
            );
            return None;
        }

        let relation = match position {
            TypePosition::Output => "subtype",
            TypePosition::Input => "supertype",
        };
        self.error_reporter.report_mismatch_hint(
            kind.hint_code(),
            coordinate,
            &format!(
                "Type of {} \"{coordinate}\" is inconsistent but compatible across subgraphs: ",
                kind.word()
            ),
            &merged.to_string(),
            sources,
            |ty| ty.map(|ty| ty.to_string()),
            |ty, subgraphs| {
                format!(
                    "will use type \"{ty}\" (from {}) in supergraph but \"{coordinate}\" has ",
                    subgraphs.unwrap_or_default()
                )
            },
            |ty, subgraphs| format!("{relation} \"{ty}\" in {subgraphs}"),
        );
        Some(merged.clone())
    }
}
