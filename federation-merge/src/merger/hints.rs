use std::fmt;
use std::fmt::Display;

use serde::Serialize;
use strum::IntoEnumIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::IntoStaticStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum HintLevel {
    Warn,
    Info,
    Debug,
}

/// The closed catalogue of composition hints.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum_macros::IntoStaticStr,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum HintCode {
    InconsistentFieldType,
    InconsistentArgumentType,
    InconsistentDefaultValue,
    InconsistentEntity,
    InconsistentObjectValueTypeField,
    InconsistentInterfaceValueTypeField,
    InconsistentInputObjectField,
    InconsistentUnionMember,
    InconsistentEnumValue,
}

impl HintCode {
    pub fn code(&self) -> &'static str {
        self.into()
    }

    pub fn level(&self) -> HintLevel {
        match self {
            HintCode::InconsistentFieldType
            | HintCode::InconsistentArgumentType
            | HintCode::InconsistentEntity => HintLevel::Info,
            HintCode::InconsistentDefaultValue | HintCode::InconsistentInputObjectField => {
                HintLevel::Warn
            }
            HintCode::InconsistentObjectValueTypeField
            | HintCode::InconsistentInterfaceValueTypeField
            | HintCode::InconsistentUnionMember
            | HintCode::InconsistentEnumValue => HintLevel::Debug,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            HintCode::InconsistentFieldType => {
                "Indicates that a field does not have the exact same types in all subgraphs, but that the types are \"compatible\" (2 types are compatible if one is a non-nullable version of the other, a list version, a subtype, or a combination of the former)."
            }
            HintCode::InconsistentArgumentType => {
                "Indicates that an argument type (of a field/input field/directive definition) does not have the exact same type in all subgraphs, but that the types are \"compatible\" (two types are compatible if one is a non-nullable version of the other, a list version, a subtype, or a combination of the former)."
            }
            HintCode::InconsistentDefaultValue => {
                "Indicates that the default value of an argument or input field is only defined in some of the subgraphs that define it."
            }
            HintCode::InconsistentEntity => {
                "Indicates that an object is declared as an entity (has a `@key`) in only some of the subgraphs in which the object is defined."
            }
            HintCode::InconsistentObjectValueTypeField => {
                "Indicates that a field of an object \"value type\" (has no `@key` in any subgraph) is not defined in all the subgraphs that declare the type."
            }
            HintCode::InconsistentInterfaceValueTypeField => {
                "Indicates that a field of an interface \"value type\" (has no `@key` in any subgraph) is not defined in all the subgraphs that declare the type."
            }
            HintCode::InconsistentInputObjectField => {
                "Indicates that a field of an input object type definition is only defined in a subset of the subgraphs that declare the input object."
            }
            HintCode::InconsistentUnionMember => {
                "Indicates that a member of a union type definition is only defined in a subset of the subgraphs that declare the union."
            }
            HintCode::InconsistentEnumValue => {
                "Indicates that a value of an enum type definition is defined in only a subset of the subgraphs that declare the enum."
            }
        }
    }

    /// Every hint code, in catalogue order.
    pub fn all() -> impl Iterator<Item = HintCode> {
        HintCode::iter()
    }
}

impl Display for HintCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A non-fatal observation about the merged subgraphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompositionHint {
    pub code: HintCode,
    pub message: String,
    /// Schema coordinate of the element the hint is about, e.g. `T.f(a:)`.
    pub coordinate: String,
}

impl CompositionHint {
    pub fn level(&self) -> HintLevel {
        self.code.level()
    }
}

impl Display for CompositionHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {}", self.code, self.message)
    }
}
