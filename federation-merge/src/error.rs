/// Errors raised while registering the subgraphs of a merge.
///
/// These are reported as soon as they happen and never end up in a
/// [`MergeResult`](crate::merger::MergeResult).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, strum_macros::IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SubgraphError {
    #[error("A subgraph named \"{name}\" has already been registered")]
    DuplicateName { name: String },
    #[error("[{name}] invalid GraphQL schema: {message}")]
    #[strum(serialize = "INVALID_GRAPHQL")]
    InvalidGraphQL { name: String, message: String },
    #[error(
        "[{name}] The schema has a type named \"Query\" but it is not set as the query root type (\"{root}\" is instead): this is not supported by federation. If a root type does not use its default name, there should be no other type with that default name"
    )]
    RootQueryUsed { name: String, root: String },
    #[error(
        "[{name}] The schema has a type named \"Mutation\" but it is not set as the mutation root type (\"{root}\" is instead): this is not supported by federation. If a root type does not use its default name, there should be no other type with that default name"
    )]
    RootMutationUsed { name: String, root: String },
    #[error(
        "[{name}] The schema has a type named \"Subscription\" but it is not set as the subscription root type (\"{root}\" is instead): this is not supported by federation. If a root type does not use its default name, there should be no other type with that default name"
    )]
    RootSubscriptionUsed { name: String, root: String },
}

impl SubgraphError {
    pub fn code(&self) -> &'static str {
        self.into()
    }
}

/// A fatal incompatibility between subgraphs.
///
/// Merge errors are accumulated during a merge instead of aborting it, so that
/// as many of them as possible are surfaced in one run. Any of them prevents
/// the production of a supergraph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, strum_macros::IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MergeError {
    #[error("No subgraphs to merge: at least one subgraph must be provided")]
    NoSubgraphs,
    #[error("Subgraph name \"{name}\" cannot be transformed into a valid GraphQL name")]
    InvalidSubgraphName { name: String },
    #[error("{message}")]
    TypeKindMismatch { message: String },
    #[error("{message}")]
    FieldTypeMismatch { message: String },
    #[error("{message}")]
    ArgumentTypeMismatch { message: String },
    #[error("{message}")]
    ArgumentDefaultMismatch { message: String },
    #[error("{message}")]
    InputFieldDefaultMismatch { message: String },
    #[error("{message}")]
    RequiredArgumentMissingInSomeSubgraph { message: String },
    #[error("{message}")]
    RequiredInputFieldMissingInSomeSubgraph { message: String },
    #[error("{message}")]
    InterfaceFieldNoImplem { message: String },
}

impl MergeError {
    /// The stable code of this error, e.g. `FIELD_TYPE_MISMATCH`.
    pub fn code(&self) -> &'static str {
        self.into()
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}
