//! Merges independently authored GraphQL subgraph schemas into a single supergraph.
//!
//! ## Usage
//!
//! Register every subgraph, then merge them:
//!
//! ```
//! use federation_merge::Subgraph;
//! use federation_merge::Subgraphs;
//! use federation_merge::merge_subgraphs;
//!
//! let mut subgraphs = Subgraphs::new();
//! subgraphs
//!     .add(Subgraph::parse("accounts", "http://accounts", "type Query { me: String }").unwrap())
//!     .unwrap();
//! subgraphs
//!     .add(Subgraph::parse("products", "http://products", "type Query { top: [String] }").unwrap())
//!     .unwrap();
//!
//! let result = merge_subgraphs(&subgraphs);
//! assert!(result.is_success());
//! let supergraph = result.supergraph.unwrap();
//! assert!(supergraph.types.contains_key("Query"));
//! ```
//!
//! Subgraphs disagreeing in a way the supergraph can still accommodate produce
//! [`CompositionHint`]s. Disagreements it cannot accommodate are [`MergeError`]s, and prevent
//! the production of a supergraph. Both are reported in the order they are found, and the
//! registration order of subgraphs decides which one is credited when they disagree.

#![warn(
    rustdoc::broken_intra_doc_links,
    unreachable_pub,
    unreachable_patterns,
    unused,
    unused_qualifications,
    dead_code,
    while_true,
    unconditional_panic,
    clippy::all
)]

pub mod error;
pub mod merger;
pub(crate) mod schema;
pub mod subgraph;
pub(crate) mod utils;

pub use crate::error::MergeError;
pub use crate::error::SubgraphError;
pub use crate::merger::CompositionOptions;
pub use crate::merger::MergeResult;
pub use crate::merger::hints::CompositionHint;
pub use crate::merger::hints::HintCode;
pub use crate::merger::hints::HintLevel;
pub use crate::merger::merge_subgraphs;
pub use crate::merger::merge_subgraphs_with_options;
pub use crate::schema::TypeKind;
pub use crate::subgraph::Subgraph;
pub use crate::subgraph::Subgraphs;
