//! depscope Core Types and Definitions
//!
//! This crate provides the foundational types shared by the depscope crates:
//!
//! - **Languages**: The fixed set of language profiles and suffix detection ([`Language`])
//! - **Dependencies**: Raw, classified and resolved dependency records ([`dependency`] module)
//! - **Trees**: The repository file/directory hierarchy ([`TreeNode`])
//! - **Builtins**: Per-language standard-library registries ([`BuiltinRegistry`])
//! - **Spans**: Byte ranges into file text ([`Span`])

pub mod builtins;
pub mod dependency;
pub mod language;
pub mod span;
pub mod tree;

pub use builtins::BuiltinRegistry;
pub use dependency::{
    ClassifiedDependency, DependencyClass, ParsedFile, RawDependency, ResolvedDependency,
    ResolvedFile,
};
pub use language::Language;
pub use span::Span;
pub use tree::{NodeKind, TreeNode, file_nodes};
