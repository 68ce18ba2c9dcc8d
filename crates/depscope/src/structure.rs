//! Graph structures built from decorated trees.
//!
//! A [`DependencyGraph`] exists only for the duration of one render call.
//! Node ids are assigned on first encounter, so the same input always yields
//! the same ids.

mod graph;

pub(crate) use graph::{DependencyGraph, NodeRole};
