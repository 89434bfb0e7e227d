//! Aggregates - consistency boundaries of the roster

pub mod group;

pub use group::GroupAggregate;
