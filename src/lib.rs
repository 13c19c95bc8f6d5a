//! tabledb - An embeddable, deterministic, in-memory table store
//!
//! Schema-light records, secondary field indexes, a cached sort slot,
//! and an eager predicate query layer behind a per-table façade.

pub mod adapter;
pub mod catalog;
pub mod index;
pub mod observability;
pub mod query;
pub mod sort;
pub mod store;
pub mod table;
