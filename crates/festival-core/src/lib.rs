//! Core types and normalisation logic for the festival SQL generator.
//!
//! This crate is deliberately free of file-format and SQL dependencies. It
//! turns a [`table::RawTable`] (whatever reader produced it) into
//! [`record::FestivalRow`]s: canonical master/event records with
//! deterministic identities. Rendering those rows is `festival-sql`'s job.

pub mod columns;
pub mod dates;
pub mod error;
pub mod identity;
pub mod normalize;
pub mod record;
pub mod table;

pub use error::{Error, Result};
