//! Domain models for the encyclopedia.
//!
//! - [`Entry`]: a titled page of raw Markdown, the only persistent entity.
//! - [`SearchInput`], [`CreateEntryInput`], [`UpdateEntryInput`]: form bodies as
//!   submitted by the browser, before validation (see [`crate::forms`]).

mod entry;

pub use entry::*;
