//! Record model and markdown extraction for the storyforge system.
//!
//! This crate contains the domain record type, the two document grammars
//! (issue-block documents and user-story documents), the record enricher,
//! and the input file locator. Everything here is pure with respect to the
//! external tracker: parsing takes document text in and produces records
//! out, with no subprocess or network access.

pub mod enrich;
pub mod extract;
pub mod locate;
pub mod record;
pub mod story;
