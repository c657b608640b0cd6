//! Filtering and summary statistics over Key Opinion Leader (KOL) rosters.
//!
//! - [`stats::summarize`] turns any record collection into [`common::OverviewStats`].
//! - [`filter`] holds the criteria and their application.
//! - [`store::KolStore`] keeps records, criteria, filtered records and stats
//!   consistent, and drives fetches from a [`source::KolSource`].

pub mod common;
pub mod filter;
pub mod source;
pub mod stats;
pub mod store;
