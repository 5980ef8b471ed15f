//! # Page specs
//!
//! Knows how to read a product page and nothing else: no persistence, no
//! diffing, no delivery. Each function takes markup (or a `MarkupTree`) and
//! returns plain data.
//!
//! ```text
//! runner::run_cycle → specs::product::fetch → core::net (Fetcher)
//!                                           ↘ specs::description::parse
//! ```
//!
//! Specs must stay testable offline against saved markup.
pub mod description;
pub mod product;
