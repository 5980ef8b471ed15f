// src/core/mod.rs

pub mod html;
pub mod net;
pub mod sanitize;

pub use html::{HtmlPage, MarkupTree, TextLeaf};
pub use net::{Fetcher, HttpFetcher};
