//! Input model for the layout engine.
//!
//! These types describe what an external decoder produces: pages of text
//! fragments at absolute positions. Nothing here carries reading order; the
//! layout module infers it.

mod document;
mod fragment;
mod page;
mod selection;

pub use document::{Document, SourceDocument};
pub use fragment::{TextFragment, DEFAULT_FONT_SIZE};
pub use page::{Page, DEFAULT_PAGE_WIDTH};
pub use selection::PageSelection;
