//! Pure Markdown generation helpers shared by both converters.
//!
//! - [`escape`]: table cell escaping and backtick counting
//! - [`slugify`]: section anchors and GitHub-style slugs
//! - [`blocks`]: headings, anchors, fences, indentation and pipe tables
//!
//! Nothing here touches a document tree; the converters decide what to
//! emit and these functions decide how it is spelled.

mod blocks;
mod escape;
mod slugify;

pub use blocks::{
    MAX_HEADING_DEPTH, anchor_id, anchor_name, fence, heading, indent, pipe_table,
};
pub use escape::{escape_table_cell, fence_width, inline_code_ticks};
pub use slugify::{derive_anchor, slugify};
