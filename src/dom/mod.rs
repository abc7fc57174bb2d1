//! Element tree shared by both converters.
//!
//! - [`arena`]: the arena-allocated tree and its read accessors
//! - [`xml`]: strict tree building from quick-xml events
//! - [`tree_sink`]: lenient tree building through html5ever

mod arena;
mod tree_sink;
mod xml;

pub use arena::{Attribute, Dom, Node, NodeData, NodeId, plain_name};
pub use tree_sink::{DomSink, parse_html};
pub use xml::parse_xml;
