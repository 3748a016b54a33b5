//! 解析器模块

pub mod css;
pub mod markup;
pub mod svg_path;

pub use css::{CssParser, LengthUnit, StyleRule, StyleSheet, StyleValue};
pub use markup::{find_by_id, MarkupNode, MarkupParser, NodeType};
pub use svg_path::{parse_path_data, parse_view_box};
