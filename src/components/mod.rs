//! 组件模块

pub mod base;
pub mod rating;
pub mod star;
pub mod text;
pub mod view;

pub use base::{
    build_base_style, draw_background, get_classes, get_text_content, parse_color_str, Component,
    ComponentContext, Glyph, NodeStyle, RenderNode, TextAlign,
};
pub use rating::RatingWidgetComponent;
pub use star::{StarIconComponent, STAR_TEMPLATE_NAME};
pub use text::TextComponent;
pub use view::ViewComponent;
