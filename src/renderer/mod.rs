//! 渲染器模块

pub mod style_resolver;
pub mod widget_renderer;

pub use style_resolver::StarPalette;
pub use widget_renderer::WidgetRenderer;
