//! Star Render - 星级评分组件渲染引擎
//! 将声明式标记中的 rating-widget / star-icon 元素渲染为像素画布

mod canvas;
mod color;
mod geometry;
mod paint;
mod path;
pub mod text;

pub use canvas::Canvas;
pub use color::Color;
pub use geometry::{Point, Rect, Size};
pub use paint::{Paint, PaintStyle};
pub use path::Path;
pub use text::TextRenderer;

// 标记 / 样式表 / SVG 路径解析器
pub mod parser;

// 组件系统
pub mod components;

// UI 渲染器
pub mod renderer;

// 组件环境：注册表、共享样式表、共享模板
pub mod env;

// 初始化：loader 描述符与资源加载
pub mod loader;

// 错误类型
pub mod error;

pub use env::{ComponentEnv, GlyphSource};
pub use error::ComponentError;

// 单元测试
#[cfg(test)]
mod tests;
