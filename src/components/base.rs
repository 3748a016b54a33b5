//! 组件基础定义

use crate::env::ComponentEnv;
use crate::error::ComponentError;
use crate::parser::css::{LengthUnit, StyleSheet, StyleValue};
use crate::parser::markup::{MarkupNode, NodeType};
use crate::{Canvas, Color, Paint, PaintStyle, Path, Rect as GeoRect};
use std::collections::HashMap;
use taffy::prelude::*;

/// 渲染节点
#[derive(Debug, Clone)]
pub struct RenderNode {
    pub tag: String,
    pub text: String,
    pub attrs: HashMap<String, String>,
    pub taffy_node: NodeId,
    pub style: NodeStyle,
    /// 矢量字形（星形图标的绘制内容）
    pub glyph: Option<Glyph>,
    pub children: Vec<RenderNode>,
}

/// 矢量字形及其坐标系
#[derive(Debug, Clone)]
pub struct Glyph {
    pub path: Path,
    pub view_box: GeoRect,
}

/// 节点样式
#[derive(Debug, Clone)]
pub struct NodeStyle {
    pub background_color: Option<Color>,
    pub text_color: Option<Color>,
    pub border_color: Option<Color>,
    pub border_width: f32,
    pub font_size: f32,
    pub opacity: f32,
    pub text_align: TextAlign,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            background_color: None,
            text_color: None,
            border_color: None,
            border_width: 0.0,
            font_size: 14.0,
            opacity: 1.0,
            text_align: TextAlign::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// 组件上下文
pub struct ComponentContext<'a> {
    pub scale_factor: f32,
    pub screen_width: f32,
    pub screen_height: f32,
    /// 宿主页面样式表
    pub stylesheet: &'a StyleSheet,
    pub env: &'a ComponentEnv,
    pub taffy: &'a mut TaffyTree,
}

/// 组件 trait
pub trait Component {
    fn build(node: &MarkupNode, ctx: &mut ComponentContext) -> Result<RenderNode, ComponentError>;
    fn draw(node: &RenderNode, canvas: &mut Canvas, x: f32, y: f32, w: f32, h: f32, sf: f32);
}

/// 解析颜色字符串
pub fn parse_color_str(s: &str) -> Option<Color> {
    match crate::parser::css::parse_value(s) {
        StyleValue::Color(c) => Some(c),
        _ => None,
    }
}

/// 获取节点的 class 列表
pub fn get_classes(node: &MarkupNode) -> Vec<&str> {
    node.get_attr("class")
        .map(|s| s.split_whitespace().collect())
        .unwrap_or_default()
}

/// 获取节点的文本内容
pub fn get_text_content(node: &MarkupNode) -> String {
    let mut s = String::new();
    for c in &node.children {
        if c.node_type == NodeType::Text {
            s.push_str(&c.text_content);
        } else {
            s.push_str(&get_text_content(c));
        }
    }
    s.trim().into()
}

/// 将 StyleValue 转换为像素值
pub fn to_px(v: &StyleValue, screen_width: f32) -> Option<f32> {
    match v {
        StyleValue::Length(n, u) => Some(match u {
            LengthUnit::Px => *n,
            LengthUnit::Percent => *n / 100.0 * screen_width,
            LengthUnit::Em | LengthUnit::Rem => *n * 16.0,
        }),
        StyleValue::Number(n) => Some(*n),
        _ => None,
    }
}

/// 将 StyleValue 转换为 Dimension
pub fn to_dimension(v: &StyleValue, screen_width: f32, sf: f32) -> Option<Dimension> {
    match v {
        StyleValue::Auto => Some(Dimension::Auto),
        StyleValue::Length(n, LengthUnit::Percent) => Some(percent(*n / 100.0)),
        _ => to_px(v, screen_width).map(|px| length(px * sf)),
    }
}

/// 构建基础 Taffy 样式
///
/// 样式表由调用方传入：普通元素用宿主页面样式表，
/// 星级组件用共享样式表。
pub fn build_base_style(
    node: &MarkupNode,
    sheet: &StyleSheet,
    screen_width: f32,
    sf: f32,
) -> (Style, NodeStyle) {
    let classes = get_classes(node);
    let css = sheet.get_styles(&classes, &node.tag_name);

    let mut ns = NodeStyle::default();

    // 默认 flex 布局，列方向
    let mut ts = Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Column,
        ..Default::default()
    };

    for (name, value) in &css {
        match name.as_str() {
            "width" => if let Some(v) = to_dimension(value, screen_width, sf) { ts.size.width = v; }
            "height" => if let Some(v) = to_dimension(value, screen_width, sf) { ts.size.height = v; }
            "min-width" => if let Some(v) = to_dimension(value, screen_width, sf) { ts.min_size.width = v; }
            "min-height" => if let Some(v) = to_dimension(value, screen_width, sf) { ts.min_size.height = v; }
            "max-width" => if let Some(v) = to_dimension(value, screen_width, sf) { ts.max_size.width = v; }
            "max-height" => if let Some(v) = to_dimension(value, screen_width, sf) { ts.max_size.height = v; }
            "padding" => if let Some(v) = to_px(value, screen_width) {
                let sv = v * sf;
                ts.padding = Rect { top: length(sv), right: length(sv), bottom: length(sv), left: length(sv) };
            }
            "padding-top" => if let Some(v) = to_px(value, screen_width) { ts.padding.top = length(v * sf); }
            "padding-right" => if let Some(v) = to_px(value, screen_width) { ts.padding.right = length(v * sf); }
            "padding-bottom" => if let Some(v) = to_px(value, screen_width) { ts.padding.bottom = length(v * sf); }
            "padding-left" => if let Some(v) = to_px(value, screen_width) { ts.padding.left = length(v * sf); }
            "margin" => if let Some(v) = to_px(value, screen_width) {
                let sv = v * sf;
                ts.margin = Rect { top: length(sv), right: length(sv), bottom: length(sv), left: length(sv) };
            }
            "margin-top" => if let Some(v) = to_px(value, screen_width) { ts.margin.top = length(v * sf); }
            "margin-right" => if let Some(v) = to_px(value, screen_width) { ts.margin.right = length(v * sf); }
            "margin-bottom" => if let Some(v) = to_px(value, screen_width) { ts.margin.bottom = length(v * sf); }
            "margin-left" => if let Some(v) = to_px(value, screen_width) { ts.margin.left = length(v * sf); }
            "display" => if let StyleValue::String(s) = value {
                ts.display = match s.as_str() {
                    "grid" => Display::Grid,
                    _ => Display::Flex,
                };
            } else if matches!(value, StyleValue::None) {
                ts.display = Display::None;
            }
            "flex-direction" => if let StyleValue::String(s) = value {
                ts.flex_direction = match s.as_str() {
                    "row" => FlexDirection::Row,
                    "row-reverse" => FlexDirection::RowReverse,
                    "column-reverse" => FlexDirection::ColumnReverse,
                    _ => FlexDirection::Column,
                };
            }
            "flex" | "flex-grow" => if let Some(v) = to_px(value, screen_width) { ts.flex_grow = v; }
            "flex-shrink" => if let Some(v) = to_px(value, screen_width) { ts.flex_shrink = v; }
            "justify-content" => if let StyleValue::String(s) = value {
                ts.justify_content = Some(match s.as_str() {
                    "center" => JustifyContent::Center,
                    "space-between" => JustifyContent::SpaceBetween,
                    "space-around" => JustifyContent::SpaceAround,
                    "space-evenly" => JustifyContent::SpaceEvenly,
                    "flex-end" | "end" => JustifyContent::FlexEnd,
                    _ => JustifyContent::FlexStart,
                });
            }
            "align-items" => if let StyleValue::String(s) = value {
                ts.align_items = Some(match s.as_str() {
                    "center" => AlignItems::Center,
                    "flex-end" | "end" => AlignItems::FlexEnd,
                    "stretch" => AlignItems::Stretch,
                    "baseline" => AlignItems::Baseline,
                    _ => AlignItems::FlexStart,
                });
            }
            "gap" => if let Some(v) = to_px(value, screen_width) {
                let sv = v * sf;
                ts.gap = Size { width: length(sv), height: length(sv) };
            }
            "background-color" | "background" => if let StyleValue::Color(c) = value { ns.background_color = Some(*c); }
            "color" => if let StyleValue::Color(c) = value { ns.text_color = Some(*c); }
            "border-color" => if let StyleValue::Color(c) = value { ns.border_color = Some(*c); }
            "border-width" => if let Some(v) = to_px(value, screen_width) { ns.border_width = v * sf; }
            "border" => if let StyleValue::String(s) = value {
                parse_border_shorthand(s, &mut ns, sf);
            }
            "font-size" => if let Some(v) = to_px(value, screen_width) { ns.font_size = v; }
            "text-align" => if let StyleValue::String(s) = value {
                ns.text_align = match s.as_str() {
                    "center" => TextAlign::Center,
                    "right" => TextAlign::Right,
                    _ => TextAlign::Left,
                };
            }
            "opacity" => if let StyleValue::Number(n) = value { ns.opacity = *n; }
            _ => {}
        }
    }
    (ts, ns)
}

/// 解析 border 简写: border: 1px solid #000
fn parse_border_shorthand(s: &str, ns: &mut NodeStyle, sf: f32) {
    for part in s.split_whitespace() {
        if part.starts_with('#') || part.starts_with("rgb") {
            if let Some(color) = parse_color_str(part) {
                ns.border_color = Some(color);
            }
        } else if let Some(num) = part
            .trim_end_matches("px")
            .parse::<f32>()
            .ok()
            .filter(|n| *n >= 0.0)
        {
            ns.border_width = num * sf;
        }
    }
}

/// 绘制背景和边框
pub fn draw_background(canvas: &mut Canvas, style: &NodeStyle, x: f32, y: f32, w: f32, h: f32) {
    if let Some(bg) = style.background_color {
        let mut paint = Paint::new().with_color(bg).with_style(PaintStyle::Fill);
        if style.opacity < 1.0 {
            paint.color.a = (paint.color.a as f32 * style.opacity) as u8;
        }
        canvas.draw_rect(&GeoRect::new(x, y, w, h), &paint);
    }

    if style.border_width > 0.0 {
        if let Some(bc) = style.border_color {
            let paint = Paint::new()
                .with_color(bc)
                .with_style(PaintStyle::Stroke)
                .with_stroke_width(style.border_width);
            canvas.draw_rect(&GeoRect::new(x, y, w, h), &paint);
        }
    }
}
