//! star-icon 组件 - 单颗星形图标

use super::base::*;
use crate::env::GlyphSource;
use crate::error::ComponentError;
use crate::parser::markup::{MarkupNode, MarkupParser};
use crate::parser::svg_path::{parse_path_data, parse_view_box};
use crate::parser::StyleSheet;
use crate::{Canvas, Paint, PaintStyle, Rect as GeoRect};
use once_cell::sync::Lazy;
use taffy::prelude::*;

/// 模板存储中星形字形的键名
pub const STAR_TEMPLATE_NAME: &str = "star-icon";

/// 默认单元格边长（未被样式表覆盖时）
const DEFAULT_CELL: f32 = 20.0;

/// 内置星形字形标记
const STAR_MARKUP: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 35 34.4"><path d="M28.39,33.12,17.67,27,6.93,33.12,10,20.94l-7.77-8.1H12.85L17.67,2.55l4.83,10.28H33.1l-7.78,8.1Z"/></svg>"#;

static INLINE_GLYPH: Lazy<MarkupNode> = Lazy::new(|| {
    let mut parser = MarkupParser::new(STAR_MARKUP);
    let mut nodes = parser.parse().expect("builtin glyph markup is well-formed");
    nodes.remove(0)
});

pub struct StarIconComponent;

impl StarIconComponent {
    /// 按环境配置取字形标记
    fn glyph_markup(ctx: &ComponentContext) -> Result<MarkupNode, ComponentError> {
        match ctx.env.glyph_source() {
            GlyphSource::Inline => Ok(INLINE_GLYPH.clone()),
            GlyphSource::Template => {
                ctx.env
                    .template(STAR_TEMPLATE_NAME)
                    .ok_or(ComponentError::MissingTemplate {
                        name: STAR_TEMPLATE_NAME.to_string(),
                    })
            }
        }
    }

    /// 从字形标记提取路径与 viewBox
    fn extract_glyph(markup: &MarkupNode) -> Result<Glyph, ComponentError> {
        let view_box = markup
            .get_attr("viewBox")
            .or_else(|| markup.get_attr("viewbox"))
            .ok_or(ComponentError::BadGlyph)
            .and_then(|v| parse_view_box(v).map_err(|_| ComponentError::BadGlyph))?;

        let d = markup
            .children
            .iter()
            .find(|c| c.tag_name == "path")
            .and_then(|p| p.get_attr("d"))
            .ok_or(ComponentError::BadGlyph)?;

        let path = parse_path_data(d).map_err(|_| ComponentError::BadGlyph)?;

        Ok(Glyph {
            path,
            view_box: GeoRect::new(view_box.0, view_box.1, view_box.2, view_box.3),
        })
    }
}

impl Component for StarIconComponent {
    fn build(node: &MarkupNode, ctx: &mut ComponentContext) -> Result<RenderNode, ComponentError> {
        // 星级组件走共享样式表，未发布时按空表处理
        let shared = ctx.env.stylesheet();
        let empty = StyleSheet::new();
        let sheet: &StyleSheet = shared.as_deref().unwrap_or(&empty);

        let sf = ctx.scale_factor;
        let (mut ts, ns) = build_base_style(node, sheet, ctx.screen_width, sf);

        if ts.size.width == Dimension::Auto {
            ts.size.width = length(DEFAULT_CELL * sf);
        }
        if ts.size.height == Dimension::Auto {
            ts.size.height = length(DEFAULT_CELL * sf);
        }

        let glyph_markup = Self::glyph_markup(ctx)?;
        let glyph = Self::extract_glyph(&glyph_markup)?;

        // 满星/空星配色
        let classes = get_classes(node);
        let full = !classes
            .iter()
            .any(|c| *c == "star-empty" || *c == "empty-star");
        let palette = crate::renderer::StarPalette::resolve(sheet);
        let (fill, stroke) = palette.colors_for(full);

        let glyph_style = NodeStyle {
            background_color: Some(fill),
            border_color: Some(stroke),
            border_width: 1.0 * sf,
            ..Default::default()
        };

        let glyph_taffy = ctx
            .taffy
            .new_leaf(Style {
                size: Size {
                    width: percent(1.0),
                    height: percent(1.0),
                },
                ..Default::default()
            })
            .unwrap();

        let glyph_node = RenderNode {
            tag: glyph_markup.tag_name.clone(),
            text: String::new(),
            attrs: glyph_markup.attributes.clone(),
            taffy_node: glyph_taffy,
            style: glyph_style,
            glyph: Some(glyph),
            children: Vec::new(),
        };

        let taffy_node = ctx.taffy.new_with_children(ts, &[glyph_taffy]).unwrap();

        Ok(RenderNode {
            tag: node.tag_name.clone(),
            text: String::new(),
            attrs: node.attributes.clone(),
            taffy_node,
            style: ns,
            glyph: None,
            children: vec![glyph_node],
        })
    }

    fn draw(node: &RenderNode, canvas: &mut Canvas, x: f32, y: f32, w: f32, h: f32, _sf: f32) {
        let Some(glyph) = &node.glyph else {
            draw_background(canvas, &node.style, x, y, w, h);
            return;
        };

        let vb = glyph.view_box;
        if vb.width <= 0.0 || vb.height <= 0.0 || w <= 0.0 || h <= 0.0 {
            return;
        }

        // 等比缩放并在单元格内居中
        let scale = (w / vb.width).min(h / vb.height);
        let dx = x + (w - vb.width * scale) / 2.0 - vb.x * scale;
        let dy = y + (h - vb.height * scale) / 2.0 - vb.y * scale;
        let path = glyph.path.transform(scale, scale, dx, dy);

        if let Some(fill) = node.style.background_color {
            let paint = Paint::new().with_color(fill).with_style(PaintStyle::Fill);
            canvas.draw_path(&path, &paint);
        }

        if let Some(stroke) = node.style.border_color {
            let paint = Paint::new()
                .with_color(stroke)
                .with_style(PaintStyle::Stroke)
                .with_stroke_width(node.style.border_width.max(1.0));
            canvas.draw_path(&path, &paint);
        }
    }
}
