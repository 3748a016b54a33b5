//! 文本组件 - 标签与回退文案

use super::base::*;
use crate::error::ComponentError;
use crate::parser::markup::MarkupNode;
use crate::text::TextRenderer;
use crate::{Canvas, Color, Paint};
use taffy::prelude::*;

pub struct TextComponent;

impl TextComponent {
    /// 构建文本节点；宽度按字体测量，无字体时用估算值
    pub fn build_with_text(
        node: &MarkupNode,
        text: &str,
        text_renderer: Option<&TextRenderer>,
        ctx: &mut ComponentContext,
    ) -> Result<RenderNode, ComponentError> {
        let (mut ts, ns) = build_base_style(node, ctx.stylesheet, ctx.screen_width, ctx.scale_factor);

        let font_size = ns.font_size * ctx.scale_factor;
        let (width, height) = match text_renderer {
            Some(tr) => (tr.measure_text(text, font_size), font_size * 1.4),
            // 无字体时的估算宽度
            None => (text.chars().count() as f32 * font_size * 0.6, font_size * 1.4),
        };

        if ts.size.width == Dimension::Auto {
            ts.size.width = length(width);
        }
        if ts.size.height == Dimension::Auto {
            ts.size.height = length(height);
        }

        let taffy_node = ctx.taffy.new_leaf(ts).unwrap();

        Ok(RenderNode {
            tag: node.tag_name.clone(),
            text: text.to_string(),
            attrs: node.attributes.clone(),
            taffy_node,
            style: ns,
            glyph: None,
            children: Vec::new(),
        })
    }

    pub fn draw_with_renderer(
        node: &RenderNode,
        canvas: &mut Canvas,
        text_renderer: Option<&TextRenderer>,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        sf: f32,
    ) {
        draw_background(canvas, &node.style, x, y, w, h);

        let Some(tr) = text_renderer else {
            return;
        };
        if node.text.is_empty() {
            return;
        }

        let font_size = node.style.font_size * sf;
        let color = node.style.text_color.unwrap_or(Color::BLACK);
        let paint = Paint::new().with_color(color);

        let text_width = tr.measure_text(&node.text, font_size);
        let text_x = match node.style.text_align {
            TextAlign::Left => x,
            TextAlign::Center => x + (w - text_width) / 2.0,
            TextAlign::Right => x + w - text_width,
        };

        // 基线大致落在行框的下四分之一处
        let baseline = y + h - (h - font_size) / 2.0 * 0.5;
        tr.draw_text(canvas, &node.text, text_x, baseline, font_size, &paint);
    }
}

impl Component for TextComponent {
    fn build(node: &MarkupNode, ctx: &mut ComponentContext) -> Result<RenderNode, ComponentError> {
        let text = get_text_content(node);
        Self::build_with_text(node, &text, None, ctx)
    }

    fn draw(node: &RenderNode, canvas: &mut Canvas, x: f32, y: f32, w: f32, h: f32, sf: f32) {
        Self::draw_with_renderer(node, canvas, None, x, y, w, h, sf);
    }
}
