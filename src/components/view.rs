//! 通用容器组件

use super::base::*;
use crate::error::ComponentError;
use crate::parser::markup::MarkupNode;
use crate::Canvas;

pub struct ViewComponent;

impl Component for ViewComponent {
    fn build(node: &MarkupNode, ctx: &mut ComponentContext) -> Result<RenderNode, ComponentError> {
        let (ts, ns) = build_base_style(node, ctx.stylesheet, ctx.screen_width, ctx.scale_factor);

        let taffy_node = ctx.taffy.new_leaf(ts).unwrap();

        Ok(RenderNode {
            tag: node.tag_name.clone(),
            text: String::new(),
            attrs: node.attributes.clone(),
            taffy_node,
            style: ns,
            glyph: None,
            children: Vec::new(),
        })
    }

    fn draw(node: &RenderNode, canvas: &mut Canvas, x: f32, y: f32, w: f32, h: f32, _sf: f32) {
        draw_background(canvas, &node.style, x, y, w, h);
    }
}
