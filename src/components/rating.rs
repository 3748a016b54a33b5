//! rating-widget 组件 - 星级评分条

use super::base::*;
use super::star::StarIconComponent;
use super::text::TextComponent;
use crate::error::ComponentError;
use crate::parser::markup::MarkupNode;
use crate::Canvas;
use taffy::prelude::*;

/// 默认替代文本
const DEFAULT_ALT_TEXT: &str = "rating";
/// 评分缺失时的占位文案
const COALESCE_UNDEFINED: &str = "(no rating)";
/// 默认最大星数
const DEFAULT_MAX_RATING: i64 = 5;

pub struct RatingWidgetComponent;

impl RatingWidgetComponent {
    /// 解析整数属性；无法解析按缺失处理
    fn int_attr(node: &MarkupNode, name: &str) -> Option<i64> {
        node.get_attr(name).and_then(|v| v.trim().parse::<i64>().ok())
    }

    /// 无障碍标签: aria-label 优先，否则 "alt: r/max"
    fn compute_label(node: &MarkupNode, rating_text: &str) -> String {
        if let Some(label) = node.get_attr("aria-label") {
            return label.to_string();
        }
        let alt = node.get_attr("data-alt").unwrap_or(DEFAULT_ALT_TEXT);
        format!("{}: {}", alt, rating_text)
    }

    /// 评分缺失时的占位文本
    fn fallback_text(node: &MarkupNode) -> String {
        if let Some(label) = node.get_attr("aria-label") {
            return label.to_string();
        }
        match node.get_attr("data-alt") {
            Some(alt) => format!("{}: {}", alt, COALESCE_UNDEFINED),
            None => COALESCE_UNDEFINED.to_string(),
        }
    }

    fn star_node(full: bool) -> MarkupNode {
        let mut star = MarkupNode::new_element("star-icon");
        let class = if full {
            "star star-full"
        } else {
            "star star-empty"
        };
        star.set_attr("class", class);
        star
    }
}

impl Component for RatingWidgetComponent {
    fn build(node: &MarkupNode, ctx: &mut ComponentContext) -> Result<RenderNode, ComponentError> {
        let rating = Self::int_attr(node, "data-rating");
        let max_rating = Self::int_attr(node, "data-max-rating").unwrap_or(DEFAULT_MAX_RATING);

        let rating_text = match rating {
            Some(r) => format!("{}/{}", r, max_rating),
            None => COALESCE_UNDEFINED.to_string(),
        };
        let label = Self::compute_label(node, &rating_text);

        let (mut ts, ns) = build_base_style(node, ctx.stylesheet, ctx.screen_width, ctx.scale_factor);
        ts.flex_direction = FlexDirection::Row;
        if ts.align_items.is_none() {
            ts.align_items = Some(AlignItems::Center);
        }

        let mut children = Vec::new();
        match rating {
            Some(r) => {
                // 评分超出 [0, max] 不截断：前 r 颗满星，其余空星
                for i in 1..=max_rating {
                    let star = Self::star_node(i <= r);
                    children.push(StarIconComponent::build(&star, ctx)?);
                }
            }
            None => {
                let mut span = MarkupNode::new_element("span");
                span.set_attr("class", "no-rating");
                let text = Self::fallback_text(node);
                children.push(TextComponent::build_with_text(&span, &text, None, ctx)?);
            }
        }

        let child_ids: Vec<NodeId> = children.iter().map(|c| c.taffy_node).collect();
        let taffy_node = ctx.taffy.new_with_children(ts, &child_ids).unwrap();

        let mut attrs = node.attributes.clone();
        attrs.insert("role".to_string(), "image".to_string());
        attrs.insert("aria-label".to_string(), label.clone());
        attrs.insert("title".to_string(), label);

        Ok(RenderNode {
            tag: node.tag_name.clone(),
            text: String::new(),
            attrs,
            taffy_node,
            style: ns,
            glyph: None,
            children,
        })
    }

    fn draw(node: &RenderNode, canvas: &mut Canvas, x: f32, y: f32, w: f32, h: f32, _sf: f32) {
        draw_background(canvas, &node.style, x, y, w, h);
    }
}
