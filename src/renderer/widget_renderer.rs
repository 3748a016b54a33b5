//! 页面渲染器 - 构建渲染树、计算布局并绘制到画布

use crate::components::*;
use crate::env::{self, ComponentEnv};
use crate::error::ComponentError;
use crate::parser::markup::{MarkupNode, NodeType};
use crate::parser::StyleSheet;
use crate::text::TextRenderer;
use crate::{Canvas, Color};
use std::collections::HashMap;
use std::sync::Arc;
use taffy::prelude::*;

/// 页面渲染器
pub struct WidgetRenderer {
    stylesheet: StyleSheet,
    env: Arc<ComponentEnv>,
    screen_width: f32,
    screen_height: f32,
    pub text_renderer: Option<TextRenderer>,
    scale_factor: f32,
}

impl WidgetRenderer {
    pub fn new(stylesheet: StyleSheet, screen_width: f32, screen_height: f32) -> Self {
        Self::new_with_scale(stylesheet, screen_width, screen_height, 1.0)
    }

    pub fn new_with_scale(
        stylesheet: StyleSheet,
        screen_width: f32,
        screen_height: f32,
        scale_factor: f32,
    ) -> Self {
        Self {
            stylesheet,
            env: env::global(),
            screen_width,
            screen_height,
            text_renderer: None,
            scale_factor,
        }
    }

    /// 使用独立环境（测试用）
    pub fn with_env(mut self, env: Arc<ComponentEnv>) -> Self {
        self.env = env;
        self
    }

    /// 渲染节点列表，返回内容高度（逻辑像素）
    pub fn render(&mut self, canvas: &mut Canvas, nodes: &[MarkupNode]) -> Result<f32, ComponentError> {
        let mut taffy = TaffyTree::new();

        let mut render_nodes = Vec::new();
        for node in nodes {
            if let Some(rn) = self.build_tree(&mut taffy, node)? {
                render_nodes.push(rn);
            }
        }

        let child_ids: Vec<NodeId> = render_nodes.iter().map(|n| n.taffy_node).collect();
        let root = taffy
            .new_with_children(
                Style {
                    size: Size {
                        width: length(self.screen_width * self.scale_factor),
                        height: auto(),
                    },
                    flex_direction: FlexDirection::Column,
                    ..Default::default()
                },
                &child_ids,
            )
            .unwrap();

        taffy.compute_layout(root, Size::MAX_CONTENT).unwrap();

        for rn in &render_nodes {
            self.draw(canvas, &taffy, rn, 0.0, 0.0, Color::BLACK);
        }

        let content_height = taffy.layout(root).unwrap().size.height / self.scale_factor;
        Ok(content_height)
    }

    fn build_tree(
        &self,
        taffy: &mut TaffyTree,
        node: &MarkupNode,
    ) -> Result<Option<RenderNode>, ComponentError> {
        let sf = self.scale_factor;

        if node.node_type == NodeType::Text {
            let text = node.text_content.trim();
            if text.is_empty() {
                return Ok(None);
            }
            let fs = 14.0;
            let tw = self.measure_text(text, fs * sf);
            let tn = taffy
                .new_leaf(Style {
                    size: Size {
                        width: length(tw),
                        height: length((fs + 4.0) * sf),
                    },
                    ..Default::default()
                })
                .unwrap();
            return Ok(Some(RenderNode {
                tag: "#text".into(),
                text: text.into(),
                attrs: HashMap::new(),
                taffy_node: tn,
                style: NodeStyle {
                    text_color: Some(Color::BLACK),
                    ..Default::default()
                },
                glyph: None,
                children: vec![],
            }));
        }

        if node.node_type != NodeType::Element {
            return Ok(None);
        }

        let tag = node.tag_name.as_str();

        // 注册的自定义元素走注册表里的构建函数
        if let Some(build) = self.env.builder(tag) {
            let mut ctx = self.component_context(taffy);
            return build(node, &mut ctx).map(Some);
        }

        // 未注册的自定义元素保持惰性：占位零尺寸节点，子树不渲染
        if tag.contains('-') {
            let tn = taffy.new_leaf(Style::default()).unwrap();
            return Ok(Some(RenderNode {
                tag: tag.into(),
                text: String::new(),
                attrs: node.attributes.clone(),
                taffy_node: tn,
                style: NodeStyle::default(),
                glyph: None,
                children: vec![],
            }));
        }

        let mut ctx = self.component_context(taffy);
        let mut rn = match tag {
            "text" | "span" => {
                let text = get_text_content(node);
                TextComponent::build_with_text(node, &text, self.text_renderer.as_ref(), &mut ctx)?
            }
            _ => ViewComponent::build(node, &mut ctx)?,
        };

        // 只有通用容器递归子节点；文本内容已在上面收集
        if !Self::is_leaf_component(tag) {
            let mut children = vec![];
            for c in &node.children {
                if let Some(cr) = self.build_tree(taffy, c)? {
                    children.push(cr);
                }
            }

            if !children.is_empty() {
                let child_ids: Vec<NodeId> = children.iter().map(|c| c.taffy_node).collect();
                let (ts, _) = build_base_style(node, &self.stylesheet, self.screen_width, sf);
                rn.taffy_node = taffy.new_with_children(ts, &child_ids).unwrap();
                rn.children = children;
            }
        }

        Ok(Some(rn))
    }

    fn component_context<'a>(&'a self, taffy: &'a mut TaffyTree) -> ComponentContext<'a> {
        ComponentContext {
            scale_factor: self.scale_factor,
            screen_width: self.screen_width,
            screen_height: self.screen_height,
            stylesheet: &self.stylesheet,
            env: self.env.as_ref(),
            taffy,
        }
    }

    fn is_leaf_component(tag: &str) -> bool {
        matches!(tag, "text" | "span")
    }

    fn draw(
        &self,
        canvas: &mut Canvas,
        taffy: &TaffyTree,
        node: &RenderNode,
        ox: f32,
        oy: f32,
        inherited_color: Color,
    ) {
        let sf = self.scale_factor;
        let layout = taffy.layout(node.taffy_node).unwrap();
        let x = ox + layout.location.x;
        let y = oy + layout.location.y;
        let w = layout.size.width;
        let h = layout.size.height;

        let text_color = node.style.text_color.unwrap_or(inherited_color);
        let mut node_with_color = node.clone();
        if node_with_color.style.text_color.is_none() {
            node_with_color.style.text_color = Some(text_color);
        }

        self.draw_component(canvas, &node_with_color, x, y, w, h, sf);

        for child in &node.children {
            self.draw(canvas, taffy, child, x, y, text_color);
        }
    }

    fn draw_component(
        &self,
        canvas: &mut Canvas,
        node: &RenderNode,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        sf: f32,
    ) {
        if node.glyph.is_some() {
            StarIconComponent::draw(node, canvas, x, y, w, h, sf);
            return;
        }

        match node.tag.as_str() {
            "text" | "span" | "#text" => {
                TextComponent::draw_with_renderer(
                    node,
                    canvas,
                    self.text_renderer.as_ref(),
                    x,
                    y,
                    w,
                    h,
                    sf,
                );
            }
            _ => ViewComponent::draw(node, canvas, x, y, w, h, sf),
        }
    }

    fn measure_text(&self, text: &str, size: f32) -> f32 {
        self.text_renderer
            .as_ref()
            .map(|tr| tr.measure_text(text, size))
            .unwrap_or(text.chars().count() as f32 * size * 0.6)
    }
}
