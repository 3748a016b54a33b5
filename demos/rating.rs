//! 星级评分渲染演示
//! 解析一个小的宿主页面，初始化组件后渲染为 PNG

use star_render::loader::init_components;
use star_render::parser::{CssParser, MarkupParser};
use star_render::renderer::WidgetRenderer;
use star_render::text::TextRenderer;
use star_render::{Canvas, Color, ComponentEnv};
use std::sync::Arc;

const PAGE: &str = r#"
<div class="page">
    <rating-widget data-rating="3"></rating-widget>
    <rating-widget data-rating="5" data-max-rating="5"></rating-widget>
    <rating-widget data-rating="2" data-max-rating="10" data-alt="stars"></rating-widget>
    <rating-widget></rating-widget>
</div>
"#;

const PAGE_CSS: &str = r#"
.page {
    padding: 16px;
    gap: 12px;
    background-color: #f7f7f7;
}
"#;

fn main() {
    tracing_subscriber::fmt::init();

    let nodes = MarkupParser::new(PAGE).parse().expect("demo page parses");
    let stylesheet = CssParser::new(PAGE_CSS).parse().expect("demo css parses");

    let env: Arc<ComponentEnv> = star_render::env::global();
    init_components(env, &nodes).expect("component init");

    let mut renderer = WidgetRenderer::new(stylesheet, 375.0, 667.0);
    renderer.text_renderer = TextRenderer::load_system_font().ok();

    let mut canvas = Canvas::new(375, 240);
    canvas.clear(Color::WHITE);

    let height = renderer.render(&mut canvas, &nodes).expect("render");
    println!("content height: {:.1}px", height);

    canvas.save_png("rating-demo.png").expect("save png");
    println!("saved rating-demo.png");
}
