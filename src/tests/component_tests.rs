//! 组件单元测试
//! 覆盖 star-icon 与 rating-widget 的构建逻辑

use crate::components::*;
use crate::env::{ComponentEnv, GlyphSource};
use crate::error::ComponentError;
use crate::parser::markup::{MarkupNode, NodeType};
use crate::parser::CssParser;
use taffy::prelude::*;

/// 创建测试用的标记节点
fn create_test_node(tag: &str, attrs: &[(&str, &str)]) -> MarkupNode {
    MarkupNode {
        node_type: NodeType::Element,
        tag_name: tag.to_string(),
        attributes: attrs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        children: vec![],
        text_content: String::new(),
    }
}

fn build_rating(
    env: &ComponentEnv,
    attrs: &[(&str, &str)],
) -> Result<RenderNode, ComponentError> {
    let stylesheet = crate::parser::StyleSheet::new();
    let mut taffy = TaffyTree::new();
    let node = create_test_node("rating-widget", attrs);

    let mut ctx = ComponentContext {
        scale_factor: 1.0,
        screen_width: 375.0,
        screen_height: 667.0,
        stylesheet: &stylesheet,
        env,
        taffy: &mut taffy,
    };

    RatingWidgetComponent::build(&node, &mut ctx)
}

fn star_classes(node: &RenderNode) -> Vec<&str> {
    node.children
        .iter()
        .map(|c| c.attrs.get("class").map(|s| s.as_str()).unwrap_or(""))
        .collect()
}

/// 测试 3/5 评分：3 颗满星 + 2 颗空星
#[test]
fn test_rating_three_of_five() {
    let env = ComponentEnv::new();
    let rn = build_rating(&env, &[("data-rating", "3")]).unwrap();

    assert_eq!(rn.children.len(), 5);
    let classes = star_classes(&rn);
    assert_eq!(classes[..3], ["star star-full"; 3]);
    assert_eq!(classes[3..], ["star star-empty"; 2]);
}

/// 测试满分评分：全部满星
#[test]
fn test_rating_full_score() {
    let env = ComponentEnv::new();
    let rn = build_rating(&env, &[("data-rating", "5")]).unwrap();

    assert!(star_classes(&rn).iter().all(|c| *c == "star star-full"));
}

/// 测试 0 分：全部空星
#[test]
fn test_rating_zero() {
    let env = ComponentEnv::new();
    let rn = build_rating(&env, &[("data-rating", "0")]).unwrap();

    assert_eq!(rn.children.len(), 5);
    assert!(star_classes(&rn).iter().all(|c| *c == "star star-empty"));
}

/// 测试自定义最大星数
#[test]
fn test_rating_custom_max() {
    let env = ComponentEnv::new();
    let rn = build_rating(&env, &[("data-rating", "2"), ("data-max-rating", "10")]).unwrap();

    assert_eq!(rn.children.len(), 10);
    let classes = star_classes(&rn);
    assert_eq!(classes.iter().filter(|c| **c == "star star-full").count(), 2);
}

/// 测试评分超过最大值不截断：全部满星
#[test]
fn test_rating_above_max() {
    let env = ComponentEnv::new();
    let rn = build_rating(&env, &[("data-rating", "7"), ("data-max-rating", "5")]).unwrap();

    assert_eq!(rn.children.len(), 5);
    assert!(star_classes(&rn).iter().all(|c| *c == "star star-full"));
}

/// 测试负评分：全部空星
#[test]
fn test_rating_negative() {
    let env = ComponentEnv::new();
    let rn = build_rating(&env, &[("data-rating", "-2")]).unwrap();

    assert!(star_classes(&rn).iter().all(|c| *c == "star star-empty"));
}

/// 测试评分缺失：单个占位节点
#[test]
fn test_rating_missing() {
    let env = ComponentEnv::new();
    let rn = build_rating(&env, &[]).unwrap();

    assert_eq!(rn.children.len(), 1);
    let fallback = &rn.children[0];
    assert_eq!(fallback.attrs.get("class").unwrap(), "no-rating");
    assert_eq!(fallback.text, "(no rating)");
}

/// 测试非数字评分按缺失处理
#[test]
fn test_rating_non_numeric() {
    let env = ComponentEnv::new();
    let rn = build_rating(&env, &[("data-rating", "abc")]).unwrap();

    assert_eq!(rn.children.len(), 1);
    assert_eq!(rn.children[0].text, "(no rating)");
}

/// 测试默认标签格式 "rating: r/max"
#[test]
fn test_rating_default_label() {
    let env = ComponentEnv::new();
    let rn = build_rating(&env, &[("data-rating", "3")]).unwrap();

    assert_eq!(rn.attrs.get("aria-label").unwrap(), "rating: 3/5");
    assert_eq!(rn.attrs.get("title").unwrap(), "rating: 3/5");
    assert_eq!(rn.attrs.get("role").unwrap(), "image");
}

/// 测试 aria-label 原样优先
#[test]
fn test_rating_aria_label_wins() {
    let env = ComponentEnv::new();
    let rn = build_rating(
        &env,
        &[("data-rating", "3"), ("aria-label", "product score")],
    )
    .unwrap();

    assert_eq!(rn.attrs.get("aria-label").unwrap(), "product score");
    assert_eq!(rn.attrs.get("title").unwrap(), "product score");
}

/// 测试自定义替代文本参与标签合成
#[test]
fn test_rating_custom_alt() {
    let env = ComponentEnv::new();
    let rn = build_rating(&env, &[("data-rating", "4"), ("data-alt", "stars")]).unwrap();

    assert_eq!(rn.attrs.get("aria-label").unwrap(), "stars: 4/5");
}

/// 测试评分缺失 + 自定义替代文本的占位文案
#[test]
fn test_rating_missing_with_custom_alt() {
    let env = ComponentEnv::new();
    let rn = build_rating(&env, &[("data-alt", "stars")]).unwrap();

    assert_eq!(rn.children[0].text, "stars: (no rating)");
    assert_eq!(rn.attrs.get("aria-label").unwrap(), "stars: (no rating)");
}

/// 测试评分缺失 + aria-label 的占位文案（原样使用）
#[test]
fn test_rating_missing_with_aria_label() {
    let env = ComponentEnv::new();
    let rn = build_rating(&env, &[("aria-label", "score unknown")]).unwrap();

    assert_eq!(rn.children[0].text, "score unknown");
}

/// 测试同一输入重复构建结果一致
#[test]
fn test_rating_build_idempotent() {
    let env = ComponentEnv::new();
    let a = build_rating(&env, &[("data-rating", "3")]).unwrap();
    let b = build_rating(&env, &[("data-rating", "3")]).unwrap();

    assert_eq!(star_classes(&a), star_classes(&b));
    assert_eq!(a.attrs.get("aria-label"), b.attrs.get("aria-label"));
}

/// 测试 star-icon 内置字形构建
#[test]
fn test_star_icon_inline_build() {
    let env = ComponentEnv::new();
    let stylesheet = crate::parser::StyleSheet::new();
    let mut taffy = TaffyTree::new();
    let node = create_test_node("star-icon", &[("class", "star star-full")]);

    let mut ctx = ComponentContext {
        scale_factor: 1.0,
        screen_width: 375.0,
        screen_height: 667.0,
        stylesheet: &stylesheet,
        env: &env,
        taffy: &mut taffy,
    };

    let rn = StarIconComponent::build(&node, &mut ctx).unwrap();
    assert_eq!(rn.tag, "star-icon");
    assert_eq!(rn.children.len(), 1);

    let glyph_node = &rn.children[0];
    let glyph = glyph_node.glyph.as_ref().unwrap();
    assert!(!glyph.path.is_empty());
    assert_eq!(glyph.view_box.width, 35.0);
}

/// 测试模板模式下模板缺失立即失败
#[test]
fn test_star_icon_template_mode_fails_fast() {
    let env = ComponentEnv::new();
    env.set_glyph_source(GlyphSource::Template);

    let stylesheet = crate::parser::StyleSheet::new();
    let mut taffy = TaffyTree::new();
    let node = create_test_node("star-icon", &[]);

    let mut ctx = ComponentContext {
        scale_factor: 1.0,
        screen_width: 375.0,
        screen_height: 667.0,
        stylesheet: &stylesheet,
        env: &env,
        taffy: &mut taffy,
    };

    let err = StarIconComponent::build(&node, &mut ctx).unwrap_err();
    assert!(matches!(err, ComponentError::MissingTemplate { .. }));
}

/// 测试模板模式下使用已安装的模板
#[test]
fn test_star_icon_template_mode_with_installed() {
    let env = ComponentEnv::new();
    env.set_glyph_source(GlyphSource::Template);

    let markup = r#"<svg viewBox="0 0 10 10"><path d="M0,0 L10,0 L5,10 Z"/></svg>"#;
    let glyph = crate::parser::MarkupParser::new(markup)
        .parse()
        .unwrap()
        .remove(0);
    env.install_template(STAR_TEMPLATE_NAME, glyph);

    let stylesheet = crate::parser::StyleSheet::new();
    let mut taffy = TaffyTree::new();
    let node = create_test_node("star-icon", &[]);

    let mut ctx = ComponentContext {
        scale_factor: 1.0,
        screen_width: 375.0,
        screen_height: 667.0,
        stylesheet: &stylesheet,
        env: &env,
        taffy: &mut taffy,
    };

    let rn = StarIconComponent::build(&node, &mut ctx).unwrap();
    let glyph = rn.children[0].glyph.as_ref().unwrap();
    assert_eq!(glyph.view_box.width, 10.0);
}

/// 测试星形配色：满星默认金色填充
#[test]
fn test_star_icon_palette_applied() {
    let env = ComponentEnv::new();
    let css = ":root { --full-star-fill-color: #123456; }";
    env.publish_stylesheet(CssParser::new(css).parse().unwrap());

    let stylesheet = crate::parser::StyleSheet::new();
    let mut taffy = TaffyTree::new();
    let node = create_test_node("star-icon", &[("class", "star star-full")]);

    let mut ctx = ComponentContext {
        scale_factor: 1.0,
        screen_width: 375.0,
        screen_height: 667.0,
        stylesheet: &stylesheet,
        env: &env,
        taffy: &mut taffy,
    };

    let rn = StarIconComponent::build(&node, &mut ctx).unwrap();
    let fill = rn.children[0].style.background_color.unwrap();
    assert_eq!(fill, crate::Color::rgb(0x12, 0x34, 0x56));
}
