//! 样式表与配色解析测试

use crate::parser::{CssParser, StyleSheet, StyleValue};
use crate::renderer::StarPalette;
use crate::Color;

fn parse_css(css: &str) -> StyleSheet {
    CssParser::new(css).parse().unwrap_or_default()
}

/// 测试基本规则解析
#[test]
fn test_parse_basic_rule() {
    let sheet = parse_css(".star { width: 24px; height: 24px; }");

    let styles = sheet.get_styles(&["star"], "star-icon");
    assert!(matches!(styles.get("width"), Some(StyleValue::Length(w, _)) if *w == 24.0));
}

/// 测试后声明的规则覆盖先声明的
#[test]
fn test_later_rule_wins() {
    let sheet = parse_css(".star { width: 24px; } .star { width: 32px; }");

    let styles = sheet.get_styles(&["star"], "star-icon");
    assert!(matches!(styles.get("width"), Some(StyleValue::Length(w, _)) if *w == 32.0));
}

/// 测试默认配色
#[test]
fn test_default_palette() {
    let palette = StarPalette::resolve(&StyleSheet::new());

    assert_eq!(palette, StarPalette::default());
    assert_eq!(palette.full_fill, Color::from_hex(0xFFB400));
    assert_eq!(palette.empty_fill, Color::WHITE);
}

/// 测试自定义属性覆盖默认配色
#[test]
fn test_palette_from_custom_properties() {
    let sheet = parse_css(
        r#"
        :root {
            --full-star-fill-color: #ff0000;
            --empty-star-stroke-color: rgb(1, 2, 3);
        }
        "#,
    );

    let palette = StarPalette::resolve(&sheet);
    assert_eq!(palette.full_fill, Color::rgb(255, 0, 0));
    assert_eq!(palette.empty_stroke, Color::rgb(1, 2, 3));
    // 未覆盖的槽位保持默认
    assert_eq!(palette.full_stroke, StarPalette::default().full_stroke);
}

/// 测试类规则覆盖自定义属性
#[test]
fn test_class_rules_override_custom_properties() {
    let sheet = parse_css(
        r#"
        :root { --full-star-fill-color: #ff0000; }
        .star-full { fill: #00ff00; stroke: #0000ff; }
        "#,
    );

    let palette = StarPalette::resolve(&sheet);
    assert_eq!(palette.full_fill, Color::rgb(0, 255, 0));
    assert_eq!(palette.full_stroke, Color::rgb(0, 0, 255));
}

/// 测试 full-star / empty-star 别名类
#[test]
fn test_alias_classes() {
    let sheet = parse_css(".full-star { fill: #111111; } .empty-star { fill: #222222; }");

    let palette = StarPalette::resolve(&sheet);
    assert_eq!(palette.full_fill, Color::rgb(0x11, 0x11, 0x11));
    assert_eq!(palette.empty_fill, Color::rgb(0x22, 0x22, 0x22));
}

/// 测试类规则里的 var() 引用
#[test]
fn test_class_rule_with_var() {
    let sheet = parse_css(
        r#"
        :root { --accent: #abcdef; }
        .star-full { fill: var(--accent); }
        "#,
    );

    let palette = StarPalette::resolve(&sheet);
    assert_eq!(palette.full_fill, Color::rgb(0xAB, 0xCD, 0xEF));
}

/// 测试 colors_for 的满/空选择
#[test]
fn test_colors_for() {
    let palette = StarPalette::default();

    assert_eq!(palette.colors_for(true), (palette.full_fill, palette.full_stroke));
    assert_eq!(palette.colors_for(false), (palette.empty_fill, palette.empty_stroke));
}
