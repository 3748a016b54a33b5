//! 星形配色解析 - 内置默认值 + 自定义属性 + 类规则三级覆盖

use crate::components::parse_color_str;
use crate::parser::{StyleSheet, StyleValue};
use crate::Color;

/// 满星/空星的填充与描边颜色
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarPalette {
    pub full_fill: Color,
    pub full_stroke: Color,
    pub empty_fill: Color,
    pub empty_stroke: Color,
}

impl Default for StarPalette {
    fn default() -> Self {
        Self {
            full_fill: Color::from_hex(0xFFB400),
            full_stroke: Color::from_hex(0xB8860B),
            empty_fill: Color::from_hex(0xFFFFFF),
            empty_stroke: Color::from_hex(0xBFBFBF),
        }
    }
}

impl StarPalette {
    /// 从共享样式表解析配色
    ///
    /// 优先级从低到高：内置默认值、--xxx-star-xxx-color 自定义属性、
    /// .star-full / .star-empty 等类规则里的 fill/stroke。
    pub fn resolve(sheet: &StyleSheet) -> Self {
        let mut palette = Self::default();

        let custom = |name: &str| -> Option<Color> {
            let raw = sheet.custom_property(name)?;
            let resolved = sheet.resolve_var(raw)?;
            parse_color_str(&resolved)
        };

        if let Some(c) = custom("--full-star-fill-color") {
            palette.full_fill = c;
        }
        if let Some(c) = custom("--full-star-stroke-color") {
            palette.full_stroke = c;
        }
        if let Some(c) = custom("--empty-star-fill-color") {
            palette.empty_fill = c;
        }
        if let Some(c) = custom("--empty-star-stroke-color") {
            palette.empty_stroke = c;
        }

        let class_color = |classes: &[&str], property: &str| -> Option<Color> {
            let styles = sheet.get_styles(classes, "star-icon");
            match styles.get(property)? {
                StyleValue::Color(c) => Some(*c),
                StyleValue::String(s) => {
                    let resolved = sheet.resolve_var(s)?;
                    parse_color_str(&resolved)
                }
                _ => None,
            }
        };

        let full_classes = ["star", "star-full", "full-star"];
        let empty_classes = ["star", "star-empty", "empty-star"];

        if let Some(c) = class_color(&full_classes, "fill") {
            palette.full_fill = c;
        }
        if let Some(c) = class_color(&full_classes, "stroke") {
            palette.full_stroke = c;
        }
        if let Some(c) = class_color(&empty_classes, "fill") {
            palette.empty_fill = c;
        }
        if let Some(c) = class_color(&empty_classes, "stroke") {
            palette.empty_stroke = c;
        }

        palette
    }

    /// 按满/空取 (fill, stroke)
    pub fn colors_for(&self, full: bool) -> (Color, Color) {
        if full {
            (self.full_fill, self.full_stroke)
        } else {
            (self.empty_fill, self.empty_stroke)
        }
    }
}
