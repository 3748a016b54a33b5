//! 样式表解析器 - 支持类/标签选择器与自定义属性 (--xxx / var())

use crate::Color;
use std::collections::HashMap;

/// 样式值
#[derive(Debug, Clone)]
pub enum StyleValue {
    Length(f32, LengthUnit),
    Color(Color),
    String(String),
    Number(f32),
    Auto,
    None,
}

/// 长度单位
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LengthUnit {
    Px,
    Percent,
    Em,
    Rem,
}

/// 样式规则
#[derive(Debug, Clone)]
pub struct StyleRule {
    pub selector: String,
    pub properties: HashMap<String, StyleValue>,
    /// 该规则声明的自定义属性，原始文本形式
    pub custom_properties: HashMap<String, String>,
}

/// 样式表
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    pub rules: Vec<StyleRule>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// 获取元素的样式，后声明的规则覆盖先声明的
    pub fn get_styles(&self, class_names: &[&str], tag_name: &str) -> HashMap<String, StyleValue> {
        let mut styles = HashMap::new();

        for rule in &self.rules {
            if self.selector_matches(&rule.selector, class_names, tag_name) {
                for (key, value) in &rule.properties {
                    styles.insert(key.clone(), value.clone());
                }
            }
        }

        styles
    }

    fn selector_matches(&self, selector: &str, class_names: &[&str], tag_name: &str) -> bool {
        // 逗号分隔的选择器组，任一命中即匹配
        selector
            .split(',')
            .any(|s| self.simple_selector_matches(s.trim(), class_names, tag_name))
    }

    fn simple_selector_matches(&self, selector: &str, class_names: &[&str], tag_name: &str) -> bool {
        if selector == "*" || selector == ":root" || selector == ":host" {
            return true;
        }

        // 类选择器
        if let Some(class) = selector.strip_prefix('.') {
            // .a.b 形式要求全部类命中
            return class.split('.').all(|c| class_names.contains(&c));
        }

        // 标签选择器
        if selector == tag_name {
            return true;
        }

        // tag.class 复合选择器
        if let Some((tag, class)) = selector.split_once('.') {
            return (tag.is_empty() || tag == tag_name) && class_names.contains(&class);
        }

        false
    }

    /// 查询自定义属性，后声明的覆盖先声明的
    pub fn custom_property(&self, name: &str) -> Option<&str> {
        let mut found = None;
        for rule in &self.rules {
            if let Some(v) = rule.custom_properties.get(name) {
                found = Some(v.as_str());
            }
        }
        found
    }

    /// 解析 "var(--x)" / "var(--x, fallback)" 表达式；
    /// 非 var() 输入原样返回
    pub fn resolve_var(&self, value: &str) -> Option<String> {
        let value = value.trim();
        let Some(inner) = value
            .strip_prefix("var(")
            .and_then(|v| v.strip_suffix(')'))
        else {
            return Some(value.to_string());
        };

        let (name, fallback) = match inner.split_once(',') {
            Some((n, f)) => (n.trim(), Some(f.trim())),
            None => (inner.trim(), None),
        };

        if let Some(v) = self.custom_property(name) {
            return Some(v.to_string());
        }
        fallback.map(|f| f.to_string())
    }
}

/// 样式表解析器
pub struct CssParser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> CssParser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    pub fn parse(&mut self) -> Result<StyleSheet, String> {
        let mut stylesheet = StyleSheet::new();

        while self.pos < self.input.len() {
            self.skip_whitespace_and_comments();

            if self.pos >= self.input.len() {
                break;
            }

            if let Some(rule) = self.parse_rule()? {
                stylesheet.rules.push(rule);
            }
        }

        Ok(stylesheet)
    }

    fn parse_rule(&mut self) -> Result<Option<StyleRule>, String> {
        self.skip_whitespace_and_comments();

        let selector = self.parse_selector();
        if selector.is_empty() {
            return Ok(None);
        }

        if self.current() != b'{' {
            return Err(format!("Expected '{{' after selector '{}'", selector));
        }
        self.pos += 1;

        let (properties, custom_properties) = self.parse_declarations()?;

        self.skip_whitespace_and_comments();
        if self.current() == b'}' {
            self.pos += 1;
        }

        Ok(Some(StyleRule {
            selector,
            properties,
            custom_properties,
        }))
    }

    fn parse_selector(&mut self) -> String {
        let start = self.pos;
        while self.pos < self.input.len() {
            let c = self.current();
            if c == b'{' || c == b'}' {
                break;
            }
            self.pos += 1;
        }
        String::from_utf8_lossy(&self.input[start..self.pos])
            .trim()
            .to_string()
    }

    #[allow(clippy::type_complexity)]
    fn parse_declarations(
        &mut self,
    ) -> Result<(HashMap<String, StyleValue>, HashMap<String, String>), String> {
        let mut properties = HashMap::new();
        let mut custom_properties = HashMap::new();

        loop {
            self.skip_whitespace_and_comments();

            if self.pos >= self.input.len() || self.current() == b'}' {
                break;
            }

            let name = self.parse_property_name();
            if name.is_empty() {
                break;
            }

            self.skip_whitespace();

            if self.current() != b':' {
                continue;
            }
            self.pos += 1;

            self.skip_whitespace();

            let value = self.parse_property_value();

            if self.current() == b';' {
                self.pos += 1;
            }

            if name.starts_with("--") {
                custom_properties.insert(name, value);
            } else {
                let parsed_value = parse_value(&value);
                properties.insert(name, parsed_value);
            }
        }

        Ok((properties, custom_properties))
    }

    fn parse_property_name(&mut self) -> String {
        let start = self.pos;
        while self.pos < self.input.len() {
            let c = self.current();
            if c.is_ascii_alphanumeric() || c == b'-' || c == b'_' {
                self.pos += 1;
            } else {
                break;
            }
        }
        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }

    fn parse_property_value(&mut self) -> String {
        let start = self.pos;
        let mut paren_depth = 0;

        while self.pos < self.input.len() {
            let c = self.current();

            if c == b'(' {
                paren_depth += 1;
            } else if c == b')' {
                paren_depth -= 1;
            }

            if paren_depth == 0 && (c == b';' || c == b'}') {
                break;
            }

            self.pos += 1;
        }

        String::from_utf8_lossy(&self.input[start..self.pos])
            .trim()
            .to_string()
    }

    fn current(&self) -> u8 {
        if self.pos < self.input.len() {
            self.input[self.pos]
        } else {
            0
        }
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() && self.current().is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            self.skip_whitespace();

            if self.input[self.pos..].starts_with(b"/*") {
                self.pos += 2;
                while self.pos < self.input.len() && !self.input[self.pos..].starts_with(b"*/") {
                    self.pos += 1;
                }
                self.pos = (self.pos + 2).min(self.input.len());
            } else {
                break;
            }
        }
    }
}

/// 解析单个属性值文本
pub fn parse_value(value: &str) -> StyleValue {
    let value = value.trim();

    if value.starts_with('#') {
        if let Some(color) = parse_hex_color(value) {
            return StyleValue::Color(color);
        }
    }

    if value.starts_with("rgb") {
        if let Some(color) = parse_rgb_color(value) {
            return StyleValue::Color(color);
        }
    }

    if let Some(color) = parse_named_color(value) {
        return StyleValue::Color(color);
    }

    if let Some((num, unit)) = parse_length(value) {
        return StyleValue::Length(num, unit);
    }

    match value {
        "auto" => return StyleValue::Auto,
        "none" => return StyleValue::None,
        _ => {}
    }

    if let Ok(num) = value.parse::<f32>() {
        return StyleValue::Number(num);
    }

    StyleValue::String(value.to_string())
}

pub fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.trim_start_matches('#');

    let (r, g, b, a) = match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            (r, g, b, 255)
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            (r, g, b, 255)
        }
        8 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
            (r, g, b, a)
        }
        _ => return None,
    };

    Some(Color::new(r, g, b, a))
}

pub fn parse_rgb_color(value: &str) -> Option<Color> {
    let inner = value
        .trim_start_matches("rgba(")
        .trim_start_matches("rgb(")
        .trim_end_matches(')');

    let parts: Vec<&str> = inner.split(',').collect();
    if parts.len() < 3 {
        return None;
    }

    let r = parts[0].trim().parse::<u8>().ok()?;
    let g = parts[1].trim().parse::<u8>().ok()?;
    let b = parts[2].trim().parse::<u8>().ok()?;
    let a = if parts.len() > 3 {
        (parts[3].trim().parse::<f32>().ok()? * 255.0) as u8
    } else {
        255
    };

    Some(Color::new(r, g, b, a))
}

fn parse_named_color(value: &str) -> Option<Color> {
    match value {
        "white" => Some(Color::WHITE),
        "black" => Some(Color::BLACK),
        "transparent" => Some(Color::TRANSPARENT),
        "red" => Some(Color::rgb(255, 0, 0)),
        "green" => Some(Color::rgb(0, 128, 0)),
        "blue" => Some(Color::rgb(0, 0, 255)),
        "gold" => Some(Color::rgb(255, 215, 0)),
        "goldenrod" => Some(Color::rgb(218, 165, 32)),
        "gray" | "grey" => Some(Color::rgb(128, 128, 128)),
        "silver" => Some(Color::rgb(192, 192, 192)),
        _ => None,
    }
}

fn parse_length(value: &str) -> Option<(f32, LengthUnit)> {
    let value = value.trim();

    if value.ends_with("px") {
        let num = value.trim_end_matches("px").parse().ok()?;
        return Some((num, LengthUnit::Px));
    }

    if value.ends_with('%') {
        let num = value.trim_end_matches('%').parse().ok()?;
        return Some((num, LengthUnit::Percent));
    }

    if value.ends_with("rem") {
        let num = value.trim_end_matches("rem").parse().ok()?;
        return Some((num, LengthUnit::Rem));
    }

    if value.ends_with("em") {
        let num = value.trim_end_matches("em").parse().ok()?;
        return Some((num, LengthUnit::Em));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rule_with_custom_properties() {
        let css = r#"
            :root {
                --full-star-fill-color: #ffb400;
            }
            .star { width: 24px; }
        "#;
        let sheet = CssParser::new(css).parse().unwrap();

        assert_eq!(sheet.rules.len(), 2);
        assert_eq!(
            sheet.custom_property("--full-star-fill-color"),
            Some("#ffb400")
        );
    }

    #[test]
    fn test_custom_property_last_wins() {
        let css = ":root { --c: red; } .theme { --c: blue; }";
        let sheet = CssParser::new(css).parse().unwrap();
        assert_eq!(sheet.custom_property("--c"), Some("blue"));
    }

    #[test]
    fn test_resolve_var() {
        let css = ":root { --c: #112233; }";
        let sheet = CssParser::new(css).parse().unwrap();

        assert_eq!(sheet.resolve_var("var(--c)").as_deref(), Some("#112233"));
        assert_eq!(
            sheet.resolve_var("var(--missing, gold)").as_deref(),
            Some("gold")
        );
        assert_eq!(sheet.resolve_var("var(--missing)"), None);
        assert_eq!(sheet.resolve_var("#fff").as_deref(), Some("#fff"));
    }

    #[test]
    fn test_selector_group() {
        let css = ".star-full, .full-star { fill: gold; }";
        let sheet = CssParser::new(css).parse().unwrap();

        let styles = sheet.get_styles(&["full-star"], "star-icon");
        assert!(matches!(styles.get("fill"), Some(StyleValue::Color(_))));
    }

    #[test]
    fn test_fill_and_stroke_parse_as_colors() {
        let css = ".star-empty { fill: #fff; stroke: rgb(191, 191, 191); }";
        let sheet = CssParser::new(css).parse().unwrap();
        let styles = sheet.get_styles(&["star-empty"], "star-icon");

        match styles.get("fill") {
            Some(StyleValue::Color(c)) => assert_eq!(*c, Color::WHITE),
            other => panic!("unexpected fill: {:?}", other),
        }
        match styles.get("stroke") {
            Some(StyleValue::Color(c)) => assert_eq!(*c, Color::rgb(191, 191, 191)),
            other => panic!("unexpected stroke: {:?}", other),
        }
    }
}
