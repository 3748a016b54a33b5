//! 标记解析器 - 解析宿主页面与组件模板的声明式标记

use std::collections::HashMap;

/// 标记节点类型
#[derive(Debug, Clone, PartialEq)]
pub enum NodeType {
    Element,
    Text,
    Comment,
}

/// 标记节点
#[derive(Debug, Clone)]
pub struct MarkupNode {
    pub node_type: NodeType,
    pub tag_name: String,
    pub attributes: HashMap<String, String>,
    pub children: Vec<MarkupNode>,
    pub text_content: String,
}

impl MarkupNode {
    pub fn new_element(tag_name: &str) -> Self {
        Self {
            node_type: NodeType::Element,
            tag_name: tag_name.to_string(),
            attributes: HashMap::new(),
            children: Vec::new(),
            text_content: String::new(),
        }
    }

    pub fn new_text(content: &str) -> Self {
        Self {
            node_type: NodeType::Text,
            tag_name: String::new(),
            attributes: HashMap::new(),
            children: Vec::new(),
            text_content: content.to_string(),
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    pub fn has_class(&self, class_name: &str) -> bool {
        if let Some(classes) = self.attributes.get("class") {
            classes.split_whitespace().any(|c| c == class_name)
        } else {
            false
        }
    }

    /// 在子树中按 id 查找元素（含自身）
    pub fn find_by_id<'a>(&'a self, id: &str) -> Option<&'a MarkupNode> {
        if self.node_type == NodeType::Element && self.get_attr("id") == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_id(id))
    }

    /// 第一个元素类型的子节点
    pub fn first_element_child(&self) -> Option<&MarkupNode> {
        self.children
            .iter()
            .find(|c| c.node_type == NodeType::Element)
    }
}

/// 在节点列表中按 id 查找元素
pub fn find_by_id<'a>(nodes: &'a [MarkupNode], id: &str) -> Option<&'a MarkupNode> {
    nodes.iter().find_map(|n| n.find_by_id(id))
}

/// 标记解析器
///
/// 基于字节游标；标记的结构分隔符都是 ASCII，属性值和文本内容
/// 中的多字节字符按原样切片保留。
pub struct MarkupParser<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> MarkupParser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    pub fn parse(&mut self) -> Result<Vec<MarkupNode>, String> {
        let mut nodes = Vec::new();

        while self.pos < self.input.len() {
            self.skip_whitespace();
            if self.pos >= self.input.len() {
                break;
            }

            if self.starts_with(b"<!--") {
                self.parse_comment();
            } else if self.starts_with(b"<!") {
                // doctype 声明
                self.skip_until(b'>');
            } else if self.current() == b'<' {
                if self.starts_with(b"</") {
                    break; // 结束标签，返回上层
                }
                let node = self.parse_element()?;
                nodes.push(node);
            } else if let Some(text) = self.parse_text() {
                if !text.text_content.trim().is_empty() {
                    nodes.push(text);
                }
            }
        }

        Ok(nodes)
    }

    fn parse_element(&mut self) -> Result<MarkupNode, String> {
        self.expect(b'<')?;

        let tag_name = self.parse_name();
        if tag_name.is_empty() {
            return Err("Empty tag name".to_string());
        }

        let mut node = MarkupNode::new_element(&tag_name);

        loop {
            self.skip_whitespace();
            if self.current() == b'>' || self.starts_with(b"/>") || self.pos >= self.input.len() {
                break;
            }

            let (name, value) = self.parse_attribute()?;
            if !name.is_empty() {
                node.attributes.insert(name, value);
            }
        }

        // 自闭合标签
        if self.starts_with(b"/>") {
            self.pos += 2;
            return Ok(node);
        }

        self.expect(b'>')?;

        if is_void_tag(&tag_name) {
            return Ok(node);
        }

        node.children = self.parse()?;

        self.skip_whitespace();
        if self.starts_with(b"</") {
            self.pos += 2;
            let end_tag = self.parse_name();
            if end_tag != tag_name {
                return Err(format!("Mismatched tags: {} vs {}", tag_name, end_tag));
            }
            self.skip_whitespace();
            self.expect(b'>')?;
        }

        Ok(node)
    }

    fn parse_name(&mut self) -> String {
        let start = self.pos;
        while self.pos < self.input.len() {
            let c = self.current();
            if c.is_ascii_alphanumeric() || c == b'-' || c == b'_' || c == b':' {
                self.pos += 1;
            } else {
                break;
            }
        }
        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }

    fn parse_attribute(&mut self) -> Result<(String, String), String> {
        let name = self.parse_name();
        if name.is_empty() {
            // 无法识别的字符，跳过以免死循环
            self.pos += 1;
            return Ok((String::new(), String::new()));
        }

        self.skip_whitespace();

        if self.current() != b'=' {
            return Ok((name, String::new()));
        }

        self.pos += 1;
        self.skip_whitespace();

        let value = self.parse_attribute_value();

        Ok((name, value))
    }

    fn parse_attribute_value(&mut self) -> String {
        let quote = self.current();
        if quote != b'"' && quote != b'\'' {
            // 无引号值；'/' 只在自闭合的 "/>" 前才算结束
            let start = self.pos;
            while self.pos < self.input.len() {
                let c = self.current();
                if c.is_ascii_whitespace() || c == b'>' || self.starts_with(b"/>") {
                    break;
                }
                self.pos += 1;
            }
            return String::from_utf8_lossy(&self.input[start..self.pos]).into_owned();
        }

        self.pos += 1; // 跳过开引号
        let start = self.pos;
        while self.pos < self.input.len() && self.current() != quote {
            self.pos += 1;
        }
        let value = String::from_utf8_lossy(&self.input[start..self.pos]).into_owned();

        if self.pos < self.input.len() {
            self.pos += 1; // 跳过闭引号
        }

        value
    }

    fn parse_text(&mut self) -> Option<MarkupNode> {
        let start = self.pos;
        while self.pos < self.input.len() && self.current() != b'<' {
            self.pos += 1;
        }

        if start == self.pos {
            None
        } else {
            let text = String::from_utf8_lossy(&self.input[start..self.pos]);
            Some(MarkupNode::new_text(&text))
        }
    }

    fn parse_comment(&mut self) {
        self.pos += 4; // <!--

        while self.pos < self.input.len() && !self.starts_with(b"-->") {
            self.pos += 1;
        }

        self.pos = (self.pos + 3).min(self.input.len());
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

    fn skip_until(&mut self, b: u8) {
        while self.pos < self.input.len() && self.current() != b {
            self.pos += 1;
        }
        if self.pos < self.input.len() {
            self.pos += 1;
        }
    }

    fn starts_with(&self, s: &[u8]) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    fn expect(&mut self, b: u8) -> Result<(), String> {
        if self.current() == b {
            self.pos += 1;
            Ok(())
        } else {
            Err(format!(
                "Expected '{}', got '{}'",
                b as char,
                self.current() as char
            ))
        }
    }
}

fn is_void_tag(tag: &str) -> bool {
    matches!(tag, "br" | "hr" | "img" | "input" | "meta" | "link")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let markup = r#"<div class="container"><span>Hello</span></div>"#;
        let mut parser = MarkupParser::new(markup);
        let nodes = parser.parse().unwrap();

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].tag_name, "div");
        assert_eq!(nodes[0].get_attr("class"), Some("container"));
        assert_eq!(nodes[0].children.len(), 1);
    }

    #[test]
    fn test_parse_custom_element_attrs() {
        let markup = r#"<rating-widget data-rating="3" data-max-rating="5"></rating-widget>"#;
        let mut parser = MarkupParser::new(markup);
        let nodes = parser.parse().unwrap();

        assert_eq!(nodes[0].tag_name, "rating-widget");
        assert_eq!(nodes[0].get_attr("data-rating"), Some("3"));
        assert_eq!(nodes[0].get_attr("data-max-rating"), Some("5"));
    }

    #[test]
    fn test_parse_self_closing_and_comment() {
        let markup = r#"<!-- 注释 --><div><star-icon class="star"/></div>"#;
        let mut parser = MarkupParser::new(markup);
        let nodes = parser.parse().unwrap();

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].children[0].tag_name, "star-icon");
    }

    #[test]
    fn test_find_by_id() {
        let markup = r#"<div><script id="component-loader" data-stylesheet-url="a.css"></script></div>"#;
        let mut parser = MarkupParser::new(markup);
        let nodes = parser.parse().unwrap();

        let loader = find_by_id(&nodes, "component-loader").unwrap();
        assert_eq!(loader.get_attr("data-stylesheet-url"), Some("a.css"));
    }

    #[test]
    fn test_unquoted_attribute_with_slash() {
        let markup = r#"<script id=component-loader data-stylesheet-url=assets/star.css></script>"#;
        let mut parser = MarkupParser::new(markup);
        let nodes = parser.parse().unwrap();

        assert_eq!(
            nodes[0].get_attr("data-stylesheet-url"),
            Some("assets/star.css")
        );
    }

    #[test]
    fn test_unquoted_attribute_in_self_closing_tag() {
        let mut parser = MarkupParser::new("<star-icon class=star/>");
        let nodes = parser.parse().unwrap();

        assert_eq!(nodes[0].get_attr("class"), Some("star"));
    }

    #[test]
    fn test_mismatched_tags() {
        let mut parser = MarkupParser::new("<div><span></div></span>");
        assert!(parser.parse().is_err());
    }
}
