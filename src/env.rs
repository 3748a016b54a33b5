//! 组件环境 - 元素类型注册表、共享样式表与模板存储

use crate::components::{ComponentContext, RenderNode};
use crate::error::ComponentError;
use crate::parser::{MarkupNode, StyleSheet};
use once_cell::sync::{Lazy, OnceCell};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// 组件构建函数
pub type BuildFn = fn(&MarkupNode, &mut ComponentContext) -> Result<RenderNode, ComponentError>;

/// 星形字形来源
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GlyphSource {
    /// 内置字形
    #[default]
    Inline,
    /// 必须使用已安装的模板，缺失即构建失败
    Template,
}

/// 组件环境
///
/// 共享样式表只发布一次，之后的发布请求被忽略；
/// 各组件在构建时轮询读取，发布前构建的组件不回溯重排。
pub struct ComponentEnv {
    registry: RwLock<HashMap<String, BuildFn>>,
    stylesheet: OnceCell<Arc<StyleSheet>>,
    templates: RwLock<HashMap<String, MarkupNode>>,
    glyph_source: RwLock<GlyphSource>,
}

impl ComponentEnv {
    pub fn new() -> Self {
        Self {
            registry: RwLock::new(HashMap::new()),
            stylesheet: OnceCell::new(),
            templates: RwLock::new(HashMap::new()),
            glyph_source: RwLock::new(GlyphSource::default()),
        }
    }

    /// 注册元素类型；重复注册覆盖旧的构建函数
    pub fn define(&self, tag_name: &str, build: BuildFn) {
        self.registry
            .write()
            .unwrap()
            .insert(tag_name.to_string(), build);
    }

    pub fn is_defined(&self, tag_name: &str) -> bool {
        self.registry.read().unwrap().contains_key(tag_name)
    }

    pub fn builder(&self, tag_name: &str) -> Option<BuildFn> {
        self.registry.read().unwrap().get(tag_name).copied()
    }

    /// 发布共享样式表，返回是否接受（只接受第一次）
    pub fn publish_stylesheet(&self, sheet: StyleSheet) -> bool {
        self.stylesheet.set(Arc::new(sheet)).is_ok()
    }

    pub fn stylesheet(&self) -> Option<Arc<StyleSheet>> {
        self.stylesheet.get().cloned()
    }

    /// 安装字形模板
    pub fn install_template(&self, name: &str, node: MarkupNode) {
        self.templates
            .write()
            .unwrap()
            .insert(name.to_string(), node);
    }

    pub fn template(&self, name: &str) -> Option<MarkupNode> {
        self.templates.read().unwrap().get(name).cloned()
    }

    pub fn set_glyph_source(&self, source: GlyphSource) {
        *self.glyph_source.write().unwrap() = source;
    }

    pub fn glyph_source(&self) -> GlyphSource {
        *self.glyph_source.read().unwrap()
    }
}

impl Default for ComponentEnv {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_ENV: Lazy<Arc<ComponentEnv>> = Lazy::new(|| Arc::new(ComponentEnv::new()));

/// 进程级共享环境
pub fn global() -> Arc<ComponentEnv> {
    GLOBAL_ENV.clone()
}
