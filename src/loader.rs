//! 组件装载 - 读取装载描述符、拉取资源并注册元素类型

use crate::components::{
    Component, RatingWidgetComponent, StarIconComponent, STAR_TEMPLATE_NAME,
};
use crate::env::{ComponentEnv, GlyphSource};
use crate::error::ComponentError;
use crate::parser::markup::{find_by_id, MarkupNode, MarkupParser};
use crate::parser::CssParser;
use std::sync::Arc;

/// 装载描述符元素的 id
pub const LOADER_ID: &str = "component-loader";

/// 装载配置
#[derive(Debug, Clone, Default)]
pub struct LoaderConfig {
    pub stylesheet_url: Option<String>,
    pub template_url: Option<String>,
}

impl LoaderConfig {
    /// 从宿主文档提取装载描述符；描述符缺失返回空配置
    pub fn from_document(nodes: &[MarkupNode]) -> Self {
        let Some(loader) = find_by_id(nodes, LOADER_ID) else {
            return Self::default();
        };

        Self {
            stylesheet_url: loader.get_attr("data-stylesheet-url").map(str::to_string),
            template_url: loader.get_attr("data-template-url").map(str::to_string),
        }
    }
}

/// 拉取文本资源；http(s) 走网络，其余按本地路径读取
fn fetch_text(url: &str) -> Result<String, ComponentError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        let resp = ureq::get(url)
            .call()
            .map_err(|e| ComponentError::ResourceFetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        resp.into_string().map_err(|e| ComponentError::ResourceFetch {
            url: url.to_string(),
            reason: e.to_string(),
        })
    } else {
        std::fs::read_to_string(url).map_err(|e| ComponentError::ResourceFetch {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

/// 从模板文档安装字形模板
///
/// 取 id 或 name 匹配的 template 元素的第一个元素子节点。
fn install_templates(env: &ComponentEnv, markup: &str) -> Result<(), ComponentError> {
    let nodes = MarkupParser::new(markup)
        .parse()
        .map_err(ComponentError::MarkupParse)?;

    let mut installed = false;
    for node in flatten(&nodes) {
        if node.tag_name != "template" {
            continue;
        }
        let name = node
            .get_attr("id")
            .or_else(|| node.get_attr("name"))
            .unwrap_or(STAR_TEMPLATE_NAME);
        if name != STAR_TEMPLATE_NAME {
            continue;
        }
        if let Some(glyph) = node.first_element_child() {
            env.install_template(STAR_TEMPLATE_NAME, glyph.clone());
            installed = true;
        }
    }

    if installed {
        Ok(())
    } else {
        Err(ComponentError::TemplateNotFound {
            name: STAR_TEMPLATE_NAME.to_string(),
        })
    }
}

fn flatten(nodes: &[MarkupNode]) -> Vec<&MarkupNode> {
    let mut out = Vec::new();
    for n in nodes {
        out.push(n);
        out.extend(flatten(&n.children));
    }
    out
}

/// 注册内置元素类型
fn register_components(env: &ComponentEnv) {
    env.define("star-icon", StarIconComponent::build);
    env.define("rating-widget", RatingWidgetComponent::build);
}

/// 初始化组件系统
///
/// 模板拉取是阻塞的，失败则整个初始化失败且不注册任何元素类型；
/// 样式表在后台线程拉取，发布进共享环境，失败只记日志。
pub fn init_components(env: Arc<ComponentEnv>, document: &[MarkupNode]) -> Result<(), ComponentError> {
    let config = LoaderConfig::from_document(document);

    if let Some(url) = &config.template_url {
        let markup = fetch_text(url)?;
        install_templates(&env, &markup)?;
        env.set_glyph_source(GlyphSource::Template);
        tracing::debug!(url = url.as_str(), "已安装星形模板");
    }

    if let Some(url) = config.stylesheet_url.clone() {
        let env = env.clone();
        std::thread::spawn(move || match fetch_text(&url) {
            Ok(css) => match CssParser::new(&css).parse() {
                Ok(sheet) => {
                    if env.publish_stylesheet(sheet) {
                        tracing::debug!(url = url.as_str(), "已发布共享样式表");
                    }
                }
                Err(e) => {
                    tracing::warn!(url = url.as_str(), error = e.as_str(), "样式表解析失败");
                }
            },
            Err(e) => {
                tracing::warn!(url = url.as_str(), error = %e, "样式表拉取失败");
            }
        });
    }

    register_components(&env);
    Ok(())
}
