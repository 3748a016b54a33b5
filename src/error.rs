//! 组件错误类型
//!
//! 初始化和组件构建阶段的失败都带上资源名称，方便定位；
//! 样式表缺失等可降级的情况不在这里，组件会静默回退到默认样式。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComponentError {
    /// 共享模板未安装就尝试构建模板模式的 star-icon
    #[error("shared template '{name}' is not installed")]
    MissingTemplate { name: String },

    /// 模板片段里找不到指定名字的 template 元素
    #[error("template '{name}' not found in fetched fragment")]
    TemplateNotFound { name: String },

    /// 资源获取失败（网络或文件系统）
    #[error("failed to fetch resource '{url}': {reason}")]
    ResourceFetch { url: String, reason: String },

    /// 标记解析失败
    #[error("failed to parse markup: {0}")]
    MarkupParse(String),

    /// 样式表解析失败
    #[error("failed to parse stylesheet: {0}")]
    StylesheetParse(String),

    /// 图标标记里没有可绘制的 path
    #[error("glyph markup has no drawable path")]
    BadGlyph,
}
