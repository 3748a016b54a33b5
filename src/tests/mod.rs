//! 单元测试模块
//! 覆盖 CSS 解析、组件构建、渲染和装载流程

pub mod component_tests;
pub mod css_tests;
