//! DOM 约定检查规则

use std::fmt;

use listing_common::contract::{
    category_checkbox_id, ACTIVE_FILTERS, ARTICLES_CONTAINER, CATEGORY_INPUT_NAME, DATA_FILTER_TYPE, DATA_PAGE,
    DATA_VALUE, FEATURED_SECTION, PAGINATION_CONTAINER_CLASS, PAGINATION_LINK_CLASS,
    RADIO_ITEM_CLASS, REMOVE_FILTER_CLASS, REQUIRED_IDS, SEARCH_FORM, SEARCH_INPUT_NAME,
    VIEW_ALL_CLASS,
};
use listing_common::{FilterKind, ListingResponse, SortKey};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::dom::Document;
use crate::error::LintError;

static PAGE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[1-9][0-9]*\s*$").expect("页码正则无效"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("警告"),
            Severity::Error => f.write_str("错误"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// 检查整页标记
pub fn check_page(document: &Document) -> Vec<Finding> {
    let mut findings = Vec::new();

    for id in REQUIRED_IDS {
        if document.by_id(id).is_none() {
            findings.push(Finding::error(format!("缺少 #{}", id)));
        }
    }
    if document.by_id(FEATURED_SECTION).is_none() {
        findings.push(Finding::warning(format!("缺少 #{}，精选区切换不会生效", FEATURED_SECTION)));
    }
    if document.with_class(PAGINATION_CONTAINER_CLASS).next().is_none() {
        findings.push(Finding::warning(format!("缺少 .{}", PAGINATION_CONTAINER_CLASS)));
    }
    if document.with_class(VIEW_ALL_CLASS).next().is_none() {
        findings.push(Finding::warning(format!("没有 .{} 按钮", VIEW_ALL_CLASS)));
    }

    check_search_form(document, &mut findings);
    check_sort_items(document, &mut findings);
    check_category_inputs(document, &mut findings);
    check_badges(document, &mut findings);
    check_pagination_links(document, &mut findings);

    findings
}

/// 检查一次 AJAX 响应中的片段
pub fn check_response(articles: &Document, badges: &Document, pagination: &Document) -> Vec<Finding> {
    let mut findings = Vec::new();

    // 文章片段只要求不含页面骨架元素，否则替换后会出现重复 ID
    for id in [ARTICLES_CONTAINER, ACTIVE_FILTERS] {
        if articles.by_id(id).is_some() {
            findings.push(Finding::error(format!("文章片段中包含 #{}", id)));
        }
    }

    check_badges(badges, &mut findings);
    check_pagination_links(pagination, &mut findings);
    findings
}

/// 解析响应中的三个片段并检查
pub fn check_listing_response(response: &ListingResponse) -> Result<Vec<Finding>, LintError> {
    let articles = Document::parse(&response.articles_html)?;
    let badges = Document::parse(&response.active_filters_html)?;
    let pagination = Document::parse(&response.pagination_html)?;
    Ok(check_response(&articles, &badges, &pagination))
}

fn check_search_form(document: &Document, findings: &mut Vec<Finding>) {
    let Some((form, _)) = document.by_id(SEARCH_FORM) else {
        return;
    };
    let has_input = document.elements().any(|(index, element)| {
        element.tag == "input"
            && element.attr("name") == Some(SEARCH_INPUT_NAME)
            && document.is_inside(index, form)
    });
    if !has_input {
        findings.push(Finding::error(format!(
            "#{} 中没有 input[name=\"{}\"]",
            SEARCH_FORM, SEARCH_INPUT_NAME
        )));
    }
}

fn check_sort_items(document: &Document, findings: &mut Vec<Finding>) {
    for (_, item) in document.with_class(RADIO_ITEM_CLASS) {
        match item.attr(DATA_FILTER_TYPE) {
            Some(kind) if kind == FilterKind::Sort.as_attr() => {
                let value = item.attr(DATA_VALUE).unwrap_or_default();
                if !value.is_empty() && SortKey::from_param(value).is_none() {
                    findings.push(Finding::error(format!("未知的排序方式 {}=\"{}\"", DATA_VALUE, value)));
                }
            }
            Some(_) => {}
            None => findings.push(Finding::warning(format!(".{} 缺少 {}", RADIO_ITEM_CLASS, DATA_FILTER_TYPE))),
        }
    }
}

fn check_category_inputs(document: &Document, findings: &mut Vec<Finding>) {
    let inputs = document
        .elements()
        .filter(|(_, element)| element.tag == "input" && element.attr("name") == Some(CATEGORY_INPUT_NAME));

    for (_, input) in inputs {
        let value = input.attr("value").unwrap_or_default();
        if value.is_empty() {
            findings.push(Finding::error("分类复选框缺少 value"));
            continue;
        }
        if value.contains(',') {
            findings.push(Finding::error(format!("分类值 \"{}\" 含有逗号，无法写入查询参数", value)));
        }

        let expected = category_checkbox_id(value);
        if input.id() != Some(expected.as_str()) {
            findings.push(Finding::error(format!(
                "分类复选框 value=\"{}\" 的 id 应为 {}",
                value, expected
            )));
        }
    }
}

fn check_badges(document: &Document, findings: &mut Vec<Finding>) {
    for (index, button) in document.with_class(REMOVE_FILTER_CLASS) {
        let Some(badge) = document.parent(index) else {
            findings.push(Finding::error(format!(".{} 没有父元素", REMOVE_FILTER_CLASS)));
            continue;
        };

        let kind = badge.attr(DATA_FILTER_TYPE).unwrap_or_default();
        match FilterKind::from_attr(kind) {
            Some(FilterKind::Category) => {
                if badge.attr(DATA_VALUE).map_or(true, str::is_empty) {
                    findings.push(Finding::error("分类徽章缺少 data-value"));
                }
            }
            Some(_) => {}
            None => findings.push(Finding::error(format!(
                "<{}> 的父元素 {}=\"{}\" 无法识别",
                button.tag, DATA_FILTER_TYPE, kind
            ))),
        }
    }
}

// 与控制器读取 data-page 的规则一致：正整数且不超过 u32
fn is_page_number(value: &str) -> bool {
    PAGE_NUMBER.is_match(value) && value.trim().parse::<u32>().is_ok()
}

fn check_pagination_links(document: &Document, findings: &mut Vec<Finding>) {
    for (_, link) in document.with_class(PAGINATION_LINK_CLASS) {
        match link.attr(DATA_PAGE) {
            Some(page) if is_page_number(page) => {}
            Some(page) => findings.push(Finding::error(format!("无效的页码 {}=\"{}\"", DATA_PAGE, page))),
            None => findings.push(Finding::error(format!("分页链接缺少 {}", DATA_PAGE))),
        }
    }
}
