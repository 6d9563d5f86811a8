//! 查询字符串编解码
//!
//! 只输出非默认值的字段，编码方式与浏览器 `URLSearchParams` 一致
//! （`application/x-www-form-urlencoded`）。

use tracing::warn;
use url::form_urlencoded;

use crate::models::SortKey;
use crate::state::{FilterState, CATEGORY_SEPARATOR};

pub const SEARCH_PARAM: &str = "search";
pub const SORT_PARAM: &str = "sort";
pub const CATEGORY_PARAM: &str = "category";
pub const PAGE_PARAM: &str = "page";
pub const VIEW_ALL_PARAM: &str = "view_all";
/// 标记请求只需要返回片段而不是整页
pub const AJAX_PARAM: &str = "ajax";

/// 按固定顺序列出非默认值的参数
pub fn to_pairs(state: &FilterState) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();

    if !state.search().is_empty() {
        pairs.push((SEARCH_PARAM, state.search().to_string()));
    }
    if let Some(sort) = state.sort() {
        pairs.push((SORT_PARAM, sort.as_param().to_string()));
    }
    if !state.categories().is_empty() {
        let joined = state
            .categories()
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(CATEGORY_SEPARATOR);
        pairs.push((CATEGORY_PARAM, joined));
    }
    if state.page() > 1 {
        pairs.push((PAGE_PARAM, state.page().to_string()));
    }
    if state.view_all() {
        pairs.push((VIEW_ALL_PARAM, "true".to_string()));
    }

    pairs
}

fn encode<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// 地址栏使用的规范查询字符串（不含 `?`），默认状态返回空字符串
pub fn to_query(state: &FilterState) -> String {
    let pairs = to_pairs(state);
    encode(pairs.iter().map(|(key, value)| (*key, value.as_str())))
}

/// AJAX 请求使用的查询字符串，总是附带 `ajax=true`
pub fn to_ajax_query(state: &FilterState) -> String {
    let pairs = to_pairs(state);
    encode(
        pairs
            .iter()
            .map(|(key, value)| (*key, value.as_str()))
            .chain(std::iter::once((AJAX_PARAM, "true"))),
    )
}

/// 从地址栏查询字符串恢复状态
///
/// 同名参数只取第一个；无法识别的排序方式和非法页码回落到默认值。
pub fn from_query(query: &str) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut search = None;
    let mut sort = None;
    let mut category = None;
    let mut page = None;
    let mut view_all = None;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let slot = match key.as_ref() {
            SEARCH_PARAM => &mut search,
            SORT_PARAM => &mut sort,
            CATEGORY_PARAM => &mut category,
            PAGE_PARAM => &mut page,
            VIEW_ALL_PARAM => &mut view_all,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(value.into_owned());
        }
    }

    let mut state = FilterState::new();

    if let Some(search) = search {
        state.set_search(&search);
    }
    if let Some(sort) = sort.filter(|value| !value.is_empty()) {
        match SortKey::from_param(&sort) {
            Some(key) => {
                state.set_sort(Some(key));
            }
            None => warn!("忽略未知的排序方式: {}", sort),
        }
    }
    if let Some(category) = category {
        state.set_categories(category.split(CATEGORY_SEPARATOR));
    }
    state.set_view_all(view_all.as_deref() == Some("true"));
    // 页码最后设置，前面的修改都会把页码重置为 1
    if let Some(page) = page {
        state.set_page(page.trim().parse::<u32>().unwrap_or(1));
    }

    state
}

/// 当前路径加规范查询字符串，用于写入浏览历史
pub fn location(path: &str, state: &FilterState) -> String {
    let query = to_query(state);
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

/// 发往列表接口的完整请求地址
pub fn request_url(path: &str, state: &FilterState) -> String {
    format!("{}?{}", path, to_ajax_query(state))
}
