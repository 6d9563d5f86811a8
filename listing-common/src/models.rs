use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ListingError;

/// 排序方式 - 与列表服务端支持的取值一一对应
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// 最新发布
    #[serde(rename = "recent")]
    Recent,
    /// 最早发布
    #[serde(rename = "oldest")]
    Oldest,
    /// 浏览量
    #[serde(rename = "popular")]
    Popular,
    /// 标题 A-Z
    #[serde(rename = "az")]
    TitleAsc,
    /// 标题 Z-A
    #[serde(rename = "za")]
    TitleDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Recent,
        SortKey::Oldest,
        SortKey::Popular,
        SortKey::TitleAsc,
        SortKey::TitleDesc,
    ];

    /// 查询参数中的取值
    pub fn as_param(&self) -> &'static str {
        match self {
            SortKey::Recent => "recent",
            SortKey::Oldest => "oldest",
            SortKey::Popular => "popular",
            SortKey::TitleAsc => "az",
            SortKey::TitleDesc => "za",
        }
    }

    /// 从查询参数或 `data-value` 解析，未知取值返回 `None`
    pub fn from_param(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_param() == value)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// 筛选徽章的类型，对应 `data-filter-type`
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Search,
    Sort,
    Category,
    ViewAll,
}

impl FilterKind {
    pub fn as_attr(&self) -> &'static str {
        match self {
            FilterKind::Search => "search",
            FilterKind::Sort => "sort",
            FilterKind::Category => "category",
            FilterKind::ViewAll => "view_all",
        }
    }

    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "search" => Some(FilterKind::Search),
            "sort" => Some(FilterKind::Sort),
            "category" => Some(FilterKind::Category),
            "view_all" => Some(FilterKind::ViewAll),
            _ => None,
        }
    }
}

/// 列表接口的 AJAX 响应
///
/// 字段缺失时按空片段处理，不做额外校验。
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct ListingResponse {
    /// 文章网格片段
    pub articles_html: String,
    /// 当前筛选徽章片段
    pub active_filters_html: String,
    /// 分页控件片段
    pub pagination_html: String,
    /// 是否存在搜索或筛选条件（决定精选区是否隐藏）
    pub has_search_or_filter: bool,
}

impl ListingResponse {
    pub fn from_json(body: &str) -> Result<Self, ListingError> {
        Ok(serde_json::from_str(body)?)
    }
}
