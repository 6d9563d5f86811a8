use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::{FilterKind, SortKey};

/// 分类 ID 在查询参数中的分隔符，ID 本身不能包含它
pub const CATEGORY_SEPARATOR: &str = ",";

/// 列表页的筛选状态 - 请求参数和地址栏都由它派生
///
/// 所有修改方法在值未变化时返回 `false`，调用方据此跳过多余的刷新。
/// 搜索、排序、分类或浏览全部发生变化时页码回到 1。
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FilterState {
    /// 搜索关键词，空字符串表示不筛选
    search: String,
    /// 排序方式，`None` 表示默认顺序
    sort: Option<SortKey>,
    /// 已选分类 ID，只关心成员关系
    category: BTreeSet<String>,
    /// 当前页码，始终 >= 1
    page: u32,
    /// 浏览全部模式（不分页、隐藏精选区）
    view_all: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self {
            search: String::new(),
            sort: None,
            category: BTreeSet::new(),
            page: 1,
            view_all: false,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    pub fn categories(&self) -> &BTreeSet<String> {
        &self.category
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn view_all(&self) -> bool {
        self.view_all
    }

    /// 是否存在任何搜索或筛选条件
    pub fn has_search_or_filter(&self) -> bool {
        !self.search.is_empty() || !self.category.is_empty() || self.sort.is_some() || self.view_all
    }

    /// 设置搜索关键词（去除首尾空白）
    pub fn set_search(&mut self, value: &str) -> bool {
        let value = value.trim();
        if value == self.search {
            return false;
        }
        self.search = value.to_string();
        self.page = 1;
        true
    }

    pub fn set_sort(&mut self, sort: Option<SortKey>) -> bool {
        if sort == self.sort {
            return false;
        }
        self.sort = sort;
        self.page = 1;
        true
    }

    /// 用当前勾选的分类替换分类集合，按集合比较，与勾选顺序无关
    ///
    /// 含分隔符的值拆成多个 ID，保证集合写入查询参数后能原样解析回来。
    pub fn set_categories<I, S>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let next: BTreeSet<String> = values
            .into_iter()
            .flat_map(|value| {
                value
                    .as_ref()
                    .split(CATEGORY_SEPARATOR)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();
        if next == self.category {
            return false;
        }
        self.category = next;
        self.page = 1;
        true
    }

    pub fn remove_category(&mut self, value: &str) -> bool {
        if !self.category.remove(value) {
            return false;
        }
        self.page = 1;
        true
    }

    /// 跳转页码，0 视为 1；只改页码不影响其它条件
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        if page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    pub fn set_view_all(&mut self, view_all: bool) -> bool {
        if view_all == self.view_all {
            return false;
        }
        self.view_all = view_all;
        self.page = 1;
        true
    }

    /// 移除一个筛选徽章对应的条件
    pub fn remove_filter(&mut self, kind: FilterKind, value: Option<&str>) -> bool {
        match kind {
            FilterKind::Search => self.set_search(""),
            FilterKind::Sort => self.set_sort(None),
            FilterKind::Category => match value {
                Some(value) => self.remove_category(value),
                None => false,
            },
            FilterKind::ViewAll => self.set_view_all(false),
        }
    }
}
