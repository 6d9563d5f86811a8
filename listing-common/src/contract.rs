//! 列表页 DOM 约定
//!
//! 控制器依赖的元素 ID、类名和 data 属性。浏览器端绑定和 `listing-lint`
//! 共用这一份定义。

// 下拉菜单
pub const FILTER_BUTTON: &str = "filterButton";
pub const FILTER_CONTENT: &str = "filterContent";
pub const CATEGORY_BUTTON: &str = "categoryButton";
pub const CATEGORY_CONTENT: &str = "categoryContent";
pub const DROPDOWN_OPEN_CLASS: &str = "show";

// 搜索表单
pub const SEARCH_FORM: &str = "searchForm";
pub const SEARCH_INPUT_NAME: &str = "search";

// 内容区域
pub const ARTICLES_CONTAINER: &str = "articlesContainer";
pub const ACTIVE_FILTERS: &str = "activeFilters";
pub const FEATURED_SECTION: &str = "featuredArticleSection";
pub const PAGINATION_CONTAINER_CLASS: &str = "pagination-container";

// 交互元素
pub const RADIO_ITEM_CLASS: &str = "radio-item";
pub const CATEGORY_INPUT_NAME: &str = "category";
pub const CATEGORY_ID_PREFIX: &str = "category-";
pub const REMOVE_FILTER_CLASS: &str = "remove-filter";
pub const PAGINATION_LINK_CLASS: &str = "pagination-link";
pub const VIEW_ALL_CLASS: &str = "view-all-articles";
pub const RETRY_CLASS: &str = "retry-articles";

// data 属性
pub const DATA_VALUE: &str = "data-value";
pub const DATA_FILTER_TYPE: &str = "data-filter-type";
pub const DATA_PAGE: &str = "data-page";

// 动画
pub const FEATURED_HIDDEN_CLASS: &str = "featured-hidden";
pub const ANIMATE_ON_SCROLL_CLASS: &str = "animate-on-scroll";
pub const ANIMATE_REVEALED_CLASS: &str = "animate-fade-in-up";

/// 分类复选框的元素 ID
pub fn category_checkbox_id(value: &str) -> String {
    format!("{}{}", CATEGORY_ID_PREFIX, value)
}

/// 整页必须存在的元素 ID
pub const REQUIRED_IDS: &[&str] = &[
    FILTER_BUTTON,
    FILTER_CONTENT,
    CATEGORY_BUTTON,
    CATEGORY_CONTENT,
    SEARCH_FORM,
    ARTICLES_CONTAINER,
    ACTIVE_FILTERS,
];
