use listing_common::{query, FilterKind, FilterState, ListingError, ListingResponse, SortKey};
use tracing::{debug, error, info};

use crate::config::ListingConfig;
use crate::view::ListingView;
use crate::visibility::{FeaturedVisibility, Visibility};

/// 页面交互解析出的动作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingAction {
    /// 搜索表单提交，或防抖后的输入
    SearchSubmitted(String),
    /// 选择排序方式，`None` 表示默认顺序
    SortSelected(Option<SortKey>),
    /// 当前勾选的全部分类
    CategoriesChanged(Vec<String>),
    /// 点击筛选徽章上的移除按钮
    FilterRemoved {
        kind: FilterKind,
        value: Option<String>,
    },
    /// 点击分页链接
    PageSelected(u32),
    /// 切换浏览全部模式
    ViewAllToggled,
    /// 错误状态下点击重试
    Retry,
}

/// 一次待发出的列表请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    /// 请求序号，只有最新序号的响应会被应用
    pub token: u64,
    /// 带 `ajax=true` 的完整地址
    pub url: String,
}

/// 请求完成后的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    Failed,
    /// 已有更新的请求发出，响应被丢弃
    Stale,
}

/// 列表页控制器 - 持有筛选状态，并把它投影到页面和地址栏
pub struct ListingController<V: ListingView> {
    view: V,
    state: FilterState,
    featured: FeaturedVisibility,
    config: ListingConfig,
    /// 当前页面路径，写入浏览历史
    path: String,
    /// 列表接口路径，未配置时与页面路径相同
    endpoint: String,
    latest_token: u64,
}

impl<V: ListingView> ListingController<V> {
    pub fn new(view: V, path: impl Into<String>, config: ListingConfig) -> Self {
        let path = path.into();
        let endpoint = config.endpoint.clone().unwrap_or_else(|| path.clone());
        Self {
            view,
            state: FilterState::new(),
            featured: FeaturedVisibility::new(config.timings()),
            config,
            path,
            endpoint,
            latest_token: 0,
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn featured(&self) -> Option<Visibility> {
        self.featured.current()
    }

    /// 页面加载时从地址栏查询字符串恢复状态，不发请求
    ///
    /// 服务端渲染的文章同样需要滚动显现，观察器在这里启动。
    pub fn initialize(&mut self, raw_query: &str) {
        self.state = query::from_query(raw_query);
        info!(
            "列表状态已初始化: {}",
            query::location(&self.path, &self.state)
        );

        let label = self.config.view_all_toggle_label(self.state.view_all());
        self.view.set_view_all_label(label);
        self.apply_featured(self.state.has_search_or_filter());
        self.view.reveal_on_scroll();
    }

    /// 处理一个页面动作；状态变化时返回需要发出的请求
    pub fn dispatch(&mut self, action: ListingAction) -> Option<ListingRequest> {
        debug!("处理动作: {:?}", action);

        let changed = match action {
            ListingAction::SearchSubmitted(value) => self.state.set_search(&value),
            ListingAction::SortSelected(sort) => self.state.set_sort(sort),
            ListingAction::CategoriesChanged(values) => self.state.set_categories(values),
            ListingAction::FilterRemoved { kind, value } => self.remove_filter(kind, value.as_deref()),
            ListingAction::PageSelected(page) => self.state.set_page(page),
            ListingAction::ViewAllToggled => self.toggle_view_all(),
            ListingAction::Retry => true,
        };

        if changed {
            Some(self.refresh())
        } else {
            None
        }
    }

    fn remove_filter(&mut self, kind: FilterKind, value: Option<&str>) -> bool {
        let changed = self.state.remove_filter(kind, value);

        match kind {
            FilterKind::Search => self.view.clear_search_input(),
            FilterKind::Category => {
                if let Some(value) = value {
                    self.view.uncheck_category(value);
                }
            }
            FilterKind::ViewAll => self.sync_view_all(),
            FilterKind::Sort => {}
        }

        changed
    }

    fn toggle_view_all(&mut self) -> bool {
        let next = !self.state.view_all();
        self.state.set_view_all(next);
        self.sync_view_all();
        true
    }

    // 浏览全部切换后立即更新按钮文字和精选区，不等待响应
    fn sync_view_all(&mut self) {
        let label = self.config.view_all_toggle_label(self.state.view_all());
        self.view.set_view_all_label(label);
        self.apply_featured(self.state.has_search_or_filter());
    }

    fn apply_featured(&mut self, hidden: bool) {
        let steps = self.featured.transition(Visibility::for_filters(hidden));
        self.view.set_featured_visibility(&steps);
    }

    /// 显示加载状态并生成新的请求
    pub fn refresh(&mut self) -> ListingRequest {
        self.latest_token += 1;
        self.view.show_loading();

        let url = query::request_url(&self.endpoint, &self.state);
        debug!("发起列表请求 #{}: {}", self.latest_token, url);

        ListingRequest {
            token: self.latest_token,
            url,
        }
    }

    /// 应用请求结果
    ///
    /// 失败时只渲染错误状态，筛选状态和浏览历史保持不变。
    pub fn complete(
        &mut self,
        token: u64,
        result: Result<ListingResponse, ListingError>,
    ) -> RefreshOutcome {
        if token != self.latest_token {
            debug!("丢弃过期响应 #{}（最新 #{}）", token, self.latest_token);
            return RefreshOutcome::Stale;
        }

        match result {
            Ok(response) => {
                self.view.render_articles(&response.articles_html);
                self.view.render_badges(&response.active_filters_html);
                self.view.render_pagination(&response.pagination_html);
                self.apply_featured(response.has_search_or_filter || self.state.view_all());

                let location = query::location(&self.path, &self.state);
                self.view.push_history(&location);
                self.view.reveal_on_scroll();

                debug!("列表请求 #{} 已应用", token);
                RefreshOutcome::Applied
            }
            Err(e) => {
                error!("加载文章失败: {}", e);
                self.view
                    .show_error(&self.config.error_message, &self.config.retry_label);
                RefreshOutcome::Failed
            }
        }
    }
}
