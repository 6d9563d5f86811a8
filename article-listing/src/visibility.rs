//! 精选区显隐状态机
//!
//! 隐藏分两步：立即加 `featured-hidden` 开始淡出，过渡结束后再移出布局。
//! 显示一步完成：先恢复布局、强制回流，再去掉隐藏类触发淡入。

use std::time::Duration;

/// 与 CSS 过渡时长保持一致
pub const DEFAULT_COLLAPSE_DELAY: Duration = Duration::from_millis(300);

/// 过渡时长配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTimings {
    /// 加上隐藏类之后多久设置 `display: none`
    pub collapse_delay: Duration,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            collapse_delay: DEFAULT_COLLAPSE_DELAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
}

impl Visibility {
    /// 有搜索或筛选条件时隐藏精选区
    pub fn for_filters(has_search_or_filter: bool) -> Self {
        if has_search_or_filter {
            Visibility::Hidden
        } else {
            Visibility::Shown
        }
    }
}

/// 视图需要依次执行的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityStep {
    /// 添加隐藏类，开始淡出
    AddHiddenClass,
    /// 延迟后若隐藏类仍在，则设置 `display: none`
    CollapseAfter(Duration),
    /// 设置 `display: block`
    RestoreLayout,
    /// 读取布局尺寸以强制回流
    ForceReflow,
    /// 移除隐藏类，开始淡入
    RemoveHiddenClass,
}

#[derive(Debug, Clone)]
pub struct FeaturedVisibility {
    current: Option<Visibility>,
    timings: TransitionTimings,
}

impl FeaturedVisibility {
    pub fn new(timings: TransitionTimings) -> Self {
        Self {
            current: None,
            timings,
        }
    }

    /// 最近一次请求的目标状态，初始化前为 `None`
    pub fn current(&self) -> Option<Visibility> {
        self.current
    }

    /// 切换到目标状态
    ///
    /// 目标与当前相同时同样返回完整步骤：页面可能由服务端以任意状态渲染，
    /// 重复执行这些步骤没有副作用。
    pub fn transition(&mut self, target: Visibility) -> Vec<VisibilityStep> {
        self.current = Some(target);
        match target {
            Visibility::Hidden => vec![
                VisibilityStep::AddHiddenClass,
                VisibilityStep::CollapseAfter(self.timings.collapse_delay),
            ],
            Visibility::Shown => vec![
                VisibilityStep::RestoreLayout,
                VisibilityStep::ForceReflow,
                VisibilityStep::RemoveHiddenClass,
            ],
        }
    }
}

impl Default for FeaturedVisibility {
    fn default() -> Self {
        Self::new(TransitionTimings::default())
    }
}
