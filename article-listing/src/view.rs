use crate::visibility::VisibilityStep;

/// 控制器对页面的全部写操作
///
/// 浏览器里由 [`crate::dom::DomView`] 实现；测试中用记录调用的假视图替代。
/// 页面结构异常时实现方自行忽略，不向控制器报错。
pub trait ListingView {
    /// 文章区域显示加载中
    fn show_loading(&mut self);
    /// 文章区域显示错误信息和重试按钮
    fn show_error(&mut self, message: &str, retry_label: &str);
    fn render_articles(&mut self, html: &str);
    fn render_badges(&mut self, html: &str);
    fn render_pagination(&mut self, html: &str);
    /// 按顺序执行精选区过渡步骤
    fn set_featured_visibility(&mut self, steps: &[VisibilityStep]);
    /// 更新“浏览全部”按钮文字
    fn set_view_all_label(&mut self, label: &str);
    /// 写入浏览历史，不触发导航
    fn push_history(&mut self, location: &str);
    /// 对新插入的元素启用滚动显现动画
    fn reveal_on_scroll(&mut self);
    fn clear_search_input(&mut self);
    fn uncheck_category(&mut self, value: &str);
}
