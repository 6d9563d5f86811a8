//! 基于 web-sys 的页面视图实现

use js_sys::{Array, Object, Reflect};
use listing_common::contract::{
    category_checkbox_id, ACTIVE_FILTERS, ANIMATE_ON_SCROLL_CLASS, ANIMATE_REVEALED_CLASS,
    ARTICLES_CONTAINER, CATEGORY_CONTENT, CATEGORY_INPUT_NAME, DROPDOWN_OPEN_CLASS,
    FEATURED_HIDDEN_CLASS, FEATURED_SECTION, FILTER_CONTENT, PAGINATION_CONTAINER_CLASS,
    RETRY_CLASS, SEARCH_FORM, SEARCH_INPUT_NAME, VIEW_ALL_CLASS,
};
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Node, Window,
};

use crate::timer;
use crate::view::ListingView;
use crate::visibility::VisibilityStep;

const LOADING_HTML: &str = r#"<style>
.loader {
    width: 48px;
    height: 48px;
    border: 5px solid #FFF;
    border-bottom-color: #FF3D00;
    border-radius: 50%;
    display: inline-block;
    box-sizing: border-box;
    animation: rotation 1s linear infinite;
}

@keyframes rotation {
    0% { transform: rotate(0deg); }
    100% { transform: rotate(360deg); }
}
</style>

<div class="col-span-3 text-center py-8">
  <span class="loader"></span>
</div>
"#;

const ERROR_ICON_HTML: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" class="w-12 h-12 text-red-500" fill="none" viewBox="0 0 24 24" stroke="currentColor">
  <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2"
    d="M12 9v2m0 4h.01M4.5 12a7.5 7.5 0 1115 0 7.5 7.5 0 01-15 0z" />
</svg>"#;

/// 滚动显现动画的可见比例阈值
const REVEAL_THRESHOLD: f64 = 0.1;

struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

/// 浏览器页面视图
pub struct DomView {
    window: Window,
    document: Document,
    reveal: Option<RevealObserver>,
}

impl DomView {
    pub fn new(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            reveal: None,
        }
    }

    fn element(&self, id: &str) -> Option<Element> {
        let element = self.document.get_element_by_id(id);
        if element.is_none() {
            debug!("页面中没有 #{}", id);
        }
        element
    }

    fn search_input(&self) -> Result<Option<HtmlInputElement>, JsValue> {
        let selector = format!("#{} input[name=\"{}\"]", SEARCH_FORM, SEARCH_INPUT_NAME);
        Ok(self
            .document
            .query_selector(&selector)?
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok()))
    }

    fn set_inner_html(&self, id: &str, html: &str) {
        if let Some(element) = self.element(id) {
            element.set_inner_html(html);
        }
    }

    /// 搜索框当前内容（已去除首尾空白）
    pub fn search_input_value(&self) -> Result<String, JsValue> {
        Ok(self
            .search_input()?
            .map(|input| input.value().trim().to_string())
            .unwrap_or_default())
    }

    /// 所有已勾选分类的值
    pub fn checked_categories(&self) -> Result<Vec<String>, JsValue> {
        let selector = format!("input[name=\"{}\"]:checked", CATEGORY_INPUT_NAME);
        let nodes = self.document.query_selector_all(&selector)?;
        Ok((0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .collect())
    }

    /// 展开或收起一个下拉菜单，同时收起另一个
    pub fn toggle_dropdown(&self, open: &str, other: &str) -> Result<(), JsValue> {
        if let Some(content) = self.element(open) {
            content.class_list().toggle(DROPDOWN_OPEN_CLASS)?;
        }
        self.close_dropdown(other)
    }

    pub fn close_dropdown(&self, id: &str) -> Result<(), JsValue> {
        if let Some(content) = self.element(id) {
            content.class_list().remove_1(DROPDOWN_OPEN_CLASS)?;
        }
        Ok(())
    }

    /// 点击发生在下拉菜单之外时收起它
    pub fn close_dropdowns_outside(&self, target: &Node) -> Result<(), JsValue> {
        for id in [FILTER_CONTENT, CATEGORY_CONTENT] {
            if let Some(content) = self.element(id) {
                if !content.contains(Some(target)) {
                    content.class_list().remove_1(DROPDOWN_OPEN_CLASS)?;
                }
            }
        }
        Ok(())
    }

    fn try_show_error(&self, message: &str, retry_label: &str) -> Result<(), JsValue> {
        let Some(container) = self.element(ARTICLES_CONTAINER) else {
            return Ok(());
        };

        let wrapper = self.document.create_element("div")?;
        wrapper.set_class_name("col-span-3 flex flex-col items-center justify-center space-y-4 py-12");
        wrapper.set_inner_html(ERROR_ICON_HTML);

        let text = self.document.create_element("p")?;
        text.set_class_name("text-gray-700 text-lg font-medium");
        text.set_text_content(Some(message));
        wrapper.append_child(&text)?;

        let button = self.document.create_element("button")?;
        button.set_attribute("type", "button")?;
        button.set_class_name(&format!(
            "{} px-5 py-2 bg-blue-600 text-white rounded-lg shadow hover:bg-blue-700 transition",
            RETRY_CLASS
        ));
        button.set_text_content(Some(retry_label));
        wrapper.append_child(&button)?;

        container.set_inner_html("");
        container.append_child(&wrapper)?;
        Ok(())
    }

    fn try_set_featured_visibility(&self, steps: &[VisibilityStep]) -> Result<(), JsValue> {
        let Some(section) = self
            .element(FEATURED_SECTION)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        else {
            return Ok(());
        };

        for step in steps {
            match *step {
                VisibilityStep::AddHiddenClass => section.class_list().add_1(FEATURED_HIDDEN_CLASS)?,
                VisibilityStep::RemoveHiddenClass => {
                    section.class_list().remove_1(FEATURED_HIDDEN_CLASS)?
                }
                VisibilityStep::RestoreLayout => section.style().set_property("display", "block")?,
                VisibilityStep::ForceReflow => {
                    // 读取尺寸让浏览器先应用 display 变化，淡入过渡才会生效
                    let _ = section.offset_width();
                }
                VisibilityStep::CollapseAfter(delay) => {
                    let section = section.clone();
                    timer::set_timeout(delay, move || {
                        if section.class_list().contains(FEATURED_HIDDEN_CLASS) {
                            if let Err(e) = section.style().set_property("display", "none") {
                                warn!("隐藏精选区失败: {:?}", e);
                            }
                        }
                    })?;
                }
            }
        }
        Ok(())
    }

    fn try_push_history(&self, location: &str) -> Result<(), JsValue> {
        let state = Object::new();
        Reflect::set(&state, &JsValue::from_str("path"), &JsValue::from_str(location))?;
        self.window
            .history()?
            .push_state_with_url(&state, "", Some(location))
    }

    fn reveal_observer(&mut self) -> Result<&IntersectionObserver, JsValue> {
        if self.reveal.is_none() {
            let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
                |entries: Array, observer: IntersectionObserver| {
                    for entry in entries.iter() {
                        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                            continue;
                        };
                        if !entry.is_intersecting() {
                            continue;
                        }
                        let target = entry.target();
                        if let Err(e) = target.class_list().add_1(ANIMATE_REVEALED_CLASS) {
                            warn!("添加显现动画失败: {:?}", e);
                        }
                        observer.unobserve(&target);
                    }
                },
            );

            let options = IntersectionObserverInit::new();
            options.set_root_margin("0px");
            options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
            let observer =
                IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

            self.reveal = Some(RevealObserver {
                observer,
                _callback: callback,
            });
        }

        match &self.reveal {
            Some(reveal) => Ok(&reveal.observer),
            None => Err(JsValue::from_str("滚动观察器未创建")),
        }
    }

    fn try_reveal_on_scroll(&mut self) -> Result<(), JsValue> {
        let selector = format!(".{}:not(.{})", ANIMATE_ON_SCROLL_CLASS, ANIMATE_REVEALED_CLASS);
        let nodes = self.document.query_selector_all(&selector)?;
        let observer = self.reveal_observer()?.clone();
        for i in 0..nodes.length() {
            if let Some(element) = nodes.item(i).and_then(|node| node.dyn_into::<Element>().ok()) {
                observer.observe(&element);
            }
        }
        Ok(())
    }

    fn try_set_view_all_label(&self, label: &str) -> Result<(), JsValue> {
        let nodes = self
            .document
            .query_selector_all(&format!(".{}", VIEW_ALL_CLASS))?;
        for i in 0..nodes.length() {
            if let Some(node) = nodes.item(i) {
                node.set_text_content(Some(label));
            }
        }
        Ok(())
    }

    fn try_clear_search_input(&self) -> Result<(), JsValue> {
        if let Some(input) = self.search_input()? {
            input.set_value("");
        }
        Ok(())
    }
}

fn report(action: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        warn!("{}失败: {:?}", action, e);
    }
}

impl ListingView for DomView {
    fn show_loading(&mut self) {
        self.set_inner_html(ARTICLES_CONTAINER, LOADING_HTML);
    }

    fn show_error(&mut self, message: &str, retry_label: &str) {
        report("渲染错误状态", self.try_show_error(message, retry_label));
    }

    fn render_articles(&mut self, html: &str) {
        self.set_inner_html(ARTICLES_CONTAINER, html);
    }

    fn render_badges(&mut self, html: &str) {
        self.set_inner_html(ACTIVE_FILTERS, html);
    }

    fn render_pagination(&mut self, html: &str) {
        let selector = format!(".{}", PAGINATION_CONTAINER_CLASS);
        match self.document.query_selector(&selector) {
            Ok(Some(container)) => container.set_inner_html(html),
            Ok(None) => debug!("页面中没有分页容器"),
            Err(e) => warn!("查找分页容器失败: {:?}", e),
        }
    }

    fn set_featured_visibility(&mut self, steps: &[VisibilityStep]) {
        report("切换精选区", self.try_set_featured_visibility(steps));
    }

    fn set_view_all_label(&mut self, label: &str) {
        report("更新浏览全部按钮", self.try_set_view_all_label(label));
    }

    fn push_history(&mut self, location: &str) {
        report("写入浏览历史", self.try_push_history(location));
    }

    fn reveal_on_scroll(&mut self) {
        report("启用滚动动画", self.try_reveal_on_scroll());
    }

    fn clear_search_input(&mut self) {
        report("清空搜索框", self.try_clear_search_input());
    }

    fn uncheck_category(&mut self, value: &str) {
        if let Some(input) = self
            .element(&category_checkbox_id(value))
            .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_checked(false);
        }
    }
}
