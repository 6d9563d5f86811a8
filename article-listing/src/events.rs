//! 事件委托
//!
//! 监听器只在稳定的 `document` 上绑定一次，通过 `closest()` 判断触发元素，
//! 替换片段后不需要重新绑定。

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use listing_common::contract::{
    CATEGORY_BUTTON, CATEGORY_CONTENT, CATEGORY_INPUT_NAME, DATA_FILTER_TYPE, DATA_PAGE,
    DATA_VALUE, FILTER_BUTTON, FILTER_CONTENT, PAGINATION_LINK_CLASS, RADIO_ITEM_CLASS,
    REMOVE_FILTER_CLASS, RETRY_CLASS, SEARCH_FORM, SEARCH_INPUT_NAME, VIEW_ALL_CLASS,
};
use listing_common::{FilterKind, SortKey};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, EventTarget, HtmlInputElement};

use crate::controller::{ListingAction, ListingController, ListingRequest};
use crate::dom::DomView;
use crate::fetch;
use crate::timer::{self, Debouncer};

pub type SharedController = Rc<RefCell<ListingController<DomView>>>;

/// 交给控制器处理，需要时发起请求
pub fn dispatch(controller: &SharedController, action: ListingAction) {
    let request = controller.borrow_mut().dispatch(action);
    if let Some(request) = request {
        spawn_refresh(controller, request);
    }
}

/// 在后台发出请求，完成后把结果交回控制器
pub fn spawn_refresh(controller: &SharedController, request: ListingRequest) {
    let controller = Rc::clone(controller);
    spawn_local(async move {
        let result = fetch::fetch_listing(&request.url).await;
        controller.borrow_mut().complete(request.token, result);
    });
}

fn event_target(event: &Event) -> Option<Element> {
    event.target().and_then(|target| target.dyn_into::<Element>().ok())
}

/// 解析排序选项：空值表示默认顺序，未知取值返回 `None`
fn parse_sort(value: &str) -> Option<Option<SortKey>> {
    if value.is_empty() {
        Some(None)
    } else {
        SortKey::from_param(value).map(Some)
    }
}

fn parse_page(value: Option<String>) -> Option<u32> {
    value?.trim().parse::<u32>().ok().filter(|page| *page >= 1)
}

fn on_click(controller: &SharedController, event: &Event) -> Result<(), JsValue> {
    let Some(target) = event_target(event) else {
        return Ok(());
    };

    if target.closest(&format!("#{}", FILTER_BUTTON))?.is_some() {
        return controller
            .borrow()
            .view()
            .toggle_dropdown(FILTER_CONTENT, CATEGORY_CONTENT);
    }
    if target.closest(&format!("#{}", CATEGORY_BUTTON))?.is_some() {
        return controller
            .borrow()
            .view()
            .toggle_dropdown(CATEGORY_CONTENT, FILTER_CONTENT);
    }
    controller.borrow().view().close_dropdowns_outside(&target)?;

    if let Some(item) = target.closest(&format!(".{}", RADIO_ITEM_CLASS))? {
        if item.get_attribute(DATA_FILTER_TYPE).as_deref() == Some(FilterKind::Sort.as_attr()) {
            let value = item.get_attribute(DATA_VALUE).unwrap_or_default();
            match parse_sort(&value) {
                Some(sort) => dispatch(controller, ListingAction::SortSelected(sort)),
                None => warn!("忽略未知的排序方式: {}", value),
            }
        }
        return controller.borrow().view().close_dropdown(FILTER_CONTENT);
    }

    if let Some(button) = target.closest(&format!(".{}", REMOVE_FILTER_CLASS))? {
        let Some(badge) = button.parent_element() else {
            return Ok(());
        };
        let kind = badge.get_attribute(DATA_FILTER_TYPE).unwrap_or_default();
        match FilterKind::from_attr(&kind) {
            Some(kind) => dispatch(
                controller,
                ListingAction::FilterRemoved {
                    kind,
                    value: badge.get_attribute(DATA_VALUE),
                },
            ),
            None => warn!("忽略未知的筛选徽章类型: {}", kind),
        }
        return Ok(());
    }

    if let Some(link) = target.closest(&format!(".{}", PAGINATION_LINK_CLASS))? {
        event.prevent_default();
        match parse_page(link.get_attribute(DATA_PAGE)) {
            Some(page) => dispatch(controller, ListingAction::PageSelected(page)),
            None => warn!("分页链接缺少有效的 {}", DATA_PAGE),
        }
        return Ok(());
    }

    if target.closest(&format!(".{}", VIEW_ALL_CLASS))?.is_some() {
        event.prevent_default();
        dispatch(controller, ListingAction::ViewAllToggled);
        return Ok(());
    }

    if target.closest(&format!(".{}", RETRY_CLASS))?.is_some() {
        dispatch(controller, ListingAction::Retry);
    }

    Ok(())
}

fn on_change(controller: &SharedController, event: &Event) -> Result<(), JsValue> {
    let Some(target) = event_target(event) else {
        return Ok(());
    };
    if !target.matches(&format!("input[name=\"{}\"]", CATEGORY_INPUT_NAME))? {
        return Ok(());
    }

    let selected = controller.borrow().view().checked_categories()?;
    dispatch(controller, ListingAction::CategoriesChanged(selected));
    controller.borrow().view().close_dropdown(CATEGORY_CONTENT)
}

fn on_submit(controller: &SharedController, event: &Event) -> Result<(), JsValue> {
    let Some(target) = event_target(event) else {
        return Ok(());
    };
    if target.id() != SEARCH_FORM {
        return Ok(());
    }

    event.prevent_default();
    let value = controller.borrow().view().search_input_value()?;
    dispatch(controller, ListingAction::SearchSubmitted(value));
    Ok(())
}

fn on_input(
    controller: &SharedController,
    debouncer: &Rc<RefCell<Debouncer<String>>>,
    delay: Duration,
    event: &Event,
) -> Result<(), JsValue> {
    let Some(input) = event_target(event).and_then(|target| target.dyn_into::<HtmlInputElement>().ok()) else {
        return Ok(());
    };
    if !input.matches(&format!("#{} input[name=\"{}\"]", SEARCH_FORM, SEARCH_INPUT_NAME))? {
        return Ok(());
    }

    let ticket = debouncer.borrow_mut().schedule(input.value());
    let controller = Rc::clone(controller);
    let debouncer = Rc::clone(debouncer);
    timer::set_timeout(delay, move || {
        let value = debouncer.borrow_mut().take(ticket);
        if let Some(value) = value {
            dispatch(&controller, ListingAction::SearchSubmitted(value));
        }
    })?;
    Ok(())
}

fn listen<F>(target: &EventTarget, kind: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    // 监听器与页面同生命周期
    closure.forget();
    Ok(())
}

fn report(kind: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        warn!("处理 {} 事件失败: {:?}", kind, e);
    }
}

/// 在 `document` 上绑定全部交互
pub fn bind(controller: &SharedController, document: &Document, debounce: Duration) -> Result<(), JsValue> {
    let click = Rc::clone(controller);
    listen(document, "click", move |event| report("click", on_click(&click, &event)))?;

    let change = Rc::clone(controller);
    listen(document, "change", move |event| report("change", on_change(&change, &event)))?;

    let submit = Rc::clone(controller);
    listen(document, "submit", move |event| report("submit", on_submit(&submit, &event)))?;

    let input = Rc::clone(controller);
    let debouncer = Rc::new(RefCell::new(Debouncer::new()));
    listen(document, "input", move |event| {
        report("input", on_input(&input, &debouncer, debounce, &event))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_values_parse() {
        assert_eq!(parse_sort(""), Some(None));
        assert_eq!(parse_sort("popular"), Some(Some(SortKey::Popular)));
        assert_eq!(parse_sort("za"), Some(Some(SortKey::TitleDesc)));
        assert_eq!(parse_sort("shuffle"), None);
    }

    #[test]
    fn page_values_parse() {
        assert_eq!(parse_page(Some("2".to_string())), Some(2));
        assert_eq!(parse_page(Some(" 7 ".to_string())), Some(7));
        assert_eq!(parse_page(Some("0".to_string())), None);
        assert_eq!(parse_page(Some("next".to_string())), None);
        assert_eq!(parse_page(None), None);
    }
}
