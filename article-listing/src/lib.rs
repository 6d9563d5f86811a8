use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

pub mod config;
pub mod controller;
pub mod dom;
pub mod events;
pub mod fetch;
pub mod timer;
pub mod view;
pub mod visibility;

pub use config::ListingConfig;
pub use controller::{ListingAction, ListingController, ListingRequest, RefreshOutcome};
pub use view::ListingView;
pub use visibility::{FeaturedVisibility, TransitionTimings, Visibility, VisibilityStep};

use dom::DomView;
use events::SharedController;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// 初始化函数 - 设置错误处理和日志输出
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
}

/// 版本信息
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// 列表页JS接口 - 页面加载完成后调用 `ListingApp.mount(config)`
#[wasm_bindgen]
pub struct ListingApp {
    controller: SharedController,
}

#[wasm_bindgen]
impl ListingApp {
    /// 从地址栏恢复筛选状态并绑定页面交互
    pub fn mount(config: JsValue) -> Result<ListingApp, JsValue> {
        let config = ListingConfig::from_js(config)?;

        let window = web_sys::window().ok_or("没有 window 对象")?;
        let document = window.document().ok_or("没有 document 对象")?;
        let location = window.location();
        let path = location.pathname()?;
        let query = location.search()?;
        let debounce = config.debounce();

        let view = DomView::new(window, document.clone());
        let mut controller = ListingController::new(view, path, config);
        controller.initialize(&query);

        let controller = Rc::new(RefCell::new(controller));
        events::bind(&controller, &document, debounce)?;

        Ok(ListingApp { controller })
    }

    /// 当前筛选状态的快照
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.controller.borrow().state())
            .map_err(|e| JsValue::from_str(&format!("序列化状态失败: {}", e)))
    }

    /// 按当前状态重新加载列表
    pub fn refresh(&self) {
        let request = self.controller.borrow_mut().refresh();
        events::spawn_refresh(&self.controller, request);
    }
}
