use serde::Deserialize;
use std::time::Duration;
use wasm_bindgen::JsValue;

use crate::visibility::TransitionTimings;

/// 页面传入的配置，所有字段都有默认值
///
/// ```js
/// ListingApp.mount({ debounceMs: 300, retryLabel: "Coba Lagi" });
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ListingConfig {
    /// 列表接口路径，默认使用当前页面路径；浏览历史始终写当前页面路径
    pub endpoint: Option<String>,
    /// 搜索输入防抖间隔（毫秒）
    pub debounce_ms: u32,
    /// 精选区淡出后移出布局的延迟（毫秒）
    pub hide_delay_ms: u32,
    /// 普通模式下“浏览全部”按钮文字
    pub view_all_label: String,
    /// 浏览全部模式下按钮文字
    pub show_featured_label: String,
    /// 加载失败提示
    pub error_message: String,
    /// 重试按钮文字
    pub retry_label: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            debounce_ms: 500,
            hide_delay_ms: 300,
            view_all_label: "View All Articles".to_string(),
            show_featured_label: "Show Featured".to_string(),
            error_message: "Oops! Failed loading articles.".to_string(),
            retry_label: "Try Again".to_string(),
        }
    }
}

impl ListingConfig {
    /// 读取 JS 传入的配置对象，`undefined`/`null` 使用默认配置
    pub fn from_js(value: JsValue) -> Result<Self, JsValue> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsValue::from_str(&format!("解析配置失败: {}", e)))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(u64::from(self.debounce_ms))
    }

    pub fn timings(&self) -> TransitionTimings {
        TransitionTimings {
            collapse_delay: Duration::from_millis(u64::from(self.hide_delay_ms)),
        }
    }

    /// 根据当前模式选择按钮文字
    pub fn view_all_toggle_label(&self, view_all: bool) -> &str {
        if view_all {
            &self.show_featured_label
        } else {
            &self.view_all_label
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_behaviour() {
        let config = ListingConfig::default();
        assert_eq!(config.debounce(), Duration::from_millis(500));
        assert_eq!(config.timings().collapse_delay, Duration::from_millis(300));
        assert_eq!(config.view_all_toggle_label(false), "View All Articles");
        assert_eq!(config.view_all_toggle_label(true), "Show Featured");
    }

    #[test]
    fn partial_object_keeps_other_defaults() {
        let config: ListingConfig =
            serde_json::from_str(r#"{"debounceMs": 250, "retryLabel": "Coba Lagi"}"#).unwrap();
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.retry_label, "Coba Lagi");
        assert_eq!(config.hide_delay_ms, 300);
        assert_eq!(config.endpoint, None);
    }
}
