use thiserror::Error;

/// 列表刷新失败的原因
///
/// 页面上只呈现一种错误状态（加载失败 + 重试），这里的区分只用于日志。
#[derive(Debug, Error)]
pub enum ListingError {
    /// 请求未能发出或传输中断
    #[error("网络请求失败: {0}")]
    Network(String),
    /// 服务器返回了非 2xx 状态码
    #[error("服务器返回异常状态: HTTP {0}")]
    Status(u16),
    /// 响应体读取失败
    #[error("读取响应内容失败: {0}")]
    Body(String),
    /// 响应不是合法的列表 JSON
    #[error("解析列表响应失败: {0}")]
    Decode(#[from] serde_json::Error),
}
