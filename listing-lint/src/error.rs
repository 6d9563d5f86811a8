use std::io;
use std::path::PathBuf;

use listing_common::ListingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LintError {
    #[error("无法读取文件 {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("解析HTML时出错: {0}")]
    Html(#[source] io::Error),
    #[error("遍历目录时出错: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{path} 不是有效的列表响应: {source}")]
    Response {
        path: PathBuf,
        #[source]
        source: ListingError,
    },
}
