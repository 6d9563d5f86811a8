use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Arg, ArgAction, ArgGroup, Command};
use listing_common::ListingResponse;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

mod dom;
mod error;
mod rules;

use dom::Document;
use error::LintError;
use rules::{Finding, Severity};

/// 单个文件的检查结果
struct Report {
    source: PathBuf,
    findings: Vec<Finding>,
}

impl Report {
    fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|finding| finding.severity == severity)
            .count()
    }
}

fn main() {
    let matches = Command::new("listing-lint")
        .version(env!("CARGO_PKG_VERSION"))
        .about("检查文章列表页和 AJAX 片段是否符合前端控制器的 DOM 约定")
        .arg(Arg::new("page")
            .short('p')
            .long("page")
            .value_name("PAGE_HTML")
            .help("服务端渲染的完整列表页"))
        .arg(Arg::new("fragments")
            .short('f')
            .long("fragments")
            .value_name("RESPONSE_DIR")
            .help("保存的 AJAX 响应（*.json）所在目录"))
        .arg(Arg::new("strict")
            .long("strict")
            .help("警告也视为失败")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .help("显示详细信息")
            .action(ArgAction::SetTrue))
        .group(ArgGroup::new("input")
            .args(["page", "fragments"])
            .required(true)
            .multiple(true))
        .get_matches();

    let page = matches.get_one::<String>("page").map(PathBuf::from);
    let fragments = matches.get_one::<String>("fragments").map(PathBuf::from);
    let strict = matches.get_flag("strict");
    init_logging(matches.get_flag("verbose"));

    let mut reports = Vec::new();
    if let Some(page) = page {
        match lint_page(&page) {
            Ok(report) => reports.push(report),
            Err(e) => {
                eprintln!("错误: {}", e);
                process::exit(2);
            }
        }
    }
    if let Some(dir) = fragments {
        match lint_fragments(&dir) {
            Ok(found) => reports.extend(found),
            Err(e) => {
                eprintln!("错误: {}", e);
                process::exit(2);
            }
        }
    }

    let errors: usize = reports.iter().map(|report| report.count(Severity::Error)).sum();
    let warnings: usize = reports.iter().map(|report| report.count(Severity::Warning)).sum();

    for report in &reports {
        for finding in &report.findings {
            println!("{}: [{}] {}", report.source.display(), finding.severity, finding.message);
        }
    }
    println!(
        "检查完成: {} 个文件，{} 个错误，{} 个警告",
        reports.len(),
        errors,
        warnings
    );

    if errors > 0 || (strict && warnings > 0) {
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_file(path: &Path) -> Result<String, LintError> {
    fs::read_to_string(path).map_err(|source| LintError::Read {
        path: path.to_path_buf(),
        source,
    })
}

// 检查整页
fn lint_page(path: &Path) -> Result<Report, LintError> {
    info!("检查页面: {}", path.display());
    let html = read_file(path)?;
    let document = Document::parse(&html)?;
    Ok(Report {
        source: path.to_path_buf(),
        findings: rules::check_page(&document),
    })
}

// 递归检查目录中保存的响应
fn lint_fragments(dir: &Path) -> Result<Vec<Report>, LintError> {
    info!("检查响应目录: {}", dir.display());
    let mut reports = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || !entry.path().extension().map_or(false, |ext| ext == "json") {
            continue;
        }

        let path = entry.path().to_path_buf();
        debug!("检查响应: {}", path.display());
        let body = read_file(&path)?;

        // 单个文件无法解析时记为错误，继续检查其余文件
        let findings = match ListingResponse::from_json(&body) {
            Ok(response) => rules::check_listing_response(&response)?,
            Err(source) => {
                let e = LintError::Response {
                    path: path.clone(),
                    source,
                };
                vec![Finding::error(e.to_string())]
            }
        };
        reports.push(Report { source: path, findings });
    }

    if reports.is_empty() {
        info!("目录中没有 JSON 响应文件");
    }
    Ok(reports)
}
