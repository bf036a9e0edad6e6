// ==========================================
// 生产需求计划系统 - 命令行入口
// ==========================================
// 用法:
//   production-planner [requests.json] [today YYYY-MM-DD]
//
// - 配置库存在时读取截止日/窗口/归属策略，否则使用默认值
// - 输出生产月历视图；提供需求文件时追加按月汇总
// - 结果以 JSON 写到 stdout，日志写到 stderr
// ==========================================

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use production_planner::config::ConfigManager;
use production_planner::db::get_default_db_path;
use production_planner::logging;
use production_planner::repository::InMemoryProductionRequestRepository;
use production_planner::{DashboardApi, ProductionMonth, ProductionRequest};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let requests_path = args
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let today = match args.next() {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .with_context(|| format!("无效日期: {}（格式 YYYY-MM-DD）", raw))?,
        None => chrono::Local::now().date_naive(),
    };

    tracing::info!(
        "{} v{} - 基准日期 {}",
        production_planner::APP_NAME,
        production_planner::VERSION,
        today
    );

    let rows = match &requests_path {
        Some(path) => load_requests(path)?,
        None => Vec::new(),
    };
    let months: BTreeSet<ProductionMonth> = rows.iter().map(|r| r.production_month).collect();

    let repo = InMemoryProductionRequestRepository::with_rows(rows)
        .map_err(|e| anyhow!("需求数据校验失败: {}", e))?;
    let api = build_api(Arc::new(repo)).await?;

    let calendar = api.get_calendar_view(today);
    let output = if months.is_empty() {
        json!({ "calendar": calendar })
    } else {
        let tokens: Vec<String> = months.iter().map(|m| m.to_string()).collect();
        let token_refs: Vec<&str> = tokens.iter().map(String::as_str).collect();
        let stats = api
            .get_multi_month_stats(&token_refs)
            .map_err(|e| anyhow!("汇总失败: {}", e))?;
        json!({ "calendar": calendar, "stats": stats })
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// 读取需求文件（JSON 数组）
fn load_requests(path: &str) -> anyhow::Result<Vec<ProductionRequest>> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("读取需求文件失败: {}", path))?;
    let rows: Vec<ProductionRequest> =
        serde_json::from_str(&raw).with_context(|| format!("解析需求文件失败: {}", path))?;

    tracing::info!(path = %path, count = rows.len(), "需求文件已加载");
    Ok(rows)
}

/// 按配置库构建 API；配置库不存在时使用默认策略
async fn build_api(repo: Arc<InMemoryProductionRequestRepository>) -> anyhow::Result<DashboardApi> {
    let db_path = get_default_db_path();
    if !Path::new(&db_path).exists() {
        tracing::info!(db_path = %db_path, "配置库不存在，使用默认月历策略");
        return Ok(DashboardApi::new(repo));
    }

    tracing::info!(db_path = %db_path, "使用配置库");
    let config = ConfigManager::new(&db_path).map_err(|e| anyhow!("打开配置库失败: {}", e))?;
    DashboardApi::from_config(repo, &config)
        .await
        .map_err(|e| anyhow!("加载月历配置失败: {}", e))
}
