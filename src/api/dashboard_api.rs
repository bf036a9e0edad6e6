// ==========================================
// 生产需求计划系统 - 驾驶舱 API
// ==========================================
// 职责: 组合需求仓储 + 月历引擎 + 汇总引擎，提供驾驶舱查询
// 架构: API 层 → Engine 层 (MonthLifecycleEngine / RequestAggregator)
//                → Repository 层 (ProductionRequestRepository)
// 红线: 当前日期由调用方传入，API 不读系统时钟
// ==========================================

use std::collections::BTreeMap;
use std::error::Error;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, instrument, warn};

use crate::api::dto::{ActiveMonthOverview, MonthCalendarView};
use crate::api::error::{ApiError, ApiResult};
use crate::config::CalendarConfigReader;
use crate::domain::calendar::DEFAULT_ARCHIVED_MONTH_LIMIT;
use crate::domain::month::ProductionMonth;
use crate::domain::request::ProductionRequest;
use crate::domain::summary::{MonthAggregate, MonthStatsEntry, MultiMonthStats};
use crate::engine::{MonthLifecycleEngine, RequestAggregator};
use crate::repository::ProductionRequestRepository;

// ==========================================
// DashboardApi - 驾驶舱 API
// ==========================================

/// 驾驶舱API
///
/// 职责：
/// 1. 决定查询哪些月份（活跃窗口 / 归档）
/// 2. 按月查询需求行并汇总
/// 3. 录入前的月份锁定校验
pub struct DashboardApi {
    request_repo: Arc<dyn ProductionRequestRepository>,
    aggregator: RequestAggregator,
    lifecycle: MonthLifecycleEngine,
    archived_month_limit: usize,
}

impl DashboardApi {
    /// 使用默认策略创建
    pub fn new(request_repo: Arc<dyn ProductionRequestRepository>) -> Self {
        Self::with_engines(
            request_repo,
            RequestAggregator::new(),
            MonthLifecycleEngine::new(),
        )
    }

    /// 使用指定引擎创建
    pub fn with_engines(
        request_repo: Arc<dyn ProductionRequestRepository>,
        aggregator: RequestAggregator,
        lifecycle: MonthLifecycleEngine,
    ) -> Self {
        Self {
            request_repo,
            aggregator,
            lifecycle,
            archived_month_limit: DEFAULT_ARCHIVED_MONTH_LIMIT,
        }
    }

    /// 按配置创建（截止日、窗口、归档上限、平台产量归属）
    pub async fn from_config(
        request_repo: Arc<dyn ProductionRequestRepository>,
        config: &dyn CalendarConfigReader,
    ) -> Result<Self, Box<dyn Error>> {
        let policy = config.get_lifecycle_policy().await?;
        let attribution = config.get_marketplace_attribution().await?;
        let archived_month_limit = config.get_archived_month_limit().await?;

        info!(
            entry_cutoff_day = policy.entry_cutoff_day,
            attribution = %attribution,
            archived_month_limit = archived_month_limit,
            "驾驶舱配置已加载"
        );

        let api = Self::with_engines(
            request_repo,
            RequestAggregator::new().with_marketplace_attribution(attribution),
            MonthLifecycleEngine::with_policy(policy)?,
        );
        Ok(api.with_archived_month_limit(archived_month_limit))
    }

    /// 设置归档月份默认展示上限
    pub fn with_archived_month_limit(mut self, limit: usize) -> Self {
        self.archived_month_limit = limit;
        self
    }

    // ==========================================
    // 汇总查询
    // ==========================================

    /// 单月汇总
    ///
    /// # 参数
    /// - month_token: 生产月份 (YYYY-MM)
    #[instrument(skip(self))]
    pub fn get_month_summary(&self, month_token: &str) -> ApiResult<MonthAggregate> {
        let month = ProductionMonth::parse(month_token)?;
        let rows = self.request_repo.list_by_month(month)?;

        self.report_inconsistencies(month, &rows);
        Ok(self.aggregator.aggregate(&rows))
    }

    /// 活跃月份概览：每个活跃月份的锁定状态与汇总
    #[instrument(skip(self))]
    pub fn get_active_month_overview(&self, today: NaiveDate) -> ApiResult<Vec<ActiveMonthOverview>> {
        let active = self.lifecycle.active_months(today);
        let months: Vec<ProductionMonth> = active.iter().map(|m| m.month).collect();

        let mut aggregates = self.aggregate_months(&months)?;

        Ok(active
            .into_iter()
            .map(|entry| ActiveMonthOverview {
                production_month: entry.month,
                locked: entry.locked,
                state: self.lifecycle.classify(entry.month, today),
                aggregate: aggregates.remove(&entry.month).unwrap_or_default(),
            })
            .collect())
    }

    /// 多月统计（每个请求的月份都有条目，无数据的月份为零值）
    ///
    /// # 参数
    /// - month_tokens: 生产月份列表，不能为空
    #[instrument(skip(self))]
    pub fn get_multi_month_stats(&self, month_tokens: &[&str]) -> ApiResult<MultiMonthStats> {
        if month_tokens.is_empty() {
            return Err(ApiError::InvalidInput("月份列表不能为空".to_string()));
        }

        let months = month_tokens
            .iter()
            .map(|token| ProductionMonth::parse(token))
            .collect::<Result<Vec<_>, _>>()?;

        let rows = self.request_repo.list_by_months(&months)?;
        let mut stats = self.aggregator.aggregate_by_month(&rows);

        let mut by_month: BTreeMap<ProductionMonth, MonthAggregate> = stats
            .months
            .drain(..)
            .map(|entry| (entry.production_month, entry.aggregate))
            .collect();
        for month in &months {
            by_month.entry(*month).or_default();
        }

        stats.months = by_month
            .into_iter()
            .map(|(production_month, aggregate)| MonthStatsEntry {
                production_month,
                aggregate,
            })
            .collect();

        Ok(stats)
    }

    // ==========================================
    // 月历查询
    // ==========================================

    /// 可录入月份
    pub fn list_entry_months(&self, today: NaiveDate) -> Vec<ProductionMonth> {
        self.lifecycle.available_for_entry(today)
    }

    /// 归档月份（max_count 为空时使用配置上限）
    pub fn list_archived_months(
        &self,
        today: NaiveDate,
        max_count: Option<usize>,
    ) -> Vec<ProductionMonth> {
        self.lifecycle
            .archived_months(today, max_count.unwrap_or(self.archived_month_limit))
    }

    /// 生产月历视图
    pub fn get_calendar_view(&self, today: NaiveDate) -> MonthCalendarView {
        let current_month = ProductionMonth::from_date(today);
        MonthCalendarView {
            current_month,
            entry_locked_for_current: self.lifecycle.is_locked(current_month, today),
            active_months: self.lifecycle.active_months(today),
            entry_months: self.lifecycle.available_for_entry(today),
            archived_months: self.list_archived_months(today, None),
        }
    }

    /// 录入前校验：月份格式合法且未锁定
    pub fn check_entry_allowed(&self, month_token: &str, today: NaiveDate) -> ApiResult<()> {
        let month = ProductionMonth::parse(month_token)?;
        self.lifecycle.ensure_open_for_entry(month, today)?;
        Ok(())
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    fn aggregate_months(
        &self,
        months: &[ProductionMonth],
    ) -> ApiResult<BTreeMap<ProductionMonth, MonthAggregate>> {
        let rows = self.request_repo.list_by_months(months)?;
        let stats = self.aggregator.aggregate_by_month(&rows);

        Ok(stats
            .months
            .into_iter()
            .map(|entry| (entry.production_month, entry.aggregate))
            .collect())
    }

    /// 记录产品数据不一致（汇总仍按代表行计算）
    fn report_inconsistencies(&self, month: ProductionMonth, rows: &[ProductionRequest]) {
        for finding in self.aggregator.find_product_inconsistencies(rows) {
            warn!(
                production_month = %month,
                product_code = %finding.product_code,
                field = ?finding.field,
                observed = ?finding.observed_values,
                "产品数据不一致，按代表行汇总"
            );
        }
    }
}
