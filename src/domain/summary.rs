// ==========================================
// 生产需求计划系统 - 月度汇总结果
// ==========================================
// 职责: 定义汇总引擎的输出结构（品类/平台/产品/月度合计）
// 红线: 每次查询重新计算，不持久化
// 红线: 分摊产量为小数，展示层负责取整
// ==========================================

use crate::domain::month::ProductionMonth;
use serde::{Deserialize, Serialize};

/// 品类汇总
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,

    /// 需求数量合计
    pub requested_quantity: i64,

    /// 需求体积合计 (Σ 单位体积 × 需求数量)
    pub requested_desi: f64,

    /// 按行分摊的产量合计
    pub distributed_produced_quantity: f64,

    /// 按行分摊的产量体积合计
    pub distributed_produced_desi: f64,

    /// 产品级产量合计（每个产品只计一次）
    pub produced_quantity: i64,

    /// 产品级产量体积合计
    pub produced_desi: f64,

    /// 需求行数
    pub request_count: usize,

    /// 缺尺寸行数
    pub missing_size_count: usize,
}

/// 平台汇总
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketplaceSummary {
    pub marketplace_id: String,
    pub marketplace_name: String,
    pub requested_quantity: i64,
    pub requested_desi: f64,
    pub request_count: usize,

    /// 分摊产量（仅 Proportional 策略下有值）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub produced_quantity: Option<f64>,

    /// 分摊产量体积（仅 Proportional 策略下有值）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub produced_desi: Option<f64>,
}

/// 产品的一条贡献需求行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductContribution {
    pub request_id: String,
    pub marketplace_id: String,
    pub requested_quantity: i64,
}

/// 产品聚合（按产品编码）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAggregate {
    pub product_code: String,
    pub product_name: String,

    /// 代表行的品类
    pub category: String,

    /// 代表行的有效单位体积
    pub unit_size: Option<f64>,

    /// 有效需求合计（只含需求数量 > 0 的行，作为占比分母）
    pub total_requested_quantity: i64,

    /// 产品当月总产量（代表行取值，缺失记 0）
    pub produced_quantity: i64,

    /// 全部贡献行，按原始顺序
    pub contributions: Vec<ProductContribution>,
}

impl ProductAggregate {
    /// 某行需求数量在本产品中的占比
    ///
    /// 分母为 0 或该行需求数量 <= 0 时返回 0
    pub fn share_of(&self, requested_quantity: i64) -> f64 {
        if self.total_requested_quantity <= 0 || requested_quantity <= 0 {
            return 0.0;
        }
        requested_quantity as f64 / self.total_requested_quantity as f64
    }

    /// 产量体积 = 单位体积 × 产量
    pub fn produced_desi(&self) -> f64 {
        self.unit_size.unwrap_or(0.0) * self.produced_quantity as f64
    }
}

/// 单行分摊结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowDistribution {
    pub request_id: String,
    pub product_code: String,
    pub marketplace_id: String,
    pub category: String,
    pub share: f64,
    pub attributed_produced_quantity: f64,
    pub attributed_produced_desi: f64,
}

/// 缺尺寸条目（供运营补录，不按产品去重）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingDesiItem {
    pub product_name: String,
    pub category: String,
}

/// 单月汇总
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MonthAggregate {
    pub total_requests: usize,
    pub total_quantity: i64,

    /// 产品级产量合计（同一产品多平台只计一次）
    pub total_produced: i64,
    pub total_desi: f64,
    pub total_produced_desi: f64,
    pub items_without_size: usize,
    pub missing_desi_items: Vec<MissingDesiItem>,
    pub category_summaries: Vec<CategorySummary>,
    pub marketplace_summaries: Vec<MarketplaceSummary>,

    /// 产品聚合（审计用），按首次出现顺序
    pub product_aggregates: Vec<ProductAggregate>,
}

impl MonthAggregate {
    pub fn is_empty(&self) -> bool {
        self.total_requests == 0
    }
}

/// 多月统计中的单月条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthStatsEntry {
    pub production_month: ProductionMonth,
    pub aggregate: MonthAggregate,
}

/// 多月统计
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MultiMonthStats {
    /// 按月份升序
    pub months: Vec<MonthStatsEntry>,
    pub total_requests: usize,
    pub total_quantity: i64,
    pub total_produced: i64,
    pub total_desi: f64,
    pub total_produced_desi: f64,
    pub items_without_size: usize,
}

/// 产品数据不一致的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InconsistentField {
    UnitSize,
    Category,
    ProducedQuantity,
}

/// 产品数据不一致报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInconsistency {
    pub product_code: String,
    pub field: InconsistentField,

    /// 观察到的不同取值，按首次出现顺序
    pub observed_values: Vec<String>,
}
