// ==========================================
// 生产需求计划系统 - 需求汇总引擎
// ==========================================
// 职责: 单月需求行 → 产品聚合 / 产量分摊 / 品类汇总 / 平台汇总 / 月度合计
// 输入: 已按生产月份过滤的需求行
// 输出: MonthAggregate
// ==========================================
// 红线: 产量按产品只计一次，禁止按行累加（多平台会重复计数）
// 红线: 代表行 = 原始顺序中第一条产量非空的行
// 红线: 分摊产量不取整
// 红线: 数量累加饱和于 i64::MAX，不溢出
// ==========================================

use crate::domain::request::ProductionRequest;
use crate::domain::summary::{
    CategorySummary, InconsistentField, MarketplaceSummary, MissingDesiItem, MonthAggregate,
    MonthStatsEntry, MultiMonthStats, ProductAggregate, ProductContribution,
    ProductInconsistency, RowDistribution,
};
use crate::domain::month::ProductionMonth;
use crate::domain::types::{MarketplaceProducedAttribution, RepresentativeRow};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, instrument};

use super::grouping::{canonical, category_key, group_in_order, marketplace_key, product_key};

// ==========================================
// RequestAggregator - 需求汇总引擎
// ==========================================
// 无状态引擎，所有方法都是纯函数
#[derive(Debug, Clone, Default)]
pub struct RequestAggregator {
    marketplace_attribution: MarketplaceProducedAttribution,
    representative_row: RepresentativeRow,
}

impl RequestAggregator {
    /// 创建汇总引擎（平台汇总不含产量）
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定平台产量归属策略
    pub fn with_marketplace_attribution(mut self, policy: MarketplaceProducedAttribution) -> Self {
        self.marketplace_attribution = policy;
        self
    }

    pub fn marketplace_attribution(&self) -> MarketplaceProducedAttribution {
        self.marketplace_attribution
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 单月汇总
    ///
    /// # 步骤
    /// 1. 产品分组（代表行取产量/单位体积）
    /// 2. 按需求占比分摊产量到每一行
    /// 3. 品类汇总（行级分摊 + 产品级产量）
    /// 4. 平台汇总
    /// 5. 月度合计
    #[instrument(skip(self, rows), fields(count = rows.len()))]
    pub fn aggregate(&self, rows: &[ProductionRequest]) -> MonthAggregate {
        if rows.is_empty() {
            return MonthAggregate::default();
        }

        // 1. 产品聚合
        let products = self.aggregate_products(rows);

        // 2. 行级分摊
        let distributions = self.distribute_with(rows, &products);
        let pairs: Vec<(&ProductionRequest, &RowDistribution)> =
            rows.iter().zip(distributions.iter()).collect();

        // 3. 品类汇总
        let category_summaries = self.rollup_categories(&pairs, &products);

        // 4. 平台汇总
        let marketplace_summaries = self.rollup_marketplaces(&pairs);

        // 5. 月度合计
        let missing_desi_items: Vec<MissingDesiItem> = rows
            .iter()
            .filter(|r| r.is_missing_size())
            .map(|r| MissingDesiItem {
                product_name: r.display_name().to_string(),
                category: category_key(r),
            })
            .collect();

        let aggregate = MonthAggregate {
            total_requests: rows.len(),
            total_quantity: saturating_sum(rows.iter().map(|r| r.requested_quantity)),
            total_produced: saturating_sum(products.iter().map(|p| p.produced_quantity)),
            total_desi: rows.iter().map(|r| r.requested_desi()).sum(),
            total_produced_desi: products.iter().map(|p| p.produced_desi()).sum(),
            items_without_size: missing_desi_items.len(),
            missing_desi_items,
            category_summaries,
            marketplace_summaries,
            product_aggregates: products,
        };

        debug!(
            total_requests = aggregate.total_requests,
            total_quantity = aggregate.total_quantity,
            total_produced = aggregate.total_produced,
            products = aggregate.product_aggregates.len(),
            categories = aggregate.category_summaries.len(),
            items_without_size = aggregate.items_without_size,
            "月度汇总完成"
        );

        aggregate
    }

    /// 产品聚合（按首次出现顺序）
    pub fn aggregate_products(&self, rows: &[ProductionRequest]) -> Vec<ProductAggregate> {
        group_in_order(rows, product_key)
            .into_iter()
            .filter_map(|(code, group)| {
                let representative = self.pick_representative(&group)?;

                let total_requested_quantity = saturating_sum(
                    group
                        .iter()
                        .filter(|r| r.has_positive_demand())
                        .map(|r| r.requested_quantity),
                );

                let contributions = group
                    .iter()
                    .map(|r| ProductContribution {
                        request_id: r.id.clone(),
                        marketplace_id: marketplace_key(r),
                        requested_quantity: r.requested_quantity,
                    })
                    .collect();

                Some(ProductAggregate {
                    product_code: code,
                    product_name: representative.display_name().to_string(),
                    category: canonical(&representative.category),
                    unit_size: representative.effective_unit_size(),
                    total_requested_quantity,
                    produced_quantity: representative.produced_quantity.unwrap_or(0),
                    contributions,
                })
            })
            .collect()
    }

    /// 行级产量分摊（按输入顺序，一行一条）
    pub fn distribute(&self, rows: &[ProductionRequest]) -> Vec<RowDistribution> {
        let products = self.aggregate_products(rows);
        self.distribute_with(rows, &products)
    }

    /// 多月统计：按生产月份拆分后逐月汇总，月份升序
    #[instrument(skip(self, rows), fields(count = rows.len()))]
    pub fn aggregate_by_month(&self, rows: &[ProductionRequest]) -> MultiMonthStats {
        let mut by_month: BTreeMap<ProductionMonth, Vec<ProductionRequest>> = BTreeMap::new();
        for row in rows {
            by_month
                .entry(row.production_month)
                .or_default()
                .push(row.clone());
        }

        let mut stats = MultiMonthStats::default();
        for (production_month, month_rows) in by_month {
            let aggregate = self.aggregate(&month_rows);

            stats.total_requests += aggregate.total_requests;
            stats.total_quantity = stats.total_quantity.saturating_add(aggregate.total_quantity);
            stats.total_produced = stats.total_produced.saturating_add(aggregate.total_produced);
            stats.total_desi += aggregate.total_desi;
            stats.total_produced_desi += aggregate.total_produced_desi;
            stats.items_without_size += aggregate.items_without_size;

            stats.months.push(MonthStatsEntry {
                production_month,
                aggregate,
            });
        }

        debug!(months = stats.months.len(), "多月统计完成");
        stats
    }

    /// 产品数据一致性检查
    ///
    /// 同一产品的各行在单位体积、品类、产量（非空值）上应一致。
    /// 不一致不影响汇总（代表行优先），仅供审计。
    pub fn find_product_inconsistencies(
        &self,
        rows: &[ProductionRequest],
    ) -> Vec<ProductInconsistency> {
        let mut findings = Vec::new();

        for (code, group) in group_in_order(rows, product_key) {
            let unit_sizes = distinct_values(group.iter().map(|r| {
                r.effective_unit_size()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "NULL".to_string())
            }));
            let categories = distinct_values(group.iter().map(|r| category_key(r)));
            let produced = distinct_values(
                group
                    .iter()
                    .filter_map(|r| r.produced_quantity)
                    .map(|v| v.to_string()),
            );

            for (field, observed_values) in [
                (InconsistentField::UnitSize, unit_sizes),
                (InconsistentField::Category, categories),
                (InconsistentField::ProducedQuantity, produced),
            ] {
                if observed_values.len() > 1 {
                    findings.push(ProductInconsistency {
                        product_code: code.clone(),
                        field,
                        observed_values,
                    });
                }
            }
        }

        findings
    }

    // ==========================================
    // 内部步骤
    // ==========================================

    /// 选取代表行
    fn pick_representative<'a>(
        &self,
        group: &[&'a ProductionRequest],
    ) -> Option<&'a ProductionRequest> {
        match self.representative_row {
            RepresentativeRow::FirstByOriginalOrder => group
                .iter()
                .find(|r| r.produced_quantity.is_some())
                .or_else(|| group.first())
                .copied(),
        }
    }

    fn distribute_with(
        &self,
        rows: &[ProductionRequest],
        products: &[ProductAggregate],
    ) -> Vec<RowDistribution> {
        let product_index: HashMap<&str, &ProductAggregate> = products
            .iter()
            .map(|p| (p.product_code.as_str(), p))
            .collect();

        rows.iter()
            .map(|row| {
                let key = product_key(row);
                let (share, produced) = product_index
                    .get(key.as_str())
                    .map(|p| (p.share_of(row.requested_quantity), p.produced_quantity))
                    .unwrap_or((0.0, 0));

                let attributed = produced as f64 * share;
                RowDistribution {
                    request_id: row.id.clone(),
                    product_code: key,
                    marketplace_id: row.marketplace_id.clone(),
                    category: category_key(row),
                    share,
                    attributed_produced_quantity: attributed,
                    attributed_produced_desi: row.effective_unit_size().unwrap_or(0.0) * attributed,
                }
            })
            .collect()
    }

    fn rollup_categories(
        &self,
        pairs: &[(&ProductionRequest, &RowDistribution)],
        products: &[ProductAggregate],
    ) -> Vec<CategorySummary> {
        let mut summaries: Vec<CategorySummary> = group_in_order(pairs, |(row, _)| category_key(row))
            .into_iter()
            .map(|(category, group)| {
                let mut summary = CategorySummary {
                    category,
                    ..CategorySummary::default()
                };
                for (row, dist) in group {
                    summary.requested_quantity =
                        summary.requested_quantity.saturating_add(row.requested_quantity);
                    summary.requested_desi += row.requested_desi();
                    summary.distributed_produced_quantity += dist.attributed_produced_quantity;
                    summary.distributed_produced_desi += dist.attributed_produced_desi;
                    summary.request_count += 1;
                    if row.is_missing_size() {
                        summary.missing_size_count += 1;
                    }
                }
                summary
            })
            .collect();

        // 产品级产量：按代表行品类归属，每个产品只计一次
        let positions: HashMap<String, usize> = summaries
            .iter()
            .enumerate()
            .map(|(i, s)| (s.category.clone(), i))
            .collect();
        for product in products {
            if let Some(&pos) = positions.get(&product.category) {
                summaries[pos].produced_quantity = summaries[pos]
                    .produced_quantity
                    .saturating_add(product.produced_quantity);
                summaries[pos].produced_desi += product.produced_desi();
            }
        }

        summaries
    }

    fn rollup_marketplaces(
        &self,
        pairs: &[(&ProductionRequest, &RowDistribution)],
    ) -> Vec<MarketplaceSummary> {
        let proportional =
            self.marketplace_attribution == MarketplaceProducedAttribution::Proportional;

        group_in_order(pairs, |(row, _)| marketplace_key(row))
            .into_iter()
            .map(|(marketplace_id, group)| {
                let marketplace_name = group
                    .first()
                    .map(|(row, _)| row.marketplace_name.clone())
                    .unwrap_or_default();

                let mut summary = MarketplaceSummary {
                    marketplace_id,
                    marketplace_name,
                    ..MarketplaceSummary::default()
                };

                let mut produced = 0.0;
                let mut produced_desi = 0.0;
                for (row, dist) in group {
                    summary.requested_quantity =
                        summary.requested_quantity.saturating_add(row.requested_quantity);
                    summary.requested_desi += row.requested_desi();
                    summary.request_count += 1;
                    produced += dist.attributed_produced_quantity;
                    produced_desi += dist.attributed_produced_desi;
                }

                if proportional {
                    summary.produced_quantity = Some(produced);
                    summary.produced_desi = Some(produced_desi);
                }
                summary
            })
            .collect()
    }
}

/// 饱和求和
fn saturating_sum(values: impl Iterator<Item = i64>) -> i64 {
    values.fold(0, i64::saturating_add)
}

/// 保序去重
fn distinct_values(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut distinct: Vec<String> = Vec::new();
    for value in values {
        if !distinct.contains(&value) {
            distinct.push(value);
        }
    }
    distinct
}
