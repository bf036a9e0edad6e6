// ==========================================
// 生产需求计划系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、值类型、汇总结构
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod calendar;
pub mod error;
pub mod month;
pub mod request;
pub mod summary;
pub mod types;

// 重导出核心类型
pub use calendar::{ActiveMonth, LifecyclePolicy};
pub use error::{DomainError, DomainResult};
pub use month::ProductionMonth;
pub use request::ProductionRequest;
pub use summary::{
    CategorySummary, InconsistentField, MarketplaceSummary, MissingDesiItem, MonthAggregate,
    MonthStatsEntry, MultiMonthStats, ProductAggregate, ProductContribution,
    ProductInconsistency, RowDistribution,
};
pub use types::{MarketplaceProducedAttribution, MonthState, RepresentativeRow};
