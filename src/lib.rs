// ==========================================
// 生产需求计划系统 - 核心库
// ==========================================
// 职责: 生产月份需求汇总 + 产量按比例分摊 + 生产月历（截止日锁定）
// 技术栈: Rust + SQLite（配置存储）
// 系统定位: 计划辅助（只读汇总，不修改需求数据）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{MarketplaceProducedAttribution, MonthState, RepresentativeRow};

// 领域实体
pub use domain::{
    ActiveMonth, CategorySummary, LifecyclePolicy, MarketplaceSummary, MonthAggregate,
    MultiMonthStats, ProductAggregate, ProductionMonth, ProductionRequest, RowDistribution,
};

// 引擎
pub use engine::{MonthLifecycleEngine, RequestAggregator};

// API
pub use api::DashboardApi;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "生产需求计划系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
