// ==========================================
// 生产需求计划系统 - 引擎层
// ==========================================
// 职责: 实现业务规则引擎,不拼 SQL、不读系统时钟
// 红线: 引擎均为无状态纯函数
// ==========================================

pub mod aggregation;
pub mod month_lifecycle;

// 重导出核心引擎
pub use aggregation::RequestAggregator;
pub use month_lifecycle::MonthLifecycleEngine;
