// ==========================================
// 生产需求计划系统 - 需求汇总引擎
// ==========================================
// 职责: 平台需求行 → 品类/平台/产品汇总 + 产量按需求占比分摊
// 输入: 单月（或多月）需求行
// 输出: MonthAggregate / MultiMonthStats
// ==========================================

mod core;
mod grouping;


pub use core::RequestAggregator;
pub use grouping::{canonical, group_in_order};
