// ==========================================
// 生产需求计划系统 - 驾驶舱 DTO
// ==========================================

use crate::domain::calendar::ActiveMonth;
use crate::domain::month::ProductionMonth;
use crate::domain::summary::MonthAggregate;
use crate::domain::types::MonthState;
use serde::{Deserialize, Serialize};

/// 活跃月份概览（月份 + 锁定状态 + 当月汇总）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveMonthOverview {
    pub production_month: ProductionMonth,
    pub locked: bool,
    pub state: MonthState,
    pub aggregate: MonthAggregate,
}

/// 生产月历视图（供下拉框与归档列表）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCalendarView {
    pub current_month: ProductionMonth,
    pub entry_locked_for_current: bool,
    pub active_months: Vec<ActiveMonth>,
    pub entry_months: Vec<ProductionMonth>,
    pub archived_months: Vec<ProductionMonth>,
}
