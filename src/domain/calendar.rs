// ==========================================
// 生产需求计划系统 - 生产月历参数
// ==========================================
// 职责: 活跃窗口/截止日策略、活跃月份条目
// 红线: 截止日为业务规则（默认每月 5 日，含当日即锁定）
// ==========================================

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::month::ProductionMonth;
use serde::{Deserialize, Serialize};

/// 默认录入截止日（当月 5 日起锁定）
pub const DEFAULT_ENTRY_CUTOFF_DAY: u32 = 5;

/// 默认向后展示月数
pub const DEFAULT_MONTHS_AHEAD: u32 = 2;

/// 截止日前向前展示月数
pub const DEFAULT_MONTHS_BACK_BEFORE_CUTOFF: u32 = 2;

/// 截止日后向前展示月数
pub const DEFAULT_MONTHS_BACK_AFTER_CUTOFF: u32 = 1;

/// 默认归档月份展示上限
pub const DEFAULT_ARCHIVED_MONTH_LIMIT: usize = 12;

/// 截止日上限（保证每个月都存在该日）
pub const MAX_ENTRY_CUTOFF_DAY: u32 = 28;

/// 月历生命周期策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecyclePolicy {
    /// 录入截止日（日 >= 该值时当月锁定）
    pub entry_cutoff_day: u32,

    /// 当前月之后展示的月数
    pub months_ahead: u32,

    /// 截止日前，当前月之前展示的月数
    pub months_back_before_cutoff: u32,

    /// 截止日后，当前月之前展示的月数
    pub months_back_after_cutoff: u32,
}

impl Default for LifecyclePolicy {
    fn default() -> Self {
        Self {
            entry_cutoff_day: DEFAULT_ENTRY_CUTOFF_DAY,
            months_ahead: DEFAULT_MONTHS_AHEAD,
            months_back_before_cutoff: DEFAULT_MONTHS_BACK_BEFORE_CUTOFF,
            months_back_after_cutoff: DEFAULT_MONTHS_BACK_AFTER_CUTOFF,
        }
    }
}

impl LifecyclePolicy {
    /// 仅覆盖截止日
    pub fn with_entry_cutoff_day(entry_cutoff_day: u32) -> DomainResult<Self> {
        let policy = Self {
            entry_cutoff_day,
            ..Self::default()
        };
        policy.validate()?;
        Ok(policy)
    }

    /// 校验策略参数
    ///
    /// # 校验规则
    /// 1. 截止日在 1..=28
    /// 2. 窗口月数不超过 120
    pub fn validate(&self) -> DomainResult<()> {
        if !(1..=MAX_ENTRY_CUTOFF_DAY).contains(&self.entry_cutoff_day) {
            return Err(DomainError::InvalidPolicy(format!(
                "录入截止日 {} 超出有效范围 [1, {}]",
                self.entry_cutoff_day, MAX_ENTRY_CUTOFF_DAY
            )));
        }

        for (name, value) in [
            ("months_ahead", self.months_ahead),
            ("months_back_before_cutoff", self.months_back_before_cutoff),
            ("months_back_after_cutoff", self.months_back_after_cutoff),
        ] {
            if value > 120 {
                return Err(DomainError::InvalidPolicy(format!(
                    "{} = {} 超出有效范围 [0, 120]",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// 活跃月份条目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveMonth {
    pub month: ProductionMonth,
    pub locked: bool,
}
