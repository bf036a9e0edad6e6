// ==========================================
// 生产需求计划系统 - 生产月份生命周期引擎
// ==========================================
// 职责: 判定月份是否锁定、计算活跃窗口与归档月份
// 输入: 当前日期（显式传入）+ 月份
// 输出: 锁定标志 / 活跃月份列表 / 归档月份列表
// ==========================================
// 红线: 纯函数，不读取系统时钟，不持久化锁定状态
// 红线: 截止日当天即锁定（day >= cutoff）
// ==========================================

use crate::domain::calendar::{ActiveMonth, LifecyclePolicy};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::month::ProductionMonth;
use crate::domain::types::MonthState;
use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;
use tracing::debug;

// ==========================================
// MonthLifecycleEngine - 月份生命周期引擎
// ==========================================
// 无状态引擎，仅持有策略参数
#[derive(Debug, Clone, Default)]
pub struct MonthLifecycleEngine {
    policy: LifecyclePolicy,
}

impl MonthLifecycleEngine {
    /// 使用默认策略（每月 5 日截止）
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用指定策略，参数非法时报错
    pub fn with_policy(policy: LifecyclePolicy) -> DomainResult<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &LifecyclePolicy {
        &self.policy
    }

    /// 当前日期是否已过（含）截止日
    pub fn is_past_cutoff(&self, today: NaiveDate) -> bool {
        today.day() >= self.policy.entry_cutoff_day
    }

    // ==========================================
    // 锁定判定
    // ==========================================

    /// 月份是否锁定（不再接受新需求）
    ///
    /// # 规则
    /// - 早于当前月: 锁定
    /// - 当前月: 日 >= 截止日时锁定
    /// - 晚于当前月: 不锁定
    pub fn is_locked(&self, month: ProductionMonth, today: NaiveDate) -> bool {
        let current = ProductionMonth::from_date(today);
        match month.cmp(&current) {
            Ordering::Less => true,
            Ordering::Equal => self.is_past_cutoff(today),
            Ordering::Greater => false,
        }
    }

    /// 同 `is_locked`，先校验令牌
    pub fn is_locked_token(&self, token: &str, today: NaiveDate) -> DomainResult<bool> {
        let month = ProductionMonth::parse(token)?;
        Ok(self.is_locked(month, today))
    }

    /// 月份锁定时返回 MonthLocked 错误
    pub fn ensure_open_for_entry(&self, month: ProductionMonth, today: NaiveDate) -> DomainResult<()> {
        if self.is_locked(month, today) {
            return Err(DomainError::MonthLocked {
                month: month.to_string(),
            });
        }
        Ok(())
    }

    // ==========================================
    // 活跃窗口
    // ==========================================

    /// 活跃窗口 [起始月, 结束月]
    ///
    /// 截止日前: [当前-2, 当前+2]；截止日后: [当前-1, 当前+2]（默认策略）
    pub fn active_window(&self, today: NaiveDate) -> (ProductionMonth, ProductionMonth) {
        let current = ProductionMonth::from_date(today);
        let months_back = if self.is_past_cutoff(today) {
            self.policy.months_back_after_cutoff
        } else {
            self.policy.months_back_before_cutoff
        };

        (
            current.add_months(-(months_back as i32)),
            current.add_months(self.policy.months_ahead as i32),
        )
    }

    /// 活跃月份列表（升序），每项带锁定标志
    pub fn active_months(&self, today: NaiveDate) -> Vec<ActiveMonth> {
        let (start, end) = self.active_window(today);

        let months: Vec<ActiveMonth> = ProductionMonth::range_inclusive(start, end)
            .into_iter()
            .map(|month| ActiveMonth {
                month,
                locked: self.is_locked(month, today),
            })
            .collect();

        debug!(
            today = %today,
            window_start = %start,
            window_end = %end,
            count = months.len(),
            "活跃月份窗口"
        );

        months
    }

    /// 可录入月份（活跃窗口内未锁定的月份，升序）
    pub fn available_for_entry(&self, today: NaiveDate) -> Vec<ProductionMonth> {
        self.active_months(today)
            .into_iter()
            .filter(|m| !m.locked)
            .map(|m| m.month)
            .collect()
    }

    /// 归档月份：早于活跃窗口起始月，按时间倒序，最多 max_count 个
    pub fn archived_months(&self, today: NaiveDate, max_count: usize) -> Vec<ProductionMonth> {
        let (oldest_active, _) = self.active_window(today);

        let mut archived = Vec::with_capacity(max_count.min(120));
        let mut cursor = oldest_active;
        while archived.len() < max_count {
            let prev = cursor.prev();
            // 已到最早可表示月份
            if prev == cursor {
                break;
            }
            archived.push(prev);
            cursor = prev;
        }

        archived
    }

    // ==========================================
    // 状态分类
    // ==========================================

    /// 月份生命周期状态
    pub fn classify(&self, month: ProductionMonth, today: NaiveDate) -> MonthState {
        let current = ProductionMonth::from_date(today);
        let (oldest_active, _) = self.active_window(today);

        match month.cmp(&current) {
            Ordering::Greater => MonthState::FutureOpen,
            Ordering::Equal if self.is_past_cutoff(today) => MonthState::CurrentLocked,
            Ordering::Equal => MonthState::CurrentOpen,
            Ordering::Less if month < oldest_active => MonthState::Archived,
            Ordering::Less => MonthState::PastLocked,
        }
    }

    /// 同 `classify`，先校验令牌
    pub fn classify_token(&self, token: &str, today: NaiveDate) -> DomainResult<MonthState> {
        let month = ProductionMonth::parse(token)?;
        Ok(self.classify(month, today))
    }
}
