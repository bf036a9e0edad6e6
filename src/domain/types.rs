// ==========================================
// 生产需求计划系统 - 领域类型定义
// ==========================================
// 职责: 月份生命周期状态、汇总策略枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 生产月份状态 (Month State)
// ==========================================
// 红线: 不持久化，始终由当前日期重新计算
// 迁移只由时间推移驱动:
//   FutureOpen → CurrentOpen → CurrentLocked → PastLocked → Archived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MonthState {
    FutureOpen,    // 未来月份，可录入
    CurrentOpen,   // 当月，截止日前可录入
    CurrentLocked, // 当月，已过截止日
    PastLocked,    // 历史月份，仍在活跃窗口内
    Archived,      // 早于活跃窗口，只读
}

impl MonthState {
    /// 是否锁定（不接受新需求）
    pub fn is_locked(&self) -> bool {
        !matches!(self, MonthState::FutureOpen | MonthState::CurrentOpen)
    }
}

impl fmt::Display for MonthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthState::FutureOpen => write!(f, "FUTURE_OPEN"),
            MonthState::CurrentOpen => write!(f, "CURRENT_OPEN"),
            MonthState::CurrentLocked => write!(f, "CURRENT_LOCKED"),
            MonthState::PastLocked => write!(f, "PAST_LOCKED"),
            MonthState::Archived => write!(f, "ARCHIVED"),
        }
    }
}

// ==========================================
// 平台产量归属策略 (Marketplace Produced Attribution)
// ==========================================
// Omitted: 平台汇总不含产量（默认）
// Proportional: 与品类相同，按需求占比分摊产量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketplaceProducedAttribution {
    #[default]
    Omitted,
    Proportional,
}

impl fmt::Display for MarketplaceProducedAttribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

impl MarketplaceProducedAttribution {
    /// 从配置字符串解析，无法识别时返回 None
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "OMITTED" => Some(MarketplaceProducedAttribution::Omitted),
            "PROPORTIONAL" => Some(MarketplaceProducedAttribution::Proportional),
            _ => None,
        }
    }

    /// 转换为配置存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            MarketplaceProducedAttribution::Omitted => "OMITTED",
            MarketplaceProducedAttribution::Proportional => "PROPORTIONAL",
        }
    }
}

// ==========================================
// 产品代表行策略 (Representative Row)
// ==========================================
// 同一产品多行时，产量/单位体积取自哪一行。
// 只有一种取值：按原始输入顺序，第一条产量非空的行；
// 全部为空时取第一行，产量记 0。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepresentativeRow {
    #[default]
    FirstByOriginalOrder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_state_lock_flags() {
        assert!(!MonthState::FutureOpen.is_locked());
        assert!(!MonthState::CurrentOpen.is_locked());
        assert!(MonthState::CurrentLocked.is_locked());
        assert!(MonthState::PastLocked.is_locked());
        assert!(MonthState::Archived.is_locked());
    }

    #[test]
    fn test_attribution_parse() {
        assert_eq!(
            MarketplaceProducedAttribution::parse(" proportional "),
            Some(MarketplaceProducedAttribution::Proportional)
        );
        assert_eq!(
            MarketplaceProducedAttribution::parse("OMITTED"),
            Some(MarketplaceProducedAttribution::Omitted)
        );
        assert_eq!(MarketplaceProducedAttribution::parse("split"), None);
        assert_eq!(MarketplaceProducedAttribution::default().to_string(), "OMITTED");
    }

    #[test]
    fn test_month_state_serde() {
        let json = serde_json::to_string(&MonthState::CurrentLocked).unwrap();
        assert_eq!(json, "\"CURRENT_LOCKED\"");
    }
}
