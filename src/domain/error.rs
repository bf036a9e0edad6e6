// ==========================================
// 生产需求计划系统 - 领域层错误类型
// ==========================================
// 职责: 月份令牌校验失败、策略参数非法、月份锁定
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 领域层错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// 月份令牌格式错误（必须为 YYYY-MM）
    #[error("无效的生产月份: token={token}, 原因: {reason}")]
    InvalidMonthToken { token: String, reason: String },

    /// 生命周期/汇总策略参数非法
    #[error("无效的策略参数: {0}")]
    InvalidPolicy(String),

    /// 月份已锁定，不再接受新需求
    #[error("生产月份已锁定: {month}")]
    MonthLocked { month: String },
}

impl DomainError {
    pub(crate) fn invalid_token(token: &str, reason: impl Into<String>) -> Self {
        DomainError::InvalidMonthToken {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;
