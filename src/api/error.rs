// ==========================================
// 生产需求计划系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换领域/仓储错误为用户友好的错误消息
// ==========================================

use crate::domain::error::DomainError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 月份已过录入截止日
    #[error("生产月份已锁定，不再接受新需求: {month}")]
    MonthLocked { month: String },

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据访问错误: {0}")]
    DatabaseError(String),

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseError(format!("数据锁获取失败: {}", msg))
            }
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::ValidationError(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::ValidationError(msg) => ApiError::ValidationError(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::ValidationError(format!("字段 {} 错误: {}", field, message))
            }
        }
    }
}

// ==========================================
// 从 DomainError 转换
// ==========================================
impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidMonthToken { .. } => ApiError::InvalidInput(err.to_string()),
            DomainError::InvalidPolicy(msg) => {
                ApiError::InternalError(format!("月历策略配置错误: {}", msg))
            }
            DomainError::MonthLocked { month } => ApiError::MonthLocked { month },
        }
    }
}

/// API Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_conversion() {
        let err: ApiError = RepositoryError::NotFound {
            entity: "ProductionRequest".to_string(),
            id: "R1".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::NotFound(ref msg) if msg.contains("R1")));

        let err: ApiError = RepositoryError::LockError("poisoned".to_string()).into();
        assert!(matches!(err, ApiError::DatabaseError(_)));
    }

    #[test]
    fn test_domain_error_conversion() {
        let err: ApiError = DomainError::InvalidMonthToken {
            token: "2026-13".to_string(),
            reason: "月份必须在 01-12 之间".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::InvalidInput(ref msg) if msg.contains("2026-13")));

        let err: ApiError = DomainError::MonthLocked {
            month: "2026-02".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "生产月份已锁定，不再接受新需求: 2026-02");
    }
}
