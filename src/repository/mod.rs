// ==========================================
// 生产需求计划系统 - 数据仓储层
// ==========================================
// 职责: 需求行查询接缝 + 仓储错误类型
// ==========================================

pub mod error;
pub mod production_request_repo;

pub use error::{RepositoryError, RepositoryResult};
pub use production_request_repo::{
    InMemoryProductionRequestRepository, ProductionRequestRepository,
};
