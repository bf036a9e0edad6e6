// ==========================================
// 生产需求计划系统 - 生产需求仓储
// ==========================================
// 职责: 按生产月份提供需求行（查询接缝）
// 说明: 持久化由外部存储层负责；此处提供 trait + 内存实现
// 红线: 写入前校验数量与唯一性，汇总引擎假设输入已合规
// ==========================================

use crate::domain::month::ProductionMonth;
use crate::domain::request::ProductionRequest;
use crate::repository::error::{RepositoryError, RepositoryResult};
use std::collections::HashSet;
use std::sync::Mutex;
use tracing::debug;

// ==========================================
// ProductionRequestRepository Trait
// ==========================================
// 实现者: 外部存储层适配器 / InMemoryProductionRequestRepository
pub trait ProductionRequestRepository: Send + Sync {
    /// 查询单个生产月份的全部需求行（保持存储顺序）
    fn list_by_month(&self, month: ProductionMonth) -> RepositoryResult<Vec<ProductionRequest>>;

    /// 查询多个生产月份的需求行
    ///
    /// 默认逐月查询后拼接；重复月份只查一次
    fn list_by_months(
        &self,
        months: &[ProductionMonth],
    ) -> RepositoryResult<Vec<ProductionRequest>> {
        let mut seen = HashSet::new();
        let mut rows = Vec::new();
        for month in months {
            if seen.insert(*month) {
                rows.extend(self.list_by_month(*month)?);
            }
        }
        Ok(rows)
    }
}

// ==========================================
// InMemoryProductionRequestRepository
// ==========================================
#[derive(Debug, Default)]
pub struct InMemoryProductionRequestRepository {
    rows: Mutex<Vec<ProductionRequest>>,
}

impl InMemoryProductionRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以初始数据创建（逐条校验）
    pub fn with_rows(rows: Vec<ProductionRequest>) -> RepositoryResult<Self> {
        let repo = Self::new();
        repo.insert_batch(rows)?;
        Ok(repo)
    }

    /// 新增一条需求
    pub fn insert(&self, request: ProductionRequest) -> RepositoryResult<()> {
        validate_request(&request)?;

        let mut rows = self
            .rows
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        if rows.iter().any(|r| r.id == request.id) {
            return Err(RepositoryError::UniqueConstraintViolation(format!(
                "production_request.id={}",
                request.id
            )));
        }

        debug!(
            request_id = %request.id,
            product_code = %request.product_code,
            production_month = %request.production_month,
            "新增生产需求"
        );
        rows.push(request);
        Ok(())
    }

    /// 批量新增，遇到第一条错误即停止（之前的记录保留）
    pub fn insert_batch(&self, requests: Vec<ProductionRequest>) -> RepositoryResult<usize> {
        let mut count = 0;
        for request in requests {
            self.insert(request)?;
            count += 1;
        }
        Ok(count)
    }

    /// 按 ID 查询
    pub fn find_by_id(&self, id: &str) -> RepositoryResult<ProductionRequest> {
        let rows = self
            .rows
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        rows.iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "ProductionRequest".to_string(),
                id: id.to_string(),
            })
    }

    /// 记录总数
    pub fn count(&self) -> RepositoryResult<usize> {
        let rows = self
            .rows
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        Ok(rows.len())
    }
}

impl ProductionRequestRepository for InMemoryProductionRequestRepository {
    fn list_by_month(&self, month: ProductionMonth) -> RepositoryResult<Vec<ProductionRequest>> {
        let rows = self
            .rows
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        Ok(rows
            .iter()
            .filter(|r| r.production_month == month)
            .cloned()
            .collect())
    }
}

/// 写入前校验
fn validate_request(request: &ProductionRequest) -> RepositoryResult<()> {
    for (field, value) in [
        ("id", &request.id),
        ("product_code", &request.product_code),
        ("marketplace_id", &request.marketplace_id),
    ] {
        if value.trim().is_empty() {
            return Err(RepositoryError::FieldValueError {
                field: field.to_string(),
                message: "不能为空".to_string(),
            });
        }
    }

    if request.requested_quantity <= 0 {
        return Err(RepositoryError::ValidationError(format!(
            "需求数量必须为正数: id={}, requested_quantity={}",
            request.id, request.requested_quantity
        )));
    }

    if let Some(produced) = request.produced_quantity {
        if produced < 0 {
            return Err(RepositoryError::FieldValueError {
                field: "produced_quantity".to_string(),
                message: format!("产量不能为负数: {}", produced),
            });
        }
    }

    Ok(())
}
