// ==========================================
// 生产需求计划系统 - 月历/汇总配置读取 Trait
// ==========================================
// 职责: 定义月历引擎与汇总引擎所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::calendar::LifecyclePolicy;
use crate::domain::types::MarketplaceProducedAttribution;
use async_trait::async_trait;
use std::error::Error;

// ==========================================
// CalendarConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait CalendarConfigReader: Send + Sync {
    // ===== 生产月历配置 =====

    /// 获取录入截止日
    ///
    /// # 默认值
    /// - 5（当月 5 日起锁定）
    async fn get_entry_cutoff_day(&self) -> Result<u32, Box<dyn Error>>;

    /// 获取当前月之后展示的月数
    ///
    /// # 默认值
    /// - 2
    async fn get_months_ahead(&self) -> Result<u32, Box<dyn Error>>;

    /// 获取截止日前向前展示的月数
    ///
    /// # 默认值
    /// - 2
    async fn get_months_back_before_cutoff(&self) -> Result<u32, Box<dyn Error>>;

    /// 获取截止日后向前展示的月数
    ///
    /// # 默认值
    /// - 1
    async fn get_months_back_after_cutoff(&self) -> Result<u32, Box<dyn Error>>;

    /// 获取归档月份展示上限
    ///
    /// # 默认值
    /// - 12
    async fn get_archived_month_limit(&self) -> Result<usize, Box<dyn Error>>;

    // ===== 汇总配置 =====

    /// 获取平台产量归属策略
    ///
    /// # 默认值
    /// - OMITTED
    async fn get_marketplace_attribution(
        &self,
    ) -> Result<MarketplaceProducedAttribution, Box<dyn Error>>;

    /// 组装月历生命周期策略（已校验）
    async fn get_lifecycle_policy(&self) -> Result<LifecyclePolicy, Box<dyn Error>> {
        let entry_cutoff_day = self.get_entry_cutoff_day().await?;
        let months_ahead = self.get_months_ahead().await?;
        let months_back_before_cutoff = self.get_months_back_before_cutoff().await?;
        let months_back_after_cutoff = self.get_months_back_after_cutoff().await?;

        let policy = LifecyclePolicy {
            entry_cutoff_day,
            months_ahead,
            months_back_before_cutoff,
            months_back_after_cutoff,
        };
        policy.validate()?;
        Ok(policy)
    }
}
