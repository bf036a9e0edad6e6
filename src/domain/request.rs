// ==========================================
// 生产需求计划系统 - 生产需求行
// ==========================================
// 职责: 定义单条平台需求行（一个产品 × 一个平台 × 一个生产月）
// 红线: 核心只读，行数据由外部存储层维护
// ==========================================

use crate::domain::month::ProductionMonth;
use serde::{Deserialize, Serialize};

/// 生产需求 (ProductionRequest)
///
/// 同一产品在同一生产月内，每个平台各有一行。
/// `produced_quantity` 表示该产品当月总产量（非平台产量），
/// 上游保证同产品各行一致，但汇总时以代表行为准。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRequest {
    /// 需求 ID（不透明）
    pub id: String,

    /// 产品编码 (IWASKU)
    #[serde(alias = "iwasku")]
    pub product_code: String,

    /// 产品名称（缺失时展示产品编码）
    #[serde(default)]
    pub product_name: Option<String>,

    /// 品类（生产分组键）
    pub category: String,

    /// 单位体积 (desi)，主数据不全时为空
    #[serde(default, alias = "desi")]
    pub unit_size: Option<f64>,

    /// 平台 ID
    pub marketplace_id: String,

    /// 平台名称（仅展示，不作分组键）
    pub marketplace_name: String,

    /// 需求数量
    pub requested_quantity: i64,

    /// 产品当月总产量
    #[serde(default)]
    pub produced_quantity: Option<i64>,

    /// 生产月份
    pub production_month: ProductionMonth,
}

impl ProductionRequest {
    /// 有效单位体积：空值、零、负数、非有限数均视为缺失
    pub fn effective_unit_size(&self) -> Option<f64> {
        self.unit_size.filter(|size| size.is_finite() && *size > 0.0)
    }

    /// 是否缺少尺寸数据
    pub fn is_missing_size(&self) -> bool {
        self.effective_unit_size().is_none()
    }

    /// 需求体积 = 单位体积 × 需求数量（缺尺寸记 0）
    pub fn requested_desi(&self) -> f64 {
        self.effective_unit_size().unwrap_or(0.0) * self.requested_quantity as f64
    }

    /// 需求数量是否可参与占比计算
    pub fn has_positive_demand(&self) -> bool {
        self.requested_quantity > 0
    }

    /// 展示名称
    pub fn display_name(&self) -> &str {
        self.product_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.product_code)
    }
}
