// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

#![allow(dead_code)]

use production_planner::domain::month::ProductionMonth;
use production_planner::domain::request::ProductionRequest;

// ==========================================
// ProductionRequest 构建器
// ==========================================

pub struct RequestBuilder {
    id: String,
    product_code: String,
    product_name: Option<String>,
    category: String,
    unit_size: Option<f64>,
    marketplace_id: String,
    marketplace_name: String,
    requested_quantity: i64,
    produced_quantity: Option<i64>,
    production_month: String,
}

impl RequestBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            product_code: "IW-DEFAULT".to_string(),
            product_name: None,
            category: "Genel".to_string(),
            unit_size: Some(1.0),
            marketplace_id: "MP-TR".to_string(),
            marketplace_name: "Trendyol".to_string(),
            requested_quantity: 1,
            produced_quantity: None,
            production_month: "2026-02".to_string(),
        }
    }

    pub fn product(mut self, code: &str) -> Self {
        self.product_code = code.to_string();
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.product_name = Some(name.to_string());
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn unit_size(mut self, size: f64) -> Self {
        self.unit_size = Some(size);
        self
    }

    pub fn no_unit_size(mut self) -> Self {
        self.unit_size = None;
        self
    }

    pub fn marketplace(mut self, id: &str, name: &str) -> Self {
        self.marketplace_id = id.to_string();
        self.marketplace_name = name.to_string();
        self
    }

    pub fn requested(mut self, qty: i64) -> Self {
        self.requested_quantity = qty;
        self
    }

    pub fn produced(mut self, qty: i64) -> Self {
        self.produced_quantity = Some(qty);
        self
    }

    pub fn month(mut self, month: &str) -> Self {
        self.production_month = month.to_string();
        self
    }

    pub fn build(self) -> ProductionRequest {
        ProductionRequest {
            id: self.id,
            product_code: self.product_code,
            product_name: self.product_name,
            category: self.category,
            unit_size: self.unit_size,
            marketplace_id: self.marketplace_id,
            marketplace_name: self.marketplace_name,
            requested_quantity: self.requested_quantity,
            produced_quantity: self.produced_quantity,
            production_month: ProductionMonth::parse(&self.production_month).unwrap(),
        }
    }
}
