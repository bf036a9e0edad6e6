// ==========================================
// 生产需求计划系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::calendar_config_trait::CalendarConfigReader;
use crate::db::{ensure_config_schema, open_sqlite_connection};
use crate::domain::calendar::{
    DEFAULT_ARCHIVED_MONTH_LIMIT, DEFAULT_ENTRY_CUTOFF_DAY, DEFAULT_MONTHS_AHEAD,
    DEFAULT_MONTHS_BACK_AFTER_CUTOFF, DEFAULT_MONTHS_BACK_BEFORE_CUTOFF, MAX_ENTRY_CUTOFF_DAY,
};
use crate::domain::types::MarketplaceProducedAttribution;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::BTreeMap;
use std::error::Error;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例（配置表不存在时自动创建）
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        ensure_config_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;

        tracing::info!(config_key = key, value = value, "配置已更新");
        Ok(())
    }

    /// 读取并解析数值配置，缺失或格式错误时使用默认值
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> Result<T, Box<dyn Error>>
    where
        T: FromStr + Copy + std::fmt::Display,
    {
        let raw = match self.get_config_value(key)? {
            Some(v) => v,
            None => return Ok(default),
        };

        match raw.trim().parse::<T>() {
            Ok(v) => Ok(v),
            Err(_) => {
                tracing::warn!(
                    config_key = key,
                    raw_value = %raw,
                    default = %default,
                    "配置格式错误，使用默认值"
                );
                Ok(default)
            }
        }
    }

    /// 获取所有配置的快照（JSON格式，按 key 排序）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt = conn.prepare(
            "SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key"
        )?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }
}

// ==========================================
// CalendarConfigReader Trait 实现
// ==========================================
#[async_trait]
impl CalendarConfigReader for ConfigManager {
    // ===== 生产月历配置 =====

    async fn get_entry_cutoff_day(&self) -> Result<u32, Box<dyn Error>> {
        let value = self.get_parsed_or_default(config_keys::ENTRY_CUTOFF_DAY, DEFAULT_ENTRY_CUTOFF_DAY)?;
        if !(1..=MAX_ENTRY_CUTOFF_DAY).contains(&value) {
            tracing::warn!(
                config_key = config_keys::ENTRY_CUTOFF_DAY,
                value = value,
                "录入截止日超出有效范围 [1, 28]，使用默认值"
            );
            return Ok(DEFAULT_ENTRY_CUTOFF_DAY);
        }
        Ok(value)
    }

    async fn get_months_ahead(&self) -> Result<u32, Box<dyn Error>> {
        self.get_parsed_or_default(config_keys::MONTHS_AHEAD, DEFAULT_MONTHS_AHEAD)
    }

    async fn get_months_back_before_cutoff(&self) -> Result<u32, Box<dyn Error>> {
        self.get_parsed_or_default(
            config_keys::MONTHS_BACK_BEFORE_CUTOFF,
            DEFAULT_MONTHS_BACK_BEFORE_CUTOFF,
        )
    }

    async fn get_months_back_after_cutoff(&self) -> Result<u32, Box<dyn Error>> {
        self.get_parsed_or_default(
            config_keys::MONTHS_BACK_AFTER_CUTOFF,
            DEFAULT_MONTHS_BACK_AFTER_CUTOFF,
        )
    }

    async fn get_archived_month_limit(&self) -> Result<usize, Box<dyn Error>> {
        self.get_parsed_or_default(config_keys::ARCHIVED_MONTH_LIMIT, DEFAULT_ARCHIVED_MONTH_LIMIT)
    }

    // ===== 汇总配置 =====

    async fn get_marketplace_attribution(
        &self,
    ) -> Result<MarketplaceProducedAttribution, Box<dyn Error>> {
        let raw = match self.get_config_value(config_keys::MARKETPLACE_ATTRIBUTION)? {
            Some(v) => v,
            None => return Ok(MarketplaceProducedAttribution::default()),
        };

        Ok(MarketplaceProducedAttribution::parse(&raw).unwrap_or_else(|| {
            tracing::warn!(
                config_key = config_keys::MARKETPLACE_ATTRIBUTION,
                raw_value = %raw,
                "平台产量归属策略无法识别，使用 OMITTED"
            );
            MarketplaceProducedAttribution::default()
        }))
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 生产月历
    pub const ENTRY_CUTOFF_DAY: &str = "entry_cutoff_day";
    pub const MONTHS_AHEAD: &str = "months_ahead";
    pub const MONTHS_BACK_BEFORE_CUTOFF: &str = "months_back_before_cutoff";
    pub const MONTHS_BACK_AFTER_CUTOFF: &str = "months_back_after_cutoff";
    pub const ARCHIVED_MONTH_LIMIT: &str = "archived_month_limit";

    // 汇总
    pub const MARKETPLACE_ATTRIBUTION: &str = "marketplace_produced_attribution";
}
