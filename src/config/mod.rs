// ==========================================
// 生产需求计划系统 - 配置层
// ==========================================
// 职责: 系统配置管理（截止日、活跃窗口、汇总策略）
// 存储: config_kv 表
// ==========================================

pub mod calendar_config_trait;
pub mod config_manager;

// 重导出核心配置管理器
pub use calendar_config_trait::CalendarConfigReader;
pub use config_manager::{config_keys, ConfigManager};
