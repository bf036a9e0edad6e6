// ==========================================
// 生产需求计划系统 - API 层
// ==========================================
// 职责: 面向驾驶舱/路由层的业务接口
// ==========================================

pub mod dashboard_api;
pub mod dto;
pub mod error;

pub use dashboard_api::DashboardApi;
pub use dto::{ActiveMonthOverview, MonthCalendarView};
pub use error::{ApiError, ApiResult};
