// ==========================================
// 生产需求计划系统 - 生产月份令牌
// ==========================================
// 职责: YYYY-MM 令牌与日历日期互转、月份算术
// 红线: 非法令牌必须报错，禁止静默纠正
// 红线: 字典序 = 时间序（始终补零）
// ==========================================

use crate::domain::error::{DomainError, DomainResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 令牌年份上限（4 位年份）
const MAX_YEAR: i32 = 9999;

/// 生产月份 (YYYY-MM)
///
/// 字段顺序为 (year, month)，派生的 `Ord` 即时间顺序。
/// 月份算术在 0000-01 ~ 9999-12 范围内饱和。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductionMonth {
    year: i32,
    month: u32,
}

impl ProductionMonth {
    /// 由年、月构造
    pub fn new(year: i32, month: u32) -> DomainResult<Self> {
        if !(0..=MAX_YEAR).contains(&year) {
            return Err(DomainError::invalid_token(
                &format!("{}-{:02}", year, month),
                "年份必须在 0000-9999 之间",
            ));
        }
        if !(1..=12).contains(&month) {
            return Err(DomainError::invalid_token(
                &format!("{:04}-{}", year, month),
                "月份必须在 01-12 之间",
            ));
        }
        Ok(Self { year, month })
    }

    /// 解析 YYYY-MM 令牌
    ///
    /// # 校验规则
    /// 1. 长度必须为 7
    /// 2. 第 5 位必须为 '-'
    /// 3. 年、月部分必须全为数字
    /// 4. 月份必须在 01-12 之间
    pub fn parse(token: &str) -> DomainResult<Self> {
        let bytes = token.as_bytes();
        if bytes.len() != 7 {
            return Err(DomainError::invalid_token(token, "长度必须为 7 (YYYY-MM)"));
        }
        if bytes[4] != b'-' {
            return Err(DomainError::invalid_token(token, "缺少分隔符 '-'"));
        }

        let (year_part, month_part) = (&token[0..4], &token[5..7]);
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(year_part) || !all_digits(month_part) {
            return Err(DomainError::invalid_token(token, "年、月必须为数字"));
        }

        let year = year_part
            .parse::<i32>()
            .map_err(|e| DomainError::invalid_token(token, e.to_string()))?;
        let month = month_part
            .parse::<u32>()
            .map_err(|e| DomainError::invalid_token(token, e.to_string()))?;

        if !(1..=12).contains(&month) {
            return Err(DomainError::invalid_token(token, "月份必须在 01-12 之间"));
        }

        Ok(Self { year, month })
    }

    /// 取日期所在月份
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year().clamp(0, MAX_YEAR),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// 当月 1 日
    pub fn first_day(&self) -> NaiveDate {
        // 年份已约束在 0000-9999，chrono 可表示
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// 当月最后一天
    pub fn last_day(&self) -> NaiveDate {
        let (y, m) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(y, m, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or_default()
    }

    /// 当月天数
    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// 日期是否落在本月
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    fn index(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    fn from_index(index: i64) -> Self {
        let max_index = MAX_YEAR as i64 * 12 + 11;
        let index = index.clamp(0, max_index);
        Self {
            year: (index / 12) as i32,
            month: (index % 12) as u32 + 1,
        }
    }

    /// 月份加减（负数为向前），超出范围时饱和
    pub fn add_months(&self, months: i32) -> Self {
        Self::from_index(self.index() + months as i64)
    }

    pub fn next(&self) -> Self {
        self.add_months(1)
    }

    pub fn prev(&self) -> Self {
        self.add_months(-1)
    }

    /// 到 `other` 的月数差（other 在后为正）
    pub fn months_until(&self, other: &ProductionMonth) -> i64 {
        other.index() - self.index()
    }

    /// [start, end] 闭区间内的全部月份，升序；start > end 时为空
    pub fn range_inclusive(start: ProductionMonth, end: ProductionMonth) -> Vec<ProductionMonth> {
        (start.index()..=end.index()).map(Self::from_index).collect()
    }
}

impl fmt::Display for ProductionMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for ProductionMonth {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ProductionMonth {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProductionMonth> for String {
    fn from(value: ProductionMonth) -> Self {
        value.to_string()
    }
}
