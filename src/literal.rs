//! Literal：把一个参数值渲染为 SQL 字面量文本（只用于日志展示，不做转义）。

use crate::value::SqlValue;
use std::fmt;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const DATE_TIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// 空值渲染出的标记。保持为小写 `null`，与历史日志输出一致。
pub const NULL_MARKER: &str = "null";

/// 渲染后的字面量，按值的动态类型选出。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// 整数，原样输出十进制数字。
    Numeric(String),
    /// 日历时间戳，`yyyy-MM-dd HH:mm:ss`，不加引号。
    Timestamp(String),
    /// 其它一切值，输出时加单引号。
    Quoted(String),
    /// 空值，输出 `NULL_MARKER`。
    Null,
}

impl Literal {
    /// 按值的动态类型选出字面量种类。
    pub fn from_value(v: &SqlValue) -> Self {
        match v {
            SqlValue::Null => Self::Null,
            SqlValue::I64(n) => Self::Numeric(n.to_string()),
            SqlValue::U64(n) => Self::Numeric(n.to_string()),
            SqlValue::Timestamp(dt) => Self::Timestamp(
                dt.format(DATE_TIME_FORMAT)
                    .unwrap_or_else(|_| dt.to_string()),
            ),
            SqlValue::DateTime(dt) => Self::Quoted(
                dt.format(DATE_TIME_FORMAT)
                    .unwrap_or_else(|_| dt.to_string()),
            ),
            SqlValue::Date(d) => {
                Self::Quoted(d.format(DATE_FORMAT).unwrap_or_else(|_| d.to_string()))
            }
            SqlValue::Bool(b) => Self::Quoted(b.to_string()),
            SqlValue::F64(n) => Self::Quoted(n.to_string()),
            SqlValue::String(s) => Self::Quoted(s.to_string()),
        }
    }
}

impl From<&SqlValue> for Literal {
    fn from(v: &SqlValue) -> Self {
        Self::from_value(v)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(s) | Self::Timestamp(s) => f.write_str(s),
            Self::Quoted(s) => write!(f, "'{s}'"),
            Self::Null => f.write_str(NULL_MARKER),
        }
    }
}

/// 渲染单个值为字面量文本。
pub fn format_value(v: &SqlValue) -> String {
    Literal::from_value(v).to_string()
}
