//! SQL 参数值类型：拦截器在渲染阶段看到的“运行时值”。

use std::borrow::Cow;

/// 一个已解析出的参数值（按动态类型打标签）。
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    String(Cow<'static, str>),
    /// 带时区偏移的日历时间戳（对应 `java.util.Date` 一类）。
    Timestamp(time::OffsetDateTime),
    /// 本地日期时间（无时区）。
    DateTime(time::PrimitiveDateTime),
    Date(time::Date),
}

impl SqlValue {
    /// 将 `Option<T>` 映射为 `SqlValue`：`None => Null`，`Some(v) => v.into()`。
    pub fn from_option<T: Into<SqlValue>>(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }

    /// 用任意 `Display` 值构造字符串值（“其它对象”走 toString 语义）。
    pub fn display(v: impl std::fmt::Display) -> Self {
        Self::String(Cow::Owned(v.to_string()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! from_signed {
    ($($t:ty),+ $(,)?) => {
        $(impl From<$t> for SqlValue {
            fn from(v: $t) -> Self {
                Self::I64(v as i64)
            }
        })+
    };
}

macro_rules! from_unsigned {
    ($($t:ty),+ $(,)?) => {
        $(impl From<$t> for SqlValue {
            fn from(v: $t) -> Self {
                Self::U64(v as u64)
            }
        })+
    };
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for SqlValue {
    fn from(v: f32) -> Self {
        Self::F64(v as f64)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::String(Cow::Owned(v))
    }
}

impl From<&'static str> for SqlValue {
    fn from(v: &'static str) -> Self {
        Self::String(Cow::Borrowed(v))
    }
}

impl From<time::OffsetDateTime> for SqlValue {
    fn from(v: time::OffsetDateTime) -> Self {
        Self::Timestamp(v)
    }
}

impl From<time::PrimitiveDateTime> for SqlValue {
    fn from(v: time::PrimitiveDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl From<time::Date> for SqlValue {
    fn from(v: time::Date) -> Self {
        Self::Date(v)
    }
}

#[cfg(test)]
mod tests {
    use super::SqlValue;
    use time::macros::{date, datetime};

    #[test]
    fn from_option_some() {
        assert_eq!(SqlValue::from_option(Some(123_i64)), SqlValue::I64(123));
    }

    #[test]
    fn from_option_none() {
        assert_eq!(SqlValue::from_option::<i64>(None), SqlValue::Null);
        assert!(SqlValue::from_option::<i64>(None).is_null());
    }

    #[test]
    fn narrow_integers_widen() {
        assert_eq!(SqlValue::from(7_i32), SqlValue::I64(7));
        assert_eq!(SqlValue::from(7_u16), SqlValue::U64(7));
    }

    #[test]
    fn dates_keep_their_kind() {
        assert_eq!(
            SqlValue::from(date!(2024 - 01 - 15)),
            SqlValue::Date(date!(2024 - 01 - 15))
        );
        assert_eq!(
            SqlValue::from(datetime!(2024-01-15 08:30:00)),
            SqlValue::DateTime(datetime!(2024-01-15 08:30:00))
        );
        assert!(matches!(
            SqlValue::from(datetime!(2024-01-15 08:30:00 UTC)),
            SqlValue::Timestamp(_)
        ));
    }

    #[test]
    fn display_wraps_to_string() {
        assert_eq!(SqlValue::display(3.5_f64), SqlValue::String("3.5".into()));
    }
}
