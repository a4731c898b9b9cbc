//! Meta：按属性名/属性路径读取对象内部字段（Rust 版的“反射式取值”）。
//!
//! Rust 没有运行时反射；这里用 `MetaObject` trait 描述“可按名字取子对象”的值，
//! 再用 `meta_object!` 为普通 struct 生成实现。拦截器用它来：
//! - 从语句处理器里按 `delegate.mapped_statement.id` 这样的路径取内部字段；
//! - 从调用方的参数对象里按绑定名取值（支持 `user.name` 多级路径）。

use crate::value::SqlValue;
use dyn_clone::DynClone;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

/// 反射式取值失败。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReflectError {
    #[error("sqllog no property `{segment}` while reading `{path}`")]
    NoSuchProperty { path: String, segment: String },
    #[error("sqllog value at `{path}` is not a {expected}")]
    TypeMismatch { path: String, expected: &'static str },
    #[error("sqllog no accessor paths configured")]
    NoAccessorPaths,
}

/// 可被按名字访问的对象。
///
/// - 复合对象实现 `property`；
/// - 标量实现 `scalar`；
/// - `as_any` 用于把叶子节点还原为具体类型（如 `TypeHandlerRegistry`）。
pub trait MetaObject: DynClone + fmt::Debug + Send + Sync + 'static {
    fn property(&self, _name: &str) -> Option<&dyn MetaObject> {
        None
    }

    fn scalar(&self) -> Option<SqlValue> {
        None
    }

    /// 空值：路径遍历遇到空值时直接返回空值，而不是报错。
    fn is_null(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;
}

dyn_clone::clone_trait_object!(MetaObject);

macro_rules! scalar_meta {
    ($($t:ty),+ $(,)?) => {
        $(impl MetaObject for $t {
            fn scalar(&self) -> Option<SqlValue> {
                Some(self.clone().into())
            }

            fn as_any(&self) -> &dyn Any {
                self
            }
        })+
    };
}

scalar_meta!(
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    bool,
    String,
    &'static str,
    time::Date,
    time::PrimitiveDateTime,
    time::OffsetDateTime,
);

impl MetaObject for SqlValue {
    fn scalar(&self) -> Option<SqlValue> {
        Some(self.clone())
    }

    fn is_null(&self) -> bool {
        SqlValue::is_null(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: MetaObject + Clone> MetaObject for Option<T> {
    fn property(&self, name: &str) -> Option<&dyn MetaObject> {
        self.as_ref().and_then(|v| v.property(name))
    }

    fn scalar(&self) -> Option<SqlValue> {
        Some(SqlValue::from_option(
            self.as_ref().map(|v| scalar_or_debug(v)),
        ))
    }

    fn is_null(&self) -> bool {
        self.as_ref().is_none_or(|v| v.is_null())
    }

    // `Some` 对类型判断透明；`None` 保留自身类型。
    fn as_any(&self) -> &dyn Any {
        match self {
            Some(v) => v.as_any(),
            None => self,
        }
    }
}

// Arc/Box 是透明包装：按内部值取属性，downcast 也落到内部类型上。
impl<T: MetaObject> MetaObject for std::sync::Arc<T> {
    fn property(&self, name: &str) -> Option<&dyn MetaObject> {
        (**self).property(name)
    }

    fn scalar(&self) -> Option<SqlValue> {
        (**self).scalar()
    }

    fn is_null(&self) -> bool {
        (**self).is_null()
    }

    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }
}

impl MetaObject for Box<dyn MetaObject> {
    fn property(&self, name: &str) -> Option<&dyn MetaObject> {
        (**self).property(name)
    }

    fn scalar(&self) -> Option<SqlValue> {
        (**self).scalar()
    }

    fn is_null(&self) -> bool {
        (**self).is_null()
    }

    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }
}

/// 为 struct 生成 `MetaObject` 实现：列出的字段可按字段名读取。
///
/// ```ignore
/// #[derive(Debug, Clone)]
/// struct User { id: i64, name: String }
/// halo_space::meta_object!(User { id, name });
/// ```
#[macro_export]
macro_rules! meta_object {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::meta::MetaObject for $ty {
            fn property(&self, name: &str) -> Option<&dyn $crate::meta::MetaObject> {
                match name {
                    $(stringify!($field) => Some(&self.$field),)*
                    _ => None,
                }
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    };
}
pub use crate::meta_object;

/// 以 `.` 分隔的属性路径，如 `h.target.delegate.mapped_statement.id`。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
}

impl FieldPath {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.raw.split('.')
    }

    /// 第一段属性名（`user.name` => `user`）。
    pub fn head(&self) -> &str {
        self.segments().next().unwrap_or_default()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for FieldPath {
    fn from(v: &str) -> Self {
        Self::new(v)
    }
}

impl From<String> for FieldPath {
    fn from(v: String) -> Self {
        Self::new(v)
    }
}

/// GetValue：沿路径逐段读取属性。
pub fn get_value<'a>(
    root: &'a dyn MetaObject,
    path: &FieldPath,
) -> Result<&'a dyn MetaObject, ReflectError> {
    let mut cur = root;
    for segment in path.segments() {
        if cur.is_null() {
            return Ok(cur);
        }
        cur = cur
            .property(segment)
            .ok_or_else(|| ReflectError::NoSuchProperty {
                path: path.to_string(),
                segment: segment.to_string(),
            })?;
    }
    Ok(cur)
}

/// 取标量值；复合对象按 `Debug` 文本当作字符串。
pub fn scalar_or_debug(v: &dyn MetaObject) -> SqlValue {
    v.scalar()
        .unwrap_or_else(|| SqlValue::display(format!("{v:?}")))
}

/// 读取路径上的标量值。
pub fn get_scalar(root: &dyn MetaObject, path: &FieldPath) -> Result<SqlValue, ReflectError> {
    get_value(root, path).map(scalar_or_debug)
}

/// 把叶子节点还原成具体类型。
pub fn downcast<'a, T: Any>(
    v: &'a dyn MetaObject,
    path: &FieldPath,
    expected: &'static str,
) -> Result<&'a T, ReflectError> {
    v.as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| ReflectError::TypeMismatch {
            path: path.to_string(),
            expected,
        })
}

/// 依次尝试多条路径：返回第一个成功的结果；全部失败时返回最后一个错误。
pub fn try_paths<'a, T>(
    root: &'a dyn MetaObject,
    paths: &[FieldPath],
    mut read: impl FnMut(&'a dyn MetaObject, &FieldPath) -> Result<T, ReflectError>,
) -> Result<T, ReflectError> {
    let mut last = ReflectError::NoAccessorPaths;
    for path in paths {
        match get_value(root, path).and_then(|v| read(v, path)) {
            Ok(v) => return Ok(v),
            Err(e) => {
                tracing::debug!(path = %path, error = %e, "accessor path failed");
                last = e;
            }
        }
    }
    Err(last)
}

/// 多参数调用时的参数对象：参数名 -> 值。
#[derive(Debug, Clone, Default)]
pub struct ParamMap {
    entries: BTreeMap<String, Box<dyn MetaObject>>,
}

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl MetaObject) -> &mut Self {
        self.entries.insert(name.into(), Box::new(value));
        self
    }

    /// 链式版本的 `insert`。
    pub fn with(mut self, name: impl Into<String>, value: impl MetaObject) -> Self {
        self.insert(name, value);
        self
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&dyn MetaObject> {
        self.entries.get(name).map(|v| &**v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MetaObject for ParamMap {
    fn property(&self, name: &str) -> Option<&dyn MetaObject> {
        self.get(name)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone)]
    struct Inner {
        id: i64,
    }
    meta_object!(Inner { id });

    #[derive(Debug, Clone)]
    struct Outer {
        inner: Inner,
        missing: Option<Inner>,
    }
    meta_object!(Outer { inner, missing });

    fn outer() -> Outer {
        Outer {
            inner: Inner { id: 5 },
            missing: None,
        }
    }

    #[test]
    fn field_path_segments_and_head() {
        let p = FieldPath::new("a.b.c");
        assert_eq!(p.segments().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(p.head(), "a");
        assert_eq!(p.to_string(), "a.b.c");
    }

    #[test]
    fn get_value_walks_nested_fields() {
        let v = get_scalar(&outer(), &FieldPath::new("inner.id")).unwrap();
        assert_eq!(v, SqlValue::I64(5));
    }

    #[test]
    fn get_value_reports_failing_segment() {
        let err = get_value(&outer(), &FieldPath::new("inner.name")).unwrap_err();
        assert_eq!(
            err,
            ReflectError::NoSuchProperty {
                path: "inner.name".to_string(),
                segment: "name".to_string(),
            }
        );
    }

    #[test]
    fn null_stops_the_walk() {
        let v = get_scalar(&outer(), &FieldPath::new("missing.id")).unwrap();
        assert_eq!(v, SqlValue::Null);
    }

    #[test]
    fn composite_leaf_reads_as_debug_text() {
        let v = get_scalar(&outer(), &FieldPath::new("inner")).unwrap();
        assert_eq!(v, SqlValue::from("Inner { id: 5 }"));
    }

    #[test]
    fn some_composite_leaf_reads_as_inner_debug_text() {
        let mut o = outer();
        o.missing = Some(Inner { id: 8 });
        let v = get_scalar(&o, &FieldPath::new("missing")).unwrap();
        assert_eq!(v, SqlValue::from("Inner { id: 8 }"));
    }

    #[test]
    fn some_is_transparent_to_downcast() {
        let v = Some(7_i64);
        let p = FieldPath::new("");
        assert_eq!(*downcast::<i64>(&v, &p, "i64").unwrap(), 7);
        assert!(downcast::<i64>(&None::<i64>, &p, "i64").is_err());
    }

    #[test]
    fn try_paths_returns_first_success() {
        let paths = [FieldPath::new("nope.id"), FieldPath::new("inner.id")];
        let v = try_paths(&outer(), &paths, |v, _| Ok(v.scalar())).unwrap();
        assert_eq!(v, Some(SqlValue::I64(5)));
    }

    #[test]
    fn downcast_checks_concrete_type() {
        let o = outer();
        let p = FieldPath::new("inner");
        let inner = get_value(&o, &p).unwrap();
        assert_eq!(downcast::<Inner>(inner, &p, "inner").unwrap().id, 5);
        assert!(matches!(
            downcast::<String>(inner, &p, "string"),
            Err(ReflectError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn param_map_is_ordered_and_cloneable() {
        let m = ParamMap::new().with("b", 2_i64).with("a", "x");
        let c = m.clone();
        assert_eq!(c.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(c.len(), 2);
        assert!(!c.is_empty());
        assert_eq!(get_scalar(&m, &FieldPath::new("a")).unwrap(), SqlValue::from("x"));
    }
}
