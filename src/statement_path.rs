//! 从语句处理器内部读出语句 id 与类型注册表。
//!
//! 处理器在不同运行配置下会被包成不同层数，所以每个目标都配置了一组候选路径，
//! 按顺序尝试，全部失败时把最后一个错误抛给调用方。

use crate::config::InterceptorConfig;
use crate::meta::{MetaObject, ReflectError, downcast, try_paths};
use crate::type_handler::TypeHandlerRegistry;
use crate::value::SqlValue;

/// 语句的全限定 id，已去掉配置的公共前缀。
pub fn resolve_statement_id(
    handler: &dyn MetaObject,
    config: &InterceptorConfig,
) -> Result<String, ReflectError> {
    let id = try_paths(handler, &config.statement_id_paths, |v, path| {
        match v.scalar() {
            Some(SqlValue::String(s)) => Ok(s.into_owned()),
            _ => Err(ReflectError::TypeMismatch {
                path: path.to_string(),
                expected: "string",
            }),
        }
    })?;
    Ok(config.shorten(&id).into_owned())
}

pub fn resolve_type_handler_registry<'a>(
    handler: &'a dyn MetaObject,
    config: &InterceptorConfig,
) -> Result<&'a TypeHandlerRegistry, ReflectError> {
    try_paths(handler, &config.type_handler_registry_paths, |v, path| {
        downcast::<TypeHandlerRegistry>(v, path, "type handler registry")
    })
}
