//! 参数解析：为每个参数绑定选出要渲染的值。
//!
//! 每个绑定按以下规则取值，先命中者生效：
//! 1. 绑定名在附加参数里：取附加参数；
//! 2. 没有参数对象：空值；
//! 3. 参数对象本身是已注册的标量类型：参数对象就是值（单参数调用）；
//! 4. 否则把参数对象当复合对象，按绑定名（可多级）取属性。

use crate::handler::{BoundSql, ParameterMapping};
use crate::meta::{FieldPath, ReflectError, get_scalar, scalar_or_debug};
use crate::type_handler::TypeHandlerRegistry;
use crate::value::SqlValue;

pub fn resolve_value(
    bound_sql: &BoundSql,
    mapping: &ParameterMapping,
    registry: &TypeHandlerRegistry,
) -> Result<SqlValue, ReflectError> {
    let name = mapping.property.as_str();
    if bound_sql.has_additional_parameter(name) {
        return bound_sql.additional_parameter(name);
    }
    let Some(obj) = bound_sql.parameter_object.as_deref() else {
        return Ok(SqlValue::Null);
    };
    if registry.has_type_handler(obj) {
        return Ok(scalar_or_debug(obj));
    }
    get_scalar(obj, &FieldPath::new(name))
}

/// 按绑定顺序解析全部参数值。
pub fn resolve_parameters(
    bound_sql: &BoundSql,
    registry: &TypeHandlerRegistry,
) -> Result<Vec<SqlValue>, ReflectError> {
    bound_sql
        .parameter_mappings
        .iter()
        .map(|m| resolve_value(bound_sql, m, registry))
        .collect()
}
