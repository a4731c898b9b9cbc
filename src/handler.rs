//! 语句处理器一侧的数据：拦截器从这里拿到 SQL 模板、参数绑定与参数对象。
//!
//! 执行管线本身不在本 crate 内；这里只给出拦截器读取时依赖的形状，
//! 以及两层常见的处理器包装（`RoutingStatementHandler` -> `PreparedStatementHandler`）。

use crate::meta::{FieldPath, MetaObject, ParamMap, ReflectError, get_scalar};
use crate::meta_object;
use crate::type_handler::TypeHandlerRegistry;
use crate::value::SqlValue;
use std::sync::Arc;

/// 一个参数绑定：按位置对应模板里的一个 `?`，只记录取值用的属性名。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterMapping {
    pub property: String,
}

impl ParameterMapping {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
        }
    }
}

/// 一次执行对应的 SQL 模板与参数。
#[derive(Debug, Clone)]
pub struct BoundSql {
    pub sql: String,
    pub parameter_mappings: Vec<ParameterMapping>,
    pub parameter_object: Option<Box<dyn MetaObject>>,
    /// 执行管线计算出来的附加参数（如 foreach 展开的 `__frch_item_0`）。
    pub additional_parameters: ParamMap,
}

meta_object!(BoundSql {
    sql,
    parameter_object,
    additional_parameters,
});

impl BoundSql {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            parameter_mappings: Vec::new(),
            parameter_object: None,
            additional_parameters: ParamMap::new(),
        }
    }

    /// 按顺序追加参数绑定。
    pub fn bind<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameter_mappings
            .extend(properties.into_iter().map(ParameterMapping::new));
        self
    }

    pub fn with_parameter_object(mut self, obj: impl MetaObject) -> Self {
        self.parameter_object = Some(Box::new(obj));
        self
    }

    pub fn with_additional_parameter(
        mut self,
        name: impl Into<String>,
        value: impl MetaObject,
    ) -> Self {
        self.additional_parameters.insert(name, value);
        self
    }

    /// 只看第一段属性名：`__frch_item_0.id` 命中 `__frch_item_0`。
    pub fn has_additional_parameter(&self, name: &str) -> bool {
        self.additional_parameters
            .contains_key(FieldPath::new(name).head())
    }

    pub fn additional_parameter(&self, name: &str) -> Result<SqlValue, ReflectError> {
        get_scalar(&self.additional_parameters, &FieldPath::new(name))
    }
}

/// 语句元数据；`id` 是语句在应用模块层级里的全限定名。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedStatement {
    pub id: String,
}

meta_object!(MappedStatement { id });

impl MappedStatement {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// 被拦截的目标：能给出本次执行的 `BoundSql`，其余内部字段通过 `MetaObject` 读取。
pub trait StatementHandler: MetaObject {
    fn bound_sql(&self) -> &BoundSql;
}

/// 实际执行预编译语句的处理器。
#[derive(Debug, Clone)]
pub struct PreparedStatementHandler {
    pub mapped_statement: MappedStatement,
    pub type_handler_registry: Arc<TypeHandlerRegistry>,
    pub bound_sql: BoundSql,
}

meta_object!(PreparedStatementHandler {
    mapped_statement,
    type_handler_registry,
    bound_sql,
});

impl PreparedStatementHandler {
    pub fn new(mapped_statement: MappedStatement, bound_sql: BoundSql) -> Self {
        Self {
            mapped_statement,
            type_handler_registry: Arc::new(TypeHandlerRegistry::new()),
            bound_sql,
        }
    }

    pub fn with_type_handler_registry(mut self, registry: Arc<TypeHandlerRegistry>) -> Self {
        self.type_handler_registry = registry;
        self
    }
}

impl StatementHandler for PreparedStatementHandler {
    fn bound_sql(&self) -> &BoundSql {
        &self.bound_sql
    }
}

/// 按语句类型路由到真实处理器的外层包装，内部字段名为 `delegate`。
#[derive(Debug, Clone)]
pub struct RoutingStatementHandler {
    pub delegate: PreparedStatementHandler,
}

meta_object!(RoutingStatementHandler { delegate });

impl RoutingStatementHandler {
    pub fn new(delegate: PreparedStatementHandler) -> Self {
        Self { delegate }
    }
}

impl StatementHandler for RoutingStatementHandler {
    fn bound_sql(&self) -> &BoundSql {
        self.delegate.bound_sql()
    }
}
