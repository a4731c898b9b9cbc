//! halo-sql-log：语句执行拦截器，把 `?` 模板与参数还原成可读 SQL 打进日志。

pub mod assemble;
pub mod config;
pub mod handler;
pub mod interceptor;
pub mod literal;
pub mod meta;
pub mod resolver;
pub mod sink;
pub mod statement_path;
#[cfg(test)]
mod statement_path_tests;
pub mod type_handler;
pub mod value;

pub use crate::assemble::{RenderError, count_placeholders, pretty_print, substitute};
pub use crate::config::InterceptorConfig;
pub use crate::handler::{
    BoundSql, MappedStatement, ParameterMapping, PreparedStatementHandler,
    RoutingStatementHandler, StatementHandler,
};
pub use crate::interceptor::{
    InterceptError, Invocation, Method, RenderedSql, Signature, SqlLogInterceptor,
};
pub use crate::literal::{Literal, NULL_MARKER, format_value};
pub use crate::meta::{FieldPath, MetaObject, ParamMap, ReflectError, get_value, try_paths};
pub use crate::resolver::{resolve_parameters, resolve_value};
pub use crate::sink::{LogSink, StderrSink, TracingSink};
pub use crate::statement_path::{resolve_statement_id, resolve_type_handler_registry};
pub use crate::type_handler::TypeHandlerRegistry;
pub use crate::value::SqlValue;

/// 推荐的便捷命名空间：允许 `use halo_space::sqllog::{...}` 形式导入。
pub mod sqllog {
    pub use crate::*;
}
