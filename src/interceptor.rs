//! SqlLogInterceptor：在语句执行前打印还原后的 SQL，然后原样执行。
//!
//! 流程：取模板与绑定 -> 解析语句 id -> 逐个解析并渲染参数 -> 组装、美化 -> 写日志 -> 执行。
//! 日志一侧的任何失败都会直接返回错误，真实执行不会发生；
//! 真实执行的返回值（包括它自己的错误）原样放在 `Ok` 里交还调用方。

use crate::assemble::{RenderError, pretty_print, substitute};
use crate::config::InterceptorConfig;
use crate::handler::StatementHandler;
use crate::literal::Literal;
use crate::meta::ReflectError;
use crate::resolver::resolve_parameters;
use crate::sink::{LogSink, TracingSink};
use crate::statement_path::{resolve_statement_id, resolve_type_handler_registry};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterceptError {
    #[error("sqllog cannot resolve statement id: {0}")]
    StatementId(#[source] ReflectError),
    #[error("sqllog cannot resolve type handler registry: {0}")]
    TypeHandlerRegistry(#[source] ReflectError),
    #[error("sqllog cannot resolve parameter: {0}")]
    Parameter(#[source] ReflectError),
    #[error("{0}")]
    Render(#[from] RenderError),
}

/// 语句处理器上可被拦截的方法。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Prepare,
    Parameterize,
    Batch,
    Update,
    Query,
    QueryCursor,
}

/// 拦截声明：方法名与参数类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub method: Method,
    pub args: &'static [&'static str],
}

const SIGNATURES: &[Signature] = &[
    Signature {
        method: Method::Query,
        args: &["Statement", "ResultHandler"],
    },
    Signature {
        method: Method::Update,
        args: &["Statement"],
    },
];

/// 一次被拦截的调用：目标处理器、方法，以及执行真实逻辑的续体。
pub struct Invocation<'a, H, F> {
    target: &'a H,
    method: Method,
    proceed: F,
}

impl<'a, H, F> Invocation<'a, H, F> {
    pub fn new(target: &'a H, method: Method, proceed: F) -> Self {
        Self {
            target,
            method,
            proceed,
        }
    }

    pub fn target(&self) -> &'a H {
        self.target
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// 执行真实逻辑。
    pub fn proceed<R>(self) -> R
    where
        F: FnOnce() -> R,
    {
        (self.proceed)()
    }
}

/// 一次渲染的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSql {
    /// 去掉公共前缀后的语句 id。
    pub statement_id: String,
    /// 参数替换后的 SQL。
    pub sql: String,
    /// 美化后的 SQL（用于展示）。
    pub pretty: String,
}

impl RenderedSql {
    pub fn log_line(&self) -> String {
        format!(
            "==>> method {} executed sql: \n {} ;\n",
            self.statement_id, self.pretty
        )
    }
}

impl fmt::Display for RenderedSql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.log_line())
    }
}

#[derive(Clone)]
pub struct SqlLogInterceptor {
    config: InterceptorConfig,
    sink: Arc<dyn LogSink>,
}

impl fmt::Debug for SqlLogInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // sink 无法 Debug；只输出配置。
        f.debug_struct("SqlLogInterceptor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for SqlLogInterceptor {
    fn default() -> Self {
        Self::new(InterceptorConfig::default())
    }
}

impl SqlLogInterceptor {
    pub fn new(config: InterceptorConfig) -> Self {
        Self {
            config,
            sink: Arc::new(TracingSink),
        }
    }

    pub fn with_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    pub fn config(&self) -> &InterceptorConfig {
        &self.config
    }

    pub fn signatures() -> &'static [Signature] {
        SIGNATURES
    }

    pub fn intercepts(&self, method: Method) -> bool {
        SIGNATURES.iter().any(|s| s.method == method)
    }

    /// 只渲染不执行。
    pub fn render<H: StatementHandler>(&self, handler: &H) -> Result<RenderedSql, InterceptError> {
        let bound_sql = handler.bound_sql();
        let statement_id =
            resolve_statement_id(handler, &self.config).map_err(InterceptError::StatementId)?;

        let literals: Vec<Literal> = if bound_sql.parameter_mappings.is_empty() {
            Vec::new()
        } else {
            let registry = resolve_type_handler_registry(handler, &self.config)
                .map_err(InterceptError::TypeHandlerRegistry)?;
            resolve_parameters(bound_sql, registry)
                .map_err(InterceptError::Parameter)?
                .iter()
                .map(Literal::from_value)
                .collect()
        };

        let sql = substitute(&bound_sql.sql, &literals, self.config.strict_placeholders)?;
        let pretty = pretty_print(&sql);
        Ok(RenderedSql {
            statement_id,
            sql,
            pretty,
        })
    }

    /// 拦截一次调用：未声明拦截的方法直接执行；否则先写日志再执行。
    pub fn intercept<H, F, R>(&self, invocation: Invocation<'_, H, F>) -> Result<R, InterceptError>
    where
        H: StatementHandler,
        F: FnOnce() -> R,
    {
        if !self.intercepts(invocation.method()) {
            return Ok(invocation.proceed());
        }
        let rendered = self.render(invocation.target())?;
        self.sink.write(&rendered.log_line());
        Ok(invocation.proceed())
    }
}
