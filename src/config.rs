//! 拦截器配置：构造时确定，之后只读。

use crate::meta::FieldPath;

/// 语句 id 的默认读取路径：先试浅层，再试被插件代理包了一层之后的深层路径。
pub const STATEMENT_ID_PATHS: [&str; 2] = [
    "delegate.mapped_statement.id",
    "h.target.delegate.mapped_statement.id",
];

/// 类型注册表的默认读取路径，顺序同上。
pub const TYPE_HANDLER_REGISTRY_PATHS: [&str; 2] = [
    "delegate.type_handler_registry",
    "h.target.delegate.type_handler_registry",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptorConfig {
    pub statement_id_paths: Vec<FieldPath>,
    pub type_handler_registry_paths: Vec<FieldPath>,
    /// 语句 id 输出前去掉的公共前缀（应用根模块命名空间）。
    pub strip_prefix: String,
    /// 为 true 时，占位符与绑定数量不一致直接报错；否则按位置尽量替换。
    pub strict_placeholders: bool,
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            statement_id_paths: STATEMENT_ID_PATHS.into_iter().map(FieldPath::from).collect(),
            type_handler_registry_paths: TYPE_HANDLER_REGISTRY_PATHS
                .into_iter()
                .map(FieldPath::from)
                .collect(),
            strip_prefix: String::new(),
            strict_placeholders: false,
        }
    }
}

impl InterceptorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_statement_id_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<FieldPath>,
    {
        self.statement_id_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_type_handler_registry_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<FieldPath>,
    {
        self.type_handler_registry_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_strip_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.strip_prefix = prefix.into();
        self
    }

    pub fn with_strict_placeholders(mut self, strict: bool) -> Self {
        self.strict_placeholders = strict;
        self
    }

    /// 去掉语句 id 中的公共前缀（所有出现处都去掉）。
    pub fn shorten<'a>(&self, id: &'a str) -> std::borrow::Cow<'a, str> {
        if self.strip_prefix.is_empty() || !id.contains(self.strip_prefix.as_str()) {
            return std::borrow::Cow::Borrowed(id);
        }
        std::borrow::Cow::Owned(id.replace(self.strip_prefix.as_str(), ""))
    }
}
