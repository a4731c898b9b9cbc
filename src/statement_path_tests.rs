#[cfg(test)]
mod tests {
    use crate::config::InterceptorConfig;
    use crate::handler::{
        BoundSql, MappedStatement, PreparedStatementHandler, RoutingStatementHandler,
    };
    use crate::meta::{MetaObject, ReflectError};
    use crate::meta_object;
    use crate::statement_path::{resolve_statement_id, resolve_type_handler_registry};
    use crate::type_handler::TypeHandlerRegistry;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[derive(Debug, Clone)]
    struct Plugin {
        target: RoutingStatementHandler,
    }
    meta_object!(Plugin { target });

    #[derive(Debug, Clone)]
    struct Proxy {
        h: Plugin,
    }
    meta_object!(Proxy { h });

    fn routing(id: &str) -> RoutingStatementHandler {
        RoutingStatementHandler::new(PreparedStatementHandler::new(
            MappedStatement::new(id),
            BoundSql::new("SELECT 1"),
        ))
    }

    fn config() -> InterceptorConfig {
        InterceptorConfig::new().with_strip_prefix("app.module.")
    }

    #[test]
    fn primary_path_resolves() {
        let h = routing("app.module.user.UserMapper.select_by_id");
        assert_eq!(
            resolve_statement_id(&h, &config()).unwrap(),
            "user.UserMapper.select_by_id"
        );
    }

    #[test]
    fn falls_back_when_primary_field_is_absent() {
        let h = Proxy {
            h: Plugin {
                target: routing("app.module.order.OrderMapper.insert"),
            },
        };
        assert_eq!(
            resolve_statement_id(&h, &config()).unwrap(),
            "order.OrderMapper.insert"
        );
    }

    #[test]
    fn last_failure_propagates_when_all_paths_fail() {
        let h = MappedStatement::new("x");
        let err = resolve_statement_id(&h, &config()).unwrap_err();
        assert_eq!(
            err,
            ReflectError::NoSuchProperty {
                path: "h.target.delegate.mapped_statement.id".to_string(),
                segment: "h".to_string(),
            }
        );
    }

    #[test]
    fn no_paths_is_an_error() {
        let h = routing("x");
        let c = InterceptorConfig::new().with_statement_id_paths(Vec::<&str>::new());
        assert_eq!(
            resolve_statement_id(&h, &c).unwrap_err(),
            ReflectError::NoAccessorPaths
        );
    }

    #[test]
    fn wrong_leaf_type_triggers_fallback() {
        // 第一条路径能走通但叶子不是字符串，应继续尝试下一条。
        let h = routing("app.module.a.B.c");
        let c = config().with_statement_id_paths([
            "delegate.type_handler_registry",
            "delegate.mapped_statement.id",
        ]);
        assert_eq!(resolve_statement_id(&h, &c).unwrap(), "a.B.c");
    }

    #[test]
    fn registry_resolves_through_both_depths() {
        let mut custom = TypeHandlerRegistry::empty();
        custom.register::<i64>();
        let inner = PreparedStatementHandler::new(MappedStatement::new("x"), BoundSql::new(""))
            .with_type_handler_registry(Arc::new(custom));
        let shallow = RoutingStatementHandler::new(inner);
        let deep = Proxy {
            h: Plugin {
                target: shallow.clone(),
            },
        };

        for h in [&shallow as &dyn MetaObject, &deep as &dyn MetaObject] {
            let r = resolve_type_handler_registry(h, &config()).unwrap();
            assert!(r.has_type_handler_for::<i64>());
            assert!(!r.has_type_handler_for::<String>());
        }
    }

    #[test]
    fn registry_type_mismatch_propagates() {
        let h = routing("x");
        let c = config().with_type_handler_registry_paths(["delegate.mapped_statement"]);
        assert_eq!(
            resolve_type_handler_registry(&h, &c).unwrap_err(),
            ReflectError::TypeMismatch {
                path: "delegate.mapped_statement".to_string(),
                expected: "type handler registry",
            }
        );
    }
}
