//! TypeHandlerRegistry：哪些运行时类型可以“直接当作一个标量值”渲染。
//!
//! 单参数调用（如 `find_by_id(7)`）时，参数对象本身就是值；
//! 复合参数对象则需要按绑定名取属性。二者的区分依据就是这里的注册表。

use crate::meta::MetaObject;
use crate::value::SqlValue;
use std::any::{Any, TypeId};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct TypeHandlerRegistry {
    types: HashSet<TypeId>,
}

impl Default for TypeHandlerRegistry {
    fn default() -> Self {
        let mut r = Self::empty();
        r.register::<bool>()
            .register::<i8>()
            .register::<i16>()
            .register::<i32>()
            .register::<i64>()
            .register::<isize>()
            .register::<u8>()
            .register::<u16>()
            .register::<u32>()
            .register::<u64>()
            .register::<usize>()
            .register::<f32>()
            .register::<f64>()
            .register::<String>()
            .register::<&'static str>()
            .register::<time::Date>()
            .register::<time::PrimitiveDateTime>()
            .register::<time::OffsetDateTime>()
            .register::<SqlValue>();
        r
    }
}

impl TypeHandlerRegistry {
    /// 内置标量类型都已注册的注册表。
    pub fn new() -> Self {
        Self::default()
    }

    pub fn empty() -> Self {
        Self {
            types: HashSet::new(),
        }
    }

    pub fn register<T: Any>(&mut self) -> &mut Self {
        self.types.insert(TypeId::of::<T>());
        self
    }

    pub fn has_type_handler_for<T: Any>(&self) -> bool {
        self.types.contains(&TypeId::of::<T>())
    }

    /// 按对象的运行时类型判断。
    pub fn has_type_handler(&self, obj: &dyn MetaObject) -> bool {
        self.types.contains(&obj.as_any().type_id())
    }
}

impl MetaObject for TypeHandlerRegistry {
    fn as_any(&self) -> &dyn Any {
        self
    }
}
