//! 对象缓存
//!
//! 后端以插件方式注册（见 [`declare_object_cache_plugin!`]），启动时按 `cache.type` 选择。
//! 当前用于缓存身份的角色：`role:<uuid>`。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 在程序加载时把缓存后端登记到插件表
///
/// 后端类型需提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $ty:ty) => {
        #[ctor::ctor]
        unsafe fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        <$ty>::new()
                            .map(|cache| {
                                Box::new(cache) as Box<dyn $crate::cache::ObjectCache>
                            })
                            .map_err($crate::errors::AppError::cache_connection)
                    })
                }),
            );
        }
    };
}
