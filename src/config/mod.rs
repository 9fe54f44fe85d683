//! 应用配置
//!
//! 分层加载：默认值 → `config.toml` → `config.<APP_ENV>.toml` → 环境变量。

#[path = "impl.rs"]
mod loader;
mod structs;

pub use structs::*;
