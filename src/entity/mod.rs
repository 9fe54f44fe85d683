//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod accounts;
pub mod assignments;
pub mod profiles;
pub mod submissions;
pub mod user_roles;

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, Set, Value};

/// 秒级时间戳转换为 UTC 时间
pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

/// 只有新旧值不同时才写入，未变化的列保持 NotSet
pub(crate) fn set_if_changed<V>(slot: &mut ActiveValue<V>, old: V, new: V)
where
    V: Into<Value> + PartialEq,
{
    if old != new {
        *slot = Set(new);
    }
}
