//! Assignment Desk - 作业提交与批改服务
//!
//! 基于 Actix Web 构建。教师发布作业，学生上传文件提交，教师评分。
//! 所有面向请求的读写都经过行级访问策略。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证与限流中间件
//! - `models`: 数据模型定义
//! - `policy`: 行级访问策略与角色查询
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM、对象存储、受控视图）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod policy;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
