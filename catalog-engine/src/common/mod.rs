//! 通用基础设施 - 日志

pub mod logger;
