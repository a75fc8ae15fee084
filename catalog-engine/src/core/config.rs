/// 引擎配置 - 所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | CATALOG_BASE_URL | https://swensonhe-dev-challenge.s3.us-west-2.amazonaws.com | 远程目录地址 |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
///
/// # 示例
///
/// ```ignore
/// CATALOG_BASE_URL=http://localhost:3000 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 远程目录服务地址
    pub catalog_base_url: String,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 日志级别
    pub log_level: String,
}

/// 默认远程目录地址
const DEFAULT_CATALOG_BASE_URL: &str =
    "https://swensonhe-dev-challenge.s3.us-west-2.amazonaws.com";

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        // .env 文件存在时优先加载 (开发环境)
        let _ = dotenv::dotenv();

        Self {
            catalog_base_url: std::env::var("CATALOG_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_CATALOG_BASE_URL.into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.catalog_base_url = base_url.into();
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
