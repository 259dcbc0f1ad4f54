use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum LinkError {
    NotFound(String),
    Unauthorized(String),
    Validation(String),
    Backend(String),
    Serialization(String),
    Config(String),
    Io(String),
}

impl LinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinkError::NotFound(_) => "E001",
            LinkError::Unauthorized(_) => "E002",
            LinkError::Validation(_) => "E003",
            LinkError::Backend(_) => "E004",
            LinkError::Serialization(_) => "E005",
            LinkError::Config(_) => "E006",
            LinkError::Io(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkError::NotFound(_) => "Link Not Found",
            LinkError::Unauthorized(_) => "Unauthorized",
            LinkError::Validation(_) => "Validation Error",
            LinkError::Backend(_) => "Backend Error",
            LinkError::Serialization(_) => "Serialization Error",
            LinkError::Config(_) => "Configuration Error",
            LinkError::Io(_) => "IO Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinkError::NotFound(msg) => msg,
            LinkError::Unauthorized(msg) => msg,
            LinkError::Validation(msg) => msg,
            LinkError::Backend(msg) => msg,
            LinkError::Serialization(msg) => msg,
            LinkError::Config(msg) => msg,
            LinkError::Io(msg) => msg,
        }
    }

    /// HTTP 状态码映射
    ///
    /// Unknown ids answer 400 rather than 404, and malformed create bodies
    /// surface as 500 through `Serialization`.
    pub fn http_status(&self) -> StatusCode {
        match self {
            LinkError::NotFound(_) | LinkError::Validation(_) => StatusCode::BAD_REQUEST,
            LinkError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            LinkError::Backend(_)
            | LinkError::Serialization(_)
            | LinkError::Config(_)
            | LinkError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkError {}

// 便捷的构造函数
impl LinkError {
    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinkError::NotFound(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        LinkError::Unauthorized(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LinkError::Validation(msg.into())
    }

    pub fn backend<T: Into<String>>(msg: T) -> Self {
        LinkError::Backend(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinkError::Serialization(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        LinkError::Config(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        LinkError::Io(msg.into())
    }
}

impl From<redis::RedisError> for LinkError {
    fn from(err: redis::RedisError) -> Self {
        LinkError::Backend(err.to_string())
    }
}

impl From<serde_json::Error> for LinkError {
    fn from(err: serde_json::Error) -> Self {
        LinkError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for LinkError {
    fn from(err: std::io::Error) -> Self {
        LinkError::Io(err.to_string())
    }
}

impl From<config::ConfigError> for LinkError {
    fn from(err: config::ConfigError) -> Self {
        LinkError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkError>;
