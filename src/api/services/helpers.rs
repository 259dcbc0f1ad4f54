//! 响应构建帮助函数

use actix_web::HttpResponse;
use actix_web::http::StatusCode;

use crate::errors::LinkError;

/// 纯文本错误响应
pub fn text_response(status: StatusCode, body: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header(("Content-Type", "text/plain; charset=utf-8"))
        .body(body.into())
}

/// 从 LinkError 构建错误响应（自动映射 HTTP 状态码），响应体为底层错误信息
pub fn error_response(err: &LinkError) -> HttpResponse {
    text_response(err.http_status(), err.message().to_string())
}
