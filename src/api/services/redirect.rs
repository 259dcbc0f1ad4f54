use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, Responder, web};
use tracing::{debug, error, trace};

use super::helpers::{error_response, text_response};
use crate::errors::LinkError;
use crate::storage::LinkStore;

pub struct RedirectService;

impl RedirectService {
    pub async fn handle_redirect(
        path: web::Path<String>,
        store: web::Data<LinkStore>,
    ) -> impl Responder {
        let id = path.into_inner();

        let long_url = match store.resolve(&id).await {
            Ok(url) => url,
            Err(LinkError::NotFound(_)) => {
                debug!("Redirect link not found: {}", id);
                return Self::not_found_response();
            }
            Err(e) => {
                error!("Backend error during redirect lookup for '{}': {}", id, e);
                return error_response(&e);
            }
        };

        // 计数失败时不跳转，直接返回 500
        if let Err(e) = store.record_hit(&id).await {
            error!("Failed to record hit for '{}': {}", id, e);
            return error_response(&e);
        }

        trace!("Redirecting {} -> {}", id, long_url);
        HttpResponse::Found()
            .insert_header((LOCATION, long_url))
            .finish()
    }

    #[inline]
    fn not_found_response() -> HttpResponse {
        text_response(
            StatusCode::BAD_REQUEST,
            "Failed to get long URL from short key",
        )
    }
}

/// Redirect 路由配置，必须最后注册
pub fn redirect_routes() -> actix_web::Scope {
    web::scope("").route("/{id}*", web::get().to(RedirectService::handle_redirect))
}
