//! Link creation and listing endpoints

use std::fmt;

use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::{error, info, warn};

use super::helpers::error_response;
use crate::config::StaticConfig;
use crate::errors::LinkError;
use crate::storage::{Link, LinkStore};

/// Per-process settings the link handlers need.
#[derive(Clone)]
pub struct LinkSettings {
    pub base_url: String,
    auth_code: String,
}

impl LinkSettings {
    pub fn new(base_url: impl Into<String>, auth_code: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_code: auth_code.into(),
        }
    }

    pub fn from_config(config: &StaticConfig) -> Self {
        Self::new(&config.server.base_url, &config.auth.auth_code)
    }

    /// Empty secret disables writes entirely.
    pub fn authorize(&self, candidate: &str) -> bool {
        !self.auth_code.is_empty()
            && bool::from(self.auth_code.as_bytes().ct_eq(candidate.as_bytes()))
    }

    pub fn short_url(&self, id: &str) -> String {
        format!("{}{}", self.base_url, id)
    }
}

impl fmt::Debug for LinkSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkSettings")
            .field("base_url", &self.base_url)
            .field("auth_code", &"<redacted>")
            .finish()
    }
}

#[derive(Deserialize)]
pub struct CreateLinkRequest {
    #[serde(default)]
    pub long_url: String,
    #[serde(default)]
    pub short_id: String,
    #[serde(default)]
    pub auth_code: String,
}

impl fmt::Debug for CreateLinkRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateLinkRequest")
            .field("long_url", &self.long_url)
            .field("short_id", &self.short_id)
            .finish_non_exhaustive()
    }
}

/// Create echo; never carries the auth code or a view count.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedLink {
    pub long_url: String,
    pub short_id: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkView {
    pub long_url: String,
    pub short_id: String,
    pub short_url: String,
    pub views: u64,
}

impl LinkView {
    fn from_link(link: Link, settings: &LinkSettings) -> Self {
        Self {
            short_url: settings.short_url(&link.short_id),
            long_url: link.long_url,
            short_id: link.short_id,
            views: link.views,
        }
    }
}

pub struct LinksService;

impl LinksService {
    pub async fn create_link(
        body: web::Bytes,
        store: web::Data<LinkStore>,
        settings: web::Data<LinkSettings>,
    ) -> impl Responder {
        // 解析失败按 500 返回
        let request: CreateLinkRequest = match serde_json::from_slice(&body) {
            Ok(request) => request,
            Err(e) => {
                warn!("Malformed create request: {}", e);
                return error_response(&LinkError::from(e));
            }
        };

        if !settings.authorize(&request.auth_code) {
            warn!("Rejected create for '{}': invalid auth code", request.short_id);
            return error_response(&LinkError::unauthorized("Invalid auth code"));
        }

        if let Err(e) = store.create(&request.short_id, &request.long_url).await {
            error!("Failed to create link '{}': {}", request.short_id, e);
            return error_response(&e);
        }

        info!("Created link via API: {}", request.short_id);
        HttpResponse::Ok().json(CreatedLink {
            long_url: request.long_url,
            short_id: request.short_id,
        })
    }

    pub async fn list_links(
        store: web::Data<LinkStore>,
        settings: web::Data<LinkSettings>,
    ) -> impl Responder {
        match store.list_all().await {
            Ok(links) => {
                let views: Vec<LinkView> = links
                    .into_iter()
                    .map(|link| LinkView::from_link(link, &settings))
                    .collect();
                HttpResponse::Ok().json(views)
            }
            Err(e) => {
                error!("Failed to list links: {}", e);
                error_response(&e)
            }
        }
    }
}

/// 列表与创建路由
///
/// 只注册精确路径，不用 scope：`/links/...` 下的其余路径仍是短链 id，
/// 需要落到重定向路由。方法不匹配时由 resource 返回 405。
pub fn links_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/links").route(web::get().to(LinksService::list_links)))
        .service(
            web::resource(["/links/create", "/create"])
                .route(web::post().to(LinksService::create_link)),
        );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_requires_exact_match() {
        let settings = LinkSettings::new("http://localhost/", "secret");
        assert!(settings.authorize("secret"));
        assert!(!settings.authorize("wrong"));
        assert!(!settings.authorize("secret "));
        assert!(!settings.authorize(""));
    }

    #[test]
    fn test_empty_secret_disables_writes() {
        let settings = LinkSettings::new("http://localhost/", "");
        assert!(!settings.authorize(""));
        assert!(!settings.authorize("anything"));
    }

    #[test]
    fn test_short_url_is_plain_concatenation() {
        let settings = LinkSettings::new("https://sho.rt/", "secret");
        assert_eq!(settings.short_url("abc"), "https://sho.rt/abc");
    }

    #[test]
    fn test_debug_output_hides_secrets() {
        let settings = LinkSettings::new("http://localhost/", "hunter2");
        assert!(!format!("{:?}", settings).contains("hunter2"));

        let request: CreateLinkRequest = serde_json::from_str(
            r#"{"long_url":"https://example.com","short_id":"abc","auth_code":"hunter2"}"#,
        )
        .unwrap();
        assert!(!format!("{:?}", request).contains("hunter2"));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let request: CreateLinkRequest = serde_json::from_str("{}").unwrap();
        assert!(request.long_url.is_empty());
        assert!(request.short_id.is_empty());
        assert!(request.auth_code.is_empty());
    }
}
