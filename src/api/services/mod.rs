pub mod helpers;
pub mod links;
pub mod redirect;

use actix_web::web;

pub use links::{CreatedLink, LinkSettings, LinkView, LinksService, links_routes};
pub use redirect::{RedirectService, redirect_routes};

/// Registers every route. The redirect catch-all goes last.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(links_routes).service(redirect_routes());
}
