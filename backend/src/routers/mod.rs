use salvo::catcher::Catcher;
use salvo::prelude::*;
use serde_json::json;

mod messages;
mod pages;
mod session;

use crate::application::domain::Role;
use crate::hoops;
use crate::infrastructure::config::{self, ServerConfig};

pub fn root() -> Router {
    build(config::get())
}

/// Route tree for an explicit config; `root()` uses the loaded one.
pub fn build(config: &ServerConfig) -> Router {
    let jwt = &config.jwt;
    let mut api = Router::with_path("api")
        .push(Router::with_path("messages/{locale}").get(messages::get_messages))
        .push(
            Router::with_path("session")
                .hoop(hoops::auth_hoop(jwt))
                .get(session::get_session),
        );
    if jwt.dev_sessions {
        api = api.push(Router::with_path("dev/session").post(session::post_dev_session));
    }

    let router = Router::new()
        .hoop(Logger::new())
        .get(pages::root_redirect)
        .push(Router::with_path("health").get(health))
        .push(api)
        // Must stay last: `{locale}` matches any first segment.
        .push(
            Router::with_path("{locale}")
                .hoop(hoops::locale_hoop(pages::SECTIONS))
                .hoop(hoops::auth_hoop(jwt))
                .get(pages::home)
                .push(
                    Router::with_path("account")
                        .hoop(hoops::require_roles(Role::ALL))
                        .get(pages::account),
                )
                .push(
                    Router::with_path("pro")
                        .hoop(hoops::require_roles([Role::Pro, Role::Admin]))
                        .get(pages::pro_dashboard),
                )
                .push(
                    Router::with_path("admin")
                        .hoop(hoops::require_roles(Role::Admin))
                        .get(pages::admin_panel),
                ),
        );
    let doc = OpenApi::new("citas api", "0.1.0").merge_router(&router);
    router
        .unshift(doc.into_router("/api-doc/openapi.json"))
        .unshift(Scalar::new("/api-doc/openapi.json").into_router("scalar"))
}

pub fn service() -> Service {
    with_catchers(root())
}

fn with_catchers(router: Router) -> Service {
    Service::new(router)
        .catcher(Catcher::default().hoop(hoops::error_404))
        .hoop(hoops::cors_hoop())
}

#[handler]
async fn health(res: &mut Response) {
    res.render(Json(json!({ "status": "ok" })));
}
