use salvo::jwt_auth::{CookieFinder, HeaderFinder, JwtTokenFinder, QueryFinder};

/// Where session tokens may be presented, in lookup order.
pub fn get_token_finders() -> Vec<Box<dyn JwtTokenFinder>> {
    vec![
        Box::new(HeaderFinder::new()),
        Box::new(QueryFinder::new("token")),
        Box::new(CookieFinder::new("jwt_token")),
        Box::new(CookieFinder::new("token")),
    ]
}

/// Returns true if the server is configured to use TLS
pub fn is_secure_context() -> bool {
    crate::infrastructure::config::get().tls.is_some()
}
