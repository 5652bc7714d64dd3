use actix_web::middleware::DefaultHeaders;

pub const CONTENT_SECURITY_POLICY: &str = concat!(
    "default-src 'self'; ",
    "style-src 'self' 'unsafe-inline' https://fonts.googleapis.com https://cdnjs.cloudflare.com; ",
    "font-src 'self' https://fonts.gstatic.com https://cdnjs.cloudflare.com; ",
    "script-src 'self' 'unsafe-inline' https://ajax.googleapis.com; ",
    "img-src 'self' data: https:; ",
    "connect-src 'self'"
);

/// Hardening headers attached to every response.
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Content-Security-Policy", CONTENT_SECURITY_POLICY))
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "SAMEORIGIN"))
        .add(("Referrer-Policy", "no-referrer"))
        .add(("Strict-Transport-Security", "max-age=15552000; includeSubDomains"))
        .add(("X-DNS-Prefetch-Control", "off"))
        .add(("Cross-Origin-Opener-Policy", "same-origin"))
        .add(("X-Permitted-Cross-Domain-Policies", "none"))
}
