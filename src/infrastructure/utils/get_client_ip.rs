use actix_web::HttpRequest;

/// Extract the client's IP address from the request, considering X-Forwarded-For if trusted
/// `trust_x_forwarded_for`: whether to trust the X-Forwarded-For header
pub fn get_client_ip(req: &HttpRequest, trust_x_forwarded_for: bool) -> String {
    if trust_x_forwarded_for {
        let forwarded = req
            .headers()
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|s| s.split(',').next())
            .map(str::trim)
            .filter(|s| !s.is_empty());

        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn uses_peer_address_by_default() {
        let req = TestRequest::default()
            .peer_addr("203.0.113.9:52000".parse().unwrap())
            .insert_header(("x-forwarded-for", "198.51.100.1"))
            .to_http_request();

        assert_eq!(get_client_ip(&req, false), "203.0.113.9");
    }

    #[test]
    fn takes_first_forwarded_hop_when_trusted() {
        let req = TestRequest::default()
            .peer_addr("10.0.0.2:52000".parse().unwrap())
            .insert_header(("x-forwarded-for", "198.51.100.1, 10.0.0.1"))
            .to_http_request();

        assert_eq!(get_client_ip(&req, true), "198.51.100.1");
    }

    #[test]
    fn falls_back_to_unknown() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(get_client_ip(&req, true), "unknown");
    }
}
