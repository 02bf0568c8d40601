//! Session cookie construction and parsing.

use cookie::time::Duration as CookieDuration;
use cookie::{Cookie, SameSite as CookieSameSite};

use super::{SameSite, SessionConfig};

fn same_site(config: &SessionConfig) -> CookieSameSite {
    match config.cookie_same_site {
        SameSite::None => CookieSameSite::None,
        SameSite::Lax => CookieSameSite::Lax,
        SameSite::Strict => CookieSameSite::Strict,
    }
}

/// Cookie carrying a freshly issued session token.
///
/// `Max-Age` matches the configured session lifetime.
pub fn build_session_cookie(token: String, config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), token))
        .path(config.cookie_path.clone())
        .secure(config.cookie_secure)
        .http_only(config.cookie_http_only)
        .same_site(same_site(config))
        .max_age(CookieDuration::seconds(
            config.session_lifetime.num_seconds(),
        ))
        .build()
}

/// Cookie that makes the browser drop the session cookie.
pub fn build_removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), String::new()))
        .path(config.cookie_path.clone())
        .secure(config.cookie_secure)
        .http_only(config.cookie_http_only)
        .same_site(same_site(config))
        .max_age(CookieDuration::ZERO)
        .build()
}

/// Finds the session token in a `Cookie` request header value.
///
/// Unparseable pairs are skipped; empty values count as absent.
pub fn session_token_from_cookie_header(header: &str, cookie_name: &str) -> Option<String> {
    Cookie::split_parse(header)
        .filter_map(Result::ok)
        .find(|c| c.name() == cookie_name)
        .map(|c| c.value().to_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let config = SessionConfig::default();
        let cookie = build_session_cookie("tok".to_owned(), &config);

        assert_eq!(cookie.name(), "session_token");
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(CookieSameSite::Lax));
        assert_eq!(cookie.max_age(), Some(CookieDuration::hours(24)));

        let rendered = cookie.to_string();
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("Max-Age=86400"));
        assert!(!rendered.contains("Secure"));
    }

    #[test]
    fn test_secure_flag_follows_config() {
        let config = SessionConfig {
            cookie_secure: true,
            session_lifetime: Duration::hours(1),
            ..Default::default()
        };
        let cookie = build_session_cookie("tok".to_owned(), &config);

        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(CookieDuration::hours(1)));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let cookie = build_removal_cookie(&SessionConfig::default());

        assert_eq!(cookie.name(), "session_token");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(CookieDuration::ZERO));
        assert!(cookie.to_string().contains("Max-Age=0"));
    }

    #[test]
    fn test_token_from_cookie_header() {
        assert_eq!(
            session_token_from_cookie_header("theme=dark; session_token=abc", "session_token"),
            Some("abc".to_owned())
        );
        assert_eq!(
            session_token_from_cookie_header("theme=dark", "session_token"),
            None
        );
        assert_eq!(
            session_token_from_cookie_header("session_token=", "session_token"),
            None
        );
    }
}
