//! Token transport: the session credential travels in a single named cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use configs::{AuthConfig, SameSitePolicy};

/// Builds, reads and clears the session cookie according to configuration.
#[derive(Debug, Clone)]
pub struct TokenCookie {
    name: String,
    secure: bool,
    same_site: Option<SameSite>,
}

impl TokenCookie {
    pub fn from_config(cfg: &AuthConfig) -> Self {
        let same_site = cfg.cookie_same_site.map(|p| match p {
            SameSitePolicy::Strict => SameSite::Strict,
            SameSitePolicy::Lax => SameSite::Lax,
            SameSitePolicy::None => SameSite::None,
        });
        Self { name: cfg.cookie_name.clone(), secure: cfg.cookie_secure, same_site }
    }

    /// HTTP-only session cookie carrying `token`; no Max-Age, the token's own
    /// `exp` bounds its usefulness.
    pub fn issue(&self, token: String) -> Cookie<'static> {
        let mut builder = Cookie::build((self.name.clone(), token))
            .path("/")
            .http_only(true)
            .secure(self.secure);
        if let Some(same_site) = self.same_site {
            builder = builder.same_site(same_site);
        }
        builder.build()
    }

    /// Removal cookie (`Max-Age=0`, empty value). This only tells the client to
    /// drop its copy; the token itself stays valid until it expires.
    pub fn invalidate(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build((self.name.clone(), ""))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .build();
        cookie.make_removal();
        cookie
    }

    /// Non-empty credential from the request cookies, if any.
    pub fn read(&self, jar: &CookieJar) -> Option<String> {
        jar.get(&self.name)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    }
}
