//! Session credentials for one integration

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
}

/// Everything the remote source needs to act as one integration
///
/// `Debug` never prints cookie values.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub integration_id: String,
    pub cookies: Vec<SessionCookie>,
    pub user_agent: Option<String>,
    /// Proxy URL, when the session is pinned to one.
    #[serde(default)]
    pub proxy: Option<String>,
}

impl Credentials {
    pub fn new(integration_id: impl Into<String>, cookies: Vec<SessionCookie>) -> Self {
        Self { integration_id: integration_id.into(), cookies, user_agent: None, proxy: None }
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    #[must_use]
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Renders cookies as a `Cookie` header value.
    pub fn cookie_header(&self) -> String {
        self.cookies.iter().map(|c| format!("{}={}", c.name, c.value)).collect::<Vec<_>>().join("; ")
    }
}

impl fmt::Debug for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCookie").field("name", &self.name).field("value", &"<redacted>").finish()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("integration_id", &self.integration_id)
            .field("cookie_count", &self.cookies.len())
            .field("user_agent", &self.user_agent)
            .field("proxy", &self.proxy.as_ref().map(|_| "<set>"))
            .finish()
    }
}
