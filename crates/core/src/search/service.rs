use std::sync::Arc;

use linkreach_domain::constants::{PREMIUM_VISIBLE_LEADS_THRESHOLD, SEARCH_CHECK_COUNT};
use linkreach_domain::{FetchCursor, Resource, SearchQuery};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::errors::log_caught;
use crate::ports::{RemoteSource, SessionProvider};

/// Verdict on a search results URL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchUrlCheck {
    pub is_valid: bool,
    pub total: u32,
    /// The search has more results than a free account can see.
    pub need_premium: bool,
}

impl SearchUrlCheck {
    pub const fn invalid() -> Self {
        Self { is_valid: false, total: 0, need_premium: false }
    }

    /// Verdict from the visible lead count and the advertised total.
    pub const fn from_counts(visible_leads: u32, total: u32) -> Self {
        Self {
            is_valid: true,
            total,
            need_premium: visible_leads <= PREMIUM_VISIBLE_LEADS_THRESHOLD
                && total > PREMIUM_VISIBLE_LEADS_THRESHOLD,
        }
    }
}

#[derive(Clone)]
pub struct SearchService {
    remote: Arc<dyn RemoteSource>,
    sessions: Arc<dyn SessionProvider>,
}

impl SearchService {
    pub fn new(remote: Arc<dyn RemoteSource>, sessions: Arc<dyn SessionProvider>) -> Self {
        Self { remote, sessions }
    }

    /// Fetch the first results of `url` and judge whether it is usable.
    #[instrument(skip(self))]
    pub async fn check_search_url(&self, integration_id: &str, url: &str) -> SearchUrlCheck {
        let Some(credentials) = self.sessions.credentials(integration_id).await else {
            info!("search_check_without_session");
            return SearchUrlCheck::invalid();
        };

        let resource = Resource::Search { query: SearchQuery::Url(url.to_string()) };
        match self
            .remote
            .fetch_page(&resource, &credentials, &FetchCursor::offset(0), SEARCH_CHECK_COUNT)
            .await
        {
            Ok(page) => {
                let visible = u32::try_from(page.len()).unwrap_or(u32::MAX);
                let check = SearchUrlCheck::from_counts(visible, page.reported_total.unwrap_or(visible));
                info!(visible, total = check.total, need_premium = check.need_premium, "search_url_checked");
                check
            }
            Err(err) => {
                log_caught(&err, "search_url_check_failed", integration_id);
                SearchUrlCheck::invalid()
            }
        }
    }
}
