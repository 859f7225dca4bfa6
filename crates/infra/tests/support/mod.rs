//! In-memory ports for infrastructure integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use linkreach_core::ports::{Page, RemoteSource, SessionProvider};
use linkreach_core::RemoteError;
use linkreach_domain::{
    ActionReply, ActionRequest, Connection, Credentials, FetchCursor, RemoteRecord, Resource,
    SessionCookie,
};

pub const INTEGRATION_ID: &str = "int-1";

/// Remote source serving queued pages and recording requested cursors.
#[derive(Default, Clone)]
pub struct QueuedRemoteSource {
    pages: Arc<Mutex<VecDeque<Result<Page, RemoteError>>>>,
    cursors: Arc<Mutex<Vec<FetchCursor>>>,
}

impl QueuedRemoteSource {
    pub fn with_pages(pages: impl IntoIterator<Item = Result<Page, RemoteError>>) -> Self {
        let source = Self::default();
        source.pages.lock().unwrap().extend(pages);
        source
    }

    pub fn cursors(&self) -> Vec<FetchCursor> {
        self.cursors.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteSource for QueuedRemoteSource {
    async fn fetch_page(
        &self,
        _resource: &Resource,
        _credentials: &Credentials,
        cursor: &FetchCursor,
        _limit: u32,
    ) -> Result<Page, RemoteError> {
        self.cursors.lock().unwrap().push(*cursor);
        self.pages.lock().unwrap().pop_front().unwrap_or_else(|| Ok(Page::default()))
    }

    async fn perform_action(
        &self,
        _credentials: &Credentials,
        _request: &ActionRequest,
    ) -> Result<ActionReply, RemoteError> {
        Ok(ActionReply::Acknowledged { ok: true })
    }
}

pub struct StaticSessions;

#[async_trait]
impl SessionProvider for StaticSessions {
    async fn credentials(&self, integration_id: &str) -> Option<Credentials> {
        Some(Credentials::new(
            integration_id,
            vec![SessionCookie { name: "li_at".into(), value: "token".into() }],
        ))
    }
}

pub fn connections(count: usize) -> Page {
    Page::new(
        (0..count)
            .map(|i| {
                RemoteRecord::Connection(Connection {
                    urn_id: format!("urn:li:member:{i}"),
                    public_id: None,
                    first_name: format!("First{i}"),
                    last_name: "Last".into(),
                    headline: None,
                    profile_picture_url: None,
                    connected_at: None,
                })
            })
            .collect(),
    )
}
