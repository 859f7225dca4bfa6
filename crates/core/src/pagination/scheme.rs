use linkreach_domain::{CursorScheme, FetchCursor, ResourceKind};

use crate::ports::Page;

/// Per-scheme continuation rules
pub trait PaginationScheme: Send + Sync {
    fn cursor_scheme(&self) -> CursorScheme;

    /// Whether data may remain after a page fetched with `requested` as its
    /// size. A full page is taken to mean more data may exist; the remote
    /// never reports a true total.
    fn has_more(&self, page: &Page, requested: u32) -> bool {
        requested > 0 && u32::try_from(page.len()).map_or(true, |len| len >= requested)
    }

    /// Cursor for the next cycle, or `None` when no progress can be made.
    fn next_cursor(&self, page: &Page, prev: &FetchCursor, requested: u32) -> Option<FetchCursor>;
}

/// `start` advances by the requested page size.
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetScheme;

/// `created_before` moves to the oldest timestamp seen and must strictly
/// decrease; `created_after` is carried through.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeWindowScheme;

impl PaginationScheme for OffsetScheme {
    fn cursor_scheme(&self) -> CursorScheme {
        CursorScheme::Offset
    }

    fn next_cursor(&self, _page: &Page, prev: &FetchCursor, requested: u32) -> Option<FetchCursor> {
        match prev {
            FetchCursor::Offset { start } => start.checked_add(requested).map(FetchCursor::offset),
            FetchCursor::TimeWindow { .. } => None,
        }
    }
}

impl PaginationScheme for TimeWindowScheme {
    fn cursor_scheme(&self) -> CursorScheme {
        CursorScheme::TimeWindow
    }

    fn next_cursor(&self, page: &Page, prev: &FetchCursor, _requested: u32) -> Option<FetchCursor> {
        let FetchCursor::TimeWindow { created_before, created_after } = prev else {
            return None;
        };
        let oldest = page.items.iter().filter_map(|item| item.created_at()).min()?;
        if created_before.is_some_and(|before| oldest >= before) {
            return None;
        }
        Some(FetchCursor::time_window(Some(oldest), *created_after))
    }
}

static OFFSET: OffsetScheme = OffsetScheme;
static TIME_WINDOW: TimeWindowScheme = TimeWindowScheme;

/// Scheme used by `kind`.
pub fn scheme_for(kind: ResourceKind) -> &'static dyn PaginationScheme {
    match kind.cursor_scheme() {
        CursorScheme::Offset => &OFFSET,
        CursorScheme::TimeWindow => &TIME_WINDOW,
    }
}

#[cfg(test)]
mod tests {
    use linkreach_domain::{Message, RemoteRecord};

    use super::*;

    fn messages(timestamps: &[i64]) -> Page {
        Page::new(
            timestamps
                .iter()
                .map(|ts| {
                    RemoteRecord::Message(Message {
                        message_urn: format!("urn:li:msg:{ts}"),
                        sender_urn: "urn:li:member:1".into(),
                        text: String::new(),
                        created_at: *ts,
                    })
                })
                .collect(),
        )
    }

    #[test]
    fn offset_advances_by_requested_size() {
        let page = Page::new(vec![]);
        let next = OffsetScheme.next_cursor(&page, &FetchCursor::offset(100), 100);
        assert_eq!(next, Some(FetchCursor::offset(200)));
    }

    #[test]
    fn offset_refuses_foreign_cursor() {
        let page = Page::new(vec![]);
        assert_eq!(OffsetScheme.next_cursor(&page, &FetchCursor::time_window(None, None), 10), None);
    }

    #[test]
    fn full_page_means_more() {
        let page = messages(&[5, 4, 3]);
        assert!(TimeWindowScheme.has_more(&page, 3));
        assert!(!TimeWindowScheme.has_more(&page, 4));
        assert!(!OffsetScheme.has_more(&Page::new(vec![]), 0));
    }

    #[test]
    fn time_window_moves_to_oldest_timestamp() {
        let page = messages(&[900, 700, 800]);
        let prev = FetchCursor::time_window(Some(1_000), Some(100));
        let next = TimeWindowScheme.next_cursor(&page, &prev, 3);
        assert_eq!(next, Some(FetchCursor::time_window(Some(700), Some(100))));
    }

    #[test]
    fn time_window_stops_without_strict_progress() {
        let page = messages(&[1_000, 1_200]);
        let prev = FetchCursor::time_window(Some(1_000), None);
        assert_eq!(TimeWindowScheme.next_cursor(&page, &prev, 2), None);
    }

    #[test]
    fn time_window_stops_without_timestamps() {
        let page = Page::new(vec![]);
        let prev = FetchCursor::time_window(None, None);
        assert_eq!(TimeWindowScheme.next_cursor(&page, &prev, 20), None);
    }

    #[test]
    fn schemes_resolve_per_kind() {
        assert_eq!(scheme_for(ResourceKind::Connections).cursor_scheme(), CursorScheme::Offset);
        assert_eq!(scheme_for(ResourceKind::Messages).cursor_scheme(), CursorScheme::TimeWindow);
    }
}
