//! Tests for PaginationController
//!
//! A gated fetcher hands every request to the test, which decides when and
//! how it completes.

use super::*;
use crate::error::{Error, Result};
use crate::fetcher::PageFetcher;
use crate::types::Page;
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

type Responder = oneshot::Sender<Result<Page<u32>>>;

struct GatedFetcher {
    requests: mpsc::UnboundedSender<(u32, Responder)>,
}

#[async_trait]
impl PageFetcher for GatedFetcher {
    type Item = u32;

    async fn fetch_page(&self, page: u32) -> Result<Page<u32>> {
        let (tx, rx) = oneshot::channel();
        self.requests
            .send((page, tx))
            .map_err(|_| Error::unknown("test harness gone"))?;
        rx.await
            .unwrap_or_else(|_| Err(Error::unknown("responder dropped")))
    }
}

struct Harness {
    controller: PaginationController<u32>,
    requests: mpsc::UnboundedReceiver<(u32, Responder)>,
}

impl Harness {
    fn spawn() -> Self {
        let (tx, requests) = mpsc::unbounded_channel();
        let controller = PaginationController::spawn(GatedFetcher { requests: tx });
        Self {
            controller,
            requests,
        }
    }

    /// Next request the controller issued
    async fn request(&mut self) -> (u32, Responder) {
        within(self.requests.recv())
            .await
            .expect("fetcher channel closed")
    }

    /// Assert no request is pending right now
    fn assert_no_request(&mut self) {
        assert!(
            self.requests.try_recv().is_err(),
            "unexpected extra fetch request"
        );
    }

    async fn wait_for(&self, predicate: impl FnMut(&ViewState<u32>) -> bool) -> ViewState<u32> {
        within(self.controller.wait_for(predicate)).await.unwrap()
    }

    /// Scenario 1: first page of 20 items out of 5 pages
    async fn load_first_page(&mut self) -> ViewState<u32> {
        let (page, responder) = self.request().await;
        assert_eq!(page, 1);
        responder.send(Ok(items_page(0, 1, 5))).unwrap();
        self.wait_for(ViewState::is_success).await
    }

    /// Request and complete the next page successfully
    async fn load_page(&mut self, expected: u32) -> ViewState<u32> {
        self.controller.load_next_page();
        let (page, responder) = self.request().await;
        assert_eq!(page, expected);
        responder
            .send(Ok(items_page((expected - 1) * 20, expected, 5)))
            .unwrap();
        self.wait_for(|v| v.current_page() == Some(expected) && !v.is_loading_more())
            .await
    }
}

async fn within<F: Future>(fut: F) -> F::Output {
    tokio::time::timeout(Duration::from_secs(5), fut)
        .await
        .expect("timed out waiting")
}

fn items_page(first: u32, page_number: u32, total_pages: u32) -> Page<u32> {
    Page::new((first..first + 20).collect(), page_number, total_pages, 100)
}

#[tokio::test]
async fn test_starts_in_loading_and_requests_page_one() {
    let mut harness = Harness::spawn();
    assert!(harness.controller.view().is_loading());

    let (page, _responder) = harness.request().await;
    assert_eq!(page, 1);
    assert!(harness.controller.view().is_loading());
}

#[tokio::test]
async fn test_first_page_success() {
    let mut harness = Harness::spawn();
    let view = harness.load_first_page().await;

    assert_eq!(view.items().len(), 20);
    assert!(view.has_more_pages());
    assert_eq!(view.current_page(), Some(1));
    assert_eq!(view.total_pages(), Some(5));
    assert!(!view.is_loading_more());
}

#[tokio::test]
async fn test_start_is_idempotent() {
    let mut harness = Harness::spawn();
    harness.controller.start();
    harness.controller.start();

    harness.load_first_page().await;
    harness.assert_no_request();
}

#[tokio::test]
async fn test_next_page_appends() {
    let mut harness = Harness::spawn();
    harness.load_first_page().await;

    let view = harness.load_page(2).await;
    assert_eq!(view.items().len(), 40);
    assert_eq!(view.current_page(), Some(2));
    assert!(view.has_more_pages());
    let expected: Vec<u32> = (0..40).collect();
    assert_eq!(view.items(), expected.as_slice());
}

#[tokio::test]
async fn test_loading_more_is_published_before_completion() {
    let mut harness = Harness::spawn();
    harness.load_first_page().await;

    harness.controller.load_next_page();
    let (_page, responder) = harness.request().await;
    let view = harness.controller.view();
    assert!(view.is_loading_more());
    assert_eq!(view.items().len(), 20);
    drop(responder);
}

#[tokio::test]
async fn test_rapid_requests_issue_one_fetch() {
    let mut harness = Harness::spawn();
    harness.load_first_page().await;
    harness.load_page(2).await;

    harness.controller.load_next_page();
    harness.controller.load_next_page();
    harness.controller.load_next_page();

    let (page, responder) = harness.request().await;
    assert_eq!(page, 3);
    responder.send(Ok(items_page(40, 3, 5))).unwrap();

    let view = harness
        .wait_for(|v| v.current_page() == Some(3) && !v.is_loading_more())
        .await;
    assert_eq!(view.items().len(), 60);
    harness.assert_no_request();
}

#[tokio::test]
async fn test_next_page_error_is_absorbed() {
    let mut harness = Harness::spawn();
    harness.load_first_page().await;
    harness.load_page(2).await;

    harness.controller.load_next_page();
    let (page, responder) = harness.request().await;
    assert_eq!(page, 3);
    responder
        .send(Err(Error::http_status(500, "server exploded")))
        .unwrap();

    let view = harness.wait_for(|v| !v.is_loading_more()).await;
    assert!(view.is_success());
    assert_eq!(view.items().len(), 40);
    assert_eq!(view.current_page(), Some(2));
    assert_eq!(view.total_pages(), Some(5));
    assert!(view.has_more_pages());
    assert!(view.error_message().is_none());

    // Scrolling again asks for the same page
    harness.controller.load_next_page();
    let (page, _responder) = harness.request().await;
    assert_eq!(page, 3);
}

#[tokio::test]
async fn test_no_request_past_last_page() {
    let mut harness = Harness::spawn();
    let (_, responder) = harness.request().await;
    responder.send(Ok(items_page(0, 1, 2))).unwrap();
    harness.wait_for(ViewState::is_success).await;

    harness.controller.load_next_page();
    let (page, responder) = harness.request().await;
    assert_eq!(page, 2);
    responder.send(Ok(items_page(20, 2, 2))).unwrap();
    let view = harness.wait_for(|v| v.current_page() == Some(2)).await;
    assert!(!view.has_more_pages());

    harness.controller.load_next_page();
    harness.controller.load_next_page();
    // Round-trip through the task so the commands above are processed
    harness.controller.retry();
    let (page, _responder) = harness.request().await;
    assert_eq!(page, 1);
    harness.assert_no_request();
}

#[tokio::test]
async fn test_next_page_ignored_while_loading_first() {
    let mut harness = Harness::spawn();
    harness.controller.load_next_page();

    let (page, responder) = harness.request().await;
    assert_eq!(page, 1);
    responder.send(Ok(items_page(0, 1, 5))).unwrap();
    harness.wait_for(ViewState::is_success).await;
    harness.assert_no_request();
}

#[tokio::test]
async fn test_first_page_connectivity_error() {
    let mut harness = Harness::spawn();
    let (_, responder) = harness.request().await;
    responder
        .send(Err(Error::connectivity("dns lookup failed")))
        .unwrap();

    let view = harness.wait_for(|v| v.error_message().is_some()).await;
    assert!(view.error_message().unwrap().contains("network"));
    assert!(view.items().is_empty());

    // Incremental loading is not possible from the error state
    harness.controller.load_next_page();
    harness.controller.retry();
    let (page, _responder) = harness.request().await;
    assert_eq!(page, 1);
    harness.assert_no_request();
}

#[tokio::test]
async fn test_retry_after_error_recovers() {
    let mut harness = Harness::spawn();
    let (_, responder) = harness.request().await;
    responder
        .send(Err(Error::connectivity("unreachable")))
        .unwrap();
    harness.wait_for(|v| v.error_message().is_some()).await;

    harness.controller.retry();
    let view = harness.load_first_page().await;
    assert_eq!(view.items().len(), 20);
    assert_eq!(view.current_page(), Some(1));
}

#[tokio::test]
async fn test_retry_from_success_matches_fresh_start() {
    let mut harness = Harness::spawn();
    harness.load_first_page().await;
    harness.load_page(2).await;

    let mut updates = harness.controller.subscribe();
    harness.controller.retry();

    // Retry publishes Loading, exactly like a fresh controller
    within(updates.changed()).await.unwrap();
    assert!(updates.borrow_and_update().is_loading());

    let view = harness.load_first_page().await;
    let mut fresh = Harness::spawn();
    let fresh_view = fresh.load_first_page().await;
    assert_eq!(view, fresh_view);
}

#[tokio::test]
async fn test_subscribe_waits_for_next_publication() {
    let mut harness = Harness::spawn();
    harness.load_first_page().await;

    let mut updates = harness.controller.subscribe();
    assert!(!updates.has_changed().unwrap());
    assert!(updates.borrow().is_success());

    harness.controller.load_next_page();
    within(updates.changed()).await.unwrap();
    assert!(updates.borrow_and_update().is_loading_more());
    let (page, _responder) = harness.request().await;
    assert_eq!(page, 2);
}

#[tokio::test]
async fn test_retry_discards_stale_first_page() {
    let mut harness = Harness::spawn();
    let (_, stale) = harness.request().await;

    harness.controller.retry();
    let (page, fresh) = harness.request().await;
    assert_eq!(page, 1);

    // The superseded fetch is cancelled
    let mut stale = stale;
    within(stale.closed()).await;
    assert!(stale.send(Ok(items_page(500, 1, 9))).is_err());

    fresh.send(Ok(items_page(0, 1, 5))).unwrap();
    let view = harness.wait_for(ViewState::is_success).await;
    assert_eq!(view.items().first(), Some(&0));
    assert_eq!(view.total_pages(), Some(5));
}

#[tokio::test]
async fn test_retry_discards_outstanding_next_page() {
    let mut harness = Harness::spawn();
    harness.load_first_page().await;

    harness.controller.load_next_page();
    let (page, mut stale) = harness.request().await;
    assert_eq!(page, 2);

    harness.controller.retry();
    let (page, fresh) = harness.request().await;
    assert_eq!(page, 1);
    within(stale.closed()).await;

    fresh.send(Ok(items_page(0, 1, 5))).unwrap();
    let view = harness.wait_for(ViewState::is_success).await;
    assert_eq!(view.items().len(), 20);
    assert!(!view.is_loading_more());
}

#[tokio::test]
async fn test_scroll_trigger_drives_loading() {
    let mut harness = Harness::spawn();
    harness.load_first_page().await;
    let trigger = ScrollTrigger::default();

    // Far from the end: nothing happens
    assert!(!trigger.on_scroll(&harness.controller, Some(5)));

    assert!(trigger.on_scroll(&harness.controller, Some(18)));
    let (page, responder) = harness.request().await;
    assert_eq!(page, 2);

    // Still near the end while loading: the signal is off
    harness.wait_for(ViewState::is_loading_more).await;
    assert!(!trigger.on_scroll(&harness.controller, Some(19)));

    responder.send(Ok(items_page(20, 2, 5))).unwrap();
    harness
        .wait_for(|v| v.current_page() == Some(2) && !v.is_loading_more())
        .await;
    harness.assert_no_request();
}

#[tokio::test]
async fn test_controller_stops_when_handles_dropped() {
    let Harness {
        controller,
        mut requests,
    } = Harness::spawn();
    let (_, mut responder) = within(requests.recv()).await.unwrap();

    drop(controller);
    within(responder.closed()).await;
}
