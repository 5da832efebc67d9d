//! Pagination controller
//!
//! The controller runs as a single tokio task that owns the
//! [`ControllerState`]. Commands from presentation and completions from
//! fetch tasks arrive over channels and are applied one at a time, so state
//! transitions are totally ordered. Every fetch is tagged with the
//! generation current when it was issued; `retry()` bumps the generation and
//! cancels the superseded fetches, and any completion that still arrives from
//! an older generation is dropped.

use super::state::ControllerState;
use super::view::{project, ViewState};
use crate::error::{Error, Result};
use crate::fetcher::PageFetcher;
use crate::resource::{track, Resource};
use crate::types::Page;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Fire-and-forget commands accepted by the controller task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Start,
    LoadNextPage,
    Retry,
}

/// Which transition a fetch completion feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchKind {
    Initial,
    Next,
}

/// One resource update from a fetch task
struct Completion<T> {
    generation: u64,
    kind: FetchKind,
    page: u32,
    resource: Resource<Page<T>>,
}

/// Handle to a running pagination controller.
///
/// Cloning the handle shares the same controller. The controller task stops
/// (and cancels outstanding fetches) once every handle is dropped.
#[derive(Debug, Clone)]
pub struct PaginationController<T> {
    commands: mpsc::UnboundedSender<Command>,
    view: watch::Receiver<ViewState<T>>,
}

impl<T> PaginationController<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawn a controller over the given fetcher and start loading page 1.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn<F>(fetcher: F) -> Self
    where
        F: PageFetcher<Item = T>,
    {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(ViewState::Loading);

        tokio::spawn(ControllerTask::new(fetcher, command_rx, view_tx).run());

        let controller = Self {
            commands: command_tx,
            view: view_rx,
        };
        controller.start();
        controller
    }

    /// Request page 1. Only the first call has an effect.
    pub fn start(&self) {
        self.send(Command::Start);
    }

    /// Request the next page if allowed
    pub fn load_next_page(&self) {
        self.send(Command::LoadNextPage);
    }

    /// Drop everything loaded so far and start over from page 1
    pub fn retry(&self) {
        self.send(Command::Retry);
    }

    /// Latest published view
    pub fn view(&self) -> ViewState<T> {
        self.view.borrow().clone()
    }

    /// Subscribe to view updates.
    ///
    /// The current view counts as seen, so `changed()` only resolves on the
    /// next publication.
    pub fn subscribe(&self) -> watch::Receiver<ViewState<T>> {
        let mut rx = self.view.clone();
        rx.borrow_and_update();
        rx
    }

    /// Wait until the published view satisfies `predicate`
    pub async fn wait_for(
        &self,
        mut predicate: impl FnMut(&ViewState<T>) -> bool,
    ) -> Result<ViewState<T>> {
        let mut rx = self.subscribe();
        let view = rx
            .wait_for(|view| predicate(view))
            .await
            .map_err(|_| Error::Other("pagination controller stopped".to_string()))?;
        Ok(view.clone())
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            warn!(?command, "Pagination controller stopped, command dropped");
        }
    }
}

/// The task owning the controller state
struct ControllerTask<F: PageFetcher> {
    fetcher: Arc<F>,
    state: ControllerState<F::Item>,
    started: bool,
    generation: u64,
    cancel: CancellationToken,
    commands: mpsc::UnboundedReceiver<Command>,
    completion_tx: mpsc::UnboundedSender<Completion<F::Item>>,
    completions: mpsc::UnboundedReceiver<Completion<F::Item>>,
    view: watch::Sender<ViewState<F::Item>>,
}

impl<F: PageFetcher> ControllerTask<F> {
    fn new(
        fetcher: F,
        commands: mpsc::UnboundedReceiver<Command>,
        view: watch::Sender<ViewState<F::Item>>,
    ) -> Self {
        let (completion_tx, completions) = mpsc::unbounded_channel();
        Self {
            fetcher: Arc::new(fetcher),
            state: ControllerState::new(),
            started: false,
            generation: 0,
            cancel: CancellationToken::new(),
            commands,
            completion_tx,
            completions,
            view,
        }
    }

    async fn run(mut self) {
        loop {
            tokio::select! {
                // Commands first: a command sent before a completion was
                // produced is always applied before that completion.
                biased;

                command = self.commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(completion) = self.completions.recv() => self.handle_completion(completion),
            }
        }

        self.cancel.cancel();
        debug!("Pagination controller stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Start => {
                if self.started {
                    debug!("Controller already started");
                    return;
                }
                self.started = true;
                self.request_first_page();
            }
            Command::LoadNextPage => match self.state.begin_next_page() {
                Some(page) => {
                    debug!(page, "Loading next page");
                    self.publish();
                    self.spawn_fetch(page, FetchKind::Next);
                }
                None => debug!(
                    loading_more = self.state.is_loading_more(),
                    phase = ?self.state.phase(),
                    current_page = self.state.current_page(),
                    total_pages = self.state.total_pages(),
                    "Next page request ignored"
                ),
            },
            Command::Retry => {
                info!(generation = self.generation + 1, "Retrying from page 1");
                self.cancel.cancel();
                self.cancel = CancellationToken::new();
                self.generation += 1;
                self.state.reset();
                self.started = true;
                self.request_first_page();
            }
        }
    }

    fn handle_completion(&mut self, completion: Completion<F::Item>) {
        let Completion {
            generation,
            kind,
            page,
            resource,
        } = completion;

        if generation != self.generation {
            debug!(
                page,
                generation,
                current = self.generation,
                "Discarding stale fetch result"
            );
            return;
        }

        match (kind, resource) {
            (_, Resource::Loading) => {
                debug!(page, "Fetch in flight");
                return;
            }
            (FetchKind::Initial, Resource::Success(result)) => {
                info!(
                    items = result.len(),
                    total_pages = result.total_pages,
                    "First page loaded"
                );
                self.state.apply_first_page(result);
            }
            (FetchKind::Initial, Resource::Error { message, cause }) => {
                let kind = cause.as_deref().and_then(Error::fetch_kind);
                warn!(%message, ?kind, "First page failed");
                self.state.fail_initial(message);
            }
            (FetchKind::Next, Resource::Success(result)) => {
                debug!(
                    page = result.page_number,
                    items = result.len(),
                    "Next page loaded"
                );
                self.state.apply_next_page(result);
            }
            (FetchKind::Next, Resource::Error { message, cause }) => {
                let kind = cause.as_deref().and_then(Error::fetch_kind);
                warn!(page, %message, ?kind, "Next page failed, keeping loaded items");
                self.state.abandon_next_page();
            }
        }

        self.publish();
    }

    fn request_first_page(&mut self) {
        self.state.begin_initial();
        self.publish();
        self.spawn_fetch(1, FetchKind::Initial);
    }

    fn spawn_fetch(&self, page: u32, kind: FetchKind) {
        let fetcher = Arc::clone(&self.fetcher);
        let completions = self.completion_tx.clone();
        let cancel = self.cancel.clone();
        let generation = self.generation;

        tokio::spawn(async move {
            let updates = track(async move { fetcher.fetch_page(page).await });
            tokio::pin!(updates);

            loop {
                let resource = tokio::select! {
                    () = cancel.cancelled() => {
                        debug!(page, generation, "Fetch cancelled");
                        return;
                    }
                    next = updates.next() => match next {
                        Some(resource) => resource,
                        None => return,
                    },
                };

                let completion = Completion {
                    generation,
                    kind,
                    page,
                    resource,
                };
                if completions.send(completion).is_err() {
                    return;
                }
            }
        });
    }

    fn publish(&self) {
        self.view.send_replace(project(&self.state));
    }
}
