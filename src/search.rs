use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use tracing::{debug, info, warn};

use crate::api::{ApiClient, SearchError, SearchHit, SearchKind};
use crate::term::SearchTerm;


pub type SearchResult = Result<SearchHit, SearchError>;

/// One background search. The worker owns the sending half; when the
/// receiver is dropped (superseded or reset), the send fails and the late
/// result is discarded on the worker's side.
struct Searcher {
    rx: Receiver<SearchResult>,
}

impl Searcher {
    fn spawn(job: impl FnOnce() -> SearchResult + Send + 'static) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(job());
        });
        Self { rx }
    }
}

pub enum SearchPoll {
    /// No search in flight.
    Idle,
    /// A search is in flight but has not completed.
    Pending,
    /// The most recently submitted search completed.
    Finished {
        kind: SearchKind,
        term: String,
        result: SearchResult,
    },
}

/// Owns at most one live search. Submitting replaces the previous one, so
/// ordering on the result surface is "last initiated wins": a slow earlier
/// response can never overwrite a newer search's outcome.
pub struct SearchController {
    client: ApiClient,
    active: Option<ActiveSearch>,
    submissions: u64,
}

struct ActiveSearch {
    kind: SearchKind,
    term: String,
    seq: u64,
    searcher: Searcher,
}

impl SearchController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            active: None,
            submissions: 0,
        }
    }

    pub fn submit(&mut self, kind: SearchKind, term: SearchTerm) {
        let client = self.client.clone();
        let display = term.as_str().to_string();
        self.submit_with(kind, display, move || client.search(kind, &term));
    }

    pub(crate) fn submit_with(
        &mut self,
        kind: SearchKind,
        term: String,
        job: impl FnOnce() -> SearchResult + Send + 'static,
    ) {
        if let Some(prev) = self.active.take() {
            debug!(seq = prev.seq, term = %prev.term, "Superseding in-flight search");
        }
        self.submissions += 1;
        let seq = self.submissions;
        info!(seq, %kind, %term, "Spawning search worker");
        self.active = Some(ActiveSearch {
            kind,
            term,
            seq,
            searcher: Searcher::spawn(job),
        });
    }

    /// Drops any in-flight search without waiting for it. Used on tab switch.
    pub fn reset(&mut self) {
        if let Some(prev) = self.active.take() {
            debug!(seq = prev.seq, term = %prev.term, "Discarding in-flight search");
        }
    }

    pub fn is_pending(&self) -> bool {
        self.active.is_some()
    }

    pub fn poll(&mut self) -> SearchPoll {
        let result = match &self.active {
            None => return SearchPoll::Idle,
            Some(active) => match active.searcher.rx.try_recv() {
                Err(TryRecvError::Empty) => return SearchPoll::Pending,
                Ok(result) => result,
                Err(TryRecvError::Disconnected) => {
                    // The worker died without sending anything.
                    warn!("Search worker disappeared; reporting transport error");
                    Err(SearchError::Transport)
                }
            },
        };

        match self.active.take() {
            Some(ActiveSearch {
                kind, term, seq, ..
            }) => {
                match &result {
                    Ok(hit) => info!(seq, %kind, %term, hit_kind = %hit.kind(), "Search finished"),
                    Err(e) => debug!(seq, %kind, %term, error = %e, "Search finished with error"),
                }
                SearchPoll::Finished { kind, term, result }
            }
            None => SearchPoll::Idle,
        }
    }
}
