use crate::error::ApiError;
use crate::operations::{CacheKey, CacheTag};
use futures::channel::oneshot;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;

type FetchResult = Result<Value, ApiError>;

/// Content-addressed store for read operations, owned by the client and
/// injected into the view layer alongside it. Single-threaded by design:
/// the UI runtime is cooperative, so interior mutability is a `RefCell`.
///
/// Contract:
/// - entries are keyed by operation name + canonical argument JSON;
/// - a read that finds an in-flight entry shares its result instead of
///   issuing a second request;
/// - only successes are stored, so a failed fetch leaves the next consumer
///   free to refetch;
/// - `invalidate` evicts every ready entry under a tag and bumps the tag
///   generation, so an in-flight fetch that started before the invalidation
///   still answers its waiters but is not stored.
#[derive(Default)]
pub struct QueryCache {
    entries: RefCell<HashMap<CacheKey, Entry>>,
    generations: RefCell<HashMap<CacheTag, u64>>,
}

struct Entry {
    tag: CacheTag,
    state: EntryState,
}

enum EntryState {
    InFlight {
        generation: u64,
        waiters: Vec<oneshot::Sender<FetchResult>>,
    },
    Ready(Value),
}

/// Outcome of a cache lookup. `Miss` hands back a ticket the caller must
/// settle with [`QueryCache::complete`] once the network answers.
pub enum Lookup {
    Hit(Value),
    Wait(oneshot::Receiver<FetchResult>),
    Miss(FetchTicket),
}

pub struct FetchTicket {
    key: CacheKey,
    tag: CacheTag,
    generation: u64,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, key: &CacheKey, tag: CacheTag) -> Lookup {
        let mut entries = self.entries.borrow_mut();
        match entries.get_mut(key) {
            Some(entry) => match &mut entry.state {
                EntryState::Ready(value) => Lookup::Hit(value.clone()),
                EntryState::InFlight { waiters, .. } => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push(tx);
                    Lookup::Wait(rx)
                }
            },
            None => {
                let generation = self.generation(tag);
                entries.insert(
                    key.clone(),
                    Entry {
                        tag,
                        state: EntryState::InFlight {
                            generation,
                            waiters: Vec::new(),
                        },
                    },
                );
                Lookup::Miss(FetchTicket {
                    key: key.clone(),
                    tag,
                    generation,
                })
            }
        }
    }

    /// Settle a miss: fan the result out to every waiter and store it when it
    /// is a success from the current generation. A waiter whose receiver was
    /// dropped (component unmounted) is skipped silently.
    pub fn complete(&self, ticket: FetchTicket, result: FetchResult) {
        let waiters = match self.entries.borrow_mut().remove(&ticket.key) {
            Some(Entry {
                state: EntryState::InFlight { waiters, .. },
                ..
            }) => waiters,
            _ => Vec::new(),
        };

        for waiter in waiters {
            let _ = waiter.send(result.clone());
        }

        if let Ok(value) = result {
            if self.generation(ticket.tag) == ticket.generation {
                self.entries.borrow_mut().insert(
                    ticket.key,
                    Entry {
                        tag: ticket.tag,
                        state: EntryState::Ready(value),
                    },
                );
            }
        }
    }

    /// Evict every ready entry under the tag. In-flight entries stay so their
    /// waiters still get answered, but the generation bump keeps their late
    /// results out of the store.
    pub fn invalidate(&self, tag: CacheTag) {
        *self.generations.borrow_mut().entry(tag).or_insert(0) += 1;
        self.entries
            .borrow_mut()
            .retain(|_, entry| entry.tag != tag || matches!(entry.state, EntryState::InFlight { .. }));
    }

    fn generation(&self, tag: CacheTag) -> u64 {
        self.generations.borrow().get(&tag).copied().unwrap_or(0)
    }
}

/// Render state of one query as seen by a consuming view.
/// No transition out of `Error` except a fresh mount or a manual refetch.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryState<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> QueryState<T> {
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => QueryState::Success(value),
            Err(err) => QueryState::Error(err.to_string()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Idle | QueryState::Loading)
    }
}
