use crate::cache::{Lookup, QueryCache};
use crate::error::ApiError;
use crate::lead::{Lead, RegisterLeadInput};
use crate::operations::{self, CacheTag, Operation};
use crate::transport::GraphqlTransport;
use serde::de::DeserializeOwned;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:4000/graphql";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
}

impl ClientConfig {
    /// Build-time override via GRAPHQL_ENDPOINT, otherwise the fixed local
    /// endpoint the service runs on.
    pub fn from_env() -> Self {
        Self {
            endpoint: option_env!("GRAPHQL_ENDPOINT")
                .unwrap_or(DEFAULT_ENDPOINT)
                .to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// Typed surface over the three remote operations. Owns the query cache, so
/// one client instance shared through the view tree is the process-wide
/// cache store.
pub struct LeadClient<T> {
    transport: T,
    cache: QueryCache,
}

impl<T: GraphqlTransport> LeadClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            cache: QueryCache::new(),
        }
    }

    pub async fn leads(&self) -> Result<Vec<Lead>, ApiError> {
        self.cached(operations::leads()).await
    }

    pub async fn lead(&self, id: i64) -> Result<Option<Lead>, ApiError> {
        self.cached(operations::lead(id)).await
    }

    /// Issue the register mutation. Mutations bypass the cache; a success
    /// invalidates the whole lead namespace so the next read-all refetches.
    pub async fn register(&self, input: &RegisterLeadInput) -> Result<Lead, ApiError> {
        let op = operations::register(input);
        let body = self.transport.execute(op.document, &op.variables).await?;
        let created = op.decode(body)?;
        self.cache.invalidate(op.tag);
        Ok(created)
    }

    /// Manual refetch trigger for the dashboard refresh control.
    pub async fn refetch_leads(&self) -> Result<Vec<Lead>, ApiError> {
        self.cache.invalidate(CacheTag::Lead);
        self.leads().await
    }

    async fn cached<O: DeserializeOwned>(&self, op: Operation<O>) -> Result<O, ApiError> {
        match self.cache.lookup(&op.cache_key(), op.tag) {
            Lookup::Hit(value) => op.typed(value),
            Lookup::Wait(rx) => {
                let result = rx.await.map_err(|_| ApiError::Cancelled)?;
                op.typed(result?)
            }
            Lookup::Miss(ticket) => {
                let result = match self.transport.execute(op.document, &op.variables).await {
                    Ok(body) => op.project(body),
                    Err(err) => Err(err),
                };
                self.cache.complete(ticket, result.clone());
                op.typed(result?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::ServiceTag;
    use futures::channel::oneshot;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use serde_json::{json, Value};
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct MockTransport {
        inner: Rc<MockInner>,
    }

    #[derive(Default)]
    struct MockInner {
        calls: RefCell<Vec<(String, Value)>>,
        queued: RefCell<VecDeque<Result<Value, ApiError>>>,
        pending: RefCell<Vec<oneshot::Sender<Result<Value, ApiError>>>>,
        gated: Cell<bool>,
    }

    impl MockTransport {
        fn queue(&self, result: Result<Value, ApiError>) {
            self.inner.queued.borrow_mut().push_back(result);
        }

        fn gate(&self) {
            self.inner.gated.set(true);
        }

        fn release(&self, result: Result<Value, ApiError>) {
            for tx in self.inner.pending.borrow_mut().drain(..) {
                let _ = tx.send(result.clone());
            }
        }

        fn calls(&self) -> Vec<(String, Value)> {
            self.inner.calls.borrow().clone()
        }
    }

    impl GraphqlTransport for MockTransport {
        async fn execute(&self, document: &str, variables: &Value) -> Result<Value, ApiError> {
            self.inner
                .calls
                .borrow_mut()
                .push((document.to_string(), variables.clone()));

            if self.inner.gated.get() {
                let (tx, rx) = oneshot::channel();
                self.inner.pending.borrow_mut().push(tx);
                return rx.await.map_err(|_| ApiError::Cancelled)?;
            }

            self.inner
                .queued
                .borrow_mut()
                .pop_front()
                .expect("unexpected request")
        }
    }

    fn lead_json(id: i64, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "email": "jane@x.com",
            "mobile": "0400000000",
            "postcode": "2000",
            "services": ["DELIVERY", "PAYMENT"],
            "createdAt": "2024-05-01T09:30:00Z",
            "updatedAt": "2024-05-01T09:30:00Z"
        })
    }

    fn leads_body(leads: Vec<Value>) -> Value {
        json!({ "data": { "leads": leads } })
    }

    fn jane_input() -> RegisterLeadInput {
        RegisterLeadInput {
            name: "Jane Doe".into(),
            email: "jane@x.com".into(),
            mobile: "0400000000".into(),
            postcode: "2000".into(),
            services: vec![ServiceTag::Delivery, ServiceTag::Payment],
        }
    }

    #[test]
    fn repeated_read_all_hits_the_cache() {
        let transport = MockTransport::default();
        transport.queue(Ok(leads_body(vec![lead_json(1, "Jane Doe")])));
        let handle = transport.clone();
        let client = LeadClient::new(transport);

        let first = block_on(client.leads()).expect("first read");
        let second = block_on(client.leads()).expect("second read");

        assert_eq!(first, second);
        assert_eq!(handle.calls().len(), 1);
    }

    #[test]
    fn register_sends_exact_field_values() {
        let transport = MockTransport::default();
        transport.queue(Ok(json!({ "data": { "register": lead_json(9, "Jane Doe") } })));
        let handle = transport.clone();
        let client = LeadClient::new(transport);

        let created = block_on(client.register(&jane_input())).expect("register");
        assert_eq!(created.id, 9);

        let calls = handle.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].1,
            json!({
                "input": {
                    "name": "Jane Doe",
                    "email": "jane@x.com",
                    "mobile": "0400000000",
                    "postcode": "2000",
                    "services": ["DELIVERY", "PAYMENT"]
                }
            })
        );
    }

    #[test]
    fn successful_register_invalidates_read_all() {
        let transport = MockTransport::default();
        transport.queue(Ok(leads_body(vec![lead_json(1, "Jane Doe")])));
        transport.queue(Ok(json!({ "data": { "register": lead_json(2, "John Roe") } })));
        transport.queue(Ok(leads_body(vec![
            lead_json(1, "Jane Doe"),
            lead_json(2, "John Roe"),
        ])));
        let handle = transport.clone();
        let client = LeadClient::new(transport);

        assert_eq!(block_on(client.leads()).expect("initial").len(), 1);
        block_on(client.register(&jane_input())).expect("register");

        let after = block_on(client.leads()).expect("after register");
        assert_eq!(after.len(), 2);
        assert_eq!(handle.calls().len(), 3);
    }

    #[test]
    fn failed_register_leaves_cache_untouched() {
        let transport = MockTransport::default();
        transport.queue(Ok(leads_body(vec![lead_json(1, "Jane Doe")])));
        transport.queue(Err(ApiError::Transport("down".into())));
        let handle = transport.clone();
        let client = LeadClient::new(transport);

        block_on(client.leads()).expect("initial");
        block_on(client.register(&jane_input())).expect_err("must fail");

        // Still served from cache: no third request.
        block_on(client.leads()).expect("cached");
        assert_eq!(handle.calls().len(), 2);
    }

    #[test]
    fn missing_lead_is_ok_none() {
        let transport = MockTransport::default();
        transport.queue(Ok(json!({ "data": { "lead": null } })));
        let client = LeadClient::new(transport);

        let found = block_on(client.lead(999_999)).expect("query succeeds");
        assert_eq!(found, None);
    }

    #[test]
    fn read_errors_are_not_cached() {
        let transport = MockTransport::default();
        transport.queue(Ok(json!({ "errors": [{ "message": "boom" }] })));
        transport.queue(Ok(leads_body(vec![lead_json(1, "Jane Doe")])));
        let handle = transport.clone();
        let client = LeadClient::new(transport);

        block_on(client.leads()).expect_err("first read fails");
        let recovered = block_on(client.leads()).expect("second read refetches");

        assert_eq!(recovered.len(), 1);
        assert_eq!(handle.calls().len(), 2);
    }

    #[test]
    fn concurrent_read_alls_share_one_request() {
        let transport = MockTransport::default();
        transport.gate();
        let handle = transport.clone();
        let client = Rc::new(LeadClient::new(transport));

        let mut pool = LocalPool::new();
        let spawner = pool.spawner();

        let first = {
            let client = client.clone();
            spawner
                .spawn_local_with_handle(async move { client.leads().await })
                .expect("spawn first")
        };
        let second = {
            let client = client.clone();
            spawner
                .spawn_local_with_handle(async move { client.leads().await })
                .expect("spawn second")
        };

        pool.run_until_stalled();
        assert_eq!(handle.calls().len(), 1);

        handle.release(Ok(leads_body(vec![lead_json(1, "Jane Doe")])));

        let a = pool.run_until(first).expect("first result");
        let b = pool.run_until(second).expect("second result");
        assert_eq!(a, b);
        assert_eq!(handle.calls().len(), 1);
    }

    #[test]
    fn refetch_leads_forces_a_fresh_request() {
        let transport = MockTransport::default();
        transport.queue(Ok(leads_body(vec![lead_json(1, "Jane Doe")])));
        transport.queue(Ok(leads_body(vec![])));
        let handle = transport.clone();
        let client = LeadClient::new(transport);

        block_on(client.leads()).expect("initial");
        let refreshed = block_on(client.refetch_leads()).expect("refetch");

        assert!(refreshed.is_empty());
        assert_eq!(handle.calls().len(), 2);
    }

    #[test]
    fn config_defaults_to_the_local_endpoint() {
        assert_eq!(ClientConfig::default().endpoint, DEFAULT_ENDPOINT);
    }
}
