//! # Mock Framework & Testing Guide
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are answered from a
//! queue of expectations instead of an actor. It makes client wrappers testable without a
//! running actor or a database.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **Speed** | Instant (in-memory) | Needs storage set up |
//! | **State** | No real state (expectations) | Real reads and writes |
//! | **Use Case** | Logic *around* the client | The repository itself or the full system |
//! | **Error Injection** | Easy (`return_err`) | Hard (requires a broken database) |
//!
//! ## Fluent expectations
//!
//! ```rust,ignore
//! let mut mock = MockClient::<Pizza>::new();
//! mock.expect_get("margherita".to_string()).return_ok(Some(pizza));
//! mock.expect_delete("hawaii".to_string())
//!     .return_err(FrameworkError::NotFound("hawaii".into()));
//!
//! let client = CatalogClient::new(mock.client());
//! // ... exercise the client ...
//! mock.verify(); // every expectation consumed
//! ```
//!
//! Expectations are consumed in order. A request of the wrong kind, or one addressed to a
//! different key, panics the mock task, which the caller observes as
//! [`FrameworkError::ActorDropped`].
//!
//! ## Inspecting requests
//!
//! When the test needs to look at the payload a client sent, use [`create_mock_client`] and
//! the `expect_*` helpers to receive the raw request and answer it by hand.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the canned response for it.
enum Expectation<T: ActorEntity> {
    Create {
        response: Result<T, FrameworkError>,
    },
    Get {
        key: T::Key,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Update {
        key: T::Key,
        response: Result<T, FrameworkError>,
    },
    Delete {
        key: T::Key,
        response: Result<(), FrameworkError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();
                answer(request, expectation);
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::Create { response })
    }

    /// Expects a `get` operation for `key`.
    pub fn expect_get(&mut self, key: T::Key) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { key, response })
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    /// Expects an `update` operation for `key`.
    pub fn expect_update(&mut self, key: T::Key) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { key, response })
    }

    /// Expects a `delete` operation for `key`.
    pub fn expect_delete(&mut self, key: T::Key) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { key, response })
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn builder<R>(
        &self,
        expectation: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            expectation: Box::new(expectation),
            expectations: self.expectations.clone(),
        }
    }
}

/// Builder completing an expectation with its response.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    expectation: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
    expectations: Expectations<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.expectation)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

fn answer<T: ActorEntity>(request: ResourceRequest<T>, expectation: Option<Expectation<T>>) {
    match (request, expectation) {
        (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
            let _ = respond_to.send(response);
        }
        (ResourceRequest::Get { key, respond_to }, Some(Expectation::Get { key: expected, response })) => {
            assert_key(&key, &expected);
            let _ = respond_to.send(response);
        }
        (ResourceRequest::List { respond_to, .. }, Some(Expectation::List { response })) => {
            let _ = respond_to.send(response);
        }
        (
            ResourceRequest::Update { key, respond_to, .. },
            Some(Expectation::Update { key: expected, response }),
        ) => {
            assert_key(&key, &expected);
            let _ = respond_to.send(response);
        }
        (ResourceRequest::Delete { key, respond_to }, Some(Expectation::Delete { key: expected, response })) => {
            assert_key(&key, &expected);
            let _ = respond_to.send(response);
        }
        (request, _) => {
            panic!("Unexpected request or expectation mismatch: {:?}", request);
        }
    }
}

fn assert_key<K: PartialEq + std::fmt::Debug>(actual: &K, expected: &K) {
    assert_eq!(actual, expected, "request addressed to an unexpected key");
}

// =============================================================================
// RAW REQUEST HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// The test plays the actor: it receives each request with one of the `expect_*` helpers,
/// asserts on the payload, and answers through the returned responder.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Key, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { key, respond_to }) => Some((key, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Filter, Response<Vec<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Key, T::Update, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            key,
            update,
            respond_to,
        }) => Some((key, update, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Key, Response<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { key, respond_to }) => Some((key, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Topping {
        name: String,
        vegan: bool,
    }

    #[derive(Debug)]
    struct ToppingCreate {
        name: String,
    }

    impl ActorEntity for Topping {
        type Key = String;
        type Create = ToppingCreate;
        type Update = bool;
        type Filter = ();

        fn key(&self) -> String {
            self.name.clone()
        }
    }

    fn topping(name: &str) -> Topping {
        Topping {
            name: name.to_string(),
            vegan: true,
        }
    }

    #[tokio::test]
    async fn test_raw_mock_client() {
        let (client, mut receiver) = create_mock_client::<Topping>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(ToppingCreate {
                    name: "basil".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.name, "basil");
        responder.send(Ok(topping("basil"))).unwrap();

        let created = create_task.await.unwrap().unwrap();
        assert_eq!(created.key(), "basil");
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Topping>::new();

        mock.expect_create().return_ok(topping("olive"));
        mock.expect_get("olive".to_string())
            .return_ok(Some(topping("olive")));
        mock.expect_list().return_ok(vec![topping("olive")]);
        mock.expect_update("olive".to_string()).return_ok(Topping {
            name: "olive".to_string(),
            vegan: false,
        });
        mock.expect_delete("olive".to_string()).return_ok(());

        let client = mock.client();

        let created = client
            .create(ToppingCreate {
                name: "olive".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.name, "olive");

        let fetched = client.get("olive".to_string()).await.unwrap();
        assert_eq!(fetched, Some(topping("olive")));

        assert_eq!(client.list(()).await.unwrap().len(), 1);

        let updated = client.update("olive".to_string(), false).await.unwrap();
        assert!(!updated.vegan);

        client.delete("olive".to_string()).await.unwrap();

        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_client_error_injection() {
        let mut mock = MockClient::<Topping>::new();
        mock.expect_delete("anchovy".to_string())
            .return_err(FrameworkError::NotFound("anchovy".to_string()));

        let result = mock.client().delete("anchovy".to_string()).await;
        assert!(matches!(result, Err(FrameworkError::NotFound(key)) if key == "anchovy"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_unexpected_request_drops_response() {
        let mock = MockClient::<Topping>::new();

        let result = mock.client().list(()).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
