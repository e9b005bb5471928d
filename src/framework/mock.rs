//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`MockClient`] to script replies in order, or [`create_mock_client`]
//! with the `expect_*` helpers to inspect each request by hand.

use crate::framework::{ActorEntity, FrameworkError, ResourceClient, ResourceRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: ActorEntity> {
    Get(Result<Option<T>, FrameworkError>),
    Create(Result<T::Id, FrameworkError>),
    Delete(Result<(), FrameworkError>),
    Action(Result<T::ActionResult, FrameworkError>),
}

struct Script<T: ActorEntity> {
    expectations: VecDeque<(T::Id, Expectation<T>)>,
    create_expectations: VecDeque<Expectation<T>>,
    actions: Vec<(T::Id, T::Action)>,
    mismatches: Vec<String>,
}

type Shared<T> = Arc<Mutex<Script<T>>>;

fn mismatch<T: ActorEntity, R>(
    script: &Shared<T>,
    respond_to: oneshot::Sender<Result<R, FrameworkError>>,
    what: String,
) {
    let _ = respond_to.send(Err(FrameworkError::Custom(format!("unexpected {what}"))));
    script.lock().unwrap().mismatches.push(what);
}

/// A mock client that answers requests from a queue of scripted replies.
///
/// Requests are matched against expectations in the order they were
/// registered. A request that does not match gets a
/// [`FrameworkError::Custom`] reply and makes [`MockClient::verify`] panic.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Cart>::new();
/// mock.expect_create().return_ok("cart_1".to_string());
/// mock.expect_action("cart_1".to_string()).return_ok(CartActionResult::Quantity(1));
///
/// let client = CartClient::new(mock.client());
/// // Use client in tests...
/// mock.verify();
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    script: Shared<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> MockClient<T> {
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let script: Shared<T> = Arc::new(Mutex::new(Script {
            expectations: VecDeque::new(),
            create_expectations: VecDeque::new(),
            actions: Vec::new(),
            mismatches: Vec::new(),
        }));
        let shared = script.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                match request {
                    ResourceRequest::Create { respond_to, .. } => {
                        let next = shared.lock().unwrap().create_expectations.pop_front();
                        match next {
                            Some(Expectation::Create(response)) => {
                                let _ = respond_to.send(response);
                            }
                            _ => mismatch(&shared, respond_to, "create".to_string()),
                        }
                    }
                    ResourceRequest::Get { id, respond_to } => {
                        let next = pop_for(&shared, &id);
                        match next {
                            Some(Expectation::Get(response)) => {
                                let _ = respond_to.send(response);
                            }
                            _ => mismatch(&shared, respond_to, format!("get {id}")),
                        }
                    }
                    ResourceRequest::Delete { id, respond_to } => {
                        let next = pop_for(&shared, &id);
                        match next {
                            Some(Expectation::Delete(response)) => {
                                let _ = respond_to.send(response);
                            }
                            _ => mismatch(&shared, respond_to, format!("delete {id}")),
                        }
                    }
                    ResourceRequest::Action { id, action, respond_to } => {
                        let next = pop_for(&shared, &id);
                        match next {
                            Some(Expectation::Action(response)) => {
                                shared.lock().unwrap().actions.push((id, action));
                                let _ = respond_to.send(response);
                            }
                            _ => mismatch(&shared, respond_to, format!("action {action:?} on {id}")),
                        }
                    }
                    ResourceRequest::Watch { id, respond_to } => {
                        mismatch(&shared, respond_to, format!("watch {id}"));
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            script,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(self.script.clone(), Some(id), Expectation::Get)
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        ExpectationBuilder::new(self.script.clone(), None, Expectation::Create)
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        ExpectationBuilder::new(self.script.clone(), Some(id), Expectation::Delete)
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        ExpectationBuilder::new(self.script.clone(), Some(id), Expectation::Action)
    }

    /// Actions received so far, in arrival order.
    pub fn received_actions(&self) -> Vec<(T::Id, T::Action)>
    where
        T::Action: Clone,
    {
        self.script.lock().unwrap().actions.clone()
    }

    /// Panics unless every expectation was consumed and nothing unexpected arrived.
    pub fn verify(&self) {
        let script = self.script.lock().unwrap();
        if !script.mismatches.is_empty() {
            panic!("Unexpected requests: {:?}", script.mismatches);
        }
        let remaining = script.expectations.len() + script.create_expectations.len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Pops the next id-addressed expectation if it is for `id`.
fn pop_for<T: ActorEntity>(script: &Shared<T>, id: &T::Id) -> Option<Expectation<T>> {
    let mut script = script.lock().unwrap();
    let is_next = script
        .expectations
        .front()
        .is_some_and(|(expected, _)| expected == id);
    if is_next {
        script.expectations.pop_front().map(|(_, e)| e)
    } else {
        None
    }
}

/// Builder returned by the `expect_*` methods of [`MockClient`].
pub struct ExpectationBuilder<T: ActorEntity, R> {
    script: Shared<T>,
    id: Option<T::Id>,
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    fn new(
        script: Shared<T>,
        id: Option<T::Id>,
        wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
    ) -> Self {
        Self { script, id, wrap }
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.wrap)(response);
        let mut script = self.script.lock().unwrap();
        match self.id {
            Some(id) => script.expectations.push_back((id, expectation)),
            None => script.create_expectations.push_back(expectation),
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }
}

// =============================================================================
// MANUAL HELPERS
// =============================================================================

/// Creates a client whose requests land on a receiver the test controls.
///
/// Useful when a test needs to inspect payloads or delay replies; for plain
/// scripted replies prefer [`MockClient`].
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Returns the next request if it is a Create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is a Get.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Returns the next request if it is an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, oneshot::Sender<Result<T::ActionResult, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}
