//! # Core Actor Framework
//!
//! Generic building blocks for owning state inside a single Tokio task.
//!
//! ## Key Types
//!
//! - [`ActorEntity`]: The trait a resource type implements to be hosted.
//! - [`ResourceActor`]: The task that owns every entity of one type.
//! - [`ResourceClient`]: The cloneable handle callers talk to.
//! - [`FrameworkError`]: Transport-level failures (ActorClosed, NotFound, ...).

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any resource entity must implement to be managed by [`ResourceActor`].
///
/// # Architecture Note
/// The actor loop is written once against this contract. Associated types pin
/// down which payloads belong to which resource, so a cart action can never be
/// sent to some other resource's actor.
///
/// Entities are `PartialEq` so the actor can tell whether an action actually
/// changed anything before publishing a new snapshot to watchers.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they may call other actors. `Context` is handed
/// to [`ResourceActor::run`] rather than to the constructor, which lets
/// dependencies be wired after every actor has been created.
#[async_trait]
pub trait ActorEntity: Clone + PartialEq + Send + Sync + 'static {
    /// The unique identifier for this entity.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type CreateParams: Send + Sync + Debug;

    /// Resource-specific operations.
    type Action: Send + Sync + Debug;

    /// The result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into every hook. Use `()` if none are needed.
    type Context: Send + Sync;

    /// Construct the entity from its freshly allocated id and the payload.
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, String>;

    /// Called after construction, before the entity becomes visible.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), String> {
        Ok(())
    }

    /// Called before the entity is removed. An error keeps it in place.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), String> {
        Ok(())
    }

    /// Handle a resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, String>;
}

// =============================================================================
// 2. MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Custom error: {0}")]
    Custom(String),
}

/// One-shot reply channel used by every request.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Requests understood by a [`ResourceActor`].
///
/// - **Create**: allocate an id and build the entity from `CreateParams`.
/// - **Get**: clone the current state.
/// - **Delete**: drop the entity; its watchers observe the channel closing.
/// - **Action**: run an [`ActorEntity::Action`] against one entity.
/// - **Watch**: subscribe to snapshots published after each change.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Watch {
        id: T::Id,
        respond_to: Response<watch::Receiver<T>>,
    },
}

// =============================================================================
// 3. THE ACTOR
// =============================================================================

struct Slot<T> {
    entity: T,
    publisher: watch::Sender<T>,
}

impl<T: ActorEntity> Slot<T> {
    fn new(entity: T) -> Self {
        let (publisher, _) = watch::channel(entity.clone());
        Self { entity, publisher }
    }

    /// Pushes the current state to watchers if it differs from the last snapshot.
    fn publish(&self) -> bool {
        let entity = &self.entity;
        self.publisher.send_if_modified(|snapshot| {
            if snapshot == entity {
                false
            } else {
                *snapshot = entity.clone();
                true
            }
        })
    }
}

/// The task that owns every entity of type `T`.
///
/// **Concurrency Model**:
/// Requests are processed one at a time in arrival order, so the entities need
/// no `Mutex`. Any number of [`ResourceClient`] clones may send concurrently;
/// the channel serialises them.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, Slot<T>>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: ActorEntity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the event loop until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = (self.next_id_fn)();
                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::Custom(e)));
                            continue;
                        }
                    };
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::Custom(e)));
                        continue;
                    }
                    self.store.insert(id.clone(), Slot::new(item));
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).map(|slot| slot.entity.clone());
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(slot) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = slot.entity.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::Custom(e)));
                        continue;
                    }
                    self.store.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(slot) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let result = slot
                        .entity
                        .handle_action(action, &context)
                        .await
                        .map_err(FrameworkError::Custom);
                    match &result {
                        Ok(_) => {
                            let published = slot.publish();
                            debug!(entity_type, %id, published, "Action ok");
                        }
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Watch { id, respond_to } => {
                    debug!(entity_type, %id, "Watch");
                    match self.store.get(&id) {
                        Some(slot) => {
                            let _ = respond_to.send(Ok(slot.publisher.subscribe()));
                        }
                        None => {
                            warn!(entity_type, %id, "Not found");
                            let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        }
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

// =============================================================================
// 4. THE CLIENT
// =============================================================================

/// A type-safe handle for talking to a [`ResourceActor`].
#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to })
            .await
    }

    pub async fn watch(&self, id: T::Id) -> Result<watch::Receiver<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Watch { id, respond_to })
            .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Debug, PartialEq)]
    struct Counter {
        id: String,
        value: i64,
    }

    #[derive(Debug)]
    struct CounterCreate {
        start: i64,
    }

    #[derive(Debug)]
    enum CounterAction {
        Add(i64),
        Read,
        Fail,
    }

    #[async_trait]
    impl ActorEntity for Counter {
        type Id = String;
        type CreateParams = CounterCreate;
        type Action = CounterAction;
        type ActionResult = i64;
        type Context = ();

        fn from_create_params(id: String, params: CounterCreate) -> Result<Self, String> {
            if params.start < 0 {
                return Err("negative start".into());
            }
            Ok(Self { id, value: params.start })
        }

        async fn handle_action(&mut self, action: CounterAction, _ctx: &()) -> Result<i64, String> {
            match action {
                CounterAction::Add(n) => {
                    self.value += n;
                    Ok(self.value)
                }
                CounterAction::Read => Ok(self.value),
                CounterAction::Fail => Err("boom".into()),
            }
        }
    }

    fn spawn_counter() -> ResourceClient<Counter> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("counter_{}", counter.fetch_add(1, Ordering::SeqCst));
        let (actor, client) = ResourceActor::new(10, next_id);
        tokio::spawn(actor.run(()));
        client
    }

    #[tokio::test]
    async fn test_resource_actor_lifecycle() {
        let client = spawn_counter();

        let id = client.create(CounterCreate { start: 5 }).await.unwrap();
        assert_eq!(id, "counter_1");

        assert_eq!(client.perform_action(id.clone(), CounterAction::Add(3)).await, Ok(8));
        assert_eq!(client.get(id.clone()).await.unwrap().unwrap().value, 8);

        assert_eq!(
            client.perform_action(id.clone(), CounterAction::Fail).await,
            Err(FrameworkError::Custom("boom".into()))
        );

        client.delete(id.clone()).await.unwrap();
        assert!(client.get(id.clone()).await.unwrap().is_none());
        assert_eq!(
            client.delete(id.clone()).await,
            Err(FrameworkError::NotFound(id))
        );
    }

    #[tokio::test]
    async fn test_create_rejected_by_entity() {
        let client = spawn_counter();
        let result = client.create(CounterCreate { start: -1 }).await;
        assert_eq!(result, Err(FrameworkError::Custom("negative start".into())));
    }

    #[tokio::test]
    async fn test_watch_publishes_only_changes() {
        let client = spawn_counter();
        let id = client.create(CounterCreate { start: 0 }).await.unwrap();
        let mut rx = client.watch(id.clone()).await.unwrap();
        assert_eq!(rx.borrow_and_update().value, 0);

        client.perform_action(id.clone(), CounterAction::Read).await.unwrap();
        assert!(!rx.has_changed().unwrap());

        client.perform_action(id.clone(), CounterAction::Add(2)).await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().value, 2);

        client.delete(id).await.unwrap();
        assert!(rx.changed().await.is_err());
    }

    #[tokio::test]
    async fn test_closed_actor() {
        let (actor, client) = ResourceActor::<Counter>::new(1, || "counter".to_string());
        drop(actor);
        assert_eq!(
            client.get("counter".into()).await,
            Err(FrameworkError::ActorClosed)
        );
    }
}
