use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::container::Service;
use crate::event::{AsyncEventHandler, Event, EventPriority, EventResult, ListenerId};

// This type represents an owned future that returns EventResult
pub type BoxFuture<'a> = Pin<Box<dyn Future<Output = EventResult> + Send + 'a>>;

struct Listener {
    id: ListenerId,
    priority: EventPriority,
    handler: Arc<dyn AsyncEventHandler>,
}

struct ListenerTable {
    listeners: HashMap<String, Vec<Listener>>,
    next_id: ListenerId,
}

/// Name-keyed event dispatcher.
///
/// Listeners for one name are kept ordered by priority, highest first, and in
/// registration order within a priority. The table lock is released before
/// listeners run, so a listener may register or dispatch further events.
pub struct EventDispatcher {
    table: Mutex<ListenerTable>,
    queue: Mutex<VecDeque<Box<dyn Event>>>,
}

impl Service for EventDispatcher {
    const ID: &'static str = "hearth.event";
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(ListenerTable {
                listeners: HashMap::new(),
                next_id: 1,
            }),
            queue: Mutex::new(VecDeque::new()),
        }
    }

    /// Register a listener for `name`.
    pub async fn listen(
        &self,
        name: impl Into<String>,
        priority: EventPriority,
        handler: Arc<dyn AsyncEventHandler>,
    ) -> ListenerId {
        let name = name.into();
        let mut table = self.table.lock().await;
        let id = table.next_id;
        table.next_id += 1;

        let listeners = table.listeners.entry(name.clone()).or_default();
        let index = listeners
            .iter()
            .position(|l| l.priority < priority)
            .unwrap_or(listeners.len());
        listeners.insert(index, Listener { id, priority, handler });

        log::trace!("Registered listener {} for '{}' at {:?} priority", id, name, priority);
        id
    }

    /// Register a synchronous closure as a listener for `name`.
    pub async fn listen_fn<F>(&self, name: impl Into<String>, priority: EventPriority, f: F) -> ListenerId
    where
        F: Fn(&dyn Event) -> EventResult + Send + Sync + 'static,
    {
        self.listen(name, priority, sync_event_handler(f)).await
    }

    /// Remove every listener for `name`, returning how many were removed.
    pub async fn forget(&self, name: &str) -> usize {
        self.table
            .lock()
            .await
            .listeners
            .remove(name)
            .map_or(0, |listeners| listeners.len())
    }

    /// Remove a single listener by id.
    pub async fn unlisten(&self, id: ListenerId) -> bool {
        let mut table = self.table.lock().await;
        let mut found = false;
        table.listeners.retain(|_, listeners| {
            let len_before = listeners.len();
            listeners.retain(|l| l.id != id);
            found |= listeners.len() < len_before;
            !listeners.is_empty()
        });
        found
    }

    pub async fn listener_count(&self, name: &str) -> usize {
        self.table.lock().await.listeners.get(name).map_or(0, Vec::len)
    }

    pub async fn has_listeners(&self, name: &str) -> bool {
        self.listener_count(name).await > 0
    }

    /// Run the listeners for `event` in priority order until one returns `Stop`.
    pub async fn dispatch(&self, event: &dyn Event) -> EventResult {
        let handlers: Vec<Arc<dyn AsyncEventHandler>> = match self.table.lock().await.listeners.get(event.name()) {
            Some(listeners) => listeners.iter().map(|l| l.handler.clone()).collect(),
            None => return EventResult::Continue,
        };

        log::trace!("Dispatching '{}' to {} listener(s)", event.name(), handlers.len());
        for handler in handlers {
            if handler.handle(event).await == EventResult::Stop {
                log::debug!("Propagation of '{}' stopped by a listener", event.name());
                return EventResult::Stop;
            }
        }
        EventResult::Continue
    }

    /// Queue an event to be dispatched by [`EventDispatcher::flush`].
    pub async fn push(&self, event: Box<dyn Event>) {
        self.queue.lock().await.push_back(event);
    }

    /// Dispatch queued events in order, including any queued while flushing.
    pub async fn flush(&self) -> usize {
        let mut count = 0;
        loop {
            let next = self.queue.lock().await.pop_front();
            let Some(event) = next else { break };
            self.dispatch(&*event).await;
            count += 1;
        }
        count
    }

    pub async fn queue_size(&self) -> usize {
        self.queue.lock().await.len()
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("EventDispatcher");
        match self.table.try_lock() {
            Ok(table) => s.field(
                "listeners_count",
                &table.listeners.values().map(Vec::len).sum::<usize>(),
            ),
            Err(_) => s.field("listeners_count", &"<locked>"),
        };
        s.finish_non_exhaustive()
    }
}

struct FnHandler<F>(F);

#[async_trait]
impl<F> AsyncEventHandler for FnHandler<F>
where
    F: Fn(&dyn Event) -> EventResult + Send + Sync + 'static,
{
    async fn handle(&self, event: &dyn Event) -> EventResult {
        (self.0)(event)
    }
}

struct AsyncFnHandler {
    handler: Box<dyn Fn(&dyn Event) -> BoxFuture<'_> + Send + Sync>,
}

#[async_trait]
impl AsyncEventHandler for AsyncFnHandler {
    async fn handle(&self, event: &dyn Event) -> EventResult {
        (self.handler)(event).await
    }
}

/// Handler for a concrete event type; events of other types pass through.
struct TypedHandler<E, F> {
    f: F,
    _event: PhantomData<fn(&E)>,
}

#[async_trait]
impl<E, F> AsyncEventHandler for TypedHandler<E, F>
where
    E: Event,
    F: Fn(&E) -> EventResult + Send + Sync + 'static,
{
    async fn handle(&self, event: &dyn Event) -> EventResult {
        match event.as_any().downcast_ref::<E>() {
            Some(e) => (self.f)(e),
            None => EventResult::Continue,
        }
    }
}

/// Wrap a synchronous closure as a listener.
pub fn sync_event_handler<F>(f: F) -> Arc<dyn AsyncEventHandler>
where
    F: Fn(&dyn Event) -> EventResult + Send + Sync + 'static,
{
    Arc::new(FnHandler(f))
}

/// Wrap a closure returning a boxed future as a listener.
pub fn async_event_handler<F>(f: F) -> Arc<dyn AsyncEventHandler>
where
    F: Fn(&dyn Event) -> BoxFuture<'_> + Send + Sync + 'static,
{
    Arc::new(AsyncFnHandler { handler: Box::new(f) })
}

/// Wrap a closure over a concrete event type as a listener.
pub fn typed_event_handler<E, F>(f: F) -> Arc<dyn AsyncEventHandler>
where
    E: Event,
    F: Fn(&E) -> EventResult + Send + Sync + 'static,
{
    Arc::new(TypedHandler {
        f,
        _event: PhantomData,
    })
}
