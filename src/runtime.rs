//! Bridge between the pure controller and the async transport clients.
//!
//! Worker threads execute one exchange at a time and deliver terminal events
//! over a channel; the main loop applies them to `App`. Single-flight is
//! enforced by the `active` slot, independent of any UI affordance. There is
//! no cancellation, no timeout and no retry.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use completion_api::CompletionApiClient;
use publish_api::PublishApiClient;
use tracing::{debug, warn};

use crate::app::{HostOps, RequestId};

pub const ERROR_EXCHANGE_ACTIVE: &str = "Exchange already active";
const ERROR_PUBLISH_UNCONFIGURED: &str = "Publishing is not configured";

/// Terminal outcome of one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeEvent {
    CompletionFinished { request_id: RequestId, text: String },
    CompletionFailed { request_id: RequestId, error: String },
    PublishFinished { request_id: RequestId },
    PublishFailed { request_id: RequestId, error: String },
}

pub struct ExchangeRuntime {
    runtime: tokio::runtime::Runtime,
    events: Sender<ExchangeEvent>,
    next_request_id: AtomicU64,
    active: Mutex<Option<RequestId>>,
    completion: Arc<CompletionApiClient>,
    publish: Option<Arc<PublishApiClient>>,
}

impl ExchangeRuntime {
    pub fn new(
        completion: Arc<CompletionApiClient>,
        publish: Option<Arc<PublishApiClient>>,
        events: Sender<ExchangeEvent>,
    ) -> std::io::Result<Arc<Self>> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;

        Ok(Arc::new(Self {
            runtime,
            events,
            next_request_id: AtomicU64::new(1),
            active: Mutex::new(None),
            completion,
            publish,
        }))
    }

    fn begin_exchange(&self) -> Result<RequestId, String> {
        let mut active = lock_unpoisoned(&self.active);
        if active.is_some() {
            return Err(ERROR_EXCHANGE_ACTIVE.to_string());
        }

        let request_id = self.next_request_id.fetch_add(1, Ordering::SeqCst);
        *active = Some(request_id);
        Ok(request_id)
    }

    fn finish_exchange(&self, request_id: RequestId) {
        let mut active = lock_unpoisoned(&self.active);
        if *active == Some(request_id) {
            *active = None;
        }
    }

    fn spawn_completion(
        self: &Arc<Self>,
        request_id: RequestId,
        text: String,
        table_mode: bool,
    ) -> Result<(), String> {
        let runtime_handle = self.runtime.handle().clone();
        let controller = Arc::clone(self);

        let spawned = thread::Builder::new()
            .name(format!("docdesk-exchange-{request_id}"))
            .spawn(move || {
                debug!(request_id, table_mode, "completion exchange started");
                let outcome =
                    runtime_handle.block_on(controller.completion.complete(&text, table_mode));
                controller.finish_exchange(request_id);

                let event = match outcome {
                    Ok(text) => {
                        debug!(request_id, "completion exchange finished");
                        ExchangeEvent::CompletionFinished { request_id, text }
                    }
                    Err(error) => {
                        // The controller surfaces one generic message; the
                        // discarded detail lives here.
                        warn!(request_id, %error, "completion exchange failed");
                        ExchangeEvent::CompletionFailed {
                            request_id,
                            error: error.to_string(),
                        }
                    }
                };
                let _ = controller.events.send(event);
            });

        spawned.map(|_| ()).map_err(|error| {
            self.finish_exchange(request_id);
            format!("Failed to spawn exchange worker: {error}")
        })
    }

    fn spawn_publish(
        self: &Arc<Self>,
        request_id: RequestId,
        title: String,
        markup: String,
    ) -> Result<(), String> {
        let Some(publish) = self.publish.as_ref().map(Arc::clone) else {
            self.finish_exchange(request_id);
            return Err(ERROR_PUBLISH_UNCONFIGURED.to_string());
        };

        let runtime_handle = self.runtime.handle().clone();
        let controller = Arc::clone(self);

        let spawned = thread::Builder::new()
            .name(format!("docdesk-exchange-{request_id}"))
            .spawn(move || {
                debug!(request_id, title = %title, "publish exchange started");
                let outcome = runtime_handle.block_on(publish.create_page(&title, &markup));
                controller.finish_exchange(request_id);

                let event = match outcome {
                    Ok(()) => {
                        debug!(request_id, "publish exchange finished");
                        ExchangeEvent::PublishFinished { request_id }
                    }
                    Err(error) => {
                        warn!(request_id, %error, "publish exchange failed");
                        ExchangeEvent::PublishFailed {
                            request_id,
                            error: error.to_string(),
                        }
                    }
                };
                let _ = controller.events.send(event);
            });

        spawned.map(|_| ()).map_err(|error| {
            self.finish_exchange(request_id);
            format!("Failed to spawn exchange worker: {error}")
        })
    }

    fn start_completion_internal(
        self: &Arc<Self>,
        text: String,
        table_mode: bool,
    ) -> Result<RequestId, String> {
        let request_id = self.begin_exchange()?;
        self.spawn_completion(request_id, text, table_mode)?;
        Ok(request_id)
    }
}

impl HostOps for Arc<ExchangeRuntime> {
    fn start_completion(&mut self, code: String) -> Result<RequestId, String> {
        self.start_completion_internal(code, false)
    }

    fn start_conversion(&mut self, markup: String) -> Result<RequestId, String> {
        self.start_completion_internal(markup, true)
    }

    fn start_publish(&mut self, title: String, markup: String) -> Result<RequestId, String> {
        let request_id = self.begin_exchange()?;
        self.spawn_publish(request_id, title, markup)?;
        Ok(request_id)
    }

    fn request_render(&mut self) {
        // The REPL renders after draining events; nothing to schedule here.
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
