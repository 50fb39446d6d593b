use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::io::http::{Completion, TodoClient};
use crate::model::request::Request;

/// Runs requests off the UI thread and queues their completions.
///
/// Each dispatched request gets its own thread, so nothing serializes two
/// requests that are in flight at once; completions are queued in the order
/// the responses arrive.
pub struct RequestWorker {
    client: TodoClient,
    tx: mpsc::Sender<Completion>,
    rx: mpsc::Receiver<Completion>,
}

impl RequestWorker {
    pub fn new(client: TodoClient) -> Self {
        let (tx, rx) = mpsc::channel();
        RequestWorker { client, tx, rx }
    }

    /// Start executing `request` in the background
    pub fn dispatch(&self, request: Request) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        tracing::debug!(method = request.method(), "dispatching request");
        let spawned = thread::Builder::new()
            .name("td-request".into())
            .spawn(move || {
                let completion = client.execute(request);
                // Receiver gone means the UI is shutting down
                let _ = tx.send(completion);
            });
        if let Err(e) = spawned {
            tracing::error!(error = %e, "could not spawn request thread");
        }
    }

    /// Non-blocking poll for finished requests.
    /// Returns all queued completions (may be empty).
    pub fn poll(&self) -> Vec<Completion> {
        let mut completions = Vec::new();
        while let Ok(c) = self.rx.try_recv() {
            completions.push(c);
        }
        completions
    }

    /// Block until the next completion arrives or `timeout` elapses
    pub fn wait(&self, timeout: Duration) -> Option<Completion> {
        self.rx.recv_timeout(timeout).ok()
    }
}
