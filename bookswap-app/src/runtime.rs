//! Message loop driving the app model
//!
//! Messages are applied on the caller's task. Network calls and photo
//! conversion run as spawned tasks that report back over a channel, so a
//! completion is always processed after the request that produced it.

use crate::platform::Platform;
use bookswap_core::api::ListingApi;
use bookswap_core::{App, Effect, ImageError, Message, PhotoNormalizer};
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct Runtime<P: Platform> {
    app: App,
    api: Arc<dyn ListingApi>,
    normalizer: PhotoNormalizer,
    platform: P,
    tx: mpsc::UnboundedSender<Message>,
    rx: mpsc::UnboundedReceiver<Message>,
    /// Spawned tasks whose completion message has not arrived yet
    in_flight: usize,
}

impl<P: Platform> Runtime<P> {
    pub fn new(app: App, api: Arc<dyn ListingApi>, platform: P) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            app,
            api,
            normalizer: PhotoNormalizer::new(),
            platform,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Use a specific photo normalizer instead of the build default
    pub fn with_normalizer(mut self, normalizer: PhotoNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Number of requests still outstanding
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Apply a message and start the effects it requests.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, message: Message) {
        for effect in self.app.update(message) {
            self.execute(effect);
        }
    }

    /// Process completions until nothing is in flight
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            let Some(message) = self.rx.recv().await else {
                break;
            };
            self.in_flight -= 1;
            self.dispatch(message);
        }
    }

    /// Dispatch a message and wait for everything it triggered
    pub async fn send(&mut self, message: Message) {
        self.dispatch(message);
        self.settle().await;
    }

    fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::FetchListings => {
                let api = Arc::clone(&self.api);
                self.spawn(async move { Message::ListingsFetched(api.fetch_listings().await) });
            }

            Effect::NormalizePhoto {
                draft,
                selection,
                file,
            } => {
                let normalizer = self.normalizer.clone();
                self.spawn(async move {
                    let result = tokio::task::spawn_blocking(move || normalizer.normalize(file))
                        .await
                        .unwrap_or_else(|e| Err(ImageError::Decode(format!("Task failed: {}", e))));
                    Message::PhotoNormalized {
                        draft,
                        selection,
                        result,
                    }
                });
            }

            Effect::Upload { draft, submission } => {
                let api = Arc::clone(&self.api);
                self.spawn(async move {
                    let result = api.create_listing(submission).await;
                    Message::SubmissionFinished { draft, result }
                });
            }

            Effect::ComposeEmail { mailto } => {
                if let Err(e) = self.platform.open_url(&mailto) {
                    tracing::warn!("Failed to open mail composer: {}", e);
                }
            }

            Effect::CopyToClipboard { text } => {
                if let Err(e) = self.platform.copy_to_clipboard(&text) {
                    tracing::warn!("Failed to copy to clipboard: {}", e);
                }
            }

            Effect::Notify(message) => self.platform.notify(&message),
        }
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: std::future::Future<Output = Message> + Send + 'static,
    {
        let tx = self.tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            // The receiver lives as long as the runtime
            let _ = tx.send(task.await);
        });
    }
}
