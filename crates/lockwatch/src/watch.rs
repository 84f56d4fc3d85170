//! The per-process lockwatch value.

use crate::config::LockWatchConfig;
use lockwatch_context::platform::PlatformBundleProvider;
use lockwatch_context::{classify_with, BundleProvider, ExecutionContext, ScreenState};
use lockwatch_detect::{Capability, StateCallback, StatePoller, StateResolver, StateSource};
use lockwatch_events::{ChangeObserver, Subscription};
use lockwatch_marker::{MarkerFile, MarkerStore};
use std::path::Path;
use std::sync::Arc;

/// Lock-state facade for one process.
///
/// Holds the classified context, the resolved capability, and the
/// observer. Build it once at startup and pass it around.
#[derive(Debug)]
pub struct LockWatch {
    config: LockWatchConfig,
    marker: Option<MarkerFile>,
    resolver: StateResolver,
    observer: ChangeObserver,
}

impl LockWatch {
    /// Classify the running process and use this platform's signals.
    pub fn new(config: LockWatchConfig) -> Self {
        Self::builder(config).build()
    }

    pub fn builder(config: LockWatchConfig) -> LockWatchBuilder {
        LockWatchBuilder::new(config)
    }

    pub fn config(&self) -> &LockWatchConfig {
        &self.config
    }

    pub fn context(&self) -> ExecutionContext {
        self.resolver.context()
    }

    pub fn is_app_extension(&self) -> bool {
        self.context().is_app_extension()
    }

    pub fn is_widget_extension(&self) -> bool {
        self.context().is_widget_extension()
    }

    /// Path of the protected marker, for diagnostics. `None` when the
    /// configured location could not be resolved.
    pub fn protected_file_path(&self) -> Option<&Path> {
        self.marker.as_ref().map(MarkerFile::path)
    }

    /// Create the protected marker if it does not exist yet.
    ///
    /// Call once, early, while the device is unlocked - typically from the
    /// main app so its extensions find the marker. Idempotent. Returns
    /// `false` when there is no marker location.
    pub fn initialize(&self) -> bool {
        match &self.marker {
            Some(marker) => marker.initialize(),
            None => false,
        }
    }

    /// Current lock state. Never fails; see [`ScreenState::Unknown`].
    pub fn current_state(&self) -> ScreenState {
        self.resolver.current_state()
    }

    /// Whether transition notifications can reach this process.
    pub fn supports_observation(&self) -> bool {
        !self.is_widget_extension()
    }

    /// Call `handler` with `Locked`/`Unlocked` on every OS transition.
    ///
    /// In widget extensions no notifications are available; the returned
    /// subscription is empty and callers should poll instead.
    pub fn observe_state_changes<F>(&self, handler: F) -> Subscription
    where
        F: Fn(ScreenState) + Send + Sync + 'static,
    {
        if !self.supports_observation() {
            tracing::debug!(context = %self.context(), "lock notifications unavailable");
            return Subscription::empty();
        }

        self.observer.observe(handler)
    }

    /// Poll [`current_state`](Self::current_state) on a background thread
    /// at the configured interval. The poller stops when dropped.
    pub fn poll_state_changes(self: &Arc<Self>, callback: StateCallback) -> StatePoller {
        let mut poller = StatePoller::new();
        poller.start_with_interval(Arc::clone(self), callback, self.config.poll_interval());
        poller
    }
}

impl StateSource for LockWatch {
    fn current_state(&self) -> ScreenState {
        LockWatch::current_state(self)
    }
}

/// Builder for [`LockWatch`] with injectable platform seams.
pub struct LockWatchBuilder {
    config: LockWatchConfig,
    context: Option<ExecutionContext>,
    bundle_provider: Option<Box<dyn BundleProvider>>,
    capability: Option<Capability>,
    marker_store: Option<Arc<dyn MarkerStore>>,
    observer: Option<ChangeObserver>,
}

impl LockWatchBuilder {
    pub fn new(config: LockWatchConfig) -> Self {
        Self {
            config,
            context: None,
            bundle_provider: None,
            capability: None,
            marker_store: None,
            observer: None,
        }
    }

    /// Skip classification and use this context.
    pub fn context(mut self, context: ExecutionContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Classify with this provider instead of the platform one.
    pub fn bundle_provider(mut self, provider: impl BundleProvider + 'static) -> Self {
        self.bundle_provider = Some(Box::new(provider));
        self
    }

    /// Use this capability instead of the context default.
    pub fn capability(mut self, capability: Capability) -> Self {
        self.capability = Some(capability);
        self
    }

    pub fn marker_store(mut self, store: Arc<dyn MarkerStore>) -> Self {
        self.marker_store = Some(store);
        self
    }

    pub fn observer(mut self, observer: ChangeObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// An unresolvable marker path leaves the watch without a marker; only
    /// restricted extensions lose their signal because of it.
    pub fn build(self) -> LockWatch {
        let marker = match self.config.marker_path() {
            Ok(path) => Some(match self.marker_store {
                Some(store) => MarkerFile::with_store(path, store),
                None => MarkerFile::new(path),
            }),
            Err(e) => {
                tracing::warn!(error = %e, "marker path unavailable");
                None
            }
        };

        let context = match (self.context, self.bundle_provider) {
            (Some(context), _) => context,
            (None, Some(provider)) => classify_with(provider.as_ref()),
            (None, None) => classify_with(&PlatformBundleProvider::default()),
        };

        let capability = match (self.capability, &marker) {
            (Some(capability), _) => capability,
            (None, Some(marker)) => Capability::for_context(context, marker.clone()),
            (None, None) => {
                if context == ExecutionContext::RestrictedExtension {
                    tracing::warn!(%context, "no marker file; lock state will be unknown");
                }
                Capability::without_marker(context)
            }
        };

        tracing::info!(
            %context,
            capability = capability.label(),
            marker = ?marker.as_ref().map(MarkerFile::path),
            "lockwatch ready"
        );

        LockWatch {
            config: self.config,
            marker,
            resolver: StateResolver::new(context, capability),
            observer: self.observer.unwrap_or_else(ChangeObserver::platform),
        }
    }
}
