//! The widget screen: build the request, fetch once, and settle into a
//! terminal [`ViewState`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use refwidget_commons::{ErrorReporter, NoopErrorReporter};
use refwidget_config::{Credentials, WidgetConfig};
use tokio::sync::watch;

use crate::client::{WidgetClient, WidgetFetcher};
use crate::identity::Identity;
use crate::request::{WidgetRequest, build_upsert_request};
use crate::state::ViewState;

/// Message shown for every failure kind.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch HTML content";

/// One widget screen instance.
///
/// The request is built at construction from the immutable configuration.
/// [`WidgetScreen::mount`] performs the single fetch; later calls return the
/// settled state without touching the network. State changes are published
/// through a watch channel so a surface can show `Loading` while the fetch is
/// in flight.
pub struct WidgetScreen {
    request: WidgetRequest,
    fallback_html: String,
    fetcher: Arc<dyn WidgetFetcher>,
    reporter: Arc<dyn ErrorReporter>,
    state: watch::Sender<ViewState>,
    mounted: AtomicBool,
}

impl WidgetScreen {
    /// Screen backed by the production [`WidgetClient`].
    pub fn new(config: &WidgetConfig, credentials: &Credentials) -> Self {
        let client = WidgetClient::new(credentials, config.timeouts.request_timeout());
        Self::with_fetcher(config, Arc::new(client))
    }

    pub fn with_fetcher(config: &WidgetConfig, fetcher: Arc<dyn WidgetFetcher>) -> Self {
        let identity = Identity::from_config(&config.identity);
        let request =
            build_upsert_request(&config.api, &identity, &config.identity.include_fields);
        let (state, _) = watch::channel(ViewState::Loading);

        Self {
            request,
            fallback_html: config.render.fallback_html.clone(),
            fetcher,
            reporter: Arc::new(NoopErrorReporter),
            state,
            mounted: AtomicBool::new(false),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn request(&self) -> &WidgetRequest {
        &self.request
    }

    /// Current state snapshot.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Run the fetch once and return the resulting terminal state.
    ///
    /// Every failure is logged with its kind, forwarded to the error
    /// reporter, and shown as [`FETCH_FAILED_MESSAGE`]. Dropping the future
    /// before it settles leaves the screen in `Loading` and lets the next
    /// call fetch again.
    pub async fn mount(&self) -> ViewState {
        if self.mounted.swap(true, Ordering::AcqRel) {
            tracing::debug!("widget screen already mounted; not fetching again");
            return self.state();
        }
        let guard = MountGuard {
            mounted: &self.mounted,
            settled: false,
        };

        let next = match self.fetcher.fetch(&self.request).await {
            Ok(response) => ViewState::Ready(response.into_html(&self.fallback_html)),
            Err(err) => {
                tracing::error!(
                    kind = err.kind(),
                    status = ?err.status(),
                    error = %err,
                    "Error fetching HTML"
                );
                let report = anyhow::Error::new(err).context(FETCH_FAILED_MESSAGE);
                if let Err(report_err) = self.reporter.capture(&report) {
                    tracing::warn!(error = %report_err, "failed to report widget fetch error");
                }
                ViewState::Error(FETCH_FAILED_MESSAGE.to_string())
            }
        };

        self.state.send_if_modified(|state| state.resolve(next));
        guard.settle();
        self.state()
    }
}

/// Re-arms the mount flag when an in-flight fetch is abandoned.
struct MountGuard<'a> {
    mounted: &'a AtomicBool,
    settled: bool,
}

impl MountGuard<'_> {
    fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for MountGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::debug!("widget fetch abandoned before settling");
            self.mounted.store(false, Ordering::Release);
        }
    }
}

impl std::fmt::Debug for WidgetScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetScreen")
            .field("url", &self.request.url)
            .field("state", &*self.state.borrow())
            .field("mounted", &self.mounted.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::WidgetResponse;
    use crate::error::FetchError;
    use async_trait::async_trait;
    use refwidget_commons::MemoryErrorReporter;
    use std::sync::atomic::AtomicUsize;

    struct StaticFetcher {
        result: Result<WidgetResponse, FetchError>,
        calls: AtomicUsize,
    }

    impl StaticFetcher {
        fn new(result: Result<WidgetResponse, FetchError>) -> Arc<Self> {
            Arc::new(Self {
                result,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl WidgetFetcher for StaticFetcher {
        async fn fetch(&self, _request: &WidgetRequest) -> Result<WidgetResponse, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn template(html: &str) -> Result<WidgetResponse, FetchError> {
        Ok(WidgetResponse {
            template: Some(html.to_string()),
        })
    }

    #[tokio::test]
    async fn starts_loading_and_settles_ready() {
        let fetcher = StaticFetcher::new(template("<div>hi</div>"));
        let screen = WidgetScreen::with_fetcher(&WidgetConfig::default(), fetcher.clone());

        assert_eq!(screen.state(), ViewState::Loading);
        let state = screen.mount().await;
        assert_eq!(state, ViewState::Ready("<div>hi</div>".into()));
        assert_eq!(screen.state(), state);
    }

    #[tokio::test]
    async fn missing_template_uses_configured_fallback() {
        let mut config = WidgetConfig::default();
        config.render.fallback_html = "<p>nothing</p>".into();
        let screen =
            WidgetScreen::with_fetcher(&config, StaticFetcher::new(Ok(WidgetResponse::default())));

        assert_eq!(screen.mount().await, ViewState::Ready("<p>nothing</p>".into()));
    }

    #[tokio::test]
    async fn failures_collapse_into_generic_error_and_are_reported() {
        let reporter = Arc::new(MemoryErrorReporter::new());
        let screen = WidgetScreen::with_fetcher(
            &WidgetConfig::default(),
            StaticFetcher::new(Err(FetchError::HttpStatus { status: 503 })),
        )
        .with_reporter(reporter.clone());

        assert_eq!(
            screen.mount().await,
            ViewState::Error(FETCH_FAILED_MESSAGE.into())
        );
        assert_eq!(
            reporter.take(),
            vec!["Failed to fetch HTML content: HTTP error! status: 503".to_string()]
        );
    }

    #[tokio::test]
    async fn repeated_mounts_fetch_once() {
        let fetcher = StaticFetcher::new(template("<div>once</div>"));
        let screen = WidgetScreen::with_fetcher(&WidgetConfig::default(), fetcher.clone());

        for _ in 0..3 {
            assert_eq!(screen.mount().await, ViewState::Ready("<div>once</div>".into()));
        }
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn subscribers_observe_single_transition() {
        let screen = WidgetScreen::with_fetcher(
            &WidgetConfig::default(),
            StaticFetcher::new(template("<i>x</i>")),
        );
        let mut rx = screen.subscribe();
        assert_eq!(*rx.borrow_and_update(), ViewState::Loading);

        screen.mount().await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), ViewState::Ready("<i>x</i>".into()));

        screen.mount().await;
        assert!(!rx.has_changed().unwrap());
    }

    struct StallOnceFetcher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl WidgetFetcher for StallOnceFetcher {
        async fn fetch(&self, _request: &WidgetRequest) -> Result<WidgetResponse, FetchError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                std::future::pending::<()>().await;
            }
            template("<div>second</div>")
        }
    }

    #[tokio::test]
    async fn abandoned_mount_can_be_retried() {
        let fetcher = Arc::new(StallOnceFetcher {
            calls: AtomicUsize::new(0),
        });
        let screen = WidgetScreen::with_fetcher(&WidgetConfig::default(), fetcher.clone());

        let abandoned =
            tokio::time::timeout(std::time::Duration::from_millis(20), screen.mount()).await;
        assert!(abandoned.is_err());
        assert_eq!(screen.state(), ViewState::Loading);

        assert_eq!(
            screen.mount().await,
            ViewState::Ready("<div>second</div>".into())
        );
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn request_is_built_from_config() {
        let mut config = WidgetConfig::default();
        config.api.tenant_alias = "tenant".into();
        config.identity.id = "user".into();
        config.identity.account_id = "account".into();

        let screen =
            WidgetScreen::with_fetcher(&config, StaticFetcher::new(Ok(WidgetResponse::default())));
        assert!(
            screen
                .request()
                .url
                .contains("/api/v1/tenant/widget/account/account/user/user/upsert")
        );
    }
}
