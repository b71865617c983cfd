use eyre::Result;
use maintenance_store::RequestStore;

mod api;
pub use api::{Api, ApiError, ApiResponse};

pub struct TestCtxBuilder {
    /// Whether to start with the demonstration records
    pub seed_demo_data: bool,
    /// Count of worker threads
    pub worker_threads: u16,
}

impl TestCtxBuilder {
    /// Create a new test context builder with an empty store and two workers
    pub fn new() -> Self {
        TestCtxBuilder {
            seed_demo_data: false,
            worker_threads: 2,
        }
    }

    /// Start with the demonstration records
    pub fn with_demo_data(mut self) -> Self {
        self.seed_demo_data = true;
        self
    }

    /// Set the number of worker threads to use
    pub fn with_worker_threads(mut self, threads: u16) -> Self {
        assert_ne!(threads, 0);
        self.worker_threads = threads;
        self
    }

    /// Get the [`maintenance_core::Config`] for launching the service
    fn config(&self) -> maintenance_core::Config {
        maintenance_core::Config {
            seed_demo_data: self.seed_demo_data,
        }
    }

    /// Build the test context
    pub async fn build(self) -> Result<TestCtx> {
        let config = self.config();
        let (service, api) = api::mock::start(self.worker_threads, config).await?;

        Ok(TestCtx {
            api,
            service,
            worker_threads: self.worker_threads,
            drop_bomb: DropBomb,
        })
    }
}

impl Default for TestCtxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Test context
pub struct TestCtx {
    /// API allowing to interact with the maintenance service
    pub api: Api,
    service: api::mock::MockService,
    /// Number of worker threads
    pub worker_threads: u16,

    drop_bomb: DropBomb,
}

impl TestCtx {
    /// Direct access to the store behind the API, for checking that rejected
    /// calls left it untouched
    pub fn store(&self) -> &RequestStore {
        self.service.store()
    }

    /// Shut down the maintenance service and finish the test
    ///
    /// All clones of [`Self::api`] must have been dropped before.
    pub async fn finish(self) -> Result<()> {
        std::mem::forget(self.drop_bomb);
        drop(self.api);
        self.service.shutdown().await
    }
}

struct DropBomb;

impl Drop for DropBomb {
    fn drop(&mut self) {
        eprintln!("@TestAuthor: You should call `ctx.finish().await` to shut the maintenance service down");
    }
}
