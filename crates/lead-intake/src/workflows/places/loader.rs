use std::future::Future;
use std::sync::Arc;

use tokio::sync::OnceCell;

/// Lazily initialised shared handle to an external capability.
///
/// The first caller runs the load; callers arriving while it is in flight wait for the
/// same result. A failed load leaves the loader empty, so the next caller tries again.
#[derive(Debug)]
pub struct CapabilityLoader<T> {
    cell: OnceCell<Arc<T>>,
}

impl<T> Default for CapabilityLoader<T> {
    fn default() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }
}

impl<T> CapabilityLoader<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    pub async fn get_or_load<F, Fut, E>(&self, load: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.cell
            .get_or_try_init(|| async { load().await.map(Arc::new) })
            .await
            .cloned()
    }
}
