//! Demo identity directory used for login lookups.
//!
//! Stands in for a credential service: a fixed five-account roster with a
//! short simulated lookup delay in the browser so the login form shows its
//! pending state. Off the browser the lookup resolves immediately.

use session::{Identity, IdentityDirectory, StaticDirectory};

#[cfg(feature = "hydrate")]
const LOOKUP_LATENCY: std::time::Duration = std::time::Duration::from_millis(400);

pub struct DemoDirectory {
    inner: StaticDirectory,
}

impl DemoDirectory {
    pub fn new() -> Self {
        Self { inner: StaticDirectory::demo() }
    }

    /// Accounts offered as hints on the login page.
    pub fn accounts(&self) -> &[Identity] {
        self.inner.entries()
    }
}

impl Default for DemoDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityDirectory for DemoDirectory {
    async fn resolve(&self, email: &str) -> Option<Identity> {
        #[cfg(feature = "hydrate")]
        gloo_timers::future::sleep(LOOKUP_LATENCY).await;
        self.inner.find(email).cloned()
    }
}
