//! The source contract: the uniform surface every resource adapter
//! exposes to the hosting engine.

mod command;

pub use command::CommandSource;

use async_trait::async_trait;

use crate::error::Result;
use crate::item::Item;

/// A pluggable adapter exposing one resource kind through a uniform
/// get/search/find contract.
///
/// The hosting engine drives implementations over a message bus and owns
/// parallelism, retries, and authentication; a source only answers the
/// calls below.
#[async_trait]
pub trait Source: Send + Sync {
    /// The type of items this source returns.
    fn source_type(&self) -> &'static str;

    /// The name of the source, used for debugging and logging.
    fn name(&self) -> &'static str;

    /// Weighting against duplicate sources for the same type.
    fn weight(&self) -> u32 {
        100
    }

    /// Contexts this source can find items for.
    fn contexts(&self) -> Vec<String>;

    /// Whether results should be hidden unless explicitly requested.
    fn hidden(&self) -> bool {
        false
    }

    /// Fetch a single item by query.
    async fn get(&self, context: &str, query: &str) -> Result<Item>;

    /// Run a structured query and return matching items.
    async fn search(&self, context: &str, query: &str) -> Result<Vec<Item>>;

    /// Enumerate every item this source can possibly find.
    async fn find(&self, context: &str) -> Result<Vec<Item>>;
}

/// The context this process serves: the local hostname.
///
/// Resolved once for the lifetime of the process.
pub fn local_context() -> &'static str {
    use std::sync::OnceLock;

    static LOCAL_CONTEXT: OnceLock<String> = OnceLock::new();

    LOCAL_CONTEXT.get_or_init(|| {
        hostname::get()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "UNKNOWN".to_string())
    })
}
