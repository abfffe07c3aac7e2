//! The command source: executes a command on behalf of a discovery
//! request.

use async_trait::async_trait;
use tracing::debug;

use super::{local_context, Source};
use crate::error::{Result, ShellProbeError};
use crate::execution::CommandExecutor;
use crate::item::Item;
use crate::spec::CommandSpec;

/// Source that runs a single local command per request.
pub struct CommandSource {
    executor: CommandExecutor,
}

impl CommandSource {
    /// Create a command source using the host shell strategy.
    pub fn new() -> Self {
        Self {
            executor: CommandExecutor::new(),
        }
    }

    /// Create a command source around a preconfigured executor.
    pub fn with_executor(executor: CommandExecutor) -> Self {
        Self { executor }
    }

    fn check_context(&self, context: &str) -> Result<()> {
        let local = local_context();

        if context != local {
            return Err(ShellProbeError::WrongContext {
                requested: context.to_string(),
                local: local.to_string(),
            });
        }

        Ok(())
    }
}

impl Default for CommandSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Source for CommandSource {
    fn source_type(&self) -> &'static str {
        "command"
    }

    fn name(&self) -> &'static str {
        "command"
    }

    fn contexts(&self) -> Vec<String> {
        vec![local_context().to_string()]
    }

    /// Command items are only meaningful when explicitly requested, so
    /// they stay hidden from blanket discovery.
    fn hidden(&self) -> bool {
        true
    }

    /// Run a single command with default parameters.
    ///
    /// The query is the whole invocation as one string, relying on the
    /// shell to interpret it. This shape predates the structured spec and
    /// is kept for compatibility; prefer [`Source::search`].
    async fn get(&self, context: &str, query: &str) -> Result<Item> {
        self.check_context(context)?;

        debug!(command = %query, "get: running bare command");
        let spec = CommandSpec::new(query);

        self.executor.run(&spec, context).await
    }

    /// Run a command described by a JSON-encoded [`CommandSpec`], e.g.
    ///
    /// ```json
    /// {
    ///     "command": "cat",
    ///     "args": ["/etc/hosts"],
    ///     "expected_exit": 0,
    ///     "timeout": "5s",
    ///     "dir": "/etc",
    ///     "env": {"FOO": "BAR"}
    /// }
    /// ```
    async fn search(&self, context: &str, query: &str) -> Result<Vec<Item>> {
        self.check_context(context)?;

        let spec: CommandSpec = serde_json::from_str(query)
            .map_err(|err| ShellProbeError::MalformedQuery(err.to_string()))?;

        debug!(command = %spec.command, "search: running structured command");
        let item = self.executor.run(&spec, context).await?;

        Ok(vec![item])
    }

    /// Enumeration is meaningless for arbitrary commands.
    async fn find(&self, _context: &str) -> Result<Vec<Item>> {
        Err(ShellProbeError::UnsupportedMethod)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptors() {
        let source = CommandSource::new();
        assert_eq!(source.source_type(), "command");
        assert_eq!(source.name(), "command");
        assert_eq!(source.weight(), 100);
        assert!(source.hidden());
        assert_eq!(source.contexts(), vec![local_context().to_string()]);
    }

    #[tokio::test]
    async fn test_get_rejects_foreign_context() {
        let source = CommandSource::new();
        let result = source.get("not-this-host", "hostname").await;

        assert!(matches!(
            result,
            Err(ShellProbeError::WrongContext { .. })
        ));
    }

    #[tokio::test]
    async fn test_search_rejects_malformed_json() {
        let source = CommandSource::new();
        let result = source.search(local_context(), "{not json").await;

        match result {
            Err(err) => assert!(err.to_string().contains("could not unmarshal")),
            Ok(_) => panic!("expected a malformed query error"),
        }
    }

    #[tokio::test]
    async fn test_find_unsupported() {
        let source = CommandSource::new();
        let result = source.find(local_context()).await;

        assert!(matches!(result, Err(ShellProbeError::UnsupportedMethod)));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_get_runs_bare_command() {
        let source = CommandSource::new();
        let item = source.get(local_context(), "echo qwerty").await.unwrap();

        assert_eq!(item.unique_key(), Some("echo qwerty"));
        assert_eq!(item.attribute_str("stdout"), Some("qwerty"));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_search_runs_structured_command() {
        let source = CommandSource::new();
        let query = r#"{"command": "echo", "args": ["qwerty"]}"#;

        let items = source.search(local_context(), query).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].attribute_str("stdout"), Some("qwerty"));
        assert_eq!(items[0].attributes["exitCode"], 0);
    }
}
