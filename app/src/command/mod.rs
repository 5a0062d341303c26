//! Static strategy pattern for CLI commands.
//!
//! This module implements a zero-allocation, static dispatch strategy pattern.
//! Each command is a separate strategy with its own type, enabling
//! compile-time optimization and zero runtime overhead.

mod enrich;
mod init;
mod version;

pub use enrich::{EnrichInput, EnrichStrategy};
pub use init::InitStrategy;
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// # Design Principles
/// - **Zero allocation**: No heap allocation required
/// - **Static dispatch**: All calls are monomorphized at compile time
/// - **Type safety**: Each strategy defines its own input type via associated type
/// - **Extensibility**: Adding new commands requires only implementing this trait
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    ///
    /// Each strategy can define its own input type, enabling type-safe
    /// parameter passing without runtime casting or boxing.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}
