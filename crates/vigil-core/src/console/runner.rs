use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::console::error::ConsoleSystemError;
use crate::console::{CommandArgs, ConsoleCommand};
use crate::kernel::component::KernelComponent;
use crate::kernel::error::Result;

/// Console component interface
#[async_trait]
pub trait ConsoleRunner: KernelComponent {
    /// Register a command under its own name. A later registration with the
    /// same name replaces the earlier one.
    async fn register_command(&self, command: Arc<dyn ConsoleCommand>);

    /// Execute the command registered under `name` and return its exit
    /// status. An unknown name is an error, not a non-zero status.
    async fn run(&self, name: &str, args: &CommandArgs) -> Result<i32>;

    /// Names of all registered commands, sorted.
    async fn command_names(&self) -> Vec<&'static str>;
}

/// Default implementation of [`ConsoleRunner`]
#[derive(Clone)]
pub struct DefaultConsoleRunner {
    name: &'static str,
    commands: Arc<Mutex<HashMap<&'static str, Arc<dyn ConsoleCommand>>>>,
}

impl fmt::Debug for DefaultConsoleRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultConsoleRunner")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl DefaultConsoleRunner {
    pub fn new() -> Self {
        Self::with_commands(Vec::new())
    }

    /// Create a runner with `commands` pre-registered.
    pub fn with_commands(commands: Vec<Arc<dyn ConsoleCommand>>) -> Self {
        let map = commands
            .into_iter()
            .map(|command| (command.name(), command))
            .collect();
        Self {
            name: "ConsoleRunner",
            commands: Arc::new(Mutex::new(map)),
        }
    }
}

impl Default for DefaultConsoleRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConsoleRunner for DefaultConsoleRunner {
    async fn register_command(&self, command: Arc<dyn ConsoleCommand>) {
        self.commands.lock().await.insert(command.name(), command);
    }

    async fn run(&self, name: &str, args: &CommandArgs) -> Result<i32> {
        let command = {
            let commands = self.commands.lock().await;
            commands.get(name).cloned()
        }
        .ok_or_else(|| ConsoleSystemError::UnknownCommand {
            name: name.to_string(),
        })?;

        log::debug!("running console command '{}'", name);
        let status = command.execute(args).await?;
        if status != 0 {
            log::warn!("console command '{}' exited with status {}", name, status);
        }
        Ok(status)
    }

    async fn command_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.commands.lock().await.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

#[async_trait]
impl KernelComponent for DefaultConsoleRunner {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    async fn start(&self) -> Result<()> {
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        Ok(())
    }
}
