use std::any::TypeId;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::capture::DefaultCaptureManager;
use crate::config::AppConfig;
use crate::console::{ConsoleCommand, ConsumeMessagesCommand, DefaultConsoleRunner};
use crate::kernel::component::{DependencyRegistry, KernelComponent};
use crate::kernel::constants;
use crate::kernel::error::{Error, KernelLifecyclePhase, Result};
use crate::messenger::DefaultMessengerManager;
use crate::router::{DefaultRouterManager, KernelClient};

/// Main application struct coordinating components via dependency injection
pub struct Application {
    booted: bool,
    config: AppConfig,
    // Simplified dependency registry
    dependencies: Arc<Mutex<DependencyRegistry>>,
    // Keep track of component boot order (using concrete TypeIds)
    component_boot_order: Vec<TypeId>,
}

impl Application {
    /// Creates a new application instance with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(AppConfig::default())
    }

    /// Creates a new application instance from a configuration file.
    pub fn from_config_file(path: &Path) -> Result<Self> {
        let config = AppConfig::load(path)?;
        Self::with_config(config)
    }

    /// Creates a new application instance with the given configuration,
    /// building and registering the default component set.
    pub fn with_config(config: AppConfig) -> Result<Self> {
        log::info!("Initializing {} v{}", constants::APP_NAME, constants::APP_VERSION);

        let mut registry = DependencyRegistry::new();
        let mut boot_order = Vec::new();

        // The capture manager owns this context's hub; every other component
        // that reports faults holds a clone of its Arc.
        let capture_manager = Arc::new(DefaultCaptureManager::new(config.capture.policy()));
        registry.register_instance(capture_manager.clone());
        boot_order.push(TypeId::of::<DefaultCaptureManager>());

        let messenger_manager = Arc::new(DefaultMessengerManager::with_receivers(
            capture_manager.clone(),
            &config.messenger.receivers,
        ));
        registry.register_instance(messenger_manager.clone());
        boot_order.push(TypeId::of::<DefaultMessengerManager>());

        let router_manager = Arc::new(DefaultRouterManager::new());
        registry.register_instance(router_manager.clone());
        boot_order.push(TypeId::of::<DefaultRouterManager>());

        // The console runner ships with the consume command pre-wired to the
        // messenger.
        let commands: Vec<Arc<dyn ConsoleCommand>> = vec![Arc::new(ConsumeMessagesCommand::new(
            messenger_manager.clone(),
        ))];
        let console_runner = Arc::new(DefaultConsoleRunner::with_commands(commands));
        registry.register_instance(console_runner.clone());
        boot_order.push(TypeId::of::<DefaultConsoleRunner>());

        Ok(Application {
            booted: false,
            config,
            dependencies: Arc::new(Mutex::new(registry)),
            component_boot_order: boot_order,
        })
    }

    /// Gets a specific component instance by its concrete type T.
    /// Returns Option<Arc<T>>.
    pub async fn get_component<T: KernelComponent + 'static>(&self) -> Option<Arc<T>> {
        let registry = self.dependencies.lock().await;
        registry.get_concrete::<T>()
    }

    /// Gets a component instance by its registered name.
    pub async fn get_component_by_name(&self, name: &str) -> Option<Arc<dyn KernelComponent>> {
        let registry = self.dependencies.lock().await;
        registry.get_by_name(name)
    }

    /// Boots the application: initializes then starts every component in
    /// registration order. Booting twice is a lifecycle error.
    pub async fn boot(&mut self) -> Result<()> {
        if self.booted {
            return Err(Error::KernelLifecycleError {
                phase: KernelLifecyclePhase::Boot,
                component_name: None,
                message: "Application already booted".to_string(),
                source: None,
            });
        }

        self.initialize().await?;
        self.start().await?;

        self.booted = true;
        log::info!("Application booted successfully.");
        Ok(())
    }

    /// Initialize all registered components in the predefined order.
    async fn initialize(&mut self) -> Result<()> {
        log::info!("Initializing components...");
        let registry = self.dependencies.lock().await;

        for type_id in &self.component_boot_order {
            if let Some(component) = registry.get_component_by_id(type_id) {
                log::info!("Initializing component: {}", component.name());
                component.initialize().await?;
            } else {
                // This indicates a logic error in with_config
                return Err(Error::KernelLifecycleError {
                    phase: KernelLifecyclePhase::Initialize,
                    component_name: None,
                    message: format!("Instance missing from registry for {:?}", type_id),
                    source: None,
                });
            }
        }
        log::info!("Component initialization complete.");
        Ok(())
    }

    /// Start all initialized components in the predefined order.
    async fn start(&mut self) -> Result<()> {
        log::info!("Starting components...");
        let registry = self.dependencies.lock().await;

        for type_id in &self.component_boot_order {
            if let Some(component) = registry.get_component_by_id(type_id) {
                log::info!("Starting component: {}", component.name());
                component.start().await?;
            } else {
                return Err(Error::KernelLifecycleError {
                    phase: KernelLifecyclePhase::Start,
                    component_name: None,
                    message: format!("Instance missing from registry for {:?}", type_id),
                    source: None,
                });
            }
        }
        log::info!("Component start complete.");
        Ok(())
    }

    /// Shutdown all components in reverse order of boot.
    pub async fn shutdown(&mut self) -> Result<()> {
        log::info!("Shutting down components...");
        let registry = self.dependencies.lock().await;

        for type_id in self.component_boot_order.iter().rev() {
            if let Some(component) = registry.get_component_by_id(type_id) {
                log::info!("Stopping component: {}", component.name());
                if let Err(e) = component.stop().await {
                    log::error!("Error stopping component {}: {}", component.name(), e);
                    // Propagate the first error encountered during shutdown
                    return Err(Error::KernelLifecycleError {
                        phase: KernelLifecyclePhase::Shutdown,
                        component_name: Some(component.name().to_string()),
                        message: "Component failed to stop".to_string(),
                        source: Some(Box::new(e)),
                    });
                }
            } else {
                log::warn!("Instance missing from registry for {:?} during stop.", type_id);
            }
        }
        self.booted = false;
        log::info!("Component shutdown complete.");
        Ok(())
    }

    /// Returns whether the application has been booted.
    pub fn is_booted(&self) -> bool {
        self.booted
    }

    /// The configuration this application was built from.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the capture manager instance (synchronous convenience accessor).
    /// Every scenario requires the hub to resolve; absence is fatal.
    pub fn capture_manager(&self) -> Arc<DefaultCaptureManager> {
        self.dependencies
            .try_lock()
            .ok()
            .and_then(|reg| reg.get_concrete::<DefaultCaptureManager>())
            .expect("Capture manager not found in registry")
    }

    /// Get the router manager instance (synchronous convenience accessor)
    pub fn router_manager(&self) -> Arc<DefaultRouterManager> {
        self.dependencies
            .try_lock()
            .ok()
            .and_then(|reg| reg.get_concrete::<DefaultRouterManager>())
            .expect("Router manager not found in registry")
    }

    /// Get the messenger manager instance (synchronous convenience accessor)
    pub fn messenger_manager(&self) -> Arc<DefaultMessengerManager> {
        self.dependencies
            .try_lock()
            .ok()
            .and_then(|reg| reg.get_concrete::<DefaultMessengerManager>())
            .expect("Messenger manager not found in registry")
    }

    /// Get the console runner instance (synchronous convenience accessor)
    pub fn console_runner(&self) -> Arc<DefaultConsoleRunner> {
        self.dependencies
            .try_lock()
            .ok()
            .and_then(|reg| reg.get_concrete::<DefaultConsoleRunner>())
            .expect("Console runner not found in registry")
    }

    /// Build a request client honoring the configured fault handling.
    pub fn client(&self) -> KernelClient {
        KernelClient::new(
            self.router_manager(),
            self.capture_manager(),
            self.config.router.catch_faults,
        )
    }
}
