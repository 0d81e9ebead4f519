//! Service container for dependency injection
//!
//! Wires up the conversion service with its collaborators.

use std::sync::Arc;

use crate::application::services::ConversionService;
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, Notifier, RealFileSystem, TerminalNotifier};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Notification sink
    pub notifier: Arc<dyn Notifier>,

    pub conversion: ConversionService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> ApplicationResult<Self> {
        let notifier = TerminalNotifier {
            show_info: settings.notifications.show_info,
            show_errors: settings.notifications.show_errors,
        };
        Self::with_deps(settings, Arc::new(RealFileSystem), Arc::new(notifier))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        notifier: Arc<dyn Notifier>,
    ) -> ApplicationResult<Self> {
        let settings = Arc::new(settings);
        let conversion = ConversionService::new(Arc::clone(&settings), Arc::clone(&notifier))?;

        Ok(Self {
            settings,
            fs,
            notifier,
            conversion,
        })
    }
}
