/*
 * Public entry point of the plugin. `ScreenPlugin` owns the platform backend,
 * the window registry and the main window's screen manager, and turns channel
 * calls (method name plus JSON-shaped arguments) into replies. The host wires
 * `handle_method_call` to its method channel and calls it on the UI thread.
 */
use crate::command_executor;
use crate::error::{PlatformError, Result as PlatformResult};
use crate::method_call::{MethodCall, MethodReply};
use crate::registry::WindowRegistry;
use crate::screen_manager::ScreenManager;
use crate::surface::WindowPlatform;
use crate::types::PluginConfig;
use serde_json::Value as JsonValue;

pub struct ScreenPlugin<P: WindowPlatform> {
    pub(crate) config: PluginConfig,
    pub(crate) platform: P,
    pub(crate) registry: WindowRegistry<P::Surface>,
    pub(crate) screen: Option<ScreenManager<P::Surface>>,
}

impl<P: WindowPlatform> ScreenPlugin<P> {
    /// Creates the plugin and attaches the host's main window as window 0.
    pub fn new(mut platform: P, config: PluginConfig) -> PlatformResult<Self> {
        let mut registry = WindowRegistry::new();
        registry.attach_main_window(platform.main_window()?);
        log::debug!(
            "ScreenPlugin: registered on channel '{}'",
            config.channel_name
        );
        Ok(Self {
            config,
            platform,
            registry,
            screen: None,
        })
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn registry(&self) -> &WindowRegistry<P::Surface> {
        &self.registry
    }

    pub fn screen_manager(&self) -> Option<&ScreenManager<P::Surface>> {
        self.screen.as_ref()
    }

    pub(crate) fn screen_mut(&mut self) -> PlatformResult<&mut ScreenManager<P::Surface>> {
        self.screen.as_mut().ok_or(PlatformError::ScreenNotInitialized)
    }

    pub fn handle_method_call(&mut self, method: &str, args: &JsonValue) -> MethodReply {
        log::debug!("ScreenPlugin: method call '{method}'");
        let result = MethodCall::parse(method, args)
            .and_then(|call| command_executor::execute_method_call(self, call));
        match &result {
            Err(PlatformError::NotImplemented(_)) => {
                log::warn!("ScreenPlugin: '{method}' is not implemented")
            }
            Err(error) => log::warn!("ScreenPlugin: '{method}' failed: {error}"),
            Ok(_) => {}
        }
        MethodReply::from_result(result)
    }

    /// Same as `handle_method_call`, returning the JSON reply envelope.
    pub fn handle_method_call_json(&mut self, method: &str, args: &JsonValue) -> JsonValue {
        self.handle_method_call(method, args).to_json()
    }
}
