//! Base trait shared by every capability

use crate::descriptor::PluginDescriptor;

/// Behaviour common to all plugin classes
pub trait Operation: Send + Sync {
    /// Class-level descriptor of this plugin
    fn descriptor(&self) -> &'static PluginDescriptor;

    /// Display name, defaults to the class identifier
    fn name(&self) -> &str {
        self.descriptor().class_name
    }

    fn is_heavy(&self) -> bool {
        self.descriptor().heavy
    }
}
