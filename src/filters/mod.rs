//! Built-in filter packages

use crate::plugin::PluginCatalog;
use crate::HarnessError;

pub mod keywords;
pub mod length;
pub mod numeric;

/// Register every built-in filter package
pub fn register(catalog: &mut PluginCatalog) -> Result<(), HarnessError> {
    catalog.register(keywords::registration())?;
    catalog.register(length::registration())?;
    catalog.register(numeric::registration())?;
    Ok(())
}
