//! CLI command implementations.

mod components;
pub(crate) mod icons;
mod render;

pub(crate) use components::ComponentsArgs;
pub(crate) use render::RenderArgs;

use docshim_adapter::{Component, ComponentMap};
use docshim_config::Config;

/// Caller component layer built from `[components]` config entries.
pub(crate) fn caller_components(config: &Config) -> ComponentMap {
    config
        .components
        .iter()
        .fold(ComponentMap::new(), |map, (name, replacement)| {
            map.with(
                name.as_str(),
                Component::host_element(replacement.element.as_str(), replacement.class.clone()),
            )
        })
}
