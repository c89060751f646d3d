//! Variable references in configuration strings.
//!
//! Values go through [`shellexpand`]: `$VAR`, `${VAR}` and `${VAR:-default}`
//! are replaced from the process environment and `$$` is a literal `$`.
//! A reference to an unset variable without a default is an error.

use crate::ConfigError;

/// Expand variable references in `value`, naming `field` on failure.
pub(crate) fn expand_vars(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env_with_context(value, |var| std::env::var(var).map(Some))
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            var: e.var_name,
            source: e.cause,
        })
}
