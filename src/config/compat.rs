//! Backward compatibility for prefixed option keys
//!
//! Older records store options as `extra__azure_data_explorer__<key>`. This
//! pass folds them into plain keys so nothing downstream needs to know about
//! the old format.

use std::collections::BTreeMap;

use crate::api::constants::LEGACY_PREFIX;
use crate::api::models::ConnectionOptions;

/// Options after folding legacy keys, plus any conflict warnings raised
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedExtras {
    pub options: ConnectionOptions,
    pub warnings: Vec<String>,
}

/// Fold legacy prefixed keys into plain ones
///
/// When both forms are present the plain value wins, whatever the prefixed
/// value is, and a single warning is logged for that key.
pub fn normalize_extras(raw: &BTreeMap<String, String>) -> NormalizedExtras {
    let mut normalized = NormalizedExtras::default();

    for (key, value) in raw {
        if key.starts_with(LEGACY_PREFIX) {
            continue;
        }
        normalized.options.insert(key.clone(), value.clone());
    }

    for (key, value) in raw {
        let Some(plain) = key.strip_prefix(LEGACY_PREFIX) else {
            continue;
        };
        if plain.is_empty() {
            log::debug!("Ignoring bare legacy prefix key '{}'", key);
            continue;
        }

        if raw.contains_key(plain) {
            let warning = format!(
                "Using value for `{}`. Please ensure this is the correct value and remove the backcompat key `{}`.",
                plain, key
            );
            log::warn!("{}", warning);
            normalized.warnings.push(warning);
        } else {
            normalized.options.insert(plain, value.clone());
        }
    }

    normalized
}
