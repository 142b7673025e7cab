//! Folding layer outputs into one resolved mapping.
//!
//! Layers are folded strictly in list order. Two layers supplying the same
//! value for a path is never a conflict; differing values are resolved by
//! the configured [`ConflictPolicy`], and every shadowing is recorded as an
//! [`Override`] for later inspection.

use core::fmt;

use indexmap::IndexMap;

use crate::error::ConfigError;
use crate::item::Item;
use crate::path::KeyPath;
use crate::provenance::Provenance;

/// How the merge treats two layers disagreeing on a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// The earliest layer to supply a value for a path keeps it.
    FirstWins,
    /// Later layers override earlier ones (the conventional layering
    /// behaviour, and the default).
    #[default]
    LastWins,
    /// Any disagreement fails the build with [`ConfigError::Conflict`].
    ErrorOnConflict,
}

/// Two layers disagreeing on the value of the same path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// The contested path.
    pub path: KeyPath,
    /// Value supplied by the earlier layer.
    pub first_value: String,
    /// Name of the earlier layer.
    pub first_layer: String,
    /// Value supplied by the later layer.
    pub second_value: String,
    /// Name of the later layer.
    pub second_layer: String,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "conflicting values for `{}`: `{}` (layer `{}`) vs `{}` (layer `{}`)",
            self.path, self.first_value, self.first_layer, self.second_value, self.second_layer
        )
    }
}

/// A record of one layer shadowing another at a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    /// The path that was overridden.
    pub path: KeyPath,
    /// The value that won.
    pub winning_value: String,
    /// Name of the layer that won.
    pub winning_layer: String,
    /// The value that lost.
    pub losing_value: String,
    /// Name of the layer that lost.
    pub losing_layer: String,
}

impl fmt::Display for Override {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: `{}` (layer `{}`) overrides `{}` (layer `{}`)",
            self.path, self.winning_value, self.winning_layer, self.losing_value, self.losing_layer
        )
    }
}

/// One layer's resolved output, ready for the fold.
pub(crate) struct ResolvedLayer {
    pub name: String,
    pub items: Vec<Item>,
}

/// A resolved value with its attribution.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub value: String,
    pub layer: String,
    pub provenance: Option<Provenance>,
}

/// The fold result: final mapping plus the overrides that shaped it.
#[derive(Debug)]
pub(crate) struct Merged {
    pub entries: IndexMap<KeyPath, Entry>,
    pub overrides: Vec<Override>,
}

/// Fold resolved layers, in order, into one mapping.
///
/// Deterministic: the same layers and policy always produce the same
/// entries in the same order.
pub(crate) fn merge(layers: Vec<ResolvedLayer>, policy: ConflictPolicy) -> Result<Merged, ConfigError> {
    use indexmap::map::Entry as Slot;

    let mut entries: IndexMap<KeyPath, Entry> = IndexMap::new();
    let mut overrides = Vec::new();

    for layer in layers {
        for item in layer.items {
            let slot = match entries.entry(item.path) {
                Slot::Vacant(slot) => {
                    slot.insert(Entry {
                        value: item.value,
                        layer: layer.name.clone(),
                        provenance: item.provenance,
                    });
                    continue;
                }
                Slot::Occupied(slot) => slot,
            };

            let path = slot.key().clone();
            let existing = slot.into_mut();

            // Duplicate within one layer: the source's own order decides,
            // last occurrence wins. Policies only arbitrate across layers.
            if existing.layer == layer.name {
                existing.value = item.value;
                existing.provenance = item.provenance;
                continue;
            }

            // Agreement across layers is not a conflict under any policy.
            if existing.value == item.value {
                continue;
            }

            match policy {
                ConflictPolicy::FirstWins => {
                    tracing::debug!(
                        path = %path,
                        kept = %existing.layer,
                        ignored = %layer.name,
                        "first-wins: keeping earlier value"
                    );
                    overrides.push(Override {
                        path,
                        winning_value: existing.value.clone(),
                        winning_layer: existing.layer.clone(),
                        losing_value: item.value,
                        losing_layer: layer.name.clone(),
                    });
                }
                ConflictPolicy::LastWins => {
                    tracing::debug!(
                        path = %path,
                        kept = %layer.name,
                        shadowed = %existing.layer,
                        "last-wins: overriding earlier value"
                    );
                    overrides.push(Override {
                        path,
                        winning_value: item.value.clone(),
                        winning_layer: layer.name.clone(),
                        losing_value: std::mem::replace(&mut existing.value, item.value),
                        losing_layer: std::mem::replace(&mut existing.layer, layer.name.clone()),
                    });
                    existing.provenance = item.provenance;
                }
                ConflictPolicy::ErrorOnConflict => {
                    return Err(ConfigError::Conflict(Conflict {
                        path,
                        first_value: existing.value.clone(),
                        first_layer: existing.layer.clone(),
                        second_value: item.value,
                        second_layer: layer.name.clone(),
                    }));
                }
            }
        }
    }

    Ok(Merged { entries, overrides })
}
