//! Sales totals for the analytics card: repair and cosmetics columns summed
//! across the ledger, plus how many rows actually carried a sale.

use serde::{Deserialize, Serialize};

/// One ledger row. Zero means "no sale in this cell", so counts below only
/// include non-zero cells.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SalesEntry {
    #[serde(deserialize_with = "crate::de_amount")]
    pub repair: f64,
    #[serde(deserialize_with = "crate::de_amount")]
    pub cosmetics: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct SalesTotals {
    pub repair_sum: f64,
    pub repair_count: usize,
    pub cosmetics_sum: f64,
    pub cosmetics_count: usize,
}

impl SalesTotals {
    pub fn collect<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a SalesEntry>,
    {
        let mut totals = Self::default();
        for entry in entries {
            let repair = if entry.repair.is_finite() { entry.repair } else { 0.0 };
            let cosmetics = if entry.cosmetics.is_finite() { entry.cosmetics } else { 0.0 };
            totals.repair_sum += repair;
            totals.cosmetics_sum += cosmetics;
            if repair != 0.0 {
                totals.repair_count += 1;
            }
            if cosmetics != 0.0 {
                totals.cosmetics_count += 1;
            }
        }
        totals
    }
}
