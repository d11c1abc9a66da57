//! The government rate table. Entries are all-in rates in AED and are listed
//! in explicit priority order: combined categories first, so the partial
//! matcher can never pick "Conference" for an "Award Ceremony + Conference"
//! submission.

use serde::{Deserialize, Serialize};

/// Per-day surcharge once an event runs past the days covered by its base
/// rate.
pub const ADDITIONAL_DAY_FEE: u32 = 800;

/// Category used when a submitted event type matches nothing in the table.
pub const DEFAULT_CATEGORY: &str = "Conference";

/// How many event days the base rate covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncludedDays {
    /// The base rate covers the full run regardless of duration.
    AnyNumber,
    /// The base rate covers this many days; ticketed events pay
    /// [`ADDITIONAL_DAY_FEE`] per day beyond it.
    Fixed(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateEntry {
    pub category: &'static str,
    pub base_fee: u32,
    pub urgent_fee: u32,
    /// `None` means amendments are not applicable for this category.
    pub amendment_fee: Option<u32>,
    pub included_days: IncludedDays,
}

pub const RATE_TABLE: &[RateEntry] = &[
    RateEntry {
        category: "Award Ceremony + Conference + Exhibition",
        base_fee: 3070,
        urgent_fee: 500,
        amendment_fee: Some(800),
        included_days: IncludedDays::Fixed(1),
    },
    RateEntry {
        category: "Exhibition/Product Launch + Conference/Forum/Seminar/Summit",
        base_fee: 1770,
        urgent_fee: 500,
        amendment_fee: Some(800),
        included_days: IncludedDays::Fixed(1),
    },
    RateEntry {
        category: "Award Ceremony + Conference",
        base_fee: 2570,
        urgent_fee: 500,
        amendment_fee: Some(800),
        included_days: IncludedDays::Fixed(1),
    },
    RateEntry {
        category: "Conference + Exhibition",
        base_fee: 1770,
        urgent_fee: 500,
        amendment_fee: Some(800),
        included_days: IncludedDays::Fixed(1),
    },
    RateEntry {
        category: "Product Launch/Forum/Seminar/Summit",
        base_fee: 1270,
        urgent_fee: 500,
        amendment_fee: Some(800),
        included_days: IncludedDays::Fixed(1),
    },
    RateEntry {
        category: "Award Ceremony",
        base_fee: 1520,
        urgent_fee: 500,
        amendment_fee: Some(800),
        included_days: IncludedDays::Fixed(1),
    },
    RateEntry {
        category: "Conference",
        base_fee: 1270,
        urgent_fee: 500,
        amendment_fee: Some(800),
        included_days: IncludedDays::Fixed(1),
    },
    RateEntry {
        category: "Exhibition",
        base_fee: 1270,
        urgent_fee: 500,
        amendment_fee: Some(800),
        included_days: IncludedDays::AnyNumber,
    },
    RateEntry {
        category: "DJ Event",
        base_fee: 1520,
        urgent_fee: 500,
        amendment_fee: None,
        included_days: IncludedDays::Fixed(1),
    },
    RateEntry {
        category: "Musical Event",
        base_fee: 1520,
        urgent_fee: 500,
        amendment_fee: None,
        included_days: IncludedDays::Fixed(1),
    },
    RateEntry {
        category: "Comedy Show",
        base_fee: 1520,
        urgent_fee: 500,
        amendment_fee: None,
        included_days: IncludedDays::Fixed(1),
    },
];

/// How the submitted event type was bound to a table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Partial,
    Fallback,
}

#[derive(Debug, Clone, Copy)]
pub struct RateMatch {
    pub entry: &'static RateEntry,
    pub kind: MatchKind,
}

fn fallback_entry() -> &'static RateEntry {
    RATE_TABLE
        .iter()
        .find(|entry| entry.category == DEFAULT_CATEGORY)
        .unwrap_or(&RATE_TABLE[0])
}

/// Bind a submitted event type to a rate entry.
///
/// Case-insensitive exact match wins. Otherwise the table is scanned in
/// priority order for containment in either direction, scoring each hit by
/// the length of the contained string; a strictly longer hit replaces an
/// earlier one, so ties keep the higher-priority entry. Anything else falls
/// back to [`DEFAULT_CATEGORY`].
pub fn resolve_rate(event_type: &str) -> RateMatch {
    let needle = event_type.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return RateMatch {
            entry: fallback_entry(),
            kind: MatchKind::Fallback,
        };
    }

    if let Some(entry) = RATE_TABLE
        .iter()
        .find(|entry| entry.category.eq_ignore_ascii_case(&needle))
    {
        return RateMatch {
            entry,
            kind: MatchKind::Exact,
        };
    }

    let mut best: Option<(&'static RateEntry, usize)> = None;
    for entry in RATE_TABLE {
        let key = entry.category.to_ascii_lowercase();
        let overlap = if needle.contains(&key) {
            Some(key.len())
        } else if key.contains(&needle) {
            Some(needle.len())
        } else {
            None
        };

        if let Some(score) = overlap {
            if best.map_or(true, |(_, current)| score > current) {
                best = Some((entry, score));
            }
        }
    }

    match best {
        Some((entry, _)) => RateMatch {
            entry,
            kind: MatchKind::Partial,
        },
        None => RateMatch {
            entry: fallback_entry(),
            kind: MatchKind::Fallback,
        },
    }
}
