//! FILENAME: core/datasource/src/sort.rs
//! PURPOSE: Sort specification and the row comparators.
//! CONTEXT: The legacy comparator never reports equality; its tie order is
//! pinned down by the binary insertion sort in `sorted_order`, which always
//! probes `compare(pivot, placed)`. Equal keys therefore keep their stored
//! order when ascending and come out reversed when descending. The stable
//! mode is the conventional three-way comparator over a stable sort.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::value::{Row, RowValue};

// ============================================================================
// SORT SPEC
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
    #[default]
    #[serde(rename = "")]
    None,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
            SortDirection::None => "",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            "" => Ok(SortDirection::None),
            other => Err(format!("Unknown sort direction: {}", other)),
        }
    }
}

/// Active sort key and direction reported by a sort control.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub active: Option<String>,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(active: impl Into<String>, direction: SortDirection) -> Self {
        SortSpec {
            active: Some(active.into()),
            direction,
        }
    }

    pub fn none() -> Self {
        SortSpec::default()
    }

    /// The key to sort by, or None when the spec leaves rows unsorted.
    pub fn active_key(&self) -> Option<&str> {
        match (&self.active, self.direction) {
            (Some(key), SortDirection::Asc | SortDirection::Desc) if !key.is_empty() => {
                Some(key.as_str())
            }
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active_key().is_some()
    }
}

/// Which comparator the store applies to the live view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparatorMode {
    /// Never-equal comparator with binary insertion sort tie order.
    #[default]
    Legacy,
    /// Three-way comparator; ties keep stored order in both directions.
    Stable,
}

// ============================================================================
// COMPARATORS
// ============================================================================

/// Legacy two-way comparison of two cell values.
///
/// If either side is numeric-looking the comparison is numeric and a
/// non-numeric side counts as 0. Otherwise only two texts are ordered
/// (by UTF-16 code units); any other pair is "not less". The result is
/// `Less` or `Greater`, never `Equal`.
pub fn legacy_compare(a: &RowValue, b: &RowValue, direction: SortDirection) -> Ordering {
    let na = a.to_number();
    let nb = b.to_number();

    let less = if na.is_some() || nb.is_some() {
        na.unwrap_or(0.0) < nb.unwrap_or(0.0)
    } else {
        match (a, b) {
            (RowValue::Text(x), RowValue::Text(y)) => utf16_cmp(x, y) == Ordering::Less,
            _ => false,
        }
    };

    let ordering = if less { Ordering::Less } else { Ordering::Greater };
    if direction == SortDirection::Asc {
        ordering
    } else {
        ordering.reverse()
    }
}

/// Three-way comparison in ascending order.
///
/// Orders by the key `(number, kind, text)`: the number is the value's
/// numeric reading, with non-numeric values counting as 0 as in
/// `legacy_compare`. Among equal numbers, numeric values come first, then
/// text (by UTF-16 code units), then everything else. This is a total
/// order, so it is safe to hand to `sort_by`.
pub fn three_way_compare(a: &RowValue, b: &RowValue) -> Ordering {
    let na = a.to_number();
    let nb = b.to_number();

    na.unwrap_or(0.0)
        .total_cmp(&nb.unwrap_or(0.0))
        .then_with(|| kind_rank(a, na).cmp(&kind_rank(b, nb)))
        .then_with(|| match (a, b, na, nb) {
            (RowValue::Text(x), RowValue::Text(y), None, None) => utf16_cmp(x, y),
            _ => Ordering::Equal,
        })
}

fn kind_rank(value: &RowValue, number: Option<f64>) -> u8 {
    match (value, number) {
        (_, Some(_)) => 0,
        (RowValue::Text(_), None) => 1,
        _ => 2,
    }
}

fn utf16_cmp(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}

// ============================================================================
// ORDERING
// ============================================================================

/// Computes the display order of `rows` as indices into the slice.
/// `rows` itself is never reordered.
pub fn sorted_order(rows: &[Row], spec: &SortSpec, mode: ComparatorMode) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();

    let key = match spec.active_key() {
        Some(key) => key,
        None => return order,
    };

    match mode {
        ComparatorMode::Legacy => {
            binary_insertion_sort(&mut order, |pivot, placed| {
                legacy_compare(rows[pivot].get(key), rows[placed].get(key), spec.direction)
            });
        }
        ComparatorMode::Stable => {
            let descending = spec.direction == SortDirection::Desc;
            order.sort_by(|&i, &j| {
                let ordering = three_way_compare(rows[i].get(key), rows[j].get(key));
                if descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }
    }

    order
}

/// Insertion sort that locates each pivot by binary search over the
/// already placed prefix, moving right unless `compare(pivot, placed)`
/// is `Less`. Works with comparators that never report equality.
fn binary_insertion_sort<F>(order: &mut [usize], compare: F)
where
    F: Fn(usize, usize) -> Ordering,
{
    for i in 1..order.len() {
        let pivot = order[i];
        let mut left = 0;
        let mut right = i;

        while left < right {
            let mid = left + (right - left) / 2;
            if compare(pivot, order[mid]) == Ordering::Less {
                right = mid;
            } else {
                left = mid + 1;
            }
        }

        order.copy_within(left..i, left + 1);
        order[left] = pivot;
    }
}
