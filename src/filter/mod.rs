//! Client-side filtering and sorting of listing collections.
//!
//! Each vertical has a criteria struct (what the user selected) and a panel (the
//! criteria plus facets derived from the collection). Applying criteria never
//! mutates the source collection: predicates run in the order numeric range,
//! categorical membership, boolean flags, and the survivors are then sorted.

mod product;
mod property;

pub use product::{ProductCriteria, ProductFacets, ProductPanel};
pub use property::{PropertyCriteria, PropertyFacets, PropertyPanel};

use crate::models::{Product, Property};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::hash::Hash;
use std::str::FromStr;

/// Ordering applied after filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    Newest,
}

impl FromStr for SortKey {
    type Err = String;

    /// Accepts the select values used by both panels (`price-asc`, `rent-desc`, `newest`, ...)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price-asc" | "rent-asc" => Ok(SortKey::PriceAsc),
            "price-desc" | "rent-desc" => Ok(SortKey::PriceDesc),
            "newest" => Ok(SortKey::Newest),
            other => Err(format!("unknown sort key {:?}", other)),
        }
    }
}

/// Inclusive numeric range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Whole-number bounds covering every value, `(0, 0)` when there are none
    pub fn bounds(values: impl IntoIterator<Item = f64>) -> Self {
        let mut iter = values.into_iter();
        let Some(first) = iter.next() else {
            return Self::new(0.0, 0.0);
        };

        let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Self::new(min.floor(), max.ceil())
    }
}

/// A distinct filterable value and how many items carry it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Facet<K> {
    pub value: K,
    pub count: usize,
}

/// Distinct values in first-seen order, with counts. Items yielding `None` are skipped.
pub(crate) fn facets<T, K>(items: &[T], key: impl Fn(&T) -> Option<K>) -> Vec<Facet<K>>
where
    K: Eq + Hash + Clone,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut out: Vec<Facet<K>> = Vec::new();

    for value in items.iter().filter_map(key) {
        match index.get(&value) {
            Some(&i) => out[i].count += 1,
            None => {
                index.insert(value.clone(), out.len());
                out.push(Facet { value, count: 1 });
            }
        }
    }
    out
}

/// Add `value` to the selection, or remove it if already selected
pub(crate) fn toggle<K: PartialEq>(selection: &mut Vec<K>, value: K) {
    match selection.iter().position(|v| *v == value) {
        Some(i) => {
            selection.remove(i);
        }
        None => selection.push(value),
    }
}

/// What the sorter needs from a listing
pub trait Listing {
    /// Price for products, monthly rent for properties
    fn price(&self) -> f64;
    fn created_at(&self) -> DateTime<Utc>;
}

impl Listing for Product {
    fn price(&self) -> f64 {
        self.selling_price
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Listing for Property {
    fn price(&self) -> f64 {
        self.rent_per_month
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Stable sort in place. `None` keeps the current order.
pub fn sort_listings<T: Listing>(items: &mut [T], key: Option<SortKey>) {
    match key {
        Some(SortKey::PriceAsc) => items.sort_by(|a, b| a.price().total_cmp(&b.price())),
        Some(SortKey::PriceDesc) => items.sort_by(|a, b| b.price().total_cmp(&a.price())),
        Some(SortKey::Newest) => items.sort_by(|a, b| b.created_at().cmp(&a.created_at())),
        None => {}
    }
}

/// Minimum-price clamp used by both panels: within `[0, current max]`
pub(crate) fn clamp_min(value: f64, current: Range) -> f64 {
    value.max(0.0).min(current.max)
}

/// Maximum-price clamp: within `[current min, bound max]`
pub(crate) fn clamp_max(value: f64, current: Range, bounds: Range) -> f64 {
    value.min(bounds.max).max(current.min)
}
