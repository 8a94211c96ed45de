use std::collections::HashMap;

use leffa_core::Product;
use serde::Serialize;

/// Chart colors, assigned by rank.
pub const CATEGORY_PALETTE: [&str; 10] = [
    "#3B82F6", "#EF4444", "#10B981", "#8B5CF6", "#F59E0B", "#06B6D4", "#EC4899", "#84CC16",
    "#F97316", "#6366F1",
];

pub const TOP_CATEGORY_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub name: String,
    /// Percentage of *all* products, so the top five need not sum to 100.
    pub value: usize,
    pub color: String,
}

/// Groups products by category and returns the five largest groups.
///
/// Ties keep the order in which categories were first seen.
#[must_use]
pub fn build_category_distribution(products: &[Product]) -> Vec<CategoryShare> {
    let total = products.len();
    if total == 0 {
        return Vec::new();
    }

    let mut groups: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for product in products {
        let label = product.category_label();
        let next = groups.len();
        let slot = *index.entry(label).or_insert(next);
        if slot == next {
            groups.push((label, 0));
        }
        groups[slot].1 += 1;
    }

    groups.sort_by(|a, b| b.1.cmp(&a.1));

    groups
        .into_iter()
        .take(TOP_CATEGORY_COUNT)
        .enumerate()
        .map(|(rank, (name, count))| CategoryShare {
            name: name.to_string(),
            value: percent_rounded(count, total),
            color: CATEGORY_PALETTE[rank % CATEGORY_PALETTE.len()].to_string(),
        })
        .collect()
}

/// `round(part / whole × 100)` with halves rounded up, in integers.
fn percent_rounded(part: usize, whole: usize) -> usize {
    (part * 200 + whole) / (whole * 2)
}
