use std::collections::BTreeMap;

use crate::rules::normalize;

/// Asset categories treated as non-countable when they appear in an asset
/// name. Matching is substring-based on the normalized name, so
/// "primary_residence" and "Life Insurance Policy" both land where expected.
const DEFAULT_NON_COUNTABLE: &[&str] = &[
    "home",
    "residence",
    "vehicle",
    "car",
    "burial",
    "funeral",
    "life insurance",
];

/// Tunable classification knobs.
///
/// The default category list mirrors the federal non-countable floor;
/// callers with jurisdiction-specific carve-outs can supply their own.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    non_countable_categories: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self::with_categories(DEFAULT_NON_COUNTABLE.iter().copied())
    }
}

impl ClassifierConfig {
    pub fn with_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let non_countable_categories = categories
            .into_iter()
            .map(|category| normalize(category.as_ref()))
            .filter(|category| !category.is_empty())
            .collect();
        Self {
            non_countable_categories,
        }
    }

    fn is_non_countable(&self, asset_name: &str) -> bool {
        let name = normalize_asset_name(asset_name);
        self.non_countable_categories
            .iter()
            .any(|category| name.contains(category.as_str()))
    }
}

/// Assets split into the two buckets eligibility cares about.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetClassification {
    pub countable: BTreeMap<String, f64>,
    pub non_countable: BTreeMap<String, f64>,
}

impl AssetClassification {
    pub fn countable_total(&self) -> f64 {
        self.countable.values().sum()
    }

    pub fn non_countable_total(&self) -> f64 {
        self.non_countable.values().sum()
    }
}

/// Partition assets by name. Unrecognized assets count against the
/// resource limit; only a category match exempts them.
pub fn classify_assets(
    assets: &BTreeMap<String, f64>,
    config: &ClassifierConfig,
) -> AssetClassification {
    let mut classification = AssetClassification::default();
    for (name, &value) in assets {
        if config.is_non_countable(name) {
            classification.non_countable.insert(name.clone(), value);
        } else {
            classification.countable.insert(name.clone(), value);
        }
    }
    classification
}

/// Sum monthly income across all sources.
pub fn total_income(income: &BTreeMap<String, f64>) -> f64 {
    income.values().sum()
}

fn normalize_asset_name(name: &str) -> String {
    normalize(&name.replace(['_', '-'], " "))
}
