use chrono::{DateTime, Datelike, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

pub const DEFAULT_CATEGORY: &str = "cs.CV";
const DEFAULT_CATEGORIES: &[&str] = &[DEFAULT_CATEGORY];

/// Allowed categories per weekday (0 = Monday). Weekends are absent and use the default.
const WEEKDAY_CATEGORIES: &[(u32, &[&str])] = &[
    (0, &["cs.CV"]),
    (1, &["cs.CV"]),
    (2, &["cs.AI"]),
    (3, &["cs.LG"]),
    (4, &["cs.CV", "cs.AI", "cs.LG", "cs.CL"]),
];

const CATEGORY_LABELS: &[(&str, &str)] = &[
    ("cs.CV", "Computer Vision"),
    ("cs.AI", "Artificial Intelligence"),
    ("cs.LG", "Machine Learning"),
    ("cs.CL", "Natural Language Processing"),
];

pub fn categories_for_weekday(weekday: u32) -> &'static [&'static str] {
    WEEKDAY_CATEGORIES
        .iter()
        .find(|(day, _)| *day == weekday)
        .map(|(_, categories)| *categories)
        .unwrap_or(DEFAULT_CATEGORIES)
}

/// Explicit override wins; otherwise a uniform pick among today's categories (UTC)
pub fn resolve_category<R: Rng + ?Sized>(
    override_category: Option<&str>,
    now: DateTime<Utc>,
    rng: &mut R,
) -> String {
    if let Some(category) = override_category.filter(|c| !c.is_empty()) {
        return category.to_string();
    }

    let candidates = categories_for_weekday(now.weekday().num_days_from_monday());
    candidates
        .choose(rng)
        .copied()
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string()
}

/// Display label for a category; unknown categories label themselves
pub fn category_label(category: &str) -> String {
    CATEGORY_LABELS
        .iter()
        .find(|(key, _)| *key == category)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| category.to_string())
}
