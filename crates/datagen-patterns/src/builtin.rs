//! Fixed candidate lists for the built-in country patterns.

/// Candidates for `eu_countries`.
pub const EU_COUNTRIES: [&str; 5] = ["Germany", "Austria", "France", "Spain", "Denmark"];

/// Candidates for `more_countries`: the EU list plus four non-EU countries.
pub const MORE_COUNTRIES: [&str; 9] = [
    "Germany",
    "Austria",
    "France",
    "Spain",
    "Denmark",
    "Russia",
    "USA",
    "Egypt",
    "South-Korea",
];

/// Candidates for `null_countries`: `more_countries` plus an empty string,
/// modeling a nullable column.
pub const NULL_COUNTRIES: [&str; 10] = [
    "Germany",
    "Austria",
    "France",
    "Spain",
    "Denmark",
    "Russia",
    "USA",
    "Egypt",
    "South-Korea",
    "",
];
