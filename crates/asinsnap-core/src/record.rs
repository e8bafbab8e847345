use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Everything extracted from one Amazon product detail page, written as one
/// JSON document per ASIN.
///
/// Field declaration order is the serialized field order, which downstream
/// consumers rely on; do not reorder. Mappings are `BTreeMap` so repeated
/// runs over the same page serialize byte-identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product title text. Empty on the sentinel record (see
    /// [`ProductRecord::empty`]); a real product page always carries one.
    pub title: String,
    /// Brand/store byline, e.g. `"Visit the Celestial Seasonings Store"`.
    pub byline: String,
    pub description: String,
    /// Breadcrumb trail segments, outermost first, each trimmed.
    pub category: Vec<String>,
    /// Canonical gallery image URLs with size-variant suffixes stripped,
    /// in encounter order. Rebuilding onto the CDN prefix is the only
    /// dedup applied, so repeats of one base image are kept.
    pub alt_images: Vec<String>,
    /// `detailBullets` key/value pairs, split on the first colon per bullet.
    pub detail: BTreeMap<String, String>,
    /// Heading → concatenated paragraph text for each information block.
    pub important_information: BTreeMap<String, String>,
    /// `None` when the rating section is missing or any part of it failed
    /// to parse; partial ratings are never emitted.
    pub rating: Option<Rating>,
    pub reviews: Vec<Review>,
}

impl ProductRecord {
    /// The record written for a page with no product title element
    /// (error pages, captcha interstitials, delisted ASINs).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` for the sentinel produced by [`ProductRecord::empty`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Aggregate star rating: overall score plus the histogram rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    /// Score label as displayed, e.g. `"4.6 out of 5"`. Kept verbatim.
    pub score: String,
    /// Histogram star-label → displayed share, e.g. `"5 star"` → `"70%"`.
    pub distribution: BTreeMap<String, String>,
}

/// One entry from the on-page review list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Date portion of the review byline (text after the final `"on"`),
    /// or empty when the byline is missing.
    pub date: String,
    pub title: String,
    /// Star label for this review, e.g. `"5.0 out of 5 stars"`.
    pub score: String,
    pub text: String,
    /// Leading token of the helpful-votes line, `"0"` when the line is
    /// absent. A string because Amazon renders counts like `"1,024"`.
    pub helpfulness: String,
}
