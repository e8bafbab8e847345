//! HTML-to-record extraction for product detail pages.
//!
//! Every section degrades independently: a page missing a section yields
//! that field's default rather than an error. Two deliberate exceptions,
//! in opposite directions. The rating histogram is parsed as one fallible
//! unit, so any surprise inside it nulls the whole `rating` field and
//! nothing else. A review entry missing its nested title or star label
//! fails the whole page as a parse error instead of being dropped, so an
//! unusually shaped review list is noticed rather than silently thinned.

use std::collections::BTreeMap;

use asinsnap_core::{ProductRecord, Rating, Review};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::ScrapeError;

const IMAGE_CDN_PREFIX: &str = "https://m.media-amazon.com/images/I/";

/// Parses one product page into a [`ProductRecord`].
///
/// A page without the product title element is not a product page
/// (bot interstitials, error pages); those yield
/// [`ProductRecord::empty`] rather than a partial record.
///
/// # Errors
///
/// Returns [`ScrapeError::MalformedReview`] when a review entry lacks its
/// title link, title text, or star label.
pub fn extract_product(html: &str) -> Result<ProductRecord, ScrapeError> {
    let document = Html::parse_document(html);

    let Some(title) = select_first(&document, "span#productTitle") else {
        return Ok(ProductRecord::empty());
    };

    Ok(ProductRecord {
        title: element_text(title),
        byline: select_first(&document, "a#bylineInfo")
            .map(element_text)
            .unwrap_or_default(),
        description: select_first(&document, "div#productDescription")
            .map(element_text)
            .unwrap_or_default(),
        category: extract_category(&document),
        alt_images: extract_alt_images(&document),
        detail: extract_detail(&document),
        important_information: extract_important_information(&document),
        rating: extract_rating(&document),
        reviews: extract_reviews(&document)?,
    })
}

fn extract_category(document: &Html) -> Vec<String> {
    select_first(document, "div#wayfinding-breadcrumbs_feature_div")
        .map(|crumbs| {
            crumbs
                .text()
                .collect::<String>()
                .split('›')
                .map(|segment| segment.trim().to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Gallery thumbnails come in per-size variants of one base image
/// (`41abc._AC_US40_.jpg`, `41abc._AC_US100_.jpg`, ...). Rebuilding each
/// URL from its basename stem collapses the variants to one canonical
/// URL. That rebuild is the only dedup applied; repeats of one base
/// image stay in the list, in encounter order.
fn extract_alt_images(document: &Html) -> Vec<String> {
    let Some(gallery) = select_first(document, "div#altImages") else {
        return Vec::new();
    };
    let img_sel = selector("img");
    gallery
        .select(&img_sel)
        .filter_map(|image| image.value().attr("src"))
        .filter(|src| src.starts_with(IMAGE_CDN_PREFIX) && src.ends_with("jpg"))
        .map(|src| {
            let basename = src.rsplit('/').next().unwrap_or(src);
            let stem = basename.split('.').next().unwrap_or(basename);
            format!("{IMAGE_CDN_PREFIX}{stem}.jpg")
        })
        .collect()
}

fn extract_detail(document: &Html) -> BTreeMap<String, String> {
    let mut detail = BTreeMap::new();
    let Some(bullets) = select_first(document, "div#detailBullets_feature_div") else {
        return detail;
    };
    // Bullet text is littered with newlines and Unicode format characters
    // (zero-width marks around the colon), so runs of whitespace and
    // "other"-category characters flatten to one space before splitting.
    let squeeze = Regex::new(r"[\s\p{C}]+").expect("static pattern parses");
    let li_sel = selector("li");
    for bullet in bullets.select(&li_sel) {
        let raw = bullet.text().collect::<String>();
        let flat = squeeze.replace_all(&raw, " ");
        let flat = flat.trim();
        // Only the first colon delimits; the value keeps any further
        // colons. A colon-free bullet becomes a key with an empty value.
        let (key, value) = match flat.split_once(':') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => (flat, ""),
        };
        detail.insert(key.to_string(), value.to_string());
    }
    detail
}

fn extract_important_information(document: &Html) -> BTreeMap<String, String> {
    let mut sections = BTreeMap::new();
    let Some(container) = select_first(document, "div#important-information") else {
        return sections;
    };
    let block_sel = selector("div.a-section.content");
    let span_sel = selector("span");
    let p_sel = selector("p");
    for block in container.select(&block_sel) {
        // A block without a heading span has no usable label.
        let Some(heading) = block.select(&span_sel).next() else {
            continue;
        };
        let body: String = block.select(&p_sel).flat_map(|p| p.text()).collect();
        sections.insert(element_text(heading), body.trim().to_string());
    }
    sections
}

/// Parses the rating section as one fallible unit: any missing piece
/// (score label, histogram list, row cells) drops the whole rating to
/// `None` without touching the rest of the record.
fn extract_rating(document: &Html) -> Option<Rating> {
    let histogram = select_first(document, "div#cm_cr_dp_d_rating_histogram")?;

    let score_sel = selector("span.a-size-medium.a-color-base");
    // The score text is kept exactly as rendered, untrimmed.
    let score = histogram
        .select(&score_sel)
        .next()?
        .text()
        .collect::<String>();

    let table_sel = selector("ul#histogramTable");
    let row_sel = selector("li");
    let label_sel = selector("div.a-section.a-spacing-none.a-text-left.aok-nowrap");
    let value_sel = selector("div.a-section.a-spacing-none.a-text-right.aok-nowrap");

    let table = histogram.select(&table_sel).next()?;
    let mut distribution = BTreeMap::new();
    for row in table.select(&row_sel) {
        let label = row.select(&label_sel).next()?;
        let value = row.select(&value_sel).next()?;
        distribution.insert(
            direct_text(label).trim().to_string(),
            direct_text(value).trim().to_string(),
        );
    }

    Some(Rating {
        score,
        distribution,
    })
}

fn extract_reviews(document: &Html) -> Result<Vec<Review>, ScrapeError> {
    let Some(list) = select_first(document, "ul#cm-cr-dp-review-list") else {
        return Ok(Vec::new());
    };
    let item_sel = selector("li");
    let mut reviews = Vec::new();
    for item in list.select(&item_sel) {
        reviews.push(extract_review(item)?);
    }
    Ok(reviews)
}

fn extract_review(item: ElementRef<'_>) -> Result<Review, ScrapeError> {
    let date = item
        .select(&selector("span.review-date"))
        .next()
        .map(|el| {
            // "Reviewed in the United States on January 3, 2024"; the date
            // is whatever trails the last "on".
            let text = el.text().collect::<String>();
            text.rsplit("on").next().unwrap_or("").trim().to_string()
        })
        .unwrap_or_default();

    let title_link = item
        .select(&selector("a.review-title-content"))
        .next()
        .ok_or_else(|| malformed("missing review title link"))?;
    let title = title_link
        .select(&selector("span"))
        .last()
        .map(element_text)
        .ok_or_else(|| malformed("review title has no text span"))?;
    let score = title_link
        .select(&selector("span.a-icon-alt"))
        .next()
        .map(element_text)
        .ok_or_else(|| malformed("review is missing its star label"))?;

    let text = item
        .select(&selector("div.review-text-content"))
        .next()
        .map(element_text)
        .unwrap_or_default();

    let helpfulness = item
        .select(&selector("span.cr-vote-text"))
        .next()
        .map(|el| {
            el.text()
                .collect::<String>()
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string()
        })
        .unwrap_or_else(|| "0".to_string());

    Ok(Review {
        date,
        title,
        score,
        text,
        helpfulness,
    })
}

fn malformed(reason: &str) -> ScrapeError {
    ScrapeError::MalformedReview {
        reason: reason.to_string(),
    }
}

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector parses")
}

fn select_first<'a>(document: &'a Html, css: &'static str) -> Option<ElementRef<'a>> {
    let sel = selector(css);
    document.select(&sel).next()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text of the element's direct child text nodes only. Histogram cells
/// nest helper elements whose text must not leak into the label.
fn direct_text(element: ElementRef<'_>) -> String {
    element
        .children()
        .filter_map(|child| child.value().as_text())
        .map(|text| &**text)
        .collect()
}
