//! SEO scoring
//!
//! Folds the extracted facets into a single 0-100 score using fixed category
//! weights:
//!
//! | Category | Points | Rule |
//! |----------|--------|------|
//! | Title | 10 | 30-60 chars → 10, other non-empty → 5 |
//! | Description | 10 | 120-160 chars → 10, other non-empty → 5 |
//! | H1 count | 10 | exactly one → 10, several → 5 |
//! | Heading structure | 10 | H1 and H2 → 10, only one of them → 5 |
//! | Image alt coverage | 10 | `floor(10 * with_alt / total)` |
//! | Link health | 10 | `floor(10 * (1 - broken / total))` |
//! | Mobile-friendly | 10 | all or nothing |
//! | Performance | 20 | <2s → 20, <3s → 15, <5s → 10, else 5 |
//! | Sitemap bonus | 5 | sitemap found |
//! | Robots bonus | 5 | robots.txt found |
//!
//! The total is clamped to 100.

use crate::result::{Headings, Images, Links, Metadata, Performance};

/// Upper bound of the composite score
pub const MAX_SCORE: u32 = 100;

/// Points added when a sitemap or robots.txt is present
pub const PRESENCE_BONUS: u32 = 5;

/// Everything the scorer looks at
#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs<'a> {
    pub metadata: &'a Metadata,
    pub headings: &'a Headings,
    pub images: &'a Images,
    pub links: &'a Links,
    pub mobile_friendly: bool,
    pub performance: Option<&'a Performance>,
    pub has_sitemap: bool,
    pub has_robots_txt: bool,
}

/// Points earned per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub title: u32,
    pub description: u32,
    pub h1: u32,
    pub heading_structure: u32,
    pub image_alt: u32,
    pub link_health: u32,
    pub mobile_friendly: u32,
    pub performance: u32,
    pub sitemap_bonus: u32,
    pub robots_bonus: u32,
}

impl ScoreBreakdown {
    /// Sum of the weighted categories, before bonuses
    pub fn base(&self) -> u32 {
        self.title
            + self.description
            + self.h1
            + self.heading_structure
            + self.image_alt
            + self.link_health
            + self.mobile_friendly
            + self.performance
    }

    /// Final score: base plus bonuses, clamped to [`MAX_SCORE`]
    pub fn total(&self) -> u8 {
        let total = (self.base() + self.sitemap_bonus + self.robots_bonus).min(MAX_SCORE);
        total as u8
    }
}

/// Scores every category
pub fn score_breakdown(inputs: &ScoreInputs<'_>) -> ScoreBreakdown {
    ScoreBreakdown {
        title: length_points(inputs.metadata.title.as_deref(), 30, 60),
        description: length_points(inputs.metadata.description.as_deref(), 120, 160),
        h1: h1_points(inputs.headings),
        heading_structure: heading_structure_points(inputs.headings),
        image_alt: image_alt_points(inputs.images),
        link_health: link_health_points(inputs.links),
        mobile_friendly: if inputs.mobile_friendly { 10 } else { 0 },
        performance: performance_points(inputs.performance),
        sitemap_bonus: if inputs.has_sitemap { PRESENCE_BONUS } else { 0 },
        robots_bonus: if inputs.has_robots_txt { PRESENCE_BONUS } else { 0 },
    }
}

/// Computes the composite 0-100 score
pub fn calculate_score(inputs: &ScoreInputs<'_>) -> u8 {
    score_breakdown(inputs).total()
}

/// 10 inside the recommended length range, 5 for any other non-empty text
fn length_points(text: Option<&str>, min: usize, max: usize) -> u32 {
    match text {
        Some(text) if !text.is_empty() => {
            let len = text.chars().count();
            if (min..=max).contains(&len) {
                10
            } else {
                5
            }
        }
        _ => 0,
    }
}

fn h1_points(headings: &Headings) -> u32 {
    match headings.h1.len() {
        0 => 0,
        1 => 10,
        _ => 5,
    }
}

fn heading_structure_points(headings: &Headings) -> u32 {
    match (!headings.h1.is_empty(), !headings.h2.is_empty()) {
        (true, true) => 10,
        (true, false) | (false, true) => 5,
        (false, false) => 0,
    }
}

fn image_alt_points(images: &Images) -> u32 {
    if images.total == 0 {
        return 0;
    }
    let with_alt = images.total.saturating_sub(images.without_alt);
    (10 * with_alt / images.total) as u32
}

fn link_health_points(links: &Links) -> u32 {
    if links.total == 0 {
        return 0;
    }
    let healthy = links.total.saturating_sub(links.broken.len());
    (10 * healthy / links.total) as u32
}

fn performance_points(performance: Option<&Performance>) -> u32 {
    let Some(performance) = performance else {
        return 0;
    };

    match performance.load_time {
        t if t < 2.0 => 20,
        t if t < 3.0 => 15,
        t if t < 5.0 => 10,
        _ => 5,
    }
}
