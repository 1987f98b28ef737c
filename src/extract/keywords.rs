use crate::result::{KeywordStat, Keywords};
use regex::Regex;
use scraper::Html;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

/// Number of keywords kept in the density table
pub const TOP_KEYWORDS: usize = 20;

/// Elements whose text never counts as page copy
const IGNORED_ELEMENTS: &[&str] = &["script", "style"];

fn word_pattern() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"\b[a-z]{3,}\b").expect("invalid word regex"))
}

/// Computes keyword density over the visible text of the page
///
/// Text inside `script` and `style` is ignored. The remaining text is
/// lowercased and every standalone run of three or more ASCII letters is a
/// word. Density is `100 * count / total_words`. The top
/// [`TOP_KEYWORDS`] words by count are kept; ties keep first-seen order.
pub fn extract_keywords(document: &Html) -> Keywords {
    let text = visible_text(document).to_lowercase();

    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut total_words = 0usize;

    for word in word_pattern().find_iter(&text).map(|m| m.as_str()) {
        total_words += 1;
        match index.get(word) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(word, counts.len());
                counts.push((word, 1));
            }
        }
    }

    if total_words == 0 {
        return Keywords::default();
    }

    // stable: equal counts stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(TOP_KEYWORDS);

    let mut density = BTreeMap::new();
    let mut top_keywords = Vec::with_capacity(counts.len());
    for (word, count) in counts {
        let share = (count as f64 / total_words as f64) * 100.0;
        density.insert(word.to_string(), share);
        top_keywords.push(KeywordStat {
            word: word.to_string(),
            count,
            density: share,
        });
    }

    Keywords {
        density,
        top_keywords,
    }
}

/// Concatenates every text node that is not inside an ignored element
fn visible_text(document: &Html) -> String {
    let mut text = String::new();

    for node in document.tree.root().descendants() {
        let Some(chunk) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| IGNORED_ELEMENTS.contains(&element.name()))
        });

        if !hidden {
            text.push_str(chunk);
        }
    }

    text
}
