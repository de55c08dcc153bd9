//! Search text handling: normalization, keyword extraction and the
//! diacritic-tolerant patterns handed to storage.
//!
//! Patterns are plain POSIX-compatible regular expressions meant to be
//! matched case-insensitively against the stored (un-normalized) text.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};
use uuid::Uuid;

use crate::constants::{
    DEFAULT_SEARCH_LIMIT, MAX_SEARCH_KEYWORDS, MAX_SEARCH_LIMIT, MIN_KEYWORD_EXCLUSIVE_LENGTH,
};
use crate::error::DomainError;

/// Spanish stop words, already normalized.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "el", "la", "los", "las", "un", "una", "unos", "unas", "de", "del", "al", "a", "y", "o",
        "u", "e", "en", "con", "por", "para", "que", "se", "su", "sus", "lo", "le", "les", "es",
        "son", "como", "mas", "pero", "sin", "sobre", "entre", "este", "esta", "estos", "estas",
        "ese", "esa", "esos", "esas", "aquel", "aquella", "muy", "ya", "hay", "fue", "ser", "han",
        "has", "era", "cual", "cuales", "donde", "cuando", "desde", "hasta", "tambien", "todo",
        "todos", "toda", "todas", "otro", "otra", "otros", "otras", "mismo", "misma", "nos",
        "ni", "mi", "mis", "tu", "tus", "porque", "segun", "tras", "ante", "bajo", "cada",
        "quien", "quienes",
    ]
    .into_iter()
    .collect()
});

/// Accent-free, lower-cased, trimmed form of `text`.
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// Whether `word` (normalized) is a Spanish stop word.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Significant keywords of `text`, in order of appearance.
///
/// Tokens are split on runs of non-word characters; tokens of two characters
/// or fewer and stop words are dropped; at most `MAX_SEARCH_KEYWORDS` are
/// kept.
pub fn extract_keywords(text: &str) -> Vec<String> {
    normalize(text)
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() > MIN_KEYWORD_EXCLUSIVE_LENGTH)
        .filter(|token| !is_stop_word(token))
        .take(MAX_SEARCH_KEYWORDS)
        .map(str::to_string)
        .collect()
}

/// Character class covering the accented variants of `c`, if it has any.
fn accent_class(c: char) -> Option<&'static str> {
    match c {
        'a' => Some("[aáàäâ]"),
        'e' => Some("[eéèëê]"),
        'i' => Some("[iíìïî]"),
        'o' => Some("[oóòöô]"),
        'u' => Some("[uúùüû]"),
        'n' => Some("[nñ]"),
        _ => None,
    }
}

/// Diacritic-tolerant pattern for `term`.
///
/// The term is normalized and escaped, then every vowel and `n` is widened
/// to a class of its accented forms, so `alianza` matches `Aliánza` under
/// case-insensitive matching.
pub fn flexible_pattern(term: &str) -> String {
    regex::escape(&normalize(term))
        .chars()
        .fold(String::new(), |mut pattern, c| {
            match accent_class(c) {
                Some(class) => pattern.push_str(class),
                None => pattern.push(c),
            }
            pattern
        })
}

/// Matching strategy requested by the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Whole query as one diacritic-tolerant substring
    Exact,
    /// Any significant keyword
    #[default]
    Smart,
}

impl FromStr for SearchMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(SearchMode::Exact),
            "smart" => Ok(SearchMode::Smart),
            other => Err(DomainError::validation(format!(
                "Tipo de búsqueda inválido '{}'. Debe ser 'exact' o 'smart'",
                other
            ))),
        }
    }
}

/// What a query turns into before hitting storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPlan {
    pub normalized: String,
    pub keywords: Vec<String>,
    /// Patterns OR-ed together across every searched field
    pub patterns: Vec<String>,
}

impl SearchPlan {
    /// Build the plan for `query`.
    ///
    /// Smart mode with no surviving keyword falls back to the exact pattern.
    pub fn new(query: &str, mode: SearchMode) -> Self {
        let normalized = normalize(query);
        let keywords = extract_keywords(query);

        let patterns = match mode {
            SearchMode::Smart if !keywords.is_empty() => {
                keywords.iter().map(|k| flexible_pattern(k)).collect()
            }
            _ => vec![flexible_pattern(&normalized)],
        };

        Self {
            normalized,
            keywords,
            patterns,
        }
    }
}

/// Page and page size after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub page: u64,
    pub limit: u64,
}

impl PageWindow {
    /// Clamp raw query values: `page` to at least 1, `limit` to
    /// `1..=MAX_SEARCH_LIMIT`.
    pub fn clamp(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.map_or(1, |p| p.max(1) as u64),
            limit: clamp_limit(limit),
        }
    }

    /// Rows to skip, capped at what Postgres accepts as an OFFSET.
    pub fn offset(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.limit)
            .min(i64::MAX as u64)
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

/// Clamp a raw limit to `1..=MAX_SEARCH_LIMIT`, defaulting when absent.
pub fn clamp_limit(limit: Option<i64>) -> u64 {
    limit.map_or(DEFAULT_SEARCH_LIMIT, |l| {
        l.clamp(1, MAX_SEARCH_LIMIT as i64) as u64
    })
}

/// Append-only record of a search call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SearchLog {
    pub id: Uuid,
    pub term: String,
    pub normalized_term: String,
    pub user_role: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSearchLog {
    pub term: String,
    pub normalized_term: String,
    pub user_role: Option<String>,
}
