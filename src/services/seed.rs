//! Fake drama generation for development databases.

use chrono::{Datelike, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::drama::{Drama, DramaFields};
use crate::store::{Collection, DocumentStore};

const DEFAULT_AMOUNT: usize = 10;
/// Largest batch a single seed request may insert.
pub const MAX_AMOUNT: usize = 1000;

const ADJECTIVES: &[&str] = &[
    "Eternal", "Hidden", "Silent", "Crimson", "Golden", "Wandering", "Forgotten", "Endless",
    "Burning", "Moonlit", "Falling", "Distant",
];
const NOUNS: &[&str] = &[
    "Palace", "Blossom", "Sword", "River", "Dynasty", "Promise", "Lantern", "Mountain",
    "Empress", "Garden", "Phoenix", "Secret",
];
const GENRES: &[&str] = &[
    "Romance", "Historical", "Wuxia", "Xianxia", "Comedy", "Thriller", "Fantasy", "Mystery",
    "Slice of Life", "Drama",
];
const GIVEN_NAMES: &[&str] = &[
    "Wei", "Jing", "Lin", "Xiao", "Yun", "Hao", "Mei", "Zhen", "Tao", "Ying", "Lei", "Qing",
];
const FAMILY_NAMES: &[&str] = &[
    "Zhang", "Wang", "Li", "Zhao", "Chen", "Liu", "Yang", "Huang", "Zhou", "Wu", "Xu", "Sun",
];

/// Body of `POST /chinadramas/seed`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedRequest {
    pub amount: Option<usize>,
    #[serde(default)]
    pub reset: bool,
}

fn pick<'a, R: Rng>(rng: &mut R, words: &[&'a str]) -> &'a str {
    words.choose(rng).copied().unwrap_or_default()
}

fn title<R: Rng>(rng: &mut R) -> String {
    format!("The {} {}", pick(rng, ADJECTIVES), pick(rng, NOUNS))
}

fn person<R: Rng>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, FAMILY_NAMES), pick(rng, GIVEN_NAMES))
}

/// One random drama released within the past ten years.
pub fn fake_drama<R: Rng>(rng: &mut R, current_year: i32) -> DramaFields {
    DramaFields {
        title: title(rng),
        english_title: Some(title(rng)),
        genre: vec![pick(rng, GENRES).to_string()],
        episodes: rng.gen_range(10..=60),
        release_year: rng.gen_range(current_year - 10..=current_year),
        cast: vec![person(rng), person(rng)],
    }
}

impl SeedRequest {
    /// Requested batch size, defaulting to 10 and capped at [`MAX_AMOUNT`].
    pub fn amount(&self) -> Result<usize, AppError> {
        match self.amount.unwrap_or(DEFAULT_AMOUNT) {
            amount if amount > MAX_AMOUNT => Err(AppError::Validation(format!(
                "amount must be at most {MAX_AMOUNT}"
            ))),
            amount => Ok(amount),
        }
    }
}

/// `amount` random dramas dated relative to the current year.
pub fn fake_dramas<R: Rng>(rng: &mut R, amount: usize) -> Vec<DramaFields> {
    let current_year = Utc::now().year();
    (0..amount).map(|_| fake_drama(rng, current_year)).collect()
}

/// Insert the given dramas, clearing the collection first when `reset` is set.
pub async fn seed_dramas(
    store: &dyn DocumentStore,
    collection_url: &str,
    reset: bool,
    dramas: Vec<DramaFields>,
) -> Result<Vec<Drama>, AppError> {
    if reset {
        let removed = store.clear(Collection::Dramas).await?;
        tracing::info!(removed, "Cleared drama collection");
    }

    let amount = dramas.len();
    let mut created = Vec::with_capacity(amount);
    for fields in dramas {
        let body = serde_json::to_value(&fields)
            .map_err(|e| AppError::Internal(format!("Failed to encode drama: {e}")))?;
        let doc = store.insert(Collection::Dramas, body).await?;
        created.push(Drama::from_document(doc, collection_url)?);
    }

    tracing::info!(amount, reset, "Seeded dramas");
    Ok(created)
}
