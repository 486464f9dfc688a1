use crate::catalog::Catalog;
use crate::error::{AppError, AppResult};
use crate::models::Movie;

/// Number of recommendations returned when the client does not ask otherwise
pub const DEFAULT_TOP_K: usize = 5;

/// One ranked result: a catalog entry and its similarity to the selection
#[derive(Debug, Clone, PartialEq)]
pub struct RankedMovie {
    pub movie: Movie,
    pub score: f32,
}

/// Ranks every other catalog entry by similarity to `selected_title`
///
/// Resolves the title to its matrix row (first match wins), filters out the
/// selected index itself, and returns the `top_k` highest-scoring entries.
/// The sort is stable and descending by score, so equal scores keep their
/// catalog order. Returns `NotFound` when the title is not in the catalog.
pub fn recommend(
    catalog: &Catalog,
    selected_title: &str,
    top_k: usize,
) -> AppResult<Vec<RankedMovie>> {
    if selected_title.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Selected title cannot be empty".to_string(),
        ));
    }
    if top_k == 0 {
        return Err(AppError::InvalidInput(
            "top_k must be at least 1".to_string(),
        ));
    }

    let selected = catalog.position_of_title(selected_title).ok_or_else(|| {
        AppError::NotFound(format!("Title not in catalog: {}", selected_title))
    })?;

    let mut scored: Vec<(usize, f32)> = catalog
        .similarity_row(selected)
        .iter()
        .copied()
        .enumerate()
        .filter(|(index, _)| *index != selected)
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let ranked: Vec<RankedMovie> = scored
        .into_iter()
        .take(top_k)
        .map(|(index, score)| RankedMovie {
            movie: catalog.movies()[index].clone(),
            score,
        })
        .collect();

    tracing::debug!(
        selected = %selected_title,
        selected_index = selected,
        results = ranked.len(),
        "Ranked recommendations"
    );

    Ok(ranked)
}
