use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{AppError, AppResult};
use crate::models::Movie;

/// Precomputed pairwise similarity scores, indexed by catalog position
///
/// Symmetric by convention; symmetry is not enforced. `row(i)[j]` is the
/// similarity of item i to item j.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    rows: Vec<Vec<f32>>,
}

impl SimilarityMatrix {
    /// Validates that the matrix is square
    pub fn new(rows: Vec<Vec<f32>>) -> AppResult<Self> {
        let n = rows.len();
        if let Some(bad) = rows.iter().position(|row| row.len() != n) {
            return Err(AppError::Catalog(format!(
                "similarity matrix is not square: row {} has {} columns, expected {}",
                bad,
                rows[bad].len(),
                n
            )));
        }
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Scores of item `index` against every catalog item, including itself
    pub fn row(&self, index: usize) -> &[f32] {
        &self.rows[index]
    }
}

/// The in-memory catalog: movies paired with their similarity matrix
///
/// Loaded once at startup and immutable for the life of the process.
#[derive(Debug, Clone)]
pub struct Catalog {
    movies: Vec<Movie>,
    similarity: SimilarityMatrix,
}

impl Catalog {
    /// Validates that the matrix dimension matches the number of movies
    pub fn new(movies: Vec<Movie>, similarity: SimilarityMatrix) -> AppResult<Self> {
        if similarity.len() != movies.len() {
            return Err(AppError::Catalog(format!(
                "similarity matrix dimension {} does not match catalog size {}",
                similarity.len(),
                movies.len()
            )));
        }
        Ok(Self { movies, similarity })
    }

    /// Loads the catalog from its two serialized JSON blobs
    ///
    /// The catalog file is an array of `{id, title}` rows; the similarity
    /// file is an array of float rows.
    pub fn load<P: AsRef<Path>>(catalog_path: P, similarity_path: P) -> AppResult<Self> {
        let movies: Vec<Movie> = read_json(catalog_path.as_ref())?;
        let rows: Vec<Vec<f32>> = read_json(similarity_path.as_ref())?;

        tracing::debug!(
            movies = movies.len(),
            matrix_rows = rows.len(),
            "Catalog blobs read"
        );

        Self::new(movies, SimilarityMatrix::new(rows)?)
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Row index of the first movie whose title matches exactly
    pub fn position_of_title(&self, title: &str) -> Option<usize> {
        self.movies.iter().position(|movie| movie.title == title)
    }

    /// Similarity scores of the movie at `index` against the whole catalog
    pub fn similarity_row(&self, index: usize) -> &[f32] {
        self.similarity.row(index)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> AppResult<T> {
    let file = File::open(path)
        .map_err(|e| AppError::Catalog(format!("failed to open {}: {}", path.display(), e)))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::Catalog(format!("failed to parse {}: {}", path.display(), e)))
}
