//! Movie records returned by the movie catalog.
//!
//! [`MovieSummary`] mirrors one element of TMDB's `results` array. Only the
//! fields the UI displays are modeled; anything else in the payload is
//! ignored, and every field except `id` tolerates being absent.

use serde::{Deserialize, Serialize};

/// One movie as returned by a search or discover request.
///
/// The orchestrator only cares about the list length and the identity of the
/// first element (for the trending write). The remaining fields are formatted
/// by the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

impl MovieSummary {
    /// Creates a summary with only an id and title set.
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            popularity: 0.0,
            vote_average: None,
            release_date: None,
            original_language: None,
            overview: None,
        }
    }

    /// Returns the four-digit release year, if the release date has one.
    ///
    /// ```
    /// use cinescout::domain::MovieSummary;
    ///
    /// let mut movie = MovieSummary::new(268, "Batman");
    /// movie.release_date = Some("1989-06-23".to_string());
    /// assert_eq!(movie.release_year(), Some("1989"));
    ///
    /// movie.release_date = Some(String::new());
    /// assert_eq!(movie.release_year(), None);
    /// ```
    #[must_use]
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .filter(|year| year.chars().all(|c| c.is_ascii_digit()))
    }

    /// Formats the vote average with one decimal, or `"N/A"` when unrated.
    #[must_use]
    pub fn rating_label(&self) -> String {
        match self.vote_average {
            Some(vote) if vote > 0.0 => format!("{vote:.1}"),
            _ => "N/A".to_string(),
        }
    }

    /// Builds the full poster URL from the configured image base.
    ///
    /// Returns `None` when the movie has no poster.
    #[must_use]
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        self.poster_path.as_ref().map(|path| {
            format!(
                "{}/{}",
                image_base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_tmdb_result_with_missing_fields() {
        let json = r#"{"id": 414906, "title": "The Batman", "adult": false, "genre_ids": [80]}"#;
        let movie: MovieSummary = serde_json::from_str(json).unwrap();

        assert_eq!(movie.id, 414_906);
        assert_eq!(movie.title, "The Batman");
        assert!(movie.poster_path.is_none());
        assert!(movie.vote_average.is_none());
    }

    #[test]
    fn rating_label_treats_zero_as_unrated() {
        let mut movie = MovieSummary::new(1, "Unrated");
        assert_eq!(movie.rating_label(), "N/A");

        movie.vote_average = Some(0.0);
        assert_eq!(movie.rating_label(), "N/A");

        movie.vote_average = Some(7.26);
        assert_eq!(movie.rating_label(), "7.3");
    }

    #[test]
    fn poster_url_joins_without_double_slash() {
        let mut movie = MovieSummary::new(1, "Poster");
        movie.poster_path = Some("/abc.jpg".to_string());

        assert_eq!(
            movie.poster_url("https://image.tmdb.org/t/p/w500/").as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
    }

    #[test]
    fn release_year_rejects_garbage() {
        let mut movie = MovieSummary::new(1, "Odd");
        movie.release_date = Some("soon".to_string());
        assert_eq!(movie.release_year(), None);
    }
}
