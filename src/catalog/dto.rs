use serde::Deserialize;

/// Query string for movie browsing: optional substring search, optional
/// genre filter, limit/skip pagination.
#[derive(Debug, Deserialize)]
pub struct MovieQuery {
    pub search: Option<String>,
    pub genre_id: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub skip: i64,
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieCreate {
    pub title: String,
    pub title_ru: String,
    pub description: String,
    pub description_ru: String,
    pub year: i32,
    pub duration: i32,
    pub genre_ids: Vec<String>,
    pub poster_url: String,
    pub trailer_url: String,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub rating: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_query_defaults() {
        let q: MovieQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.limit, 20);
        assert_eq!(q.skip, 0);
        assert!(q.search.is_none());
        assert!(q.genre_id.is_none());
    }

    #[test]
    fn movie_create_defaults_rating_and_video() {
        let body = r#"{
            "title": "The Matrix", "title_ru": "Матрица",
            "description": "d", "description_ru": "d",
            "year": 1999, "duration": 136,
            "genre_ids": ["action", "sci-fi"],
            "poster_url": "p", "trailer_url": "t"
        }"#;
        let m: MovieCreate = serde_json::from_str(body).unwrap();
        assert_eq!(m.rating, 0.0);
        assert!(m.video_url.is_none());
    }
}
