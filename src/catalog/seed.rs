use sqlx::PgPool;
use tracing::{info, instrument};

use super::dto::MovieCreate;
use super::repo::{Genre, Movie};

fn sample_genres() -> Vec<Genre> {
    [
        ("action", "Action", "Боевик"),
        ("drama", "Drama", "Драма"),
        ("comedy", "Comedy", "Комедия"),
        ("thriller", "Thriller", "Триллер"),
        ("sci-fi", "Sci-Fi", "Фантастика"),
        ("horror", "Horror", "Ужасы"),
    ]
    .into_iter()
    .map(|(id, name, name_ru)| Genre {
        id: id.into(),
        name: name.into(),
        name_ru: name_ru.into(),
    })
    .collect()
}

fn sample_movies() -> Vec<MovieCreate> {
    vec![
        MovieCreate {
            title: "The Matrix".into(),
            title_ru: "Матрица".into(),
            description: "A computer programmer discovers reality is a simulation.".into(),
            description_ru: "Программист обнаруживает, что реальность - это симуляция.".into(),
            year: 1999,
            duration: 136,
            genre_ids: vec!["action".into(), "sci-fi".into()],
            poster_url: "https://image.tmdb.org/t/p/w500/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg".into(),
            trailer_url: "https://www.youtube.com/watch?v=vKQi3bBA1y8".into(),
            video_url: None,
            rating: 8.7,
        },
        MovieCreate {
            title: "Inception".into(),
            title_ru: "Начало".into(),
            description: "A thief enters dreams to steal secrets.".into(),
            description_ru: "Вор проникает в сны, чтобы красть секреты.".into(),
            year: 2010,
            duration: 148,
            genre_ids: vec!["action".into(), "thriller".into(), "sci-fi".into()],
            poster_url: "https://image.tmdb.org/t/p/w500/9gk7adHYeDvHkCSEqAvQNLV5Uge.jpg".into(),
            trailer_url: "https://www.youtube.com/watch?v=YoHD9XEInc0".into(),
            video_url: None,
            rating: 8.8,
        },
        MovieCreate {
            title: "The Dark Knight".into(),
            title_ru: "Темный рыцарь".into(),
            description: "Batman faces his greatest challenge with the Joker.".into(),
            description_ru: "Бэтмен сталкивается с величайшим вызовом - Джокером.".into(),
            year: 2008,
            duration: 152,
            genre_ids: vec!["action".into(), "drama".into(), "thriller".into()],
            poster_url: "https://image.tmdb.org/t/p/w500/qJ2tW6WMUDux911r6m7haRef0WH.jpg".into(),
            trailer_url: "https://www.youtube.com/watch?v=EXeTwQWrcwY".into(),
            video_url: None,
            rating: 9.0,
        },
        MovieCreate {
            title: "Pulp Fiction".into(),
            title_ru: "Криминальное чтиво".into(),
            description: "Multiple interconnected criminal stories in Los Angeles.".into(),
            description_ru: "Несколько взаимосвязанных криминальных историй в Лос-Анджелесе."
                .into(),
            year: 1994,
            duration: 154,
            genre_ids: vec!["drama".into(), "thriller".into()],
            poster_url: "https://image.tmdb.org/t/p/w500/d5iIlFn5s0ImszYzBPb8JPIfbXD.jpg".into(),
            trailer_url: "https://www.youtube.com/watch?v=s7EdQ4FqbhY".into(),
            video_url: None,
            rating: 8.9,
        },
    ]
}

/// Idempotent sample-data seeding: genres keyed by slug, movies by title.
#[instrument(skip(db))]
pub async fn seed_sample_data(db: &PgPool) -> Result<(), sqlx::Error> {
    for genre in sample_genres() {
        Genre::insert_if_absent(db, &genre).await?;
    }

    for movie in sample_movies() {
        if Movie::title_exists(db, &movie.title).await? {
            continue;
        }
        let created = Movie::create(db, &movie).await?;
        info!(movie_id = %created.id, title = %created.title, "sample movie seeded");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_movies_reference_known_genres() {
        let genres: Vec<String> = sample_genres().into_iter().map(|g| g.id).collect();
        for movie in sample_movies() {
            for genre_id in &movie.genre_ids {
                assert!(genres.contains(genre_id), "unknown genre {genre_id}");
            }
        }
    }

    #[test]
    fn sample_titles_are_distinct() {
        let movies = sample_movies();
        let mut titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), movies.len());
    }
}
