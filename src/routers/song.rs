use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    response::Response,
};

use crate::controllers::SongController;

pub async fn song_url_route(
    State(songs): State<SongController>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    songs.get_song_url(first_values(pairs)).await
}

/// Collapses repeated keys, keeping the first occurrence.
fn first_values(pairs: Vec<(String, String)>) -> HashMap<String, String> {
    let mut queries = HashMap::new();
    for (key, value) in pairs {
        queries.entry(key).or_insert(value);
    }
    queries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_keys_keep_the_first_value() {
        let pairs = vec![
            ("id".to_string(), "1".to_string()),
            ("level".to_string(), "hires".to_string()),
            ("id".to_string(), "2".to_string()),
        ];
        let queries = first_values(pairs);
        assert_eq!(queries["id"], "1");
        assert_eq!(queries["level"], "hires");
    }
}
