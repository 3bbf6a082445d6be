//! Synthetic tracks whose popularity depends only on danceability.

use hitcast_domain::{FeatureVector, FEATURE_SCHEMA};

use crate::dataset::POPULARITY_COLUMN;

pub(crate) fn synthetic_examples(rows: usize) -> Vec<(FeatureVector, f64)> {
    (0..rows)
        .map(|i| {
            let danceability = ((i * 37) % 100) as f64 / 100.0 + 0.005;
            let features = FeatureVector {
                acousticness: ((i * 13) % 17) as f64 / 17.0,
                danceability,
                duration_ms: 60_000 + ((i * 7_919) % 400_000) as u32,
                energy: ((i * 11) % 19) as f64 / 19.0,
                instrumentalness: ((i * 5) % 23) as f64 / 23.0,
                liveness: ((i * 3) % 29) as f64 / 29.0,
                loudness: -(((i * 17) % 60) as f64),
                speechiness: ((i * 19) % 31) as f64 / 31.0,
                tempo: 60.0 + ((i * 23) % 150) as f64,
                valence: ((i * 29) % 37) as f64 / 37.0,
            };
            let popularity = if danceability > 0.5 { 75.0 } else { 30.0 };
            (features, popularity)
        })
        .collect()
}

/// CSV with the popularity column first, schema columns reversed and an
/// unrelated text column, as exported datasets tend to look.
pub(crate) fn synthetic_csv(examples: &[(FeatureVector, f64)]) -> String {
    let mut names: Vec<&str> = FEATURE_SCHEMA.names().collect();
    names.reverse();

    let mut out = format!("{POPULARITY_COLUMN},track_name,{}\n", names.join(","));
    for (index, (features, popularity)) in examples.iter().enumerate() {
        let cells: Vec<String> = names
            .iter()
            .map(|name| features.get_named(name).unwrap().to_string())
            .collect();
        out.push_str(&format!("{popularity},track {index},{}\n", cells.join(",")));
    }
    out
}

pub(crate) fn probe(danceability: f64) -> FeatureVector {
    FeatureVector {
        danceability,
        ..FeatureVector::default_profile()
    }
}
