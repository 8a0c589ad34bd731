use anyhow::Result;
use serde_json::Value;

#[path = "support/mod.rs"]
mod support;

use support::{build_test_app, rate_movie, seed_movie};

const TOP_RATED: &str = "/api/v1/movies/top-rated";

#[tokio::test]
async fn ranks_by_average_with_vote_threshold() -> Result<()> {
    let app = build_test_app()?;
    let m1 = seed_movie(&app.catalog, "First", None, None).await;
    let m2 = seed_movie(&app.catalog, "Second", None, None).await;
    let m3 = seed_movie(&app.catalog, "Third", None, None).await;
    rate_movie(&app.catalog, m1, &[5.0, 4.0, 5.0]).await;
    rate_movie(&app.catalog, m2, &[3.0, 3.0, 3.0, 3.0]).await;
    rate_movie(&app.catalog, m3, &[5.0]).await;

    let response = app.server.get(TOP_RATED).await;
    response.assert_status_ok();
    let body: Value = response.json();

    let data = body["data"].as_array().expect("data array");
    assert_eq!(data.len(), 2, "single-vote movie is below the threshold");

    assert_eq!(data[0]["movieId"], Value::String(m1.to_string()));
    assert_eq!(data[0]["avgRating"], serde_json::json!(4.667));
    assert_eq!(data[0]["voteCount"], serde_json::json!(3));

    assert_eq!(data[1]["movieId"], Value::String(m2.to_string()));
    assert_eq!(data[1]["avgRating"], serde_json::json!(3.0));
    assert_eq!(data[1]["voteCount"], serde_json::json!(4));

    let meta = &body["meta"];
    assert_eq!(meta["limit"], serde_json::json!(10));
    assert_eq!(meta["minVotes"], serde_json::json!(3));
    assert_eq!(meta["genre"], Value::Null);
    assert!(meta["generatedAt"].as_str().is_some(), "ISO-8601 timestamp");

    Ok(())
}

#[tokio::test]
async fn malformed_params_fall_back_to_defaults() -> Result<()> {
    let app = build_test_app()?;
    let movie = seed_movie(&app.catalog, "Solo", None, None).await;
    rate_movie(&app.catalog, movie, &[4.0, 4.0, 4.0]).await;

    let response = app
        .server
        .get(TOP_RATED)
        .add_query_param("minVotes", "abc")
        .add_query_param("limit", "500")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();

    // "abc" degrades to the default; 500 clamps to the cap.
    assert_eq!(body["meta"]["minVotes"], serde_json::json!(3));
    assert_eq!(body["meta"]["limit"], serde_json::json!(50));

    let response = app
        .server
        .get(TOP_RATED)
        .add_query_param("minVotes", "500")
        .await;
    let body: Value = response.json();
    assert_eq!(body["meta"]["minVotes"], serde_json::json!(100));

    Ok(())
}

#[tokio::test]
async fn blank_genre_equals_no_filter() -> Result<()> {
    let app = build_test_app()?;
    let action = seed_movie(&app.catalog, "Boom", Some("Action/Adventure"), None).await;
    let drama = seed_movie(&app.catalog, "Weep", Some("Drama"), None).await;
    rate_movie(&app.catalog, action, &[4.0, 4.0, 4.0]).await;
    rate_movie(&app.catalog, drama, &[5.0, 5.0, 5.0]).await;

    let unfiltered: Value = app.server.get(TOP_RATED).await.json();
    let blank: Value = app
        .server
        .get(TOP_RATED)
        .add_query_param("genre", "   ")
        .await
        .json();

    assert_eq!(unfiltered["data"], blank["data"]);
    assert_eq!(blank["meta"]["genre"], Value::Null);
    Ok(())
}

#[tokio::test]
async fn genre_filter_is_case_insensitive_substring() -> Result<()> {
    let app = build_test_app()?;
    let scifi = seed_movie(&app.catalog, "Stars", Some("Sci-Fi Action"), None).await;
    let drama = seed_movie(&app.catalog, "Tears", Some("Drama"), None).await;
    rate_movie(&app.catalog, scifi, &[4.0, 4.0, 4.0]).await;
    rate_movie(&app.catalog, drama, &[5.0, 5.0, 5.0]).await;

    for filter in ["action", "ACTION", "sci"] {
        let body: Value = app
            .server
            .get(TOP_RATED)
            .add_query_param("genre", filter)
            .await
            .json();
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1, "filter {filter:?}");
        assert_eq!(data[0]["movieId"], Value::String(scifi.to_string()));
        assert_eq!(body["meta"]["genre"], Value::String(filter.to_string()));
    }
    Ok(())
}

#[tokio::test]
async fn ties_break_on_votes_then_title() -> Result<()> {
    let app = build_test_app()?;
    // Beta and Alpha tie on average and votes; Alpha must come first.
    let beta = seed_movie(&app.catalog, "Beta", None, None).await;
    let alpha = seed_movie(&app.catalog, "Alpha", None, None).await;
    let crowd = seed_movie(&app.catalog, "Crowd", None, None).await;
    rate_movie(&app.catalog, beta, &[4.0; 5]).await;
    rate_movie(&app.catalog, alpha, &[4.0; 5]).await;
    rate_movie(&app.catalog, crowd, &[4.0; 6]).await;

    let body: Value = app.server.get(TOP_RATED).await.json();
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Crowd", "Alpha", "Beta"]);
    Ok(())
}

#[tokio::test]
async fn repeated_queries_return_identical_data() -> Result<()> {
    let app = build_test_app()?;
    for (i, title) in ["A", "B", "C", "D"].iter().enumerate() {
        let id = seed_movie(&app.catalog, title, None, None).await;
        let score = 2.0 + i as f64 / 2.0;
        rate_movie(&app.catalog, id, &[score, score + 0.5, score]).await;
    }

    let first: Value = app.server.get(TOP_RATED).await.json();
    for _ in 0..5 {
        let again: Value = app.server.get(TOP_RATED).await.json();
        // Everything except the generation timestamp is bit-identical.
        assert_eq!(first["data"], again["data"]);
        assert_eq!(first["meta"]["limit"], again["meta"]["limit"]);
        assert_eq!(first["meta"]["minVotes"], again["meta"]["minVotes"]);
    }
    Ok(())
}

#[tokio::test]
async fn empty_catalog_returns_empty_data() -> Result<()> {
    let app = build_test_app()?;
    let body: Value = app.server.get(TOP_RATED).await.json();
    assert_eq!(body["data"], serde_json::json!([]));
    Ok(())
}
