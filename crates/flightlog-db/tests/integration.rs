//! DB-backed integration tests for the places and airports queries.
//!
//! Each test runs against a fresh database created by `#[sqlx::test]` with
//! the workspace migrations applied.

use flightlog_db::{get_place_by_external_id, insert_place, list_airports_with_iata, DbError, NewPlace};

fn sample_place(external_id: &str) -> NewPlace {
    NewPlace {
        external_id: external_id.to_owned(),
        display_name: Some("Haneda Airport".to_owned()),
        formatted_address: Some("Hanedakuko, Ota City, Tokyo".to_owned()),
        website_uri: Some("https://tokyo-haneda.com/".to_owned()),
        phone_number: Some("03-5757-8111".to_owned()),
        primary_type: Some("international_airport".to_owned()),
        rating: Some(4.5),
        user_rating_count: Some(33_000),
        latitude: Some(35.5494),
        longitude: Some(139.7798),
        price_level: None,
        types: vec!["international_airport".to_owned(), "airport".to_owned()],
        photos: vec![
            "https://cdn.example/hnd-1.jpg".to_owned(),
            "https://cdn.example/hnd-2.jpg".to_owned(),
        ],
        reviews: Some(serde_json::json!([{ "text": "clean and efficient" }])),
        opening_hours: Some(serde_json::json!({ "openNow": true })),
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn insert_then_get_round_trips_all_fields(pool: sqlx::PgPool) {
    let inserted = insert_place(&pool, &sample_place("hnd"))
        .await
        .expect("insert should succeed");

    let fetched = get_place_by_external_id(&pool, "hnd")
        .await
        .expect("get should succeed")
        .expect("row should exist");

    assert_eq!(fetched, inserted);
    assert_eq!(fetched.external_id, "hnd");
    assert_eq!(fetched.display_name.as_deref(), Some("Haneda Airport"));
    assert_eq!(fetched.rating, Some(4.5));
    assert_eq!(fetched.user_rating_count, Some(33_000));
    assert_eq!(
        fetched.photos,
        serde_json::json!(["https://cdn.example/hnd-1.jpg", "https://cdn.example/hnd-2.jpg"])
    );
    assert_eq!(
        fetched.types,
        serde_json::json!(["international_airport", "airport"])
    );
    assert_eq!(fetched.opening_hours, Some(serde_json::json!({ "openNow": true })));
}

#[sqlx::test(migrations = "../../migrations")]
async fn get_unknown_external_id_returns_none(pool: sqlx::PgPool) {
    let fetched = get_place_by_external_id(&pool, "never-cached")
        .await
        .expect("get should succeed");
    assert!(fetched.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn absent_optionals_persist_as_null(pool: sqlx::PgPool) {
    let new = NewPlace {
        display_name: None,
        formatted_address: None,
        website_uri: None,
        phone_number: None,
        primary_type: None,
        rating: None,
        user_rating_count: None,
        latitude: None,
        longitude: None,
        reviews: None,
        opening_hours: None,
        ..sample_place("bare")
    };

    let row = insert_place(&pool, &new).await.expect("insert should succeed");

    assert!(row.display_name.is_none());
    assert!(row.rating.is_none());
    assert!(row.user_rating_count.is_none());
    assert!(row.reviews.is_none());
    assert!(row.opening_hours.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn duplicate_insert_returns_conflict(pool: sqlx::PgPool) {
    insert_place(&pool, &sample_place("dup"))
        .await
        .expect("first insert should succeed");

    let err = insert_place(&pool, &sample_place("dup"))
        .await
        .expect_err("second insert should fail");

    assert!(matches!(err, DbError::Conflict), "expected Conflict, got {err}");
}

#[sqlx::test(migrations = "../../migrations")]
async fn airports_listing_skips_rows_without_iata(pool: sqlx::PgPool) {
    for (name, iata) in [
        ("Narita International Airport", "NRT"),
        ("Tokyo Heliport", ""),
        ("Haneda Airport", "HND"),
    ] {
        sqlx::query(
            "INSERT INTO airports (name, latitude_deg, longitude_deg, municipality, iata_code) \
             VALUES ($1, 35.0, 139.0, 'Tokyo', $2)",
        )
        .bind(name)
        .bind(iata)
        .execute(&pool)
        .await
        .expect("seed airport");
    }

    let rows = list_airports_with_iata(&pool).await.expect("list should succeed");

    let codes: Vec<&str> = rows.iter().map(|r| r.iata_code.as_str()).collect();
    assert_eq!(codes, vec!["HND", "NRT"], "ordered by code, empty skipped");
}
