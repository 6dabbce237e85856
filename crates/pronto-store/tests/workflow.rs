use chrono::{Duration as ChronoDuration, Utc};
use pronto_core::config::ProntoConfig;
use pronto_core::error::{AggregateError, SubmissionError};
use pronto_core::types::{
    Identity, Provider, ProviderId, Rating, ReviewId, ReviewRecord, SubmitReviewInput, UserId,
};
use pronto_core::Pronto;
use pronto_store::{MemSessions, MemStore, ProfileCache};
use std::time::Duration;

fn test_config() -> ProntoConfig {
    ProntoConfig {
        fetch_limit: 50,
        recompute_attempts: 3,
        retry_backoff: Duration::ZERO,
    }
}

fn pronto(store: &MemStore) -> Pronto<MemStore, MemSessions, ProfileCache> {
    Pronto::new(
        store.clone(),
        MemSessions::new(),
        ProfileCache::in_memory().unwrap(),
        test_config(),
    )
}

fn provider(id: &str, name: &str) -> Provider {
    Provider {
        id: ProviderId::new(id).unwrap(),
        name: name.to_string(),
        category: "Gardening".to_string(),
        aggregate: None,
    }
}

fn reviewer(id: &str, name: &str) -> Identity {
    Identity {
        user_id: Some(UserId::new(id).unwrap()),
        display_name: name.to_string(),
        contact: None,
    }
}

fn input(provider_id: &str, rating: i32, comment: Option<&str>) -> SubmitReviewInput {
    SubmitReviewInput {
        provider_id: provider_id.to_string(),
        rating,
        comment: comment.map(str::to_string),
        service_id: None,
    }
}

fn seeded_record(provider_id: &str, name: &str, rating: u8, age_minutes: i64) -> ReviewRecord {
    ReviewRecord {
        id: ReviewId::generate(),
        provider_id: ProviderId::new(provider_id).unwrap(),
        reviewer_id: UserId::new("seed-user").unwrap(),
        reviewer_name: name.to_string(),
        reviewer_contact: None,
        rating: Rating::new(rating).unwrap(),
        comment: None,
        created_at: Utc::now() - ChronoDuration::minutes(age_minutes),
        service_id: None,
    }
}

#[tokio::test]
async fn out_of_range_ratings_are_rejected_without_store_writes() {
    let store = MemStore::new();
    store.put_provider(provider("prv-1", "Ana"));
    let app = pronto(&store);

    for rating in [0, -3, 6, 42] {
        let result = app
            .reviews()
            .submit(input("prv-1", rating, None), &reviewer("u1", "Carla"))
            .await;
        assert!(matches!(
            result,
            Err(SubmissionError::InvalidRating { value }) if value == rating
        ));
    }
    assert_eq!(store.review_count(), 0);
}

#[tokio::test]
async fn blank_provider_id_is_missing_target() {
    let store = MemStore::new();
    let app = pronto(&store);

    let result = app
        .reviews()
        .submit(input("   ", 4, None), &reviewer("u1", "Carla"))
        .await;
    assert!(matches!(result, Err(SubmissionError::MissingTarget)));
    assert_eq!(store.review_count(), 0);
}

#[tokio::test]
async fn unauthenticated_reviewer_is_refused() {
    let store = MemStore::new();
    store.put_provider(provider("prv-1", "Ana"));
    let app = pronto(&store);

    let result = app
        .reviews()
        .submit(input("prv-1", 5, Some("great")), &Identity::anonymous())
        .await;
    assert!(matches!(
        result,
        Err(SubmissionError::AuthenticationRequired)
    ));
    assert_eq!(store.review_count(), 0);
}

#[tokio::test]
async fn each_submission_appends_a_distinct_record() {
    let store = MemStore::new();
    store.put_provider(provider("prv-1", "Ana"));
    let app = pronto(&store);
    let carla = reviewer("u1", "Carla");

    let first = app
        .reviews()
        .submit(input("prv-1", 4, Some("good")), &carla)
        .await
        .unwrap();
    let second = app
        .reviews()
        .submit(input("prv-1", 4, Some("good")), &carla)
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(store.review_count(), 2);
}

#[tokio::test]
async fn first_review_sets_the_aggregate() {
    let store = MemStore::new();
    let provider_id = ProviderId::new("prv-1").unwrap();
    store.put_provider(provider("prv-1", "Ana"));
    let app = pronto(&store);

    let record = app
        .reviews()
        .submit(input("prv-1", 5, Some("great")), &reviewer("u1", "Carla"))
        .await
        .unwrap();
    assert_eq!(record.comment.as_deref(), Some("great"));

    let aggregate = store.provider(&provider_id).unwrap().aggregate.unwrap();
    assert_eq!(aggregate.mean, 5.0);
    assert_eq!(aggregate.count, 1);
}

#[tokio::test]
async fn aggregate_tracks_successive_submissions() {
    let store = MemStore::new();
    let provider_id = ProviderId::new("prv-1").unwrap();
    store.put_provider(provider("prv-1", "Ana"));
    let app = pronto(&store);
    let carla = reviewer("u1", "Carla");

    app.reviews()
        .submit(input("prv-1", 3, None), &carla)
        .await
        .unwrap();
    app.reviews()
        .submit(input("prv-1", 5, None), &carla)
        .await
        .unwrap();

    let aggregate = store.provider(&provider_id).unwrap().aggregate.unwrap();
    assert_eq!(aggregate.mean, 4.0);
    assert_eq!(aggregate.count, 2);

    app.reviews()
        .submit(input("prv-1", 4, None), &carla)
        .await
        .unwrap();

    let aggregate = store.provider(&provider_id).unwrap().aggregate.unwrap();
    assert_eq!(aggregate.mean, 4.0);
    assert_eq!(aggregate.count, 3);
}

#[tokio::test]
async fn recompute_is_idempotent() {
    let store = MemStore::new();
    let provider_id = ProviderId::new("prv-1").unwrap();
    store.put_provider(provider("prv-1", "Ana"));
    let app = pronto(&store);
    let carla = reviewer("u1", "Carla");

    app.reviews()
        .submit(input("prv-1", 5, None), &carla)
        .await
        .unwrap();
    app.reviews()
        .submit(input("prv-1", 4, None), &carla)
        .await
        .unwrap();

    let first = app.providers().recompute(&provider_id).await.unwrap();
    let second = app.providers().recompute(&provider_id).await.unwrap();
    assert_eq!(first.mean, 4.5);
    assert_eq!(second.mean, first.mean);
    assert_eq!(second.count, first.count);
}

#[tokio::test]
async fn recompute_with_no_reviews_writes_zeroes() {
    let store = MemStore::new();
    let provider_id = ProviderId::new("prv-1").unwrap();
    let mut stale = provider("prv-1", "Ana");
    stale.aggregate = Some(pronto_core::types::ProviderAggregate {
        mean: 4.2,
        count: 7,
        recomputed_at: Utc::now(),
    });
    store.put_provider(stale);
    let app = pronto(&store);

    let aggregate = app.providers().recompute(&provider_id).await.unwrap();
    assert_eq!(aggregate.mean, 0.0);
    assert_eq!(aggregate.count, 0);
}

#[tokio::test]
async fn recompute_for_unknown_provider_fails() {
    let store = MemStore::new();
    let app = pronto(&store);
    let provider_id = ProviderId::new("prv-missing").unwrap();

    let result = app.providers().recompute(&provider_id).await;
    assert!(matches!(result, Err(AggregateError::ProviderNotFound)));
}

#[tokio::test]
async fn submission_survives_recompute_fetch_failure() {
    let store = MemStore::new();
    let provider_id = ProviderId::new("prv-1").unwrap();
    store.put_provider(provider("prv-1", "Ana"));
    let app = pronto(&store);
    let carla = reviewer("u1", "Carla");

    app.reviews()
        .submit(input("prv-1", 3, None), &carla)
        .await
        .unwrap();
    let before = store.provider(&provider_id).unwrap().aggregate.unwrap();

    store.fail_next_review_reads(1);
    let result = app
        .reviews()
        .submit(input("prv-1", 5, None), &carla)
        .await;
    assert!(result.is_ok());
    assert_eq!(store.review_count(), 2);

    // Aggregate keeps its prior value until the next successful recompute.
    let after = store.provider(&provider_id).unwrap().aggregate.unwrap();
    assert_eq!(after.mean, before.mean);
    assert_eq!(after.count, before.count);
}

#[tokio::test]
async fn submission_survives_aggregate_write_failure() {
    let store = MemStore::new();
    store.put_provider(provider("prv-1", "Ana"));
    let app = pronto(&store);

    store.fail_next_provider_writes(1);
    let result = app
        .reviews()
        .submit(input("prv-1", 5, None), &reviewer("u1", "Carla"))
        .await;
    assert!(result.is_ok());
    assert_eq!(store.review_count(), 1);
}

#[tokio::test]
async fn append_failure_surfaces_as_store_unavailable() {
    let store = MemStore::new();
    store.put_provider(provider("prv-1", "Ana"));
    let app = pronto(&store);

    store.fail_next_appends(1);
    let result = app
        .reviews()
        .submit(input("prv-1", 5, None), &reviewer("u1", "Carla"))
        .await;
    assert!(matches!(
        result,
        Err(SubmissionError::StoreUnavailable { .. })
    ));
    assert_eq!(store.review_count(), 0);
}

#[tokio::test]
async fn list_orders_newest_first_caps_and_filters() {
    let store = MemStore::new();
    let provider_id = ProviderId::new("prv-1").unwrap();
    store.push_review(seeded_record("prv-1", "Oldest", 3, 30));
    store.push_review(seeded_record("prv-1", "Middle", 4, 20));
    store.push_review(seeded_record("prv-1", "", 5, 15));
    store.push_review(seeded_record("prv-1", "Newest", 5, 10));
    store.push_review(seeded_record("prv-other", "Elsewhere", 1, 5));
    let app = pronto(&store);

    let reviews = app.reviews().list(&provider_id, 3).await.unwrap();
    let names: Vec<&str> = reviews
        .iter()
        .map(|record| record.reviewer_name.as_str())
        .collect();
    // Limit applies to the fetch; the blank-name record is dropped after.
    assert_eq!(names, ["Newest", "Middle"]);
}

#[tokio::test]
async fn stats_report_mean_count_and_distribution() {
    let store = MemStore::new();
    let provider_id = ProviderId::new("prv-1").unwrap();
    store.push_review(seeded_record("prv-1", "A", 5, 3));
    store.push_review(seeded_record("prv-1", "B", 5, 2));
    store.push_review(seeded_record("prv-1", "C", 3, 1));
    let app = pronto(&store);

    let stats = app.reviews().stats(&provider_id).await.unwrap();
    assert_eq!(stats.mean, 4.3);
    assert_eq!(stats.count, 3);
    let five_star = stats
        .distribution
        .iter()
        .find(|entry| entry.stars == 5)
        .unwrap();
    assert_eq!(five_star.count, 2);
    let three_star = stats
        .distribution
        .iter()
        .find(|entry| entry.stars == 3)
        .unwrap();
    assert_eq!(three_star.count, 1);
}

#[tokio::test]
async fn recompute_with_retry_recovers_from_transient_failures() {
    let store = MemStore::new();
    let provider_id = ProviderId::new("prv-1").unwrap();
    store.put_provider(provider("prv-1", "Ana"));
    store.push_review(seeded_record("prv-1", "A", 4, 1));
    let app = pronto(&store);

    store.fail_next_review_reads(2);
    let aggregate = app
        .providers()
        .recompute_with_retry(&provider_id)
        .await
        .unwrap();
    assert_eq!(aggregate.mean, 4.0);
    assert_eq!(aggregate.count, 1);
}

#[tokio::test]
async fn recompute_with_retry_gives_up_after_bounded_attempts() {
    let store = MemStore::new();
    let provider_id = ProviderId::new("prv-1").unwrap();
    store.put_provider(provider("prv-1", "Ana"));
    let app = pronto(&store);

    store.fail_next_review_reads(5);
    let result = app.providers().recompute_with_retry(&provider_id).await;
    assert!(matches!(result, Err(AggregateError::FetchFailed { .. })));
}

#[tokio::test]
async fn provider_summary_falls_back_to_defaults() {
    let store = MemStore::new();
    let provider_id = ProviderId::new("prv-1").unwrap();
    let app = pronto(&store);

    // Unknown provider: caller-supplied name, default category.
    let summary = app.providers().summary(&provider_id, Some("Ana")).await;
    assert_eq!(summary.name, "Ana");
    assert_eq!(summary.category, "Service");
    assert_eq!(summary.count, 0);

    store.put_provider(provider("prv-1", "Ana Gardens"));
    store.fail_next_provider_reads(1);
    let summary = app.providers().summary(&provider_id, None).await;
    assert_eq!(summary.name, "Provider");

    let summary = app.providers().summary(&provider_id, None).await;
    assert_eq!(summary.name, "Ana Gardens");
    assert_eq!(summary.category, "Gardening");
}
