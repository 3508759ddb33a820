//! End-to-end scenarios for the assessment workflow.
//!
//! Everything here goes through the public engine, service, and router so the
//! scoring and matching pipeline is exercised the way the API host uses it.

mod common {
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use matchvita::assessment::{
        Answer, Assessment, AssessmentId, AssessmentRepository, Category, QuestionId,
        RepositoryError, UserId,
    };

    pub(super) fn answers(category: Category, values: &[u8]) -> Vec<Answer> {
        values
            .iter()
            .enumerate()
            .map(|(index, value)| Answer {
                question_id: QuestionId(format!("{}-{}", category.key(), index + 1)),
                category,
                value: *value,
            })
            .collect()
    }

    /// Writes a fixture under the system temp dir, unique per test process.
    pub(super) fn fixture(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "matchvita-{}-{name}",
            std::process::id()
        ));
        std::fs::write(&path, contents).expect("write fixture");
        path
    }

    #[derive(Default)]
    pub(super) struct MemoryRepository {
        records: Mutex<Vec<Assessment>>,
    }

    impl AssessmentRepository for MemoryRepository {
        fn insert(&self, assessment: Assessment) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("repository mutex poisoned");
            if guard.iter().any(|stored| stored.id == assessment.id) {
                return Err(RepositoryError::Conflict);
            }
            guard.push(assessment);
            Ok(())
        }

        fn fetch(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError> {
            let guard = self.records.lock().expect("repository mutex poisoned");
            Ok(guard.iter().find(|stored| &stored.id == id).cloned())
        }

        fn history(
            &self,
            user_id: &UserId,
            limit: usize,
        ) -> Result<Vec<Assessment>, RepositoryError> {
            let guard = self.records.lock().expect("repository mutex poisoned");
            Ok(guard
                .iter()
                .rev()
                .filter(|stored| &stored.user_id == user_id)
                .take(limit)
                .cloned()
                .collect())
        }
    }

    pub(super) fn repository() -> Arc<MemoryRepository> {
        Arc::new(MemoryRepository::default())
    }
}

use std::sync::Arc;

use axum::http::StatusCode;
use matchvita::assessment::{
    assessment_router, AssessmentEngine, AssessmentService, Category, ConfigurationError,
    HealthLevel, UserId,
};
use matchvita::config::CatalogConfig;
use serde_json::Value;
use tower::ServiceExt;

const CATALOG_CSV: &str = "\
id,name,kind,category,health_categories,tags,rating,dosage
mg-1,Magnesium Citrate,supplement,sleep,,magnesium;calm,4.1,200 mg
mg-2,Magnesium Glycinate,vitamin,sleep,energy,magnesium,4.9,300 mg
kiwi,Kiwi Fruit,food,sleep,immune,vitamin c;serotonin,4.4,
oats,Rolled Oats,food,energy,sleep,fiber;magnesium,3.8,1 bowl
";

const RULES_JSON: &str = r#"{
    "sleep": { "3": ["magnesium"], "4": ["serotonin"] },
    "energy": { "3": ["fiber"] }
}"#;

#[test]
fn engine_loads_catalog_and_rules_from_files() {
    let config = CatalogConfig {
        products_csv: Some(common::fixture("catalog.csv", CATALOG_CSV)),
        rules_json: Some(common::fixture("rules.json", RULES_JSON)),
        fallback_limit: 2,
    };
    let engine = AssessmentEngine::from_config(&config).expect("fixtures load");
    assert_eq!(engine.products().len(), 4);

    let sleep = engine
        .evaluate(&common::answers(Category::Sleep, &[2, 3, 2, 3]))
        .expect("valid answers");
    assert_eq!(sleep.category_scores[&Category::Sleep].level, HealthLevel::NeedsAttention);
    let ids: Vec<_> = sleep
        .recommendations
        .iter()
        .map(|recommendation| recommendation.item_id.as_str())
        .collect();
    assert_eq!(ids, vec!["mg-2", "mg-1", "oats"]);

    let healthy = engine
        .evaluate(&common::answers(Category::Sleep, &[5, 5, 4, 4]))
        .expect("valid answers");
    let fallback: Vec<_> = healthy
        .recommendations
        .iter()
        .map(|recommendation| recommendation.item_id.as_str())
        .collect();
    assert_eq!(fallback, vec!["mg-2", "kiwi"]);
}

#[test]
fn malformed_rule_table_is_a_configuration_error() {
    let config = CatalogConfig {
        rules_json: Some(common::fixture(
            "bad-rules.json",
            r#"{ "sleep": { "2": ["magnesium"] } }"#,
        )),
        ..CatalogConfig::default()
    };

    match AssessmentEngine::from_config(&config) {
        Err(ConfigurationError::NonTriggeringRuleLevel { category, level }) => {
            assert_eq!(category, Category::Sleep);
            assert_eq!(level, 2);
        }
        other => panic!("expected rule level error, got {other:?}"),
    }
}

#[test]
fn missing_catalog_file_is_a_configuration_error() {
    let config = CatalogConfig {
        products_csv: Some(std::env::temp_dir().join("matchvita-does-not-exist.csv")),
        ..CatalogConfig::default()
    };

    assert!(matches!(
        AssessmentEngine::from_config(&config),
        Err(ConfigurationError::Io { .. })
    ));
}

#[tokio::test]
async fn quiz_submission_round_trip_over_http() {
    let repository = common::repository();
    let service = Arc::new(AssessmentService::new(
        Arc::new(AssessmentEngine::standard()),
        repository.clone(),
    ));
    let router = assessment_router(service.clone());

    let mut answers = common::answers(Category::Energy, &[1, 2, 1, 2]);
    answers.extend(common::answers(Category::Brain, &[5, 4, 5, 4]));
    let body = serde_json::json!({ "userId": "integration", "answers": answers });

    let response = router
        .clone()
        .oneshot(
            axum::http::Request::post("/api/v1/assessments")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(body.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = serde_json::from_slice(
        &axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body"),
    )
    .expect("json payload");

    // energy 6/20 = 30 (level 3), brain 18/20 = 90 (level 1)
    assert_eq!(created["categoryScores"]["energy"]["score"], 30);
    assert_eq!(created["categoryScores"]["brain"]["level"], 1);
    assert_eq!(created["overallScore"], 60);
    assert_eq!(created["recommendations"][0]["itemId"], "vit-c");

    let id = created["id"].as_str().expect("id present").to_string();
    let response = router
        .oneshot(
            axum::http::Request::get(format!("/api/v1/assessments/{id}"))
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let history = service
        .history(&UserId("integration".to_string()), 5)
        .expect("history loads");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id.0, id);
}
