//! Integration tests for the Leads domain
//!
//! Run against a real pgvector PostgreSQL via testcontainers to check the
//! entity mapping, the vector column round trip and partial updates.

use domain_embeddings::{DisabledEmbeddingClient, EmbeddingUpdater};
use domain_leads::*;
use std::sync::Arc;
use std::time::Duration;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};
use uuid::Uuid;

fn create_input(builder: &TestDataBuilder, suffix: &str) -> CreateLead {
    CreateLead {
        title: builder.name("lead", suffix),
        description: "Looking for a flat with a balcony".to_string(),
        requirement: r#"{"price": 7500000, "roomNumber": 2}"#.to_string(),
        contact_name: "Casey".to_string(),
        contact_phone: "+10000000004".to_string(),
        contact_email: Some("casey@example.com".to_string()),
        owner_user_id: None,
        created_user_id: builder.user_id(),
    }
}

#[tokio::test]
async fn test_create_and_get_lead() {
    let db = TestDatabase::new().await;
    let repo = PgLeadRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pg_create_lead");

    let created = repo.create(create_input(&builder, "main")).await.unwrap();
    assert_eq!(created.status, LeadStatus::New);
    assert!(created.embedding.is_none());

    let retrieved = assert_some(
        repo.get_by_id(created.id).await.unwrap(),
        "lead should exist",
    );
    assert_uuid_eq(retrieved.id, created.id, "retrieved lead id");
    assert_eq!(retrieved.requirement, created.requirement);
    assert_eq!(retrieved.contact_email.as_deref(), Some("casey@example.com"));
}

#[tokio::test]
async fn test_get_missing_lead_is_none() {
    let db = TestDatabase::new().await;
    let repo = PgLeadRepository::new(db.connection());

    assert!(repo.get_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_embedding_round_trip() {
    let db = TestDatabase::new().await;
    let repo = PgLeadRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pg_lead_embedding");

    let lead = repo.create(create_input(&builder, "vec")).await.unwrap();
    let vector: Vec<f32> = (0..384).map(|i| i as f32 / 384.0).collect();

    repo.update_embedding(lead.id, vector.clone()).await.unwrap();

    let stored = repo.get_by_id(lead.id).await.unwrap().unwrap();
    assert_eq!(stored.embedding, Some(vector));
}

#[tokio::test]
async fn test_update_embedding_unknown_lead() {
    let db = TestDatabase::new().await;
    let repo = PgLeadRepository::new(db.connection());

    let err = repo
        .update_embedding(Uuid::new_v4(), vec![0.0; 384])
        .await
        .unwrap_err();
    assert!(matches!(err, LeadError::NotFound(_)));
}

#[tokio::test]
async fn test_partial_update() {
    let db = TestDatabase::new().await;
    let repo = PgLeadRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pg_update_lead");

    let lead = repo.create(create_input(&builder, "upd")).await.unwrap();
    let new_owner = Uuid::new_v4();

    repo.update(
        lead.id,
        UpdateLead {
            status: Some(LeadStatus::Published),
            owner_user_id: Some(new_owner),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let updated = repo.get_by_id(lead.id).await.unwrap().unwrap();
    assert_eq!(updated.status, LeadStatus::Published);
    assert_uuid_eq(updated.owner_user_id, new_owner, "owner");
    assert_eq!(updated.title, lead.title);
    assert!(updated.updated_at >= lead.updated_at);

    let err = repo
        .update(lead.id, UpdateLead::default())
        .await
        .unwrap_err();
    assert!(matches!(err, LeadError::Validation(_)));
}

#[tokio::test]
async fn test_list_with_filters_and_paging() {
    let db = TestDatabase::new().await;
    let repo = PgLeadRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("pg_list_leads");

    for i in 0..3 {
        repo.create(create_input(&builder, &i.to_string()))
            .await
            .unwrap();
    }
    let other = TestDataBuilder::from_test_name("pg_list_leads_other");
    repo.create(create_input(&other, "x")).await.unwrap();

    let mine = repo
        .list(LeadFilter {
            created_user_id: Some(builder.user_id()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(mine.len(), 3);

    let page = repo
        .list(LeadFilter {
            page: Some(2),
            per_page: Some(3),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
}

#[tokio::test]
async fn test_service_attaches_embedding_in_background() {
    let db = TestDatabase::new().await;
    let updater = EmbeddingUpdater::new(Arc::new(DisabledEmbeddingClient::new(384)));
    let service = LeadService::new(PgLeadRepository::new(db.connection()), updater);
    let builder = TestDataBuilder::from_test_name("pg_lead_background");

    let lead = service
        .create_lead(create_input(&builder, "bg"))
        .await
        .unwrap();

    let mut embedding = None;
    for _ in 0..100 {
        embedding = service.get_lead(lead.id).await.unwrap().embedding;
        if embedding.is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    let embedding = assert_some(embedding, "embedding should be stored");
    assert_eq!(embedding.len(), 384);
}
