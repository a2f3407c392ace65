//! The same HTTP surface over the SQLite repositories.

use axum::http::StatusCode;
use integration_tests::TestApp;
use serde_json::json;

#[tokio::test]
async fn pet_update_persists_merged_row() -> anyhow::Result<()> {
    let app = TestApp::sqlite().await?;
    app.post("/api/pets", json!({ "name": "Fido", "breed": "beagle", "age": 3 })).await;

    let (status, pet) = app.put("/api/pets/1", json!({ "age": "4" })).await;
    assert_eq!(status, StatusCode::OK);

    let (_, stored) = app.get("/api/pets/1").await;
    assert_eq!(stored, pet);
    assert_eq!(stored["breed"], "beagle");
    assert_eq!(stored["age"], 4);
    Ok(())
}

#[tokio::test]
async fn duplicate_owner_email_is_409() -> anyhow::Result<()> {
    let app = TestApp::sqlite().await?;
    let owner = json!({
        "firstName": "Ana",
        "lastName": "Cruz",
        "email": "ana@example.com",
        "password": "hunter2"
    });
    let (first, _) = app.post("/api/petowners", owner.clone()).await;
    let (second, body) = app.post("/api/petowners", owner).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(body["error"], "email already registered");
    Ok(())
}

#[tokio::test]
async fn conversations_over_sqlite() -> anyhow::Result<()> {
    let app = TestApp::sqlite().await?;
    for (conv, text) in [("A", "hi"), ("B", "hey"), ("A", "yo")] {
        app.post("/api/messages", json!({ "conversationId": conv, "text": text })).await;
    }

    let (_, summaries) = app.get("/api/messages/conversations").await;
    assert_eq!(summaries[0]["conversationId"], "A");
    assert_eq!(summaries[0]["lastMessage"], "yo");
    assert_eq!(summaries[1]["lastMessage"], "hey");

    let (_, msgs) = app.get("/api/messages/conversation/A").await;
    assert_eq!(msgs.as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn delete_missing_row_is_404() -> anyhow::Result<()> {
    let app = TestApp::sqlite().await?;
    let (status, _) = app.delete("/api/transactions/7").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn nan_amount_is_400_not_500() -> anyhow::Result<()> {
    let app = TestApp::sqlite().await?;
    let (status, _) = app
        .post("/api/transactions", json!({ "date": "01-02-2024", "amount": "NaN", "status": "paid" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}
