mod common;

use axum::http::{Method, StatusCode};
use common::{duna, TestApp};
use serde_json::json;

#[tokio::test]
async fn create_list_and_fetch_categories() {
    let app = TestApp::new().await;
    let token = app.token_for("ana").await;

    let created = app.create_category(&token, "Ficção").await;
    app.create_category(&token, "Poesia").await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["nome"], "Ficção");

    let fetched = app.get(&format!("/categorias/{id}")).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body, created);

    let list = app.get("/categorias/").await;
    let names: Vec<&str> = list
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["nome"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ficção", "Poesia"]);
}

#[tokio::test]
async fn duplicate_name_conflicts_on_create_and_update() {
    let app = TestApp::new().await;
    let token = app.token_for("ana").await;

    app.create_category(&token, "Ficção").await;
    let poesia = app.create_category(&token, "Poesia").await;

    let again = app
        .request(
            Method::POST,
            "/categorias/",
            Some(&token),
            Some(json!({ "nome": "Ficção" })),
        )
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);

    let rename = app
        .request(
            Method::PUT,
            &format!("/categorias/{}", poesia["id"]),
            Some(&token),
            Some(json!({ "nome": "Ficção" })),
        )
        .await;
    assert_eq!(rename.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn rename_category() {
    let app = TestApp::new().await;
    let token = app.token_for("ana").await;

    let created = app.create_category(&token, "Ficcao").await;
    let uri = format!("/categorias/{}", created["id"]);

    let renamed = app
        .request(Method::PUT, &uri, Some(&token), Some(json!({ "nome": "Ficção" })))
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.body["id"], created["id"]);
    assert_eq!(renamed.body["nome"], "Ficção");

    assert_eq!(app.get(&uri).await.body["nome"], "Ficção");
}

#[tokio::test]
async fn missing_category_is_not_found() {
    let app = TestApp::new().await;
    let token = app.token_for("ana").await;

    let get = app.get("/categorias/77").await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);
    assert_eq!(get.body["error"]["message"], "Categoria não encontrada");

    let put = app
        .request(
            Method::PUT,
            "/categorias/77",
            Some(&token),
            Some(json!({ "nome": "Nada" })),
        )
        .await;
    assert_eq!(put.status, StatusCode::NOT_FOUND);

    let delete = app
        .request(Method::DELETE, "/categorias/77", Some(&token), None)
        .await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let app = TestApp::new().await;
    let token = app.token_for("ana").await;

    let response = app
        .request(
            Method::POST,
            "/categorias/",
            Some(&token),
            Some(json!({ "nome": "   " })),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn deleting_category_removes_its_books() {
    let app = TestApp::new().await;
    let token = app.token_for("ana").await;

    let category = app.create_category(&token, "Ficção").await;
    let mut book = duna();
    book["categoria_id"] = category["id"].clone();
    let owned = app.create_book(&token, book).await;
    let loose = app.create_book(&token, duna()).await;

    let deleted = app
        .request(
            Method::DELETE,
            &format!("/categorias/{}", category["id"]),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["message"], "Categoria deletada com sucesso");

    assert_eq!(
        app.get(&format!("/livros/{}", owned["id"])).await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.get(&format!("/livros/{}", loose["id"])).await.status,
        StatusCode::OK
    );
}

#[tokio::test]
async fn collection_answers_without_trailing_slash() {
    let app = TestApp::new().await;
    let token = app.token_for("ana").await;

    let created = app
        .request(
            Method::POST,
            "/categorias",
            Some(&token),
            Some(json!({ "nome": "Poesia" })),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let list = app.get("/categorias").await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body[0]["nome"], "Poesia");
}

#[tokio::test]
async fn malformed_body_answers_with_error_envelope() {
    let app = TestApp::new().await;
    let token = app.token_for("ana").await;

    let response = app
        .request(
            Method::POST,
            "/categorias/",
            Some(&token),
            Some(json!({ "nome": 42 })),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"]["code"], "validation_error");
}
