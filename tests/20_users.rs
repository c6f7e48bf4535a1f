mod common;

use anyhow::Result;
use common::{tokens_body, TestApp, SESSION_TOKEN};
use reqwest::StatusCode;
use serde_json::{json, Value};

fn user(id: u64, nome: &str, sobrenome: &str, email: &str) -> Value {
    json!({ "1": id, "9": nome, "34": sobrenome, "5": email, "81": "Analista", "11": "5511", "13": "TI", "8": 1 })
}

#[tokio::test]
async fn users_are_paged_filtered_and_sorted() -> Result<()> {
    let mut app = TestApp::spawn().await?;

    // 25 users: 20 on the first page, 5 on the second, one of them incomplete
    let names = ["zeca", "Bruna", "ana", "Marcos", "carla"];
    let first_page: Vec<Value> = (0..20)
        .map(|i| user(i, &format!("{}{:02}", names[i as usize % names.len()], i), "Souza", "x@example.com"))
        .collect();
    let second_page = vec![
        user(20, "Ana", "Lima", "ana@example.com"),
        user(21, "Beto", "", "beto@example.com"),
        user(22, "Caio", "Reis", "caio@example.com"),
        user(23, "Duda", "Melo", "duda@example.com"),
        json!({ "1": 24, "9": "Eva", "34": "Paz", "5": "eva@example.com" }),
    ];

    let page1 = app.mock_search_page("User", "0-19", Value::Array(first_page), 25).await;
    let page2 = app.mock_search_page("User", "20-39", Value::Array(second_page), 25).await;

    let (status, body) = app.post("/users", &tokens_body()).await?;
    assert_eq!(status, StatusCode::OK);
    page1.assert_async().await;
    page2.assert_async().await;

    let users = body.as_array().expect("array body");
    assert_eq!(users.len(), 24);
    for pair in users.windows(2) {
        let a = pair[0]["nome"].as_str().unwrap().to_lowercase();
        let b = pair[1]["nome"].as_str().unwrap().to_lowercase();
        assert!(a <= b, "{} should sort before {}", a, b);
    }
    assert!(users.iter().all(|u| u["nome"] != "Beto"));

    let eva = users.iter().find(|u| u["nome"] == "Eva").unwrap();
    assert_eq!(
        eva,
        &json!({
            "id": "24", "nome": "Eva", "sobrenome": "Paz", "titulo": "", "email": "eva@example.com",
            "telefone": "", "setor": "", "status": ""
        })
    );
    Ok(())
}

#[tokio::test]
async fn empty_collection_is_not_found_after_one_request() -> Result<()> {
    let mut app = TestApp::spawn().await?;
    let page = app.mock_search_page("User", "0-19", json!([]), 0).await;

    let (status, body) = app.post("/users", &tokens_body()).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Nenhum usuário encontrado");
    page.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn no_complete_users_is_not_found() -> Result<()> {
    let mut app = TestApp::spawn().await?;
    app.mock_search_page("User", "0-19", json!([{ "9": "", "34": "B", "5": "b@x.com" }]), 1)
        .await;

    let (status, body) = app.post("/users", &tokens_body()).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Nenhum usuário válido encontrado");
    Ok(())
}

#[tokio::test]
async fn missing_tokens_are_rejected_before_any_upstream_call() -> Result<()> {
    let mut app = TestApp::spawn().await?;
    let search = app.upstream.mock("POST", "/search/User").expect(0).create_async().await;

    let (status, body) = app.post("/users", &json!({ "sessionToken": SESSION_TOKEN })).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Session-Token e App-Token são necessários");
    assert!(body["field_errors"].get("AppToken").is_some());
    search.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn failing_page_aborts_the_whole_listing() -> Result<()> {
    let mut app = TestApp::spawn().await?;
    let rows: Vec<Value> = (0..20).map(|i| user(i, "Ana", "Silva", "a@x.com")).collect();
    app.mock_search_page("User", "0-19", Value::Array(rows), 40).await;
    app.upstream
        .mock("POST", "/search/User")
        .match_query(mockito::Matcher::UrlEncoded("range".into(), "20-39".into()))
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"["ERROR_SESSION_TOKEN_INVALID","session_token seems invalid"]"#)
        .create_async()
        .await;

    let (status, body) = app.post("/users", &tokens_body()).await?;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["message"], "Erro ao buscar dados dos usuários");
    assert_eq!(body["error"][0], "ERROR_SESSION_TOKEN_INVALID");
    Ok(())
}

#[tokio::test]
async fn malformed_body_is_invalid_json() -> Result<()> {
    let app = TestApp::spawn().await?;
    let res = app
        .client
        .post(format!("{}/users", app.base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "INVALID_JSON");
    Ok(())
}
