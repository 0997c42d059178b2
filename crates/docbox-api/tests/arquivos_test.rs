//! Upload, listing, and download integration tests.
//!
//! Run with: `cargo test -p docbox-api --test arquivos_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{
    location, login, login_admin, register_empresa, setup_test_app, upload_pdf, TEST_SENHA,
};

const CNPJ: &str = "12345678000199";
const EMAIL: &str = "dona@x.com";

#[tokio::test]
async fn test_upload_json_then_tenant_lists_it() {
    let app = setup_test_app().await;
    let empresa_id = register_empresa(&app, "Empresa", CNPJ, EMAIL).await;
    let admin_cookie = login_admin(&app).await;

    upload_pdf(&app, &admin_cookie, empresa_id, "nota.pdf", b"%PDF-1.4 conteudo").await;

    let tenant_cookie = login(&app, EMAIL, TEST_SENHA).await;
    let response = app
        .client()
        .get("/meus-arquivos")
        .add_header("cookie", tenant_cookie)
        .await;

    assert_eq!(response.status_code(), 200);
    let entries: Vec<serde_json::Value> = response.json();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], "nota.pdf");
    assert!(entries[0]["uploadDate"].is_string());
    let url = entries[0]["url"].as_str().unwrap();
    assert_eq!(url, "http://localhost:3000/arquivos/12345678000199/nota.pdf");
}

#[tokio::test]
async fn test_upload_multipart() {
    let app = setup_test_app().await;
    let empresa_id = register_empresa(&app, "Empresa", CNPJ, EMAIL).await;
    let admin_cookie = login_admin(&app).await;

    let part = Part::bytes(bytes::Bytes::from_static(b"%PDF-1.4 multipart"))
        .file_name("relatorio.pdf")
        .mime_type("application/pdf");
    let multipart = MultipartForm::new().add_part("arquivo", part);

    let response = app
        .client()
        .post(&format!("/upload/{}", empresa_id))
        .add_header("cookie", admin_cookie)
        .multipart(multipart)
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.text(), "Arquivo enviado com sucesso.");
    assert!(app.object_path(CNPJ, "relatorio.pdf").is_file());
}

#[tokio::test]
async fn test_upload_unknown_empresa_is_404() {
    let app = setup_test_app().await;
    let admin_cookie = login_admin(&app).await;

    let response = app
        .client()
        .post("/upload/9999")
        .add_header("cookie", admin_cookie)
        .json(&serde_json::json!({ "nomeArquivo": "a.pdf", "conteudo": "aGk=" }))
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_upload_is_admin_only() {
    let app = setup_test_app().await;
    let empresa_id = register_empresa(&app, "Empresa", CNPJ, EMAIL).await;
    let tenant_cookie = login(&app, EMAIL, TEST_SENHA).await;

    // A logged-in tenant may not upload, not even into their own namespace.
    let response = app
        .client()
        .post(&format!("/upload/{}", empresa_id))
        .add_header("cookie", tenant_cookie)
        .json(&serde_json::json!({ "nomeArquivo": "a.pdf", "conteudo": "aGk=" }))
        .await;

    assert_eq!(response.status_code(), 403);
}

#[tokio::test]
async fn test_upload_rejects_bad_names_and_bad_base64() {
    let app = setup_test_app().await;
    let empresa_id = register_empresa(&app, "Empresa", CNPJ, EMAIL).await;
    let admin_cookie = login_admin(&app).await;

    for nome in ["../evil.pdf", "a/b.pdf", ".keep", ""] {
        let response = app
            .client()
            .post(&format!("/upload/{}", empresa_id))
            .add_header("cookie", admin_cookie.clone())
            .json(&serde_json::json!({ "nomeArquivo": nome, "conteudo": "aGk=" }))
            .await;
        assert_eq!(response.status_code(), 400, "nome {:?} should be rejected", nome);
    }

    let bad_base64 = app
        .client()
        .post(&format!("/upload/{}", empresa_id))
        .add_header("cookie", admin_cookie.clone())
        .json(&serde_json::json!({ "nomeArquivo": "ok.pdf", "conteudo": "not base64!!" }))
        .await;
    assert_eq!(bad_base64.status_code(), 400);

    let empty = app
        .client()
        .post(&format!("/upload/{}", empresa_id))
        .add_header("cookie", admin_cookie)
        .json(&serde_json::json!({ "nomeArquivo": "ok.pdf", "conteudo": "" }))
        .await;
    assert_eq!(empty.status_code(), 400);
}

#[tokio::test]
async fn test_reupload_replaces_content_and_keeps_one_row() {
    let app = setup_test_app().await;
    let empresa_id = register_empresa(&app, "Empresa", CNPJ, EMAIL).await;
    let admin_cookie = login_admin(&app).await;

    upload_pdf(&app, &admin_cookie, empresa_id, "nota.pdf", b"versao 1").await;
    upload_pdf(&app, &admin_cookie, empresa_id, "nota.pdf", b"versao 2 maior").await;

    let rows: i64 = sqlx::query_scalar::<sqlx::Sqlite, i64>(
        "SELECT COUNT(*) FROM arquivos WHERE empresa_id = ? AND nome = 'nota.pdf'",
    )
    .bind(empresa_id)
    .fetch_one(&app.pool)
    .await
    .unwrap();
    assert_eq!(rows, 1);

    let stored = std::fs::read(app.object_path(CNPJ, "nota.pdf")).unwrap();
    assert_eq!(stored, b"versao 2 maior");
}

#[tokio::test]
async fn test_listing_filters_by_mes_and_ano() {
    let app = setup_test_app().await;
    let empresa_id = register_empresa(&app, "Empresa", CNPJ, EMAIL).await;
    let admin_cookie = login_admin(&app).await;

    upload_pdf(&app, &admin_cookie, empresa_id, "julho-2023.pdf", b"a").await;
    upload_pdf(&app, &admin_cookie, empresa_id, "julho-2024.pdf", b"b").await;
    upload_pdf(&app, &admin_cookie, empresa_id, "agosto-2024.pdf", b"c").await;

    // Backdate the rows; uploads always stamp the current time.
    for (nome, data) in [
        ("julho-2023.pdf", "2023-07-10 09:00:00"),
        ("julho-2024.pdf", "2024-07-15 09:00:00"),
        ("agosto-2024.pdf", "2024-08-01 09:00:00"),
    ] {
        sqlx::query("UPDATE arquivos SET data_upload = ? WHERE nome = ?")
            .bind(data)
            .bind(nome)
            .execute(&app.pool)
            .await
            .unwrap();
    }

    let tenant_cookie = login(&app, EMAIL, TEST_SENHA).await;
    let list = |query: &'static str| {
        let cookie = tenant_cookie.clone();
        let client = app.client();
        async move {
            let response = client
                .get(&format!("/meus-arquivos{}", query))
                .add_header("cookie", cookie)
                .await;
            assert_eq!(response.status_code(), 200);
            let entries: Vec<serde_json::Value> = response.json();
            entries
                .into_iter()
                .map(|e| e["name"].as_str().unwrap().to_string())
                .collect::<Vec<_>>()
        }
    };

    assert_eq!(
        list("").await,
        vec!["agosto-2024.pdf", "julho-2024.pdf", "julho-2023.pdf"]
    );
    assert_eq!(
        list("?mes=07").await,
        vec!["julho-2024.pdf", "julho-2023.pdf"]
    );
    assert_eq!(
        list("?ano=2024").await,
        vec!["agosto-2024.pdf", "julho-2024.pdf"]
    );
    assert_eq!(list("?mes=07&ano=2024").await, vec!["julho-2024.pdf"]);
    assert!(list("?mes=01&ano=2020").await.is_empty());
}

#[tokio::test]
async fn test_listing_rejects_malformed_filters() {
    let app = setup_test_app().await;
    register_empresa(&app, "Empresa", CNPJ, EMAIL).await;
    let tenant_cookie = login(&app, EMAIL, TEST_SENHA).await;

    for query in ["?mes=3", "?mes=13", "?ano=24", "?mes=ab&ano=2024"] {
        let response = app
            .client()
            .get(&format!("/meus-arquivos{}", query))
            .add_header("cookie", tenant_cookie.clone())
            .await;
        assert_eq!(response.status_code(), 400, "query {:?}", query);
    }
}

#[tokio::test]
async fn test_listing_skips_rows_whose_object_vanished() {
    let app = setup_test_app().await;
    let empresa_id = register_empresa(&app, "Empresa", CNPJ, EMAIL).await;
    let admin_cookie = login_admin(&app).await;

    upload_pdf(&app, &admin_cookie, empresa_id, "fantasma.pdf", b"x").await;
    std::fs::remove_file(app.object_path(CNPJ, "fantasma.pdf")).unwrap();

    let tenant_cookie = login(&app, EMAIL, TEST_SENHA).await;
    let response = app
        .client()
        .get("/meus-arquivos")
        .add_header("cookie", tenant_cookie)
        .await;

    assert_eq!(response.status_code(), 200);
    let entries: Vec<serde_json::Value> = response.json();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_empty_namespace_lists_nothing() {
    let app = setup_test_app().await;
    let empresa_id = register_empresa(&app, "Empresa", CNPJ, EMAIL).await;
    let admin_cookie = login_admin(&app).await;

    // Only the .keep placeholder exists; neither view may show it.
    let admin_view = app
        .client()
        .get(&format!("/arquivos/{}", empresa_id))
        .add_header("cookie", admin_cookie)
        .await;
    assert_eq!(admin_view.status_code(), 200);
    let entries: Vec<serde_json::Value> = admin_view.json();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn test_admin_listing_for_any_empresa() {
    let app = setup_test_app().await;
    let empresa_id = register_empresa(&app, "Empresa", CNPJ, EMAIL).await;
    let admin_cookie = login_admin(&app).await;

    upload_pdf(&app, &admin_cookie, empresa_id, "nota.pdf", b"x").await;

    let response = app
        .client()
        .get(&format!("/arquivos/{}", empresa_id))
        .add_header("cookie", admin_cookie)
        .await;

    assert_eq!(response.status_code(), 200);
    let entries: Vec<serde_json::Value> = response.json();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], "nota.pdf");
}

#[tokio::test]
async fn test_admin_has_no_tenant_listing_of_their_own() {
    let app = setup_test_app().await;
    let admin_cookie = login_admin(&app).await;

    let response = app
        .client()
        .get("/meus-arquivos")
        .add_header("cookie", admin_cookie)
        .await;

    assert_eq!(response.status_code(), 403);
}

#[tokio::test]
async fn test_download_redirects_owner_and_admin() {
    let app = setup_test_app().await;
    let empresa_id = register_empresa(&app, "Empresa", CNPJ, EMAIL).await;
    let admin_cookie = login_admin(&app).await;
    upload_pdf(&app, &admin_cookie, empresa_id, "nota.pdf", b"x").await;

    let tenant_cookie = login(&app, EMAIL, TEST_SENHA).await;
    let owner = app
        .client()
        .get(&format!("/download/{}/nota.pdf", empresa_id))
        .add_header("cookie", tenant_cookie)
        .await;
    assert_eq!(owner.status_code(), 303);
    assert_eq!(
        location(&owner),
        "http://localhost:3000/arquivos/12345678000199/nota.pdf"
    );

    let admin = app
        .client()
        .get(&format!("/download/{}/nota.pdf", empresa_id))
        .add_header("cookie", admin_cookie)
        .await;
    assert_eq!(admin.status_code(), 303);
}

#[tokio::test]
async fn test_download_denied_across_tenants() {
    let app = setup_test_app().await;
    let empresa_a = register_empresa(&app, "Empresa A", CNPJ, EMAIL).await;
    register_empresa(&app, "Empresa B", "98765432000111", "b@x.com").await;
    let admin_cookie = login_admin(&app).await;
    upload_pdf(&app, &admin_cookie, empresa_a, "nota.pdf", b"x").await;

    let intruder_cookie = login(&app, "b@x.com", TEST_SENHA).await;
    let response = app
        .client()
        .get(&format!("/download/{}/nota.pdf", empresa_a))
        .add_header("cookie", intruder_cookie)
        .await;

    assert_eq!(response.status_code(), 403);
}

#[tokio::test]
async fn test_download_missing_object_is_404() {
    let app = setup_test_app().await;
    let empresa_id = register_empresa(&app, "Empresa", CNPJ, EMAIL).await;
    let tenant_cookie = login(&app, EMAIL, TEST_SENHA).await;

    let response = app
        .client()
        .get(&format!("/download/{}/nunca-subiu.pdf", empresa_id))
        .add_header("cookie", tenant_cookie)
        .await;

    assert_eq!(response.status_code(), 404);
}
