use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::{FlashMessagesFramework, Level, storage::CookieMessageStore};
use diesel::RunQueryDsl;
use pushkind_clients::repository::{ClientReader, DieselRepository};
use pushkind_clients::routes::{self, alert_level_to_str, index_query_suffix};
use pushkind_clients::store::ClientStore;
use serde_json::{Value, json};
use tera::Tera;

mod common;

/// Minimal cookie jar carrying the session and flash cookies between calls.
#[derive(Default)]
struct Jar(Vec<Cookie<'static>>);

impl Jar {
    fn absorb<B>(&mut self, resp: &ServiceResponse<B>) {
        for cookie in resp.response().cookies() {
            self.0.retain(|c| c.name() != cookie.name());
            if !cookie.value().is_empty() {
                self.0.push(cookie.into_owned());
            }
        }
    }

    fn apply(&self, mut req: test::TestRequest) -> test::TestRequest {
        for cookie in &self.0 {
            req = req.cookie(cookie.clone());
        }
        req
    }
}

macro_rules! init_app {
    ($repo:expr, $store:expr) => {{
        let key = Key::generate();
        let message_store = CookieMessageStore::builder(key.clone()).build();
        let message_framework = FlashMessagesFramework::builder(message_store).build();
        let tera = Tera::new("templates/**/*").expect("templates should parse");
        test::init_service(
            App::new()
                .wrap(message_framework)
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), key)
                        .cookie_secure(false)
                        .build(),
                )
                .configure(routes::configure)
                .app_data(web::Data::new(tera))
                .app_data(web::Data::new($repo))
                .app_data(web::Data::new($store)),
        )
        .await
    }};
}

macro_rules! send {
    ($app:expr, $jar:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $jar.apply($req).to_request()).await;
        $jar.absorb(&resp);
        resp
    }};
}

async fn body_text<B>(resp: ServiceResponse<B>) -> String
where
    B: actix_web::body::MessageBody,
{
    let bytes = test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

fn assert_redirects_home<B>(resp: &ServiceResponse<B>) {
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");
}

#[::core::prelude::v1::test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

#[::core::prelude::v1::test]
fn test_index_query_suffix_encodes_filter() {
    assert_eq!(index_query_suffix(""), "");
    assert_eq!(index_query_suffix("smi"), "?q=smi");
    assert_eq!(index_query_suffix("a b&c"), "?q=a+b%26c");
}

#[actix_web::test]
async fn wizard_creates_client_end_to_end() {
    let test_db = common::TestDb::new("wizard_creates_client_end_to_end.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let store = ClientStore::new();
    let app = init_app!(repo.clone(), store.clone());
    let mut jar = Jar::default();

    let resp = send!(app, jar, test::TestRequest::get().uri("/"));
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("Create new client"));
    assert!(!body.contains("personal-details"));

    let resp = send!(app, jar, test::TestRequest::post().uri("/clients/new"));
    assert_redirects_home(&resp);
    let body = body_text(send!(app, jar, test::TestRequest::get().uri("/"))).await;
    assert!(body.contains("id=\"personal-details\""));

    // Missing first name keeps the wizard on the first step.
    let resp = send!(
        app,
        jar,
        test::TestRequest::post()
            .uri("/clients/new/personal")
            .set_form([("first_name", ""), ("last_name", "Doe")])
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("First name is required"));
    assert!(body.contains("id=\"personal-details\""));

    let resp = send!(
        app,
        jar,
        test::TestRequest::post()
            .uri("/clients/new/personal")
            .set_form([("first_name", "Jane"), ("last_name", "Doe")])
    );
    assert_redirects_home(&resp);
    let body = body_text(send!(app, jar, test::TestRequest::get().uri("/"))).await;
    assert!(body.contains("id=\"contact-details\""));

    // Back shows the committed names, forward again.
    let resp = send!(app, jar, test::TestRequest::post().uri("/clients/new/back"));
    assert_redirects_home(&resp);
    let body = body_text(send!(app, jar, test::TestRequest::get().uri("/"))).await;
    assert!(body.contains("id=\"personal-details\""));
    assert!(body.contains("value=\"Jane\""));
    assert!(body.contains("value=\"Doe\""));

    let resp = send!(
        app,
        jar,
        test::TestRequest::post()
            .uri("/clients/new/personal")
            .set_form([("first_name", "Jane"), ("last_name", "Doe")])
    );
    assert_redirects_home(&resp);

    // Malformed email never reaches the database.
    let resp = send!(
        app,
        jar,
        test::TestRequest::post()
            .uri("/clients/new/contact")
            .set_form([("email", "abc"), ("phone_number", "5551234")])
    );
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Enter a valid email"));
    assert!(repo.list_clients().unwrap().is_empty());

    let resp = send!(
        app,
        jar,
        test::TestRequest::post()
            .uri("/clients/new/contact")
            .set_form([("email", "jane@x.com"), ("phone_number", "5551234")])
    );
    assert_redirects_home(&resp);

    let clients = repo.list_clients().unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].first_name.as_str(), "Jane");
    assert_eq!(clients[0].last_name.as_str(), "Doe");
    assert_eq!(clients[0].email.as_str(), "jane@x.com");
    assert_eq!(clients[0].phone_number.as_str(), "5551234");
    assert_eq!(store.clients(), clients);

    let body = body_text(send!(app, jar, test::TestRequest::get().uri("/"))).await;
    assert!(body.contains("Client created."));
    assert!(body.contains("jane@x.com"));
    assert!(!body.contains("id=\"contact-details\""));
    assert!(!body.contains("id=\"personal-details\""));
}

#[actix_web::test]
async fn closing_wizard_discards_draft() {
    let test_db = common::TestDb::new("closing_wizard_discards_draft.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let store = ClientStore::new();
    let app = init_app!(repo.clone(), store.clone());
    let mut jar = Jar::default();

    send!(app, jar, test::TestRequest::post().uri("/clients/new"));
    send!(
        app,
        jar,
        test::TestRequest::post()
            .uri("/clients/new/personal")
            .set_form([("first_name", "Jane"), ("last_name", "Doe")])
    );
    let before = store.snapshot();

    let resp = send!(app, jar, test::TestRequest::post().uri("/clients/new/close"));
    assert_redirects_home(&resp);

    assert!(repo.list_clients().unwrap().is_empty());
    assert_eq!(store.snapshot(), before);

    // Reopening starts from an empty draft.
    send!(app, jar, test::TestRequest::post().uri("/clients/new"));
    let body = body_text(send!(app, jar, test::TestRequest::get().uri("/"))).await;
    assert!(body.contains("id=\"personal-details\""));
    assert!(!body.contains("value=\"Jane\""));
}

#[actix_web::test]
async fn index_filters_by_name() {
    let test_db = common::TestDb::new("index_filters_by_name.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let store = ClientStore::new();
    let app = init_app!(repo.clone(), store.clone());

    for (first, last, email) in [
        ("Jane", "Doe", "jane@x.com"),
        ("John", "Smith", "john@x.com"),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/v1/clients")
            .set_json(json!({
                "firstName": first,
                "lastName": last,
                "email": email,
                "phoneNumber": "5551234",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get().uri("/?q=SMI").to_request();
    let body = body_text(test::call_service(&app, req).await).await;
    assert!(body.contains("john@x.com"));
    assert!(!body.contains("jane@x.com"));
    assert!(body.contains("value=\"SMI\""));
    assert_eq!(store.clients().len(), 2);
}

#[actix_web::test]
async fn api_lists_and_creates_clients() {
    let test_db = common::TestDb::new("api_lists_and_creates_clients.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let app = init_app!(repo, ClientStore::new());

    let req = test::TestRequest::get().uri("/api/v1/clients").to_request();
    let clients: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(clients, json!([]));

    let req = test::TestRequest::post()
        .uri("/api/v1/clients")
        .set_json(json!({
            "firstName": "Jane",
            "lastName": "Doe",
            "email": "jane@x.com",
            "phoneNumber": "5551234",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let clients: Value = test::read_body_json(resp).await;
    assert_eq!(clients.as_array().map(Vec::len), Some(1));
    assert_eq!(clients[0]["firstName"], "Jane");
    assert_eq!(clients[0]["phoneNumber"], "5551234");

    let req = test::TestRequest::post()
        .uri("/api/v1/clients")
        .set_json(json!({
            "firstName": "John",
            "lastName": "",
            "email": "abc",
            "phoneNumber": "5550000",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"]["last_name"], "Last name is required");
    assert_eq!(body["errors"]["email"], "Enter a valid email");
}

macro_rules! post_personal {
    ($app:expr, $jar:expr, $first:expr, $last:expr) => {
        send!(
            $app,
            $jar,
            test::TestRequest::post()
                .uri("/clients/new/personal")
                .set_form([("first_name", $first), ("last_name", $last)])
        )
    };
}

#[actix_web::test]
async fn over_long_name_is_a_field_error() {
    let test_db = common::TestDb::new("over_long_name_is_a_field_error.db");
    let app = init_app!(
        DieselRepository::new(test_db.pool().clone()),
        ClientStore::new()
    );
    let mut jar = Jar::default();
    let long_name = "A".repeat(2000);

    send!(app, jar, test::TestRequest::post().uri("/clients/new"));
    let resp = post_personal!(app, jar, long_name.as_str(), long_name.as_str());
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("First name is too long"));
    assert!(body.contains("Last name is too long"));

    // The limit itself still fits in the session cookie.
    let longest = "A".repeat(100);
    let resp = post_personal!(app, jar, longest.as_str(), longest.as_str());
    assert_redirects_home(&resp);
    let body = body_text(send!(app, jar, test::TestRequest::get().uri("/"))).await;
    assert!(body.contains("id=\"contact-details\""));
}

#[actix_web::test]
async fn failed_create_keeps_dialog_on_contact_step() {
    let test_db = common::TestDb::new("failed_create_keeps_dialog_on_contact_step.db");
    let store = ClientStore::new();
    let app = init_app!(
        DieselRepository::new(test_db.pool().clone()),
        store.clone()
    );
    let mut jar = Jar::default();

    send!(app, jar, test::TestRequest::post().uri("/clients/new"));
    assert_redirects_home(&post_personal!(app, jar, "Jane", "Doe"));

    let mut conn = test_db.pool().get().unwrap();
    diesel::sql_query("DROP TABLE clients")
        .execute(&mut conn)
        .unwrap();

    let resp = send!(
        app,
        jar,
        test::TestRequest::post()
            .uri("/clients/new/contact")
            .set_form([("email", "jane@x.com"), ("phone_number", "5551234")])
    );
    assert_redirects_home(&resp);

    let body = body_text(send!(app, jar, test::TestRequest::get().uri("/"))).await;
    assert!(body.contains("id=\"contact-details\""));
    assert!(!body.contains("Client created."));
    assert!(store.clients().is_empty());

    // The committed names survive the failure.
    send!(app, jar, test::TestRequest::post().uri("/clients/new/back"));
    let body = body_text(send!(app, jar, test::TestRequest::get().uri("/"))).await;
    assert!(body.contains("value=\"Jane\""));
}

#[actix_web::test]
async fn wrong_step_post_leaves_wizard_unchanged() {
    let test_db = common::TestDb::new("wrong_step_post_leaves_wizard_unchanged.db");
    let repo = DieselRepository::new(test_db.pool().clone());
    let app = init_app!(repo.clone(), ClientStore::new());
    let mut jar = Jar::default();

    // No wizard yet: contact and back posts are ignored.
    let resp = send!(
        app,
        jar,
        test::TestRequest::post()
            .uri("/clients/new/contact")
            .set_form([("email", "jane@x.com"), ("phone_number", "5551234")])
    );
    assert_redirects_home(&resp);
    assert!(repo.list_clients().unwrap().is_empty());
    let body = body_text(send!(app, jar, test::TestRequest::get().uri("/"))).await;
    assert!(!body.contains("id=\"personal-details\""));

    send!(app, jar, test::TestRequest::post().uri("/clients/new"));
    assert_redirects_home(&post_personal!(app, jar, "Jane", "Doe"));

    // A stale personal-details form posted at the contact step.
    assert_redirects_home(&post_personal!(app, jar, "Bob", "Smith"));
    let body = body_text(send!(app, jar, test::TestRequest::get().uri("/"))).await;
    assert!(body.contains("id=\"contact-details\""));

    send!(app, jar, test::TestRequest::post().uri("/clients/new/back"));
    let body = body_text(send!(app, jar, test::TestRequest::get().uri("/"))).await;
    assert!(body.contains("value=\"Jane\""));
    assert!(!body.contains("value=\"Bob\""));

    // Back from the personal step is a wrong-step request as well.
    let resp = send!(app, jar, test::TestRequest::post().uri("/clients/new/back"));
    assert_redirects_home(&resp);
    let body = body_text(send!(app, jar, test::TestRequest::get().uri("/"))).await;
    assert!(body.contains("id=\"personal-details\""));
    assert!(body.contains("value=\"Jane\""));
}

#[actix_web::test]
async fn reopening_open_wizard_restarts_it() {
    let test_db = common::TestDb::new("reopening_open_wizard_restarts_it.db");
    let app = init_app!(
        DieselRepository::new(test_db.pool().clone()),
        ClientStore::new()
    );
    let mut jar = Jar::default();

    send!(app, jar, test::TestRequest::post().uri("/clients/new"));
    assert_redirects_home(&post_personal!(app, jar, "Jane", "Doe"));

    let resp = send!(app, jar, test::TestRequest::post().uri("/clients/new"));
    assert_redirects_home(&resp);

    let body = body_text(send!(app, jar, test::TestRequest::get().uri("/"))).await;
    assert!(body.contains("id=\"personal-details\""));
    assert!(!body.contains("id=\"contact-details\""));
    assert!(!body.contains("value=\"Jane\""));
}

#[actix_web::test]
async fn wizard_keeps_list_filter() {
    let test_db = common::TestDb::new("wizard_keeps_list_filter.db");
    let app = init_app!(
        DieselRepository::new(test_db.pool().clone()),
        ClientStore::new()
    );
    let mut jar = Jar::default();

    for (first, last, email) in [
        ("Jane", "Doe", "jane@x.com"),
        ("John", "Smith", "john@x.com"),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/v1/clients")
            .set_json(json!({
                "firstName": first,
                "lastName": last,
                "email": email,
                "phoneNumber": "5551234",
            }));
        assert_eq!(send!(app, jar, req).status(), StatusCode::OK);
    }

    let resp = send!(app, jar, test::TestRequest::post().uri("/clients/new?q=smi"));
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/?q=smi");

    let body = body_text(send!(app, jar, test::TestRequest::get().uri("/?q=smi"))).await;
    assert!(body.contains("action=\"/clients/new/personal?q=smi\""));

    // A failed submit re-renders the filtered list.
    let resp = send!(
        app,
        jar,
        test::TestRequest::post()
            .uri("/clients/new/personal?q=smi")
            .set_form([("first_name", ""), ("last_name", "Doe")])
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("First name is required"));
    assert!(body.contains("value=\"smi\""));
    assert!(body.contains("john@x.com"));
    assert!(!body.contains("jane@x.com"));
}
