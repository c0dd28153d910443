//! HTTP handlers and shared response helpers.

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::Serialize;
use tera::{Context, Tera};

pub mod api;
pub mod main;
pub mod wizard;

/// Registers every application route. Used by the server and by tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .wrap(Cors::permissive())
            .service(api::api_v1_clients)
            .service(api::api_v1_create_client),
    )
    .service(main::show_index)
    .service(wizard::open_wizard)
    .service(wizard::submit_personal)
    .service(wizard::go_back)
    .service(wizard::submit_contact)
    .service(wizard::close_wizard);
}

#[derive(Serialize)]
struct Alert<'a> {
    message: &'a str,
    level: &'static str,
}

/// Maps a flash message level to the Bootstrap alert class suffix.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context shared by every page: flash alerts and the active menu entry.
pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| Alert {
            message: f.content(),
            level: alert_level_to_str(&f.level()),
        })
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Query string that keeps the list filter across form posts and redirects,
/// e.g. `?q=smi`. Empty when there is no filter.
pub fn index_query_suffix(search: &str) -> String {
    if search.is_empty() {
        return String::new();
    }
    match serde_html_form::to_string(vec![("q", search)]) {
        Ok(encoded) => format!("?{encoded}"),
        Err(err) => {
            log::warn!("Failed to encode list filter: {err}");
            String::new()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
