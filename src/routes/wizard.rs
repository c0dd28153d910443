//! Create-client dialog routes.
//!
//! The wizard state lives in the cookie session under [`WIZARD_SESSION_KEY`];
//! the dialog is open exactly when the key is present. Every handler keeps
//! the list filter (`?q=`) it was posted with.

use actix_session::Session;
use actix_web::{HttpResponse, Responder, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::wizard::CreateClientWizard;
use crate::dto::main::IndexQuery;
use crate::dto::wizard::WizardView;
use crate::forms::wizard::{ContactDetailsForm, PersonalDetailsForm};
use crate::forms::{FieldErrors, FieldValues};
use crate::repository::DieselRepository;
use crate::routes::main::render_index;
use crate::routes::{index_query_suffix, redirect};
use crate::services::main::cached_index_page;
use crate::services::{ServiceError, wizard as wizard_service};
use crate::store::ClientStore;

pub const WIZARD_SESSION_KEY: &str = "create_client_wizard";

/// Reads the open wizard, treating an unreadable session entry as closed.
pub fn load_wizard(session: &Session) -> Option<CreateClientWizard> {
    match session.get::<CreateClientWizard>(WIZARD_SESSION_KEY) {
        Ok(wizard) => wizard,
        Err(err) => {
            log::error!("Failed to read wizard from session: {err}");
            session.remove(WIZARD_SESSION_KEY);
            None
        }
    }
}

/// The list page, filtered the way it was when the form was posted.
fn back_to_list(query: &IndexQuery) -> HttpResponse {
    let search = query.search.as_deref().unwrap_or_default();
    redirect(&format!("/{}", index_query_suffix(search)))
}

fn store_wizard(
    session: &Session,
    wizard: &CreateClientWizard,
    query: &IndexQuery,
) -> HttpResponse {
    match session.insert(WIZARD_SESSION_KEY, wizard) {
        Ok(()) => back_to_list(query),
        Err(err) => {
            log::error!("Failed to store wizard in session: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Shared page dependencies for re-rendering the list with the dialog.
struct Page<'a> {
    tera: &'a Tera,
    store: &'a ClientStore,
    flash_messages: &'a IncomingFlashMessages,
}

impl Page<'_> {
    /// Re-renders the open dialog with the submitted values and field errors.
    /// The list comes from the cache; nothing is fetched.
    fn invalid(
        &self,
        query: IndexQuery,
        wizard: &CreateClientWizard,
        values: FieldValues,
        errors: FieldErrors,
    ) -> HttpResponse {
        let view = WizardView::from(wizard)
            .with_values(values)
            .with_errors(errors);
        let data = cached_index_page(self.store, query);
        render_index(self.tera, self.flash_messages, data, Some(view))
    }
}

#[post("/clients/new")]
pub async fn open_wizard(session: Session, query: web::Query<IndexQuery>) -> impl Responder {
    store_wizard(&session, &wizard_service::open_wizard(), &query)
}

#[post("/clients/new/personal")]
pub async fn submit_personal(
    session: Session,
    query: web::Query<IndexQuery>,
    store: web::Data<ClientStore>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<PersonalDetailsForm>,
) -> impl Responder {
    let query = query.into_inner();
    let Some(wizard) = load_wizard(&session) else {
        return back_to_list(&query);
    };
    let values = form.values();

    match wizard_service::submit_personal_details(wizard.clone(), form) {
        Ok(next) => store_wizard(&session, &next, &query),
        Err(ServiceError::Validation(errors)) => Page {
            tera: &tera,
            store: &store,
            flash_messages: &flash_messages,
        }
        .invalid(query, &wizard, values, errors),
        Err(err) => {
            log::warn!("Rejected personal details submit: {err}");
            back_to_list(&query)
        }
    }
}

#[post("/clients/new/back")]
pub async fn go_back(session: Session, query: web::Query<IndexQuery>) -> impl Responder {
    let Some(wizard) = load_wizard(&session) else {
        return back_to_list(&query);
    };

    match wizard_service::go_back(wizard) {
        Ok(previous) => store_wizard(&session, &previous, &query),
        Err(err) => {
            log::warn!("Rejected wizard back transition: {err}");
            back_to_list(&query)
        }
    }
}

#[post("/clients/new/contact")]
pub async fn submit_contact(
    session: Session,
    query: web::Query<IndexQuery>,
    repo: web::Data<DieselRepository>,
    store: web::Data<ClientStore>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ContactDetailsForm>,
) -> impl Responder {
    let query = query.into_inner();
    let Some(wizard) = load_wizard(&session) else {
        return back_to_list(&query);
    };
    let values = form.values();

    match wizard_service::submit_contact_details(repo.get_ref(), &store, wizard.clone(), form) {
        Ok(new_client) => {
            log::info!(
                "Created client {} {}",
                new_client.first_name,
                new_client.last_name
            );
            session.remove(WIZARD_SESSION_KEY);
            FlashMessage::success("Client created.").send();
            back_to_list(&query)
        }
        Err(ServiceError::Validation(errors)) => Page {
            tera: &tera,
            store: &store,
            flash_messages: &flash_messages,
        }
        .invalid(query, &wizard, values, errors),
        // Failed creates are logged by the service and stale submits are
        // ignored; either way the dialog stays as it was.
        Err(_) => back_to_list(&query),
    }
}

#[post("/clients/new/close")]
pub async fn close_wizard(session: Session, query: web::Query<IndexQuery>) -> impl Responder {
    session.remove(WIZARD_SESSION_KEY);
    back_to_list(&query)
}
