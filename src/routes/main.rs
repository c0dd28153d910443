use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::dto::main::{IndexPageData, IndexQuery};
use crate::dto::wizard::WizardView;
use crate::repository::DieselRepository;
use crate::routes::wizard::load_wizard;
use crate::routes::{base_context, index_query_suffix, render_template};
use crate::services::main::load_index_page;
use crate::store::ClientStore;

/// Renders the client list with the dialog described by `wizard`, if any.
pub(crate) fn render_index(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    data: IndexPageData,
    wizard: Option<WizardView>,
) -> HttpResponse {
    let mut context = base_context(flash_messages, "index");
    context.insert("clients", &data.clients);
    context.insert("total", &data.total);
    context.insert("query_suffix", &index_query_suffix(&data.search_query));
    context.insert("search_query", &data.search_query);
    context.insert("wizard", &wizard);

    render_template(tera, "main/index.html", &context)
}

#[get("/")]
pub async fn show_index(
    params: web::Query<IndexQuery>,
    session: Session,
    repo: web::Data<DieselRepository>,
    store: web::Data<ClientStore>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let wizard = load_wizard(&session).as_ref().map(WizardView::from);

    let data = load_index_page(repo.get_ref(), &store, params.into_inner());

    render_index(&tera, &flash_messages, data, wizard)
}
