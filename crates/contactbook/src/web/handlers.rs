//! Request handlers for the contact pages.

use axum::extract::{Form, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use minijinja::context;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::AppState;
use crate::contact::{Contact, IdHint};
use crate::error::{Error, ErrorKind};

/// Query string of the list page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    /// Typeahead filter on contact names.
    #[serde(default)]
    pub q: String,
}

/// Fields posted by the new and edit forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    /// Proposed name.
    #[serde(default)]
    pub name: String,
    /// Proposed email.
    #[serde(default)]
    pub email: String,
    /// Proposed phone.
    #[serde(default)]
    pub phone: String,
}

impl From<Contact> for ContactForm {
    fn from(contact: Contact) -> Self {
        Self {
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
        }
    }
}

/// Error returned from a handler, mapped to a status by its kind.
#[derive(Debug)]
pub struct WebError(Error);

impl From<Error> for WebError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match self.0.kind() {
            ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Io | ErrorKind::Config | ErrorKind::Internal => {
                error!(error = %self.0, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, self.0.to_string()).into_response()
    }
}

type HandlerResult<T> = std::result::Result<T, WebError>;

/// Run a store call on the blocking thread pool.
///
/// The store does synchronous file I/O, which must not stall the async
/// workers.
async fn blocking<T, F>(f: F) -> crate::error::Result<T>
where
    F: FnOnce() -> crate::error::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}

/// `GET /`
pub async fn index() -> Redirect {
    Redirect::permanent("/contacts")
}

/// `GET /contacts?q=`
pub async fn list_contacts(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> HandlerResult<Html<String>> {
    let store = state.store.clone();
    let query = params.q.clone();
    let contacts = blocking(move || store.search(&query)).await?;
    let page = state
        .views
        .render("index.html", context! { contacts => contacts, q => params.q })?;
    Ok(Html(page))
}

/// `GET /contacts/new`
pub async fn new_contact_form(State(state): State<AppState>) -> HandlerResult<Html<String>> {
    let page = state
        .views
        .render("new.html", context! { form => ContactForm::default() })?;
    Ok(Html(page))
}

/// `POST /contacts/new`
pub async fn create_contact(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> HandlerResult<Response> {
    let store = state.store.clone();
    let proposed = form.clone();
    let created = blocking(move || {
        store.create(
            &proposed.name,
            &proposed.email,
            &proposed.phone,
            IdHint::Unassigned,
        )
    })
    .await;

    match created {
        Ok(_) => Ok(Redirect::to("/contacts").into_response()),
        Err(err) if err.is_validation() => {
            let page = state.views.render(
                "new.html",
                context! { form => form, error => err.to_string() },
            )?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// `GET /contacts/:id`
pub async fn show_contact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Html<String>> {
    let store = state.store.clone();
    let contact = blocking(move || store.get(id)).await?;
    let page = state
        .views
        .render("show.html", context! { contact => contact })?;
    Ok(Html(page))
}

/// `GET /contacts/:id/edit`
pub async fn edit_contact_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Html<String>> {
    let store = state.store.clone();
    let contact = blocking(move || store.get(id)).await?;
    let page = state.views.render(
        "edit.html",
        context! { id => id, form => ContactForm::from(contact) },
    )?;
    Ok(Html(page))
}

/// `POST /contacts/:id/edit`
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<ContactForm>,
) -> HandlerResult<Response> {
    let store = state.store.clone();
    let proposed = form.clone();
    let updated = blocking(move || {
        store.update(id, &proposed.name, &proposed.email, &proposed.phone)
    })
    .await;

    match updated {
        Ok(contact) => Ok(Redirect::to(&format!("/contacts/{}", contact.id)).into_response()),
        Err(err) if err.is_validation() => {
            let page = state.views.render(
                "edit.html",
                context! { id => id, form => form, error => err.to_string() },
            )?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// `POST /contacts/:id/delete`
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Redirect> {
    let store = state.store.clone();
    blocking(move || store.delete(id)).await?;
    Ok(Redirect::to("/contacts"))
}
