use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginForm, RegisterForm},
        extractors::{clear_identity_cookie, set_identity_cookie, Anonymous, Identity},
        password::hash_password,
    },
    error::{FormError, ServiceError, StoreError},
    pages,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(main_page))
        .route("/reg", get(registration_form).post(register))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
}

#[instrument(skip_all)]
pub async fn main_page(Identity(login): Identity) -> Response {
    pages::main_page(login.as_deref()).into_response()
}

pub async fn registration_form(_: Anonymous) -> Response {
    pages::registration_page("").into_response()
}

#[instrument(skip(state, form), fields(login = %form.login))]
pub async fn register(
    State(state): State<AppState>,
    _: Anonymous,
    Form(form): Form<RegisterForm>,
) -> Result<Response, ServiceError> {
    if let Err(rejected) = form.validate() {
        warn!(reason = %rejected, "registration rejected");
        return Ok(pages::registration_page(&rejected.to_string()).into_response());
    }

    if state.users.login_taken(&form.login).await? {
        warn!("login already registered");
        return Ok(pages::registration_page(&FormError::DuplicateLogin.to_string()).into_response());
    }

    let hash = hash_password(&form.password);
    let user = match state.users.create(&form.login, &hash).await {
        Ok(u) => u,
        Err(StoreError::DuplicateLogin(_)) => {
            warn!("login registered concurrently");
            return Ok(pages::registration_page(&FormError::DuplicateLogin.to_string()).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = user.id, login = %user.login, "user registered");
    signed_in_redirect(&user.login)
}

pub async fn login_form(_: Anonymous) -> Response {
    pages::login_page("").into_response()
}

#[instrument(skip(state, form), fields(login = %form.login))]
pub async fn login(
    State(state): State<AppState>,
    _: Anonymous,
    Form(form): Form<LoginForm>,
) -> Result<Response, ServiceError> {
    if let Err(rejected) = form.validate() {
        warn!(reason = %rejected, "login rejected");
        return Ok(pages::login_page(&rejected.to_string()).into_response());
    }

    let hash = hash_password(&form.password);
    match state.users.find_by_credentials(&form.login, &hash).await? {
        Some(user) => {
            info!(user_id = user.id, "user logged in");
            signed_in_redirect(&user.login)
        }
        None => {
            warn!("login with unknown credentials");
            Ok(pages::login_page(&FormError::AuthFailure.to_string()).into_response())
        }
    }
}

#[instrument(skip_all)]
pub async fn logout(Identity(login): Identity) -> Response {
    match login {
        Some(login) => {
            info!(%login, "user logged out");
            ([(header::SET_COOKIE, clear_identity_cookie())], Redirect::to("/login")).into_response()
        }
        None => Redirect::to("/login").into_response(),
    }
}

fn signed_in_redirect(login: &str) -> Result<Response, ServiceError> {
    let cookie = set_identity_cookie(login)?;
    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response())
}
