use axum::{extract::State, Form, Json};

use ssc_backend::{ProvisioningClient, SessionClient};
use ssc_core::{Identifier, LoginForm};

use crate::models::{ApiError, DeleteForm, DeleteResponse, LookupResponse};
use crate::operator::RemoteUser;
use crate::state::AppState;

/// POST /ssc/ - Validate the login form and look up the live session.
pub async fn lookup<P, S>(
    State(state): State<AppState<P, S>>,
    user: RemoteUser,
    Form(form): Form<LoginForm>,
) -> Result<Json<LookupResponse>, ApiError>
where
    P: ProvisioningClient + 'static,
    S: SessionClient + 'static,
{
    let login = form.dispatch(&state.grammar)?;
    tracing::info!(%login, "session lookup");

    let Some(record) = state
        .provisioning
        .lookup(&login)
        .await
        .map_err(ApiError::Provisioning)?
    else {
        tracing::info!(%login, "no provisioning binding");
        return Ok(Json(LookupResponse::not_found(&login)));
    };

    let operator = user.name_or(&state.default_operator);
    let session = state
        .sessions
        .query(operator, &login)
        .await
        .map_err(ApiError::Session)?;

    if session.is_empty() {
        tracing::info!(%login, "no live session");
        return Ok(Json(LookupResponse::not_found(&login)));
    }

    Ok(Json(LookupResponse::found(&login, &record, &session)))
}

/// POST /ssc/delete - Drop the session named in `login_del` once confirmed.
pub async fn delete<P, S>(
    State(state): State<AppState<P, S>>,
    user: RemoteUser,
    Form(form): Form<DeleteForm>,
) -> Result<Json<DeleteResponse>, ApiError>
where
    P: ProvisioningClient + 'static,
    S: SessionClient + 'static,
{
    if !form.confirmed() {
        return Ok(Json(DeleteResponse::cancelled(form.login_del)));
    }

    // login_del round-trips through the client, so it is validated again
    let login = Identifier::parse(form.login_del.as_deref().unwrap_or_default(), &state.grammar)?;
    let operator = user.name_or(&state.default_operator);

    state
        .sessions
        .delete(operator, &login)
        .await
        .map_err(ApiError::Session)?;

    tracing::info!(%login, operator, "session deleted");
    Ok(Json(DeleteResponse::deleted(&login)))
}
