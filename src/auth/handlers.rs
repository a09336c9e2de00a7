use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{ApiError, RegisteredUser},
        password::hash_password,
        repo::RepoError,
        repo_types::NewUser,
    },
    form::{Field, RegistrationInput, RegistrationPayload},
    state::AppState,
    validation::{DefaultSchema, RegistrationSchema},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/register", post(register))
}

#[instrument(skip(state, payload), fields(role = %payload.role()))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegistrationPayload>,
) -> Result<(StatusCode, Json<RegisteredUser>), ApiError> {
    let mut input = RegistrationInput::from(&payload);
    let email = payload.account().email.trim().to_lowercase();
    input.set(Field::Email, email.as_str());

    if let Err(errors) = DefaultSchema.validate(&input) {
        if let Some((field, message)) = errors.iter().next() {
            warn!(%field, "registration rejected by validation");
            return Err(ApiError::Validation(message.to_string()));
        }
    }

    let account = payload.account();
    let password_hash = hash_password(&account.password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        ApiError::Internal(e)
    })?;

    let new_user = NewUser {
        email,
        name: account.name.trim().to_string(),
        role: payload.role(),
        shop_name: payload.shop().map(|shop| shop.shop_name.trim().to_string()),
        password_hash,
    };

    let user = match state.users.create(new_user).await {
        Ok(u) => u,
        Err(RepoError::EmailTaken) => {
            warn!("email already registered");
            return Err(ApiError::EmailTaken);
        }
    };

    info!(user_id = %user.id, email = %user.email, role = %user.role, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisteredUser {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            shop_name: user.shop_name,
            created_at: user.created_at,
        }),
    ))
}
