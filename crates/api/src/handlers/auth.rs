//! Handlers for the `/auth` resource (signup, login, logout, me, link).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use orgdir_core::error::CoreError;
use orgdir_core::roles::{Actor, Role};
use orgdir_db::models::account::{Account, AccountResponse, CreateAccount};
use orgdir_db::repositories::{AccountRepo, EmployeeRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt;
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub employee_id: Option<String>,
}

/// Request body for `POST /auth/login`. Missing fields deserialize as empty.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub account: AccountResponse,
}

/// `GET /auth/me` payload.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    #[serde(flatten)]
    pub account: AccountResponse,
    /// Name of the linked employee, if any.
    pub name: Option<String>,
}

/// `POST /auth/me/link-employee` payload.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub account: AccountResponse,
    /// Whether this call created the link.
    pub linked: bool,
    /// A token carrying the current employee link.
    pub access_token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<AccountResponse>)> {
    let email = input.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(CoreError::Validation("A valid email is required".into()).into());
    }
    let role = Role::parse(&input.role)?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(CoreError::Validation)?;

    let employee_id = input
        .employee_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty());
    if let Some(id) = &employee_id {
        if EmployeeRepo::find_by_id(&state.pool, id).await?.is_none() {
            return Err(CoreError::Validation(format!(
                "employee_id {id} does not reference an existing employee"
            ))
            .into());
        }
    }

    if AccountRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(CoreError::Conflict("An account with this email already exists".into()).into());
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let account = AccountRepo::create(
        &state.pool,
        &CreateAccount {
            email,
            password_hash,
            role,
            employee_id,
        },
    )
    .await?;

    tracing::info!(account_id = account.id, role = %account.role, "Account created");
    Ok((StatusCode::CREATED, Json(AccountResponse::from(&account))))
}

/// POST /api/v1/auth/login
///
/// Unknown email and wrong password return the same 401.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = input.email.trim();
    if email.is_empty() || input.password.is_empty() {
        return Err(CoreError::Validation("Email and password are required".into()).into());
    }

    let account = AccountRepo::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| CoreError::Unauthorized(INVALID_CREDENTIALS.into()))?;

    let password_valid = verify_password(&input.password, &account.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.into()).into());
    }

    let access_token = issue_token(&state, &account)?;
    tracing::debug!(account_id = account.id, "Login succeeded");

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.expires_in_secs(),
        account: AccountResponse::from(&account),
    }))
}

/// POST /api/v1/auth/logout
///
/// Tokens are stateless; the client discards its copy.
pub async fn logout(RequireAuth(_user): RequireAuth) -> StatusCode {
    StatusCode::NO_CONTENT
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<MeResponse>> {
    let account = load_account(&state, user.actor.account_id).await?;
    let name = match &account.employee_id {
        Some(id) => EmployeeRepo::find_by_id(&state.pool, id)
            .await?
            .map(|e| e.name),
        None => None,
    };
    Ok(Json(MeResponse {
        account: AccountResponse::from(&account),
        name,
    }))
}

/// POST /api/v1/auth/me/link-employee
///
/// Link the caller's account to the employee whose contact email matches the
/// account email. Repeating the call after a link is a no-op.
pub async fn link_employee(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<LinkResponse>> {
    let mut account = load_account(&state, user.actor.account_id).await?;
    let mut linked = false;

    if account.employee_id.is_none() {
        if let Some(employee) = EmployeeRepo::find_by_email(&state.pool, &account.email).await? {
            if let Some(updated) =
                AccountRepo::link_employee(&state.pool, account.id, &employee.id).await?
            {
                tracing::info!(
                    account_id = updated.id,
                    employee_id = %employee.id,
                    "Linked account to employee by email"
                );
                account = updated;
                linked = true;
            } else if let Some(current) = AccountRepo::find_by_id(&state.pool, account.id).await? {
                account = current;
            }
        }
    }

    let access_token = issue_token(&state, &account)?;
    Ok(Json(LinkResponse {
        account: AccountResponse::from(&account),
        linked,
        access_token,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_account(state: &AppState, id: i64) -> AppResult<Account> {
    AccountRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Account",
                id: id.to_string(),
            })
        })
}

fn issue_token(state: &AppState, account: &Account) -> AppResult<String> {
    let actor = Actor {
        account_id: account.id,
        role: account.role,
        employee_id: account.employee_id.clone(),
    };
    jwt::issue_token(&actor, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))
}
