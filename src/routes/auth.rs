use crate::{
    auth::{
        generate_token, hash_password, verify_password, LoginForm, RegisterRequest, TokenResponse,
    },
    config::Config,
    error::AppError,
    models::NewUser,
    store,
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account. Duplicate usernames are rejected with 409.
#[post("")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    register_data.validate()?;

    let register_data = register_data.into_inner();

    // Hash password
    let password_hash = hash_password(&register_data.password)?;

    // Insert new user; the store maps a unique-constraint hit to Conflict.
    let user = store::users::create(
        &pool,
        NewUser {
            username: register_data.username,
            email: register_data.email,
            first_name: register_data.first_name,
            last_name: register_data.last_name,
            password_hash,
            role: register_data.role,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(user))
}

/// Login
///
/// Authenticates a user against the submitted form credentials and returns a
/// bearer access token. An unknown username and a wrong password produce the
/// same 401, so neither case leaks which one was wrong.
#[post("/token")]
pub async fn login(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    form: web::Form<LoginForm>,
) -> Result<impl Responder, AppError> {
    // Validate input
    form.validate()?;

    // Get user from the directory
    let user = store::users::find_by_username(&pool, &form.username).await?;

    match user {
        Some(user) => {
            // Verify password
            if verify_password(&form.password, &user.password_hash)? {
                let token = generate_token(
                    &user.username,
                    user.id,
                    user.role,
                    chrono::Duration::minutes(config.token_ttl_minutes),
                )?;
                Ok(HttpResponse::Ok().json(TokenResponse::bearer(token)))
            } else {
                Err(AppError::Unauthorized("Invalid credentials".into()))
            }
        }
        None => Err(AppError::Unauthorized("Invalid credentials".into())),
    }
}
