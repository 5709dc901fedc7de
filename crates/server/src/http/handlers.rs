use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use runtime::{
    ActionRequest, Credentials, LoginResponse, MessageResponse, Pet, PetService, RegisterResponse,
};

use super::auth::AuthUser;
use super::error::ApiError;

type Body<T> = Result<Json<T>, JsonRejection>;

pub async fn register(
    State(service): State<PetService>,
    body: Body<Credentials>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let Json(credentials) = body?;
    let user = service.register(&credentials).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: user.id,
            message: "User created successfully!".to_string(),
        }),
    ))
}

pub async fn login(
    State(service): State<PetService>,
    body: Body<Credentials>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(credentials) = body?;
    let token = service.login(&credentials).await?;
    Ok(Json(LoginResponse {
        token,
        message: "Logged in successfully!".to_string(),
    }))
}

/// Tokens are stateless; logging out only confirms the token was valid.
pub async fn logout(AuthUser(user_id): AuthUser) -> Json<MessageResponse> {
    tracing::info!("User {} logged out", user_id);
    Json(MessageResponse::new("Logged out successfully."))
}

pub async fn get_pet(
    State(service): State<PetService>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Pet>, ApiError> {
    Ok(Json(service.pet(user_id).await?))
}

pub async fn pet_action(
    State(service): State<PetService>,
    AuthUser(user_id): AuthUser,
    body: Body<ActionRequest>,
) -> Result<Json<Pet>, ApiError> {
    let Json(request) = body?;
    let pet = service.act(user_id, request.action.as_deref()).await?;
    Ok(Json(pet))
}

pub async fn not_found() -> (StatusCode, Json<MessageResponse>) {
    (StatusCode::NOT_FOUND, Json(MessageResponse::new("Not found.")))
}
