//! Account API handlers.
//!
//! ```text
//! POST /api/v1/register {"name":"Alice","email":"alice@x.com","password":"secret1"}
//! POST /api/v1/login {"email":"alice@x.com","password":"secret1"}
//! DELETE /api/v1/logout
//! GET /api/v1/users/me
//! ```

use crate::domain::{
    AuthOutcome, Error, LoginCredentials, LoginValidationError, Registration,
    RegistrationValidationError, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Registration request body for `POST /api/v1/register`.
///
/// Example JSON:
/// `{"name":"Alice","email":"alice@x.com","password":"secret1"}`
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request body for `POST /api/v1/login`.
///
/// Example JSON:
/// `{"email":"alice@x.com","password":"secret1"}`
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user account. Never carries the password hash.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "alice@x.com")]
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
        }
    }
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = RegistrationValidationError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.name, &value.email, &value.password)
    }
}

/// Create a new account.
///
/// The password is hashed before anything touches the store. Registration
/// does not establish a session; clients log in afterwards.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 503, description = "Credential store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error")
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration =
        Registration::try_from(payload.into_inner()).map_err(map_registration_validation_error)?;
    let user = state.registration.register(&registration).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// Authenticate and establish a session.
///
/// Uses the centralised `Error` type so clients get a consistent
/// error schema across all endpoints. Rejected credentials surface their
/// reason verbatim in the 401 payload; store failures never do.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserResponse, headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Credential store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error")
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    match state.auth.authenticate(&credentials).await? {
        AuthOutcome::Accepted(user) => {
            let id = state.identity.serialize(&user);
            session.persist_user(&id)?;
            Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
        }
        AuthOutcome::Rejected(reason) => Err(Error::unauthorized(reason.message())),
    }
}

/// End the current session.
///
/// Idempotent: logging out without a session still succeeds.
#[utoipa::path(
    delete,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Session ended", headers(("Set-Cookie" = String, description = "Session removal cookie"))),
        (status = 500, description = "Internal server error")
    ),
    tags = ["users"],
    operation_id = "logout"
)]
#[delete("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

/// Return the account behind the current session.
///
/// A session whose user no longer exists is purged and treated as
/// unauthenticated rather than surfacing an internal failure.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 503, description = "Credential store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error")
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserResponse>> {
    let id = session.require_user_id()?;
    match state.identity.deserialize(&id).await? {
        Some(user) => Ok(web::Json(UserResponse::from(&user))),
        None => {
            session.purge();
            Err(Error::unauthorized("login required"))
        }
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::InvalidEmail(cause) => Error::invalid_request(cause.to_string())
            .with_details(json!({ "field": "email", "code": "invalid_email" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

fn map_registration_validation_error(err: RegistrationValidationError) -> Error {
    match err {
        RegistrationValidationError::InvalidName(cause) => {
            Error::invalid_request(cause.to_string())
                .with_details(json!({ "field": "name", "code": "invalid_name" }))
        }
        RegistrationValidationError::InvalidEmail(cause) => {
            Error::invalid_request(cause.to_string())
                .with_details(json!({ "field": "email", "code": "invalid_email" }))
        }
        RegistrationValidationError::EmptyPassword => {
            Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password", "code": "empty_password" }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{test_http_state, test_session_middleware};
    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;
    use serde_json::Value;

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(test_session_middleware())
            .app_data(web::Data::new(state))
            .service(
                web::scope("/api/v1")
                    .service(register)
                    .service(login)
                    .service(logout)
                    .service(current_user),
            )
    }

    fn register_alice_request() -> actix_http::Request {
        actix_test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(&RegisterRequest {
                name: "Alice".into(),
                email: "alice@x.com".into(),
                password: "secret1".into(),
            })
            .to_request()
    }

    #[actix_web::test]
    async fn register_returns_the_profile_without_credentials() {
        let (state, _store) = test_http_state();
        let app = actix_test::init_service(test_app(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/register")
                .set_json(&RegisterRequest {
                    name: "Alice".into(),
                    email: "Alice@X.com".into(),
                    password: "secret1".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("response JSON");
        assert_eq!(value.get("name").and_then(Value::as_str), Some("Alice"));
        assert_eq!(
            value.get("email").and_then(Value::as_str),
            Some("alice@x.com")
        );
        assert!(value.get("password").is_none());
        assert!(value.get("passwordHash").is_none());
    }

    #[rstest]
    #[case(
        "Al",
        "alice@x.com",
        "secret1",
        "name",
        "invalid_name"
    )]
    #[case(
        "Alice",
        "not-an-email",
        "secret1",
        "email",
        "invalid_email"
    )]
    #[case("Alice", "alice@x.com", "", "password", "empty_password")]
    #[actix_web::test]
    async fn register_rejects_invalid_payloads(
        #[case] name: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let (state, _store) = test_http_state();
        let app = actix_test::init_service(test_app(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/register")
                .set_json(&RegisterRequest {
                    name: name.into(),
                    email: email.into(),
                    password: password.into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(
            value.get("code").and_then(Value::as_str),
            Some("invalid_request")
        );
        let details = value
            .get("details")
            .and_then(|v| v.as_object())
            .expect("details present");
        assert_eq!(details.get("field").and_then(Value::as_str), Some(field));
        assert_eq!(details.get("code").and_then(Value::as_str), Some(code));
    }

    #[actix_web::test]
    async fn duplicate_registration_conflicts() {
        let (state, _store) = test_http_state();
        let app = actix_test::init_service(test_app(state)).await;
        let created = actix_test::call_service(&app, register_alice_request()).await;
        assert_eq!(created.status(), actix_web::http::StatusCode::CREATED);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/register")
                .set_json(&RegisterRequest {
                    name: "Alice Again".into(),
                    // Same address after normalisation.
                    email: "ALICE@x.com".into(),
                    password: "another".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::CONFLICT);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("email already registered")
        );
        assert_eq!(value.get("code").and_then(Value::as_str), Some("conflict"));
    }

    #[rstest]
    #[case("ghost@x.com", "secret1", "User not found")]
    #[case("alice@x.com", "wrong-password", "Incorrect password")]
    #[actix_web::test]
    async fn login_rejections_carry_their_reason(
        #[case] email: &str,
        #[case] password: &str,
        #[case] message: &str,
    ) {
        let (state, _store) = test_http_state();
        let app = actix_test::init_service(test_app(state)).await;
        let created = actix_test::call_service(&app, register_alice_request()).await;
        assert_eq!(created.status(), actix_web::http::StatusCode::CREATED);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(&LoginRequest {
                    email: email.into(),
                    password: password.into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(value.get("message").and_then(Value::as_str), Some(message));
        assert_eq!(
            value.get("code").and_then(Value::as_str),
            Some("unauthorized")
        );
    }

    #[actix_web::test]
    async fn login_sets_a_session_cookie_and_returns_the_profile() {
        let (state, _store) = test_http_state();
        let app = actix_test::init_service(test_app(state)).await;
        let created = actix_test::call_service(&app, register_alice_request()).await;
        assert_eq!(created.status(), actix_web::http::StatusCode::CREATED);

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(&LoginRequest {
                    email: "alice@x.com".into(),
                    password: "secret1".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::OK);
        assert!(
            response
                .response()
                .cookies()
                .any(|cookie| cookie.name() == "session")
        );
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("response JSON");
        assert_eq!(
            value.get("email").and_then(Value::as_str),
            Some("alice@x.com")
        );
    }

    #[actix_web::test]
    async fn current_user_requires_a_session() {
        let (state, _store) = test_http_state();
        let app = actix_test::init_service(test_app(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users/me")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn logout_is_idempotent_and_clears_the_cookie() {
        let (state, _store) = test_http_state();
        let app = actix_test::init_service(test_app(state)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/v1/logout")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), actix_web::http::StatusCode::NO_CONTENT);
    }
}
