use axum::{
    Router,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::Response,
    routing::get,
};
use axum_helpers::{
    Envelope, JwtAuth, NoData, RequireAuth, RequiredJson, UuidPath,
    errors::responses::{
        BadRequestUuidResponse, ConflictResponse, InternalServerErrorResponse,
        MissingFieldsResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{
    BoardView, BoardsData, CreateUser, RoleView, RolesData, UserSearch, UserView, UsersData,
    WalletData, WalletView,
};
use crate::repository::UserRepository;
use crate::service::{UserLookup, UserService};

pub const USERS_TAG: &str = "users";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_users,
        create_user,
        get_user,
        get_user_boards,
        get_user_roles,
        get_user_wallet,
    ),
    components(
        schemas(
            CreateUser,
            UserSearch,
            UserView,
            RoleView,
            WalletView,
            BoardView,
            UsersData,
            RolesData,
            BoardsData,
            WalletData,
            Envelope<NoData>,
        ),
        responses(
            MissingFieldsResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = USERS_TAG, description = "User accounts and the boards, roles and wallet attached to them")
    )
)]
pub struct ApiDoc;

/// Router state: the service plus the token verifier used by [`RequireAuth`]
pub struct UsersState<R: UserRepository> {
    pub service: Arc<UserService<R>>,
    pub auth: JwtAuth,
}

impl<R: UserRepository> Clone for UsersState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            auth: self.auth.clone(),
        }
    }
}

impl<R: UserRepository> FromRef<UsersState<R>> for JwtAuth {
    fn from_ref(state: &UsersState<R>) -> Self {
        state.auth.clone()
    }
}

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>, auth: JwtAuth) -> Router {
    let state = UsersState {
        service: Arc::new(service),
        auth,
    };

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user))
        .route("/{id}/boards", get(get_user_boards))
        .route("/{id}/roles", get(get_user_roles))
        .route("/{id}/wallet", get(get_user_wallet))
        .with_state(state)
}

fn users_response(lookup: UserLookup) -> Response {
    match lookup {
        UserLookup::One(user) => Envelope::success(user).into_response(StatusCode::OK),
        UserLookup::Many(users) => {
            Envelope::success(UsersData { users }).into_response(StatusCode::OK)
        }
    }
}

/// List users, or search them by name with `q`
#[utoipa::path(
    get,
    path = "",
    tag = USERS_TAG,
    params(UserSearch),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Matching users", body = Envelope<UsersData>),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    RequireAuth(claims): RequireAuth,
    State(state): State<UsersState<R>>,
    Query(search): Query<UserSearch>,
) -> UserResult<Response> {
    tracing::debug!(requested_by = %claims.sub, q = ?search.term(), "Listing users");
    let lookup = state.service.read_users(None, search.term()).await?;
    Ok(users_response(lookup))
}

/// Register a user
///
/// The new user gets the `basic` role and an empty wallet.
#[utoipa::path(
    post,
    path = "",
    tag = USERS_TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = Envelope<NoData>),
        (status = 400, response = MissingFieldsResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(state): State<UsersState<R>>,
    RequiredJson(input): RequiredJson<CreateUser>,
) -> UserResult<Response> {
    let id = state.service.create_user(input).await?;
    Ok(Envelope::message(format!("User with id {} was created.", id))
        .into_response(StatusCode::CREATED))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = USERS_TAG,
    params(("id" = uuid::Uuid, Path, description = "User id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The user", body = Envelope<UserView>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    RequireAuth(_claims): RequireAuth,
    State(state): State<UsersState<R>>,
    UuidPath(id): UuidPath,
) -> UserResult<Response> {
    let lookup = state.service.read_users(Some(id), None).await?;
    Ok(users_response(lookup))
}

/// Boards the user belongs to
#[utoipa::path(
    get,
    path = "/{id}/boards",
    tag = USERS_TAG,
    params(("id" = uuid::Uuid, Path, description = "User id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The user's boards", body = Envelope<BoardsData>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user_boards<R: UserRepository>(
    RequireAuth(_claims): RequireAuth,
    State(state): State<UsersState<R>>,
    UuidPath(id): UuidPath,
) -> UserResult<Response> {
    let boards = state.service.user_boards(id).await?;
    Ok(Envelope::success(BoardsData { boards }).into_response(StatusCode::OK))
}

/// Roles granted to the user
///
/// A user without roles gets an empty list, not a 404.
#[utoipa::path(
    get,
    path = "/{id}/roles",
    tag = USERS_TAG,
    params(("id" = uuid::Uuid, Path, description = "User id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The user's roles", body = Envelope<RolesData>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user_roles<R: UserRepository>(
    RequireAuth(_claims): RequireAuth,
    State(state): State<UsersState<R>>,
    UuidPath(id): UuidPath,
) -> UserResult<Response> {
    let roles = state.service.user_roles(id).await?;
    Ok(Envelope::success(RolesData { roles }).into_response(StatusCode::OK))
}

/// The user's wallet
#[utoipa::path(
    get,
    path = "/{id}/wallet",
    tag = USERS_TAG,
    params(("id" = uuid::Uuid, Path, description = "User id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The user's wallet", body = Envelope<WalletData>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user_wallet<R: UserRepository>(
    RequireAuth(_claims): RequireAuth,
    State(state): State<UsersState<R>>,
    UuidPath(id): UuidPath,
) -> UserResult<Response> {
    let wallet = state.service.user_wallet(id).await?;
    Ok(Envelope::success(WalletData { wallet }).into_response(StatusCode::OK))
}
