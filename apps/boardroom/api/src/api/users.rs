use axum::Router;
use domain_users::{PgUserRepository, UserService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgUserRepository::new(state.db.clone());
    let service = UserService::new(repository);
    handlers::router(service, state.auth.clone())
}
