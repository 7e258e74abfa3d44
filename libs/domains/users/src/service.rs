use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{
    BASIC_ROLE, BoardView, CreateUser, RoleView, User, UserView, Wallet, WalletView,
};
use crate::repository::UserRepository;

/// Result of reading users: one user by id, or a list
#[derive(Debug, Clone, PartialEq)]
pub enum UserLookup {
    One(UserView),
    Many(Vec<UserView>),
}

/// Service layer for User business logic
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a user with the basic role and an empty wallet
    pub async fn create_user(&self, input: CreateUser) -> UserResult<Uuid> {
        let missing = input.missing_fields();
        if !missing.is_empty() {
            return Err(UserError::MissingFields(missing));
        }

        let password_hash = self.hash_password(&input.password)?;

        let basic = self
            .repository
            .find_role_by_title(BASIC_ROLE)
            .await?
            .ok_or_else(|| UserError::MissingRole(BASIC_ROLE.to_string()))?;

        let user = User::new(input.name, input.email, input.phone_number, password_hash);
        let wallet = Wallet::new(user.id);

        let created = self.repository.create(user, vec![basic], wallet).await?;

        tracing::info!(user_id = %created.id, email = %created.email, "Created user");
        Ok(created.id)
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: Uuid) -> UserResult<UserView> {
        let user = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        Ok(user.into())
    }

    pub async fn search_users(&self, term: &str) -> UserResult<Vec<UserView>> {
        let users = self.repository.search_by_name(term).await?;
        if users.is_empty() {
            return Err(UserError::NoMatchingUsers(term.to_string()));
        }
        Ok(users.into_iter().map(Into::into).collect())
    }

    pub async fn list_users(&self) -> UserResult<Vec<UserView>> {
        let users = self.repository.list().await?;
        if users.is_empty() {
            return Err(UserError::NoUsers);
        }
        Ok(users.into_iter().map(Into::into).collect())
    }

    /// An id wins over a search term; with neither, every user is listed.
    pub async fn read_users(&self, id: Option<Uuid>, term: Option<&str>) -> UserResult<UserLookup> {
        match (id, term) {
            (Some(id), _) => self.get_user(id).await.map(UserLookup::One),
            (None, Some(term)) => self.search_users(term).await.map(UserLookup::Many),
            (None, None) => self.list_users().await.map(UserLookup::Many),
        }
    }

    /// Boards the user belongs to; an empty membership is an error
    pub async fn user_boards(&self, id: Uuid) -> UserResult<Vec<BoardView>> {
        self.get_user(id).await?;

        let boards = self.repository.boards_for(id).await?;
        if boards.is_empty() {
            return Err(UserError::NoBoards(id));
        }
        Ok(boards.into_iter().map(Into::into).collect())
    }

    /// Roles granted to the user, possibly none
    pub async fn user_roles(&self, id: Uuid) -> UserResult<Vec<RoleView>> {
        self.get_user(id).await?;

        let roles = self.repository.roles_for(id).await?;
        Ok(roles.into_iter().map(Into::into).collect())
    }

    pub async fn user_wallet(&self, id: Uuid) -> UserResult<WalletView> {
        self.get_user(id).await?;

        let wallet = self
            .repository
            .wallet_for(id)
            .await?
            .ok_or(UserError::MissingWallet(id))?;
        Ok(wallet.into())
    }

    fn hash_password(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }
}
