use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{BASIC_ROLE, Board, Role, User, Wallet};

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a user together with its role links and wallet.
    ///
    /// Either everything is stored or nothing is.
    async fn create(&self, user: User, roles: Vec<Role>, wallet: Wallet) -> UserResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Users whose name contains `term`, ignoring case
    async fn search_by_name(&self, term: &str) -> UserResult<Vec<User>>;

    /// All users, oldest first
    async fn list(&self) -> UserResult<Vec<User>>;

    async fn find_role_by_title(&self, title: &str) -> UserResult<Option<Role>>;

    async fn roles_for(&self, user_id: Uuid) -> UserResult<Vec<Role>>;

    async fn boards_for(&self, user_id: Uuid) -> UserResult<Vec<Board>>;

    async fn wallet_for(&self, user_id: Uuid) -> UserResult<Option<Wallet>>;
}

#[derive(Debug, Default)]
struct Store {
    users: HashMap<Uuid, User>,
    roles: HashMap<Uuid, Role>,
    user_roles: HashSet<(Uuid, Uuid)>,
    wallets: HashMap<Uuid, Wallet>,
    boards: HashMap<Uuid, Board>,
    board_members: HashSet<(Uuid, Uuid)>,
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    /// Repository seeded with the basic role
    pub fn new() -> Self {
        let mut store = Store::default();
        let basic = Role::new(BASIC_ROLE, Some("Default role for every user".into()));
        store.roles.insert(basic.id, basic);

        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Repository without any roles
    pub fn empty() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::default())),
        }
    }

    /// Add a board with the given members
    pub async fn insert_board(&self, title: &str, members: &[Uuid]) -> Board {
        let board = Board::new(title, None);
        let mut store = self.store.write().await;
        store.boards.insert(board.id, board.clone());
        for member in members {
            store.board_members.insert((board.id, *member));
        }
        board
    }

    /// Unlink every role from a user
    pub async fn clear_roles(&self, user_id: Uuid) {
        self.store
            .write()
            .await
            .user_roles
            .retain(|(user, _)| *user != user_id);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User, roles: Vec<Role>, wallet: Wallet) -> UserResult<User> {
        let mut store = self.store.write().await;

        let email_exists = store
            .users
            .values()
            .any(|u| u.email.to_lowercase() == user.email.to_lowercase());

        if email_exists {
            return Err(UserError::DuplicateEmail(user.email));
        }

        if let Some(role) = roles.iter().find(|r| !store.roles.contains_key(&r.id)) {
            return Err(UserError::MissingRole(role.title.clone()));
        }

        for role in &roles {
            store.user_roles.insert((user.id, role.id));
        }
        store.wallets.insert(wallet.user_id, wallet);
        store.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn search_by_name(&self, term: &str) -> UserResult<Vec<User>> {
        let needle = term.to_lowercase();
        let result = self
            .list()
            .await?
            .into_iter()
            .filter(|u| u.name.to_lowercase().contains(&needle))
            .collect();
        Ok(result)
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let store = self.store.read().await;
        let mut result: Vec<User> = store.users.values().cloned().collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(result)
    }

    async fn find_role_by_title(&self, title: &str) -> UserResult<Option<Role>> {
        let store = self.store.read().await;
        Ok(store.roles.values().find(|r| r.title == title).cloned())
    }

    async fn roles_for(&self, user_id: Uuid) -> UserResult<Vec<Role>> {
        let store = self.store.read().await;
        let mut roles: Vec<Role> = store
            .user_roles
            .iter()
            .filter(|(user, _)| *user == user_id)
            .filter_map(|(_, role)| store.roles.get(role).cloned())
            .collect();
        roles.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(roles)
    }

    async fn boards_for(&self, user_id: Uuid) -> UserResult<Vec<Board>> {
        let store = self.store.read().await;
        let mut boards: Vec<Board> = store
            .board_members
            .iter()
            .filter(|(_, user)| *user == user_id)
            .filter_map(|(board, _)| store.boards.get(board).cloned())
            .collect();
        boards.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(boards)
    }

    async fn wallet_for(&self, user_id: Uuid) -> UserResult<Option<Wallet>> {
        let store = self.store.read().await;
        Ok(store.wallets.get(&user_id).cloned())
    }
}
