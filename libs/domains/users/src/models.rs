use axum_helpers::RequiredFields;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Title of the role every new user is granted
pub const BASIC_ROLE: &str = "basic";

/// User entity - matches SQL schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Unique across users
    pub email: String,
    pub phone_number: String,
    /// Argon2 password hash (never exposed in API responses)
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        name: String,
        email: String,
        phone_number: String,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name,
            email,
            phone_number,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Named permission tag, e.g. `basic`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
}

impl Role {
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: title.into(),
            description,
        }
    }
}

/// Per-user account container, created together with its user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: Uuid,
    pub user_id: Uuid,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

impl Wallet {
    /// Empty wallet for `user_id`
    pub fn new(user_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id,
            balance: 0,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Board {
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: title.into(),
            description,
            created_at: Utc::now(),
        }
    }
}

/// Public projection of a user (no password hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone_number: user.phone_number,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RoleView {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
}

impl From<Role> for RoleView {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            title: role.title,
            description: role.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WalletView {
    pub id: Uuid,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Wallet> for WalletView {
    fn from(wallet: Wallet) -> Self {
        Self {
            id: wallet.id,
            balance: wallet.balance,
            created_at: wallet.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BoardView {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Board> for BoardView {
    fn from(board: Board) -> Self {
        Self {
            id: board.id,
            title: board.title,
            description: board.description,
            created_at: board.created_at,
        }
    }
}

/// Sign-up payload
#[derive(Clone, Deserialize, ToSchema)]
pub struct CreateUser {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "correct horse battery staple")]
    pub password: String,
    #[schema(example = "0712345678")]
    pub phone_number: String,
}

impl CreateUser {
    /// Required fields that are blank, in declaration order
    pub fn missing_fields(&self) -> Vec<String> {
        [
            ("email", &self.email),
            ("name", &self.name),
            ("password", &self.password),
            ("phone_number", &self.phone_number),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field.to_string())
        .collect()
    }
}

impl RequiredFields for CreateUser {
    const REQUIRED: &'static [&'static str] = &["email", "name", "password", "phone_number"];
}

impl std::fmt::Debug for CreateUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUser")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .field("phone_number", &self.phone_number)
            .finish()
    }
}

/// `GET /users` query string
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserSearch {
    /// Case-insensitive substring of the user's name
    pub q: Option<String>,
}

impl UserSearch {
    /// The search term, if one was given. Only an empty `q` counts as absent;
    /// whitespace is searched for as-is.
    pub fn term(&self) -> Option<&str> {
        self.q.as_deref().filter(|q| !q.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UsersData {
    pub users: Vec<UserView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BoardsData {
    pub boards: Vec<BoardView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RolesData {
    pub roles: Vec<RoleView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WalletData {
    pub wallet: WalletView,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_user() -> CreateUser {
        CreateUser {
            email: "ada@example.com".into(),
            name: "Ada".into(),
            password: "hunter2".into(),
            phone_number: "0712345678".into(),
        }
    }

    #[test]
    fn test_user_serialization_skips_password_hash() {
        let user = User::new(
            "Ada".into(),
            "ada@example.com".into(),
            "0712345678".into(),
            "$argon2id$secret".into(),
        );
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "ada@example.com");
    }

    #[test]
    fn test_user_view_has_no_password() {
        let user = User::new(
            "Ada".into(),
            "ada@example.com".into(),
            "0712345678".into(),
            "$argon2id$secret".into(),
        );
        let json = serde_json::to_value(UserView::from(user.clone())).unwrap();
        assert_eq!(json["id"], user.id.to_string());
        assert!(json.get("password").is_none());
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_new_wallet_is_empty() {
        let user_id = Uuid::now_v7();
        let wallet = Wallet::new(user_id);
        assert_eq!(wallet.user_id, user_id);
        assert_eq!(wallet.balance, 0);
    }

    #[test]
    fn test_missing_fields() {
        assert!(create_user().missing_fields().is_empty());

        let input = CreateUser {
            name: " ".into(),
            phone_number: String::new(),
            ..create_user()
        };
        assert_eq!(input.missing_fields(), vec!["name", "phone_number"]);
    }

    #[test]
    fn test_create_user_debug_redacts_password() {
        assert!(!format!("{:?}", create_user()).contains("hunter2"));
    }

    #[test]
    fn test_search_term() {
        let search = |q: Option<&str>| UserSearch {
            q: q.map(String::from),
        };
        assert_eq!(search(Some(" ada ")).term(), Some(" ada "));
        assert_eq!(search(Some("  ")).term(), Some("  "));
        assert_eq!(search(Some("")).term(), None);
        assert_eq!(search(None).term(), None);
    }
}
