use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::entity::{board_members, boards, roles, user_roles, users, wallets};
use crate::error::{UserError, UserResult};
use crate::models::{Board, Role, User, Wallet};
use crate::repository::UserRepository;

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Escape LIKE wildcards so the term matches literally
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn map_insert_error(err: DbErr, email: &str) -> UserError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => UserError::DuplicateEmail(email.to_string()),
        _ => err.into(),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: User, roles: Vec<Role>, wallet: Wallet) -> UserResult<User> {
        let txn = self.db.begin().await?;

        let model = users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            phone_number: Set(user.phone_number.clone()),
            password_hash: Set(user.password_hash.clone()),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        };
        let created: User = model
            .insert(&txn)
            .await
            .map_err(|e| map_insert_error(e, &user.email))?
            .into();

        wallets::ActiveModel {
            id: Set(wallet.id),
            user_id: Set(created.id),
            balance: Set(wallet.balance),
            created_at: Set(wallet.created_at.into()),
        }
        .insert(&txn)
        .await?;

        if !roles.is_empty() {
            let links = roles.iter().map(|role| user_roles::ActiveModel {
                user_id: Set(created.id),
                role_id: Set(role.id),
            });
            user_roles::Entity::insert_many(links)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(created)
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let result = users::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into);
        Ok(result)
    }

    async fn search_by_name(&self, term: &str) -> UserResult<Vec<User>> {
        let results = users::Entity::find()
            .filter(Expr::cust_with_values("name ILIKE $1", [like_pattern(term)]))
            .order_by_asc(users::Column::CreatedAt)
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        Ok(results)
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let results = users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        Ok(results)
    }

    async fn find_role_by_title(&self, title: &str) -> UserResult<Option<Role>> {
        let result = roles::Entity::find()
            .filter(roles::Column::Title.eq(title))
            .one(&self.db)
            .await?
            .map(Into::into);
        Ok(result)
    }

    async fn roles_for(&self, user_id: Uuid) -> UserResult<Vec<Role>> {
        let results = roles::Entity::find()
            .inner_join(user_roles::Entity)
            .filter(user_roles::Column::UserId.eq(user_id))
            .order_by_asc(roles::Column::Title)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        Ok(results)
    }

    async fn boards_for(&self, user_id: Uuid) -> UserResult<Vec<Board>> {
        let results = boards::Entity::find()
            .inner_join(board_members::Entity)
            .filter(board_members::Column::UserId.eq(user_id))
            .order_by_asc(boards::Column::CreatedAt)
            .order_by_asc(boards::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        Ok(results)
    }

    async fn wallet_for(&self, user_id: Uuid) -> UserResult<Option<Wallet>> {
        let result = wallets::Entity::find()
            .filter(wallets::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .map(Into::into);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("ada"), "%ada%");
        assert_eq!(like_pattern("100%_x\\"), "%100\\%\\_x\\\\%");
    }
}
