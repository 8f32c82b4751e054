//! PostgreSQL adapter for UserRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::entities::user::{roles_from_str, roles_to_string};
use crate::domain::entities::{NewUser, User, UserChanges, UserId};
use crate::domain::ports::UserRepository;
use crate::entity::users;
use crate::error::DomainError;

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: &UserId) -> Result<users::Model, DomainError> {
        users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .ok_or_else(|| DomainError::NotFound(format!("User {}", id)))
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find()
            .filter(users::Column::Login.eq(login))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_api_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find()
            .filter(users::Column::ApiKeyHash.eq(hash))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_all(&self) -> Result<Vec<User>, DomainError> {
        let results = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = users::ActiveModel {
            login: Set(user.login.clone()),
            password: Set(user.password_hash.clone()),
            api_key_hash: Set(None),
            roles: Set(roles_to_string(&user.roles)),
            created_at: Set(Some(now)),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update_api_key_hash(&self, id: &UserId, hash: &str) -> Result<(), DomainError> {
        users::ActiveModel {
            id: Set(id.0),
            api_key_hash: Set(Some(hash.to_string())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }

    async fn update(&self, id: &UserId, changes: &UserChanges) -> Result<User, DomainError> {
        let mut model = self.find_model(id).await?.into_active_model();

        if let Some(login) = &changes.login {
            model.login = Set(login.clone());
        }
        if let Some(hash) = &changes.password_hash {
            model.password = Set(hash.clone());
        }
        if let Some(roles) = &changes.roles {
            model.roles = Set(roles_to_string(roles));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn delete(&self, id: &UserId) -> Result<(), DomainError> {
        let result = users::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!("User {}", id)));
        }

        Ok(())
    }
}

/// Convert SeaORM model to domain entity
impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        User {
            id: UserId(model.id),
            login: model.login,
            password_hash: model.password,
            api_key_hash: model.api_key_hash,
            roles: roles_from_str(&model.roles),
            created_at: model
                .created_at
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(Utc::now),
        }
    }
}
