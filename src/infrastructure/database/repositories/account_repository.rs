//! SeaORM implementation of AccountRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set,
};
use tracing::debug;

use super::{db_err, is_unique_violation};
use crate::domain::{Account, AccountRepository, DomainError, DomainResult, NewAccount};
use crate::infrastructure::database::entities::account;

pub struct SeaOrmAccountRepository {
    db: DatabaseConnection,
}

impl SeaOrmAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: account::Model) -> Account {
    Account {
        id: m.id,
        name: m.name,
        email: m.email,
        password_hash: m.password_hash,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn create(&self, new: NewAccount) -> DomainResult<Account> {
        debug!(email = %new.email, "Inserting account");

        let now = Utc::now();
        let email = new.email.clone();
        let model = account::ActiveModel {
            id: NotSet,
            name: Set(new.name),
            email: Set(new.email),
            password_hash: Set(new.password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match model.insert(&self.db).await {
            Ok(inserted) => Ok(model_to_domain(inserted)),
            Err(e) if is_unique_violation(&e) => Err(DomainError::DuplicateEmail(email)),
            Err(e) => Err(db_err(e)),
        }
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Account>> {
        let model = account::Entity::find()
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }
}
