//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use super::{db_err, is_foreign_key_violation};
use crate::domain::reservation::{NewReservation, Reservation, ReservationRepository, TimeWindow};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::reservation;

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: reservation::Model) -> Reservation {
    Reservation {
        id: m.id,
        owner_id: m.account_id,
        date: m.date,
        window: TimeWindow::new(m.start_time, m.end_time),
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn create(&self, r: NewReservation) -> DomainResult<Reservation> {
        debug!(
            account_id = r.owner_id,
            date = %r.date,
            start = %r.window.start_label(),
            end = %r.window.end_label(),
            "Inserting reservation"
        );

        let now = Utc::now();
        let model = reservation::ActiveModel {
            id: NotSet,
            account_id: Set(r.owner_id),
            date: Set(r.date),
            start_time: Set(r.window.start),
            end_time: Set(r.window.end),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match model.insert(&self.db).await {
            Ok(inserted) => Ok(model_to_domain(inserted)),
            Err(e) if is_foreign_key_violation(&e) => Err(DomainError::UnknownOwner(r.owner_id)),
            Err(e) => Err(db_err(e)),
        }
    }

    async fn find_by_date(&self, date: NaiveDate) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::Date.eq(date))
            .order_by_asc(reservation::Column::StartTime)
            .order_by_asc(reservation::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }
}
