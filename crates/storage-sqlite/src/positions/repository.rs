use async_trait::async_trait;
use diesel::prelude::*;
use log::warn;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::positions;
use crate::schema::positions::dsl::*;
use tradehub_core::errors::Result;
use tradehub_core::positions::{
    NewPosition, Position, PositionRepositoryTrait, PositionUpdate, TransactionRecord,
};

use super::model::{encode_log, PositionDB};

/// Repository for managing position data in the database.
///
/// Reads go through the shared pool; every write runs on the single-writer
/// actor inside an immediate transaction, making each update one atomic
/// read-modify-write.
pub struct PositionRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PositionRepository {
    /// Creates a new PositionRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl PositionRepositoryTrait for PositionRepository {
    async fn create(&self, new_position: NewPosition, slug_value: String) -> Result<Position> {
        new_position.validate()?;

        self.writer
            .exec(move |conn| {
                let mut position_db = PositionDB::from_new(new_position, slug_value)?;
                position_db.id = uuid::Uuid::new_v4().to_string();

                diesel::insert_into(positions::table)
                    .values(&position_db)
                    .execute(conn)
                    .into_core()?;

                Ok(position_db.into())
            })
            .await
    }

    async fn update(&self, update: PositionUpdate) -> Result<Position> {
        update.validate()?;

        self.writer
            .exec(move |conn| {
                let (new_quantity, new_cost_basis, new_market_value, warnings) =
                    update.normalized_valuation();
                for warning in &warnings {
                    warn!("Normalizing position {} on update: {}", update.id, warning);
                }

                let affected = diesel::update(positions.find(&update.id))
                    .set((
                        quantity.eq(new_quantity.to_string()),
                        cost_basis.eq(new_cost_basis.to_string()),
                        market_value.eq(new_market_value.to_string()),
                        updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;

                if affected == 0 {
                    return Err(tradehub_core::errors::DatabaseError::NotFound(
                        update.id.clone(),
                    )
                    .into());
                }

                let row = positions
                    .select(PositionDB::as_select())
                    .find(&update.id)
                    .first::<PositionDB>(conn)
                    .into_core()?;

                Ok(row.into())
            })
            .await
    }

    async fn record_transaction(
        &self,
        position_id: &str,
        record: TransactionRecord,
    ) -> Result<Position> {
        let id_param = position_id.to_string();

        self.writer
            .exec(move |conn| {
                let row = positions
                    .select(PositionDB::as_select())
                    .find(&id_param)
                    .first::<PositionDB>(conn)
                    .into_core()?;

                let mut position: Position = row.into();
                let warnings = position.apply_transaction(record);
                for warning in &warnings {
                    warn!(
                        "Normalizing position {} after transaction: {}",
                        position.id, warning
                    );
                }
                position.updated_at = chrono::Utc::now().naive_utc();

                diesel::update(positions.find(&position.id))
                    .set((
                        quantity.eq(position.quantity.to_string()),
                        cost_basis.eq(position.cost_basis.to_string()),
                        market_value.eq(position.market_value.to_string()),
                        transaction_log.eq(encode_log(&position.transaction_log)?),
                        updated_at.eq(position.updated_at),
                    ))
                    .execute(conn)
                    .into_core()?;

                Ok(position)
            })
            .await
    }

    async fn delete(&self, position_id: &str) -> Result<usize> {
        let id_to_delete = position_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(positions.find(id_to_delete))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    async fn delete_by_user(&self, user_id_param: &str) -> Result<usize> {
        let owner_id = user_id_param.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(positions.filter(user_id.eq(owner_id)))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn get_by_id(&self, position_id: &str) -> Result<Position> {
        let mut conn = get_connection(&self.pool)?;

        let row = positions
            .select(PositionDB::as_select())
            .find(position_id)
            .first::<PositionDB>(&mut conn)
            .into_core()?;

        Ok(row.into())
    }

    fn find_by_slug(&self, slug_param: &str) -> Result<Option<Position>> {
        let mut conn = get_connection(&self.pool)?;

        let row = positions
            .select(PositionDB::as_select())
            .filter(slug.eq(slug_param))
            .first::<PositionDB>(&mut conn)
            .optional()
            .into_core()?;

        Ok(row.map(Position::from))
    }

    fn find_by_owner_name_category(
        &self,
        user_id_param: &str,
        name_param: &str,
        category_id_param: Option<&str>,
    ) -> Result<Option<Position>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = positions::table
            .into_boxed()
            .filter(user_id.eq(user_id_param))
            .filter(name.eq(name_param));

        query = match category_id_param {
            Some(category) => query.filter(category_id.eq(category)),
            None => query.filter(category_id.is_null()),
        };

        let row = query
            .select(PositionDB::as_select())
            .first::<PositionDB>(&mut conn)
            .optional()
            .into_core()?;

        Ok(row.map(Position::from))
    }

    fn list_by_user(&self, user_id_param: &str) -> Result<Vec<Position>> {
        let mut conn = get_connection(&self.pool)?;

        let results = positions
            .select(PositionDB::as_select())
            .filter(user_id.eq(user_id_param))
            .order(created_at.desc())
            .load::<PositionDB>(&mut conn)
            .into_core()?;

        Ok(results.into_iter().map(Position::from).collect())
    }

    fn list_by_category(&self, category_id_param: &str) -> Result<Vec<Position>> {
        let mut conn = get_connection(&self.pool)?;

        let results = positions
            .select(PositionDB::as_select())
            .filter(category_id.eq(category_id_param))
            .order(created_at.desc())
            .load::<PositionDB>(&mut conn)
            .into_core()?;

        Ok(results.into_iter().map(Position::from).collect())
    }
}
