use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::categories;
use crate::schema::categories::dsl::*;
use tradehub_core::categories::{Category, CategoryRepositoryTrait, NewCategory};
use tradehub_core::errors::Result;

use super::model::CategoryDB;

/// Repository for managing category data in the database
pub struct CategoryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl CategoryRepositoryTrait for CategoryRepository {
    async fn create(&self, new_category: NewCategory, resolved_slug: String) -> Result<Category> {
        new_category.validate()?;

        self.writer
            .exec(move |conn| {
                let mut category_db = CategoryDB::from_new(new_category, resolved_slug);
                category_db.id = uuid::Uuid::new_v4().to_string();

                diesel::insert_into(categories::table)
                    .values(&category_db)
                    .execute(conn)
                    .into_core()?;

                Ok(category_db.into())
            })
            .await
    }

    /// Deletes a category; positions filed under it go with it via the
    /// cascade.
    async fn delete(&self, category_id: &str) -> Result<usize> {
        let id_to_delete = category_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(categories.find(id_to_delete))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn get_by_id(&self, category_id: &str) -> Result<Category> {
        let mut conn = get_connection(&self.pool)?;

        let category = categories
            .select(CategoryDB::as_select())
            .find(category_id)
            .first::<CategoryDB>(&mut conn)
            .into_core()?;

        Ok(category.into())
    }

    fn find_by_slug(&self, slug_param: &str) -> Result<Option<Category>> {
        let mut conn = get_connection(&self.pool)?;

        let category = categories
            .select(CategoryDB::as_select())
            .filter(slug.eq(slug_param))
            .first::<CategoryDB>(&mut conn)
            .optional()
            .into_core()?;

        Ok(category.map(Category::from))
    }

    fn list(&self) -> Result<Vec<Category>> {
        let mut conn = get_connection(&self.pool)?;

        let results = categories
            .select(CategoryDB::as_select())
            .order(name.asc())
            .load::<CategoryDB>(&mut conn)
            .into_core()?;

        Ok(results.into_iter().map(Category::from).collect())
    }
}
