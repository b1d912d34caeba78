use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::users;
use crate::schema::users::dsl::*;
use tradehub_core::errors::Result;
use tradehub_core::users::{NewUser, User, UserRepositoryTrait};

use super::model::UserDB;

/// Repository for managing user data in the database
pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    /// Creates a new UserRepository instance
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;

        self.writer
            .exec(move |conn| {
                let mut user_db: UserDB = new_user.into();
                user_db.id = uuid::Uuid::new_v4().to_string();

                diesel::insert_into(users::table)
                    .values(&user_db)
                    .execute(conn)
                    .into_core()?;

                Ok(user_db.into())
            })
            .await
    }

    /// Deletes a user; owned positions go with it via the cascade.
    async fn delete(&self, user_id_param: &str) -> Result<usize> {
        let id_to_delete = user_id_param.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(users.find(id_to_delete))
                    .execute(conn)
                    .into_core()
            })
            .await
    }

    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;

        let user = users
            .select(UserDB::as_select())
            .find(user_id)
            .first::<UserDB>(&mut conn)
            .into_core()?;

        Ok(user.into())
    }

    fn find_by_username(&self, username_param: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;

        let user = users
            .select(UserDB::as_select())
            .filter(username.eq(username_param))
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;

        Ok(user.map(User::from))
    }
}
