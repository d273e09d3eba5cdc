//! User repository operations.

use commerce_core::{User, UserUpdate};
use rusqlite::{OptionalExtension, params};
use tracing::{debug, info};

use crate::convert::{USER_COLUMNS, user_from_row};
use crate::error::{Result, StoreError};
use crate::store::Store;

impl Store {
    /// Inserts a new user.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ConstraintViolation`] if the username or email
    /// is already taken. The existing user is left unchanged.
    pub fn create_user(&mut self, username: &str, email: &str, password: &str) -> Result<User> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO users (username, email, password) VALUES (?1, ?2, ?3)",
            params![username, email, password],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        info!(user_id = id, username, "created user");
        Ok(User {
            id,
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    /// Loads a user by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no user has this id.
    pub fn get_user(&self, id: i64) -> Result<User> {
        debug!(user_id = id, "loading user");
        self.conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                params![id],
                user_from_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::not_found("user", id))
    }

    /// Loads a user by username.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no user has this username.
    pub fn get_user_by_username(&self, username: &str) -> Result<User> {
        debug!(username, "loading user");
        self.conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
                params![username],
                user_from_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::not_found("user", username))
    }

    /// Returns every user, ordered by id.
    pub fn list_users(&self) -> Result<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))?;
        let users = stmt
            .query_map([], user_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Applies a partial update to the user with the given id.
    ///
    /// Empty strings in `update` are ignored. Returns the user as stored
    /// after the update.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the user does not exist, or
    /// [`StoreError::ConstraintViolation`] if the new username or email is
    /// taken by another user.
    pub fn update_user(&mut self, id: i64, update: &UserUpdate) -> Result<User> {
        let update = update.normalized();
        let tx = self.conn.transaction()?;

        let mut user = tx
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                params![id],
                user_from_row,
            )
            .optional()?
            .ok_or_else(|| StoreError::not_found("user", id))?;

        if let Some(username) = update.username {
            user.username = username;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(password) = update.password {
            user.password = password;
        }

        tx.execute(
            "UPDATE users SET username = ?1, email = ?2, password = ?3 WHERE id = ?4",
            params![user.username, user.email, user.password, id],
        )?;
        tx.commit()?;

        info!(user_id = id, "updated user");
        Ok(user)
    }

    /// Replaces a user's password.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the user no longer exists.
    pub fn update_user_password(&mut self, user: &User, new_password: &str) -> Result<()> {
        let tx = self.conn.transaction()?;
        let rows = tx.execute(
            "UPDATE users SET password = ?1 WHERE id = ?2",
            params![new_password, user.id],
        )?;
        if rows == 0 {
            return Err(StoreError::not_found("user", &user.username));
        }
        tx.commit()?;

        info!(user_id = user.id, "updated user password");
        Ok(())
    }

    /// Deletes a user.
    ///
    /// Orders that reference the user are kept and keep their `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the user no longer exists.
    pub fn delete_user(&mut self, user: &User) -> Result<()> {
        self.delete_user_by_id(user.id)
    }

    /// Deletes the user with the given id. See [`Store::delete_user`].
    pub fn delete_user_by_id(&mut self, id: i64) -> Result<()> {
        let tx = self.conn.transaction()?;
        let rows = tx.execute("DELETE FROM users WHERE id = ?1", params![id])?;
        if rows == 0 {
            return Err(StoreError::not_found("user", id));
        }
        tx.commit()?;

        info!(user_id = id, "deleted user");
        Ok(())
    }
}
