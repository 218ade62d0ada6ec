//! User repository.
//!
//! This module provides CRUD operations for users in the database.

use chrono::NaiveDateTime;

use super::user::{Grade, NewUser, User};
use super::DbConn;
use crate::error::is_unique_violation;
use crate::pagination::Pagination;
use crate::{BulletinError, Result};

const USER_COLUMNS: &str = "id, login_id, password, nickname, grade, created_at";

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    conn: &'a mut DbConn,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository over a pooled connection or open transaction.
    pub fn new(conn: &'a mut DbConn) -> Self {
        Self { conn }
    }

    /// Create a new user in the database.
    ///
    /// A reused login id is reported as `DuplicateLoginId`.
    pub async fn create(&mut self, new_user: &NewUser) -> Result<User> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (login_id, password, nickname, grade)
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(&new_user.login_id)
        .bind(&new_user.password)
        .bind(&new_user.nickname)
        .bind(new_user.grade.as_str())
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                BulletinError::DuplicateLoginId
            } else {
                BulletinError::Database(e.to_string())
            }
        })?;

        self.get_by_id(id).await?.ok_or(BulletinError::UserNotFound)
    }

    /// Get a user by ID.
    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
                .bind(id)
                .fetch_optional(&mut *self.conn)
                .await?;
        row.map(UserRow::into_user).transpose()
    }

    /// Get a user by login id.
    pub async fn get_by_login_id(&mut self, login_id: &str) -> Result<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE login_id = ?"))
                .bind(login_id)
                .fetch_optional(&mut *self.conn)
                .await?;
        row.map(UserRow::into_user).transpose()
    }

    /// Check if a login id is already taken.
    pub async fn login_id_exists(&mut self, login_id: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE login_id = ?)")
                .bind(login_id)
                .fetch_one(&mut *self.conn)
                .await?;
        Ok(exists)
    }

    /// Replace the password hash. Returns false if the user does not exist.
    pub async fn update_password(&mut self, id: i64, password_hash: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET password = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the grade. Returns false if the user does not exist.
    pub async fn update_grade(&mut self, id: i64, grade: Grade) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET grade = ? WHERE id = ?")
            .bind(grade.as_str())
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a user row by ID.
    ///
    /// Dependents must already be gone; see [`crate::cascade`].
    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List users, optionally only those whose nickname matches exactly.
    pub async fn list_paginated(
        &mut self,
        nickname: Option<&str>,
        pagination: Pagination,
    ) -> Result<Vec<User>> {
        let order = pagination.direction.as_sql();
        let rows: Vec<UserRow> = match nickname {
            Some(nickname) => {
                sqlx::query_as(&format!(
                    "SELECT {USER_COLUMNS} FROM users WHERE nickname = ?
                     ORDER BY id {order} LIMIT ? OFFSET ?"
                ))
                .bind(nickname)
                .bind(pagination.limit)
                .bind(pagination.offset)
                .fetch_all(&mut *self.conn)
                .await?
            }
            None => {
                sqlx::query_as(&format!(
                    "SELECT {USER_COLUMNS} FROM users ORDER BY id {order} LIMIT ? OFFSET ?"
                ))
                .bind(pagination.limit)
                .bind(pagination.offset)
                .fetch_all(&mut *self.conn)
                .await?
            }
        };
        rows.into_iter().map(UserRow::into_user).collect()
    }

    /// Count users, optionally only those whose nickname matches exactly.
    pub async fn count(&mut self, nickname: Option<&str>) -> Result<i64> {
        let count: i64 = match nickname {
            Some(nickname) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE nickname = ?")
                    .bind(nickname)
                    .fetch_one(&mut *self.conn)
                    .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM users")
                    .fetch_one(&mut *self.conn)
                    .await?
            }
        };
        Ok(count)
    }
}

/// Internal struct for mapping database rows to User.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    login_id: String,
    password: String,
    nickname: String,
    grade: String,
    created_at: NaiveDateTime,
}

impl UserRow {
    fn into_user(self) -> Result<User> {
        let grade: Grade = self.grade.parse().map_err(|e| {
            BulletinError::Database(format!("user {} has {e}", self.id))
        })?;
        Ok(User {
            id: self.id,
            login_id: self.login_id,
            password: self.password,
            nickname: self.nickname,
            grade,
            created_at: self.created_at,
        })
    }
}
