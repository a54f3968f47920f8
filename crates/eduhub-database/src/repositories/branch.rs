//! Branch repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use eduhub_core::error::{AppError, ErrorKind};
use eduhub_core::result::AppResult;
use eduhub_core::types::{ListQuery, PageResponse};
use eduhub_entity::branch::{Branch, BranchUpdate, NewBranch};

use super::{LIKE_ESCAPE, like_pattern};
use crate::store::BranchStore;

/// Repository for branch CRUD and query operations.
#[derive(Debug, Clone)]
pub struct PgBranchRepository {
    pool: PgPool,
}

impl PgBranchRepository {
    /// Create a new branch repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, search: Option<&str>) {
    qb.push(" WHERE deleted_at IS NULL");
    if let Some(term) = search {
        let pattern = like_pattern(term);
        qb.push(" AND (name ILIKE ")
            .push_bind(pattern.clone())
            .push(LIKE_ESCAPE)
            .push(" OR address ILIKE ")
            .push_bind(pattern)
            .push(LIKE_ESCAPE)
            .push(")");
    }
}

#[async_trait]
impl BranchStore for PgBranchRepository {
    async fn create(&self, data: &NewBranch) -> AppResult<Branch> {
        sqlx::query_as::<_, Branch>(
            "INSERT INTO branch (id, name, address, phone) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(&data.name)
        .bind(&data.address)
        .bind(&data.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::conflict(format!("Branch '{}' already exists", data.name))
            }
            _ => AppError::with_source(ErrorKind::StoreUnavailable, "Failed to create branch", e),
        })
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Branch>> {
        sqlx::query_as::<_, Branch>("SELECT * FROM branch WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::StoreUnavailable, "Failed to find branch by id", e)
            })
    }

    async fn get_list(&self, query: &ListQuery) -> AppResult<PageResponse<Branch>> {
        let page = query.page_request();
        let search = query.search_term();

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM branch");
        push_filter(&mut count, search);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::StoreUnavailable, "Failed to count branches", e)
            })?;

        let mut list = QueryBuilder::<Postgres>::new("SELECT * FROM branch");
        push_filter(&mut list, search);
        list.push(" ORDER BY name ASC LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);
        let items = list
            .build_query_as::<Branch>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::StoreUnavailable, "Failed to list branches", e)
            })?;

        Ok(PageResponse::new(items, page.page, page.page_size, total as u64))
    }

    async fn update(&self, id: Uuid, data: &BranchUpdate) -> AppResult<Option<Branch>> {
        sqlx::query_as::<_, Branch>(
            "UPDATE branch SET name = COALESCE($2, name), \
                               address = COALESCE($3, address), \
                               phone = COALESCE($4, phone), \
                               updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.address)
        .bind(&data.phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::StoreUnavailable, "Failed to update branch", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE branch SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::StoreUnavailable, "Failed to delete branch", e))?;

        Ok(result.rows_affected() > 0)
    }
}
