//! PostgreSQL principal repository, one instance per stored role.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Executor, FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{debug, info};
use uuid::Uuid;

use eduhub_core::error::{AppError, ErrorKind};
use eduhub_core::result::AppResult;
use eduhub_core::types::{ListQuery, PageRequest, PageResponse};
use eduhub_entity::principal::{ProfileField, next_login, seed_login};
use eduhub_entity::report::accrued_salary;
use eduhub_entity::{NewPrincipal, Principal, PrincipalProfile, PrincipalReport, PrincipalUpdate, Role};

use super::{LIKE_ESCAPE, like_pattern};
use crate::store::PrincipalStore;

/// Principal row joined with its payment total.
#[derive(Debug, FromRow)]
struct StudentReportRow {
    #[sqlx(flatten)]
    principal: Principal,
    total: i64,
}

/// Repository for one role's principal table.
#[derive(Debug, Clone)]
pub struct PgPrincipalRepository {
    pool: PgPool,
    role: Role,
    table: &'static str,
}

impl PgPrincipalRepository {
    /// Create a repository for `role`. SuperAdmin has no table.
    pub fn new(pool: PgPool, role: Role) -> AppResult<Self> {
        let table = role
            .table_name()
            .ok_or_else(|| AppError::internal(format!("Role {role} is not store-backed")))?;
        Ok(Self { pool, role, table })
    }

    fn push_live_filter<'a>(&self, qb: &mut QueryBuilder<'a, Postgres>, search: Option<&str>) {
        qb.push(" WHERE p.deleted_at IS NULL");
        if let Some(term) = search {
            let pattern = like_pattern(term);
            qb.push(" AND (p.login ILIKE ")
                .push_bind(pattern.clone())
                .push(LIKE_ESCAPE)
                .push(" OR p.fullname ILIKE ")
                .push_bind(pattern.clone())
                .push(LIKE_ESCAPE)
                .push(" OR p.phone ILIKE ")
                .push_bind(pattern.clone())
                .push(LIKE_ESCAPE);
            if self.role == Role::Student {
                qb.push(" OR p.group_name ILIKE ")
                    .push_bind(pattern)
                    .push(LIKE_ESCAPE);
            }
            qb.push(")");
        }
    }

    async fn count_live(&self, search: Option<&str>) -> AppResult<u64> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {} p", self.table));
        self.push_live_filter(&mut qb, search);

        let total: i64 = qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| store_error(format!("Failed to count {}", self.table), e))?;
        Ok(total as u64)
    }

    async fn list_live(&self, page: &PageRequest, search: Option<&str>) -> AppResult<Vec<Principal>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT p.* FROM {} p", self.table));
        self.push_live_filter(&mut qb, search);
        qb.push(" ORDER BY p.login ASC LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        qb.build_query_as::<Principal>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error(format!("Failed to list {}", self.table), e))
    }
}

/// Highest login in `table`, soft-deleted rows included, or the role's seed.
async fn last_issued_login<'e, E>(executor: E, table: &str, role: Role) -> AppResult<String>
where
    E: Executor<'e, Database = Postgres>,
{
    let last: Option<String> = sqlx::query_scalar(&format!(
        "SELECT login FROM {table} ORDER BY login DESC LIMIT 1"
    ))
    .fetch_optional(executor)
    .await
    .map_err(|e| store_error("Failed to read last login", e))?;

    match last {
        Some(login) => Ok(login),
        None => seed_login(role),
    }
}

fn store_error(message: impl Into<String>, e: sqlx::Error) -> AppError {
    AppError::with_source(ErrorKind::StoreUnavailable, message, e)
}

fn push_profile_value<'a>(
    separated: &mut sqlx::query_builder::Separated<'_, 'a, Postgres, &'static str>,
    field: ProfileField,
    profile: &PrincipalProfile,
) {
    match field {
        ProfileField::Salary => separated.push_bind(profile.salary),
        ProfileField::IeltsScore => separated.push_bind(profile.ielts_score),
        ProfileField::IeltsAttemptCount => separated.push_bind(profile.ielts_attempt_count),
        ProfileField::SupportTeacherId => separated.push_bind(profile.support_teacher_id),
        ProfileField::GroupName => separated.push_bind(profile.group_name.clone()),
    };
}

#[async_trait]
impl PrincipalStore for PgPrincipalRepository {
    fn role(&self) -> Role {
        self.role
    }

    async fn create(&self, data: &NewPrincipal) -> AppResult<Principal> {
        data.profile.ensure_applicable(self.role)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_error("Failed to begin transaction", e))?;

        // Serializes login allocation per table until commit.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(self.table)
            .execute(&mut *tx)
            .await
            .map_err(|e| store_error("Failed to acquire login sequence lock", e))?;

        let last = last_issued_login(&mut *tx, self.table, self.role).await?;
        let login = next_login(self.role, &last)?;

        let profile_fields = ProfileField::for_role(self.role);
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "INSERT INTO {} (id, login, fullname, phone, password_hash, branch_id",
            self.table
        ));
        for field in profile_fields {
            qb.push(", ").push(field.column());
        }
        qb.push(") VALUES (");
        {
            let mut values = qb.separated(", ");
            values
                .push_bind(Uuid::now_v7())
                .push_bind(login.clone())
                .push_bind(data.fullname.clone())
                .push_bind(data.phone.clone())
                .push_bind(data.password_hash.clone())
                .push_bind(data.branch_id);
            for field in profile_fields {
                push_profile_value(&mut values, *field, &data.profile);
            }
        }
        qb.push(") RETURNING *");

        let principal = qb
            .build_query_as::<Principal>()
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    AppError::conflict(format!("Login '{login}' already exists"))
                }
                _ => store_error(format!("Failed to create {}", self.role), e),
            })?;

        tx.commit()
            .await
            .map_err(|e| store_error("Failed to commit transaction", e))?;

        info!(role = %self.role, login = %principal.login, id = %principal.id, "Principal created");
        Ok(principal)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Principal>> {
        sqlx::query_as::<_, Principal>(&format!(
            "SELECT * FROM {} WHERE id = $1 AND deleted_at IS NULL",
            self.table
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error(format!("Failed to find {} by id", self.role), e))
    }

    async fn get_list(&self, query: &ListQuery) -> AppResult<PageResponse<Principal>> {
        let page = query.page_request();
        let search = query.search_term();
        let total = self.count_live(search).await?;
        let items = self.list_live(&page, search).await?;
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn update(&self, id: Uuid, data: &PrincipalUpdate) -> AppResult<Option<Principal>> {
        data.profile.ensure_applicable(self.role)?;

        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "UPDATE {} SET updated_at = NOW()",
            self.table
        ));
        if let Some(fullname) = &data.fullname {
            qb.push(", fullname = ").push_bind(fullname.clone());
        }
        if let Some(phone) = &data.phone {
            qb.push(", phone = ").push_bind(phone.clone());
        }
        if let Some(hash) = &data.password_hash {
            qb.push(", password_hash = ").push_bind(hash.clone());
        }
        if let Some(branch_id) = data.branch_id {
            qb.push(", branch_id = ").push_bind(branch_id);
        }
        for field in data.profile.present_fields() {
            qb.push(format!(", {} = ", field.column()));
            match field {
                ProfileField::Salary => qb.push_bind(data.profile.salary),
                ProfileField::IeltsScore => qb.push_bind(data.profile.ielts_score),
                ProfileField::IeltsAttemptCount => qb.push_bind(data.profile.ielts_attempt_count),
                ProfileField::SupportTeacherId => qb.push_bind(data.profile.support_teacher_id),
                ProfileField::GroupName => qb.push_bind(data.profile.group_name.clone()),
            };
        }
        qb.push(" WHERE id = ")
            .push_bind(id)
            .push(" AND deleted_at IS NULL RETURNING *");

        qb.build_query_as::<Principal>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error(format!("Failed to update {}", self.role), e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(&format!(
            "UPDATE {} SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
            self.table
        ))
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error(format!("Failed to delete {}", self.role), e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_by_login(&self, login: &str) -> AppResult<Option<Principal>> {
        debug!(role = %self.role, login = %login, "Looking up principal by login");
        sqlx::query_as::<_, Principal>(&format!(
            "SELECT * FROM {} WHERE login = $1 AND deleted_at IS NULL",
            self.table
        ))
        .bind(login)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Failed to find principal by login", e))
    }

    async fn get_last_login(&self) -> AppResult<String> {
        last_issued_login(&self.pool, self.table, self.role).await
    }

    async fn get_report_list(&self, query: &ListQuery) -> AppResult<PageResponse<PrincipalReport>> {
        let page = query.page_request();
        let search = query.search_term();
        let total = self.count_live(search).await?;

        if self.role.is_staff() {
            let now = Utc::now();
            let items = self
                .list_live(&page, search)
                .await?
                .into_iter()
                .map(|principal| {
                    let total = principal
                        .salary
                        .map(|salary| accrued_salary(salary, principal.created_at, now))
                        .unwrap_or(0);
                    PrincipalReport { principal, total }
                })
                .collect();
            return Ok(PageResponse::new(items, page.page, page.page_size, total));
        }

        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT p.*, COALESCE(SUM(sp.paid_sum), 0)::BIGINT AS total \
             FROM student p LEFT JOIN student_payment sp ON sp.student_id = p.id",
        );
        self.push_live_filter(&mut qb, search);
        qb.push(" GROUP BY p.id ORDER BY p.login ASC LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        let items = qb
            .build_query_as::<StudentReportRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error("Failed to build student report", e))?
            .into_iter()
            .map(|row| PrincipalReport {
                principal: row.principal,
                total: row.total,
            })
            .collect();

        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }
}
