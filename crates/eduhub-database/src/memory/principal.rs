//! In-memory principal store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use eduhub_core::error::AppError;
use eduhub_core::result::AppResult;
use eduhub_core::types::{ListQuery, PageResponse};
use eduhub_entity::principal::{next_login, seed_login};
use eduhub_entity::report::accrued_salary;
use eduhub_entity::{NewPrincipal, Principal, PrincipalReport, PrincipalUpdate, Role};

use super::paginate;
use crate::store::PrincipalStore;

#[derive(Debug, Default)]
struct State {
    rows: Vec<Principal>,
    payments: HashMap<Uuid, i64>,
}

/// Principal store held in process memory.
///
/// A single write lock covers login allocation and insertion.
#[derive(Debug)]
pub struct MemoryPrincipalStore {
    role: Role,
    state: RwLock<State>,
}

impl MemoryPrincipalStore {
    /// Create an empty store for `role`. SuperAdmin has no store.
    pub fn new(role: Role) -> AppResult<Self> {
        if !role.is_stored() {
            return Err(AppError::internal(format!("Role {role} is not store-backed")));
        }
        Ok(Self {
            role,
            state: RwLock::new(State::default()),
        })
    }

    /// Record a payment made by a student. Feeds the student report.
    pub async fn record_payment(&self, student_id: Uuid, amount: i64) {
        let mut state = self.state.write().await;
        *state.payments.entry(student_id).or_default() += amount;
    }

    fn last_login(&self, state: &State) -> AppResult<String> {
        match state.rows.iter().map(|p| p.login.as_str()).max() {
            Some(login) => Ok(login.to_string()),
            None => seed_login(self.role),
        }
    }

    fn live_matching(state: &State, query: &ListQuery) -> Vec<Principal> {
        let search = query.search_term();
        let mut rows: Vec<Principal> = state
            .rows
            .iter()
            .filter(|p| !p.is_deleted())
            .filter(|p| search.is_none_or(|term| p.matches_search(term)))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.login.cmp(&b.login));
        rows
    }
}

#[async_trait]
impl PrincipalStore for MemoryPrincipalStore {
    fn role(&self) -> Role {
        self.role
    }

    async fn create(&self, data: &NewPrincipal) -> AppResult<Principal> {
        data.profile.ensure_applicable(self.role)?;

        let mut state = self.state.write().await;
        let login = next_login(self.role, &self.last_login(&state)?)?;

        let now = Utc::now();
        let mut principal = Principal {
            id: Uuid::now_v7(),
            login,
            fullname: data.fullname.clone(),
            phone: data.phone.clone(),
            password_hash: data.password_hash.clone(),
            branch_id: data.branch_id,
            salary: None,
            ielts_score: None,
            ielts_attempt_count: None,
            support_teacher_id: None,
            group_name: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        data.profile.apply_to(&mut principal);

        state.rows.push(principal.clone());
        info!(role = %self.role, login = %principal.login, id = %principal.id, "Principal created");
        Ok(principal)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Principal>> {
        let state = self.state.read().await;
        Ok(state
            .rows
            .iter()
            .find(|p| p.id == id && !p.is_deleted())
            .cloned())
    }

    async fn get_list(&self, query: &ListQuery) -> AppResult<PageResponse<Principal>> {
        let state = self.state.read().await;
        Ok(paginate(Self::live_matching(&state, query), &query.page_request()))
    }

    async fn update(&self, id: Uuid, data: &PrincipalUpdate) -> AppResult<Option<Principal>> {
        data.profile.ensure_applicable(self.role)?;

        let mut state = self.state.write().await;
        let Some(principal) = state
            .rows
            .iter_mut()
            .find(|p| p.id == id && !p.is_deleted())
        else {
            return Ok(None);
        };

        if let Some(fullname) = &data.fullname {
            principal.fullname = fullname.clone();
        }
        if let Some(phone) = &data.phone {
            principal.phone = phone.clone();
        }
        if let Some(hash) = &data.password_hash {
            principal.password_hash = hash.clone();
        }
        if let Some(branch_id) = data.branch_id {
            principal.branch_id = Some(branch_id);
        }
        data.profile.apply_to(principal);
        principal.updated_at = Utc::now();

        Ok(Some(principal.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.write().await;
        match state
            .rows
            .iter_mut()
            .find(|p| p.id == id && !p.is_deleted())
        {
            Some(principal) => {
                let now = Utc::now();
                principal.deleted_at = Some(now);
                principal.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_by_login(&self, login: &str) -> AppResult<Option<Principal>> {
        let state = self.state.read().await;
        Ok(state
            .rows
            .iter()
            .find(|p| p.login == login && !p.is_deleted())
            .cloned())
    }

    async fn get_last_login(&self) -> AppResult<String> {
        let state = self.state.read().await;
        self.last_login(&state)
    }

    async fn get_report_list(&self, query: &ListQuery) -> AppResult<PageResponse<PrincipalReport>> {
        let state = self.state.read().await;
        let now = Utc::now();
        let rows = Self::live_matching(&state, query)
            .into_iter()
            .map(|principal| {
                let total = if self.role.is_staff() {
                    principal
                        .salary
                        .map(|salary| accrued_salary(salary, principal.created_at, now))
                        .unwrap_or(0)
                } else {
                    state.payments.get(&principal.id).copied().unwrap_or(0)
                };
                PrincipalReport { principal, total }
            })
            .collect();
        Ok(paginate(rows, &query.page_request()))
    }
}
