use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// Who is acting. Built once per invocation and handed to every operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// The signed-in user.
    pub user: String,
    /// Employee the user is acting on behalf of, if any.
    pub impersonating: Option<String>,
}

impl Context {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            impersonating: None,
        }
    }

    pub fn acting_as(mut self, employee: impl Into<String>) -> Self {
        self.impersonating = Some(employee.into());
        self
    }

    /// Resolve from CLI flags, falling back to `default_employee`.
    pub fn resolve(
        employee: Option<&String>,
        acting_as: Option<&String>,
        cfg: &Config,
    ) -> AppResult<Self> {
        let user = employee
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .or_else(|| Some(cfg.default_employee.trim().to_string()).filter(|e| !e.is_empty()))
            .ok_or(AppError::NoEmployee)?;

        let ctx = Context::new(user);
        Ok(match acting_as.map(|a| a.trim()).filter(|a| !a.is_empty()) {
            Some(other) => ctx.acting_as(other),
            None => ctx,
        })
    }

    /// The employee whose sessions and tasks are read and written.
    pub fn employee(&self) -> &str {
        self.impersonating.as_deref().unwrap_or(&self.user)
    }

    /// Audit-log label, e.g. `alice` or `alice as bob`.
    pub fn label(&self) -> String {
        match &self.impersonating {
            Some(other) => format!("{} as {}", self.user, other),
            None => self.user.clone(),
        }
    }
}
