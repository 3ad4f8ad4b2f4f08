//! Search query construction for systems.
//!
//! A [`SystemQuery`] holds up to three independent criteria. Supplied criteria are
//! combined with AND:
//!
//! - `systemName`: case-insensitive substring match against the folded name column
//! - `email`: exact match on the mail address
//! - `localGovernmentId`: exact match
//!
//! Results are always ordered newest first, with the identifier as tie-breaker. Every
//! criterion value ends up as a bound statement parameter; `%`, `_` and `\` in the
//! name criterion are escaped so they match literally.

use crate::core::{mapper, optional};
use crate::entities::{System, system};
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Select};
use serde::Deserialize;

const LIKE_ESCAPE: char = '\\';

/// Raw search parameters, as they arrive from a caller.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    /// Substring of the system name
    #[serde(default)]
    pub system_name: Option<String>,
    /// Exact mail address
    #[serde(default)]
    pub email: Option<String>,
    /// Exact local-government identifier
    #[serde(default)]
    pub local_government_id: Option<String>,
}

/// Normalized search over systems.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SystemQuery {
    name_contains: Option<String>,
    email_equals: Option<String>,
    local_government_id_equals: Option<String>,
}

impl SystemQuery {
    /// The unconstrained query: every system.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Builds a query from caller criteria. Blank values count as not supplied.
    #[must_use]
    pub fn from_criteria(criteria: &SearchCriteria) -> Self {
        Self {
            name_contains: optional::criterion(criteria.system_name.as_deref()),
            email_equals: optional::criterion(criteria.email.as_deref()),
            local_government_id_equals: optional::criterion(
                criteria.local_government_id.as_deref(),
            ),
        }
    }

    /// Restricts to names containing `value`, ignoring case.
    #[must_use]
    pub fn name_contains(mut self, value: &str) -> Self {
        self.name_contains = optional::criterion(Some(value));
        self
    }

    /// Restricts to an exact mail address.
    #[must_use]
    pub fn email_equals(mut self, value: &str) -> Self {
        self.email_equals = optional::criterion(Some(value));
        self
    }

    /// Restricts to an exact local-government identifier.
    #[must_use]
    pub fn local_government_id_equals(mut self, value: &str) -> Self {
        self.local_government_id_equals = optional::criterion(Some(value));
        self
    }

    /// True when no criterion is present.
    #[must_use]
    pub const fn is_unconstrained(&self) -> bool {
        self.name_contains.is_none()
            && self.email_equals.is_none()
            && self.local_government_id_equals.is_none()
    }

    /// Conjunction of the supplied criteria.
    #[must_use]
    pub fn condition(&self) -> Condition {
        Condition::all()
            .add_option(self.name_contains.as_deref().map(|name| {
                Expr::col((System, system::Column::SystemNameFolded))
                    .like(LikeExpr::new(contains_pattern(name)).escape(LIKE_ESCAPE))
            }))
            .add_option(
                self.email_equals
                    .as_deref()
                    .map(|email| system::Column::MailAddress.eq(email)),
            )
            .add_option(
                self.local_government_id_equals
                    .as_deref()
                    .map(|id| system::Column::LocalGovernmentId.eq(id)),
            )
    }

    /// The select statement for this query, in result order.
    #[must_use]
    pub fn build(&self) -> Select<System> {
        let select = if self.is_unconstrained() {
            System::find()
        } else {
            System::find().filter(self.condition())
        };
        select
            .order_by_desc(system::Column::CreatedAt)
            .order_by_desc(system::Column::Id)
    }
}

impl From<&SearchCriteria> for SystemQuery {
    fn from(value: &SearchCriteria) -> Self {
        Self::from_criteria(value)
    }
}

/// `%value%` with LIKE wildcards in `value` escaped, folded like the stored name.
fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for ch in mapper::fold_name(value).chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
