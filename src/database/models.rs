//! Row types shared by the store modules and the export tool.

use chrono::NaiveDateTime;
use sqlx::FromRow;

/// One (member, FSA) subscription row of `ping_reg`.
///
/// `username` is a display snapshot captured at registration time; `id` is
/// the monotonic insert sequence the export tool keys its polling on.
#[derive(Debug, Clone, FromRow)]
pub struct Registration {
    pub username: String,
    pub user_id: String,
    pub fsa: String,
    pub created_at: Option<NaiveDateTime>,
    pub id: i64,
}
