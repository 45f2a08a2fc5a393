// Roster rows, listed in `seq` (insertion) order.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActivityParticipantsRow {
    pub seq: i64,
    pub activity_name: String,
    pub email: String,
}
