use sqlx::SqlitePool;

use crate::models::ActivityParticipantsRow;

const SQL_LIST_PARTICIPANTS: &str = r#"
SELECT
  seq,
  activity_name,
  email
FROM activity_participants
ORDER BY seq ASC
"#;

pub async fn list_participants(pool: &SqlitePool) -> sqlx::Result<Vec<ActivityParticipantsRow>> {
    sqlx::query_as::<_, ActivityParticipantsRow>(SQL_LIST_PARTICIPANTS)
        .fetch_all(pool)
        .await
}

const SQL_IS_PARTICIPANT: &str = r#"
SELECT EXISTS(
  SELECT 1
  FROM activity_participants
  WHERE activity_name = ?
    AND email = ?
)
"#;

pub async fn is_participant(pool: &SqlitePool, activity_name: &str, email: &str) -> sqlx::Result<bool> {
    let found = sqlx::query_scalar::<_, i64>(SQL_IS_PARTICIPANT)
        .bind(activity_name)
        .bind(email)
        .fetch_one(pool)
        .await?;
    Ok(found != 0)
}

// Inserts only while the roster is below capacity; 0 rows affected means full.
const SQL_INSERT_PARTICIPANT_IF_OPEN: &str = r#"
INSERT INTO activity_participants (activity_name, email)
SELECT a.name, ?
FROM activities a
WHERE a.name = ?
  AND (
    SELECT COUNT(*)
    FROM activity_participants ap
    WHERE ap.activity_name = a.name
  ) < a.max_participants
"#;

pub async fn insert_participant_if_open(
    pool: &SqlitePool,
    activity_name: &str,
    email: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_PARTICIPANT_IF_OPEN)
        .bind(email)
        .bind(activity_name)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_INSERT_PARTICIPANT: &str = r#"
INSERT INTO activity_participants (activity_name, email) VALUES (?, ?)
"#;

pub async fn insert_participant(
    pool: &SqlitePool,
    activity_name: &str,
    email: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_PARTICIPANT)
        .bind(activity_name)
        .bind(email)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_DELETE_PARTICIPANT: &str = r#"
DELETE FROM activity_participants
WHERE activity_name = ?
  AND email = ?
"#;

pub async fn delete_participant(
    pool: &SqlitePool,
    activity_name: &str,
    email: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_PARTICIPANT)
        .bind(activity_name)
        .bind(email)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
