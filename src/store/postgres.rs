use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use super::{assemble_records, ChairStore};
use crate::models::{Conference, Member, Profile, Submission, SubmissionType, SubmissionRecord, User};

const MEMBER_COLUMNS: &str = r#"
    u.id, u.email,
    p.user_id AS profile_user_id,
    p.first_name, p.last_name,
    p.first_name_rus, p.middle_name_rus, p.last_name_rus,
    p.country, p.city, p.affiliation, p.degree, p.role, p.avatar
"#;

/// `users LEFT JOIN profiles`; profile columns are NULL when no profile exists
#[derive(FromRow)]
struct MemberRow {
    id: i64,
    email: String,
    profile_user_id: Option<i64>,
    first_name: Option<String>,
    last_name: Option<String>,
    first_name_rus: Option<String>,
    middle_name_rus: Option<String>,
    last_name_rus: Option<String>,
    country: Option<String>,
    city: Option<String>,
    affiliation: Option<String>,
    degree: Option<String>,
    role: Option<String>,
    avatar: Option<String>,
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        let profile = row.profile_user_id.map(|user_id| Profile {
            user_id,
            first_name: row.first_name.unwrap_or_default(),
            last_name: row.last_name.unwrap_or_default(),
            first_name_rus: row.first_name_rus.unwrap_or_default(),
            middle_name_rus: row.middle_name_rus.unwrap_or_default(),
            last_name_rus: row.last_name_rus.unwrap_or_default(),
            country: row.country.unwrap_or_default(),
            city: row.city.unwrap_or_default(),
            affiliation: row.affiliation.unwrap_or_default(),
            degree: row.degree.unwrap_or_default(),
            role: row.role.unwrap_or_default(),
            avatar: row.avatar,
        });
        Member {
            user: User {
                id: row.id,
                email: row.email,
            },
            profile,
        }
    }
}

#[derive(FromRow)]
struct AuthorRow {
    submission_id: i64,
    author_order: i32,
    #[sqlx(flatten)]
    member: MemberRow,
}

/// Postgres-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn members_by_ids(&self, ids: &[i64]) -> Result<Vec<Member>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT {} FROM users u LEFT JOIN profiles p ON p.user_id = u.id WHERE u.id = ANY($1)",
            MEMBER_COLUMNS
        );
        let rows = sqlx::query_as::<_, MemberRow>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Member::from).collect())
    }
}

#[async_trait]
impl ChairStore for PgStore {
    async fn conference(&self, id: i64) -> Result<Option<Conference>, sqlx::Error> {
        sqlx::query_as::<_, Conference>(
            "SELECT id, short_name, full_name, created_at FROM conferences WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn is_chair(&self, conference_id: i64, user_id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM conference_chairs
                WHERE conference_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(conference_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn submission_types(&self, conference_id: i64) -> Result<Vec<SubmissionType>, sqlx::Error> {
        sqlx::query_as::<_, SubmissionType>(
            r#"
            SELECT id, conference_id, name, language
            FROM submission_types
            WHERE conference_id = $1
            ORDER BY id
            "#,
        )
        .bind(conference_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn submissions(&self, conference_id: i64) -> Result<Vec<SubmissionRecord>, sqlx::Error> {
        let submissions = sqlx::query_as::<_, Submission>(
            r#"
            SELECT id, conference_id, title, abstract, status,
                   stype_id, created_by, review_manuscript
            FROM submissions
            WHERE conference_id = $1
            "#,
        )
        .bind(conference_id)
        .fetch_all(&self.pool)
        .await?;

        let stypes = self.submission_types(conference_id).await?;

        let sql = format!(
            r#"
            SELECT a.submission_id, a.author_order, {}
            FROM authorships a
            JOIN submissions s ON s.id = a.submission_id
            JOIN users u ON u.id = a.user_id
            LEFT JOIN profiles p ON p.user_id = u.id
            WHERE s.conference_id = $1
            ORDER BY a.submission_id, a.author_order, a.id
            "#,
            MEMBER_COLUMNS
        );
        let authors = sqlx::query_as::<_, AuthorRow>(&sql)
            .bind(conference_id)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(|row| (row.submission_id, row.author_order, Member::from(row.member)))
            .collect::<Vec<_>>();

        let mut owner_ids: Vec<i64> = submissions.iter().filter_map(|s| s.created_by).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();
        let owners = self.members_by_ids(&owner_ids).await?;

        Ok(assemble_records(submissions, &stypes, authors, owners))
    }

    async fn members(&self) -> Result<Vec<Member>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM users u LEFT JOIN profiles p ON p.user_id = u.id ORDER BY u.id",
            MEMBER_COLUMNS
        );
        let rows = sqlx::query_as::<_, MemberRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn member(&self, user_id: i64) -> Result<Option<Member>, sqlx::Error> {
        Ok(self.members_by_ids(&[user_id]).await?.into_iter().next())
    }

    async fn authorship_counts(&self, conference_id: i64) -> Result<HashMap<i64, usize>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT a.user_id, COUNT(*) AS num_submissions
            FROM authorships a
            JOIN submissions s ON s.id = a.submission_id
            WHERE s.conference_id = $1
            GROUP BY a.user_id
            "#,
        )
        .bind(conference_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(user_id, count)| (user_id, count as usize))
            .collect())
    }
}
