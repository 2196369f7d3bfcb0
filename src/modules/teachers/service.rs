use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::modules::teachers::model::{
    AttachmentMeta, TeacherFilters, TeacherInsert, TeacherReadOnly, TeacherRow, UploadedFile,
};
use crate::utils::errors::{AppError, UniqueField};
use crate::utils::password::hash_password;
use eduapp_core::file_storage::{FileStorage, LocalFileStorage, file_extension, saved_name};
use eduapp_models::pagination::Paginated;

/// Joined select producing one flat [`TeacherRow`] per teacher.
const TEACHER_SELECT: &str = "\
SELECT t.id, t.uuid, t.is_active, \
       u.id AS user_id, u.username, u.vat, u.firstname, u.lastname, u.role, \
       u.is_active AS user_is_active, \
       p.id AS personal_info_id, p.amka, p.identity_number, \
       a.filename AS att_filename, a.saved_name AS att_saved_name, \
       a.file_path AS att_file_path, a.content_type AS att_content_type, \
       a.extension AS att_extension \
FROM teachers t \
JOIN users u ON u.id = t.user_id \
JOIN personal_info p ON p.id = t.personal_info_id \
LEFT JOIN attachments a ON a.id = p.attachment_id";

const COUNT_SELECT: &str = "\
SELECT COUNT(*) \
FROM teachers t \
JOIN users u ON u.id = t.user_id \
JOIN personal_info p ON p.id = t.personal_info_id";

pub struct TeacherService;

impl TeacherService {
    /// Inserts a teacher together with its user and personal-info records.
    ///
    /// Four sequential lookups guard the uniqueness keys so that each
    /// violation reports its own error code; the database constraints remain
    /// the backstop for racing inserts, and a constraint violation surfacing
    /// at insert time is mapped back into the same error family. The whole
    /// graph is written in one transaction; any failure after the optional
    /// attachment has been stored removes the stored file again.
    #[instrument(skip(db, storage, dto, amka_file), fields(amka = %dto.personal_info.amka))]
    pub async fn save_teacher(
        db: &PgPool,
        storage: &LocalFileStorage,
        dto: TeacherInsert,
        amka_file: Option<UploadedFile>,
    ) -> Result<TeacherReadOnly, AppError> {
        let mut tx = db.begin().await?;

        let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE vat = $1")
            .bind(&dto.user.vat)
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_some() {
            return Err(AppError::already_exists(
                UniqueField::Vat,
                format!("Personal info with VAT {} already exists", dto.user.vat),
            ));
        }

        let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM personal_info WHERE amka = $1")
            .bind(&dto.personal_info.amka)
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_some() {
            return Err(AppError::already_exists(
                UniqueField::Amka,
                format!(
                    "Personal info with AMKA {} already exists",
                    dto.personal_info.amka
                ),
            ));
        }

        let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE username = $1")
            .bind(&dto.user.username)
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_some() {
            return Err(AppError::already_exists(
                UniqueField::Username,
                format!("User with username {} already exists", dto.user.username),
            ));
        }

        let existing =
            sqlx::query_scalar::<_, i64>("SELECT id FROM personal_info WHERE identity_number = $1")
                .bind(&dto.personal_info.identity_number)
                .fetch_optional(&mut *tx)
                .await?;
        if existing.is_some() {
            return Err(AppError::already_exists(
                UniqueField::Identity,
                format!(
                    "User with identity number {} already exists",
                    dto.personal_info.identity_number
                ),
            ));
        }

        // Store the binary content first; a write failure aborts before any
        // row exists. The dropped transaction rolls back on every early
        // return below.
        let attachment = match &amka_file {
            Some(file) if !file.bytes.is_empty() => {
                Some(Self::store_amka_file(storage, file).await?)
            }
            _ => None,
        };

        let inserted = Self::insert_graph(&mut tx, &dto, attachment.as_ref()).await;
        let teacher = match inserted {
            Ok(teacher) => teacher,
            Err(err) => {
                Self::discard_stored_file(storage, attachment.as_ref()).await;
                return Err(err);
            }
        };

        if let Err(err) = tx.commit().await {
            Self::discard_stored_file(storage, attachment.as_ref()).await;
            return Err(Self::map_insert_error(err));
        }

        info!(amka = %dto.personal_info.amka, uuid = %teacher.uuid, "Teacher saved");

        Ok(teacher)
    }

    /// Returns one page of teachers matching the filters, sorted ascending by
    /// id. Counts are computed over the same predicate.
    #[instrument(skip(db))]
    pub async fn get_teachers_filtered_paginated(
        db: &PgPool,
        filters: TeacherFilters,
    ) -> Result<Paginated<TeacherReadOnly>, AppError> {
        let mut count_query = QueryBuilder::<Postgres>::new(COUNT_SELECT);
        Self::push_predicates(&mut count_query, &filters);
        let total: i64 = count_query.build_query_scalar().fetch_one(db).await?;

        let mut query = QueryBuilder::<Postgres>::new(TEACHER_SELECT);
        Self::push_predicates(&mut query, &filters);
        query
            .push(" ORDER BY t.id ASC LIMIT ")
            .push_bind(filters.size())
            .push(" OFFSET ")
            .push_bind(filters.offset());

        let rows: Vec<TeacherRow> = query.build_query_as().fetch_all(db).await?;
        let data = rows.into_iter().map(TeacherReadOnly::from).collect();

        Ok(Paginated::new(data, filters.page(), filters.size(), total))
    }

    /// Filterless paginated listing: the degenerate case of the filtered
    /// query with every predicate at its identity element.
    #[instrument(skip(db))]
    pub async fn get_paginated_teachers(
        db: &PgPool,
        page: i64,
        size: i64,
    ) -> Result<Paginated<TeacherReadOnly>, AppError> {
        let filters = TeacherFilters {
            page: Some(page),
            size: Some(size),
            ..Default::default()
        };
        Self::get_teachers_filtered_paginated(db, filters).await
    }

    #[instrument(skip(db))]
    pub async fn get_teacher_by_uuid(db: &PgPool, uuid: &str) -> Result<TeacherReadOnly, AppError> {
        let sql = format!("{TEACHER_SELECT} WHERE t.uuid = $1");
        let row = sqlx::query_as::<_, TeacherRow>(&sql)
            .bind(uuid)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Teacher", format!("Teacher with uuid {} not found", uuid))
            })?;

        Ok(TeacherReadOnly::from(row))
    }

    /// Appends one conjunct per present filter field. Absent or blank fields
    /// contribute nothing, so an empty filter compiles to no WHERE clause at
    /// all.
    fn push_predicates(query: &mut QueryBuilder<'_, Postgres>, filters: &TeacherFilters) {
        let mut separator = " WHERE ";

        if let Some(uuid) = filters.uuid.as_deref().filter(|s| !s.trim().is_empty()) {
            query
                .push(separator)
                .push("UPPER(t.uuid) LIKE '%' || UPPER(")
                .push_bind(uuid.to_string())
                .push(") || '%'");
            separator = " AND ";
        }

        if let Some(vat) = filters.user_vat.as_deref().filter(|s| !s.trim().is_empty()) {
            query
                .push(separator)
                .push("u.vat = ")
                .push_bind(vat.to_string());
            separator = " AND ";
        }

        if let Some(amka) = filters
            .user_amka
            .as_deref()
            .filter(|s| !s.trim().is_empty())
        {
            query
                .push(separator)
                .push("p.amka = ")
                .push_bind(amka.to_string());
            separator = " AND ";
        }

        if let Some(active) = filters.active {
            query
                .push(separator)
                .push("u.is_active = ")
                .push_bind(active);
        }
    }

    async fn store_amka_file(
        storage: &LocalFileStorage,
        file: &UploadedFile,
    ) -> Result<AttachmentMeta, AppError> {
        let original = file.filename.clone().unwrap_or_default();
        let stored_name = saved_name(&original);
        let file_path = storage.save(&stored_name, &file.bytes).await?;

        Ok(AttachmentMeta {
            filename: file.filename.clone(),
            saved_name: stored_name,
            file_path,
            content_type: file.content_type.clone(),
            extension: file_extension(&original),
        })
    }

    /// Best-effort removal of a stored file whose teacher never materialized.
    async fn discard_stored_file(storage: &LocalFileStorage, attachment: Option<&AttachmentMeta>) {
        if let Some(attachment) = attachment {
            storage.delete(&attachment.saved_name).await.ok();
        }
    }

    async fn insert_graph(
        tx: &mut Transaction<'_, Postgres>,
        dto: &TeacherInsert,
        attachment: Option<&AttachmentMeta>,
    ) -> Result<TeacherReadOnly, AppError> {
        let hashed_password = hash_password(&dto.user.password)?;

        let user_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (username, password, vat, firstname, lastname) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(&dto.user.username)
        .bind(&hashed_password)
        .bind(&dto.user.vat)
        .bind(&dto.user.firstname)
        .bind(&dto.user.lastname)
        .fetch_one(&mut **tx)
        .await
        .map_err(Self::map_insert_error)?;

        let attachment_id = match attachment {
            Some(attachment) => Some(
                sqlx::query_scalar::<_, i64>(
                    "INSERT INTO attachments (filename, saved_name, file_path, content_type, extension) \
                     VALUES ($1, $2, $3, $4, $5) RETURNING id",
                )
                .bind(&attachment.filename)
                .bind(&attachment.saved_name)
                .bind(&attachment.file_path)
                .bind(&attachment.content_type)
                .bind(&attachment.extension)
                .fetch_one(&mut **tx)
                .await
                .map_err(Self::map_insert_error)?,
            ),
            None => None,
        };

        let personal_info_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO personal_info (amka, identity_number, attachment_id) \
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&dto.personal_info.amka)
        .bind(&dto.personal_info.identity_number)
        .bind(attachment_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(Self::map_insert_error)?;

        // The uuid is assigned exactly once here and never reassigned.
        let uuid = Uuid::new_v4().to_string();
        let is_active = dto.is_active.unwrap_or(true);

        let teacher_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO teachers (uuid, is_active, user_id, personal_info_id) \
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(&uuid)
        .bind(is_active)
        .bind(user_id)
        .bind(personal_info_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(Self::map_insert_error)?;

        let sql = format!("{TEACHER_SELECT} WHERE t.id = $1");
        let row = sqlx::query_as::<_, TeacherRow>(&sql)
            .bind(teacher_id)
            .fetch_one(&mut **tx)
            .await?;

        Ok(TeacherReadOnly::from(row))
    }

    /// Translates a unique-constraint violation surfacing from the database
    /// back into the specific already-exists kind; everything else stays an
    /// internal error.
    fn map_insert_error(err: sqlx::Error) -> AppError {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let field = match db_err.constraint() {
                    Some("users_vat_key") => Some(UniqueField::Vat),
                    Some("users_username_key") => Some(UniqueField::Username),
                    Some("personal_info_amka_key") => Some(UniqueField::Amka),
                    Some("personal_info_identity_number_key") => Some(UniqueField::Identity),
                    _ => None,
                };
                if let Some(field) = field {
                    return AppError::already_exists(
                        field,
                        format!("{} already belongs to an existing teacher", field.as_str()),
                    );
                }
            }
        }
        AppError::from(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiled_sql(filters: &TeacherFilters) -> String {
        let mut query = QueryBuilder::<Postgres>::new(COUNT_SELECT);
        TeacherService::push_predicates(&mut query, filters);
        query.into_sql()
    }

    #[test]
    fn test_empty_filters_compile_to_no_where_clause() {
        assert!(!compiled_sql(&TeacherFilters::default()).contains("WHERE"));
    }

    #[test]
    fn test_blank_strings_count_as_absent() {
        let filters = TeacherFilters {
            uuid: Some("   ".to_string()),
            user_vat: Some("".to_string()),
            ..Default::default()
        };
        assert!(!compiled_sql(&filters).contains("WHERE"));
    }

    #[test]
    fn test_single_filter_produces_single_predicate() {
        let filters = TeacherFilters {
            active: Some(true),
            ..Default::default()
        };
        let sql = compiled_sql(&filters);
        assert!(sql.contains(" WHERE u.is_active = "));
        assert!(!sql.contains(" AND "));
    }

    #[test]
    fn test_all_filters_joined_with_and() {
        let filters = TeacherFilters {
            uuid: Some("ab3".to_string()),
            user_vat: Some("123456789".to_string()),
            user_amka: Some("01017012345".to_string()),
            active: Some(false),
            ..Default::default()
        };
        let sql = compiled_sql(&filters);
        assert_eq!(sql.matches(" WHERE ").count(), 1);
        assert_eq!(sql.matches(" AND ").count(), 3);
        assert!(sql.contains("UPPER(t.uuid) LIKE"));
        assert!(sql.contains("u.vat = "));
        assert!(sql.contains("p.amka = "));
        assert!(sql.contains("u.is_active = "));
    }

    #[test]
    fn test_uuid_match_is_case_insensitive_substring() {
        let filters = TeacherFilters {
            uuid: Some("ab3".to_string()),
            ..Default::default()
        };
        // both sides upper-cased, no anchoring
        assert!(compiled_sql(&filters).contains("UPPER(t.uuid) LIKE '%' || UPPER($1) || '%'"));
    }
}
