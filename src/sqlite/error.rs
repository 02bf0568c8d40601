use sqlx::error::ErrorKind;

use crate::BlogError;

/// Maps a sqlx failure onto the crate taxonomy.
///
/// Constraint violations become typed errors (`entity` names what was
/// duplicated); everything else is logged and reported as infrastructure.
pub(super) fn map_db_error(operation: &'static str, entity: &'static str, e: sqlx::Error) -> BlogError {
    if let Some(db_error) = e.as_database_error() {
        match db_error.kind() {
            ErrorKind::UniqueViolation => return BlogError::Conflict(entity),
            ErrorKind::ForeignKeyViolation => return BlogError::ForeignKeyViolation,
            _ => {}
        }
    }

    log::error!(target: "quill::sqlite", "msg=\"database error\", operation=\"{operation}\", error=\"{e}\"");
    BlogError::Infrastructure(e.to_string())
}
