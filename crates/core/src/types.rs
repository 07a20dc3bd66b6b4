/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Wall-clock timestamp without a zone, stored as `TIMESTAMP`.
///
/// Item release dates keep microsecond precision. The JSON form drops the
/// fraction only for whole seconds.
pub type LocalTimestamp = chrono::NaiveDateTime;
