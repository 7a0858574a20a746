//! Blocking [`StatementExecutor`] over `tokio-postgres`.
//!
//! [`PgExecutor`] owns a connected client and a current-thread runtime. Each
//! call blocks on the async driver, so the statement builders stay synchronous.
//! Rows are streamed through `query_raw`; nothing is buffered ahead of
//! [`Cursor::advance`].

use std::error::Error;
use std::pin::Pin;

use bytes::BytesMut;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use futures_util::StreamExt;
use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinHandle;
use tokio_postgres::types::{FromSqlOwned, IsNull, ToSql, Type, to_sql_checked};
use tokio_postgres::{Client, Config, NoTls, Row, RowStream};
use uuid::Uuid;

use crate::client::{Cursor, StatementExecutor};
use crate::error::{SqlError, SqlResult};
use crate::monitor::truncate_sql_bytes;
use crate::qb::BoundStatement;
use crate::value::Value;

/// A blocking PostgreSQL connection.
///
/// ```ignore
/// use ezsql::{PgExecutor, SqlStatement, qb};
///
/// let db = PgExecutor::connect("postgres://postgres@localhost/app")?;
/// let cursor = qb::select("users")?.execute(&db)?;
/// ```
pub struct PgExecutor {
    client: Client,
    runtime: Runtime,
    driver: JoinHandle<()>,
}

impl PgExecutor {
    /// Connect using a libpq-style connection string or `postgres://` URL.
    pub fn connect(url: &str) -> SqlResult<Self> {
        let config: Config = url
            .parse()
            .map_err(|e: tokio_postgres::Error| SqlError::Connection(e.to_string()))?;
        Self::connect_with(&config)
    }

    /// Connect using an already-built driver configuration.
    pub fn connect_with(config: &Config) -> SqlResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| SqlError::Connection(format!("failed to start runtime: {e}")))?;

        let (client, connection) = runtime
            .block_on(config.connect(NoTls))
            .map_err(|e| SqlError::Connection(e.to_string()))?;

        // The connection only makes progress while the runtime is driven by
        // `block_on`, which every client call goes through.
        let driver = runtime.spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(target: "ezsql.sql", error = %e, "connection closed with error");
            }
        });

        Ok(Self {
            client,
            runtime,
            driver,
        })
    }

    /// The underlying async client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Run a read statement with `$n` placeholders bound to its parameters.
    pub fn run_bound_query(&self, stmt: &BoundStatement) -> SqlResult<PgCursor<'_>> {
        log_bound(stmt);
        let params = param_refs(stmt.params());
        self.query_stream(stmt.sql(), &params)
    }

    /// Run a write statement with `$n` placeholders bound to its parameters.
    pub fn run_bound_update(&self, stmt: &BoundStatement) -> SqlResult<u64> {
        log_bound(stmt);
        let params = param_refs(stmt.params());
        Ok(self.runtime.block_on(self.client.execute(stmt.sql(), &params))?)
    }

    fn query_stream(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqlResult<PgCursor<'_>> {
        let rows = self
            .runtime
            .block_on(self.client.query_raw(sql, params.iter().copied()))?;
        Ok(PgCursor {
            executor: self,
            rows: Box::pin(rows),
            current: None,
        })
    }
}

impl Drop for PgExecutor {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

impl std::fmt::Debug for PgExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgExecutor")
            .field("closed", &self.client.is_closed())
            .finish_non_exhaustive()
    }
}

impl StatementExecutor for PgExecutor {
    type Cursor<'a> = PgCursor<'a>;

    fn run_query(&self, sql: &str) -> SqlResult<PgCursor<'_>> {
        self.query_stream(sql, &[])
    }

    fn run_update(&self, sql: &str) -> SqlResult<u64> {
        Ok(self.runtime.block_on(self.client.execute(sql, &[]))?)
    }
}

fn param_refs(values: &[Value]) -> Vec<&(dyn ToSql + Sync)> {
    values.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
}

fn log_bound(stmt: &BoundStatement) {
    tracing::debug!(
        target: "ezsql.sql",
        param_count = stmt.params().len(),
        sql = %truncate_sql_bytes(stmt.sql(), 200),
        "executing bound statement"
    );
}

/// Forward-only cursor over a streamed result set.
pub struct PgCursor<'a> {
    executor: &'a PgExecutor,
    rows: Pin<Box<RowStream>>,
    current: Option<Row>,
}

impl PgCursor<'_> {
    /// The current row, if the cursor is positioned on one.
    pub fn row(&self) -> Option<&Row> {
        self.current.as_ref()
    }
}

impl Cursor for PgCursor<'_> {
    fn advance(&mut self) -> SqlResult<bool> {
        match self.executor.runtime.block_on(self.rows.next()) {
            Some(Ok(row)) => {
                self.current = Some(row);
                Ok(true)
            }
            Some(Err(e)) => {
                self.current = None;
                Err(e.into())
            }
            None => {
                self.current = None;
                Ok(false)
            }
        }
    }

    fn value_of(&self, label: &str) -> SqlResult<Value> {
        let row = self
            .current
            .as_ref()
            .ok_or_else(|| SqlError::execution("cursor is not positioned on a row"))?;
        decode_column(row, label)
    }

    fn close(self) -> SqlResult<()> {
        // Dropping the stream releases the portal; the remaining rows are discarded.
        drop(self);
        Ok(())
    }
}

fn get<T: FromSqlOwned>(row: &Row, idx: usize, label: &str) -> SqlResult<Option<T>> {
    row.try_get::<_, Option<T>>(idx)
        .map_err(|e| SqlError::decode(label, e.to_string()))
}

/// Decode one column of `row` into a [`Value`] by its PostgreSQL type.
fn decode_column(row: &Row, label: &str) -> SqlResult<Value> {
    let idx = row
        .columns()
        .iter()
        .position(|c| c.name() == label)
        .ok_or_else(|| SqlError::decode(label, "no such column"))?;
    let ty = row.columns()[idx].type_();

    let value = match *ty {
        Type::BOOL => get::<bool>(row, idx, label)?.map(Value::Bool),
        Type::INT2 => get::<i16>(row, idx, label)?.map(Value::from),
        Type::INT4 => get::<i32>(row, idx, label)?.map(Value::from),
        Type::INT8 => get::<i64>(row, idx, label)?.map(Value::Int),
        Type::FLOAT4 => get::<f32>(row, idx, label)?.map(Value::from),
        Type::FLOAT8 => get::<f64>(row, idx, label)?.map(Value::Float),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
            get::<String>(row, idx, label)?.map(Value::Text)
        }
        Type::DATE => get::<NaiveDate>(row, idx, label)?.map(Value::Date),
        Type::TIME => get::<NaiveTime>(row, idx, label)?.map(Value::Time),
        Type::TIMESTAMP => get::<NaiveDateTime>(row, idx, label)?.map(Value::Timestamp),
        Type::TIMESTAMPTZ => {
            get::<DateTime<Utc>>(row, idx, label)?.map(|ts| Value::Timestamp(ts.naive_utc()))
        }
        Type::UUID => get::<Uuid>(row, idx, label)?.map(Value::Uuid),
        _ => {
            return Err(SqlError::decode(
                label,
                format!("unsupported column type: {ty}"),
            ));
        }
    };
    Ok(value.unwrap_or(Value::Null))
}

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(v) => v.to_sql_checked(ty, out),
            Value::Int(v) => match *ty {
                Type::INT2 => i16::try_from(*v)?.to_sql_checked(ty, out),
                Type::INT4 => i32::try_from(*v)?.to_sql_checked(ty, out),
                _ => v.to_sql_checked(ty, out),
            },
            Value::Float(v) => match *ty {
                Type::FLOAT4 => (*v as f32).to_sql_checked(ty, out),
                _ => v.to_sql_checked(ty, out),
            },
            Value::Text(v) => v.to_sql_checked(ty, out),
            Value::Date(v) => v.to_sql_checked(ty, out),
            Value::Time(v) => v.to_sql_checked(ty, out),
            Value::Timestamp(v) => match *ty {
                Type::TIMESTAMPTZ => v.and_utc().to_sql_checked(ty, out),
                _ => v.to_sql_checked(ty, out),
            },
            Value::Uuid(v) => v.to_sql_checked(ty, out),
        }
    }

    // Each variant checks the concrete type itself.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_null_encodes_as_sql_null() {
        let mut buf = BytesMut::new();
        let is_null = Value::Null.to_sql(&Type::INT4, &mut buf).unwrap();
        assert!(matches!(is_null, IsNull::Yes));
        assert!(buf.is_empty());
    }

    #[test]
    fn int_narrows_to_column_width() {
        let mut buf = BytesMut::new();
        Value::Int(7).to_sql(&Type::INT4, &mut buf).unwrap();
        assert_eq!(&buf[..], &7i32.to_be_bytes());

        let mut buf = BytesMut::new();
        Value::Int(7).to_sql(&Type::INT2, &mut buf).unwrap();
        assert_eq!(&buf[..], &7i16.to_be_bytes());
    }

    #[test]
    fn int_out_of_range_is_rejected() {
        let mut buf = BytesMut::new();
        assert!(Value::Int(i64::MAX).to_sql(&Type::INT2, &mut buf).is_err());
    }

    #[test]
    fn mismatched_type_is_rejected() {
        let mut buf = BytesMut::new();
        assert!(Value::Bool(true).to_sql(&Type::INT8, &mut buf).is_err());
    }

    #[test]
    fn text_encodes_utf8() {
        let mut buf = BytesMut::new();
        Value::Text("héllo".into()).to_sql(&Type::TEXT, &mut buf).unwrap();
        assert_eq!(&buf[..], "héllo".as_bytes());
    }

    #[test]
    fn connect_rejects_malformed_url() {
        let err = PgExecutor::connect("postgres://host:notaport/db").unwrap_err();
        assert!(matches!(err, SqlError::Connection(_)));
    }
}
