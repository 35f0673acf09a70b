//! SQL Server driver over tiberius.

use tabula_core::{SqlValue, quote_ident};
use tabula_error::{DatabaseError, DatabaseErrorKind, DatabaseResult};
use tabula_interface::{Driver, QueryOutput};
use tiberius::{Client, ColumnData, Config, Query};
use tokio::net::TcpStream;
use tokio::runtime::Runtime;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::{debug, instrument};

type MssqlClient = Client<Compat<TcpStream>>;

/// One live SQL Server connection.
///
/// tiberius is async; the driver owns a current-thread runtime and blocks on
/// each call, so callers see a plain synchronous [`Driver`].
pub struct MssqlDriver {
    runtime: Runtime,
    client: MssqlClient,
    target: String,
}

impl std::fmt::Debug for MssqlDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MssqlDriver")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl MssqlDriver {
    /// Connects using `config`. `target` is a credential-free description
    /// used in logs.
    #[instrument(skip(config))]
    pub fn connect(config: Config, target: String) -> DatabaseResult<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))?;

        let client = runtime.block_on(async {
            let tcp = TcpStream::connect(config.get_addr()).await.map_err(|e| {
                DatabaseError::new(DatabaseErrorKind::Connection(format!(
                    "Failed to connect to {}: {}",
                    config.get_addr(),
                    e
                )))
            })?;
            tcp.set_nodelay(true).ok();
            Client::connect(config, tcp.compat_write())
                .await
                .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))
        })?;

        Ok(Self {
            runtime,
            client,
            target,
        })
    }

    fn simple(&mut self, sql: &str) -> DatabaseResult<()> {
        let Self {
            runtime, client, ..
        } = self;
        runtime.block_on(async {
            client
                .simple_query(sql)
                .await
                .map_err(|e| DatabaseError::query(e.to_string()))?
                .into_results()
                .await
                .map_err(|e| DatabaseError::query(e.to_string()))?;
            Ok(())
        })
    }

    fn transaction(&mut self, sql: &str) -> DatabaseResult<()> {
        self.simple(sql).map_err(|e| {
            DatabaseError::new(DatabaseErrorKind::Transaction(e.message()))
        })
    }
}

fn bind_params<'a>(sql: &'a str, params: &[SqlValue]) -> Query<'a> {
    let mut query = Query::new(sql);
    for param in params {
        match param {
            SqlValue::Null => query.bind(Option::<String>::None),
            SqlValue::Bool(b) => query.bind(*b),
            SqlValue::Int(i) => query.bind(*i),
            SqlValue::Float(f) => query.bind(*f),
            SqlValue::Text(s) => query.bind(s.clone()),
            SqlValue::Bytes(b) => query.bind(b.clone()),
        }
    }
    query
}

impl Driver for MssqlDriver {
    #[instrument(skip(self, params), fields(params = params.len()))]
    fn query(&mut self, sql: &str, params: &[SqlValue]) -> DatabaseResult<QueryOutput> {
        let Self {
            runtime, client, ..
        } = self;
        runtime.block_on(async {
            let mut stream = bind_params(sql, params)
                .query(client)
                .await
                .map_err(|e| DatabaseError::query(e.to_string()))?;
            let columns: Vec<String> = stream
                .columns()
                .await
                .map_err(|e| DatabaseError::query(e.to_string()))?
                .map(|cols| cols.iter().map(|c| c.name().to_string()).collect())
                .unwrap_or_default();
            let rows = stream
                .into_first_result()
                .await
                .map_err(|e| DatabaseError::query(e.to_string()))?;
            debug!(rows = rows.len(), "Query returned");
            Ok(QueryOutput::new(
                columns,
                rows.iter().map(convert_row).collect(),
            ))
        })
    }

    #[instrument(skip(self, params), fields(params = params.len()))]
    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> DatabaseResult<u64> {
        let Self {
            runtime, client, ..
        } = self;
        runtime.block_on(async {
            let result = bind_params(sql, params)
                .execute(client)
                .await
                .map_err(|e| DatabaseError::query(e.to_string()))?;
            Ok(result.total())
        })
    }

    fn use_database(&mut self, database: &str) -> DatabaseResult<()> {
        self.simple(&format!("USE {}", quote_ident(database)))
    }

    fn begin(&mut self) -> DatabaseResult<()> {
        self.transaction("BEGIN TRANSACTION")
    }

    fn commit(&mut self) -> DatabaseResult<()> {
        self.transaction("COMMIT")
    }

    fn rollback(&mut self) -> DatabaseResult<()> {
        self.transaction("ROLLBACK")
    }

    fn describe(&self) -> String {
        self.target.clone()
    }
}

fn convert_column_data(data: &ColumnData<'_>) -> SqlValue {
    match data {
        ColumnData::Bit(Some(b)) => SqlValue::Bool(*b),
        ColumnData::U8(Some(v)) => SqlValue::Int(*v as i64),
        ColumnData::I16(Some(v)) => SqlValue::Int(*v as i64),
        ColumnData::I32(Some(v)) => SqlValue::Int(*v as i64),
        ColumnData::I64(Some(v)) => SqlValue::Int(*v),
        ColumnData::F32(Some(v)) => SqlValue::Float(*v as f64),
        ColumnData::F64(Some(v)) => SqlValue::Float(*v),
        ColumnData::Numeric(Some(n)) => SqlValue::Text(n.to_string()),
        ColumnData::String(Some(s)) => SqlValue::Text(s.to_string()),
        ColumnData::Guid(Some(g)) => SqlValue::Text(g.to_string()),
        ColumnData::Binary(Some(b)) => SqlValue::Bytes(b.to_vec()),
        ColumnData::Xml(Some(xml)) => SqlValue::Text(xml.to_string()),
        _ => SqlValue::Null,
    }
}

/// Date and time cells go through chrono so they display in ISO form.
fn convert_row(row: &tiberius::Row) -> Vec<SqlValue> {
    row.cells()
        .enumerate()
        .map(|(i, (_, data))| match data {
            ColumnData::DateTime(Some(_))
            | ColumnData::SmallDateTime(Some(_))
            | ColumnData::DateTime2(Some(_)) => row
                .try_get::<chrono::NaiveDateTime, _>(i)
                .ok()
                .flatten()
                .map(|dt| SqlValue::Text(dt.format("%Y-%m-%d %H:%M:%S%.f").to_string()))
                .unwrap_or(SqlValue::Null),
            ColumnData::DateTimeOffset(Some(_)) => row
                .try_get::<chrono::DateTime<chrono::Utc>, _>(i)
                .ok()
                .flatten()
                .map(|dt| SqlValue::Text(dt.to_rfc3339()))
                .unwrap_or(SqlValue::Null),
            ColumnData::Date(Some(_)) => row
                .try_get::<chrono::NaiveDate, _>(i)
                .ok()
                .flatten()
                .map(|d| SqlValue::Text(d.format("%Y-%m-%d").to_string()))
                .unwrap_or(SqlValue::Null),
            ColumnData::Time(Some(_)) => row
                .try_get::<chrono::NaiveTime, _>(i)
                .ok()
                .flatten()
                .map(|t| SqlValue::Text(t.format("%H:%M:%S%.f").to_string()))
                .unwrap_or(SqlValue::Null),
            _ => convert_column_data(data),
        })
        .collect()
}
