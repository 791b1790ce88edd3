use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::pooled_connection::deadpool::Pool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl, SimpleAsyncConnection};
use scoped_futures::ScopedFutureExt;
use tracing::{debug, info, instrument};

use crate::error::{DatabaseError, RegistryError};
use crate::models::{NewIndividual, Record};
use crate::registry::{now_seconds, Registry};
use crate::schema::individuals;
use crate::submission::Submission;

const CREATE_INDIVIDUALS: &str =
    include_str!("../migrations/2024-01-01-000000_create_individuals/up.sql");

// blocks other writers for the rest of the transaction, plain reads still go through
const LOCK_INDIVIDUALS: &str = "LOCK TABLE individuals IN SHARE ROW EXCLUSIVE MODE";

pub fn get_database_connection(
    database_url: &str,
) -> Result<Pool<AsyncPgConnection>, DatabaseError> {
    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
    Ok(Pool::builder(config).build()?)
}

pub fn get_database_connection_from_env() -> Result<Pool<AsyncPgConnection>, DatabaseError> {
    let database_url = std::env::var("DATABASE_URL")?;
    get_database_connection(&database_url)
}

/// A [`Registry`] backed by the `individuals` table.
#[derive(Clone)]
pub struct PgRegistry {
    pool: Pool<AsyncPgConnection>,
}

impl PgRegistry {
    #[must_use]
    pub const fn new(pool: Pool<AsyncPgConnection>) -> Self {
        Self { pool }
    }

    pub fn connect(database_url: &str) -> Result<Self, DatabaseError> {
        Ok(Self::new(get_database_connection(database_url)?))
    }

    /// Creates the table if it does not exist yet.
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        let mut connection = self.pool.get().await?;
        connection.batch_execute(CREATE_INDIVIDUALS).await?;
        info!("database schema is up to date");
        Ok(())
    }
}

async fn load_snapshot(connection: &mut AsyncPgConnection) -> QueryResult<Vec<Record>> {
    individuals::table
        .order((
            individuals::score.desc(),
            individuals::last_updated.asc(),
            individuals::id.asc(),
        ))
        .select(Record::as_select())
        .load(connection)
        .await
}

async fn write_admitted(
    connection: &mut AsyncPgConnection,
    name: &str,
    seat: Option<&str>,
) -> Result<(), RegistryError> {
    let updated = diesel::update(individuals::table.filter(individuals::name.eq(name)))
        .set(individuals::admitted_seat.eq(seat))
        .execute(connection)
        .await?;
    if updated == 0 {
        return Err(RegistryError::NotFound(name.to_owned()));
    }
    Ok(())
}

#[async_trait]
impl Registry for PgRegistry {
    #[instrument(skip_all, fields(name = submission.name()))]
    async fn upsert(&self, submission: Submission) -> Result<(), RegistryError> {
        let mut connection = self.pool.get().await?;
        let new = NewIndividual::new(submission, now_seconds());
        diesel::insert_into(individuals::table)
            .values(&new)
            .on_conflict(individuals::name)
            .do_update()
            .set((
                individuals::score.eq(excluded(individuals::score)),
                individuals::preferences.eq(excluded(individuals::preferences)),
                individuals::admitted_seat.eq(None::<String>),
                individuals::last_updated.eq(excluded(individuals::last_updated)),
            ))
            .execute(&mut *connection)
            .await?;
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Record, RegistryError> {
        let mut connection = self.pool.get().await?;
        individuals::table
            .filter(individuals::name.eq(name))
            .select(Record::as_select())
            .first(&mut *connection)
            .await
            .optional()?
            .ok_or_else(|| RegistryError::NotFound(name.to_owned()))
    }

    async fn list_all(&self) -> Result<Vec<Record>, RegistryError> {
        let mut connection = self.pool.get().await?;
        Ok(load_snapshot(&mut connection).await?)
    }

    async fn set_admitted(&self, name: &str, seat: Option<&str>) -> Result<(), RegistryError> {
        let mut connection = self.pool.get().await?;
        write_admitted(&mut connection, name, seat).await
    }

    #[instrument(skip_all)]
    async fn clear(&self) -> Result<(), RegistryError> {
        let mut connection = self.pool.get().await?;
        let deleted = diesel::delete(individuals::table)
            .execute(&mut *connection)
            .await?;
        debug!(deleted, "deleted all records");
        Ok(())
    }

    #[instrument(skip_all)]
    async fn reassign<F, T>(&self, compute: F) -> Result<T, RegistryError>
    where
        F: FnOnce(&[Record]) -> (Vec<Option<String>>, T) + Send,
        T: Send,
    {
        let mut connection = self.pool.get().await?;
        let connection: &mut AsyncPgConnection = &mut connection;
        connection
            .transaction(move |connection| {
                async move {
                    diesel::sql_query(LOCK_INDIVIDUALS)
                        .execute(connection)
                        .await?;
                    let snapshot = load_snapshot(connection).await?;
                    let (seats, output) = compute(&snapshot);
                    for (record, seat) in snapshot.iter().zip(seats) {
                        write_admitted(connection, &record.name, seat.as_deref()).await?;
                    }
                    Ok::<_, RegistryError>(output)
                }
                .scope_boxed()
            })
            .await
    }
}
