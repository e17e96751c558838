use deadpool_postgres::{Object, Pool, Transaction};
use log::error;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum StoreError {
    PoolFailed { description: String },
    BeginFailed { description: String },
    CommitFailed { description: String },
    RollbackFailed { description: String },
    QueryFailed { description: String },
    LockFailed { description: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::PoolFailed { description }
            | StoreError::BeginFailed { description }
            | StoreError::CommitFailed { description }
            | StoreError::RollbackFailed { description }
            | StoreError::QueryFailed { description }
            | StoreError::LockFailed { description } => f.write_str(description),
        }
    }
}

impl Error for StoreError {}

pub fn gen_store_error(method: &str, db_error: tokio_postgres::Error) -> StoreError {
    error!(
        "{} failed: {}, database details: {}",
        method,
        db_error,
        match db_error.as_db_error() {
            Some(details) => details.to_string(),
            None => "none".to_string(),
        }
    );
    StoreError::QueryFailed {
        description: db_error.to_string(),
    }
}

#[derive(Clone)]
pub struct Dao {
    pool: Pool,
}

impl Dao {
    pub fn new(pool: Pool) -> Dao {
        Dao { pool }
    }

    pub async fn get_connection(&self) -> Result<Object, StoreError> {
        match self.pool.get().await {
            Ok(db_connection) => Ok(db_connection),
            Err(pool_error) => {
                error!("Unable to get database connection: {}", pool_error);
                Err(StoreError::PoolFailed {
                    description: pool_error.to_string(),
                })
            }
        }
    }

    pub async fn begin<'a>(
        &self,
        db_connection: &'a mut Object,
    ) -> Result<DaoTransaction<'a>, StoreError> {
        match db_connection.transaction().await {
            Ok(transaction) => Ok(DaoTransaction { transaction }),
            Err(db_error) => Err(StoreError::BeginFailed {
                description: db_error.to_string(),
            }),
        }
    }
}

pub struct DaoTransaction<'a> {
    pub transaction: Transaction<'a>,
}

impl DaoTransaction<'_> {
    pub async fn commit(self) -> Result<(), StoreError> {
        match self.transaction.commit().await {
            Ok(_) => Ok(()),
            Err(db_error) => Err(StoreError::CommitFailed {
                description: db_error.to_string(),
            }),
        }
    }

    pub async fn rollback(self) -> Result<(), StoreError> {
        match self.transaction.rollback().await {
            Ok(_) => Ok(()),
            Err(db_error) => Err(StoreError::RollbackFailed {
                description: db_error.to_string(),
            }),
        }
    }
}
