use async_trait::async_trait;
use tokio_postgres::Row;

use crate::entities::user::{User, UserId};
use crate::persistence::dao::{gen_store_error, Dao, DaoTransaction, StoreError};
use crate::repository::UsersRepository;

#[derive(Clone)]
pub struct PgUsers {
    dao: Dao,
}

impl PgUsers {
    pub fn new(dao: Dao) -> PgUsers {
        PgUsers { dao }
    }
}

#[async_trait]
impl UsersRepository for PgUsers {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let mut db_connection = self.dao.get_connection().await?;
        let txn = self.dao.begin(&mut db_connection).await?;
        let found = txn.get_user(id).await?;
        txn.rollback().await?;
        Ok(found)
    }
}

impl DaoTransaction<'_> {
    pub async fn get_user(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let mut query_string: String = "".to_owned();
        query_string.push_str(USER_QUERY);
        query_string.push_str("WHERE userId = $1");

        let rows = match self.transaction.query(&query_string, &[&id.0]).await {
            Ok(rows) => rows,
            Err(db_error) => return Err(gen_store_error("get_user", db_error)),
        };
        Ok(rows.first().map(convert_row_to_user))
    }
}

fn convert_row_to_user(row: &Row) -> User {
    User {
        id: UserId(row.get("userId")),
        email: row.get("email"),
        phone_number: row.get("phoneNumber"),
    }
}

const USER_QUERY: &str = "SELECT userId, email, phoneNumber FROM users ";
