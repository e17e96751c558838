use async_trait::async_trait;
use tokio_postgres::types::ToSql;
use tokio_postgres::Row;

use crate::entities::location::Location;
use crate::entities::offer::{OfferBase, TransportOffer};
use crate::entities::user::UserId;
use crate::paging::{Offers, PageRequest, Sort};
use crate::persistence::dao::{gen_store_error, Dao, DaoTransaction, StoreError};
use crate::repository::TransportOffers;
use crate::search::{TransportOfferSearchCriteria, TransportSortKey};

#[derive(Clone)]
pub struct PgTransportOffers {
    dao: Dao,
}

impl PgTransportOffers {
    pub fn new(dao: Dao) -> PgTransportOffers {
        PgTransportOffers { dao }
    }
}

#[async_trait]
impl TransportOffers for PgTransportOffers {
    async fn create(&self, offer: TransportOffer) -> Result<TransportOffer, StoreError> {
        let mut db_connection = self.dao.get_connection().await?;
        let txn = self.dao.begin(&mut db_connection).await?;
        let saved = txn.save_transport_offer(offer).await?;
        txn.commit().await?;
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TransportOffer>, StoreError> {
        let mut db_connection = self.dao.get_connection().await?;
        let txn = self.dao.begin(&mut db_connection).await?;
        let found = txn.get_transport_offer(id).await?;
        txn.rollback().await?;
        Ok(found)
    }

    async fn search(
        &self,
        criteria: &TransportOfferSearchCriteria,
        sort: Option<&Sort<TransportSortKey>>,
        page: &PageRequest,
    ) -> Result<Offers<TransportOffer>, StoreError> {
        let mut db_connection = self.dao.get_connection().await?;
        let txn = self.dao.begin(&mut db_connection).await?;
        let offers = txn.search_transport_offers(criteria, sort, page).await?;
        txn.rollback().await?;
        Ok(offers)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut db_connection = self.dao.get_connection().await?;
        let txn = self.dao.begin(&mut db_connection).await?;
        let deleted = txn.delete_transport_offer(id).await?;
        txn.commit().await?;
        Ok(deleted)
    }
}

impl DaoTransaction<'_> {
    pub async fn save_transport_offer(
        &self,
        mut offer: TransportOffer,
    ) -> Result<TransportOffer, StoreError> {
        let row = match self
            .transaction
            .query_one(
                INSERT_TRANSPORT_OFFER,
                &[
                    &offer.base.user_id.0,
                    &offer.base.title,
                    &offer.base.description,
                    &offer.base.created_at,
                    &offer.origin.region,
                    &offer.origin.city,
                    &offer.destination.region,
                    &offer.destination.city,
                    &offer.capacity,
                    &offer.transport_date,
                ],
            )
            .await
        {
            Ok(row) => row,
            Err(db_error) => return Err(gen_store_error("save_transport_offer", db_error)),
        };
        offer.base.id = row.get("offerId");
        Ok(offer)
    }

    pub async fn get_transport_offer(&self, id: i64) -> Result<Option<TransportOffer>, StoreError> {
        let mut query_string: String = "".to_owned();
        query_string.push_str(TRANSPORT_OFFER_QUERY);
        query_string.push_str("WHERE offerId = $1");

        let rows = match self.transaction.query(&query_string, &[&id]).await {
            Ok(rows) => rows,
            Err(db_error) => return Err(gen_store_error("get_transport_offer", db_error)),
        };
        Ok(rows.first().map(convert_row_to_transport_offer))
    }

    pub async fn search_transport_offers(
        &self,
        criteria: &TransportOfferSearchCriteria,
        sort: Option<&Sort<TransportSortKey>>,
        page: &PageRequest,
    ) -> Result<Offers<TransportOffer>, StoreError> {
        let (filter, params) = build_transport_filter(criteria);

        let mut count_query: String = "".to_owned();
        count_query.push_str("SELECT COUNT(*) AS total FROM transport_offer");
        count_query.push_str(&filter);

        let total_row = match self.transaction.query_one(&count_query, &params).await {
            Ok(row) => row,
            Err(db_error) => return Err(gen_store_error("count_transport_offers", db_error)),
        };
        let total_elements: i64 = total_row.get("total");

        let limit = page.size;
        let offset = page.offset();
        let mut page_params = params;
        let mut query_string: String = "".to_owned();
        query_string.push_str(TRANSPORT_OFFER_QUERY);
        query_string.push_str(&filter);
        query_string.push_str(&transport_order_by(sort));
        query_string.push_str(&format!(
            " LIMIT ${} OFFSET ${}",
            page_params.len() + 1,
            page_params.len() + 2
        ));
        page_params.push(&limit);
        page_params.push(&offset);

        let rows = match self.transaction.query(&query_string, &page_params).await {
            Ok(rows) => rows,
            Err(db_error) => return Err(gen_store_error("search_transport_offers", db_error)),
        };
        Ok(Offers {
            content: rows.iter().map(convert_row_to_transport_offer).collect(),
            total_elements,
        })
    }

    pub async fn delete_transport_offer(&self, id: i64) -> Result<bool, StoreError> {
        let rows_deleted = match self
            .transaction
            .execute("DELETE FROM transport_offer WHERE offerId = $1", &[&id])
            .await
        {
            Ok(rows_deleted) => rows_deleted,
            Err(db_error) => return Err(gen_store_error("delete_transport_offer", db_error)),
        };
        Ok(rows_deleted > 0)
    }
}

fn convert_row_to_transport_offer(row: &Row) -> TransportOffer {
    TransportOffer {
        base: OfferBase {
            id: row.get("offerId"),
            user_id: UserId(row.get("userId")),
            title: row.get("title"),
            description: row.get("description"),
            created_at: row.get("createdAt"),
        },
        origin: Location {
            region: row.get("originRegion"),
            city: row.get("originCity"),
        },
        destination: Location {
            region: row.get("destinationRegion"),
            city: row.get("destinationCity"),
        },
        capacity: row.get("capacity"),
        transport_date: row.get("transportDate"),
    }
}

fn build_transport_filter(
    criteria: &TransportOfferSearchCriteria,
) -> (String, Vec<&(dyn ToSql + Sync)>) {
    let mut clauses: Vec<String> = vec![];
    let mut params: Vec<&(dyn ToSql + Sync)> = vec![];

    if let Some(origin) = &criteria.origin {
        clauses.push(format!("LOWER(originRegion) = LOWER(${})", params.len() + 1));
        params.push(&origin.region);
        clauses.push(format!("LOWER(originCity) = LOWER(${})", params.len() + 1));
        params.push(&origin.city);
    }
    if let Some(destination) = &criteria.destination {
        clauses.push(format!(
            "LOWER(destinationRegion) = LOWER(${})",
            params.len() + 1
        ));
        params.push(&destination.region);
        clauses.push(format!(
            "LOWER(destinationCity) = LOWER(${})",
            params.len() + 1
        ));
        params.push(&destination.city);
    }
    // Capacity is a lower bound: any vehicle at least this big qualifies.
    if let Some(capacity) = &criteria.capacity {
        clauses.push(format!("capacity >= ${}", params.len() + 1));
        params.push(capacity);
    }
    if let Some(transport_date) = &criteria.transport_date {
        clauses.push(format!("transportDate = ${}", params.len() + 1));
        params.push(transport_date);
    }

    if clauses.is_empty() {
        return ("".to_owned(), params);
    }
    (format!(" WHERE {}", clauses.join(" AND ")), params)
}

fn transport_sort_column(key: TransportSortKey) -> &'static str {
    match key {
        TransportSortKey::Id => "offerId",
        TransportSortKey::Title => "title COLLATE \"pl-x-icu\"",
        TransportSortKey::Description => "description COLLATE \"pl-x-icu\"",
        TransportSortKey::Capacity => "capacity",
        TransportSortKey::TransportDate => "transportDate",
        TransportSortKey::CreatedAt => "createdAt",
    }
}

fn transport_order_by(sort: Option<&Sort<TransportSortKey>>) -> String {
    match sort {
        Some(sort) => format!(
            " ORDER BY {} {}",
            transport_sort_column(sort.key),
            sort.direction
        ),
        None => " ORDER BY offerId ASC".to_owned(),
    }
}

const TRANSPORT_OFFER_QUERY: &str = "SELECT offerId, userId, title, description, createdAt, \
     originRegion, originCity, destinationRegion, destinationCity, capacity, transportDate \
     FROM transport_offer ";

const INSERT_TRANSPORT_OFFER: &str = "INSERT INTO transport_offer \
     (userId, title, description, createdAt, originRegion, originCity, \
      destinationRegion, destinationCity, capacity, transportDate) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
     RETURNING offerId";
