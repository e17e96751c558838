use std::str::FromStr;

use async_trait::async_trait;
use tokio_postgres::types::ToSql;
use tokio_postgres::Row;

use crate::entities::location::Location;
use crate::entities::offer::{Language, Mode, OfferBase, TranslationOffer};
use crate::entities::user::UserId;
use crate::paging::{Offers, PageRequest, Sort};
use crate::persistence::dao::{gen_store_error, Dao, DaoTransaction, StoreError};
use crate::repository::TranslationOffers;
use crate::search::{TranslationOfferSearchCriteria, TranslationSortKey};

#[derive(Clone)]
pub struct PgTranslationOffers {
    dao: Dao,
}

impl PgTranslationOffers {
    pub fn new(dao: Dao) -> PgTranslationOffers {
        PgTranslationOffers { dao }
    }
}

#[async_trait]
impl TranslationOffers for PgTranslationOffers {
    async fn create(&self, offer: TranslationOffer) -> Result<TranslationOffer, StoreError> {
        let mut db_connection = self.dao.get_connection().await?;
        let txn = self.dao.begin(&mut db_connection).await?;
        let saved = txn.save_translation_offer(offer).await?;
        txn.commit().await?;
        Ok(saved)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TranslationOffer>, StoreError> {
        let mut db_connection = self.dao.get_connection().await?;
        let txn = self.dao.begin(&mut db_connection).await?;
        let found = txn.get_translation_offer(id).await?;
        txn.rollback().await?;
        Ok(found)
    }

    async fn search(
        &self,
        criteria: &TranslationOfferSearchCriteria,
        sort: Option<&Sort<TranslationSortKey>>,
        page: &PageRequest,
    ) -> Result<Offers<TranslationOffer>, StoreError> {
        let mut db_connection = self.dao.get_connection().await?;
        let txn = self.dao.begin(&mut db_connection).await?;
        let offers = txn.search_translation_offers(criteria, sort, page).await?;
        txn.rollback().await?;
        Ok(offers)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut db_connection = self.dao.get_connection().await?;
        let txn = self.dao.begin(&mut db_connection).await?;
        let deleted = txn.delete_translation_offer(id).await?;
        txn.commit().await?;
        Ok(deleted)
    }
}

impl DaoTransaction<'_> {
    pub async fn save_translation_offer(
        &self,
        mut offer: TranslationOffer,
    ) -> Result<TranslationOffer, StoreError> {
        let mode = offer.mode.to_string();
        let language: Vec<String> = offer
            .language
            .iter()
            .map(|language| language.to_string())
            .collect();
        let location_region = offer.location.as_ref().map(|location| location.region.clone());
        let location_city = offer.location.as_ref().map(|location| location.city.clone());

        let row = match self
            .transaction
            .query_one(
                INSERT_TRANSLATION_OFFER,
                &[
                    &offer.base.user_id.0,
                    &offer.base.title,
                    &offer.base.description,
                    &offer.base.created_at,
                    &mode,
                    &language,
                    &location_region,
                    &location_city,
                    &offer.sworn,
                ],
            )
            .await
        {
            Ok(row) => row,
            Err(db_error) => return Err(gen_store_error("save_translation_offer", db_error)),
        };
        offer.base.id = row.get("offerId");
        Ok(offer)
    }

    pub async fn get_translation_offer(
        &self,
        id: i64,
    ) -> Result<Option<TranslationOffer>, StoreError> {
        let mut query_string: String = "".to_owned();
        query_string.push_str(TRANSLATION_OFFER_QUERY);
        query_string.push_str("WHERE offerId = $1");

        let rows = match self.transaction.query(&query_string, &[&id]).await {
            Ok(rows) => rows,
            Err(db_error) => return Err(gen_store_error("get_translation_offer", db_error)),
        };
        Ok(rows.first().map(convert_row_to_translation_offer))
    }

    pub async fn search_translation_offers(
        &self,
        criteria: &TranslationOfferSearchCriteria,
        sort: Option<&Sort<TranslationSortKey>>,
        page: &PageRequest,
    ) -> Result<Offers<TranslationOffer>, StoreError> {
        let language = criteria.language.map(|language| language.to_string());
        let (filter, params) = build_translation_filter(criteria, &language);

        let mut count_query: String = "".to_owned();
        count_query.push_str("SELECT COUNT(*) AS total FROM translation_offer");
        count_query.push_str(&filter);

        let total_row = match self.transaction.query_one(&count_query, &params).await {
            Ok(row) => row,
            Err(db_error) => return Err(gen_store_error("count_translation_offers", db_error)),
        };
        let total_elements: i64 = total_row.get("total");

        let limit = page.size;
        let offset = page.offset();
        let mut page_params = params;
        let mut query_string: String = "".to_owned();
        query_string.push_str(TRANSLATION_OFFER_QUERY);
        query_string.push_str(&filter);
        query_string.push_str(&translation_order_by(sort));
        query_string.push_str(&format!(
            " LIMIT ${} OFFSET ${}",
            page_params.len() + 1,
            page_params.len() + 2
        ));
        page_params.push(&limit);
        page_params.push(&offset);

        let rows = match self.transaction.query(&query_string, &page_params).await {
            Ok(rows) => rows,
            Err(db_error) => return Err(gen_store_error("search_translation_offers", db_error)),
        };
        Ok(Offers {
            content: rows.iter().map(convert_row_to_translation_offer).collect(),
            total_elements,
        })
    }

    pub async fn delete_translation_offer(&self, id: i64) -> Result<bool, StoreError> {
        let rows_deleted = match self
            .transaction
            .execute("DELETE FROM translation_offer WHERE offerId = $1", &[&id])
            .await
        {
            Ok(rows_deleted) => rows_deleted,
            Err(db_error) => return Err(gen_store_error("delete_translation_offer", db_error)),
        };
        Ok(rows_deleted > 0)
    }
}

fn convert_row_to_translation_offer(row: &Row) -> TranslationOffer {
    let language: Vec<String> = row.get("language");
    let location = match (
        row.get::<_, Option<String>>("locationRegion"),
        row.get::<_, Option<String>>("locationCity"),
    ) {
        (Some(region), Some(city)) => Some(Location { region, city }),
        _ => None,
    };
    TranslationOffer {
        base: OfferBase {
            id: row.get("offerId"),
            user_id: UserId(row.get("userId")),
            title: row.get("title"),
            description: row.get("description"),
            created_at: row.get("createdAt"),
        },
        mode: Mode::from_str(row.get("mode")).unwrap(),
        language: language
            .iter()
            .map(|language| Language::from_str(language).unwrap())
            .collect(),
        location,
        sworn: row.get("sworn"),
    }
}

// The language filter param is pre-rendered by the caller so it can outlive
// the borrowed param slice.
fn build_translation_filter<'a>(
    criteria: &'a TranslationOfferSearchCriteria,
    language: &'a Option<String>,
) -> (String, Vec<&'a (dyn ToSql + Sync)>) {
    let mut clauses: Vec<String> = vec![];
    let mut params: Vec<&(dyn ToSql + Sync)> = vec![];

    if let Some(location) = &criteria.location {
        clauses.push(format!(
            "LOWER(locationRegion) = LOWER(${})",
            params.len() + 1
        ));
        params.push(&location.region);
        clauses.push(format!("LOWER(locationCity) = LOWER(${})", params.len() + 1));
        params.push(&location.city);
    }
    if let Some(sworn) = &criteria.sworn {
        clauses.push(format!("sworn = ${}", params.len() + 1));
        params.push(sworn);
    }
    if let Some(language) = language {
        clauses.push(format!("${} = ANY(language)", params.len() + 1));
        params.push(language);
    }

    if clauses.is_empty() {
        return ("".to_owned(), params);
    }
    (format!(" WHERE {}", clauses.join(" AND ")), params)
}

fn translation_sort_column(key: TranslationSortKey) -> &'static str {
    match key {
        TranslationSortKey::Id => "offerId",
        TranslationSortKey::Title => "title COLLATE \"pl-x-icu\"",
        TranslationSortKey::Description => "description COLLATE \"pl-x-icu\"",
        TranslationSortKey::Sworn => "sworn",
        TranslationSortKey::CreatedAt => "createdAt",
    }
}

fn translation_order_by(sort: Option<&Sort<TranslationSortKey>>) -> String {
    match sort {
        Some(sort) => format!(
            " ORDER BY {} {}",
            translation_sort_column(sort.key),
            sort.direction
        ),
        None => " ORDER BY offerId ASC".to_owned(),
    }
}

const TRANSLATION_OFFER_QUERY: &str = "SELECT offerId, userId, title, description, createdAt, \
     mode, language, locationRegion, locationCity, sworn \
     FROM translation_offer ";

const INSERT_TRANSLATION_OFFER: &str = "INSERT INTO translation_offer \
     (userId, title, description, createdAt, mode, language, locationRegion, locationCity, sworn) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
     RETURNING offerId";
