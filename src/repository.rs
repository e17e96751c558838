use crate::entities::offer::{TranslationOffer, TransportOffer};
use crate::entities::user::{User, UserId};
use crate::paging::{Offers, PageRequest, Sort};
use crate::persistence::dao::StoreError;
use crate::search::{
    TranslationOfferSearchCriteria, TranslationSortKey, TransportOfferSearchCriteria,
    TransportSortKey,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Paging/sorting store for transport offers. Implemented by the Postgres
/// store for production and an in-memory store for dev/test profiles.
#[async_trait]
pub trait TransportOffers: Send + Sync {
    async fn create(&self, offer: TransportOffer) -> Result<TransportOffer, StoreError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<TransportOffer>, StoreError>;
    async fn search(
        &self,
        criteria: &TransportOfferSearchCriteria,
        sort: Option<&Sort<TransportSortKey>>,
        page: &PageRequest,
    ) -> Result<Offers<TransportOffer>, StoreError>;
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait TranslationOffers: Send + Sync {
    async fn create(&self, offer: TranslationOffer) -> Result<TranslationOffer, StoreError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<TranslationOffer>, StoreError>;
    async fn search(
        &self,
        criteria: &TranslationOfferSearchCriteria,
        sort: Option<&Sort<TranslationSortKey>>,
        page: &PageRequest,
    ) -> Result<Offers<TranslationOffer>, StoreError>;
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}

/// User lookup behind the authenticated surface.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError>;
}

pub type DynTransportOffers = Arc<dyn TransportOffers>;
pub type DynTranslationOffers = Arc<dyn TranslationOffers>;
pub type DynUsersRepository = Arc<dyn UsersRepository>;
