use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::RwLock;

use actix_web::HttpRequest;
use async_trait::async_trait;

use crate::auth::CurrentUser;
use crate::collation;
use crate::constants::FAKE_USER_HEADER;
use crate::entities::offer::{TranslationOffer, TransportOffer};
use crate::entities::user::{User, UserId};
use crate::paging::{Offers, PageRequest, Sort, SortDirection};
use crate::persistence::dao::StoreError;
use crate::repository::{TranslationOffers, TransportOffers, UsersRepository};
use crate::search::{
    TranslationOfferSearchCriteria, TranslationSortKey, TransportOfferSearchCriteria,
    TransportSortKey,
};

/// Development stand-in for the session-backed resolver. The X-User-Id header
/// wins, so one running server can act as several users; otherwise the
/// configured default applies.
#[derive(Clone)]
pub struct FakeCurrentUser {
    default_user: Option<UserId>,
}

impl FakeCurrentUser {
    pub fn new(default_user: Option<UserId>) -> FakeCurrentUser {
        FakeCurrentUser { default_user }
    }
}

impl CurrentUser for FakeCurrentUser {
    fn current_user_id(&self, req: &HttpRequest) -> Option<UserId> {
        req.headers()
            .get(FAKE_USER_HEADER)
            .and_then(|header| header.to_str().ok())
            .map(UserId::new)
            .or_else(|| self.default_user.clone())
    }
}

pub struct FakeUsers {
    users: RwLock<HashMap<UserId, User>>,
}

impl FakeUsers {
    pub fn new() -> FakeUsers {
        FakeUsers {
            users: RwLock::new(HashMap::new()),
        }
    }

    pub fn save_user(&self, user: User) -> Result<(), StoreError> {
        let mut users = match self.users.write() {
            Ok(users) => users,
            Err(lock_error) => return Err(lock_failed("users", lock_error)),
        };
        users.insert(user.id.clone(), user);
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        let mut users = match self.users.write() {
            Ok(users) => users,
            Err(lock_error) => return Err(lock_failed("users", lock_error)),
        };
        users.clear();
        Ok(())
    }
}

#[async_trait]
impl UsersRepository for FakeUsers {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let users = match self.users.read() {
            Ok(users) => users,
            Err(lock_error) => return Err(lock_failed("users", lock_error)),
        };
        Ok(users.get(id).cloned())
    }
}

pub struct InMemoryTransportOffers {
    offers: RwLock<Vec<TransportOffer>>,
}

impl InMemoryTransportOffers {
    pub fn new() -> InMemoryTransportOffers {
        InMemoryTransportOffers {
            offers: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TransportOffers for InMemoryTransportOffers {
    async fn create(&self, mut offer: TransportOffer) -> Result<TransportOffer, StoreError> {
        let mut offers = match self.offers.write() {
            Ok(offers) => offers,
            Err(lock_error) => return Err(lock_failed("transport offers", lock_error)),
        };
        offer.base.id = next_id(offers.iter().map(|existing| existing.base.id));
        offers.push(offer.clone());
        Ok(offer)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TransportOffer>, StoreError> {
        let offers = match self.offers.read() {
            Ok(offers) => offers,
            Err(lock_error) => return Err(lock_failed("transport offers", lock_error)),
        };
        Ok(offers.iter().find(|offer| offer.base.id == id).cloned())
    }

    async fn search(
        &self,
        criteria: &TransportOfferSearchCriteria,
        sort: Option<&Sort<TransportSortKey>>,
        page: &PageRequest,
    ) -> Result<Offers<TransportOffer>, StoreError> {
        let offers = match self.offers.read() {
            Ok(offers) => offers,
            Err(lock_error) => return Err(lock_failed("transport offers", lock_error)),
        };
        let mut matched: Vec<TransportOffer> = offers
            .iter()
            .filter(|offer| criteria.matches(offer))
            .cloned()
            .collect();
        if let Some(sort) = sort {
            matched.sort_by(|a, b| directed(compare_transport(a, b, sort.key), sort.direction));
        }
        Ok(page_slice(matched, page))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut offers = match self.offers.write() {
            Ok(offers) => offers,
            Err(lock_error) => return Err(lock_failed("transport offers", lock_error)),
        };
        let before = offers.len();
        offers.retain(|offer| offer.base.id != id);
        Ok(offers.len() < before)
    }
}

pub struct InMemoryTranslationOffers {
    offers: RwLock<Vec<TranslationOffer>>,
}

impl InMemoryTranslationOffers {
    pub fn new() -> InMemoryTranslationOffers {
        InMemoryTranslationOffers {
            offers: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TranslationOffers for InMemoryTranslationOffers {
    async fn create(&self, mut offer: TranslationOffer) -> Result<TranslationOffer, StoreError> {
        let mut offers = match self.offers.write() {
            Ok(offers) => offers,
            Err(lock_error) => return Err(lock_failed("translation offers", lock_error)),
        };
        offer.base.id = next_id(offers.iter().map(|existing| existing.base.id));
        offers.push(offer.clone());
        Ok(offer)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TranslationOffer>, StoreError> {
        let offers = match self.offers.read() {
            Ok(offers) => offers,
            Err(lock_error) => return Err(lock_failed("translation offers", lock_error)),
        };
        Ok(offers.iter().find(|offer| offer.base.id == id).cloned())
    }

    async fn search(
        &self,
        criteria: &TranslationOfferSearchCriteria,
        sort: Option<&Sort<TranslationSortKey>>,
        page: &PageRequest,
    ) -> Result<Offers<TranslationOffer>, StoreError> {
        let offers = match self.offers.read() {
            Ok(offers) => offers,
            Err(lock_error) => return Err(lock_failed("translation offers", lock_error)),
        };
        let mut matched: Vec<TranslationOffer> = offers
            .iter()
            .filter(|offer| criteria.matches(offer))
            .cloned()
            .collect();
        if let Some(sort) = sort {
            matched.sort_by(|a, b| directed(compare_translation(a, b, sort.key), sort.direction));
        }
        Ok(page_slice(matched, page))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut offers = match self.offers.write() {
            Ok(offers) => offers,
            Err(lock_error) => return Err(lock_failed("translation offers", lock_error)),
        };
        let before = offers.len();
        offers.retain(|offer| offer.base.id != id);
        Ok(offers.len() < before)
    }
}

fn lock_failed(what: &str, lock_error: impl Display) -> StoreError {
    StoreError::LockFailed {
        description: format!("Unable to lock {}: {}", what, lock_error),
    }
}

fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

fn compare_transport(a: &TransportOffer, b: &TransportOffer, key: TransportSortKey) -> Ordering {
    match key {
        TransportSortKey::Id => a.base.id.cmp(&b.base.id),
        TransportSortKey::Title => collation::compare(&a.base.title, &b.base.title),
        TransportSortKey::Description => collation::compare(&a.base.description, &b.base.description),
        TransportSortKey::Capacity => a.capacity.cmp(&b.capacity),
        TransportSortKey::TransportDate => a.transport_date.cmp(&b.transport_date),
        TransportSortKey::CreatedAt => a.base.created_at.cmp(&b.base.created_at),
    }
}

fn compare_translation(
    a: &TranslationOffer,
    b: &TranslationOffer,
    key: TranslationSortKey,
) -> Ordering {
    match key {
        TranslationSortKey::Id => a.base.id.cmp(&b.base.id),
        TranslationSortKey::Title => collation::compare(&a.base.title, &b.base.title),
        TranslationSortKey::Description => {
            collation::compare(&a.base.description, &b.base.description)
        }
        TranslationSortKey::Sworn => a.sworn.cmp(&b.sworn),
        TranslationSortKey::CreatedAt => a.base.created_at.cmp(&b.base.created_at),
    }
}

fn page_slice<T>(matched: Vec<T>, page: &PageRequest) -> Offers<T> {
    let total_elements = matched.len() as i64;
    let content = matched
        .into_iter()
        .skip(page.offset().max(0) as usize)
        .take(page.size.max(0) as usize)
        .collect();
    Offers {
        content,
        total_elements,
    }
}
