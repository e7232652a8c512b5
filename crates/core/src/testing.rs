//! In-memory port implementations for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::ad::{Ad, AdInput, AdState};
use crate::error::CoreError;
use crate::feedback::Feedback;
use crate::ports::{AdRepository, DeleteOutcome, FeedbackRepository, ReservationRepository};
use crate::reservation::{Reservation, ReservationStatus};
use crate::types::{DbId, Timestamp};

#[derive(Default)]
struct Tables {
    next_id: DbId,
    ads: Vec<Ad>,
    reservations: Vec<Reservation>,
    feedback: Vec<Feedback>,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

/// Shared, cloneable store. Counts every port call in `reads`.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
    reads: Arc<AtomicUsize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }

    pub fn insert_ad(&self, latitude: f64, longitude: f64, state: AdState) -> DbId {
        let mut t = self.tables.lock().unwrap();
        let id = t.next_id();
        t.ads.push(Ad {
            id,
            user_id: "Testeur".into(),
            name: format!("Ad {id}"),
            description: "Description de test".into(),
            hour_price: 56.3,
            latitude,
            longitude,
            state,
            image: String::new(),
        });
        id
    }

    pub fn insert_reservation(
        &self,
        ad_id: DbId,
        begin_date: Timestamp,
        end_date: Timestamp,
        status: ReservationStatus,
    ) -> DbId {
        let mut t = self.tables.lock().unwrap();
        let id = t.next_id();
        t.reservations.push(Reservation {
            id,
            ad_id,
            user_id: "Testeur".into(),
            begin_date,
            end_date,
            status,
        });
        id
    }

    pub fn insert_feedback(&self, ad_id: DbId, rating: i16) -> DbId {
        let mut t = self.tables.lock().unwrap();
        let id = t.next_id();
        t.feedback.push(Feedback {
            id,
            ad_id,
            user_id: "Testeur".into(),
            rating,
            comment: "Super".into(),
            date: Utc::now(),
        });
        id
    }

    pub fn ad(&self, id: DbId) -> Option<Ad> {
        let t = self.tables.lock().unwrap();
        t.ads.iter().find(|a| a.id == id).cloned()
    }

    pub fn feedback_count(&self) -> usize {
        self.tables.lock().unwrap().feedback.len()
    }
}

fn apply_input(ad: &mut Ad, input: &AdInput) {
    ad.user_id = input.user_id.clone();
    ad.name = input.name.clone();
    ad.description = input.description.clone();
    ad.hour_price = input.hour_price;
    ad.latitude = input.latitude;
    ad.longitude = input.longitude;
    ad.image = input.image.clone();
}

#[async_trait]
impl AdRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<Ad>, CoreError> {
        self.touch();
        Ok(self.tables.lock().unwrap().ads.clone())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Ad>, CoreError> {
        self.touch();
        Ok(self.ad(id))
    }

    async fn create(&self, input: &AdInput, state: AdState) -> Result<Ad, CoreError> {
        self.touch();
        let mut t = self.tables.lock().unwrap();
        let id = t.next_id();
        let mut ad = Ad {
            id,
            user_id: String::new(),
            name: String::new(),
            description: String::new(),
            hour_price: 0.0,
            latitude: 0.0,
            longitude: 0.0,
            state,
            image: String::new(),
        };
        apply_input(&mut ad, input);
        t.ads.push(ad.clone());
        Ok(ad)
    }

    async fn update(&self, id: DbId, input: &AdInput) -> Result<Option<Ad>, CoreError> {
        self.touch();
        let mut t = self.tables.lock().unwrap();
        Ok(t.ads.iter_mut().find(|a| a.id == id).map(|ad| {
            apply_input(ad, input);
            ad.clone()
        }))
    }

    async fn set_state(&self, id: DbId, state: AdState) -> Result<Option<Ad>, CoreError> {
        self.touch();
        let mut t = self.tables.lock().unwrap();
        Ok(t.ads.iter_mut().find(|a| a.id == id).map(|ad| {
            ad.state = state;
            ad.clone()
        }))
    }

    async fn delete_unreserved(&self, id: DbId) -> Result<DeleteOutcome, CoreError> {
        self.touch();
        let mut t = self.tables.lock().unwrap();
        if !t.ads.iter().any(|a| a.id == id) {
            return Ok(DeleteOutcome::NotFound);
        }
        if t.reservations.iter().any(|r| r.ad_id == id && r.is_active()) {
            return Ok(DeleteOutcome::Reserved);
        }
        t.ads.retain(|a| a.id != id);
        t.reservations.retain(|r| r.ad_id != id);
        t.feedback.retain(|f| f.ad_id != id);
        Ok(DeleteOutcome::Deleted)
    }
}

#[async_trait]
impl ReservationRepository for InMemoryStore {
    async fn list_by_ad(&self, ad_id: DbId) -> Result<Vec<Reservation>, CoreError> {
        self.touch();
        let t = self.tables.lock().unwrap();
        Ok(t.reservations.iter().filter(|r| r.ad_id == ad_id).cloned().collect())
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryStore {
    async fn list_by_ad(&self, ad_id: DbId) -> Result<Vec<Feedback>, CoreError> {
        self.touch();
        let t = self.tables.lock().unwrap();
        Ok(t.feedback.iter().filter(|f| f.ad_id == ad_id).cloned().collect())
    }
}
