use crate::domain::{BookingId, BookingState, BookingStatus, ItemId, Page, UserId};
use crate::ports::booking_store::{
    BookingRecord, BookingStore as BookingStoreTrait, NewBookingRecord, Result,
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::sync::Mutex;

/// BookingStoreのインメモリ実装
///
/// テストと開発用。時間述語はドメインの`BookingState::matches`を
/// そのまま適用し、Postgres実装と同じ順序（start降順）・同じ
/// ページ計算で返す。
#[allow(dead_code)]
pub struct BookingStore {
    bookings: Mutex<HashMap<BookingId, BookingRecord>>,
    next_id: Mutex<i64>,
}

#[allow(dead_code)]
impl BookingStore {
    pub fn new() -> Self {
        Self {
            bookings: Mutex::new(HashMap::new()),
            next_id: Mutex::new(1),
        }
    }

    /// start降順に整列してページを切り出す共通パス
    fn page_of(mut records: Vec<BookingRecord>, page: Page) -> Vec<BookingRecord> {
        records.sort_by(|a, b| b.start.cmp(&a.start));
        records
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect()
    }
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingStoreTrait for BookingStore {
    async fn insert(&self, booking: NewBookingRecord) -> Result<BookingRecord> {
        let mut next_id = self.next_id.lock().unwrap();
        let id = BookingId::from_i64(*next_id);
        *next_id += 1;

        let record = BookingRecord {
            id,
            item_id: booking.item_id,
            item_name: booking.item_name,
            item_owner_id: booking.item_owner_id,
            booker_id: booking.booker_id,
            booker_name: booking.booker_name,
            start: booking.start,
            end: booking.end,
            status: booking.status,
        };
        self.bookings.lock().unwrap().insert(id, record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<BookingRecord>> {
        Ok(self.bookings.lock().unwrap().get(&booking_id).cloned())
    }

    async fn get_by_id_for_owner(
        &self,
        booking_id: BookingId,
        owner_id: UserId,
    ) -> Result<Option<BookingRecord>> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .get(&booking_id)
            .filter(|b| b.item_owner_id == owner_id)
            .cloned())
    }

    /// ロック下で読み書きするため、単一プロセス内ではCASが成立する
    async fn update_status(
        &self,
        booking_id: BookingId,
        expected: BookingStatus,
        next: BookingStatus,
    ) -> Result<Option<BookingRecord>> {
        let mut bookings = self.bookings.lock().unwrap();
        match bookings.get_mut(&booking_id) {
            Some(record) if record.status == expected => {
                record.status = next;
                Ok(Some(record.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn find_by_booker(
        &self,
        booker_id: UserId,
        state: BookingState,
        now: NaiveDateTime,
        page: Page,
    ) -> Result<Vec<BookingRecord>> {
        let records: Vec<BookingRecord> = self
            .bookings
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.booker_id == booker_id)
            .filter(|b| state.matches(b.start, b.end, b.status, now))
            .cloned()
            .collect();
        Ok(Self::page_of(records, page))
    }

    async fn find_by_items(
        &self,
        item_ids: &[ItemId],
        state: BookingState,
        now: NaiveDateTime,
        page: Page,
    ) -> Result<Vec<BookingRecord>> {
        let records: Vec<BookingRecord> = self
            .bookings
            .lock()
            .unwrap()
            .values()
            .filter(|b| item_ids.contains(&b.item_id))
            .filter(|b| state.matches(b.start, b.end, b.status, now))
            .cloned()
            .collect();
        Ok(Self::page_of(records, page))
    }

    async fn find_by_item_and_status(
        &self,
        item_id: ItemId,
        status: BookingStatus,
    ) -> Result<Vec<BookingRecord>> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.item_id == item_id && b.status == status)
            .cloned()
            .collect())
    }
}
