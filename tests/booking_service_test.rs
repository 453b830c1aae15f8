use borrowhub::adapters::mock::{BookingStore, ItemCatalog, UserDirectory};
use borrowhub::application::booking::{
    BookingApplicationError, ServiceDependencies, booking_annotations, create_booking,
    decide_booking, find_booking, list_bookings_for_booker, list_bookings_for_owner,
};
use borrowhub::domain::commands::{CreateBooking, DecideBooking};
use borrowhub::domain::{BookingState, BookingStatus, ItemId, Page, UserId};
use borrowhub::ports::booking_store::BookingStore as _;
use chrono::{Duration, NaiveDateTime};
use std::sync::Arc;

// ============================================================================
// テスト用のセットアップ
// ============================================================================

struct TestContext {
    deps: ServiceDependencies,
    booking_store: Arc<BookingStore>,
    user_directory: Arc<UserDirectory>,
    item_catalog: Arc<ItemCatalog>,
}

/// インメモリアダプター一式で依存関係を組み立てる
fn setup() -> TestContext {
    let booking_store = Arc::new(BookingStore::new());
    let user_directory = Arc::new(UserDirectory::new());
    let item_catalog = Arc::new(ItemCatalog::new());

    let deps = ServiceDependencies {
        booking_store: booking_store.clone(),
        user_directory: user_directory.clone(),
        item_catalog: item_catalog.clone(),
    };

    TestContext {
        deps,
        booking_store,
        user_directory,
        item_catalog,
    }
}

/// 現在時刻からの相対時刻（一覧系が内部でローカル現在時刻を使うため）
fn hours_from_now(hours: i64) -> NaiveDateTime {
    chrono::Local::now().naive_local() + Duration::hours(hours)
}

/// 予約者・所有者・アイテムを登録する定番の構成
///
/// booker=5, owner=7, item=10（予約可能）
fn setup_booker_owner_item(ctx: &TestContext) -> (UserId, UserId, ItemId) {
    let booker = UserId::from_i64(5);
    let owner = UserId::from_i64(7);
    let item = ItemId::from_i64(10);

    ctx.user_directory.add_user(booker, "booker");
    ctx.user_directory.add_user(owner, "owner");
    ctx.item_catalog.add_item(item, "drill", owner, true);

    (booker, owner, item)
}

// ============================================================================
// 作成のテスト
// ============================================================================

#[tokio::test]
async fn test_create_booking_success() {
    let ctx = setup();
    let (booker, _owner, item) = setup_booker_owner_item(&ctx);

    let cmd = CreateBooking {
        item_id: item,
        start: hours_from_now(24),
        end: hours_from_now(48),
    };

    let record = create_booking(&ctx.deps, booker, cmd).await.unwrap();

    // 作成直後は必ずWAITING
    assert_eq!(record.status, BookingStatus::Waiting);
    assert_eq!(record.item_id.value(), 10);
    assert_eq!(record.booker_id.value(), 5);
    // 表示名は作成時に解決される
    assert_eq!(record.item_name, "drill");
    assert_eq!(record.booker_name, "booker");

    // 永続化されていることを確認
    let stored = ctx.booking_store.get_by_id(record.id).await.unwrap();
    assert_eq!(stored, Some(record));
}

#[tokio::test]
async fn test_create_booking_end_not_after_start() {
    let ctx = setup();
    let (booker, _owner, item) = setup_booker_owner_item(&ctx);

    let start = hours_from_now(24);

    // end == start
    let result = create_booking(
        &ctx.deps,
        booker,
        CreateBooking {
            item_id: item,
            start,
            end: start,
        },
    )
    .await;
    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::InvalidBookingRange
    ));

    // end < start
    let result = create_booking(
        &ctx.deps,
        booker,
        CreateBooking {
            item_id: item,
            start,
            end: start - Duration::hours(1),
        },
    )
    .await;
    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::InvalidBookingRange
    ));
}

#[tokio::test]
async fn test_create_booking_user_not_found() {
    let ctx = setup();
    let (_booker, _owner, item) = setup_booker_owner_item(&ctx);

    let result = create_booking(
        &ctx.deps,
        UserId::from_i64(999),
        CreateBooking {
            item_id: item,
            start: hours_from_now(1),
            end: hours_from_now(2),
        },
    )
    .await;

    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::UserNotFound(_)
    ));
}

#[tokio::test]
async fn test_create_booking_item_not_found() {
    let ctx = setup();
    let (booker, _owner, _item) = setup_booker_owner_item(&ctx);

    let result = create_booking(
        &ctx.deps,
        booker,
        CreateBooking {
            item_id: ItemId::from_i64(999),
            start: hours_from_now(1),
            end: hours_from_now(2),
        },
    )
    .await;

    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::ItemNotFound(_)
    ));
}

#[tokio::test]
async fn test_create_booking_item_not_available() {
    let ctx = setup();
    let (booker, _owner, item) = setup_booker_owner_item(&ctx);
    ctx.item_catalog.set_available(item, false);

    let result = create_booking(
        &ctx.deps,
        booker,
        CreateBooking {
            item_id: item,
            start: hours_from_now(1),
            end: hours_from_now(2),
        },
    )
    .await;

    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::ItemNotAvailable
    ));
}

#[tokio::test]
async fn test_create_booking_own_item_forbidden() {
    let ctx = setup();
    let (_booker, owner, item) = setup_booker_owner_item(&ctx);

    // 所有者自身による予約は可否フラグに関わらず失敗
    let result = create_booking(
        &ctx.deps,
        owner,
        CreateBooking {
            item_id: item,
            start: hours_from_now(1),
            end: hours_from_now(2),
        },
    )
    .await;

    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::SelfBookingForbidden
    ));

    // レコードは作成されていない
    let all = list_bookings_for_owner(&ctx.deps, owner, BookingState::All, Page::default())
        .await
        .unwrap();
    assert!(all.is_empty());
}

// ============================================================================
// 承認／却下のテスト
// ============================================================================

#[tokio::test]
async fn test_decide_booking_approve_then_terminal() {
    let ctx = setup();
    let (booker, owner, item) = setup_booker_owner_item(&ctx);

    let record = create_booking(
        &ctx.deps,
        booker,
        CreateBooking {
            item_id: item,
            start: hours_from_now(24),
            end: hours_from_now(48),
        },
    )
    .await
    .unwrap();

    // 所有者が承認
    let updated = decide_booking(
        &ctx.deps,
        owner,
        DecideBooking {
            booking_id: record.id,
            approved: true,
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.status, BookingStatus::Approved);

    // 二度目の遷移は状態を問わず失敗（終端状態）
    let result = decide_booking(
        &ctx.deps,
        owner,
        DecideBooking {
            booking_id: record.id,
            approved: false,
        },
    )
    .await;
    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::InvalidStateTransition
    ));

    // ステータスはAPPROVEDのまま
    let stored = ctx
        .booking_store
        .get_by_id(record.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, BookingStatus::Approved);
}

#[tokio::test]
async fn test_decide_booking_reject() {
    let ctx = setup();
    let (booker, owner, item) = setup_booker_owner_item(&ctx);

    let record = create_booking(
        &ctx.deps,
        booker,
        CreateBooking {
            item_id: item,
            start: hours_from_now(24),
            end: hours_from_now(48),
        },
    )
    .await
    .unwrap();

    let updated = decide_booking(
        &ctx.deps,
        owner,
        DecideBooking {
            booking_id: record.id,
            approved: false,
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.status, BookingStatus::Rejected);
}

#[tokio::test]
async fn test_decide_booking_by_non_owner_is_not_found() {
    let ctx = setup();
    let (booker, _owner, item) = setup_booker_owner_item(&ctx);

    let record = create_booking(
        &ctx.deps,
        booker,
        CreateBooking {
            item_id: item,
            start: hours_from_now(24),
            end: hours_from_now(48),
        },
    )
    .await
    .unwrap();

    // 予約者本人でも所有者でなければ更新できず、存在しない扱いになる
    let result = decide_booking(
        &ctx.deps,
        booker,
        DecideBooking {
            booking_id: record.id,
            approved: true,
        },
    )
    .await;
    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::BookingNotFound(_)
    ));
}

#[tokio::test]
async fn test_decide_booking_unknown_user() {
    let ctx = setup();
    let (booker, _owner, item) = setup_booker_owner_item(&ctx);

    let record = create_booking(
        &ctx.deps,
        booker,
        CreateBooking {
            item_id: item,
            start: hours_from_now(24),
            end: hours_from_now(48),
        },
    )
    .await
    .unwrap();

    let result = decide_booking(
        &ctx.deps,
        UserId::from_i64(999),
        DecideBooking {
            booking_id: record.id,
            approved: true,
        },
    )
    .await;
    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::UserNotFound(_)
    ));
}

// ============================================================================
// 取得のテスト
// ============================================================================

#[tokio::test]
async fn test_find_booking_visibility() {
    let ctx = setup();
    let (booker, owner, item) = setup_booker_owner_item(&ctx);
    let stranger = UserId::from_i64(99);
    ctx.user_directory.add_user(stranger, "stranger");

    let record = create_booking(
        &ctx.deps,
        booker,
        CreateBooking {
            item_id: item,
            start: hours_from_now(24),
            end: hours_from_now(48),
        },
    )
    .await
    .unwrap();

    // 予約者本人と所有者は閲覧可能
    assert!(find_booking(&ctx.deps, booker, record.id).await.is_ok());
    assert!(find_booking(&ctx.deps, owner, record.id).await.is_ok());

    // 第三者には存在しない扱い
    let result = find_booking(&ctx.deps, stranger, record.id).await;
    assert!(matches!(
        result.unwrap_err(),
        BookingApplicationError::BookingNotFound(_)
    ));
}

// ============================================================================
// 一覧のテスト
// ============================================================================

#[tokio::test]
async fn test_list_for_booker_all_orders_start_descending() {
    let ctx = setup();
    let (booker, _owner, item) = setup_booker_owner_item(&ctx);

    for (start_h, end_h) in [(24, 48), (72, 96), (1, 2)] {
        create_booking(
            &ctx.deps,
            booker,
            CreateBooking {
                item_id: item,
                start: hours_from_now(start_h),
                end: hours_from_now(end_h),
            },
        )
        .await
        .unwrap();
    }

    let all = list_bookings_for_booker(&ctx.deps, booker, BookingState::All, Page::default())
        .await
        .unwrap();

    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|w| w[0].start >= w[1].start));
}

#[tokio::test]
async fn test_list_for_booker_temporal_states() {
    let ctx = setup();
    let (booker, owner, item) = setup_booker_owner_item(&ctx);

    // past [-48h, -24h] / current [-1h, +24h] / future [+24h, +48h]
    let mut ids = Vec::new();
    for (start_h, end_h) in [(-48, -24), (-1, 24), (24, 48)] {
        let record = create_booking(
            &ctx.deps,
            booker,
            CreateBooking {
                item_id: item,
                start: hours_from_now(start_h),
                end: hours_from_now(end_h),
            },
        )
        .await
        .unwrap();
        ids.push(record.id);
    }
    // futureの予約を却下しておく（REJECTEDビュー用）
    decide_booking(
        &ctx.deps,
        owner,
        DecideBooking {
            booking_id: ids[2],
            approved: false,
        },
    )
    .await
    .unwrap();

    let page = Page::default();

    let current = list_bookings_for_booker(&ctx.deps, booker, BookingState::Current, page)
        .await
        .unwrap();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].id, ids[1]);

    let past = list_bookings_for_booker(&ctx.deps, booker, BookingState::Past, page)
        .await
        .unwrap();
    assert_eq!(past.len(), 1);
    assert_eq!(past[0].id, ids[0]);

    let future = list_bookings_for_booker(&ctx.deps, booker, BookingState::Future, page)
        .await
        .unwrap();
    assert_eq!(future.len(), 1);
    assert_eq!(future[0].id, ids[2]);

    let rejected = list_bookings_for_booker(&ctx.deps, booker, BookingState::Rejected, page)
        .await
        .unwrap();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].id, ids[2]);

    // 現在進行中のWAITING予約（ids[1]）はWAITINGビューに出ない
    let waiting = list_bookings_for_booker(&ctx.deps, booker, BookingState::Waiting, page)
        .await
        .unwrap();
    assert!(waiting.is_empty());
}

#[tokio::test]
async fn test_list_for_booker_waiting_requires_future_start() {
    let ctx = setup();
    let (booker, _owner, item) = setup_booker_owner_item(&ctx);

    // 未開始のWAITING予約はWAITINGビューに出る
    create_booking(
        &ctx.deps,
        booker,
        CreateBooking {
            item_id: item,
            start: hours_from_now(24),
            end: hours_from_now(48),
        },
    )
    .await
    .unwrap();

    let waiting =
        list_bookings_for_booker(&ctx.deps, booker, BookingState::Waiting, Page::default())
            .await
            .unwrap();
    assert_eq!(waiting.len(), 1);
    assert_eq!(waiting[0].status, BookingStatus::Waiting);
}

#[tokio::test]
async fn test_list_for_owner_all() {
    let ctx = setup();
    let (booker, owner, item) = setup_booker_owner_item(&ctx);

    // 別の所有者のアイテムへの予約は混ざらない
    let other_owner = UserId::from_i64(8);
    let other_item = ItemId::from_i64(11);
    ctx.user_directory.add_user(other_owner, "other owner");
    ctx.item_catalog.add_item(other_item, "ladder", other_owner, true);

    create_booking(
        &ctx.deps,
        booker,
        CreateBooking {
            item_id: item,
            start: hours_from_now(24),
            end: hours_from_now(48),
        },
    )
    .await
    .unwrap();
    create_booking(
        &ctx.deps,
        booker,
        CreateBooking {
            item_id: other_item,
            start: hours_from_now(24),
            end: hours_from_now(48),
        },
    )
    .await
    .unwrap();

    let owned = list_bookings_for_owner(&ctx.deps, owner, BookingState::All, Page::default())
        .await
        .unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].item_id, item);
}

#[tokio::test]
async fn test_list_for_owner_without_items_is_empty() {
    let ctx = setup();
    let no_items = UserId::from_i64(42);
    ctx.user_directory.add_user(no_items, "empty handed");

    // アイテムを持たない所有者はエラーではなく空の一覧
    let result = list_bookings_for_owner(&ctx.deps, no_items, BookingState::All, Page::default())
        .await
        .unwrap();
    assert!(result.is_empty());
}

#[tokio::test]
async fn test_list_pagination_page_quirk() {
    let ctx = setup();
    let (booker, _owner, item) = setup_booker_owner_item(&ctx);

    for h in 1..=5 {
        create_booking(
            &ctx.deps,
            booker,
            CreateBooking {
                item_id: item,
                start: hours_from_now(h * 24),
                end: hours_from_now(h * 24 + 1),
            },
        )
        .await
        .unwrap();
    }

    // from=2, size=2 → ページ1 → 3・4件目（start降順）
    let page = list_bookings_for_booker(&ctx.deps, booker, BookingState::All, Page::new(2, 2))
        .await
        .unwrap();
    assert_eq!(page.len(), 2);

    // from=3, size=2 はページ境界に切り捨てられ、from=2と同じページになる
    let same_page =
        list_bookings_for_booker(&ctx.deps, booker, BookingState::All, Page::new(3, 2))
            .await
            .unwrap();
    assert_eq!(page, same_page);
}

// ============================================================================
// アノテーションのテスト
// ============================================================================

#[tokio::test]
async fn test_booking_annotations_last_and_next() {
    let ctx = setup();
    let (booker, owner, item) = setup_booker_owner_item(&ctx);

    // past two / future two, すべて承認
    let mut ids = Vec::new();
    for (start_h, end_h) in [(-96, -72), (-48, -24), (24, 48), (72, 96)] {
        let record = create_booking(
            &ctx.deps,
            booker,
            CreateBooking {
                item_id: item,
                start: hours_from_now(start_h),
                end: hours_from_now(end_h),
            },
        )
        .await
        .unwrap();
        decide_booking(
            &ctx.deps,
            owner,
            DecideBooking {
                booking_id: record.id,
                approved: true,
            },
        )
        .await
        .unwrap();
        ids.push(record.id);
    }

    let now = chrono::Local::now().naive_local();
    let annotations = booking_annotations(&ctx.deps, item, now).await.unwrap();

    // last: 開始済みのうちendが最大 / next: 未開始のうちstartが最小
    assert_eq!(annotations.last.unwrap().id, ids[1]);
    assert_eq!(annotations.next.unwrap().id, ids[2]);
}

#[tokio::test]
async fn test_booking_annotations_ignore_waiting() {
    let ctx = setup();
    let (booker, _owner, item) = setup_booker_owner_item(&ctx);

    // WAITINGのままの予約はアノテーションに現れない
    create_booking(
        &ctx.deps,
        booker,
        CreateBooking {
            item_id: item,
            start: hours_from_now(24),
            end: hours_from_now(48),
        },
    )
    .await
    .unwrap();

    let now = chrono::Local::now().naive_local();
    let annotations = booking_annotations(&ctx.deps, item, now).await.unwrap();
    assert!(annotations.last.is_none());
    assert!(annotations.next.is_none());
}
