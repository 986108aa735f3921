use chrono::{DateTime, Duration, TimeZone, Utc};
use livestock_admin::announcement::{AnnouncementBoard, NewAnnouncement};
use livestock_admin::auction::{
    AuctionStatus, Category, Listing, ModerationAction, StatusEngine,
};
use livestock_admin::clock::{Clock, ManualClock};
use livestock_admin::error::AdminError;
use livestock_admin::gateway::{FailurePlan, Gateway, MemoryGateway};
use livestock_admin::notification::model::NotificationType;
use livestock_admin::notification::NotificationDispatcher;
use livestock_admin::profile::Profile;
use livestock_admin::scheduler::{AuctionSweeper, PruneOutcome};
use livestock_admin::view::TransactionView;
use std::sync::Arc;

/// 트레이싱 초기화 (여러 테스트에서 호출해도 안전)
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .without_time()
        .with_target(false)
        .with_test_writer()
        .try_init();
}

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn listing(id: &str, owner: &str, status: AuctionStatus, end: DateTime<Utc>) -> Listing {
    Listing {
        id: id.to_string(),
        category: Category::Carabao,
        breed: "Murrah".to_string(),
        age: 3,
        gender: "Female".to_string(),
        weight: 420.0,
        starting_price: 45_000,
        current_bid: None,
        owner_id: owner.to_string(),
        location: "Sariaya".to_string(),
        auction_start: end - Duration::days(3),
        auction_end: end,
        proof_of_ownership_ref: "ownership/L.pdf".to_string(),
        vet_certificate_ref: "vet/L.pdf".to_string(),
        status,
    }
}

struct Fixture {
    gateway: Arc<MemoryGateway>,
    clock: ManualClock,
    engine: Arc<StatusEngine>,
    sweeper: Arc<AuctionSweeper>,
}

/// 메모리 게이트웨이 + 수동 시계 구성
async fn setup(now: DateTime<Utc>) -> Fixture {
    init_tracing();
    let gateway = Arc::new(MemoryGateway::new());
    for profile in ["seller-1", "buyer-1", "buyer-2"] {
        gateway.add_profile(profile).await;
    }
    let clock = ManualClock::new(now);
    let dyn_gateway: Arc<dyn Gateway> = gateway.clone();
    let dyn_clock: Arc<dyn Clock> = Arc::new(clock.clone());
    let dispatcher = NotificationDispatcher::new(Arc::clone(&dyn_gateway), Arc::clone(&dyn_clock));
    Fixture {
        engine: Arc::new(StatusEngine::new(Arc::clone(&dyn_gateway), dispatcher)),
        sweeper: Arc::new(AuctionSweeper::new(dyn_gateway, dyn_clock)),
        gateway,
        clock,
    }
}

// region:    --- Status Engine

/// 승인: 판매자 알림 1건 + 판매자를 뺀 전체 공지
#[tokio::test]
async fn test_approve_notifies_seller_and_everyone_else() {
    let fx = setup(at(2024, 5, 1)).await;
    fx.gateway
        .insert_listing(listing("L1", "seller-1", AuctionStatus::Pending, at(2024, 5, 10)))
        .await
        .unwrap();

    let transition = fx.engine.approve("L1").await.unwrap();
    assert!(transition.applied);
    assert_eq!(transition.listing.status, AuctionStatus::Available);
    assert_eq!(
        fx.gateway.listing("L1").await.unwrap().status,
        AuctionStatus::Available
    );

    let notifications = fx.gateway.notifications().await;
    assert_eq!(notifications.len(), 2);
    let approved: Vec<_> = notifications
        .iter()
        .filter(|n| n.notification_type == NotificationType::AuctionApproved)
        .collect();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].seller_id.as_deref(), Some("seller-1"));

    let broadcast = notifications
        .iter()
        .find(|n| n.notification_type == NotificationType::NewAuction)
        .unwrap();
    assert!(broadcast.is_broadcast());
    assert_eq!(broadcast.created_at, at(2024, 5, 1));

    let mut recipients: Vec<String> = fx
        .gateway
        .recipients()
        .await
        .into_iter()
        .filter(|r| r.notification_id == broadcast.id)
        .map(|r| r.recipient_id)
        .collect();
    recipients.sort();
    assert_eq!(recipients, ["buyer-1", "buyer-2"]);
}

/// 같은 매물을 두 번 승인해도 알림은 한 번만
#[tokio::test]
async fn test_double_approve_is_idempotent() {
    let fx = setup(at(2024, 5, 1)).await;
    fx.gateway
        .insert_listing(listing("L1", "seller-1", AuctionStatus::Pending, at(2024, 5, 10)))
        .await
        .unwrap();

    assert!(fx.engine.approve("L1").await.unwrap().applied);
    let second = fx.engine.approve("L1").await.unwrap();
    assert!(!second.applied);
    assert_eq!(second.listing.status, AuctionStatus::Available);
    assert_eq!(fx.gateway.notifications().await.len(), 2);
}

/// 반려: 판매자 알림만, 전체 공지 없음
#[tokio::test]
async fn test_disapprove_notifies_only_the_seller() {
    let fx = setup(at(2024, 5, 1)).await;
    fx.gateway
        .insert_listing(listing("L2", "seller-1", AuctionStatus::Pending, at(2024, 5, 10)))
        .await
        .unwrap();

    let transition = fx
        .engine
        .apply("L2", ModerationAction::Disapprove)
        .await
        .unwrap();
    assert_eq!(transition.listing.status, AuctionStatus::Disapproved);

    let notifications = fx.gateway.notifications().await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(
        notifications[0].notification_type,
        NotificationType::AuctionDisapproved
    );
    assert!(fx.gateway.recipients().await.is_empty());

    // 다시 반려해도 알림 추가 없음
    assert!(!fx.engine.disapprove("L2").await.unwrap().applied);
    assert_eq!(fx.gateway.notifications().await.len(), 1);
}

/// 반려된 매물 승인은 거부
#[tokio::test]
async fn test_approve_after_disapprove_is_rejected() {
    let fx = setup(at(2024, 5, 1)).await;
    fx.gateway
        .insert_listing(listing("L3", "seller-1", AuctionStatus::Disapproved, at(2024, 5, 10)))
        .await
        .unwrap();

    let err = fx.engine.approve("L3").await.unwrap_err();
    assert!(matches!(
        err,
        AdminError::InvalidTransition {
            from: AuctionStatus::Disapproved,
            action: ModerationAction::Approve,
            ..
        }
    ));
    assert!(fx.gateway.notifications().await.is_empty());
}

#[tokio::test]
async fn test_unknown_listing_is_not_found() {
    let fx = setup(at(2024, 5, 1)).await;
    let err = fx.engine.approve("missing").await.unwrap_err();
    assert!(matches!(err, AdminError::NotFound(_)));
}

/// 조건부 갱신에서 다른 작업에 밀리면 알림 없이 no-op
#[tokio::test]
async fn test_lost_status_race_is_a_silent_noop() {
    let fx = setup(at(2024, 5, 1)).await;
    fx.gateway
        .insert_listing(listing("L1", "seller-1", AuctionStatus::Pending, at(2024, 5, 10)))
        .await
        .unwrap();
    fx.gateway
        .set_failures(FailurePlan {
            lost_updates: [("L1".to_string(), AuctionStatus::Available)].into(),
            ..Default::default()
        })
        .await;

    let transition = fx.engine.approve("L1").await.unwrap();
    assert!(!transition.applied);
    assert_eq!(transition.listing.status, AuctionStatus::Available);
    assert!(fx.gateway.notifications().await.is_empty());
}

/// 경합 중 다른 작업이 반려했다면 승인은 InvalidTransition
#[tokio::test]
async fn test_lost_race_to_other_action_is_rejected() {
    let fx = setup(at(2024, 5, 1)).await;
    fx.gateway
        .insert_listing(listing("L1", "seller-1", AuctionStatus::Pending, at(2024, 5, 10)))
        .await
        .unwrap();
    fx.gateway
        .set_failures(FailurePlan {
            lost_updates: [("L1".to_string(), AuctionStatus::Disapproved)].into(),
            ..Default::default()
        })
        .await;

    let err = fx.engine.approve("L1").await.unwrap_err();
    assert!(matches!(
        err,
        AdminError::InvalidTransition {
            from: AuctionStatus::Disapproved,
            action: ModerationAction::Approve,
            ..
        }
    ));
    assert_eq!(
        fx.gateway.listing("L1").await.unwrap().status,
        AuctionStatus::Disapproved
    );
    assert!(fx.gateway.notifications().await.is_empty());
}

/// 동시에 두 번 승인해도 적용과 알림은 한 번
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_approve_notifies_once() {
    for _ in 0..20 {
        let fx = setup(at(2024, 5, 1)).await;
        fx.gateway
            .insert_listing(listing("L1", "seller-1", AuctionStatus::Pending, at(2024, 5, 10)))
            .await
            .unwrap();

        let first = Arc::clone(&fx.engine);
        let second = Arc::clone(&fx.engine);
        let (a, b) = tokio::join!(
            tokio::spawn(async move { first.approve("L1").await }),
            tokio::spawn(async move { second.approve("L1").await }),
        );
        let (a, b) = (a.unwrap().unwrap(), b.unwrap().unwrap());
        assert_eq!(
            [a.applied, b.applied].iter().filter(|applied| **applied).count(),
            1
        );

        let notifications = fx.gateway.notifications().await;
        let count = |kind: NotificationType| {
            notifications
                .iter()
                .filter(|n| n.notification_type == kind)
                .count()
        };
        assert_eq!(count(NotificationType::AuctionApproved), 1);
        assert_eq!(count(NotificationType::NewAuction), 1);
    }
}

/// 상태 저장 실패 시 알림도 없음
#[tokio::test]
async fn test_status_write_failure_sends_nothing() {
    let fx = setup(at(2024, 5, 1)).await;
    fx.gateway
        .insert_listing(listing("L1", "seller-1", AuctionStatus::Pending, at(2024, 5, 10)))
        .await
        .unwrap();
    fx.gateway
        .set_failures(FailurePlan {
            status_updates: ["L1".to_string()].into(),
            ..Default::default()
        })
        .await;

    let err = fx.engine.approve("L1").await.unwrap_err();
    assert!(matches!(err, AdminError::Persistence(_)));
    assert_eq!(
        fx.gateway.listing("L1").await.unwrap().status,
        AuctionStatus::Pending
    );
    assert!(fx.gateway.notifications().await.is_empty());
}

// endregion: --- Status Engine

// region:    --- Notification Dispatcher

/// 판매자 외 수신자가 없으면 공지 행도 만들지 않는다
#[tokio::test]
async fn test_fan_out_without_recipients_is_a_noop() {
    init_tracing();
    let gateway = Arc::new(MemoryGateway::new());
    gateway.add_profile("seller-1").await;
    let dispatcher = NotificationDispatcher::new(
        gateway.clone(),
        Arc::new(ManualClock::new(at(2024, 5, 1))),
    );

    let fan_out = dispatcher
        .notify_new_auction("L1", Category::Goat, "seller-1")
        .await
        .unwrap();
    assert_eq!(fan_out.notification, None);
    assert_eq!(fan_out.recipients, 0);
    assert!(gateway.notifications().await.is_empty());
}

/// 수신자 추가 실패: 공지 행은 남고 부분 실패로 보고
#[tokio::test]
async fn test_recipient_insert_failure_reports_orphaned_notification() {
    let fx = setup(at(2024, 5, 1)).await;
    fx.gateway
        .insert_listing(listing("L1", "seller-1", AuctionStatus::Pending, at(2024, 5, 10)))
        .await
        .unwrap();
    fx.gateway
        .set_failures(FailurePlan {
            recipient_insert: true,
            ..Default::default()
        })
        .await;

    let err = fx.engine.approve("L1").await.unwrap_err();
    let AdminError::PartialFailure(report) = err else {
        panic!("expected partial failure, got {err:?}");
    };
    assert_eq!(report.operation, "notification fan-out");
    assert_eq!(report.failed.len(), 2);

    // 상태는 이미 반영되었고 판매자 알림도 발송됨
    assert_eq!(
        fx.gateway.listing("L1").await.unwrap().status,
        AuctionStatus::Available
    );
    let notifications = fx.gateway.notifications().await;
    assert_eq!(notifications.len(), 2);
    assert!(fx.gateway.recipients().await.is_empty());
}

// endregion: --- Notification Dispatcher

// region:    --- Sweeper

/// 종료 시각이 지나면 AUCTION_ENDED, 입찰이 없으면 삭제
#[tokio::test]
async fn test_expire_then_prune_removes_unbid_listing() {
    let fx = setup(at(2024, 5, 31)).await;
    fx.gateway
        .insert_listing(listing("L1", "seller-1", AuctionStatus::Available, at(2024, 6, 1)))
        .await
        .unwrap();

    // 종료 전에는 변화 없음
    let report = fx.sweeper.expire_pass().await.unwrap();
    assert!(report.succeeded.is_empty());

    fx.clock.set(at(2024, 6, 1) + Duration::seconds(1));
    let report = fx.sweeper.expire_pass().await.unwrap();
    assert_eq!(report.succeeded, ["L1"]);
    assert_eq!(
        fx.gateway.listing("L1").await.unwrap().status,
        AuctionStatus::AuctionEnded
    );
    // 자연 종료는 알림 없음
    assert!(fx.gateway.notifications().await.is_empty());

    let report = fx.sweeper.prune_pass().await.unwrap();
    assert_eq!(report.succeeded, ["L1"]);
    assert!(fx.gateway.listing("L1").await.is_none());
}

/// 종료 시각과 정확히 같은 시각에는 만료하지 않는다
#[tokio::test]
async fn test_expire_requires_end_strictly_before_now() {
    let fx = setup(at(2024, 6, 1)).await;
    fx.gateway
        .insert_listing(listing("L1", "seller-1", AuctionStatus::Available, at(2024, 6, 1)))
        .await
        .unwrap();

    let report = fx.sweeper.expire_pass().await.unwrap();
    assert!(report.succeeded.is_empty());
    assert_eq!(
        fx.gateway.listing("L1").await.unwrap().status,
        AuctionStatus::Available
    );
}

#[tokio::test]
async fn test_prune_keeps_listing_with_bids() {
    let fx = setup(at(2024, 6, 2)).await;
    fx.gateway
        .insert_listing(listing("L1", "seller-1", AuctionStatus::AuctionEnded, at(2024, 6, 1)))
        .await
        .unwrap();
    fx.gateway.add_bid("L1", "buyer-1").await;

    let report = fx.sweeper.prune_pass().await.unwrap();
    assert_eq!(report.skipped, ["L1"]);
    assert!(fx.gateway.listing("L1").await.is_some());
}

/// 입찰 조회 실패는 해당 매물만 실패, 나머지는 계속 정리
#[tokio::test]
async fn test_prune_continues_past_bid_lookup_failure() {
    let fx = setup(at(2024, 6, 2)).await;
    for id in ["L1", "L2", "L3"] {
        fx.gateway
            .insert_listing(listing(id, "seller-1", AuctionStatus::AuctionEnded, at(2024, 6, 1)))
            .await
            .unwrap();
    }
    fx.gateway
        .set_failures(FailurePlan {
            bid_lookups: ["L2".to_string()].into(),
            ..Default::default()
        })
        .await;

    let err = fx.sweeper.prune_pass().await.unwrap_err();
    let AdminError::PartialFailure(report) = err else {
        panic!("expected partial failure, got {err:?}");
    };
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].id, "L2");
    assert_eq!(report.succeeded.len(), 2);
    assert!(fx.gateway.listing("L1").await.is_none());
    assert!(fx.gateway.listing("L2").await.is_some());
    assert!(fx.gateway.listing("L3").await.is_none());
}

#[tokio::test]
async fn test_expire_reports_update_failure_and_continues() {
    let fx = setup(at(2024, 6, 2)).await;
    for id in ["L1", "L2"] {
        fx.gateway
            .insert_listing(listing(id, "seller-1", AuctionStatus::Available, at(2024, 6, 1)))
            .await
            .unwrap();
    }
    fx.gateway
        .set_failures(FailurePlan {
            status_updates: ["L1".to_string()].into(),
            ..Default::default()
        })
        .await;

    let AdminError::PartialFailure(report) = fx.sweeper.expire_pass().await.unwrap_err() else {
        panic!("expected partial failure");
    };
    assert_eq!(report.succeeded, ["L2"]);
    assert_eq!(report.failed[0].id, "L1");
}

/// 반복 실행해도 결과가 같다
#[tokio::test]
async fn test_sweep_is_repeatable() {
    let fx = setup(at(2024, 6, 2)).await;
    fx.gateway
        .insert_listing(listing("L1", "seller-1", AuctionStatus::Available, at(2024, 6, 1)))
        .await
        .unwrap();

    let first = fx.sweeper.run_once().await;
    assert_eq!(first.expire.as_ref().unwrap().succeeded, ["L1"]);
    assert_eq!(first.prune.as_ref().unwrap().succeeded, ["L1"]);

    let second = fx.sweeper.run_once().await;
    assert!(second.expire.unwrap().succeeded.is_empty());
    assert!(second.prune.unwrap().succeeded.is_empty());
}

#[tokio::test]
async fn test_prune_listing_reports_gone_when_already_removed() {
    let fx = setup(at(2024, 6, 2)).await;
    let outcome = fx.sweeper.prune_listing("missing").await.unwrap();
    assert_eq!(outcome, PruneOutcome::Gone);
}

/// 같은 매물에 대한 변경 이벤트는 쓰기 순서대로 도착
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_change_events_follow_write_order() {
    use livestock_admin::gateway::ChangeEvent;

    for _ in 0..20 {
        let fx = setup(at(2024, 6, 2)).await;
        fx.gateway
            .insert_listing(listing("L1", "seller-1", AuctionStatus::Pending, at(2024, 6, 1)))
            .await
            .unwrap();
        let mut changes = fx.gateway.subscribe();

        let engine = Arc::clone(&fx.engine);
        let sweeper = Arc::clone(&fx.sweeper);
        let (approved, expired) = tokio::join!(
            tokio::spawn(async move { engine.approve("L1").await }),
            tokio::spawn(async move { sweeper.expire_pass().await }),
        );
        approved.unwrap().unwrap();
        expired.unwrap().unwrap();

        let mut last = None;
        while let Ok(event) = changes.try_recv() {
            if let ChangeEvent::Updated { listing } = event {
                last = Some(listing.status);
            }
        }
        let stored = fx.gateway.listing("L1").await.unwrap().status;
        assert_eq!(last, Some(stored));
    }
}

/// 주기 실행은 한 주기 뒤에 시작 (시작 시 정리와 겹치지 않음)
#[tokio::test]
async fn test_periodic_sweep_waits_one_period() {
    let fx = setup(at(2024, 6, 2)).await;
    fx.gateway
        .insert_listing(listing("L1", "seller-1", AuctionStatus::Available, at(2024, 6, 1)))
        .await
        .unwrap();

    let handle = fx.sweeper.start(tokio::time::Duration::from_secs(3600));
    tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;
    handle.abort();

    assert_eq!(
        fx.gateway.listing("L1").await.unwrap().status,
        AuctionStatus::Available
    );
}

/// 엔진 호출 중 정리가 끝나 삭제된 매물이 화면 사본에 되살아나지 않음
#[tokio::test]
async fn test_sweep_during_confirm_does_not_resurrect_listing() {
    let fx = setup(at(2023, 12, 1)).await;
    fx.gateway
        .insert_listing(listing("L1", "seller-1", AuctionStatus::Pending, at(2024, 1, 1)))
        .await
        .unwrap();
    let mut view = TransactionView::new(10);
    view.reload(fx.gateway.as_ref(), None).await.unwrap();
    let mut changes = fx.gateway.subscribe();

    let transition = fx.engine.approve("L1").await.unwrap();
    fx.clock.set(at(2024, 6, 1));
    let summary = fx.sweeper.run_once().await;
    assert_eq!(summary.prune.unwrap().succeeded, ["L1"]);

    // 변경 구독 반영 후 엔진 결과 기록
    while let Ok(event) = changes.try_recv() {
        view.apply_change(event);
    }
    view.record_transition(&transition);

    assert!(fx.gateway.listing("L1").await.is_none());
    assert!(view.listings().is_empty());
}

/// 변경 구독: 외부에서 AUCTION_ENDED 로 바뀐 매물을 바로 정리
#[tokio::test]
async fn test_watch_changes_prunes_ended_listing() {
    let fx = setup(at(2024, 6, 2)).await;
    fx.gateway
        .insert_listing(listing("L1", "seller-1", AuctionStatus::Available, at(2024, 6, 1)))
        .await
        .unwrap();
    let watcher = fx.sweeper.watch_changes();

    fx.gateway
        .replace_listing(listing("L1", "seller-1", AuctionStatus::AuctionEnded, at(2024, 6, 1)))
        .await
        .unwrap();

    let mut removed = false;
    for _ in 0..50 {
        if fx.gateway.listing("L1").await.is_none() {
            removed = true;
            break;
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;
    }
    watcher.abort();
    assert!(removed, "listing should be pruned by the change watcher");
}

// endregion: --- Sweeper

// region:    --- Announcements / Users

#[tokio::test]
async fn test_announcements_are_listed_newest_first() {
    let fx = setup(at(2024, 5, 1)).await;
    let board = AnnouncementBoard::new(fx.gateway.clone(), Arc::new(fx.clock.clone()));

    board
        .post(NewAnnouncement {
            title: "Upcoming auction".to_string(),
            content: "Monday".to_string(),
        })
        .await
        .unwrap();
    fx.clock.advance(Duration::hours(1));
    let latest = board
        .post(NewAnnouncement {
            title: " Schedule change ".to_string(),
            content: "Tuesday".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(latest.title, "Schedule change");
    assert_eq!(latest.created_at, at(2024, 5, 1) + Duration::hours(1));

    let titles: Vec<String> = board
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.title)
        .collect();
    assert_eq!(titles, ["Schedule change", "Upcoming auction"]);
}

#[tokio::test]
async fn test_announcement_errors_are_surfaced() {
    let fx = setup(at(2024, 5, 1)).await;
    let board = AnnouncementBoard::new(fx.gateway.clone(), Arc::new(fx.clock.clone()));

    let err = board
        .post(NewAnnouncement {
            title: String::new(),
            content: "body".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::Validation(_)));

    fx.gateway
        .set_failures(FailurePlan {
            announcement_insert: true,
            announcement_select: true,
            ..Default::default()
        })
        .await;
    let err = board
        .post(NewAnnouncement {
            title: "title".to_string(),
            content: "body".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::Persistence(_)));
    assert!(matches!(
        board.list().await.unwrap_err(),
        AdminError::Persistence(_)
    ));
}

/// 판매자/입찰자 여부는 매물과 입찰 기록에서 계산
#[tokio::test]
async fn test_users_carry_bidder_and_seller_flags() {
    let fx = setup(at(2024, 5, 1)).await;
    fx.gateway
        .insert_profile(Profile {
            id: "agent-9".to_string(),
            full_name: "Jane Reyes".to_string(),
            location: "Lucena City".to_string(),
            phone: "09170000000".to_string(),
        })
        .await;
    fx.gateway
        .insert_listing(listing("L1", "seller-1", AuctionStatus::Available, at(2024, 5, 10)))
        .await
        .unwrap();
    fx.gateway.add_bid("L1", "buyer-1").await;

    let users = fx.gateway.select_users().await.unwrap();
    let ids: Vec<&str> = users.iter().map(|u| u.profile.id.as_str()).collect();
    assert_eq!(ids, ["agent-9", "buyer-1", "buyer-2", "seller-1"]);

    let flags: Vec<(bool, bool)> = users.iter().map(|u| (u.is_bidder, u.is_seller)).collect();
    assert_eq!(
        flags,
        [(false, false), (true, false), (false, false), (false, true)]
    );
    assert_eq!(users[0].profile.location, "Lucena City");
}

// endregion: --- Announcements / Users
