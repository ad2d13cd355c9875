mod common;

use chrono::{Duration, Utc};
use common::*;
use raffle_backend::entities::participant_entity as participants;
use raffle_backend::error::{AppError, EntityKind};
use raffle_backend::models::{
    AddPrizeRequest, CreateLotteryRequest, RegisterParticipantRequest, RegistrationOutcome,
};
use raffle_backend::services::{DrawService, LotteryService};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

#[tokio::test]
async fn test_create_lottery_and_get_detail() {
    let pool = setup_pool().await;
    let service = LotteryService::new(pool.clone());

    let lottery = active_lottery(&service, "Spring Raffle").await;
    add_prize(&service, lottery.id, "First Prize", 1).await;
    add_prize(&service, lottery.id, "Second Prize", 2).await;
    register(&service, lottery.id, "user1").await;
    register(&service, lottery.id, "user2").await;

    let detail = service.get_lottery(lottery.id).await.unwrap();
    assert_eq!(detail.name, "Spring Raffle");
    assert_eq!(detail.participants_count, 2);
    assert_eq!(detail.prizes.len(), 2);
    assert_eq!(detail.prizes[0].name, "First Prize");
    assert_eq!(detail.prizes[1].quantity, 2);
    assert_eq!(detail.prizes[1].remaining, 2);
}

#[tokio::test]
async fn test_create_lottery_rejects_invalid_window() {
    let pool = setup_pool().await;
    let service = LotteryService::new(pool);
    let now = Utc::now();

    let err = service
        .create_lottery(CreateLotteryRequest {
            name: "Backwards".into(),
            description: None,
            start_time: now,
            end_time: now - Duration::hours(1),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let err = service
        .create_lottery(CreateLotteryRequest {
            name: "".into(),
            description: None,
            start_time: now,
            end_time: now + Duration::hours(1),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn test_add_prize_validation_and_missing_lottery() {
    let pool = setup_pool().await;
    let service = LotteryService::new(pool);
    let lottery = active_lottery(&service, "L").await;

    let err = service
        .add_prize(
            lottery.id,
            AddPrizeRequest {
                name: "Zero".into(),
                description: None,
                quantity: 0,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let err = service
        .add_prize(
            9999,
            AddPrizeRequest {
                name: "Orphan".into(),
                description: None,
                quantity: 1,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::NotFound {
            kind: EntityKind::Lottery,
            id: 9999
        }
    ));
}

#[tokio::test]
async fn test_duplicate_registration_is_idempotent() {
    let pool = setup_pool().await;
    let service = LotteryService::new(pool.clone());
    let lottery = active_lottery(&service, "L").await;

    let req = RegisterParticipantRequest {
        user_id: "alice".into(),
        user_name: Some("Alice".into()),
    };
    let first = service
        .register_participant(lottery.id, req.clone())
        .await
        .unwrap();
    let second = service.register_participant(lottery.id, req).await.unwrap();

    assert_eq!(first, RegistrationOutcome::Registered);
    assert_eq!(second, RegistrationOutcome::AlreadyRegistered);

    let rows = participants::Entity::find()
        .filter(participants::Column::LotteryId.eq(lottery.id))
        .count(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn test_register_rejects_missing_or_inactive_lottery() {
    let pool = setup_pool().await;
    let service = LotteryService::new(pool);
    let now = Utc::now();

    let err = service
        .register_participant(
            42,
            RegisterParticipantRequest {
                user_id: "bob".into(),
                user_name: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { kind: EntityKind::Lottery, .. }));

    let ended = service
        .create_lottery(CreateLotteryRequest {
            name: "Ended".into(),
            description: None,
            start_time: now - Duration::days(2),
            end_time: now - Duration::days(1),
        })
        .await
        .unwrap();
    let upcoming = service
        .create_lottery(CreateLotteryRequest {
            name: "Upcoming".into(),
            description: None,
            start_time: now + Duration::days(1),
            end_time: now + Duration::days(2),
        })
        .await
        .unwrap();

    for lottery_id in [ended.id, upcoming.id] {
        let err = service
            .register_participant(
                lottery_id,
                RegisterParticipantRequest {
                    user_id: "bob".into(),
                    user_name: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InactiveLottery(id) if id == lottery_id));
    }
}

#[tokio::test]
async fn test_get_all_lotteries_newest_first() {
    let pool = setup_pool().await;
    let service = LotteryService::new(pool);

    let first = active_lottery(&service, "first").await;
    let second = active_lottery(&service, "second").await;
    let third = active_lottery(&service, "third").await;

    let ids: Vec<i64> = service
        .get_all_lotteries()
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.id)
        .collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[tokio::test]
async fn test_get_lottery_not_found() {
    let pool = setup_pool().await;
    let service = LotteryService::new(pool);
    let err = service.get_lottery(123).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { kind: EntityKind::Lottery, id: 123 }));
}

#[tokio::test]
async fn test_delete_lottery_cascades() {
    let pool = setup_pool().await;
    let service = LotteryService::new(pool.clone());
    let draws = DrawService::new(pool.clone());

    let lottery = active_lottery(&service, "Doomed").await;
    let prize = add_prize(&service, lottery.id, "P", 1).await;
    register(&service, lottery.id, "u1").await;
    draws.draw(lottery.id, prize.id).await.unwrap();

    let result = service.delete_lottery(lottery.id).await.unwrap();
    assert!(result.success);

    assert!(matches!(
        service.get_lottery(lottery.id).await,
        Err(AppError::NotFound { .. })
    ));
    assert!(service.get_winners(lottery.id).await.unwrap().is_empty());
    assert_eq!(winner_count(&pool, prize.id).await, 0);
    let remaining_participants = participants::Entity::find()
        .filter(participants::Column::LotteryId.eq(lottery.id))
        .count(&pool)
        .await
        .unwrap();
    assert_eq!(remaining_participants, 0);
}

#[tokio::test]
async fn test_delete_missing_lottery_still_succeeds() {
    let pool = setup_pool().await;
    let service = LotteryService::new(pool);
    let result = service.delete_lottery(777).await.unwrap();
    assert!(result.success);
    assert_eq!(result.message, "Lottery deleted successfully");
}
