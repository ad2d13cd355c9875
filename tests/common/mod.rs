#![allow(dead_code)]

use chrono::{Duration, Utc};
use raffle_backend::config::DatabaseConfig;
use raffle_backend::database::{DbPool, create_pool, run_migrations};
use raffle_backend::entities::{prize_entity as prizes, winner_entity as winners};
use raffle_backend::models::{
    AddPrizeRequest, CreateLotteryRequest, LotteryResponse, PrizeResponse,
    RegisterParticipantRequest,
};
use raffle_backend::services::LotteryService;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use tempfile::TempDir;

/// 已迁移的内存 SQLite 数据库（单连接）
pub async fn setup_pool() -> DbPool {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    };
    let pool = create_pool(&config).await.expect("connect sqlite");
    run_migrations(&pool).await.expect("run migrations");
    pool
}

/// 已迁移的文件 SQLite 数据库（多连接，事务之间真正并发）
///
/// 返回的 TempDir 需要在测试期间保持存活。
pub async fn setup_file_pool(max_connections: u32) -> (TempDir, DbPool) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let config = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", dir.path().join("raffle.db").display()),
        max_connections,
    };
    let pool = create_pool(&config).await.expect("connect sqlite file");
    run_migrations(&pool).await.expect("run migrations");
    (dir, pool)
}

/// 当前处于报名窗口内的抽奖活动
pub async fn active_lottery(service: &LotteryService, name: &str) -> LotteryResponse {
    let now = Utc::now();
    service
        .create_lottery(CreateLotteryRequest {
            name: name.to_string(),
            description: None,
            start_time: now - Duration::minutes(1),
            end_time: now + Duration::days(1),
        })
        .await
        .expect("create lottery")
}

pub async fn add_prize(
    service: &LotteryService,
    lottery_id: i64,
    name: &str,
    quantity: i32,
) -> PrizeResponse {
    service
        .add_prize(
            lottery_id,
            AddPrizeRequest {
                name: name.to_string(),
                description: None,
                quantity,
            },
        )
        .await
        .expect("add prize")
}

pub async fn register(service: &LotteryService, lottery_id: i64, user_id: &str) {
    service
        .register_participant(
            lottery_id,
            RegisterParticipantRequest {
                user_id: user_id.to_string(),
                user_name: Some(format!("User {user_id}")),
            },
        )
        .await
        .expect("register participant");
}

pub async fn prize_row(pool: &DbPool, prize_id: i64) -> prizes::Model {
    prizes::Entity::find_by_id(prize_id)
        .one(pool)
        .await
        .expect("query prize")
        .expect("prize exists")
}

pub async fn winner_count(pool: &DbPool, prize_id: i64) -> u64 {
    winners::Entity::find()
        .filter(winners::Column::PrizeId.eq(prize_id))
        .count(pool)
        .await
        .expect("count winners")
}

/// remaining 在 [0, quantity] 内且中奖记录数 = quantity - remaining
pub async fn assert_prize_consistent(pool: &DbPool, prize_id: i64) {
    let prize = prize_row(pool, prize_id).await;
    assert!(prize.remaining >= 0 && prize.remaining <= prize.quantity);
    assert_eq!(
        winner_count(pool, prize_id).await,
        prize.awarded() as u64
    );
}
