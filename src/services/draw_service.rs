use crate::entities::{
    lottery_entity as lotteries, prize_entity as prizes, winner_entity as winners,
};
use crate::error::{AppError, AppResult};
use crate::models::{DrawResponse, DrawnWinner};
use crate::services::eligibility_service::eligible_participants;
use crate::utils::{RandomSelector, WinnerSelector};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QuerySelect, Set, TransactionError, TransactionTrait, UpdateResult,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct DrawService {
    pool: DatabaseConnection,
    selector: Arc<dyn WinnerSelector>,
}

impl DrawService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self::with_selector(pool, Arc::new(RandomSelector))
    }

    /// 指定选择策略（测试中使用确定性实现）
    pub fn with_selector(pool: DatabaseConnection, selector: Arc<dyn WinnerSelector>) -> Self {
        Self { pool, selector }
    }

    /// 为指定奖品抽取一名中奖者
    ///
    /// 逻辑:
    /// 1. 校验抽奖活动存在
    /// 2. 锁定奖品行 (SELECT ... FOR UPDATE)，校验其属于该活动且剩余数量 > 0
    /// 3. 在同一事务内计算可抽奖用户集合，为空则失败
    /// 4. 均匀随机选出一名用户
    /// 5. 写入中奖记录并扣减剩余数量 (where remaining > 0)，两者同一事务提交
    ///
    /// 校验失败不会产生任何写入；提交阶段失败时事务整体回滚，返回可重试的 CommitConflict。
    pub async fn draw(&self, lottery_id: i64, prize_id: i64) -> AppResult<DrawResponse> {
        let selector = self.selector.clone();

        let result = self
            .pool
            .transaction::<_, DrawnWinner, AppError>(move |txn| {
                Box::pin(async move {
                    draw_in_transaction(txn, selector.as_ref(), lottery_id, prize_id).await
                })
            })
            .await;

        match result {
            Ok(winner) => {
                log::info!(
                    "Lottery {} prize {} ({}) drawn: user {}",
                    lottery_id,
                    winner.prize_id,
                    winner.prize_name,
                    winner.user_id
                );
                Ok(DrawResponse { winner })
            }
            Err(TransactionError::Transaction(e)) => {
                if e.is_retryable() {
                    log::warn!("Draw rolled back: {e}");
                } else if let AppError::DatabaseError(ref err) = e {
                    log::error!("Draw failed on lottery {lottery_id} prize {prize_id}: {err}");
                }
                Err(e)
            }
            // 开启或提交事务失败，事务已回滚，状态未改变
            Err(TransactionError::Connection(err)) => {
                log::warn!("Draw transaction failed on prize {prize_id}: {err}");
                Err(commit_conflict(prize_id, err))
            }
        }
    }
}

async fn draw_in_transaction(
    txn: &DatabaseTransaction,
    selector: &dyn WinnerSelector,
    lottery_id: i64,
    prize_id: i64,
) -> AppResult<DrawnWinner> {
    lotteries::Entity::find_by_id(lottery_id)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::lottery_not_found(lottery_id))?;

    // 行锁保证同一奖品的抽奖串行执行 (SQLite 下为空操作，由数据库写锁串行)
    let prize = prizes::Entity::find_by_id(prize_id)
        .filter(prizes::Column::LotteryId.eq(lottery_id))
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or_else(|| AppError::prize_not_found(prize_id))?;

    if !prize.is_available() {
        return Err(AppError::ExhaustedPrize(prize_id));
    }

    let eligible = eligible_participants(txn, lottery_id, prize_id).await?;
    if eligible.is_empty() {
        return Err(AppError::NoEligibleParticipants {
            lottery_id,
            prize_id,
        });
    }

    let index = selector.pick(eligible.len());
    let chosen = eligible.get(index).ok_or_else(|| {
        AppError::InternalError(format!(
            "selector returned index {index} for {} candidates",
            eligible.len()
        ))
    })?;

    winners::ActiveModel {
        lottery_id: Set(lottery_id),
        prize_id: Set(prize_id),
        user_id: Set(chosen.user_id.clone()),
        user_name: Set(chosen.user_name.clone()),
        won_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(txn)
    .await
    .map_err(|e| commit_conflict(prize_id, e))?;

    let update_result: UpdateResult = prizes::Entity::update_many()
        .col_expr(
            prizes::Column::Remaining,
            Expr::col(prizes::Column::Remaining).sub(1),
        )
        .filter(prizes::Column::Id.eq(prize_id))
        .filter(prizes::Column::Remaining.gt(0))
        .exec(txn)
        .await
        .map_err(|e| commit_conflict(prize_id, e))?;

    // 扣减失败说明剩余数量已被并发抽奖用完，返回错误使中奖记录随事务回滚
    if update_result.rows_affected != 1 {
        return Err(AppError::ExhaustedPrize(prize_id));
    }

    Ok(DrawnWinner {
        user_id: chosen.user_id.clone(),
        user_name: chosen.user_name.clone(),
        prize_id: prize.id,
        prize_name: prize.name,
    })
}

fn commit_conflict(prize_id: i64, err: DbErr) -> AppError {
    AppError::CommitConflict {
        prize_id,
        reason: err.to_string(),
    }
}
