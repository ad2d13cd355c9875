use crate::entities::{
    lottery_entity as lotteries, participant_entity as participants, prize_entity as prizes,
    winner_entity as winners,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    AddPrizeRequest, CreateLotteryRequest, DeleteLotteryResponse, LotteryDetailResponse,
    LotteryResponse, PrizeResponse, RegisterParticipantRequest, RegistrationOutcome,
    WinnerResponse,
};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};

/// 抽奖活动生命周期：活动、奖品、报名的增删查
#[derive(Clone)]
pub struct LotteryService {
    pool: DatabaseConnection,
}

impl LotteryService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 创建抽奖活动
    pub async fn create_lottery(&self, req: CreateLotteryRequest) -> AppResult<LotteryResponse> {
        validate_lottery_window(&req.name, req.start_time, req.end_time)?;

        let model = lotteries::ActiveModel {
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            start_time: Set(req.start_time),
            end_time: Set(req.end_time),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Lottery {} created: {}", model.id, model.name);
        Ok(model.into())
    }

    /// 为抽奖活动添加奖品，quantity 同时作为初始剩余数量
    ///
    /// 不预先查询活动是否存在，由外键约束保证；外键冲突转换为 NotFound。
    pub async fn add_prize(&self, lottery_id: i64, req: AddPrizeRequest) -> AppResult<PrizeResponse> {
        validate_prize(&req.name, req.quantity)?;

        let model = prizes::ActiveModel {
            lottery_id: Set(lottery_id),
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            quantity: Set(req.quantity),
            remaining: Set(req.quantity),
            ..Default::default()
        }
        .insert(&self.pool)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                AppError::lottery_not_found(lottery_id)
            }
            _ => AppError::DatabaseError(e),
        })?;

        log::info!(
            "Prize {} added to lottery {}: {} x{}",
            model.id,
            lottery_id,
            model.name,
            model.quantity
        );
        Ok(model.into())
    }

    /// 报名
    ///
    /// - 活动不存在: NotFound
    /// - 当前时间不在 [start_time, end_time] 内: InactiveLottery
    /// - 重复报名: 返回 AlreadyRegistered（不是错误，也不会产生第二条记录）
    pub async fn register_participant(
        &self,
        lottery_id: i64,
        req: RegisterParticipantRequest,
    ) -> AppResult<RegistrationOutcome> {
        let user_id = req.user_id.trim();
        if user_id.is_empty() {
            return Err(AppError::ValidationError("user_id is required".into()));
        }

        let lottery = lotteries::Entity::find_by_id(lottery_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::lottery_not_found(lottery_id))?;

        if !lottery.is_active_at(Utc::now()) {
            log::warn!("Registration rejected, lottery {lottery_id} is not active");
            return Err(AppError::InactiveLottery(lottery_id));
        }

        // INSERT ... ON CONFLICT (lottery_id, user_id) DO NOTHING
        let inserted = participants::Entity::insert(participants::ActiveModel {
            lottery_id: Set(lottery_id),
            user_id: Set(user_id.to_string()),
            user_name: Set(req.user_name),
            created_at: Set(Utc::now()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([
                participants::Column::LotteryId,
                participants::Column::UserId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(&self.pool)
        .await?;

        if inserted == 0 {
            log::info!("User {user_id} already registered for lottery {lottery_id}");
            return Ok(RegistrationOutcome::AlreadyRegistered);
        }

        log::info!("User {user_id} registered for lottery {lottery_id}");
        Ok(RegistrationOutcome::Registered)
    }

    /// 获取活动详情（奖品列表 + 报名人数）
    pub async fn get_lottery(&self, lottery_id: i64) -> AppResult<LotteryDetailResponse> {
        let lottery = lotteries::Entity::find_by_id(lottery_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::lottery_not_found(lottery_id))?;

        let prize_list = prizes::Entity::find()
            .filter(prizes::Column::LotteryId.eq(lottery_id))
            .order_by_asc(prizes::Column::Id)
            .all(&self.pool)
            .await?;

        let participants_count = participants::Entity::find()
            .filter(participants::Column::LotteryId.eq(lottery_id))
            .count(&self.pool)
            .await?;

        Ok(LotteryDetailResponse::new(
            lottery,
            prize_list,
            participants_count,
        ))
    }

    /// 全部活动，最新创建的在前
    pub async fn get_all_lotteries(&self) -> AppResult<Vec<LotteryResponse>> {
        let list = lotteries::Entity::find()
            .order_by_desc(lotteries::Column::CreatedAt)
            .order_by_desc(lotteries::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 某活动的全部中奖记录（附奖品名称），最近中奖的在前
    pub async fn get_winners(&self, lottery_id: i64) -> AppResult<Vec<WinnerResponse>> {
        self.find_winners(winners::Column::LotteryId.eq(lottery_id))
            .await
    }

    /// 某奖品的全部中奖记录，最近中奖的在前
    pub async fn get_winners_by_prize(&self, prize_id: i64) -> AppResult<Vec<WinnerResponse>> {
        self.find_winners(winners::Column::PrizeId.eq(prize_id)).await
    }

    /// 删除活动及其奖品、报名、中奖记录
    ///
    /// 不检查活动是否存在，始终返回成功。
    pub async fn delete_lottery(&self, lottery_id: i64) -> AppResult<DeleteLotteryResponse> {
        // 外键已声明 ON DELETE CASCADE，这里显式按依赖顺序删除，不依赖连接是否启用外键
        let txn = self.pool.begin().await?;

        winners::Entity::delete_many()
            .filter(winners::Column::LotteryId.eq(lottery_id))
            .exec(&txn)
            .await?;
        participants::Entity::delete_many()
            .filter(participants::Column::LotteryId.eq(lottery_id))
            .exec(&txn)
            .await?;
        prizes::Entity::delete_many()
            .filter(prizes::Column::LotteryId.eq(lottery_id))
            .exec(&txn)
            .await?;
        let deleted = lotteries::Entity::delete_by_id(lottery_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        log::info!(
            "Lottery {lottery_id} deleted ({} row)",
            deleted.rows_affected
        );
        Ok(DeleteLotteryResponse {
            success: true,
            message: "Lottery deleted successfully".to_string(),
        })
    }

    async fn find_winners(
        &self,
        condition: sea_orm::sea_query::SimpleExpr,
    ) -> AppResult<Vec<WinnerResponse>> {
        let rows = winners::Entity::find()
            .filter(condition)
            .find_also_related(prizes::Entity)
            .order_by_desc(winners::Column::WonAt)
            .order_by_desc(winners::Column::Id)
            .all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(winner, prize)| {
                let prize_name = prize.map(|p| p.name).unwrap_or_default();
                WinnerResponse::new(winner, prize_name)
            })
            .collect())
    }
}

/// 校验活动名称与时间窗口 (start_time 必须早于 end_time)
pub fn validate_lottery_window(
    name: &str,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::ValidationError("Lottery name is required".into()));
    }
    if start_time >= end_time {
        return Err(AppError::ValidationError(
            "start_time must be earlier than end_time".into(),
        ));
    }
    Ok(())
}

/// 校验奖品名称与数量 (quantity >= 1)
pub fn validate_prize(name: &str, quantity: i32) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::ValidationError("Prize name is required".into()));
    }
    if quantity < 1 {
        return Err(AppError::ValidationError(
            "Prize quantity must be at least 1".into(),
        ));
    }
    Ok(())
}
