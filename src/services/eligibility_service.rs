use crate::entities::{participant_entity as participants, winner_entity as winners};
use sea_orm::sea_query::Query;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

/// 计算某抽奖活动中某奖品的可抽奖用户集合
///
/// 返回该活动的全部报名者，排除已经持有 *该奖品* 中奖记录的用户。
/// 排除范围只针对当前奖品：已中过其它奖品的用户仍然可以参与本奖品的抽取。
///
/// 结果按报名 id 升序，保证同一数据下的顺序稳定；空集合不是错误，由调用方决定如何处理。
/// 接受任意连接（连接池或事务），抽奖时在持有奖品行锁的事务内调用。
pub async fn eligible_participants<C>(
    conn: &C,
    lottery_id: i64,
    prize_id: i64,
) -> Result<Vec<participants::Model>, DbErr>
where
    C: ConnectionTrait,
{
    // 已中该奖品的 user_id 子查询
    let already_won = Query::select()
        .column(winners::Column::UserId)
        .from(winners::Entity)
        .and_where(winners::Column::LotteryId.eq(lottery_id))
        .and_where(winners::Column::PrizeId.eq(prize_id))
        .to_owned();

    participants::Entity::find()
        .filter(participants::Column::LotteryId.eq(lottery_id))
        .filter(participants::Column::UserId.not_in_subquery(already_won))
        .order_by_asc(participants::Column::Id)
        .all(conn)
        .await
}
