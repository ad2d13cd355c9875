use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 奖品实体
/// 概念说明:
/// - quantity: 创建时确定的总数量 (>= 1), 之后不再变化
/// - remaining: 剩余数量, 仅由抽奖成功时扣减, 始终满足 0 <= remaining <= quantity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "prizes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub lottery_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub remaining: i32,
}

impl Model {
    /// 是否还有剩余
    pub fn is_available(&self) -> bool {
        self.remaining > 0
    }

    /// 已发放数量
    pub fn awarded(&self) -> i32 {
        self.quantity - self.remaining
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lotteries::Entity",
        from = "Column::LotteryId",
        to = "super::lotteries::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Lottery,
    #[sea_orm(has_many = "super::winners::Entity")]
    Winner,
}

impl Related<super::lotteries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lottery.def()
    }
}

impl Related<super::winners::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Winner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
