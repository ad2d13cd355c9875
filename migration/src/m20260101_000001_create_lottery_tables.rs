use sea_orm_migration::prelude::*;

/// Lotteries (抽奖活动)
#[derive(DeriveIden)]
enum Lotteries {
    Table,
    Id,
    Name,
    Description,
    StartTime,
    EndTime,
    CreatedAt,
}

/// Prizes (奖品, 属于某个抽奖活动)
#[derive(DeriveIden)]
enum Prizes {
    Table,
    Id,
    LotteryId,
    Name,
    Description,
    Quantity,
    Remaining,
}

/// Participants (报名用户)
#[derive(DeriveIden)]
enum Participants {
    Table,
    Id,
    LotteryId,
    UserId,
    UserName,
    CreatedAt,
}

/// Winners (中奖记录, 创建后不可修改)
#[derive(DeriveIden)]
enum Winners {
    Table,
    Id,
    LotteryId,
    PrizeId,
    UserId,
    UserName,
    WonAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 外键全部 ON DELETE CASCADE: 删除抽奖活动时一并删除奖品、报名与中奖记录。
/// 外键以内联方式声明 (SQLite 不支持 ALTER TABLE ADD CONSTRAINT)。
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lotteries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lotteries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Lotteries::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Lotteries::Description).text().null())
                    .col(
                        ColumnDef::new(Lotteries::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Lotteries::EndTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Lotteries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Prizes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prizes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prizes::LotteryId).big_integer().not_null())
                    .col(ColumnDef::new(Prizes::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Prizes::Description).text().null())
                    .col(ColumnDef::new(Prizes::Quantity).integer().not_null())
                    .col(ColumnDef::new(Prizes::Remaining).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_prizes_lottery")
                            .from(Prizes::Table, Prizes::LotteryId)
                            .to(Lotteries::Table, Lotteries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_prizes_lottery")
                    .table(Prizes::Table)
                    .col(Prizes::LotteryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Participants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Participants::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Participants::LotteryId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Participants::UserId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Participants::UserName).string_len(255).null())
                    .col(
                        ColumnDef::new(Participants::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_participants_lottery")
                            .from(Participants::Table, Participants::LotteryId)
                            .to(Lotteries::Table, Lotteries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一用户在同一抽奖活动中只能报名一次
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_participants_lottery_user_unique")
                    .table(Participants::Table)
                    .col(Participants::LotteryId)
                    .col(Participants::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Winners::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Winners::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Winners::LotteryId).big_integer().not_null())
                    .col(ColumnDef::new(Winners::PrizeId).big_integer().not_null())
                    .col(ColumnDef::new(Winners::UserId).string_len(255).not_null())
                    .col(ColumnDef::new(Winners::UserName).string_len(255).null())
                    .col(
                        ColumnDef::new(Winners::WonAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_winners_lottery")
                            .from(Winners::Table, Winners::LotteryId)
                            .to(Lotteries::Table, Lotteries::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_winners_prize")
                            .from(Winners::Table, Winners::PrizeId)
                            .to(Prizes::Table, Prizes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一奖品同一用户最多一条中奖记录
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_winners_lottery_prize_user_unique")
                    .table(Winners::Table)
                    .col(Winners::LotteryId)
                    .col(Winners::PrizeId)
                    .col(Winners::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_winners_prize")
                    .table(Winners::Table)
                    .col(Winners::PrizeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除顺序：中奖记录 -> 报名 -> 奖品 -> 抽奖活动
        manager
            .drop_table(Table::drop().if_exists().table(Winners::Table).to_owned())
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(Participants::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Prizes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Lotteries::Table).to_owned())
            .await?;

        Ok(())
    }
}
