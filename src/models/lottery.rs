use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{lottery_entity, prize_entity, winner_entity};

/// 创建抽奖活动请求
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateLotteryRequest {
    /// 活动名称 (必填)
    pub name: String,
    pub description: Option<String>,
    /// 报名开始时间 (RFC 3339)
    pub start_time: DateTime<Utc>,
    /// 报名结束时间 (RFC 3339)，必须晚于开始时间
    pub end_time: DateTime<Utc>,
}

/// 添加奖品请求
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AddPrizeRequest {
    pub name: String,
    pub description: Option<String>,
    /// 奖品数量 (>= 1)，同时作为初始剩余数量
    pub quantity: i32,
}

/// 报名请求
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RegisterParticipantRequest {
    /// 外部用户标识
    pub user_id: String,
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LotteryResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<lottery_entity::Model> for LotteryResponse {
    fn from(m: lottery_entity::Model) -> Self {
        LotteryResponse {
            id: m.id,
            name: m.name,
            description: m.description,
            start_time: m.start_time,
            end_time: m.end_time,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PrizeResponse {
    pub id: i64,
    pub lottery_id: i64,
    pub name: String,
    pub description: Option<String>,
    /// 总数量
    pub quantity: i32,
    /// 剩余数量
    pub remaining: i32,
}

impl From<prize_entity::Model> for PrizeResponse {
    fn from(m: prize_entity::Model) -> Self {
        PrizeResponse {
            id: m.id,
            lottery_id: m.lottery_id,
            name: m.name,
            description: m.description,
            quantity: m.quantity,
            remaining: m.remaining,
        }
    }
}

/// 抽奖活动详情（含奖品列表与报名人数）
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LotteryDetailResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub prizes: Vec<PrizeResponse>,
    pub participants_count: u64,
}

impl LotteryDetailResponse {
    pub fn new(
        lottery: lottery_entity::Model,
        prizes: Vec<prize_entity::Model>,
        participants_count: u64,
    ) -> Self {
        LotteryDetailResponse {
            id: lottery.id,
            name: lottery.name,
            description: lottery.description,
            start_time: lottery.start_time,
            end_time: lottery.end_time,
            created_at: lottery.created_at,
            prizes: prizes.into_iter().map(Into::into).collect(),
            participants_count,
        }
    }
}

/// 报名结果
///
/// 重复报名不是错误，而是单独的结果，调用方据此区分。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered,
    AlreadyRegistered,
}

impl RegistrationOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            RegistrationOutcome::Registered => "Participant registered successfully",
            RegistrationOutcome::AlreadyRegistered => "Participant already registered",
        }
    }
}

/// 报名响应 (success=false 表示已报名过)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegisterParticipantResponse {
    pub success: bool,
    pub message: String,
}

impl From<RegistrationOutcome> for RegisterParticipantResponse {
    fn from(outcome: RegistrationOutcome) -> Self {
        RegisterParticipantResponse {
            success: outcome == RegistrationOutcome::Registered,
            message: outcome.message().to_string(),
        }
    }
}

/// 抽中的用户与奖品
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DrawnWinner {
    pub user_id: String,
    pub user_name: Option<String>,
    pub prize_id: i64,
    pub prize_name: String,
}

/// 抽奖响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawResponse {
    pub winner: DrawnWinner,
}

/// 中奖记录响应（附带奖品名称）
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WinnerResponse {
    pub id: i64,
    pub lottery_id: i64,
    pub prize_id: i64,
    pub prize_name: String,
    pub user_id: String,
    pub user_name: Option<String>,
    pub won_at: DateTime<Utc>,
}

impl WinnerResponse {
    pub fn new(winner: winner_entity::Model, prize_name: String) -> Self {
        WinnerResponse {
            id: winner.id,
            lottery_id: winner.lottery_id,
            prize_id: winner.prize_id,
            prize_name,
            user_id: winner.user_id,
            user_name: winner.user_name,
            won_at: winner.won_at,
        }
    }
}

/// 删除抽奖活动响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeleteLotteryResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_outcome_response() {
        let ok: RegisterParticipantResponse = RegistrationOutcome::Registered.into();
        assert!(ok.success);
        assert_eq!(ok.message, "Participant registered successfully");

        let dup: RegisterParticipantResponse = RegistrationOutcome::AlreadyRegistered.into();
        assert!(!dup.success);
        assert_eq!(dup.message, "Participant already registered");
    }

    #[test]
    fn test_create_lottery_request_parses_rfc3339() {
        let req: CreateLotteryRequest = serde_json::from_str(
            r#"{"name":"L","start_time":"2026-01-01T00:00:00Z","end_time":"2026-01-02T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(req.name, "L");
        assert!(req.description.is_none());
        assert!(req.start_time < req.end_time);
    }
}
