use crate::models::ApiResponse;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use std::fmt;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// 资源类型，用于 NotFound 等错误的上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Lottery,
    Prize,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Lottery => f.write_str("Lottery"),
            EntityKind::Prize => f.write_str("Prize"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: i64 },

    #[error("Lottery {0} is not active")]
    InactiveLottery(i64),

    #[error("Prize {0} has no remaining quantity")]
    ExhaustedPrize(i64),

    #[error("No eligible participants for prize {prize_id} in lottery {lottery_id}")]
    NoEligibleParticipants { lottery_id: i64, prize_id: i64 },

    /// 抽奖提交阶段失败（写入中奖记录或扣减剩余数量），状态未改变，调用方可重试
    #[error("Draw for prize {prize_id} could not be committed: {reason}")]
    CommitConflict { prize_id: i64, reason: String },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn lottery_not_found(id: i64) -> Self {
        AppError::NotFound {
            kind: EntityKind::Lottery,
            id,
        }
    }

    pub fn prize_not_found(id: i64) -> Self {
        AppError::NotFound {
            kind: EntityKind::Prize,
            id,
        }
    }

    /// 调用方是否可以安全地重试
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::CommitConflict { .. })
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        use actix_web::http::StatusCode;

        let (status_code, error_code, message) = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string()),
            AppError::InactiveLottery(_) => {
                (StatusCode::BAD_REQUEST, "LOTTERY_NOT_ACTIVE", self.to_string())
            }
            AppError::ExhaustedPrize(_) => {
                (StatusCode::BAD_REQUEST, "PRIZE_EXHAUSTED", self.to_string())
            }
            AppError::NoEligibleParticipants { .. } => (
                StatusCode::BAD_REQUEST,
                "NO_ELIGIBLE_PARTICIPANTS",
                self.to_string(),
            ),
            AppError::CommitConflict { prize_id, reason } => {
                log::warn!("Draw commit conflict on prize {prize_id}: {reason}");
                (
                    StatusCode::CONFLICT,
                    "DRAW_CONFLICT",
                    format!("Draw for prize {prize_id} was not completed, please retry"),
                )
            }
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Database error".to_string(),
                )
            }
            _ => {
                log::error!("Internal error: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        HttpResponse::build(status_code).json(ApiResponse::error(error_code, message))
    }
}
