use crate::models::*;
use crate::services::DrawService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/lotteries/{lottery_id}/draw/{prize_id}",
    tag = "draw",
    params(
        ("lottery_id" = i64, Path, description = "抽奖活动ID"),
        ("prize_id" = i64, Path, description = "奖品ID")
    ),
    responses(
        (status = 200, description = "抽奖成功", body = DrawResponse),
        (status = 400, description = "奖品已抽完或没有可抽奖用户"),
        (status = 404, description = "抽奖活动或奖品不存在"),
        (status = 409, description = "提交冲突，状态未改变，可重试")
    )
)]
/// 为指定奖品抽取一名中奖者:
/// 1. 锁定奖品并检查剩余数量
/// 2. 从未中过该奖品的报名用户中均匀随机选择
/// 3. 中奖记录与剩余数量扣减在同一事务内提交
pub async fn draw_winner(
    service: web::Data<DrawService>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse> {
    let (lottery_id, prize_id) = path.into_inner();
    match service.draw(lottery_id, prize_id).await {
        Ok(result) => Ok(HttpResponse::Ok().json(ApiResponse::success(result))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 挂载在 /lotteries 作用域下
pub fn draw_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/{lottery_id}/draw/{prize_id}", web::post().to(draw_winner));
}
