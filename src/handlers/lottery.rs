use crate::models::*;
use crate::services::LotteryService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    post,
    path = "/lotteries",
    tag = "lottery",
    request_body = CreateLotteryRequest,
    responses(
        (status = 201, description = "创建抽奖活动成功", body = LotteryResponse),
        (status = 400, description = "参数错误")
    )
)]
pub async fn create_lottery(
    service: web::Data<LotteryService>,
    body: web::Json<CreateLotteryRequest>,
) -> Result<HttpResponse> {
    match service.create_lottery(body.into_inner()).await {
        Ok(lottery) => Ok(HttpResponse::Created().json(ApiResponse::success(lottery))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/lotteries",
    tag = "lottery",
    responses(
        (status = 200, description = "获取抽奖活动列表成功（最新创建在前）", body = [LotteryResponse])
    )
)]
pub async fn list_lotteries(service: web::Data<LotteryService>) -> Result<HttpResponse> {
    match service.get_all_lotteries().await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/lotteries/{id}",
    tag = "lottery",
    params(("id" = i64, Path, description = "抽奖活动ID")),
    responses(
        (status = 200, description = "获取抽奖活动详情成功", body = LotteryDetailResponse),
        (status = 404, description = "抽奖活动不存在")
    )
)]
pub async fn get_lottery(
    service: web::Data<LotteryService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_lottery(path.into_inner()).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/lotteries/{id}",
    tag = "lottery",
    params(("id" = i64, Path, description = "抽奖活动ID")),
    responses(
        (status = 200, description = "删除成功（活动不存在时同样返回成功）", body = DeleteLotteryResponse)
    )
)]
pub async fn delete_lottery(
    service: web::Data<LotteryService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.delete_lottery(path.into_inner()).await {
        Ok(result) => Ok(HttpResponse::Ok().json(result)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/lotteries/{lottery_id}/prizes",
    tag = "lottery",
    params(("lottery_id" = i64, Path, description = "抽奖活动ID")),
    request_body = AddPrizeRequest,
    responses(
        (status = 201, description = "添加奖品成功", body = PrizeResponse),
        (status = 400, description = "参数错误"),
        (status = 404, description = "抽奖活动不存在")
    )
)]
pub async fn add_prize(
    service: web::Data<LotteryService>,
    path: web::Path<i64>,
    body: web::Json<AddPrizeRequest>,
) -> Result<HttpResponse> {
    match service.add_prize(path.into_inner(), body.into_inner()).await {
        Ok(prize) => Ok(HttpResponse::Created().json(ApiResponse::success(prize))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/lotteries/{lottery_id}/participants",
    tag = "lottery",
    params(("lottery_id" = i64, Path, description = "抽奖活动ID")),
    request_body = RegisterParticipantRequest,
    responses(
        (status = 200, description = "报名结果；重复报名时 success=false", body = RegisterParticipantResponse),
        (status = 400, description = "活动未开始或已结束"),
        (status = 404, description = "抽奖活动不存在")
    )
)]
/// 报名参加抽奖；重复报名不报错，返回 success=false 与说明
pub async fn register_participant(
    service: web::Data<LotteryService>,
    path: web::Path<i64>,
    body: web::Json<RegisterParticipantRequest>,
) -> Result<HttpResponse> {
    match service
        .register_participant(path.into_inner(), body.into_inner())
        .await
    {
        Ok(outcome) => Ok(HttpResponse::Ok().json(RegisterParticipantResponse::from(outcome))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/lotteries/{lottery_id}/winners",
    tag = "winner",
    params(("lottery_id" = i64, Path, description = "抽奖活动ID")),
    responses(
        (status = 200, description = "获取中奖记录成功（最近中奖在前）", body = [WinnerResponse])
    )
)]
pub async fn get_winners(
    service: web::Data<LotteryService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_winners(path.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/prizes/{prize_id}/winners",
    tag = "winner",
    params(("prize_id" = i64, Path, description = "奖品ID")),
    responses(
        (status = 200, description = "获取奖品中奖记录成功（最近中奖在前）", body = [WinnerResponse])
    )
)]
pub async fn get_winners_by_prize(
    service: web::Data<LotteryService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_winners_by_prize(path.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 健康检查
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "message": "Lottery system is running"
    }))
}

/// 路由配置
pub fn lottery_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/lotteries")
            .route("", web::post().to(create_lottery))
            .route("", web::get().to(list_lotteries))
            .route("/{id}", web::get().to(get_lottery))
            .route("/{id}", web::delete().to(delete_lottery))
            .route("/{lottery_id}/prizes", web::post().to(add_prize))
            .route(
                "/{lottery_id}/participants",
                web::post().to(register_participant),
            )
            .route("/{lottery_id}/winners", web::get().to(get_winners))
            .configure(super::draw::draw_config),
    )
    .service(
        web::scope("/prizes").route("/{prize_id}/winners", web::get().to(get_winners_by_prize)),
    );
}
