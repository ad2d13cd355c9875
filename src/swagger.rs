use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::lottery::create_lottery,
        handlers::lottery::list_lotteries,
        handlers::lottery::get_lottery,
        handlers::lottery::delete_lottery,
        handlers::lottery::add_prize,
        handlers::lottery::register_participant,
        handlers::lottery::get_winners,
        handlers::lottery::get_winners_by_prize,
        handlers::draw::draw_winner,
    ),
    components(
        schemas(
            CreateLotteryRequest,
            AddPrizeRequest,
            RegisterParticipantRequest,
            LotteryResponse,
            LotteryDetailResponse,
            PrizeResponse,
            RegisterParticipantResponse,
            DrawnWinner,
            DrawResponse,
            WinnerResponse,
            DeleteLotteryResponse,
            ApiError,
        )
    ),
    tags(
        (name = "lottery", description = "Lottery, prize and participant API"),
        (name = "draw", description = "Winner draw API"),
        (name = "winner", description = "Winner records API"),
    ),
    info(
        title = "Raffle Backend API",
        version = "0.1.0",
        description = "Raffle Backend REST API documentation"
    ),
    servers(
        (url = "/api", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
