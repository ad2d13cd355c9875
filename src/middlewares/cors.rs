use actix_cors::Cors;

pub fn create_cors() -> Cors {
    // 抽奖接口不携带凭据，允许任意来源
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}
