pub mod draw_service;
pub mod eligibility_service;
pub mod lottery_service;

pub use draw_service::*;
pub use eligibility_service::*;
pub use lottery_service::*;
