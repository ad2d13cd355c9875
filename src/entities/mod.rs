pub mod lotteries;
pub mod participants;
pub mod prizes;
pub mod winners;

pub use lotteries as lottery_entity;
pub use participants as participant_entity;
pub use prizes as prize_entity;
pub use winners as winner_entity;
