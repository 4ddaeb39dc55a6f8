pub mod add;
pub mod dispatch;
pub mod edit;
pub mod inspect;
pub mod transfer;
