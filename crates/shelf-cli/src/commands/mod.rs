pub mod book;
pub mod category;
pub mod dispatch;
pub mod lending;
pub mod shared;
pub mod shell;
