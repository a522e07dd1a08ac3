mod book;
mod category;
mod lending;

pub use book::BookCommands;
pub use category::CategoryCommands;
pub use lending::LendingCommands;
