pub mod chat;
pub mod query;

pub use chat as ChatController;
pub use query as QueryController;
