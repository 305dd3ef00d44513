pub mod memory;
pub mod postgres;
pub mod store;
pub mod users;

pub use memory::InMemoryUserStore;
pub use postgres::PgUserStore;
pub use store::UserStore;
pub use users::UserService;
