pub mod app_config;
pub mod database;
pub mod memory;
pub mod method_repo;
pub mod sales_repo;

pub use app_config::Config;
pub use database::DbClient;
pub use memory::InMemoryPaymentStore;
pub use method_repo::PostgresPaymentMethodRepository;
pub use sales_repo::PostgresSalesPaymentRepository;
