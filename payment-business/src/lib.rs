pub mod availability;
pub mod calculation;
pub mod executor;
pub mod facade;
pub mod reader;
pub mod sales;
pub mod validation;
pub mod writer;

pub use executor::{CheckoutPluginExecutor, PaymentPlugins};
pub use facade::PaymentFacade;
