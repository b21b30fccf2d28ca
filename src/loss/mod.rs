pub mod mse;
pub mod ssr;

pub use mse::MseLoss;
pub use ssr::SsrLoss;
