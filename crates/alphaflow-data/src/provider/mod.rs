//! 외부 데이터 제공자 클라이언트.

pub mod alpha_vantage;

pub use alpha_vantage::AlphaVantageClient;
