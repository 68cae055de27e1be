pub mod client;

pub use client::ReportsClient;
