pub mod concurrency;
pub mod hashing;
pub mod matching;
pub mod pipeline;
pub mod quotas;
