// 公开导出的模块，供外部使用
pub mod models;
pub mod history;
pub mod errors;
pub mod render;

// 各任务的抓取器与服务
pub mod scrapers;
pub mod config;
pub mod services;
#[doc(hidden)]
pub mod util;

// 重新导出常用类型，方便使用
pub use models::earnings::EarningsRecord;
pub use history::VideoHistory;
pub use errors::{Result, AlertHubError};
