mod batch_fetcher;
mod user_info;

pub use batch_fetcher::BatchFetcher;
pub use user_info::UserInfoServiceImpl;
