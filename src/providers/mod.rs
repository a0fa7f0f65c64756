pub mod news_api;
pub mod openai;
pub mod util;
pub mod yahoo_finance;
