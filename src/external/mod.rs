pub mod quote_feed;
