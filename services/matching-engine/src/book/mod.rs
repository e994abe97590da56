//! Price-indexed sides of the book
//!
//! Each side maps a price to a FIFO queue of pool handles. Order data lives
//! in the pool; the book only holds handles and per-level totals.

pub mod price_level;
pub mod bid_book;
pub mod ask_book;

pub use ask_book::AskBook;
pub use bid_book::BidBook;
pub use price_level::PriceLevel;
