pub mod traits;

// Price / valuation sources
pub mod fixed;
pub mod wiki_prices;
