pub mod listings_interactor;
pub mod table;

pub use listings_interactor::{ListingsInteractor, ListingsInteractorImpl};
pub use table::{
    convert_amount, filter_by_symbols, percent_change_table, sort_rows, take_top, top_gainers,
    top_losers, Conversion, PercentChangeRow, SortKey, Timeframe,
};
