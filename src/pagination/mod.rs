mod iterator;
mod urls;

pub use iterator::PageIterator;
pub use urls::with_page_param;
