/// Walks result pages 1..=total in order
#[derive(Debug, Clone)]
pub struct PageIterator {
    current_page: usize,
    total_pages: usize,
}

impl PageIterator {
    pub fn new(total_pages: usize) -> Self {
        Self {
            current_page: 1,
            total_pages,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn has_reached_max(&self) -> bool {
        self.current_page > self.total_pages
    }

    pub fn advance(&mut self) {
        self.current_page += 1;
    }
}
