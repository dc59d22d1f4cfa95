use log::info;

/// Track progress of a corpus build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusProgress {
    total: usize,
    tournaments: usize,
    written: usize,
    skipped: usize,
}

impl CorpusProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn increment_written(&mut self) {
        self.written += 1;
    }

    pub fn increment_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn finish_tournament(&mut self) {
        self.tournaments += 1;
        self.log_progress();
    }

    pub fn tournaments(&self) -> usize {
        self.tournaments
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn log_progress(&self) {
        if should_log(self.tournaments, self.total) {
            info!(
                "  → Progress: {}/{} tournaments ({} decks written, {} skipped)",
                self.tournaments, self.total, self.written, self.skipped
            );
        }
    }
}

fn should_log(current: usize, total: usize) -> bool {
    is_milestone(current) || is_complete(current, total)
}

fn is_milestone(count: usize) -> bool {
    count % 10 == 0
}

fn is_complete(current: usize, total: usize) -> bool {
    current == total
}
