/// Running counters for one [`Search`](crate::Search).
///
/// Updated as the consumer pulls results, so a search that is stopped
/// early reports only the work it actually did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    /// Directories listed so far.
    pub dirs: usize,

    /// Files tested against the matcher so far (matched or not).
    pub files: usize,

    /// Files yielded to the consumer so far.
    pub matches: usize,
}

impl ScanStats {
    /// Fraction of examined files that matched, `0.0` before any file was seen.
    pub fn match_ratio(&self) -> f64 {
        if self.files == 0 {
            0.0
        } else {
            self.matches as f64 / self.files as f64
        }
    }
}
