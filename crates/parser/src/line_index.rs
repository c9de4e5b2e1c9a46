/// Byte offset to 1-based line lookup.
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    newlines: Vec<u32>,
}

impl LineIndex {
    pub fn new(src: &str) -> Self {
        let newlines = memchr::memchr_iter(b'\n', src.as_bytes())
            .map(|i| i as u32)
            .collect();
        Self { newlines }
    }

    /// Line containing `offset`. A newline byte belongs to the line it ends.
    #[inline]
    pub fn line(&self, offset: u32) -> usize {
        self.newlines.partition_point(|&nl| nl < offset) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_one_based() {
        let idx = LineIndex::new("ab\ncd\n\nx");
        assert_eq!(idx.line(0), 1);
        assert_eq!(idx.line(2), 1);
        assert_eq!(idx.line(3), 2);
        assert_eq!(idx.line(6), 3);
        assert_eq!(idx.line(7), 4);
        assert_eq!(idx.line(100), 4);
    }
}
