/// Options for encoding a [`crate::ColumnChunk`] as Arrow IPC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkOption {
    pub(crate) max_rows_per_message: usize,
    pub(crate) alignment: usize,
}

impl Default for ChunkOption {
    fn default() -> Self {
        ChunkOption {
            max_rows_per_message: 4096,
            alignment: 64,
        }
    }
}

impl ChunkOption {
    /// Chunks taller than this are split into several IPC messages.
    ///
    /// Clamped to at least one row.
    pub fn max_rows_per_message(self, max_rows_per_message: usize) -> Self {
        ChunkOption {
            max_rows_per_message: max_rows_per_message.max(1),
            ..self
        }
    }

    /// Buffer alignment of the IPC writer; must be 8, 16, 32 or 64.
    pub fn alignment(self, alignment: usize) -> Self {
        ChunkOption { alignment, ..self }
    }

    pub fn get_max_rows_per_message(&self) -> usize {
        self.max_rows_per_message
    }

    pub fn get_alignment(&self) -> usize {
        self.alignment
    }
}

#[cfg(test)]
mod tests {
    use super::ChunkOption;

    #[test]
    fn defaults() {
        let option = ChunkOption::default();
        assert_eq!(option.get_max_rows_per_message(), 4096);
        assert_eq!(option.get_alignment(), 64);
    }

    #[test]
    fn zero_rows_per_message_is_clamped() {
        let option = ChunkOption::default().max_rows_per_message(0).alignment(8);
        assert_eq!(option.get_max_rows_per_message(), 1);
        assert_eq!(option.get_alignment(), 8);
    }
}
