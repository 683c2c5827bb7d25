use serde::{Deserialize, Serialize};

/// Number of cells in a verification code.
pub const CODE_LENGTH: usize = 4;

/// Result of writing into one code cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeInput {
    /// A digit was stored.
    Set,
    /// The cell was emptied.
    Cleared,
    /// Out-of-range index, multi-character or non-digit input; nothing changed.
    Ignored,
}

/// Four single-digit cells filled independently.
///
/// Each cell is empty or holds exactly one ASCII digit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    cells: [Option<char>; CODE_LENGTH],
}

impl VerificationCode {
    pub fn set(&mut self, index: usize, value: &str) -> CodeInput {
        let Some(cell) = self.cells.get_mut(index) else {
            return CodeInput::Ignored;
        };

        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (None, _) => {
                *cell = None;
                CodeInput::Cleared
            }
            (Some(c), None) if c.is_ascii_digit() => {
                *cell = Some(c);
                CodeInput::Set
            }
            _ => CodeInput::Ignored,
        }
    }

    pub fn cell(&self, index: usize) -> Option<char> {
        self.cells.get(index).copied().flatten()
    }

    /// Cells as strings of length 0 or 1.
    pub fn cells(&self) -> [String; CODE_LENGTH] {
        self.cells
            .map(|cell| cell.map(String::from).unwrap_or_default())
    }

    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Entered digits joined in order, skipping empty cells.
    pub fn digits(&self) -> String {
        self.cells.iter().flatten().collect()
    }

    pub fn clear(&mut self) {
        self.cells = [None; CODE_LENGTH];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_only_when_all_cells_filled() {
        let mut code = VerificationCode::default();
        for (i, v) in ["1", "2", "3", ""].iter().enumerate() {
            code.set(i, v);
        }
        assert!(!code.is_complete());
        assert_eq!(code.cells(), ["1", "2", "3", ""].map(String::from));

        assert_eq!(code.set(3, "4"), CodeInput::Set);
        assert!(code.is_complete());
        assert_eq!(code.digits(), "1234");
    }

    #[test]
    fn rejects_multi_char_and_non_digit_input() {
        let mut code = VerificationCode::default();
        assert_eq!(code.set(0, "12"), CodeInput::Ignored);
        assert_eq!(code.set(0, "a"), CodeInput::Ignored);
        assert_eq!(code.set(4, "1"), CodeInput::Ignored);
        assert!(code.is_empty());
    }

    #[test]
    fn empty_input_clears_cell() {
        let mut code = VerificationCode::default();
        code.set(2, "7");
        assert_eq!(code.cell(2), Some('7'));
        assert_eq!(code.set(2, ""), CodeInput::Cleared);
        assert_eq!(code.cell(2), None);
    }
}
