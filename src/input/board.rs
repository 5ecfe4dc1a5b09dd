//! Sudoku board parsing
//!
//! A board is 81 cells in row-major order.  Digits `1`-`9` are givens;
//! `0` and `.` mark empty cells.  Whitespace is ignored, so boards may be
//! written as a single line or as a 9-line grid.  Givens that contradict
//! each other (duplicate in a row, column, or 3x3 box) are rejected before
//! any search runs.

use super::InputError;

/// Parse and validate a Sudoku board.
pub fn parse_board(text: &str) -> Result<Vec<u8>, InputError> {
    let mut cells = Vec::with_capacity(81);

    for c in text.chars() {
        if c.is_whitespace() {
            continue;
        }
        match c {
            '.' | '0' => cells.push(0),
            '1'..='9' => cells.push(c as u8 - b'0'),
            _ => {
                return Err(InputError::BadBoard {
                    message: format!("invalid character '{}'", c),
                });
            }
        }
    }

    if cells.len() != 81 {
        return Err(InputError::BadBoard {
            message: format!("expected 81 cells, got {}", cells.len()),
        });
    }

    check_givens(&cells)?;
    Ok(cells)
}

/// Reject boards whose givens already conflict.
fn check_givens(cells: &[u8]) -> Result<(), InputError> {
    for row in 0..9 {
        for col in 0..9 {
            let value = cells[row * 9 + col];
            if value == 0 {
                continue;
            }
            if conflicts(cells, row, col, value) {
                return Err(InputError::Contradiction { row, col, value });
            }
        }
    }
    Ok(())
}

/// Whether placing `value` at (row, col) conflicts with any other cell.
///
/// The cell itself is excluded, so this doubles as the solver's validity
/// check for already-filled boards.
pub fn conflicts(cells: &[u8], row: usize, col: usize, value: u8) -> bool {
    for i in 0..9 {
        if i != col && cells[row * 9 + i] == value {
            return true;
        }
        if i != row && cells[i * 9 + col] == value {
            return true;
        }
    }

    let box_row = row / 3 * 3;
    let box_col = col / 3 * 3;
    for r in box_row..box_row + 3 {
        for c in box_col..box_col + 3 {
            if (r, c) != (row, col) && cells[r * 9 + c] == value {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    const EASY: &str = "\
        53..7....\
        6..195...\
        .98....6.\
        8...6...3\
        4..8.3..1\
        7...2...6\
        .6....28.\
        ...419..5\
        ....8..79";

    #[test]
    fn test_parse_valid_board() {
        let cells = parse_board(EASY).unwrap();
        assert_eq!(cells.len(), 81);
        assert_eq!(cells[0], 5);
        assert_eq!(cells[2], 0);
    }

    #[test]
    fn test_parse_board_multiline() {
        let text = EASY
            .chars()
            .collect::<Vec<_>>()
            .chunks(9)
            .map(|c| c.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(parse_board(&text).unwrap(), parse_board(EASY).unwrap());
    }

    #[test]
    fn test_parse_board_rejects_wrong_length() {
        assert!(matches!(
            parse_board("123").unwrap_err(),
            InputError::BadBoard { .. }
        ));
    }

    #[test]
    fn test_parse_board_rejects_bad_character() {
        let bad = format!("x{}", &EASY[1..]);
        assert!(matches!(
            parse_board(&bad).unwrap_err(),
            InputError::BadBoard { .. }
        ));
    }

    #[test]
    fn test_parse_board_rejects_contradiction() {
        // Two 5s in the first row
        let bad = format!("55{}", &EASY[2..]);
        assert!(matches!(
            parse_board(&bad).unwrap_err(),
            InputError::Contradiction { row: 0, .. }
        ));
    }
}
