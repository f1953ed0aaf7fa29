//! Win and terminal-state detection, generalized over board shape and run
//! length.

use crate::board::Board;

/// Returns true if any horizontal, vertical or diagonal run of `win`
/// identical non-empty marks exists on the board.
///
/// Each direction only contributes anchors from which the full run stays in
/// bounds, so the scan works on non-square boards; a direction the run cannot
/// fit in at all is skipped entirely. `win` is expected to be at least 1.
pub fn has_winning_line(board: &Board, win: usize) -> bool {
    debug_assert!(win >= 1);
    let rows = board.rows();
    let columns = board.columns();

    // horizontal
    if win <= columns {
        for row in 0..rows {
            for column in 0..=columns - win {
                if winning_run(board, row, column, 0, 1, win) {
                    return true;
                }
            }
        }
    }

    // vertical
    if win <= rows {
        for column in 0..columns {
            for row in 0..=rows - win {
                if winning_run(board, row, column, 1, 0, win) {
                    return true;
                }
            }
        }
    }

    // both diagonals share the anchor grid: the top-left corners of every
    // win-sized box on the board
    if win <= rows && win <= columns {
        for row in 0..=rows - win {
            for column in 0..=columns - win {
                if winning_run(board, row, column, 1, 1, win)
                    || winning_run(board, row, column + win - 1, 1, -1, win)
                {
                    return true;
                }
            }
        }
    }

    false
}

/// A position is terminal when a winning line exists or no empty cell is
/// left.
pub fn is_terminal(board: &Board, win: usize) -> bool {
    has_winning_line(board, win) || board.is_full()
}

// checks one run of `win` cells from (row, column) stepping by
// (d_row, d_column); the caller guarantees the run stays in bounds
fn winning_run(
    board: &Board,
    row: usize,
    column: usize,
    d_row: isize,
    d_column: isize,
    win: usize,
) -> bool {
    let first = board.get(row, column);
    if first.is_empty() {
        return false;
    }

    (1..win).all(|step| {
        let run_row = (row as isize + d_row * step as isize) as usize;
        let run_column = (column as isize + d_column * step as isize) as usize;
        board.get(run_row, run_column) == first
    })
}
