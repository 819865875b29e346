//! Text rendering of a single frame.

use crate::episode::Positions;
use pursuit_core::{Grid, Position};

const LABELS: [char; 3] = ['A', 'B', 'C'];

/// Draw the grid with the agents on it, one line per row.
///
/// `#` is an obstacle and `.` a free cell. Agents show as `A`, `B` and `C`,
/// or `*` where more than one shares a cell. An agent standing on an
/// obstacle hides it.
pub fn render_frame(grid: &Grid, positions: &Positions) -> String {
    let mut out = String::with_capacity(grid.rows() * (grid.cols() + 1));

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let pos = Position::new(row as i32, col as i32);
            let mut here = positions.iter().zip(LABELS).filter(|(p, _)| **p == pos);
            let c = match (here.next(), here.next()) {
                (Some(_), Some(_)) => '*',
                (Some((_, label)), None) => label,
                _ if grid.is_obstacle(pos) => '#',
                _ => '.',
            };
            out.push(c);
        }
        out.push('\n');
    }

    out
}
