use std::collections::HashMap;
use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use snake_common::snake::{CellState, Direction, Point, SnakeSnapshot};

const EMPTY: char = '.';
const BODY: char = 'o';
const FOOD: char = '*';
const DEAD_HEAD: char = 'X';
const DEAD_BODY: char = 'x';

fn head_glyph(direction: Direction) -> char {
    match direction {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        Direction::Right => '>',
    }
}

/// Text lines for one frame: score, bordered board, overlay line.
/// The first `dead_segments` body cells (head first) use the dead glyphs.
pub fn build_frame(
    snapshot: &SnakeSnapshot,
    dead_segments: usize,
    overlay: Option<&str>,
) -> Vec<String> {
    let body_index: HashMap<Point, usize> = snapshot
        .body
        .iter()
        .enumerate()
        .map(|(index, point)| (*point, index))
        .collect();

    let border = format!("+{}+", "-".repeat(snapshot.columns));
    let mut lines = Vec::with_capacity(snapshot.rows + 4);
    lines.push(format!("Score: {}", snapshot.score));
    lines.push(border.clone());

    for (row, cells) in snapshot.cells.iter().enumerate() {
        let mut line = String::with_capacity(snapshot.columns + 2);
        line.push('|');
        for (column, cell) in cells.iter().enumerate() {
            let point = Point::new(row as i32, column as i32);
            let glyph = match (cell, body_index.get(&point)) {
                (CellState::Snake, Some(&index)) if index < dead_segments => {
                    if index == 0 { DEAD_HEAD } else { DEAD_BODY }
                }
                (CellState::Snake, Some(0)) => head_glyph(snapshot.direction),
                (CellState::Snake, _) => BODY,
                (CellState::Food, _) => FOOD,
                (CellState::Empty, _) => EMPTY,
            };
            line.push(glyph);
        }
        line.push('|');
        lines.push(line);
    }

    lines.push(border);
    lines.push(overlay.unwrap_or_default().to_string());
    lines
}

pub fn draw(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for (row, line) in lines.iter().enumerate() {
        queue!(
            out,
            MoveTo(0, row as u16),
            Clear(ClearType::CurrentLine),
            Print(line)
        )?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_common::games::SessionRng;
    use snake_common::snake::SnakeGame;

    fn snapshot() -> SnakeSnapshot {
        SnakeGame::new(4, 6, SessionRng::new(1)).unwrap().snapshot()
    }

    #[test]
    fn test_frame_layout() {
        let snapshot = snapshot();
        let lines = build_frame(&snapshot, 0, None);

        assert_eq!(lines.len(), 4 + 4);
        assert_eq!(lines[0], "Score: 0");
        assert_eq!(lines[1], "+------+");
        assert_eq!(lines[6], "+------+");
        assert_eq!(lines[7], "");
        assert!(lines[2..6].iter().all(|line| line.chars().count() == 8));
    }

    #[test]
    fn test_snake_and_food_glyphs() {
        let snapshot = snapshot();
        let lines = build_frame(&snapshot, 0, None);

        // Snake sits on row 1, columns 1..=3, heading right.
        assert_eq!(&lines[3][1..5].replace(FOOD, "."), ".oo>");
        let food_count: usize = lines[2..6]
            .iter()
            .map(|line| line.matches(FOOD).count())
            .sum();
        assert_eq!(food_count, 1);
    }

    #[test]
    fn test_dead_segments_replace_head_first() {
        let snapshot = snapshot();

        let one = build_frame(&snapshot, 1, None);
        assert_eq!(&one[3][2..5], "ooX");

        let all = build_frame(&snapshot, snapshot.body.len(), Some("Press ENTER to start"));
        assert_eq!(&all[3][2..5], "xxX");
        assert_eq!(all.last().unwrap(), "Press ENTER to start");
    }

    #[test]
    fn test_draw_writes_every_line() {
        let lines = vec!["Score: 1".to_string(), "+--+".to_string()];
        let mut out = Vec::new();
        draw(&mut out, &lines).unwrap();
        let written = String::from_utf8_lossy(&out);
        assert!(written.contains("Score: 1"));
        assert!(written.contains("+--+"));
    }
}
