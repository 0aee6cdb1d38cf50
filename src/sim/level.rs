//! Level layouts
//!
//! Levels 1-4 are fixed patterns; level 5 and beyond fill a dense grid with
//! random gaps, so they differ from run to run.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::{Brick, BrickColor, PALETTE};
use crate::consts::*;

/// The bricks of one level instance
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrickField {
    pub level: u32,
    bricks: Vec<Brick>,
}

impl BrickField {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the layout for a level (1-based)
    pub fn generate<R: Rng>(level: u32, rng: &mut R) -> Self {
        let bricks = match level {
            0 | 1 => full_grid(),
            2 => checkerboard(),
            3 => pyramid(),
            4 => towers(),
            _ => random_dense(rng),
        };
        log::debug!("Level {} generated with {} bricks", level, bricks.len());
        Self { level, bricks }
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn bricks_mut(&mut self) -> &mut [Brick] {
        &mut self.bricks
    }

    /// Total bricks, dead or alive
    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_alive()).count()
    }

    /// Every brick destroyed
    pub fn is_cleared(&self) -> bool {
        self.bricks.iter().all(|b| !b.is_alive())
    }

    /// Debug aid: keep one live brick, parked above a point
    pub fn keep_single_brick(&mut self, center_x: f32, bottom: f32) {
        let Some(mut survivor) = self.bricks.iter().find(|b| b.is_alive()).cloned() else {
            return;
        };
        survivor.rect.x = (center_x - survivor.rect.w / 2.0).floor();
        survivor.rect.y = (bottom - survivor.rect.h).floor();
        self.bricks = vec![survivor];
    }
}

/// Left edge of a row of `cols` bricks centered in the field
fn row_left(cols: u32) -> f32 {
    let row_w = cols as f32 * BRICK_W + cols.saturating_sub(1) as f32 * BRICK_GAP;
    ((LOGICAL_W - row_w) / 2.0).floor()
}

fn cell(left: f32, row: u32, col: u32) -> Rect {
    Rect::new(
        left + col as f32 * (BRICK_W + BRICK_GAP),
        TOP_MARGIN + row as f32 * (BRICK_H + BRICK_GAP),
        BRICK_W,
        BRICK_H,
    )
}

fn palette(i: u32) -> BrickColor {
    PALETTE[i as usize % PALETTE.len()]
}

fn full_grid() -> Vec<Brick> {
    let left = row_left(BRICK_COLS);
    let mut bricks = Vec::with_capacity((BRICK_ROWS * BRICK_COLS) as usize);
    for row in 0..BRICK_ROWS {
        for col in 0..BRICK_COLS {
            bricks.push(Brick::new(cell(left, row, col), palette(row)));
        }
    }
    bricks
}

fn checkerboard() -> Vec<Brick> {
    let left = row_left(BRICK_COLS);
    let mut bricks = Vec::new();
    for row in 0..BRICK_ROWS {
        for col in 0..BRICK_COLS {
            if (row + col) % 2 == 0 {
                bricks.push(Brick::new(cell(left, row, col), palette(col)));
            }
        }
    }
    bricks
}

/// Row `r` holds `cols - 2r` bricks, each row centered on its own
fn pyramid() -> Vec<Brick> {
    let mut bricks = Vec::new();
    for row in 0..BRICK_ROWS + 2 {
        let Some(cols_in_row) = BRICK_COLS.checked_sub(row * 2).filter(|&c| c > 0) else {
            break;
        };
        let left = row_left(cols_in_row);
        for col in 0..cols_in_row {
            bricks.push(Brick::new(cell(left, row, col), palette(row)));
        }
    }
    bricks
}

/// Every other column, two rows taller than the standard grid
fn towers() -> Vec<Brick> {
    let left = row_left(BRICK_COLS);
    let mut bricks = Vec::new();
    for col in (0..BRICK_COLS).step_by(2) {
        for row in 0..BRICK_ROWS + 2 {
            let color = if row % 2 == 0 {
                BrickColor::Red
            } else {
                BrickColor::White
            };
            bricks.push(Brick::new(cell(left, row, col), color));
        }
    }
    bricks
}

fn random_dense<R: Rng>(rng: &mut R) -> Vec<Brick> {
    let left = row_left(BRICK_COLS);
    let mut bricks = Vec::new();
    for row in 0..BRICK_ROWS + 1 {
        for col in 0..BRICK_COLS {
            if rng.random::<f32>() > RANDOM_LEVEL_SKIP_CHANCE {
                let color = PALETTE[rng.random_range(0..PALETTE.len())];
                bricks.push(Brick::new(cell(left, row, col), color));
            }
        }
    }
    bricks
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn build(level: u32) -> BrickField {
        BrickField::generate(level, &mut Pcg32::seed_from_u64(7))
    }

    #[test]
    fn test_fixed_layout_counts() {
        assert_eq!(build(1).len(), 84);
        assert_eq!(build(2).len(), 42);
        assert_eq!(build(3).len(), 12 + 10 + 8 + 6 + 4 + 2);
        assert_eq!(build(4).len(), 6 * 9);
    }

    #[test]
    fn test_full_grid_is_centered() {
        let field = build(1);
        let left = field.bricks().iter().map(|b| b.rect.left()).fold(f32::MAX, f32::min);
        let right = field.bricks().iter().map(|b| b.rect.right()).fold(f32::MIN, f32::max);
        assert_eq!(left, 42.0);
        assert!((LOGICAL_W - right - left).abs() <= 1.0);
        assert_eq!(field.bricks()[0].rect.top(), TOP_MARGIN);
    }

    #[test]
    fn test_checkerboard_parity() {
        let field = build(2);
        let pitch_x = BRICK_W + BRICK_GAP;
        let pitch_y = BRICK_H + BRICK_GAP;
        for brick in field.bricks() {
            let col = ((brick.rect.left() - 42.0) / pitch_x).round() as u32;
            let row = ((brick.rect.top() - TOP_MARGIN) / pitch_y).round() as u32;
            assert_eq!((row + col) % 2, 0);
        }
    }

    #[test]
    fn test_pyramid_rows_are_centered() {
        let field = build(3);
        for brick_row in field.bricks().chunk_by(|a, b| a.rect.top() == b.rect.top()) {
            let left = brick_row[0].rect.left();
            let right = brick_row[brick_row.len() - 1].rect.right();
            assert!((LOGICAL_W - right - left).abs() <= 1.0);
        }
    }

    #[test]
    fn test_towers_use_even_columns() {
        let field = build(4);
        let pitch_x = BRICK_W + BRICK_GAP;
        for brick in field.bricks() {
            let col = ((brick.rect.left() - 42.0) / pitch_x).round() as u32;
            assert_eq!(col % 2, 0);
        }
    }

    #[test]
    fn test_random_level_bounds() {
        for seed in 0..20 {
            let field = BrickField::generate(5, &mut Pcg32::seed_from_u64(seed));
            assert!(field.len() <= ((BRICK_ROWS + 1) * BRICK_COLS) as usize);
            assert!(field.live_count() == field.len());
        }
        // Same seed, same layout
        let a = BrickField::generate(6, &mut Pcg32::seed_from_u64(3));
        let b = BrickField::generate(6, &mut Pcg32::seed_from_u64(3));
        assert_eq!(a.bricks(), b.bricks());
    }

    #[test]
    fn test_cleared_and_single_brick() {
        let mut field = build(1);
        assert!(!field.is_cleared());
        field.keep_single_brick(400.0, 440.0);
        assert_eq!(field.len(), 1);
        assert_eq!(field.bricks()[0].rect.bottom(), 440.0);
        field.bricks_mut()[0].destroy();
        assert!(field.is_cleared());
        assert_eq!(field.live_count(), 0);
    }
}
