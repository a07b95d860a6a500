//! Block field generation
//!
//! The block area is cut into one horizontal band per palette color, stacked
//! bottom to top in palette order. Each band is tiled by `blocks_per_row`
//! equal blocks that exactly cover its width.

use glam::Vec2;

use super::color::GameColor;
use super::geometry::Rect;
use super::state::{Entity, Role};

/// Split `area` into `count` equal-height bands, lowest first
pub fn band_rects(area: &Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let min = area.min();
    let band_height = area.height() / count as f32;
    (0..count)
        .map(|i| {
            Rect::from_min_size(
                Vec2::new(min.x, min.y + i as f32 * band_height),
                Vec2::new(area.width(), band_height),
            )
        })
        .collect()
}

/// Generate the block field.
///
/// Returns blocks band by band (lowest first), left to right within a band.
/// `next_id` is called once per block to assign entity IDs.
pub fn generate_field(
    area: Rect,
    palette: &[GameColor],
    blocks_per_row: u32,
    next_id: &mut impl FnMut() -> u32,
) -> Vec<Entity> {
    if blocks_per_row == 0 {
        return Vec::new();
    }

    let bands = band_rects(&area, palette.len());
    let block_width = area.width() / blocks_per_row as f32;
    let mut blocks = Vec::with_capacity(bands.len() * blocks_per_row as usize);

    for (band, &color) in bands.iter().zip(palette) {
        let min = band.min();
        for col in 0..blocks_per_row {
            let rect = Rect::from_min_size(
                Vec2::new(min.x + col as f32 * block_width, min.y),
                Vec2::new(block_width, band.height()),
            );
            blocks.push(Entity::fixed(next_id(), Role::Block, color, rect));
        }
    }

    log::debug!(
        "Generated {} bands x {} blocks ({}x{} each)",
        bands.len(),
        blocks_per_row,
        block_width,
        area.height() / palette.len().max(1) as f32
    );

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::color::DEFAULT_PALETTE;
    use proptest::prelude::*;

    fn counter() -> impl FnMut() -> u32 {
        let mut n = 0;
        move || {
            n += 1;
            n
        }
    }

    #[test]
    fn test_400x100_six_bands() {
        let area = Rect::from_min_size(Vec2::ZERO, Vec2::new(400.0, 100.0));
        let blocks = generate_field(area, &DEFAULT_PALETTE, 20, &mut counter());

        assert_eq!(blocks.len(), 6 * 20);
        for b in &blocks {
            assert!((b.rect.width() - 20.0).abs() < 1e-4);
            assert!((b.rect.height() - 100.0 / 6.0).abs() < 1e-4);
            assert_eq!(b.role, Role::Block);
            assert!(!b.dynamic);
            assert_eq!(b.vel, Vec2::ZERO);
        }
    }

    #[test]
    fn test_bands_follow_palette_bottom_up() {
        let area = Rect::from_min_size(Vec2::new(0.0, 60.0), Vec2::new(100.0, 30.0));
        let palette = [GameColor::Blue, GameColor::Red, GameColor::Purple];
        let blocks = generate_field(area, &palette, 4, &mut counter());

        for (band_idx, row) in blocks.chunks(4).enumerate() {
            for b in row {
                assert_eq!(b.color, palette[band_idx]);
                assert!((b.rect.min().y - (60.0 + band_idx as f32 * 10.0)).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_first_and_last_block_touch_band_edges() {
        let area = Rect::from_min_size(Vec2::new(5.0, 0.0), Vec2::new(375.0, 100.0));
        let blocks = generate_field(area, &[GameColor::Green], 20, &mut counter());
        assert!((blocks[0].rect.min().x - 5.0).abs() < 1e-4);
        assert!((blocks[19].rect.max().x - 380.0).abs() < 1e-3);
    }

    #[test]
    fn test_ids_in_generation_order() {
        let area = Rect::from_min_size(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let blocks = generate_field(area, &[GameColor::Red, GameColor::Blue], 3, &mut counter());
        let ids: Vec<u32> = blocks.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_degenerate_inputs_yield_empty_field() {
        let area = Rect::from_min_size(Vec2::ZERO, Vec2::new(10.0, 10.0));
        assert!(generate_field(area, &[], 5, &mut counter()).is_empty());
        assert!(generate_field(area, &DEFAULT_PALETTE, 0, &mut counter()).is_empty());
    }

    fn palette_strategy() -> impl Strategy<Value = Vec<GameColor>> {
        prop::collection::vec(prop::sample::select(GameColor::ALL.to_vec()), 1..8)
    }

    proptest! {
        #[test]
        fn prop_rows_tile_band_width(
            width in 1.0f32..2000.0,
            height in 1.0f32..500.0,
            per_row in 1u32..64,
            palette in palette_strategy(),
        ) {
            let area = Rect::from_min_size(Vec2::ZERO, Vec2::new(width, height));
            let blocks = generate_field(area, &palette, per_row, &mut counter());
            prop_assert_eq!(blocks.len(), palette.len() * per_row as usize);

            let tol = width * 1e-4;
            for row in blocks.chunks(per_row as usize) {
                let total: f32 = row.iter().map(|b| b.rect.width()).sum();
                prop_assert!((total - width).abs() <= tol);
                for pair in row.windows(2) {
                    // Adjacent, never overlapping
                    prop_assert!((pair[0].rect.max().x - pair[1].rect.min().x).abs() <= tol);
                }
            }
        }

        #[test]
        fn prop_bands_tile_area_height(
            y in 0.0f32..500.0,
            height in 1.0f32..500.0,
            count in 1usize..12,
        ) {
            let area = Rect::from_min_size(Vec2::new(0.0, y), Vec2::new(100.0, height));
            let bands = band_rects(&area, count);
            prop_assert_eq!(bands.len(), count);

            let total: f32 = bands.iter().map(|b| b.height()).sum();
            let tol = (y + height) * 1e-4;
            prop_assert!((total - height).abs() <= tol);
            prop_assert!((bands[0].min().y - y).abs() <= tol);
            prop_assert!((bands[count - 1].max().y - (y + height)).abs() <= tol);
            for pair in bands.windows(2) {
                prop_assert!((pair[0].max().y - pair[1].min().y).abs() <= tol);
            }
        }
    }
}
