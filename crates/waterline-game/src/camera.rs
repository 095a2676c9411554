/// Horizontal scroll offset that keeps the player centered, clamped to
/// the level bounds. Stateless: recomputed every tick, no smoothing.
pub fn compute_scroll(player_x: f32, player_w: f32, screen_w: f32, level_pixel_w: f32) -> f32 {
    let centered = player_x - (screen_w - player_w) / 2.0;
    let max_scroll = (level_pixel_w - screen_w).max(0.0);
    centered.clamp(0.0, max_scroll)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_the_player_mid_level() {
        let scroll = compute_scroll(1000.0, 100.0, 816.0, 4000.0);
        // Player's screen x is its world x minus scroll.
        assert_eq!(1000.0 - scroll, (816.0 - 100.0) / 2.0);
    }

    #[test]
    fn clamps_at_the_left_edge() {
        assert_eq!(compute_scroll(0.0, 100.0, 816.0, 4000.0), 0.0);
        assert_eq!(compute_scroll(200.0, 100.0, 816.0, 4000.0), 0.0);
    }

    #[test]
    fn clamps_at_the_right_edge() {
        let scroll = compute_scroll(3950.0, 100.0, 816.0, 4000.0);
        assert_eq!(scroll, 4000.0 - 816.0);
    }

    #[test]
    fn level_narrower_than_screen_never_scrolls() {
        assert_eq!(compute_scroll(300.0, 100.0, 816.0, 640.0), 0.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Scroll stays in [0, W - S] for any player position in the
            // level, whenever the screen fits inside the level.
            #[test]
            fn scroll_stays_within_bounds(
                player_x in 0.0f32..8000.0,
                level_w in 816.0f32..8000.0,
            ) {
                prop_assume!(player_x <= level_w);
                let scroll = compute_scroll(player_x, 100.0, 816.0, level_w);
                prop_assert!(scroll >= 0.0);
                prop_assert!(scroll <= level_w - 816.0);
            }
        }
    }
}
