//! Rendering module
//!
//! Builds one frame as a list of draw calls against the platform. Layer
//! order: background, hazards, player, beams, effects, score text.

pub mod image;

pub use image::{Image, ImageHandle, ImageSource};

use crate::assets::Assets;
use crate::error::GameError;
use crate::platform::Platform;
use crate::sim::{GameState, Rect};

/// Score text anchor (top-left)
pub const SCORE_POS: (i32, i32) = (10, 10);

/// Draw the current state. Does not present.
pub fn render(
    state: &mut GameState,
    assets: &Assets,
    platform: &mut impl Platform,
) -> Result<(), GameError> {
    let bg = &assets.background;
    platform.draw(bg, Rect::new(0, 0, bg.width() as i32, bg.height() as i32));

    for hazard in state.hazards.iter_mut() {
        let (image, rect) = hazard.snapshot()?;
        platform.draw(image, rect);
    }

    let (image, rect) = state.player.snapshot()?;
    platform.draw(image, rect);

    for (_, shot) in state.beams.iter_mut() {
        let (image, rect) = shot.snapshot()?;
        platform.draw(image, rect);
    }

    for effect in state.effects.iter_mut() {
        let (image, rect) = effect.snapshot()?;
        platform.draw(image, rect);
    }

    platform.draw_text(state.score.text(), SCORE_POS.0, SCORE_POS.1);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessPlatform;
    use crate::platform::headless::DrawCall;
    use crate::tuning::{AssetNames, Tuning};

    #[test]
    fn test_frame_layer_order() {
        let names = AssetNames::default();
        let mut platform = HeadlessPlatform::with_assets(&names);
        let assets = Assets::load(&mut platform, &names).unwrap();
        let mut state = GameState::new(&assets, Tuning::default(), 3).unwrap();

        render(&mut state, &assets, &mut platform).unwrap();
        platform.present();
        let frame = platform.last_frame();

        // background + 5 hazard warnings + player + score
        assert_eq!(frame.len(), 8);
        match &frame[0] {
            DrawCall::Image { image, rect } => {
                assert_eq!(image.source, ImageSource::Asset("fig/pg_bg.jpg".to_string()));
                assert_eq!(*rect, Rect::new(0, 0, 900, 600));
            }
            other => panic!("expected background, got {:?}", other),
        }
        for call in &frame[1..6] {
            assert!(matches!(call, DrawCall::Image { image, .. } if image.alpha == 96));
        }
        assert!(matches!(
            &frame[6],
            DrawCall::Image { rect, .. } if *rect == state.player.rect()
        ));
        assert_eq!(
            frame[7],
            DrawCall::Text {
                text: "Score: 0".to_string(),
                x: 10,
                y: 10
            }
        );
    }
}
