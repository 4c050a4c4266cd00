//! Loaded game images
//!
//! Every image is loaded once at startup and shared by handle.

use crate::consts::PLAYER_ZOOM;
use crate::error::GameError;
use crate::platform::Platform;
use crate::renderer::ImageHandle;
use crate::sim::PlayerSprites;
use crate::tuning::AssetNames;

#[derive(Debug, Clone)]
pub struct Assets {
    pub background: ImageHandle,
    pub player: PlayerSprites,
    /// Unrotated beam, pointing right
    pub beam: ImageHandle,
    pub explosion: ImageHandle,
}

impl Assets {
    /// Load every image named in `names`; the first missing one is an error
    pub fn load(platform: &mut impl Platform, names: &AssetNames) -> Result<Self, GameError> {
        let background = platform.load_image(&names.background)?.shared();

        // The source bird faces left: zoom it and mirror it to face right
        let normal = platform
            .load_image(&names.player)?
            .rotozoom(0.0, PLAYER_ZOOM)
            .flipped(true, false)
            .shared();
        let cheering = platform
            .load_image(&names.player_cheering)?
            .rotozoom(0.0, PLAYER_ZOOM)
            .shared();
        let defeated = platform
            .load_image(&names.player_defeated)?
            .rotozoom(0.0, PLAYER_ZOOM)
            .shared();

        let beam = platform.load_image(&names.beam)?.shared();
        let explosion = platform.load_image(&names.explosion)?.shared();

        log::info!("Loaded game images");
        Ok(Self {
            background,
            player: PlayerSprites {
                normal,
                cheering,
                defeated,
            },
            beam,
            explosion,
        })
    }
}
