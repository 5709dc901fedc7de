/// Pet rule constants.
///
/// These are fixed game rules, not deployment settings; tunables such as the
/// decay schedule live in the runtime configuration and default to the
/// values here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PetConfig;

impl PetConfig {
    // ===== fixed rules =====
    pub const INITIAL_STAT: u8 = 50;
    pub const DEFAULT_PET_NAME: &'static str = "Fluffy";
    pub const MIN_USERNAME_LEN: usize = 3;
    pub const MIN_PASSWORD_LEN: usize = 6;

    // ===== action deltas =====
    pub const FEED_DELTA: i32 = 10;
    pub const PLAY_DELTA: i32 = 15;
    pub const PET_DELTA: i32 = 20;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_DECAY_AMOUNT: u32 = 4;
}
