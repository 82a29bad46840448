//! Tunable constants the engine needs that the teacher bakes into generated
//! Pokédex data. Grounded on the teacher's preference for plain,
//! `Default`-implementing config/builder structs (`PokemonConfig`) over an
//! external config-file crate — there is no file-based configuration in
//! this domain, so none is introduced here either (SPEC_FULL.md §D).

#[derive(Debug, Clone)]
pub struct BattleConfig {
    /// Chance (1-100) a Sleep status clears at turn start.
    pub wake_chance: u8,
    /// Chance (1-100) a Freeze status clears at turn start.
    pub thaw_chance: u8,
    /// Chance (1-100) a confused creature hits itself instead of acting.
    pub confusion_self_hit_chance: u8,
    /// Flat damage a confusion self-hit deals (SPEC_FULL.md §G.2).
    pub confusion_self_hit_damage: u32,
    /// Base critical-hit rate (1-100) absent a forced-crit signature hook.
    pub base_crit_percent: u8,
    /// Escape success chance (1-100) in non-PvP battles.
    pub escape_chance: u8,
    pub rng_seed: u64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            wake_chance: 25,
            thaw_chance: 20,
            confusion_self_hit_chance: 50,
            confusion_self_hit_damage: 40,
            base_crit_percent: 6,
            escape_chance: 75,
            rng_seed: 0,
        }
    }
}
