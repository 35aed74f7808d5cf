//! Attack and defense resolution.

use crate::combat::{
    AttackReport, DefenseReport, HitOutcome, HitReport, defense_succeeds, mitigate, raw_damage,
};
use crate::combatant::{EnemyProfile, Rank, Side};
use crate::cue::{Cue, Cutscene, Pose, SoundEffect};
use crate::env::{CombatEnv, ItemOracle, OracleError, compute_seed};
use crate::stage::ProgressStore;
use crate::timing::Tier;

use super::{CombatEngine, CombatError, Phase, Resolution, hp_cue, hp_pose, stage_profile};

impl CombatEngine<'_> {
    /// Freezes the attack bar and resolves the player's attack.
    ///
    /// Item effects hit the enemy's status once, before any hit. Each hit
    /// then rolls the enemy's defense independently; the sequence stops early
    /// when the enemy drops to 0 HP. The enemy's per-turn status is cleared
    /// after the last hit whatever the outcome.
    pub fn confirm_attack(
        &mut self,
        env: &CombatEnv<'_>,
        store: &mut dyn ProgressStore,
    ) -> Result<Resolution, CombatError> {
        if self.state.combat.phase != Phase::AttackTiming {
            return Ok(Resolution::ignored());
        }

        let config = env.config()?.combat();
        let rng = env.rng()?;
        let items = env.items()?;
        let roster = env.roster()?;

        let player_stats = *self
            .state
            .combat
            .player
            .as_ref()
            .ok_or(CombatError::PlayerNotConfigured)?
            .stats();
        let enemy_rank = self
            .state
            .combat
            .enemy
            .as_ref()
            .ok_or(CombatError::EnemyNotConfigured)?
            .rank;
        let item_id = self
            .state
            .combat
            .selection
            .pending()
            .ok_or(CombatError::NoItemSelected)?;
        let item = items.item(item_id).ok_or(CombatError::UnknownItem(item_id))?;
        let final_rank = roster.final_rank();
        let next_profile = if Some(enemy_rank) == final_rank {
            None
        } else {
            let next = self.state.stages.current_index() + 1;
            stage_profile(roster, &self.state.stages, next)?
        };

        let (game_seed, nonce) = (self.state.game_seed, self.state.nonce);
        let epsilon = config.defense_epsilon;
        let threshold = config.low_hp_threshold;
        let combat = &mut self.state.combat;
        let enemy = combat
            .enemy
            .as_mut()
            .ok_or(CombatError::EnemyNotConfigured)?;

        let tier = combat.attack_bar.check(&config.timing.attack_zones.tiers());
        let timing_multiplier = config.timing.attack_multiplier(tier);
        let raw = raw_damage(
            player_stats.base_damage,
            player_stats.attack_coefficient,
            timing_multiplier,
            item.multiplier(),
        );

        item.apply_effects(enemy.combatant.status_mut());
        let damage_per_hit = mitigate(raw, enemy.combatant.stats().defense_coefficient, epsilon);

        let mut cues = vec![
            Cue::TimingResult { tier },
            Cue::Pose {
                side: Side::Player,
                pose: Pose::Throw,
            },
            Cue::Sound(SoundEffect::Throw),
        ];
        let mut hits = Vec::new();

        for index in 0..item.hit_count() {
            let chance = enemy.combatant.defense_chance(0.0);
            let roll = rng.unit(compute_seed(
                game_seed,
                nonce,
                Side::Enemy.tag(),
                u32::from(index),
            ));
            cues.push(Cue::Projectile {
                from: Side::Player,
                item: Some(item_id),
            });

            let outcome = if defense_succeeds(chance, roll, false) {
                cues.push(Cue::Pose {
                    side: Side::Enemy,
                    pose: Pose::Dodge,
                });
                cues.push(Cue::floating(Side::Enemy, "Miss"));
                cues.push(Cue::Sound(SoundEffect::Defend));
                HitOutcome::Defended
            } else {
                let dealt = enemy.combatant.take_damage(raw, epsilon);
                cues.push(Cue::Sound(SoundEffect::Hit));
                cues.push(Cue::floating(Side::Enemy, format!("-{dealt:.0}")));
                cues.push(hp_cue(Side::Enemy, &enemy.combatant));
                cues.push(Cue::Pose {
                    side: Side::Enemy,
                    pose: hp_pose(&enemy.combatant, threshold),
                });
                HitOutcome::Landed { damage: dealt }
            };

            hits.push(HitReport {
                index,
                defense_chance: chance,
                roll,
                outcome,
                enemy_hp_after: enemy.combatant.hp(),
            });

            if enemy.combatant.is_defeated() {
                break;
            }
        }

        enemy.combatant.end_turn();
        let enemy_defeated = enemy.combatant.is_defeated();
        if !enemy_defeated {
            combat.phase = Phase::DefenseTiming;
            combat.clock.reset();
            combat.defense_bar.restart();
        }
        self.state.nonce += 1;

        let mut resolution = Resolution::applied(cues);
        resolution.attack = Some(AttackReport {
            item: item_id,
            tier,
            timing_multiplier,
            damage_per_hit,
            hits,
            enemy_defeated,
        });

        if enemy_defeated {
            self.defeat_enemy(items, enemy_rank, final_rank, next_profile, store, &mut resolution);
        }
        Ok(resolution)
    }

    /// Freezes the defense bar and resolves the enemy's counterattack.
    ///
    /// A successful defense negates the hit entirely. Otherwise the enemy's
    /// damage, scaled by its item, is divided by the player's defense
    /// coefficient.
    pub fn confirm_defense(&mut self, env: &CombatEnv<'_>) -> Result<Resolution, CombatError> {
        if self.state.combat.phase != Phase::DefenseTiming {
            return Ok(Resolution::ignored());
        }

        let config = env.config()?.combat();
        let rng = env.rng()?;
        let items = env.items()?;

        if self.state.combat.player.is_none() {
            return Err(CombatError::PlayerNotConfigured);
        }
        let enemy = self
            .state
            .combat
            .enemy
            .as_ref()
            .ok_or(CombatError::EnemyNotConfigured)?;
        let enemy_item = enemy.item;
        let enemy_stats = *enemy.combatant.stats();
        let enemy_multiplier = match enemy_item {
            Some(id) => items
                .item(id)
                .ok_or(OracleError::ItemNotFound(id))?
                .multiplier(),
            None => 1.0,
        };

        let (game_seed, nonce) = (self.state.game_seed, self.state.nonce);
        let combat = &mut self.state.combat;
        let player = combat
            .player
            .as_mut()
            .ok_or(CombatError::PlayerNotConfigured)?;

        let tier = combat
            .defense_bar
            .check(&[(Tier::Perfect, config.timing.defense_zone)]);
        let chance = player.defense_chance(config.timing.defense_bonus(tier));
        let roll = if config.timing.defense_auto_success(tier) {
            None
        } else {
            Some(rng.unit(compute_seed(game_seed, nonce, Side::Player.tag(), 0)))
        };
        let defended = match roll {
            Some(roll) => defense_succeeds(chance, roll, false),
            None => true,
        };

        let mut cues = vec![
            Cue::TimingResult { tier },
            Cue::Pose {
                side: Side::Enemy,
                pose: Pose::Throw,
            },
            Cue::Sound(SoundEffect::Throw),
            Cue::Projectile {
                from: Side::Enemy,
                item: enemy_item,
            },
        ];

        let damage = if defended {
            cues.push(Cue::Pose {
                side: Side::Player,
                pose: Pose::Dodge,
            });
            cues.push(Cue::floating(Side::Player, "Blocked"));
            cues.push(Cue::Sound(SoundEffect::Defend));
            0.0
        } else {
            let raw = raw_damage(
                enemy_stats.base_damage,
                enemy_stats.attack_coefficient,
                1.0,
                enemy_multiplier,
            );
            let dealt = player.take_damage(raw, config.defense_epsilon);
            cues.push(Cue::Sound(SoundEffect::Hit));
            cues.push(Cue::floating(Side::Player, format!("-{dealt:.0}")));
            cues.push(hp_cue(Side::Player, player));
            cues.push(Cue::Pose {
                side: Side::Player,
                pose: hp_pose(player, config.low_hp_threshold),
            });
            dealt
        };

        player.end_turn();
        let report = DefenseReport {
            tier,
            defense_chance: chance,
            roll,
            defended,
            damage,
            player_hp_after: player.hp(),
            player_defeated: player.is_defeated(),
        };

        combat.park_bars();
        combat.phase = if report.player_defeated {
            Phase::Defeat
        } else {
            Phase::ItemSelect
        };
        self.state.nonce += 1;

        if report.player_defeated {
            self.stop_music(&mut cues);
            cues.push(Cue::Sound(SoundEffect::Defeat));
            cues.push(Cue::Cutscene(Cutscene::GameOver));
        }

        let mut resolution = Resolution::applied(cues);
        resolution.defense = Some(report);
        Ok(resolution)
    }

    /// Victory bookkeeping: game clear on the final rank, otherwise advance a stage.
    fn defeat_enemy(
        &mut self,
        items: &dyn ItemOracle,
        rank: Rank,
        final_rank: Option<Rank>,
        next_profile: Option<EnemyProfile>,
        store: &mut dyn ProgressStore,
        resolution: &mut Resolution,
    ) {
        resolution.cues.push(Cue::Sound(SoundEffect::Victory));

        if Some(rank) == final_rank {
            self.clear_game(&mut resolution.cues);
            return;
        }

        let advance = self.state.stages.on_enemy_defeated(store);
        if let Some(item) = advance.unlocked {
            resolution.cues.push(Cue::ItemUnlocked { item });
            resolution.cues.push(Cue::Sound(SoundEffect::Unlock));
        }
        self.refresh_selection(items);

        if advance.campaign_complete() {
            self.clear_game(&mut resolution.cues);
        } else {
            self.enter_stage(next_profile, final_rank, &mut resolution.cues);
        }

        resolution.save_error = advance.save_error.clone();
        resolution.stage = Some(advance);
    }

    fn clear_game(&mut self, cues: &mut Vec<Cue>) {
        self.state.combat.phase = Phase::GameClear;
        self.state.combat.park_bars();
        self.stop_music(cues);
        cues.push(Cue::Cutscene(Cutscene::GameClear));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::combatant::CombatantStats;
    use crate::config::CombatConfig;
    use crate::cue::MusicTrack;
    use crate::env::{Env, PcgRng, RngOracle, RosterOracle};
    use crate::item::{Effect, Item, ItemId};
    use crate::stage::{Stage, stage_cleared_key};
    use crate::state::GameState;
    use crate::StepOutcome;

    const REPORT: ItemId = ItemId(0);
    const COFFEE: ItemId = ItemId(1);
    const STAPLER: ItemId = ItemId(2);

    struct Catalog(Vec<Item>);

    impl ItemOracle for Catalog {
        fn item(&self, id: ItemId) -> Option<Item> {
            self.0.iter().find(|item| item.id == id).cloned()
        }

        fn all_items(&self) -> Vec<Item> {
            self.0.clone()
        }
    }

    struct Roster {
        player: CombatantStats,
        profiles: Vec<EnemyProfile>,
        stages: Vec<Stage>,
    }

    impl RosterOracle for Roster {
        fn player_stats(&self) -> CombatantStats {
            self.player
        }

        fn profile(&self, rank: Rank) -> Option<EnemyProfile> {
            self.profiles.iter().find(|profile| profile.rank == rank).cloned()
        }

        fn stages(&self) -> Vec<Stage> {
            self.stages.clone()
        }
    }

    /// Every roll returns the same value.
    struct FixedRoll(f32);

    impl RngOracle for FixedRoll {
        fn next_u32(&self, _seed: u64) -> u32 {
            0
        }

        fn unit(&self, _seed: u64) -> f32 {
            self.0
        }
    }

    struct Fixture {
        catalog: Catalog,
        roster: Roster,
        config: CombatConfig,
        rng: FixedRoll,
    }

    impl Fixture {
        fn new(roll: f32) -> Self {
            let enemy = |hp, damage, chance| CombatantStats {
                max_hp: hp,
                base_damage: damage,
                base_defense_chance: chance,
                ..CombatantStats::enemy_default()
            };
            Self {
                catalog: Catalog(vec![
                    Item::new(REPORT, "Report Bundle", 1.5).starter(),
                    Item::new(COFFEE, "Hot Coffee", 1.0).with_effect(Effect::BlockNextDefense),
                    Item::new(STAPLER, "Stapler", 1.0)
                        .with_effect(Effect::DoubleAttack { hits: 2 }),
                ]),
                roster: Roster {
                    player: CombatantStats {
                        base_damage: 15.0,
                        ..CombatantStats::player_default()
                    },
                    profiles: vec![
                        EnemyProfile::new("Kim", Rank::Associate, enemy(80.0, 12.0, 0.25)),
                        EnemyProfile::new("Park", Rank::Manager, enemy(120.0, 18.0, 0.35)),
                        EnemyProfile::new("Kim Sr.", Rank::Ceo, enemy(400.0, 50.0, 0.65)),
                    ],
                    stages: vec![
                        Stage::new("Stage 1", Rank::Associate, Some(COFFEE)),
                        Stage::new("Stage 2", Rank::Manager, Some(STAPLER)),
                        Stage::new("Stage 3", Rank::Ceo, None),
                    ],
                },
                config: CombatConfig::default(),
                rng: FixedRoll(roll),
            }
        }

        fn env(&self) -> CombatEnv<'_> {
            Env::with_all(&self.catalog, &self.roster, &self.config, &self.rng).as_combat_env()
        }

        fn start(&self, store: &BTreeMap<String, bool>) -> GameState {
            let env = self.env();
            let mut state = GameState::from_env(7, &env).unwrap();
            CombatEngine::new(&mut state).initialize(&env, store).unwrap();
            state
        }
    }

    /// Selects and confirms `item`, lets the attack bar run for `dt`, then attacks.
    fn attack(
        fx: &Fixture,
        state: &mut GameState,
        store: &mut BTreeMap<String, bool>,
        item: ItemId,
        dt: f32,
    ) -> Resolution {
        let env = fx.env();
        let mut engine = CombatEngine::new(state);
        engine.select_item(&env, item).unwrap();
        engine.confirm_item(&env).unwrap();
        state.combat.attack_bar.advance(dt);
        CombatEngine::new(state).confirm_attack(&env, store).unwrap()
    }

    /// Lets the defense bar run for `dt`, then defends.
    fn defend(fx: &Fixture, state: &mut GameState, dt: f32) -> Resolution {
        state.combat.defense_bar.advance(dt);
        CombatEngine::new(state).confirm_defense(&fx.env()).unwrap()
    }

    fn enemy_hp(state: &GameState) -> f32 {
        state.enemy().unwrap().combatant.hp()
    }

    fn player_hp(state: &GameState) -> f32 {
        state.player().unwrap().hp()
    }

    #[test]
    fn initialize_spawns_first_stage() {
        let fx = Fixture::new(0.99);
        let state = fx.start(&BTreeMap::new());

        assert_eq!(state.phase(), Phase::ItemSelect);
        assert_eq!(state.enemy().unwrap().name, "Kim");
        assert_eq!(state.combat.selection.available(), &[REPORT]);
        assert_eq!(state.combat.music, Some(MusicTrack::Normal));
    }

    #[test]
    fn first_run_plays_intro() {
        let fx = Fixture::new(0.99);
        let env = fx.env();
        let mut state = GameState::from_env(7, &env).unwrap();
        let resolution = CombatEngine::new(&mut state)
            .initialize(&env, &BTreeMap::new())
            .unwrap();
        assert_eq!(resolution.cues.first(), Some(&Cue::Cutscene(Cutscene::Intro)));
    }

    #[test]
    fn perfect_attack_with_report_bundle_deals_45() {
        let fx = Fixture::new(0.99);
        let mut store = BTreeMap::new();
        let mut state = fx.start(&store);

        // 0.8s at 500 units/s puts the indicator at the centre.
        let resolution = attack(&fx, &mut state, &mut store, REPORT, 0.8);
        let report = resolution.attack.unwrap();

        assert_eq!(report.tier, Tier::Perfect);
        assert_eq!(report.damage_per_hit, 45.0);
        assert_eq!(report.total_damage(), 45.0);
        assert_eq!(enemy_hp(&state), 35.0);
        assert_eq!(state.phase(), Phase::DefenseTiming);
        assert_eq!(state.nonce, 1);
    }

    #[test]
    fn missed_timing_still_deals_base_damage() {
        let fx = Fixture::new(0.99);
        let mut store = BTreeMap::new();
        let mut state = fx.start(&store);

        let report = attack(&fx, &mut state, &mut store, REPORT, 0.0).attack.unwrap();
        assert_eq!(report.tier, Tier::Miss);
        assert_eq!(report.total_damage(), 22.5);
    }

    #[test]
    fn perfect_defense_with_high_roll_still_fails() {
        let fx = Fixture::new(0.95);
        let mut store = BTreeMap::new();
        let mut state = fx.start(&store);
        attack(&fx, &mut state, &mut store, REPORT, 0.8);

        // 0.5s at 700 units/s lands at -50, inside the defense zone.
        let report = defend(&fx, &mut state, 0.5).defense.unwrap();

        assert_eq!(report.tier, Tier::Perfect);
        assert!((report.defense_chance - 0.6).abs() < 1e-6);
        assert!(!report.defended);
        assert_eq!(report.damage, 12.0);
        assert_eq!(player_hp(&state), 88.0);
        assert_eq!(state.phase(), Phase::ItemSelect);
    }

    #[test]
    fn enemy_item_scales_counterattack() {
        let mut fx = Fixture::new(0.95);
        fx.roster.profiles[0] = fx.roster.profiles[0].clone().with_item(REPORT);
        let mut store = BTreeMap::new();
        let mut state = fx.start(&store);
        attack(&fx, &mut state, &mut store, REPORT, 0.8);

        let report = defend(&fx, &mut state, 0.5).defense.unwrap();

        assert!(!report.defended);
        // 12 * 1.0 * 1.5 (Report Bundle)
        assert_eq!(report.damage, 18.0);
        assert_eq!(player_hp(&state), 82.0);
    }

    #[test]
    fn long_tick_lands_where_split_ticks_do() {
        let fx = Fixture::new(0.99);
        let env = fx.env();
        let mut whole = fx.start(&BTreeMap::new());
        CombatEngine::new(&mut whole).use_current_item(&env).unwrap();
        let mut split = whole.clone();

        CombatEngine::new(&mut whole).tick(5.0);
        for _ in 0..5 {
            CombatEngine::new(&mut split).tick(1.0);
        }

        let position = whole.combat.attack_bar.position();
        assert_eq!(position, split.combat.attack_bar.position());
        // 2500 units of travel from the left bound: two bounces, then back to 300.
        assert!((position - 300.0).abs() < 0.5, "position {position}");
    }

    #[test]
    fn successful_defense_changes_no_hp() {
        let fx = Fixture::new(0.1);
        let mut store = BTreeMap::new();
        let mut state = fx.start(&store);
        attack(&fx, &mut state, &mut store, REPORT, 0.8);

        let enemy_before = enemy_hp(&state);
        let report = defend(&fx, &mut state, 0.0).defense.unwrap();

        assert!(report.defended);
        assert_eq!(report.damage, 0.0);
        assert_eq!(player_hp(&state), 100.0);
        assert_eq!(enemy_hp(&state), enemy_before);
    }

    #[test]
    fn auto_success_skips_the_roll() {
        let mut fx = Fixture::new(0.99);
        fx.config.timing.perfect_defense_auto_success = true;
        let mut store = BTreeMap::new();
        let mut state = fx.start(&store);
        attack(&fx, &mut state, &mut store, REPORT, 0.8);

        let report = defend(&fx, &mut state, 0.5).defense.unwrap();
        assert_eq!(report.roll, None);
        assert!(report.defended);
        assert_eq!(player_hp(&state), 100.0);
    }

    #[test]
    fn enemy_defense_negates_each_hit_independently() {
        // Roll 0.1 is below the associate's 0.25 defense chance.
        let fx = Fixture::new(0.1);
        let mut store = BTreeMap::new();
        let mut state = fx.start(&store);

        let report = attack(&fx, &mut state, &mut store, REPORT, 0.8).attack.unwrap();
        assert_eq!(report.hits.len(), 1);
        assert_eq!(report.hits[0].outcome, HitOutcome::Defended);
        assert_eq!(enemy_hp(&state), 80.0);
    }

    #[test]
    fn double_attack_rolls_once_per_hit() {
        let fx = Fixture::new(0.99);
        let mut store = BTreeMap::new();
        store.insert(stage_cleared_key(0), true);
        store.insert(stage_cleared_key(1), true);
        let mut state = fx.start(&store);

        let report = attack(&fx, &mut state, &mut store, STAPLER, 0.8).attack.unwrap();
        assert_eq!(report.hits.len(), 2);
        assert_eq!(report.landed_hits(), 2);
        // 15 * 2.0 (Perfect) * 1.0 per hit
        assert_eq!(enemy_hp(&state), 20.0);
    }

    #[test]
    fn double_attack_stops_when_enemy_falls() {
        let fx = Fixture::new(0.99);
        let mut store = BTreeMap::new();
        store.insert(stage_cleared_key(0), true);
        store.insert(stage_cleared_key(1), true);
        let mut state = fx.start(&store);
        state.combat.enemy.as_mut().unwrap().combatant.set_hp(10.0);

        let report = attack(&fx, &mut state, &mut store, STAPLER, 0.8).attack.unwrap();
        assert_eq!(report.hits.len(), 1);
        assert!(report.enemy_defeated);
    }

    #[test]
    fn block_defense_applies_once_and_clears() {
        let mut fx = Fixture::new(0.0);
        fx.roster.profiles[0].stats.base_defense_chance = 1.0;
        let mut store = BTreeMap::new();
        store.insert(stage_cleared_key(0), true);
        let mut state = fx.start(&store);
        // Stage 0 is cleared but play still starts there.
        assert_eq!(state.enemy().unwrap().rank, Rank::Associate);

        let blocked = attack(&fx, &mut state, &mut store, COFFEE, 0.8).attack.unwrap();
        assert_eq!(blocked.hits[0].defense_chance, 0.0);
        assert_eq!(blocked.landed_hits(), 1);
        assert!(state.enemy().unwrap().combatant.status().is_clear());

        defend(&fx, &mut state, 0.5);
        let plain = attack(&fx, &mut state, &mut store, REPORT, 0.8).attack.unwrap();
        assert_eq!(plain.hits[0].outcome, HitOutcome::Defended);
    }

    #[test]
    fn wrong_phase_triggers_are_ignored() {
        let fx = Fixture::new(0.99);
        let mut store = BTreeMap::new();
        let mut state = fx.start(&store);
        let before = state.clone();
        let env = fx.env();

        let mut engine = CombatEngine::new(&mut state);
        assert_eq!(engine.confirm_defense(&env).unwrap().outcome, StepOutcome::Ignored);
        assert_eq!(
            engine.confirm_attack(&env, &mut store).unwrap().outcome,
            StepOutcome::Ignored
        );
        assert_eq!(engine.tick(1.0).outcome, StepOutcome::Ignored);
        assert_eq!(state, before);
    }

    #[test]
    fn missing_enemy_rejects_without_mutation() {
        let fx = Fixture::new(0.99);
        let mut store = BTreeMap::new();
        let mut state = fx.start(&store);
        let env = fx.env();
        CombatEngine::new(&mut state).use_current_item(&env).unwrap();
        state.combat.enemy = None;
        let before = state.clone();

        let error = CombatEngine::new(&mut state)
            .confirm_attack(&env, &mut store)
            .unwrap_err();
        assert_eq!(error, CombatError::EnemyNotConfigured);
        assert_eq!(state, before);
    }

    #[test]
    fn confirm_requires_a_pending_item() {
        let fx = Fixture::new(0.99);
        let mut state = fx.start(&BTreeMap::new());
        let error = CombatEngine::new(&mut state).confirm_item(&fx.env()).unwrap_err();
        assert_eq!(error, CombatError::NoItemSelected);
        assert_eq!(state.phase(), Phase::ItemSelect);
    }

    #[test]
    fn locked_and_unknown_items_are_rejected() {
        let fx = Fixture::new(0.99);
        let mut state = fx.start(&BTreeMap::new());
        let env = fx.env();
        let mut engine = CombatEngine::new(&mut state);

        assert_eq!(engine.select_item(&env, STAPLER), Err(CombatError::ItemLocked(STAPLER)));
        assert_eq!(
            engine.select_item(&env, ItemId(99)),
            Err(CombatError::UnknownItem(ItemId(99)))
        );
    }

    #[test]
    fn selection_emits_description() {
        let fx = Fixture::new(0.99);
        let mut state = fx.start(&BTreeMap::new());
        let resolution = CombatEngine::new(&mut state).select_next(&fx.env()).unwrap();
        assert!(resolution.cues.contains(&Cue::ItemDescription {
            item: REPORT,
            text: "Report Bundle x1.5".to_string(),
        }));
    }

    #[test]
    fn victory_persists_unlocks_and_advances() {
        let fx = Fixture::new(0.99);
        let mut store = BTreeMap::new();
        let mut state = fx.start(&store);
        state.combat.enemy.as_mut().unwrap().combatant.set_hp(1.0);
        state.combat.player.as_mut().unwrap().set_hp(40.0);

        let resolution = attack(&fx, &mut state, &mut store, REPORT, 0.8);
        let advance = resolution.stage.unwrap();

        assert_eq!(advance.unlocked, Some(COFFEE));
        assert!(store.get_bool(&stage_cleared_key(0), false));
        assert!(resolution.cues.contains(&Cue::ItemUnlocked { item: COFFEE }));
        assert_eq!(state.enemy().unwrap().name, "Park");
        assert_eq!(player_hp(&state), 100.0);
        assert_eq!(state.phase(), Phase::ItemSelect);
        assert_eq!(state.combat.selection.available(), &[REPORT, COFFEE]);
        assert_eq!(state.combat.selection.pending(), None);
    }

    #[test]
    fn final_rank_clears_the_game_and_locks_reset() {
        let fx = Fixture::new(0.99);
        let mut store = BTreeMap::new();
        let mut state = fx.start(&store);
        for _ in 0..2 {
            state.combat.enemy.as_mut().unwrap().combatant.set_hp(1.0);
            attack(&fx, &mut state, &mut store, REPORT, 0.8);
        }
        assert_eq!(state.enemy().unwrap().rank, Rank::Ceo);
        assert_eq!(state.combat.music, Some(MusicTrack::Boss));

        state.combat.enemy.as_mut().unwrap().combatant.set_hp(1.0);
        let resolution = attack(&fx, &mut state, &mut store, REPORT, 0.8);
        assert_eq!(state.phase(), Phase::GameClear);
        assert!(resolution.cues.contains(&Cue::Cutscene(Cutscene::GameClear)));
        assert!(resolution.stage.is_none());

        let error = CombatEngine::new(&mut state).reset_combat().unwrap_err();
        assert_eq!(error, CombatError::TerminalState);

        let env = fx.env();
        CombatEngine::new(&mut state).restart(&env, &mut store).unwrap();
        assert_eq!(state.phase(), Phase::ItemSelect);
        assert_eq!(state.stages.current_index(), 0);
        assert!(!state.stages.is_stage_cleared(0));
        assert!(!store.get_bool(&stage_cleared_key(1), true));
        assert_eq!(state.combat.selection.available(), &[REPORT]);
        assert_eq!(state.combat.music, Some(MusicTrack::Normal));
    }

    #[test]
    fn defeat_then_restart_replays_the_stage() {
        let fx = Fixture::new(0.99);
        let mut store = BTreeMap::new();
        let mut state = fx.start(&store);
        attack(&fx, &mut state, &mut store, REPORT, 0.8);
        state.combat.player.as_mut().unwrap().set_hp(5.0);

        let resolution = defend(&fx, &mut state, 0.0);
        assert_eq!(state.phase(), Phase::Defeat);
        assert!(resolution.cues.contains(&Cue::Cutscene(Cutscene::GameOver)));
        assert!(resolution.cues.contains(&Cue::StopMusic));

        let env = fx.env();
        let restarted = CombatEngine::new(&mut state).restart(&env, &mut store).unwrap();
        assert!(restarted.is_applied());
        assert_eq!(state.phase(), Phase::ItemSelect);
        assert_eq!(player_hp(&state), 100.0);
        assert_eq!(enemy_hp(&state), 80.0);
        assert_eq!(state.enemy().unwrap().name, "Kim");
        assert_eq!(state.combat.music, Some(MusicTrack::Normal));
    }

    #[test]
    fn restart_outside_terminal_is_ignored() {
        let fx = Fixture::new(0.99);
        let mut store = BTreeMap::new();
        let mut state = fx.start(&store);
        let resolution = CombatEngine::new(&mut state)
            .restart(&fx.env(), &mut store)
            .unwrap();
        assert_eq!(resolution.outcome, StepOutcome::Ignored);
    }

    #[test]
    fn reset_restores_hp_and_clears_selection() {
        let fx = Fixture::new(0.99);
        let mut store = BTreeMap::new();
        let mut state = fx.start(&store);
        attack(&fx, &mut state, &mut store, REPORT, 0.8);

        CombatEngine::new(&mut state).reset_combat().unwrap();
        assert_eq!(state.phase(), Phase::ItemSelect);
        assert_eq!(enemy_hp(&state), 80.0);
        assert_eq!(state.combat.selection.pending(), None);
        assert!(!state.combat.attack_bar.is_moving());
    }

    #[test]
    fn start_new_game_clears_first_run() {
        let fx = Fixture::new(0.99);
        let mut store = BTreeMap::new();
        store.insert(stage_cleared_key(0), true);
        let mut state = fx.start(&store);

        CombatEngine::new(&mut state)
            .start_new_game(&fx.env(), &mut store)
            .unwrap();
        assert!(!state.stages.is_first_run(&store));
        assert!(!state.stages.is_stage_cleared(0));
        assert!(!state.stages.is_unlocked(COFFEE));
    }

    #[test]
    fn tick_moves_only_the_active_bar() {
        let fx = Fixture::new(0.99);
        let mut state = fx.start(&BTreeMap::new());
        let env = fx.env();
        let mut engine = CombatEngine::new(&mut state);
        engine.use_current_item(&env).unwrap();
        engine.tick(0.5);

        assert!(state.combat.attack_bar.position() > -400.0);
        assert_eq!(state.combat.defense_bar.position(), -400.0);
    }

    #[test]
    fn seeded_rolls_replay_identically() {
        let run = || {
            let mut fx = Fixture::new(0.0);
            fx.roster.profiles[0].stats.base_defense_chance = 0.5;
            let env = Env::with_all(&fx.catalog, &fx.roster, &fx.config, &PcgRng).as_combat_env();
            let mut store = BTreeMap::new();
            let mut state = GameState::from_env(1234, &env).unwrap();
            CombatEngine::new(&mut state).initialize(&env, &store).unwrap();

            let mut hp = Vec::new();
            for _ in 0..3 {
                let mut engine = CombatEngine::new(&mut state);
                engine.use_current_item(&env).unwrap();
                engine.confirm_attack(&env, &mut store).unwrap();
                engine.confirm_defense(&env).unwrap();
                hp.push((enemy_hp(&state), player_hp(&state)));
            }
            hp
        };
        assert_eq!(run(), run());
    }
}
